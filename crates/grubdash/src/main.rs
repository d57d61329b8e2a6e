#[tokio::main]
async fn main() {
    grubdash::start(std::env::args()).await;
}
