use {
    crate::infra::{Api, Store, cli, config, observe},
    clap::Parser,
    std::{net::SocketAddr, time::Duration},
    tokio::sync::oneshot,
};

/// Time the API gets to finish in-flight requests after a shutdown signal.
const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(10);

pub async fn start(args: impl Iterator<Item = String>) {
    run(args, None).await
}

/// This function exists to enable running the service for testing. The
/// `addr_sender` parameter is used so that the testing framework can get the
/// address of the server and connect to it. Outside the test suite, the
/// `addr_sender` parameter is unused.
pub async fn run(
    args: impl Iterator<Item = String>,
    addr_sender: Option<oneshot::Sender<SocketAddr>>,
) {
    let args = cli::Args::parse_from(args);
    observe::init(&args);
    tracing::info!("running grubdash with {args:#?}");

    let seed = match &args.seed {
        Some(path) => config::file::load(path).await,
        None => config::Seed::default(),
    };
    observe::seeded(seed.dishes.len(), seed.orders.len());
    let store = Store::seeded(seed.dishes, seed.orders)
        .await
        .unwrap_or_else(|err| panic!("invalid seed data: {err}"));

    let (shutdown_sender, shutdown_receiver) = oneshot::channel();
    let serve = Api {
        store,
        addr: args.addr,
        addr_sender,
    }
    .serve(async {
        let _ = shutdown_receiver.await;
    });

    futures::pin_mut!(serve);
    tokio::select! {
        result = &mut serve => panic!("serve task exited: {result:?}"),
        _ = shutdown_signal() => {
            observe::shutting_down();
            shutdown_sender.send(()).expect("failed to send shutdown signal");
            match tokio::time::timeout(SHUTDOWN_TIMEOUT, serve).await {
                Ok(inner) => inner.expect("API failed during shutdown"),
                Err(_) => panic!("API shutdown exceeded timeout"),
            }
        }
    };
}

#[cfg(unix)]
async fn shutdown_signal() {
    // Intercept signals for graceful shutdown. Kubernetes sends sigterm, Ctrl-C
    // sends sigint.
    use tokio::signal::unix::{SignalKind, signal};
    let mut interrupt = signal(SignalKind::interrupt()).expect("failed to install SIGINT handler");
    let mut terminate = signal(SignalKind::terminate()).expect("failed to install SIGTERM handler");
    tokio::select! {
        _ = interrupt.recv() => (),
        _ = terminate.recv() => (),
    };
}

#[cfg(windows)]
async fn shutdown_signal() {
    // No support for signal handling on Windows.
    std::future::pending().await
}
