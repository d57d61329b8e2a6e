//! Tests that run the whole service on a random port and talk to it over HTTP.

use {
    reqwest::{Method, StatusCode},
    serde_json::Value,
    std::net::SocketAddr,
    tokio::sync::oneshot,
};

mod orders;

/// HTTP client for talking to a running service. Dropping the client shuts
/// down the service.
pub struct Service {
    addr: SocketAddr,
    client: reqwest::Client,
    handle: tokio::task::JoinHandle<()>,
}

impl Service {
    pub async fn new() -> Self {
        Self::with_args(&[]).await
    }

    /// Starts the service with additional command line arguments.
    pub async fn with_args(args: &[&str]) -> Self {
        let (addr_sender, addr_receiver) = oneshot::channel();
        let args = ["grubdash", "--addr", "127.0.0.1:0"]
            .into_iter()
            .chain(args.iter().copied())
            .map(str::to_owned)
            .collect::<Vec<_>>();
        let handle = tokio::spawn(crate::run(args.into_iter(), Some(addr_sender)));
        let addr = addr_receiver.await.unwrap();
        Self {
            addr,
            client: reqwest::Client::new(),
            handle,
        }
    }

    pub async fn get(&self, path: &str) -> (StatusCode, Value) {
        self.request(Method::GET, path, None).await
    }

    pub async fn post(&self, path: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, path, Some(body)).await
    }

    pub async fn put(&self, path: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::PUT, path, Some(body)).await
    }

    pub async fn delete(&self, path: &str) -> (StatusCode, Value) {
        self.request(Method::DELETE, path, None).await
    }

    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let request = self
            .client
            .request(method, format!("http://{}{path}", self.addr));
        let request = match body {
            Some(body) => request.json(&body),
            None => request,
        };
        Self::decode(request.send().await.unwrap()).await
    }

    /// Sends a body as is, without encoding it as JSON first.
    pub async fn post_raw(&self, path: &str, body: impl Into<reqwest::Body>) -> (StatusCode, Value) {
        let response = self
            .client
            .post(format!("http://{}{path}", self.addr))
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .unwrap();
        Self::decode(response).await
    }

    /// The body of the response as text, for endpoints that don't speak JSON.
    pub async fn text(&self, path: &str) -> (StatusCode, String) {
        let response = self
            .client
            .get(format!("http://{}{path}", self.addr))
            .send()
            .await
            .unwrap();
        let status = response.status();
        (status, response.text().await.unwrap())
    }

    async fn decode(response: reqwest::Response) -> (StatusCode, Value) {
        let status = response.status();
        let text = response.text().await.unwrap();
        tracing::debug!(?status, ?text, "got a response");
        let body = if text.is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text).unwrap_or_else(|_| panic!("not JSON: {text}"))
        };
        (status, body)
    }
}

impl Drop for Service {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Asserts that a response is the error body the service returns for
/// rejected requests.
#[track_caller]
pub fn assert_error(response: (StatusCode, Value), status: u16, message: &str) {
    assert_eq!(response.0, status, "{}", response.1);
    assert_eq!(
        response.1,
        serde_json::json!({ "status": status, "message": message })
    );
}
