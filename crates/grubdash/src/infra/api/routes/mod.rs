use {
    super::error::{Rejection, rejection},
    axum::http::{Method, StatusCode, Uri},
};

mod dishes;
mod metrics;
mod orders;

pub(super) use {dishes::dishes, metrics::metrics, orders::orders};

pub(super) fn healthz<S>(app: axum::Router<S>) -> axum::Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    app.route("/healthz", axum::routing::get(|| async { StatusCode::OK }))
}

/// Answers requests for paths no route matches.
pub(super) async fn not_found(uri: Uri) -> Rejection {
    rejection(StatusCode::NOT_FOUND, format!("Path not found: {}", uri.path()))
}

/// Answers requests using a method the matched route doesn't support.
async fn method_not_allowed(method: Method, uri: Uri) -> Rejection {
    rejection(
        StatusCode::METHOD_NOT_ALLOWED,
        format!("{method} not allowed for {}", uri.path()),
    )
}
