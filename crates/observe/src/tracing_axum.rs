use {
    axum::http::Request,
    tracing::{Span, info_span},
};

/// Span wrapping everything that happens while serving a single request.
pub fn make_span<B>(request: &Request<B>) -> Span {
    let uri = request.uri();
    let method = request.method();

    info_span!("incoming request", %method, %uri)
}

