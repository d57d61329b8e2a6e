pub(in crate::infra::api) fn metrics<S>(app: axum::Router<S>) -> axum::Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    app.route("/metrics", axum::routing::get(route))
}

async fn route() -> String {
    observe::metrics::encode(observe::metrics::get_registry())
}
