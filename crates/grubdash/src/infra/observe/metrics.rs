/// Metrics for the service.
#[derive(Debug, Clone, prometheus_metric_storage::MetricStorage)]
pub struct Metrics {
    /// Requests turned down by a validation chain.
    #[metric(labels("resource", "status_code"))]
    pub validation_failures: prometheus::IntCounterVec,
    /// Successful changes to a collection.
    #[metric(labels("resource", "action"))]
    pub mutations: prometheus::IntCounterVec,
}

/// Setup the metrics registry.
pub fn init() {
    observe::metrics::setup_registry_reentrant(Some("grubdash".to_owned()), None);
}

/// Get the metrics instance.
pub fn get() -> &'static Metrics {
    Metrics::instance(observe::metrics::get_storage_registry())
        .expect("unexpected error getting metrics instance")
}
