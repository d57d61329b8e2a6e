use {
    crate::{
        domain::{Dishes, Orders},
        infra::{Store, observe},
    },
    axum::{
        extract::{DefaultBodyLimit, MatchedPath, Request},
        http::{Method, StatusCode, header},
        middleware::{self, Next},
        response::Response,
    },
    futures::Future,
    std::{net::SocketAddr, sync::Arc, time::Instant},
    tokio::sync::oneshot,
    tower_http::{cors::CorsLayer, trace::TraceLayer},
};

mod dto;
mod error;
mod routes;

const MAX_JSON_BODY_PAYLOAD: usize = 1024 * 16;

pub struct Api {
    pub store: Store,
    pub addr: SocketAddr,
    /// If this channel is specified, the bound address will be sent to it. This
    /// allows binding to port 0 during testing.
    pub addr_sender: Option<oneshot::Sender<SocketAddr>>,
}

impl Api {
    pub async fn serve(
        self,
        shutdown: impl Future<Output = ()> + Send + 'static,
    ) -> Result<(), std::io::Error> {
        let app = router(self.store);

        // Start the server.
        let listener = tokio::net::TcpListener::bind(self.addr).await?;
        let local_addr = listener.local_addr()?;
        observe::serving(local_addr);
        if let Some(addr_sender) = self.addr_sender {
            // The receiver only goes away if whoever asked for the address
            // stopped caring about it.
            addr_sender.send(local_addr).ok();
        }
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await
    }
}

/// All routes of the service with metrics, CORS, body limit and request
/// tracing applied.
fn router(store: Store) -> axum::Router {
    let state = State(Arc::new(Inner {
        dishes: Dishes::new(store.dishes),
        orders: Orders::new(store.orders),
    }));

    let app = axum::Router::new();
    let app = routes::dishes(app);
    let app = routes::orders(app);
    let app = routes::healthz(app);
    let app = routes::metrics(app);

    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods(vec![
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(vec![header::ORIGIN, header::CONTENT_TYPE]);

    app.fallback(routes::not_found)
        .with_state(state)
        .layer(middleware::from_fn(with_matched_path_metric))
        .layer(
            tower::ServiceBuilder::new()
                .layer(TraceLayer::new_for_http().make_span_with(::observe::tracing_axum::make_span))
                .layer(cors)
                .layer(DefaultBodyLimit::max(MAX_JSON_BODY_PAYLOAD)),
        )
}

#[derive(Clone)]
struct State(Arc<Inner>);

impl State {
    fn dishes(&self) -> &Dishes {
        &self.0.dishes
    }

    fn orders(&self) -> &Orders {
        &self.0.orders
    }
}

struct Inner {
    dishes: Dishes,
    orders: Orders,
}

/// Records request metrics, labelled by the route that handled the request.
async fn with_matched_path_metric(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let matched_path = req
        .extensions()
        .get::<MatchedPath>()
        .map(|path| path.as_str().to_owned())
        .unwrap_or_else(|| "unknown".to_owned());
    let label = format!("{method} {matched_path}");

    let timer = Instant::now();
    let response = next.run(req).await;
    ApiMetrics::get().on_request_completed(&label, response.status(), timer);
    response
}

#[derive(prometheus_metric_storage::MetricStorage, Clone, Debug)]
#[metric(subsystem = "api")]
struct ApiMetrics {
    /// Number of completed API requests.
    #[metric(labels("method", "status_code"))]
    requests_complete: prometheus::IntCounterVec,

    /// Execution time for each API request.
    #[metric(labels("method"), buckets(0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1))]
    requests_duration_seconds: prometheus::HistogramVec,
}

impl ApiMetrics {
    fn get() -> &'static Self {
        Self::instance(::observe::metrics::get_storage_registry())
            .expect("unexpected error getting metrics instance")
    }

    fn on_request_completed(&self, method: &str, status: StatusCode, timer: Instant) {
        self.requests_complete
            .with_label_values(&[method, status.as_str()])
            .inc();
        self.requests_duration_seconds
            .with_label_values(&[method])
            .observe(timer.elapsed().as_secs_f64());
    }
}
