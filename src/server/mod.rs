//! HTTP surface: one POST route per generator plus health, info and metrics.

use axum::{
    Router,
    body::Bytes,
    extract::State,
    middleware,
    routing::{get, post},
};
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::cors::{Any, CorsLayer};

use crate::config::Config;
use crate::kind::GeneratorKind;
use crate::pipeline::Pipeline;

pub mod metrics;
pub mod router;

pub use metrics::HttpMetrics;

/// Shared state for HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Pipeline,
    pub config: Arc<Config>,
    pub metrics: Arc<Mutex<HttpMetrics>>,
}

impl AppState {
    pub fn new(pipeline: Pipeline, config: Arc<Config>) -> Self {
        Self {
            pipeline,
            config,
            metrics: Arc::new(Mutex::new(HttpMetrics::new())),
        }
    }
}

/// Build the full application router
pub fn build_router(state: AppState) -> Router {
    let mut app = Router::new()
        .route("/health", get(router::health_handler))
        .route("/info", get(router::info_handler))
        .route("/metrics", get(metrics::metrics_handler));

    for kind in GeneratorKind::ALL {
        app = app.route(
            &format!("/api/{}", kind.endpoint()),
            post(move |state: State<AppState>, body: Bytes| {
                router::generate_handler(kind, state, body)
            }),
        );
    }

    app.layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
        .layer(middleware::from_fn_with_state(
            state.metrics.clone(),
            metrics::track_requests,
        ))
        .with_state(state)
}
