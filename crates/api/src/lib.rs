//! HTTP API server for the food tracker backend.
//!
//! Provides endpoints to store meals, list them, and summarize them without
//! photos, over either an in-memory or a PostgreSQL meal store, with
//! structured logging (tracing) and Prometheus metrics.

pub mod config;
pub mod error;
pub mod extract;
pub mod routes;
pub mod telemetry;

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use meal_store::MealStore;
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use routes::meals::AppState;

/// Creates the Axum application router with all routes and shared state.
pub fn create_app<S: MealStore + 'static>(
    state: Arc<AppState<S>>,
    metrics_handle: PrometheusHandle,
) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::render))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::health::check))
        .route(
            "/meals",
            get(routes::meals::list::<S>).post(routes::meals::create::<S>),
        )
        .route("/summary", get(routes::summary::get::<S>))
        .with_state(state)
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}
