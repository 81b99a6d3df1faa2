pub mod api;
pub mod health;
pub mod metrics;

pub use api::*;
pub use health::*;
pub use metrics::*;

use axum::{middleware, routing::get, Router};
use std::{sync::Arc, time::Duration};
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::observability::{observability_middleware, Metrics};
use crate::services::CheckoutService;
use crate::store::SharedStore;

/// Build the full application router around an already-constructed store
pub fn create_app(
    store: SharedStore,
    checkout: Arc<CheckoutService>,
    metrics: Arc<Metrics>,
    request_timeout: Duration,
) -> Router {
    let metrics_for_middleware = metrics.clone();

    let api_state = ApiState {
        store: store.clone(),
        checkout: checkout.clone(),
    };

    let health_routes = Router::new()
        .route("/health/status", get(health_check))
        .with_state(api_state);

    let metrics_routes = Router::new()
        .route("/metrics", get(metrics_handler))
        .with_state(metrics);

    Router::new()
        .merge(health_routes)
        .merge(metrics_routes)
        .merge(create_api_router(store, checkout))
        .layer(middleware::from_fn(move |req, next| {
            observability_middleware(metrics_for_middleware.clone(), req, next)
        }))
        .layer(TimeoutLayer::new(request_timeout))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
