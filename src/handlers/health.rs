use axum::{extract::State, response::Json};
use serde_json::{json, Value};
use tracing::instrument;

use crate::handlers::ApiState;

/// Health check endpoint handler
#[instrument(name = "health_check", skip(state))]
pub async fn health_check(State(state): State<ApiState>) -> Json<Value> {
    let snapshot = state.store.lock().await.snapshot();

    Json(json!({
        "status": "healthy",
        "service": "homeservices-rs",
        "version": env!("CARGO_PKG_VERSION"),
        "catalog_loaded": !snapshot.is_loading,
        "catalog_size": snapshot.catalog.len(),
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}
