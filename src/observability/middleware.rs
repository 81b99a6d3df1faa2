use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};
use std::{sync::Arc, time::Instant};
use tracing::{info, warn, Instrument};

use super::Metrics;

/// Middleware for request logging and HTTP metrics
pub async fn observability_middleware(
    metrics: Arc<Metrics>,
    request: Request,
    next: Next,
) -> Response {
    let start_time = Instant::now();
    let method = request.method().to_string();

    let user_agent = request
        .headers()
        .get("user-agent")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown")
        .to_string();

    // Group by route template so ids don't explode label cardinality
    let endpoint = request
        .extensions()
        .get::<MatchedPath>()
        .map(|matched_path| matched_path.as_str().to_string())
        .unwrap_or_else(|| request.uri().path().to_string());

    let span = tracing::info_span!(
        target: "homeservices_rs::http",
        "http_request",
        http.method = %method,
        http.route = %endpoint,
        http.status_code = tracing::field::Empty,
        http.response_time_ms = tracing::field::Empty,
    );

    async {
        metrics.increment_in_flight(&method, &endpoint);

        info!(method = %method, path = %endpoint, user_agent = %user_agent, "Processing request");

        let response = next.run(request).await;

        let duration = start_time.elapsed();
        let duration_ms = duration.as_millis();
        let status_code = response.status().as_u16();

        tracing::Span::current().record("http.status_code", status_code);
        tracing::Span::current().record("http.response_time_ms", duration_ms);

        metrics.record_http_request(&method, &endpoint, status_code, duration.as_secs_f64());
        metrics.decrement_in_flight(&method, &endpoint);

        if status_code >= 400 {
            warn!(
                method = %method,
                path = %endpoint,
                status_code = status_code,
                duration_ms = duration_ms,
                "Request completed with error"
            );
        } else {
            info!(
                method = %method,
                path = %endpoint,
                status_code = status_code,
                duration_ms = duration_ms,
                "Request completed successfully"
            );
        }

        response
    }
    .instrument(span)
    .await
}
