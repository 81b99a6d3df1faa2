use thiserror::Error;
use tracing::info;
use tracing_subscriber::{
    fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

#[derive(Debug, Error)]
pub enum ObservabilityError {
    #[error("Failed to initialize tracing subscriber: {0}")]
    TracingInit(String),
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Default filter directives when `RUST_LOG` is unset
pub fn default_filter(service_name: &str, log_level: &str) -> String {
    format!(
        "{}={},tower_http={}",
        service_name.replace('-', "_"),
        log_level,
        log_level
    )
}

/// Initialize structured logging. `RUST_LOG` overrides the configured level.
pub fn init_observability(
    service_name: &str,
    service_version: &str,
    log_level: &str,
    enable_json_logging: bool,
) -> Result<(), ObservabilityError> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(default_filter(service_name, log_level))
            .map_err(|e| ObservabilityError::Config(e.to_string()))?,
    };

    if enable_json_logging {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_current_span(false)
                    .with_span_list(false)
                    .with_target(false)
                    .with_thread_ids(false)
                    .with_thread_names(false)
                    .with_file(false)
                    .with_line_number(false)
                    .with_span_events(FmtSpan::NONE),
            )
            .try_init()
            .map_err(|e| ObservabilityError::TracingInit(e.to_string()))?;
    } else {
        // Human-readable formatter for development
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_thread_ids(false)
                    .with_thread_names(false)
                    .with_file(false)
                    .with_line_number(false)
                    .with_span_events(FmtSpan::NONE),
            )
            .try_init()
            .map_err(|e| ObservabilityError::TracingInit(e.to_string()))?;
    }

    info!(
        service_name,
        service_version, "Observability initialized successfully"
    );
    Ok(())
}
