use anyhow::Context;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};

use homeservices_rs::{
    handlers::create_app,
    init_observability,
    repositories::{CatalogSource, JsonFileCatalogSource, StaticCatalogSource},
    services::{CatalogLoader, CheckoutService},
    AppStore, Config, Metrics,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration first (basic logging only)
    let config = Config::from_environment().context("Failed to load configuration")?;
    println!("Configuration loaded successfully");

    init_observability(
        &config.observability.service_name,
        &config.observability.service_version,
        &config.observability.log_level,
        config.observability.enable_json_logging,
    )?;

    info!(
        "Service: {} v{}",
        config.observability.service_name, config.observability.service_version
    );

    let metrics = Arc::new(Metrics::new()?);
    info!("Metrics initialized successfully");

    let store = AppStore::with_metrics(metrics.clone()).shared();

    let source: Arc<dyn CatalogSource> = match &config.catalog.catalog_path {
        Some(path) => Arc::new(JsonFileCatalogSource::new(path.clone())),
        None => Arc::new(StaticCatalogSource::new()),
    };
    info!("Catalog source: {}", source.describe());

    // The catalog loads in the background; requests see is_loading until then
    let loader = CatalogLoader::new(source).with_load_delay(config.catalog.load_delay());
    let loader_store = store.clone();
    tokio::spawn(async move {
        if let Err(e) = loader.load_into(&loader_store).await {
            error!("Catalog load failed, serving an empty catalog: {}", e);
        }
    });

    let checkout = Arc::new(
        CheckoutService::new(config.checkout.pricing())
            .with_processing_delay(config.checkout.processing_delay())
            .with_metrics(metrics.clone()),
    );

    let app = create_app(store, checkout, metrics, config.server.request_timeout());

    let addr = config.server.bind_address();

    info!("Server listening on {}", addr);

    let listener = TcpListener::bind(addr.as_str())
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to install CTRL+C signal handler: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
