use prometheus::{
    Counter, CounterVec, Encoder, Gauge, GaugeVec, HistogramOpts, HistogramVec, Opts, Registry,
    TextEncoder,
};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("Failed to register metric: {0}")]
    Registration(#[from] prometheus::Error),
    #[error("Failed to encode metrics: {0}")]
    Encoding(String),
}

/// Prometheus metrics for the storefront
#[derive(Clone)]
pub struct Metrics {
    registry: Registry,

    // HTTP metrics
    pub http_requests_total: CounterVec,
    pub http_request_duration_seconds: HistogramVec,
    pub http_requests_in_flight: GaugeVec,

    // Store metrics
    pub store_actions_total: CounterVec,
    pub cart_units: Gauge,
    pub catalog_services: Gauge,

    // Checkout metrics
    pub orders_placed_total: Counter,
    pub checkout_failures_total: CounterVec,
}

impl Metrics {
    /// Create a new metrics instance with all metrics registered on a private registry
    pub fn new() -> Result<Self, MetricsError> {
        let registry = Registry::new();

        info!("Initializing Prometheus metrics");

        let http_requests_total = CounterVec::new(
            Opts::new(
                "http_requests_total",
                "Total number of HTTP requests processed",
            ),
            &["method", "endpoint", "status_code"],
        )?;

        let http_request_duration_seconds = HistogramVec::new(
            HistogramOpts::new(
                "http_request_duration_seconds",
                "HTTP request duration in seconds",
            )
            .buckets(vec![
                0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
            ]),
            &["method", "endpoint"],
        )?;

        let http_requests_in_flight = GaugeVec::new(
            Opts::new(
                "http_requests_in_flight",
                "Number of HTTP requests currently being processed",
            ),
            &["method", "endpoint"],
        )?;

        let store_actions_total = CounterVec::new(
            Opts::new(
                "store_actions_total",
                "Total number of actions dispatched to the store",
            ),
            &["action", "outcome"],
        )?;

        let cart_units = Gauge::new("cart_units", "Units currently in the cart")?;

        let catalog_services = Gauge::new(
            "catalog_services",
            "Number of services in the loaded catalog",
        )?;

        let orders_placed_total = Counter::new(
            "orders_placed_total",
            "Total number of orders confirmed",
        )?;

        let checkout_failures_total = CounterVec::new(
            Opts::new(
                "checkout_failures_total",
                "Total number of rejected checkout attempts",
            ),
            &["reason"],
        )?;

        registry.register(Box::new(http_requests_total.clone()))?;
        registry.register(Box::new(http_request_duration_seconds.clone()))?;
        registry.register(Box::new(http_requests_in_flight.clone()))?;
        registry.register(Box::new(store_actions_total.clone()))?;
        registry.register(Box::new(cart_units.clone()))?;
        registry.register(Box::new(catalog_services.clone()))?;
        registry.register(Box::new(orders_placed_total.clone()))?;
        registry.register(Box::new(checkout_failures_total.clone()))?;

        info!("Prometheus metrics initialized successfully");

        Ok(Metrics {
            registry,
            http_requests_total,
            http_request_duration_seconds,
            http_requests_in_flight,
            store_actions_total,
            cart_units,
            catalog_services,
            orders_placed_total,
            checkout_failures_total,
        })
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Encode all metrics in Prometheus text format
    pub fn encode(&self) -> Result<String, MetricsError> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();

        let mut buffer = Vec::new();
        encoder
            .encode(&metric_families, &mut buffer)
            .map_err(|e| MetricsError::Encoding(e.to_string()))?;

        String::from_utf8(buffer).map_err(|e| MetricsError::Encoding(e.to_string()))
    }

    /// Record HTTP request metrics
    pub fn record_http_request(
        &self,
        method: &str,
        endpoint: &str,
        status_code: u16,
        duration_seconds: f64,
    ) {
        let status_str = status_code.to_string();

        self.http_requests_total
            .with_label_values(&[method, endpoint, &status_str])
            .inc();

        self.http_request_duration_seconds
            .with_label_values(&[method, endpoint])
            .observe(duration_seconds);
    }

    /// Record a dispatched store action. `changed` is false for no-op dispatches.
    pub fn record_store_action(&self, action: &str, changed: bool) {
        let outcome = if changed { "applied" } else { "noop" };

        self.store_actions_total
            .with_label_values(&[action, outcome])
            .inc();
    }

    pub fn set_cart_units(&self, units: u64) {
        self.cart_units.set(units as f64);
    }

    pub fn set_catalog_size(&self, services: usize) {
        self.catalog_services.set(services as f64);
    }

    pub fn record_order_placed(&self) {
        self.orders_placed_total.inc();
    }

    pub fn record_checkout_failure(&self, reason: &str) {
        self.checkout_failures_total
            .with_label_values(&[reason])
            .inc();
    }

    pub fn increment_in_flight(&self, method: &str, endpoint: &str) {
        self.http_requests_in_flight
            .with_label_values(&[method, endpoint])
            .inc();
    }

    pub fn decrement_in_flight(&self, method: &str, endpoint: &str) {
        self.http_requests_in_flight
            .with_label_values(&[method, endpoint])
            .dec();
    }
}
