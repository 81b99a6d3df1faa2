use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use homeservices_rs::{
    handlers::create_app,
    models::CheckoutPricing,
    repositories::StaticCatalogSource,
    services::CheckoutService,
    AppStore, Metrics, SharedStore,
};
use serde_json::Value;
use tower::ServiceExt;

pub struct TestEnvironment {
    pub app: Router,
    pub store: SharedStore,
    pub metrics: Arc<Metrics>,
}

impl TestEnvironment {
    /// App with the bundled catalog already loaded
    pub fn new() -> Self {
        let env = Self::loading();
        env.load_bundled_catalog();
        env
    }

    /// App whose catalog has not been loaded yet
    pub fn loading() -> Self {
        let metrics = Arc::new(Metrics::new().expect("metrics"));
        let store = AppStore::with_metrics(metrics.clone()).shared();
        let checkout = Arc::new(
            CheckoutService::new(CheckoutPricing::default()).with_metrics(metrics.clone()),
        );
        let app = create_app(
            store.clone(),
            checkout,
            metrics.clone(),
            Duration::from_secs(5),
        );

        Self {
            app,
            store,
            metrics,
        }
    }

    fn load_bundled_catalog(&self) {
        self.store
            .try_lock()
            .expect("store is uncontended during setup")
            .load_catalog(StaticCatalogSource::services());
    }

    pub async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("request");

        let response = self.app.clone().oneshot(request).await.expect("response");
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");

        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };

        (status, json)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, Some(body)).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::PUT, uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::DELETE, uri, None).await
    }
}

pub fn ids(services: &Value) -> Vec<u64> {
    services
        .as_array()
        .expect("array of services")
        .iter()
        .map(|service| service["id"].as_u64().expect("id"))
        .collect()
}
