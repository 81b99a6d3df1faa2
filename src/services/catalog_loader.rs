use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, instrument};

use crate::models::{validate_catalog, CatalogError, Service, ServiceResult};
use crate::repositories::CatalogSource;
use crate::store::SharedStore;

/// Loads the catalog from a source into the store, driving the loading flag
pub struct CatalogLoader {
    source: Arc<dyn CatalogSource>,
    load_delay: Duration,
}

impl CatalogLoader {
    pub fn new(source: Arc<dyn CatalogSource>) -> Self {
        Self {
            source,
            load_delay: Duration::ZERO,
        }
    }

    /// Wait this long before fetching, simulating a remote catalog
    pub fn with_load_delay(mut self, load_delay: Duration) -> Self {
        self.load_delay = load_delay;
        self
    }

    /// Fetch and validate the catalog without touching the store
    pub async fn fetch(&self) -> ServiceResult<Vec<Service>> {
        let services = self.source.load_services().await?;
        validate_catalog(&services).map_err(CatalogError::from)?;
        Ok(services)
    }

    /// Load the catalog into the store. The store lock is never held across
    /// the delay or the fetch. On failure the catalog is left as it was and
    /// the loading flag is cleared.
    #[instrument(skip(self, store), fields(source = %self.source.describe()))]
    pub async fn load_into(&self, store: &SharedStore) -> ServiceResult<usize> {
        store.lock().await.set_loading(true);

        if !self.load_delay.is_zero() {
            tokio::time::sleep(self.load_delay).await;
        }

        match self.fetch().await {
            Ok(services) => {
                let count = services.len();
                store.lock().await.load_catalog(services);
                info!(count, "Catalog loaded");
                Ok(count)
            }
            Err(e) => {
                error!(error = %e, "Failed to load catalog");
                store.lock().await.set_loading(false);
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CatalogResult, ServiceError};
    use crate::repositories::StaticCatalogSource;
    use crate::store::AppStore;
    use async_trait::async_trait;
    use mockall::mock;
    use tokio_test::{assert_err, assert_ok};

    mock! {
        TestCatalogSource {}

        #[async_trait]
        impl CatalogSource for TestCatalogSource {
            async fn load_services(&self) -> CatalogResult<Vec<Service>>;
            fn describe(&self) -> String;
        }
    }

    fn mock_source(result: fn() -> CatalogResult<Vec<Service>>) -> MockTestCatalogSource {
        let mut source = MockTestCatalogSource::new();
        source
            .expect_load_services()
            .times(1)
            .returning(move || result());
        source
            .expect_describe()
            .returning(|| "mock".to_string());
        source
    }

    #[tokio::test]
    async fn test_load_into_populates_store() {
        let store = AppStore::new().shared();
        let loader = CatalogLoader::new(Arc::new(mock_source(|| {
            Ok(StaticCatalogSource::services())
        })));

        let count = assert_ok!(loader.load_into(&store).await);

        assert_eq!(count, 8);
        let snapshot = store.lock().await.snapshot();
        assert!(!snapshot.is_loading);
        assert_eq!(snapshot.catalog.len(), 8);
    }

    #[tokio::test]
    async fn test_load_failure_clears_loading_and_keeps_catalog() {
        let mut store = AppStore::new();
        store.load_catalog(StaticCatalogSource::services()[..1].to_vec());
        let store = store.shared();

        let loader = CatalogLoader::new(Arc::new(mock_source(|| {
            Err(CatalogError::Unavailable {
                message: "offline".to_string(),
            })
        })));

        let err = assert_err!(loader.load_into(&store).await);

        assert!(matches!(err, ServiceError::Catalog { .. }));
        let snapshot = store.lock().await.snapshot();
        assert!(!snapshot.is_loading);
        assert_eq!(snapshot.catalog.len(), 1);
    }

    #[tokio::test]
    async fn test_invalid_catalog_rejected() {
        let store = AppStore::new().shared();
        let loader = CatalogLoader::new(Arc::new(mock_source(|| {
            let mut services = StaticCatalogSource::services();
            services[1].id = services[0].id;
            Ok(services)
        })));

        let result = loader.load_into(&store).await;

        assert!(matches!(
            result,
            Err(ServiceError::Catalog {
                source: CatalogError::Invalid { .. }
            })
        ));
        let snapshot = store.lock().await.snapshot();
        assert!(snapshot.catalog.is_empty());
        assert!(!snapshot.is_loading);
    }

    #[tokio::test(start_paused = true)]
    async fn test_loading_flag_visible_during_delay() {
        let store = AppStore::new().shared();
        store.lock().await.set_loading(false);

        let loader = CatalogLoader::new(Arc::new(StaticCatalogSource::new()))
            .with_load_delay(Duration::from_secs(1));

        let task_store = store.clone();
        let handle = tokio::spawn(async move { loader.load_into(&task_store).await });

        tokio::time::sleep(Duration::from_millis(10)).await;
        assert!(store.lock().await.snapshot().is_loading);

        let count = handle.await.unwrap().unwrap();
        assert_eq!(count, 8);
        assert!(!store.lock().await.snapshot().is_loading);
    }
}
