//! Application state container.
//!
//! All mutations go through [`AppStore::dispatch`], which runs the pure
//! reducer and publishes the resulting snapshot to subscribers. Dispatches
//! that change nothing are not published.

pub mod actions;
pub mod reducer;
pub mod selectors;

use std::sync::Arc;

use rust_decimal::Decimal;
use tokio::sync::{watch, Mutex};
use tracing::{debug, instrument};

use crate::models::{CategorySelection, Service, ServiceId};
use crate::observability::Metrics;

pub use actions::StoreAction;
pub use reducer::{reduce, StoreSnapshot};

/// Store handle shared between request handlers and background tasks
pub type SharedStore = Arc<Mutex<AppStore>>;

/// Owner of the session state. Created by the composition root and passed
/// explicitly to whatever needs it.
pub struct AppStore {
    state: StoreSnapshot,
    sender: watch::Sender<Arc<StoreSnapshot>>,
    metrics: Option<Arc<Metrics>>,
}

impl AppStore {
    pub fn new() -> Self {
        Self::from_snapshot(StoreSnapshot::default())
    }

    /// Create a store that records dispatches and cart size in the given metrics
    pub fn with_metrics(metrics: Arc<Metrics>) -> Self {
        let mut store = Self::new();
        store.metrics = Some(metrics);
        store
    }

    pub fn from_snapshot(state: StoreSnapshot) -> Self {
        let (sender, _) = watch::channel(Arc::new(state.clone()));
        Self {
            state,
            sender,
            metrics: None,
        }
    }

    /// Wrap the store for sharing across tasks
    pub fn shared(self) -> SharedStore {
        Arc::new(Mutex::new(self))
    }

    /// The most recently published snapshot
    pub fn snapshot(&self) -> Arc<StoreSnapshot> {
        self.sender.borrow().clone()
    }

    pub fn state(&self) -> &StoreSnapshot {
        &self.state
    }

    /// Receive every snapshot published from now on
    pub fn subscribe(&self) -> watch::Receiver<Arc<StoreSnapshot>> {
        self.sender.subscribe()
    }

    /// Apply an action. Returns whether the state changed; only changes are
    /// published and bump the version.
    pub fn dispatch(&mut self, action: StoreAction) -> bool {
        let name = action.name();
        let touches_cart = action.touches_cart();
        let is_catalog_load = matches!(action, StoreAction::LoadCatalog(_));

        let changed = reducer::apply(&mut self.state, action);
        if changed {
            self.state.version += 1;
            self.sender.send_replace(Arc::new(self.state.clone()));
        }

        debug!(
            action = name,
            changed,
            version = self.state.version,
            "Dispatched store action"
        );

        if let Some(metrics) = &self.metrics {
            metrics.record_store_action(name, changed);
            if touches_cart {
                metrics.set_cart_units(self.state.cart.total_items());
            }
            if is_catalog_load {
                metrics.set_catalog_size(self.state.catalog.len());
            }
        }

        changed
    }

    #[instrument(skip(self, services), fields(count = services.len()))]
    pub fn load_catalog(&mut self, services: Vec<Service>) -> bool {
        self.dispatch(StoreAction::LoadCatalog(services))
    }

    pub fn set_loading(&mut self, is_loading: bool) -> bool {
        self.dispatch(StoreAction::SetLoading(is_loading))
    }

    pub fn add_to_cart(&mut self, service: Service) -> bool {
        self.dispatch(StoreAction::AddToCart(service))
    }

    /// Add `times` units of a service, one dispatch per unit
    pub fn add_to_cart_times(&mut self, service: &Service, times: u32) -> bool {
        let mut changed = false;
        for _ in 0..times {
            changed |= self.dispatch(StoreAction::AddToCart(service.clone()));
        }
        changed
    }

    pub fn remove_from_cart(&mut self, service_id: ServiceId) -> bool {
        self.dispatch(StoreAction::RemoveFromCart(service_id))
    }

    pub fn update_cart_quantity(&mut self, service_id: ServiceId, quantity: i64) -> bool {
        self.dispatch(StoreAction::UpdateCartQuantity {
            service_id,
            quantity,
        })
    }

    pub fn clear_cart(&mut self) -> bool {
        self.dispatch(StoreAction::ClearCart)
    }

    pub fn add_to_wishlist(&mut self, service: Service) -> bool {
        self.dispatch(StoreAction::AddToWishlist(service))
    }

    pub fn remove_from_wishlist(&mut self, service_id: ServiceId) -> bool {
        self.dispatch(StoreAction::RemoveFromWishlist(service_id))
    }

    /// Remove the service if saved, save it otherwise. Returns whether it is
    /// saved afterwards.
    pub fn toggle_wishlist(&mut self, service: Service) -> bool {
        if self.is_in_wishlist(service.id) {
            self.remove_from_wishlist(service.id);
            false
        } else {
            self.add_to_wishlist(service);
            true
        }
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) -> bool {
        self.dispatch(StoreAction::SetSearchQuery(query.into()))
    }

    pub fn set_selected_category(&mut self, category: CategorySelection) -> bool {
        self.dispatch(StoreAction::SetSelectedCategory(category))
    }

    pub fn is_in_wishlist(&self, service_id: ServiceId) -> bool {
        selectors::is_in_wishlist(&self.state, service_id)
    }

    pub fn total_price(&self) -> Decimal {
        selectors::total_price(&self.state)
    }

    pub fn cart_items_count(&self) -> u64 {
        selectors::cart_items_count(&self.state)
    }

    pub fn filtered_services(&self) -> Vec<Service> {
        selectors::filtered_services(&self.state)
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn find_service(&self, service_id: ServiceId) -> Option<Service> {
        selectors::find_service(&self.state, service_id).cloned()
    }
}

impl Default for AppStore {
    fn default() -> Self {
        Self::new()
    }
}
