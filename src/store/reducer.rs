use serde::{Deserialize, Serialize};

use super::StoreAction;
use crate::models::{Cart, Service, ServiceFilters, Wishlist};

/// Full state of the store at one point in time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreSnapshot {
    /// Bumped on every dispatch that changes the state
    pub version: u64,
    pub catalog: Vec<Service>,
    pub cart: Cart,
    pub wishlist: Wishlist,
    pub is_loading: bool,
    pub filters: ServiceFilters,
}

impl Default for StoreSnapshot {
    /// Session start: nothing loaded yet, empty cart and wishlist
    fn default() -> Self {
        Self {
            version: 0,
            catalog: Vec::new(),
            cart: Cart::new(),
            wishlist: Wishlist::new(),
            is_loading: true,
            filters: ServiceFilters::default(),
        }
    }
}

/// Produce the next snapshot from the current one. Invalid requests (unknown
/// ids, duplicate wishlist entries) leave the state untouched.
pub fn reduce(state: &StoreSnapshot, action: StoreAction) -> StoreSnapshot {
    let mut next = state.clone();
    if apply(&mut next, action) {
        next.version = state.version + 1;
    }
    next
}

/// Apply an action in place. Returns whether anything observable changed;
/// the version counter is left to the caller.
pub(crate) fn apply(state: &mut StoreSnapshot, action: StoreAction) -> bool {
    match action {
        StoreAction::LoadCatalog(services) => {
            let changed = state.catalog != services || state.is_loading;
            state.catalog = services;
            state.is_loading = false;
            changed
        }
        StoreAction::SetLoading(is_loading) => {
            let changed = state.is_loading != is_loading;
            state.is_loading = is_loading;
            changed
        }
        StoreAction::AddToCart(service) => {
            state.cart.add_service(service);
            true
        }
        StoreAction::RemoveFromCart(service_id) => state.cart.remove_service(service_id),
        StoreAction::UpdateCartQuantity {
            service_id,
            quantity,
        } => state.cart.update_quantity(service_id, quantity),
        StoreAction::ClearCart => state.cart.clear(),
        StoreAction::AddToWishlist(service) => state.wishlist.add(service),
        StoreAction::RemoveFromWishlist(service_id) => state.wishlist.remove(service_id),
        StoreAction::SetSearchQuery(query) => {
            let changed = state.filters.search_query != query;
            state.filters.search_query = query;
            changed
        }
        StoreAction::SetSelectedCategory(category) => {
            let changed = state.filters.selected_category != category;
            state.filters.selected_category = category;
            changed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CategorySelection;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn service(id: u32, price: Decimal) -> Service {
        Service {
            id,
            title: format!("Service {}", id),
            category: "Cleaning".to_string(),
            price,
            rating: dec!(4.6),
            image: None,
            description: "Test".to_string(),
            provider: "Provider".to_string(),
            duration: "60 mins".to_string(),
            tags: vec![],
        }
    }

    #[test]
    fn test_initial_snapshot() {
        let state = StoreSnapshot::default();

        assert!(state.is_loading);
        assert!(state.catalog.is_empty());
        assert!(state.cart.is_empty());
        assert!(state.wishlist.is_empty());
        assert_eq!(state.filters.selected_category, CategorySelection::All);
        assert_eq!(state.filters.search_query, "");
    }

    #[test]
    fn test_reduce_does_not_mutate_input() {
        let state = StoreSnapshot::default();
        let next = reduce(&state, StoreAction::AddToCart(service(1, dec!(10))));

        assert!(state.cart.is_empty());
        assert_eq!(state.version, 0);
        assert_eq!(next.cart.quantity_of(1), 1);
        assert_eq!(next.version, 1);
    }

    #[test]
    fn test_load_catalog_clears_loading_and_is_idempotent() {
        let catalog = vec![service(1, dec!(10)), service(2, dec!(20))];

        let loaded = reduce(&StoreSnapshot::default(), StoreAction::LoadCatalog(catalog.clone()));
        assert!(!loaded.is_loading);
        assert_eq!(loaded.catalog, catalog);
        assert_eq!(loaded.version, 1);

        let reloaded = reduce(&loaded, StoreAction::LoadCatalog(catalog));
        assert_eq!(reloaded, loaded);
    }

    #[test]
    fn test_noop_actions_keep_version() {
        let state = reduce(
            &StoreSnapshot::default(),
            StoreAction::AddToCart(service(1, dec!(10))),
        );

        let noops = vec![
            StoreAction::RemoveFromCart(99),
            StoreAction::UpdateCartQuantity {
                service_id: 99,
                quantity: 4,
            },
            StoreAction::RemoveFromWishlist(1),
            StoreAction::SetSearchQuery(String::new()),
            StoreAction::SetSelectedCategory(CategorySelection::All),
            StoreAction::SetLoading(true),
        ];

        for action in noops {
            let next = reduce(&state, action.clone());
            assert_eq!(next, state, "{} should be a no-op", action);
        }
    }

    #[test]
    fn test_wishlist_duplicate_add_is_noop() {
        let state = reduce(
            &StoreSnapshot::default(),
            StoreAction::AddToWishlist(service(4, dec!(120))),
        );
        let next = reduce(&state, StoreAction::AddToWishlist(service(4, dec!(120))));

        assert_eq!(next, state);
        assert_eq!(next.wishlist.len(), 1);
    }

    #[test]
    fn test_filters_are_stored_verbatim() {
        let state = reduce(
            &StoreSnapshot::default(),
            StoreAction::SetSearchQuery("  Repair ".to_string()),
        );
        let state = reduce(
            &state,
            StoreAction::SetSelectedCategory(CategorySelection::named("Home Repair")),
        );

        assert_eq!(state.filters.search_query, "  Repair ");
        assert_eq!(
            state.filters.selected_category,
            CategorySelection::named("Home Repair")
        );
        // the catalog itself is never filtered
        assert!(state.catalog.is_empty());
        assert_eq!(state.version, 2);
    }
}
