use homeservices_rs::models::{validate_cart_quantity, CategorySelection, Service};
use homeservices_rs::store::{reduce, selectors, StoreAction, StoreSnapshot};
use homeservices_rs::AppStore;
use proptest::prelude::*;
use rust_decimal::Decimal;
use std::collections::HashSet;

// Property-based test strategies
prop_compose! {
    fn arb_price()(cents in 0u32..100_000) -> Decimal {
        Decimal::from_parts(cents, 0, 0, false, 2)
    }
}

prop_compose! {
    fn arb_service()(
        id in 1u32..8,
        price in arb_price(),
        category in prop_oneof![
            Just("Cleaning"),
            Just("Home Repair"),
            Just("Appliance"),
        ],
    ) -> Service {
        Service {
            id,
            title: format!("Service {}", id),
            category: category.to_string(),
            price,
            rating: Decimal::new(45, 1),
            image: None,
            description: String::new(),
            provider: "Provider".to_string(),
            duration: "60 mins".to_string(),
            tags: vec![],
        }
    }
}

fn arb_action() -> impl Strategy<Value = StoreAction> {
    prop_oneof![
        arb_service().prop_map(StoreAction::AddToCart),
        (1u32..8).prop_map(StoreAction::RemoveFromCart),
        ((1u32..8), -3i64..10).prop_map(|(service_id, quantity)| {
            StoreAction::UpdateCartQuantity {
                service_id,
                quantity,
            }
        }),
        Just(StoreAction::ClearCart),
        arb_service().prop_map(StoreAction::AddToWishlist),
        (1u32..8).prop_map(StoreAction::RemoveFromWishlist),
        "[a-z ]{0,6}".prop_map(StoreAction::SetSearchQuery),
        prop_oneof![
            Just(CategorySelection::All),
            Just(CategorySelection::named("Cleaning")),
            Just(CategorySelection::named("Home Repair")),
        ]
        .prop_map(StoreAction::SetSelectedCategory),
    ]
}

proptest! {
    #[test]
    fn test_invariants_hold_under_any_action_sequence(
        actions in prop::collection::vec(arb_action(), 0..60)
    ) {
        let mut state = StoreSnapshot::default();

        for action in actions {
            let previous_version = state.version;
            let next = reduce(&state, action);
            prop_assert!(next.version == previous_version || next.version == previous_version + 1);
            state = next;

            let cart_ids: Vec<u32> = state.cart.lines().iter().map(|l| l.service.id).collect();
            let unique: HashSet<u32> = cart_ids.iter().copied().collect();
            prop_assert_eq!(unique.len(), cart_ids.len(), "duplicate cart line");
            prop_assert!(state.cart.lines().iter().all(|line| line.quantity >= 1));

            let wishlist_ids: Vec<u32> = state.wishlist.services().iter().map(|s| s.id).collect();
            let unique: HashSet<u32> = wishlist_ids.iter().copied().collect();
            prop_assert_eq!(unique.len(), wishlist_ids.len(), "duplicate wishlist entry");

            let expected_count: u64 = state.cart.lines().iter().map(|l| u64::from(l.quantity)).sum();
            prop_assert_eq!(selectors::cart_items_count(&state), expected_count);

            let expected_total: Decimal = state
                .cart
                .lines()
                .iter()
                .map(|l| l.service.price * Decimal::from(l.quantity))
                .sum();
            prop_assert_eq!(selectors::total_price(&state), expected_total);
        }
    }

    #[test]
    fn test_n_adds_make_one_line_of_quantity_n(service in arb_service(), n in 1u32..50) {
        let mut store = AppStore::new();
        store.add_to_cart_times(&service, n);

        let lines = store.state().cart.lines();
        prop_assert_eq!(lines.len(), 1);
        prop_assert_eq!(lines[0].quantity, n);
        prop_assert_eq!(store.total_price(), service.price * Decimal::from(n));
    }

    #[test]
    fn test_non_positive_quantity_removes_line(service in arb_service(), quantity in -100i64..=0) {
        let mut store = AppStore::new();
        store.add_to_cart(service.clone());
        store.update_cart_quantity(service.id, quantity);

        prop_assert!(!store.state().cart.contains(service.id));
        prop_assert_eq!(store.cart_items_count(), 0);
    }

    #[test]
    fn test_wishlist_add_is_idempotent(service in arb_service(), repeats in 1usize..5) {
        let mut store = AppStore::new();
        for _ in 0..repeats {
            store.add_to_wishlist(service.clone());
        }

        prop_assert_eq!(store.state().wishlist.len(), 1);
        prop_assert!(store.is_in_wishlist(service.id));

        store.remove_from_wishlist(service.id);
        prop_assert!(!store.is_in_wishlist(service.id));
    }

    #[test]
    fn test_filtered_services_preserve_catalog_order(
        catalog in prop::collection::vec(arb_service(), 0..20),
        query in "[a-z ]{0,4}",
    ) {
        let mut store = AppStore::new();
        store.load_catalog(catalog.clone());
        store.set_search_query(query);
        store.set_selected_category(CategorySelection::named("Home Repair"));

        let filtered = store.filtered_services();
        prop_assert!(filtered.iter().all(|s| s.category == "Home Repair"));

        // filtered is a subsequence of the catalog
        let mut remaining = catalog.iter();
        for service in &filtered {
            prop_assert!(remaining.any(|candidate| candidate == service));
        }
        prop_assert_eq!(store.state().catalog.len(), catalog.len());
    }

    #[test]
    fn test_quantity_validation(quantity in any::<u32>()) {
        let result = validate_cart_quantity(quantity);

        if (1..=100).contains(&quantity) {
            prop_assert!(result.is_ok());
        } else {
            prop_assert!(result.is_err());
        }
    }
}
