//! Read-only views derived from a [`StoreSnapshot`]. None of these mutate state.

use rust_decimal::Decimal;

use super::StoreSnapshot;
use crate::models::{
    Service, ServiceFilters, ServiceId, ALL_CATEGORIES, FEATURED_LIMIT,
};

/// Sum of price * quantity over all cart lines
pub fn total_price(state: &StoreSnapshot) -> Decimal {
    state.cart.total_price()
}

/// Total units in the cart, not the number of distinct lines
pub fn cart_items_count(state: &StoreSnapshot) -> u64 {
    state.cart.total_items()
}

pub fn is_in_wishlist(state: &StoreSnapshot, service_id: ServiceId) -> bool {
    state.wishlist.contains(service_id)
}

/// Catalog services matching the given filters, in catalog order
pub fn filter_services<'a>(catalog: &'a [Service], filters: &ServiceFilters) -> Vec<&'a Service> {
    catalog
        .iter()
        .filter(|service| service.matches_filters(filters))
        .collect()
}

/// Catalog services matching the snapshot's own filters
pub fn filtered_services(state: &StoreSnapshot) -> Vec<&Service> {
    filter_services(&state.catalog, &state.filters)
}

/// "All" followed by each distinct category in order of first appearance
pub fn categories(state: &StoreSnapshot) -> Vec<String> {
    let mut categories = vec![ALL_CATEGORIES.to_string()];
    for service in &state.catalog {
        if !categories.contains(&service.category) {
            categories.push(service.category.clone());
        }
    }
    categories
}

pub fn featured_services(state: &StoreSnapshot) -> Vec<&Service> {
    state
        .catalog
        .iter()
        .filter(|service| service.is_featured())
        .take(FEATURED_LIMIT)
        .collect()
}

pub fn find_service(state: &StoreSnapshot, service_id: ServiceId) -> Option<&Service> {
    state.catalog.iter().find(|service| service.id == service_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CategorySelection;
    use crate::store::{reduce, StoreAction};
    use rust_decimal_macros::dec;

    fn service(id: u32, title: &str, category: &str, price: Decimal, rating: Decimal) -> Service {
        Service {
            id,
            title: title.to_string(),
            category: category.to_string(),
            price,
            rating,
            image: None,
            description: String::new(),
            provider: format!("{} Co", title),
            duration: "60 mins".to_string(),
            tags: vec![],
        }
    }

    fn loaded_state() -> StoreSnapshot {
        let catalog = vec![
            service(1, "AC Repair & Service", "Appliance", dec!(199), dec!(4.8)),
            service(2, "House Cleaning", "Cleaning", dec!(89), dec!(4.9)),
            service(3, "Plumbing Service", "Home Repair", dec!(149), dec!(4.7)),
            service(4, "Massage Therapy", "Beauty & Wellness", dec!(120), dec!(4.9)),
            service(6, "Electrical Repair", "Home Repair", dec!(179), dec!(4.8)),
        ];
        reduce(&StoreSnapshot::default(), StoreAction::LoadCatalog(catalog))
    }

    #[test]
    fn test_totals_on_empty_cart() {
        let state = loaded_state();
        assert_eq!(total_price(&state), dec!(0));
        assert_eq!(cart_items_count(&state), 0);
    }

    #[test]
    fn test_totals_after_adds() {
        let state = loaded_state();
        let plumbing = find_service(&state, 3).cloned().unwrap();
        let cleaning = find_service(&state, 2).cloned().unwrap();

        let state = reduce(&state, StoreAction::AddToCart(plumbing.clone()));
        let state = reduce(&state, StoreAction::AddToCart(plumbing));
        let state = reduce(&state, StoreAction::AddToCart(cleaning));

        assert_eq!(cart_items_count(&state), 3);
        assert_eq!(total_price(&state), dec!(387));
    }

    #[test]
    fn test_filtered_services_by_category_and_query() {
        let state = loaded_state();
        let state = reduce(
            &state,
            StoreAction::SetSelectedCategory(CategorySelection::named("Home Repair")),
        );
        let ids: Vec<u32> = filtered_services(&state).iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![3, 6]);

        let state = reduce(&state, StoreAction::SetSearchQuery("electrical".to_string()));
        let ids: Vec<u32> = filtered_services(&state).iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![6]);
    }

    #[test]
    fn test_filtered_services_blank_query_returns_whole_catalog() {
        let state = reduce(&loaded_state(), StoreAction::SetSearchQuery("  ".to_string()));
        assert_eq!(filtered_services(&state).len(), state.catalog.len());
    }

    #[test]
    fn test_categories_in_first_appearance_order() {
        let state = loaded_state();
        assert_eq!(
            categories(&state),
            vec![
                "All",
                "Appliance",
                "Cleaning",
                "Home Repair",
                "Beauty & Wellness"
            ]
        );
    }

    #[test]
    fn test_categories_before_load() {
        assert_eq!(categories(&StoreSnapshot::default()), vec!["All"]);
    }

    #[test]
    fn test_featured_services_capped() {
        let state = loaded_state();
        let ids: Vec<u32> = featured_services(&state).iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![1, 2, 4]);
    }

    #[test]
    fn test_is_in_wishlist() {
        let state = loaded_state();
        let massage = find_service(&state, 4).cloned().unwrap();
        let state = reduce(&state, StoreAction::AddToWishlist(massage));

        assert!(is_in_wishlist(&state, 4));
        assert!(!is_in_wishlist(&state, 1));
        assert!(find_service(&state, 99).is_none());
    }
}
