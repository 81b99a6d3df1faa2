use std::fmt;

use crate::models::{CategorySelection, Service, ServiceId};

/// Every mutation the store accepts. Applied one at a time through
/// [`AppStore::dispatch`](super::AppStore::dispatch).
#[derive(Debug, Clone, PartialEq)]
pub enum StoreAction {
    /// Replace the catalog and clear the loading flag
    LoadCatalog(Vec<Service>),
    SetLoading(bool),
    /// Add one unit, creating the line if needed
    AddToCart(Service),
    RemoveFromCart(ServiceId),
    /// Set a line's quantity exactly; zero or negative removes the line
    UpdateCartQuantity { service_id: ServiceId, quantity: i64 },
    ClearCart,
    AddToWishlist(Service),
    RemoveFromWishlist(ServiceId),
    SetSearchQuery(String),
    SetSelectedCategory(CategorySelection),
}

impl StoreAction {
    /// Stable snake_case name used in logs and metric labels
    pub fn name(&self) -> &'static str {
        match self {
            StoreAction::LoadCatalog(_) => "load_catalog",
            StoreAction::SetLoading(_) => "set_loading",
            StoreAction::AddToCart(_) => "add_to_cart",
            StoreAction::RemoveFromCart(_) => "remove_from_cart",
            StoreAction::UpdateCartQuantity { .. } => "update_cart_quantity",
            StoreAction::ClearCart => "clear_cart",
            StoreAction::AddToWishlist(_) => "add_to_wishlist",
            StoreAction::RemoveFromWishlist(_) => "remove_from_wishlist",
            StoreAction::SetSearchQuery(_) => "set_search_query",
            StoreAction::SetSelectedCategory(_) => "set_selected_category",
        }
    }

    pub fn touches_cart(&self) -> bool {
        matches!(
            self,
            StoreAction::AddToCart(_)
                | StoreAction::RemoveFromCart(_)
                | StoreAction::UpdateCartQuantity { .. }
                | StoreAction::ClearCart
        )
    }
}

impl fmt::Display for StoreAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
