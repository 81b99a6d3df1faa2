use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, post, put},
    Router,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

use crate::models::{
    AddCartItemRequest, AddWishlistItemRequest, CartLine, CategorySelection, CheckoutSummary,
    OrderConfirmation, Service, ServiceError, ServiceFilters, ServiceId, UpdateCartItemRequest,
    UpdateFiltersRequest, Validate,
};
use crate::services::CheckoutService;
use crate::store::{selectors, AppStore, SharedStore};

/// Shared application state for the API handlers
#[derive(Clone)]
pub struct ApiState {
    pub store: SharedStore,
    pub checkout: Arc<CheckoutService>,
}

type ApiError = (StatusCode, Json<Value>);

/// Query parameters for listing services. Absent fields fall back to the
/// store's current filters.
#[derive(Debug, Default, Deserialize)]
pub struct ListServicesQuery {
    pub search: Option<String>,
    pub category: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ServiceListResponse {
    pub services: Vec<Service>,
    pub total_count: usize,
    pub is_loading: bool,
    pub filters: ServiceFilters,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CartResponse {
    pub lines: Vec<CartLine>,
    pub total_items: u64,
    pub total_price: Decimal,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WishlistResponse {
    pub services: Vec<Service>,
    pub count: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WishlistToggleResponse {
    pub service_id: ServiceId,
    pub in_wishlist: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CheckoutSummaryResponse {
    #[serde(flatten)]
    pub summary: CheckoutSummary,
    pub formatted_total: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct OrderResponse {
    pub order: OrderConfirmation,
    pub message: String,
}

/// Create API router with all endpoints
pub fn create_api_router(store: SharedStore, checkout: Arc<CheckoutService>) -> Router {
    let state = ApiState { store, checkout };

    Router::new()
        // Catalog browsing endpoints
        .route("/api/services", get(list_services))
        .route("/api/services/featured", get(featured_services))
        .route("/api/services/:service_id", get(get_service))
        .route("/api/categories", get(list_categories))
        .route("/api/filters", put(update_filters))
        // Cart endpoints
        .route("/api/cart", get(get_cart).delete(clear_cart))
        .route("/api/cart/items", post(add_cart_item))
        .route(
            "/api/cart/items/:service_id",
            put(update_cart_item).delete(remove_cart_item),
        )
        // Wishlist endpoints
        .route("/api/wishlist", get(get_wishlist))
        .route("/api/wishlist/items", post(add_wishlist_item))
        .route(
            "/api/wishlist/items/:service_id",
            axum::routing::delete(remove_wishlist_item),
        )
        .route(
            "/api/wishlist/items/:service_id/toggle",
            post(toggle_wishlist_item),
        )
        // Checkout endpoints
        .route("/api/checkout/summary", get(checkout_summary))
        .route("/api/checkout", post(place_order))
        .with_state(state)
}

// =============================================================================
// CATALOG ENDPOINTS
// =============================================================================

/// List catalog services matching the query, or the current filters
#[instrument(name = "list_services", skip(state), fields(
    search = query.search.as_deref(),
    category = query.category.as_deref(),
))]
pub async fn list_services(
    State(state): State<ApiState>,
    Query(query): Query<ListServicesQuery>,
) -> Json<ServiceListResponse> {
    let snapshot = state.store.lock().await.snapshot();
    let filters = query_to_filters(query, &snapshot.filters);

    let services: Vec<Service> = selectors::filter_services(&snapshot.catalog, &filters)
        .into_iter()
        .cloned()
        .collect();

    info!("Found {} services matching criteria", services.len());

    Json(ServiceListResponse {
        total_count: services.len(),
        services,
        is_loading: snapshot.is_loading,
        filters,
    })
}

#[instrument(name = "featured_services", skip(state))]
pub async fn featured_services(State(state): State<ApiState>) -> Json<Vec<Service>> {
    let snapshot = state.store.lock().await.snapshot();
    Json(
        selectors::featured_services(&snapshot)
            .into_iter()
            .cloned()
            .collect(),
    )
}

#[instrument(name = "get_service", skip(state), fields(service_id = %service_id))]
pub async fn get_service(
    State(state): State<ApiState>,
    Path(service_id): Path<ServiceId>,
) -> Result<Json<Service>, ApiError> {
    let store = state.store.lock().await;
    let service = lookup_service(&store, service_id)?;
    Ok(Json(service))
}

#[instrument(name = "list_categories", skip(state))]
pub async fn list_categories(State(state): State<ApiState>) -> Json<Vec<String>> {
    let snapshot = state.store.lock().await.snapshot();
    Json(selectors::categories(&snapshot))
}

/// Change the stored browsing filters. Absent fields are left unchanged.
#[instrument(name = "update_filters", skip(state, request))]
pub async fn update_filters(
    State(state): State<ApiState>,
    Json(request): Json<UpdateFiltersRequest>,
) -> Json<ServiceFilters> {
    let mut store = state.store.lock().await;

    if let Some(search_query) = request.search_query {
        store.set_search_query(search_query);
    }
    if let Some(category) = request.selected_category {
        store.set_selected_category(category);
    }

    Json(store.state().filters.clone())
}

// =============================================================================
// CART ENDPOINTS
// =============================================================================

#[instrument(name = "get_cart", skip(state))]
pub async fn get_cart(State(state): State<ApiState>) -> Json<CartResponse> {
    let store = state.store.lock().await;
    Json(cart_response(&store))
}

/// Add units of a catalog service to the cart
#[instrument(name = "add_cart_item", skip(state, request), fields(
    service_id = request.service_id,
    quantity = request.quantity,
))]
pub async fn add_cart_item(
    State(state): State<ApiState>,
    Json(request): Json<AddCartItemRequest>,
) -> Result<(StatusCode, Json<CartResponse>), ApiError> {
    if let Err(err) = request.validate() {
        warn!("Invalid add to cart request: {}", err);
        return Err(service_error_to_response(err.into()));
    }

    let mut store = state.store.lock().await;
    let service = lookup_service(&store, request.service_id)?;
    store.add_to_cart_times(&service, request.quantity);

    info!("Added service to cart");
    Ok((StatusCode::CREATED, Json(cart_response(&store))))
}

/// Set the quantity of a cart line. Zero or negative removes it; unknown ids
/// leave the cart unchanged.
#[instrument(name = "update_cart_item", skip(state, request), fields(
    service_id = %service_id,
    quantity = request.quantity,
))]
pub async fn update_cart_item(
    State(state): State<ApiState>,
    Path(service_id): Path<ServiceId>,
    Json(request): Json<UpdateCartItemRequest>,
) -> Json<CartResponse> {
    let mut store = state.store.lock().await;
    store.update_cart_quantity(service_id, request.quantity);
    Json(cart_response(&store))
}

#[instrument(name = "remove_cart_item", skip(state), fields(service_id = %service_id))]
pub async fn remove_cart_item(
    State(state): State<ApiState>,
    Path(service_id): Path<ServiceId>,
) -> StatusCode {
    state.store.lock().await.remove_from_cart(service_id);
    StatusCode::NO_CONTENT
}

#[instrument(name = "clear_cart", skip(state))]
pub async fn clear_cart(State(state): State<ApiState>) -> StatusCode {
    state.store.lock().await.clear_cart();
    StatusCode::NO_CONTENT
}

// =============================================================================
// WISHLIST ENDPOINTS
// =============================================================================

#[instrument(name = "get_wishlist", skip(state))]
pub async fn get_wishlist(State(state): State<ApiState>) -> Json<WishlistResponse> {
    let store = state.store.lock().await;
    Json(wishlist_response(&store))
}

#[instrument(name = "add_wishlist_item", skip(state, request), fields(
    service_id = request.service_id,
))]
pub async fn add_wishlist_item(
    State(state): State<ApiState>,
    Json(request): Json<AddWishlistItemRequest>,
) -> Result<(StatusCode, Json<WishlistResponse>), ApiError> {
    let mut store = state.store.lock().await;
    let service = lookup_service(&store, request.service_id)?;
    store.add_to_wishlist(service);
    Ok((StatusCode::CREATED, Json(wishlist_response(&store))))
}

/// Flip wishlist membership. A saved service can be removed even if it has
/// since left the catalog.
#[instrument(name = "toggle_wishlist_item", skip(state), fields(service_id = %service_id))]
pub async fn toggle_wishlist_item(
    State(state): State<ApiState>,
    Path(service_id): Path<ServiceId>,
) -> Result<Json<WishlistToggleResponse>, ApiError> {
    let mut store = state.store.lock().await;

    let in_wishlist = if store.is_in_wishlist(service_id) {
        store.remove_from_wishlist(service_id);
        false
    } else {
        let service = lookup_service(&store, service_id)?;
        store.add_to_wishlist(service);
        true
    };

    Ok(Json(WishlistToggleResponse {
        service_id,
        in_wishlist,
    }))
}

#[instrument(name = "remove_wishlist_item", skip(state), fields(service_id = %service_id))]
pub async fn remove_wishlist_item(
    State(state): State<ApiState>,
    Path(service_id): Path<ServiceId>,
) -> StatusCode {
    state.store.lock().await.remove_from_wishlist(service_id);
    StatusCode::NO_CONTENT
}

// =============================================================================
// CHECKOUT ENDPOINTS
// =============================================================================

#[instrument(name = "checkout_summary", skip(state))]
pub async fn checkout_summary(State(state): State<ApiState>) -> Json<CheckoutSummaryResponse> {
    let store = state.store.lock().await;
    let summary = state.checkout.summary(store.state());

    Json(CheckoutSummaryResponse {
        formatted_total: summary.formatted_total(),
        summary,
    })
}

#[instrument(name = "place_order", skip(state))]
pub async fn place_order(
    State(state): State<ApiState>,
) -> Result<(StatusCode, Json<OrderResponse>), ApiError> {
    match state.checkout.place_order(&state.store).await {
        Ok(order) => {
            info!(order_id = %order.order_id, "Order placed");
            Ok((
                StatusCode::CREATED,
                Json(OrderResponse {
                    message: order.message(),
                    order,
                }),
            ))
        }
        Err(err) => {
            error!("Failed to place order: {}", err);
            Err(service_error_to_response(err))
        }
    }
}

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

fn query_to_filters(query: ListServicesQuery, current: &ServiceFilters) -> ServiceFilters {
    ServiceFilters {
        search_query: query
            .search
            .unwrap_or_else(|| current.search_query.clone()),
        selected_category: query
            .category
            .map(CategorySelection::from)
            .unwrap_or_else(|| current.selected_category.clone()),
    }
}

fn lookup_service(store: &AppStore, service_id: ServiceId) -> Result<Service, ApiError> {
    store.find_service(service_id).ok_or_else(|| {
        warn!(service_id, "Service not found in catalog");
        service_error_to_response(ServiceError::ServiceNotFound { id: service_id })
    })
}

fn cart_response(store: &AppStore) -> CartResponse {
    CartResponse {
        lines: store.state().cart.lines().to_vec(),
        total_items: store.cart_items_count(),
        total_price: store.total_price(),
    }
}

fn wishlist_response(store: &AppStore) -> WishlistResponse {
    let wishlist = &store.state().wishlist;
    WishlistResponse {
        services: wishlist.services().to_vec(),
        count: wishlist.len(),
    }
}

/// Convert service errors to HTTP responses
fn service_error_to_response(err: ServiceError) -> ApiError {
    let (status, message) = match err {
        ServiceError::ServiceNotFound { .. } => (StatusCode::NOT_FOUND, err.to_string()),
        ServiceError::EmptyCart => (StatusCode::BAD_REQUEST, err.to_string()),
        ServiceError::ValidationError { .. } => (StatusCode::BAD_REQUEST, err.to_string()),
        ServiceError::Catalog { .. } => (
            StatusCode::SERVICE_UNAVAILABLE,
            "Catalog unavailable".to_string(),
        ),
        ServiceError::CheckoutInProgress => (StatusCode::CONFLICT, err.to_string()),
    };

    (
        status,
        Json(json!({
            "error": message,
            "timestamp": chrono::Utc::now().to_rfc3339(),
        })),
    )
}
