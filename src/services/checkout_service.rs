use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, instrument, warn};

use crate::models::{
    Cart, CheckoutPricing, CheckoutSummary, OrderConfirmation, ServiceError, ServiceResult,
};
use crate::observability::Metrics;
use crate::store::{AppStore, SharedStore, StoreSnapshot};

/// Prices the cart and turns it into a confirmed order
pub struct CheckoutService {
    pricing: CheckoutPricing,
    processing_delay: Duration,
    metrics: Option<Arc<Metrics>>,
    in_progress: AtomicBool,
}

/// Releases the in-progress flag when checkout ends, including when the
/// request future is dropped mid-processing.
struct CheckoutGuard<'a>(&'a AtomicBool);

impl Drop for CheckoutGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl CheckoutService {
    pub fn new(pricing: CheckoutPricing) -> Self {
        Self {
            pricing,
            processing_delay: Duration::ZERO,
            metrics: None,
            in_progress: AtomicBool::new(false),
        }
    }

    /// Simulated payment processing time before the order is confirmed
    pub fn with_processing_delay(mut self, processing_delay: Duration) -> Self {
        self.processing_delay = processing_delay;
        self
    }

    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn pricing(&self) -> &CheckoutPricing {
        &self.pricing
    }

    pub fn summary(&self, state: &StoreSnapshot) -> CheckoutSummary {
        CheckoutSummary::compute(&state.cart, &self.pricing)
    }

    /// Confirm an order for the current cart, then take the ordered units
    /// out of the cart.
    ///
    /// The confirmation reflects the cart as it was when checkout started.
    /// The store lock is released while the order is being processed, so
    /// lines added meanwhile stay in the cart. Only one checkout runs at a
    /// time; a second one fails with `CheckoutInProgress`.
    #[instrument(skip(self, store))]
    pub async fn place_order(&self, store: &SharedStore) -> ServiceResult<OrderConfirmation> {
        let _guard = self.begin()?;
        let cart = store.lock().await.state().cart.clone();

        if cart.is_empty() {
            warn!("Checkout attempted with an empty cart");
            self.record_failure("empty_cart");
            return Err(ServiceError::EmptyCart);
        }

        let summary = CheckoutSummary::compute(&cart, &self.pricing);

        if !self.processing_delay.is_zero() {
            tokio::time::sleep(self.processing_delay).await;
        }

        let confirmation = OrderConfirmation::confirmed(&cart, summary);
        settle_ordered_lines(&mut *store.lock().await, &cart);

        if let Some(metrics) = &self.metrics {
            metrics.record_order_placed();
        }

        info!(
            order_id = %confirmation.order_id,
            item_count = confirmation.summary.item_count,
            total = %confirmation.summary.formatted_total(),
            "Order confirmed"
        );

        Ok(confirmation)
    }

    fn begin(&self) -> ServiceResult<CheckoutGuard<'_>> {
        if self
            .in_progress
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            warn!("Checkout rejected, another order is being processed");
            self.record_failure("in_progress");
            return Err(ServiceError::CheckoutInProgress);
        }
        Ok(CheckoutGuard(&self.in_progress))
    }

    fn record_failure(&self, reason: &str) {
        if let Some(metrics) = &self.metrics {
            metrics.record_checkout_failure(reason);
        }
    }
}

/// Subtract the ordered quantities from the live cart. Lines removed while
/// the order was processing are left alone.
fn settle_ordered_lines(store: &mut AppStore, ordered: &Cart) {
    for line in ordered.lines() {
        let service_id = line.service.id;
        if !store.state().cart.contains(service_id) {
            continue;
        }
        let remaining =
            i64::from(store.state().cart.quantity_of(service_id)) - i64::from(line.quantity);
        store.update_cart_quantity(service_id, remaining);
    }
}
