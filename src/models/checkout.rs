use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Cart, CartLine, OrderStatus};

/// Pricing rules applied on top of the cart subtotal at checkout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckoutPricing {
    pub tax_rate: Decimal,
    pub service_fee: Decimal,
    pub currency_symbol: String,
}

impl Default for CheckoutPricing {
    fn default() -> Self {
        Self {
            tax_rate: dec!(0.08),
            service_fee: dec!(5.99),
            currency_symbol: "₹".to_string(),
        }
    }
}

/// Price breakdown shown on the checkout screen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckoutSummary {
    pub item_count: u64,
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub service_fee: Decimal,
    pub total: Decimal,
    pub currency_symbol: String,
}

/// Result of a successfully placed order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderConfirmation {
    pub order_id: String,
    pub lines: Vec<CartLine>,
    pub summary: CheckoutSummary,
    pub status: OrderStatus,
    pub placed_at: DateTime<Utc>,
}

impl CheckoutSummary {
    /// Compute the breakdown for a cart. Amounts stay exact; rounding happens in
    /// [`format_amount`].
    pub fn compute(cart: &Cart, pricing: &CheckoutPricing) -> Self {
        let subtotal = cart.total_price();
        let tax = subtotal * pricing.tax_rate;

        Self {
            item_count: cart.total_items(),
            subtotal,
            tax,
            service_fee: pricing.service_fee,
            total: subtotal + tax + pricing.service_fee,
            currency_symbol: pricing.currency_symbol.clone(),
        }
    }

    pub fn formatted_total(&self) -> String {
        format_amount(&self.currency_symbol, self.total)
    }
}

impl OrderConfirmation {
    pub fn confirmed(cart: &Cart, summary: CheckoutSummary) -> Self {
        Self {
            order_id: Uuid::new_v4().to_string(),
            lines: cart.lines().to_vec(),
            summary,
            status: OrderStatus::Confirmed,
            placed_at: Utc::now(),
        }
    }

    /// Confirmation message shown once the order is accepted
    pub fn message(&self) -> String {
        let count = self.summary.item_count;
        format!(
            "Your order for {} service{} has been confirmed. Total amount: {}",
            count,
            if count == 1 { "" } else { "s" },
            self.summary.formatted_total()
        )
    }
}

/// Render an amount with two decimal places, rounding half away from zero
pub fn format_amount(currency_symbol: &str, amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{}{:.2}", currency_symbol, rounded)
}
