use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Service, ServiceId};

/// One service queued for purchase with its unit count
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub service: Service,
    pub quantity: u32,
}

/// Purchase queue. Holds at most one line per service id, in first-insertion
/// order, and never keeps a line with a zero quantity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

/// Request model for adding units of a service to the cart
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddCartItemRequest {
    pub service_id: ServiceId,
    #[serde(default = "default_add_quantity")]
    pub quantity: u32,
}

/// Request model for setting a cart line quantity. Zero or negative removes the line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateCartItemRequest {
    pub quantity: i64,
}

fn default_add_quantity() -> u32 {
    1
}

impl CartLine {
    pub fn new(service: Service) -> Self {
        Self {
            service,
            quantity: 1,
        }
    }

    /// Get the total price for this line (unit price * quantity)
    pub fn line_total(&self) -> Decimal {
        self.service.price * Decimal::from(self.quantity)
    }
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Add one unit of the service, appending a new line only if none exists
    pub fn add_service(&mut self, service: Service) {
        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|line| line.service.id == service.id)
        {
            line.quantity = line.quantity.saturating_add(1);
        } else {
            self.lines.push(CartLine::new(service));
        }
    }

    /// Set the quantity of an existing line. A quantity of zero or less removes
    /// the line. Returns whether the cart changed.
    pub fn update_quantity(&mut self, service_id: ServiceId, quantity: i64) -> bool {
        if quantity <= 0 {
            return self.remove_service(service_id);
        }

        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        match self
            .lines
            .iter_mut()
            .find(|line| line.service.id == service_id)
        {
            Some(line) if line.quantity != quantity => {
                line.quantity = quantity;
                true
            }
            _ => false,
        }
    }

    /// Remove the line for a service. Returns whether a line was removed.
    pub fn remove_service(&mut self, service_id: ServiceId) -> bool {
        let original_len = self.lines.len();
        self.lines.retain(|line| line.service.id != service_id);
        self.lines.len() != original_len
    }

    /// Empty the cart. Returns whether anything was removed.
    pub fn clear(&mut self) -> bool {
        let had_lines = !self.lines.is_empty();
        self.lines.clear();
        had_lines
    }

    /// Total number of units across all lines
    pub fn total_items(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Sum of price * quantity over all lines, unrounded
    pub fn total_price(&self) -> Decimal {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn get_line(&self, service_id: ServiceId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.service.id == service_id)
    }

    pub fn contains(&self, service_id: ServiceId) -> bool {
        self.get_line(service_id).is_some()
    }

    pub fn quantity_of(&self, service_id: ServiceId) -> u32 {
        self.get_line(service_id)
            .map(|line| line.quantity)
            .unwrap_or(0)
    }
}
