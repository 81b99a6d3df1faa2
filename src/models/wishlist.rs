use serde::{Deserialize, Serialize};

use super::{Service, ServiceId};

/// Services saved for later, unique by id, in the order they were saved
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Wishlist {
    services: Vec<Service>,
}

/// Request model for saving a service to the wishlist
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddWishlistItemRequest {
    pub service_id: ServiceId,
}

impl Wishlist {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn services(&self) -> &[Service] {
        &self.services
    }

    /// Save a service. Returns false if it was already saved.
    pub fn add(&mut self, service: Service) -> bool {
        if self.contains(service.id) {
            return false;
        }
        self.services.push(service);
        true
    }

    /// Returns whether a service was removed
    pub fn remove(&mut self, service_id: ServiceId) -> bool {
        let original_len = self.services.len();
        self.services.retain(|service| service.id != service_id);
        self.services.len() != original_len
    }

    pub fn contains(&self, service_id: ServiceId) -> bool {
        self.services.iter().any(|service| service.id == service_id)
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}
