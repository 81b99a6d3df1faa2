use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::HashSet;

use super::{AddCartItemRequest, Service, ValidationError, ValidationResult};

/// Trait for validating input models
pub trait Validate {
    fn validate(&self) -> ValidationResult<()>;
}

/// Validation constants
pub const MAX_TITLE_LENGTH: usize = 200;
pub const MAX_CATEGORY_LENGTH: usize = 100;
pub const MAX_PROVIDER_LENGTH: usize = 200;
pub const MAX_DESCRIPTION_LENGTH: usize = 1000;
pub const MAX_TAG_LENGTH: usize = 50;
pub const MAX_TAGS_COUNT: usize = 20;
pub const MIN_PRICE: Decimal = Decimal::ZERO;
pub const MIN_RATING: Decimal = Decimal::ZERO;
pub const MAX_RATING: Decimal = dec!(5);
pub const MAX_CART_QUANTITY: u32 = 100;
pub const MIN_CART_QUANTITY: u32 = 1;

impl Validate for Service {
    fn validate(&self) -> ValidationResult<()> {
        validate_text_field("title", &self.title, MAX_TITLE_LENGTH)?;
        validate_text_field("category", &self.category, MAX_CATEGORY_LENGTH)?;
        validate_text_field("provider", &self.provider, MAX_PROVIDER_LENGTH)?;
        validate_description(&self.description)?;
        validate_price(&self.price)?;
        validate_rating(&self.rating)?;
        validate_tags(&self.tags)?;
        Ok(())
    }
}

impl Validate for AddCartItemRequest {
    fn validate(&self) -> ValidationResult<()> {
        validate_cart_quantity(self.quantity)
    }
}

/// Validate a whole catalog: every service individually, and ids unique
pub fn validate_catalog(services: &[Service]) -> ValidationResult<()> {
    let mut seen_ids = HashSet::new();

    for service in services {
        service.validate()?;

        if !seen_ids.insert(service.id) {
            return Err(ValidationError::Duplicate {
                field: "id".to_string(),
                value: service.id.to_string(),
            });
        }
    }

    Ok(())
}

/// Validate a required single-line text field
pub fn validate_text_field(field: &str, value: &str, max_length: usize) -> ValidationResult<()> {
    let trimmed = value.trim();

    if trimmed.is_empty() {
        return Err(ValidationError::RequiredField {
            field: field.to_string(),
        });
    }

    if trimmed.len() > max_length {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max_length,
            actual_length: trimmed.len(),
        });
    }

    if trimmed.chars().any(|c| c.is_control()) {
        return Err(ValidationError::InvalidValue {
            field: field.to_string(),
            value: value.to_string(),
            reason: "Contains invalid control characters".to_string(),
        });
    }

    Ok(())
}

/// Descriptions may be empty but not oversized
pub fn validate_description(description: &str) -> ValidationResult<()> {
    let length = description.trim().len();
    if length > MAX_DESCRIPTION_LENGTH {
        return Err(ValidationError::TooLong {
            field: "description".to_string(),
            max_length: MAX_DESCRIPTION_LENGTH,
            actual_length: length,
        });
    }

    Ok(())
}

/// Validate service price (free services are allowed)
pub fn validate_price(price: &Decimal) -> ValidationResult<()> {
    if *price < MIN_PRICE {
        return Err(ValidationError::InvalidValue {
            field: "price".to_string(),
            value: price.to_string(),
            reason: "Price cannot be negative".to_string(),
        });
    }

    Ok(())
}

/// Validate rating lies in [0, 5]
pub fn validate_rating(rating: &Decimal) -> ValidationResult<()> {
    if *rating < MIN_RATING || *rating > MAX_RATING {
        return Err(ValidationError::OutOfRange {
            field: "rating".to_string(),
            min: MIN_RATING.to_string(),
            max: MAX_RATING.to_string(),
            value: rating.to_string(),
        });
    }

    Ok(())
}

/// Validate tags list
pub fn validate_tags(tags: &[String]) -> ValidationResult<()> {
    if tags.len() > MAX_TAGS_COUNT {
        return Err(ValidationError::InvalidValue {
            field: "tags".to_string(),
            value: tags.len().to_string(),
            reason: format!("Too many tags, maximum allowed: {}", MAX_TAGS_COUNT),
        });
    }

    for (index, tag) in tags.iter().enumerate() {
        let trimmed = tag.trim();

        if trimmed.is_empty() {
            return Err(ValidationError::InvalidValue {
                field: format!("tags[{}]", index),
                value: tag.clone(),
                reason: "Tag cannot be empty".to_string(),
            });
        }

        if trimmed.len() > MAX_TAG_LENGTH {
            return Err(ValidationError::TooLong {
                field: format!("tags[{}]", index),
                max_length: MAX_TAG_LENGTH,
                actual_length: trimmed.len(),
            });
        }
    }

    Ok(())
}

/// Validate the number of units requested in one add-to-cart call
pub fn validate_cart_quantity(quantity: u32) -> ValidationResult<()> {
    if !(MIN_CART_QUANTITY..=MAX_CART_QUANTITY).contains(&quantity) {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: MIN_CART_QUANTITY.to_string(),
            max: MAX_CART_QUANTITY.to_string(),
            value: quantity.to_string(),
        });
    }

    Ok(())
}
