use thiserror::Error;

use super::ServiceId;

/// Service-level errors raised around the store (API, loading, checkout).
/// Store mutations themselves are total and never fail.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Service not found: {id}")]
    ServiceNotFound { id: ServiceId },

    #[error("Cart is empty")]
    EmptyCart,

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Catalog error: {source}")]
    Catalog {
        #[from]
        source: CatalogError,
    },

    #[error("Checkout already in progress")]
    CheckoutInProgress,
}

/// Errors raised while fetching the catalog from its source
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },

    #[error("Invalid catalog: {message}")]
    Invalid { message: String },

    #[error("Catalog source unavailable: {message}")]
    Unavailable { message: String },
}

/// Validation errors for input data
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Required field missing: {field}")]
    RequiredField { field: String },

    #[error("Invalid field value: {field}={value}, reason={reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Field too long: {field}, max_length={max_length}, actual_length={actual_length}")]
    TooLong {
        field: String,
        max_length: usize,
        actual_length: usize,
    },

    #[error("Value out of range: {field}, min={min}, max={max}, value={value}")]
    OutOfRange {
        field: String,
        min: String,
        max: String,
        value: String,
    },

    #[error("Duplicate value: {field}={value}")]
    Duplicate { field: String, value: String },
}

impl From<ValidationError> for ServiceError {
    fn from(err: ValidationError) -> Self {
        ServiceError::ValidationError {
            message: err.to_string(),
        }
    }
}

impl From<ValidationError> for CatalogError {
    fn from(err: ValidationError) -> Self {
        CatalogError::Invalid {
            message: err.to_string(),
        }
    }
}

/// Result type alias for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Result type alias for catalog source operations
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Result type alias for validation operations
pub type ValidationResult<T> = Result<T, ValidationError>;
