use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

use crate::models::CheckoutPricing;

/// Prefix of every environment variable read by the service
pub const ENV_PREFIX: &str = "HOMESERVICES";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading error: {message}")]
    LoadError { message: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub catalog: CatalogConfig,
    pub checkout: CheckoutConfig,
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_timeout")]
    pub request_timeout_seconds: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogConfig {
    /// JSON catalog to load instead of the bundled one
    #[serde(default)]
    pub catalog_path: Option<PathBuf>,
    #[serde(default = "default_catalog_load_delay_ms")]
    pub catalog_load_delay_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutConfig {
    #[serde(default = "default_tax_rate")]
    pub tax_rate: Decimal,
    #[serde(default = "default_service_fee")]
    pub service_fee: Decimal,
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
    #[serde(default = "default_processing_delay_ms")]
    pub processing_delay_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ObservabilityConfig {
    #[serde(default = "default_service_name")]
    pub service_name: String,
    #[serde(default = "default_service_version")]
    pub service_version: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub enable_json_logging: bool,
}

impl Config {
    pub fn from_environment() -> Result<Self, ConfigError> {
        info!("Loading configuration from environment");
        Self::from_source(None)
    }

    /// Load from an explicit variable map instead of the process environment.
    /// Keys carry the `HOMESERVICES_` prefix just like real variables.
    pub fn from_map(vars: HashMap<String, String>) -> Result<Self, ConfigError> {
        Self::from_source(Some(vars))
    }

    fn from_source(vars: Option<HashMap<String, String>>) -> Result<Self, ConfigError> {
        let config = Config {
            server: load_section("server", vars.clone())?,
            catalog: load_section("catalog", vars.clone())?,
            checkout: load_section("checkout", vars.clone())?,
            observability: load_section("observability", vars)?,
        };

        config.validate()?;

        info!("Configuration loaded successfully");
        debug!("Configuration: {:?}", config);

        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::ValidationError {
                message: "Server port cannot be 0".to_string(),
            });
        }

        if self.server.request_timeout_seconds == 0 {
            return Err(ConfigError::ValidationError {
                message: "Request timeout cannot be 0".to_string(),
            });
        }

        if self.checkout.tax_rate < Decimal::ZERO || self.checkout.tax_rate > Decimal::ONE {
            return Err(ConfigError::ValidationError {
                message: format!(
                    "Tax rate must be between 0 and 1, got {}",
                    self.checkout.tax_rate
                ),
            });
        }

        if self.checkout.service_fee < Decimal::ZERO {
            return Err(ConfigError::ValidationError {
                message: "Service fee cannot be negative".to_string(),
            });
        }

        if self.checkout.currency_symbol.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                message: "Currency symbol cannot be empty".to_string(),
            });
        }

        Ok(())
    }
}

fn load_section<T: DeserializeOwned>(
    section: &str,
    vars: Option<HashMap<String, String>>,
) -> Result<T, ConfigError> {
    let settings = config::Config::builder()
        .add_source(config::Environment::with_prefix(ENV_PREFIX).source(vars))
        .build()
        .map_err(|e| ConfigError::LoadError {
            message: format!("Failed to load {} config: {}", section, e),
        })?;

    settings
        .try_deserialize()
        .map_err(|e| ConfigError::LoadError {
            message: format!("Failed to deserialize {} config: {}", section, e),
        })
}

impl ServerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }
}

impl CatalogConfig {
    pub fn load_delay(&self) -> Duration {
        Duration::from_millis(self.catalog_load_delay_ms)
    }
}

impl CheckoutConfig {
    pub fn pricing(&self) -> CheckoutPricing {
        CheckoutPricing {
            tax_rate: self.tax_rate,
            service_fee: self.service_fee,
            currency_symbol: self.currency_symbol.clone(),
        }
    }

    pub fn processing_delay(&self) -> Duration {
        Duration::from_millis(self.processing_delay_ms)
    }
}

// Default value functions
pub(crate) fn default_host() -> String {
    "0.0.0.0".to_string()
}

pub(crate) fn default_port() -> u16 {
    8080
}

pub(crate) fn default_timeout() -> u64 {
    30
}

pub(crate) fn default_catalog_load_delay_ms() -> u64 {
    1000
}

pub(crate) fn default_tax_rate() -> Decimal {
    dec!(0.08)
}

pub(crate) fn default_service_fee() -> Decimal {
    dec!(5.99)
}

pub(crate) fn default_currency_symbol() -> String {
    "₹".to_string()
}

pub(crate) fn default_processing_delay_ms() -> u64 {
    2000
}

pub(crate) fn default_service_name() -> String {
    "homeservices-rs".to_string()
}

pub(crate) fn default_service_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

pub(crate) fn default_log_level() -> String {
    "info".to_string()
}
