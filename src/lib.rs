pub mod config;
pub mod handlers;
pub mod models;
pub mod observability;
pub mod repositories;
pub mod services;
pub mod store;

pub use crate::config::{Config, ConfigError};
pub use observability::{init_observability, Metrics};
pub use store::{AppStore, SharedStore, StoreAction, StoreSnapshot};
