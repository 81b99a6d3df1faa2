// Services module - business logic layer

pub mod catalog_loader;
pub mod checkout_service;

pub use catalog_loader::CatalogLoader;
pub use checkout_service::CheckoutService;
