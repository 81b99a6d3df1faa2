// Repositories module - catalog data access layer

pub mod catalog_source;

pub use catalog_source::{CatalogSource, JsonFileCatalogSource, StaticCatalogSource};
