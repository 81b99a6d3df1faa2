// Re-export all model types
pub use self::cart::*;
pub use self::checkout::*;
pub use self::enums::*;
pub use self::errors::*;
pub use self::service::*;
pub use self::validation::*;
pub use self::wishlist::*;

mod cart;
mod checkout;
mod enums;
mod errors;
mod service;
mod validation;
mod wishlist;
