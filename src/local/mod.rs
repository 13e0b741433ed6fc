//! Device-local persistence: key-value preference stores and the legacy product mirror.

pub mod legacy_products;
pub mod prefs;

pub use legacy_products::*;
pub use prefs::*;
