//! Error types for product operations.

use crate::model::{FieldError, ProductId};
use record_store::StoreError;
use thiserror::Error;

/// Errors that can occur during product operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProductError {
    /// The requested product was not found.
    #[error("Product not found: {0}")]
    NotFound(ProductId),

    /// A field failed validation.
    #[error("Invalid product: {0}")]
    Invalid(#[from] FieldError),

    /// The backing store failed or is unreachable.
    #[error("Product store error: {0}")]
    Store(String),
}

impl ProductError {
    /// Translates a store failure for the product with `id`, if known.
    pub fn from_store(e: StoreError, id: Option<ProductId>) -> Self {
        match (e, id) {
            (StoreError::NotFound(_), Some(id)) => ProductError::NotFound(id),
            (StoreError::Rejected(inner), _) => match inner.downcast::<FieldError>() {
                Ok(field) => ProductError::Invalid(*field),
                Err(other) => ProductError::Store(other.to_string()),
            },
            (other, _) => ProductError::Store(other.to_string()),
        }
    }
}
