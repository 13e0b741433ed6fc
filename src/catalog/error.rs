use super::ActionKind;
use crate::category_store::CategoryError;
use crate::product_store::ProductError;
use thiserror::Error;

/// Errors returned by [`CatalogController`](super::CatalogController).
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CatalogError {
    #[error("Not signed in")]
    NotSignedIn,

    #[error("Not allowed to {0}")]
    Forbidden(ActionKind),

    #[error("Already busy: {0}")]
    Busy(ActionKind),

    #[error(transparent)]
    Product(#[from] ProductError),

    #[error(transparent)]
    Category(#[from] CategoryError),

    #[error("Could not save preference: {0}")]
    Preferences(String),
}
