//! Error types for category operations.

use crate::model::CategoryId;
use record_store::StoreError;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CategoryError {
    #[error("Category not found: {0}")]
    NotFound(CategoryId),

    #[error("Category name must not be empty")]
    EmptyName,

    #[error("Category store error: {0}")]
    Store(String),
}

impl CategoryError {
    pub fn from_store(e: StoreError, id: Option<CategoryId>) -> Self {
        match (e, id) {
            (StoreError::NotFound(_), Some(id)) => CategoryError::NotFound(id),
            (StoreError::Rejected(inner), _) => match inner.downcast::<CategoryError>() {
                Ok(own) => *own,
                Err(other) => CategoryError::Store(other.to_string()),
            },
            (other, _) => CategoryError::Store(other.to_string()),
        }
    }
}
