//! # Store Errors
//!
//! Failures a store round-trip can produce, independent of the record type.

/// Errors returned by a [`StoreClient`](crate::StoreClient).
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Store closed")]
    Closed,
    #[error("Store dropped response channel")]
    Dropped,
    #[error("Record not found: {0}")]
    NotFound(String),
    #[error("Record rejected: {0}")]
    Rejected(Box<dyn std::error::Error + Send + Sync>),
    /// Failure injected by a test double or reported by a remote backend.
    #[error("{0}")]
    Backend(String),
}
