//! # RecordClient Trait
//!
//! Shared read/delete plumbing for record-specific clients built on a [`StoreClient`].
use crate::{Record, StoreClient, StoreError};
use async_trait::async_trait;

/// Trait for record-specific clients to inherit the operations that need no payload conversion.
///
/// Implementors supply the inner [`StoreClient`] and a mapping from [`StoreError`] to their own
/// error type; `get`, `list` and `delete` come for free.
///
/// ```rust
/// use async_trait::async_trait;
/// use chrono::{DateTime, Utc};
/// use record_store::{Record, RecordClient, StoreClient, StoreError};
/// use std::cmp::Ordering;
///
/// #[derive(Clone, Debug)] struct Tag { id: u32 }
/// #[derive(Debug, thiserror::Error)] #[error("tag error: {0}")] struct TagError(String);
///
/// impl Record for Tag {
///     type Id = u32; type Create = (); type Update = (); type Error = TagError;
///     fn id(&self) -> &u32 { &self.id }
///     fn from_create(id: u32, _: (), _: DateTime<Utc>) -> Result<Self, TagError> { Ok(Self { id }) }
///     fn on_update(&mut self, _: (), _: DateTime<Utc>) -> Result<(), TagError> { Ok(()) }
///     fn listing_order(a: &Self, b: &Self) -> Ordering { a.id.cmp(&b.id) }
/// }
///
/// struct TagClient { inner: StoreClient<Tag> }
///
/// #[async_trait]
/// impl RecordClient<Tag> for TagClient {
///     type Error = TagError;
///     fn inner(&self) -> &StoreClient<Tag> { &self.inner }
///     fn map_error(e: StoreError) -> TagError { TagError(e.to_string()) }
/// }
///
/// async fn usage(client: TagClient) {
///     let _ = client.list_records().await;
///     let _ = client.delete_record(1).await;
/// }
/// ```
#[async_trait]
pub trait RecordClient<T: Record>: Send + Sync {
    /// The record-specific error type.
    type Error: Send + Sync;

    /// Access the inner generic client.
    fn inner(&self) -> &StoreClient<T>;

    /// Map store errors to the record-specific error type.
    fn map_error(e: StoreError) -> Self::Error;

    /// Fetch a record by id.
    #[tracing::instrument(skip(self))]
    async fn get_record(&self, id: T::Id) -> Result<Option<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().get(id).await.map_err(Self::map_error)
    }

    /// Fetch every record in listing order.
    #[tracing::instrument(skip(self))]
    async fn list_records(&self) -> Result<Vec<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().list().await.map_err(Self::map_error)
    }

    /// Delete a record by id.
    #[tracing::instrument(skip(self))]
    async fn delete_record(&self, id: T::Id) -> Result<(), Self::Error> {
        tracing::debug!("Sending request");
        self.inner().delete(id).await.map_err(Self::map_error)
    }
}
