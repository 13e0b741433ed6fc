//! # Record Trait
//!
//! The `Record` trait is the contract every stored type (Product, Category, …) implements so a
//! generic [`StoreActor`](crate::StoreActor) can hold it. It fixes the id type, the create and
//! update payloads, the error type and the order in which `List` returns records.
//!
//! # Timestamps
//! Records never read the wall clock themselves. The actor samples its injected
//! [`Clock`](crate::Clock) once per write and hands the instant to [`Record::from_create`] and
//! [`Record::on_update`], so "server-assigned" timestamps stay deterministic under test.
//!
//! # Provided Methods (Hooks)
//! - [`Record::on_delete`] defaults to `Ok(())`.

use chrono::{DateTime, Utc};
use std::cmp::Ordering;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any stored record must implement to be managed by a `StoreActor`.
pub trait Record: Clone + Send + Sync + 'static {
    /// The unique identifier (newtype around the store's counter).
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug + From<u32>;

    /// Payload used to create a new record.
    type Create: Send + Sync + Debug;

    /// Partial payload used to update an existing record.
    type Update: Send + Sync + Debug;

    /// Rejection raised by the record's own validation.
    type Error: std::error::Error + Send + Sync + 'static;

    /// The record's identifier.
    fn id(&self) -> &Self::Id;

    /// Builds the record from its freshly assigned id and the create payload.
    fn from_create(
        id: Self::Id,
        params: Self::Create,
        now: DateTime<Utc>,
    ) -> Result<Self, Self::Error>;

    /// Applies a partial update in place.
    ///
    /// Implementations must leave the record untouched when they return an error.
    fn on_update(&mut self, update: Self::Update, now: DateTime<Utc>) -> Result<(), Self::Error>;

    /// Called immediately before the record is removed.
    fn on_delete(&self) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Order used by `List` responses.
    fn listing_order(a: &Self, b: &Self) -> Ordering;
}
