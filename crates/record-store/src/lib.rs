//! # Record Store
//!
//! An in-memory, actor-backed table for one record type at a time. It stands in for the hosted
//! database behind the price-lookup catalog: every table runs in its own Tokio task, owns its
//! rows outright and answers CRUD + List requests sequentially, so no locks are involved.
//!
//! ## Layers
//!
//! 1. **Record layer** ([`Record`]) - the stored type, its payloads, validation and listing order.
//! 2. **Runtime layer** ([`StoreActor`]) - the request loop, id assignment and timestamps.
//! 3. **Interface layer** ([`StoreClient`], [`RecordClient`]) - typed async access.
//!
//! ## Late-bound clock
//!
//! The actor is built without a time source and receives one in [`StoreActor::run`]. Production
//! wiring passes [`SystemClock`]; tests pass [`FixedClock`] so "last updated" values are exact.
//!
//! ## Testing
//!
//! [`mock::MockStore`] answers a real [`StoreClient`] from queued expectations, which makes
//! backend failures trivial to inject.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod clock;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;

pub use actor::StoreActor;
pub use client::StoreClient;
pub use client_trait::RecordClient;
pub use clock::{Clock, FixedClock, SystemClock};
pub use entity::Record;
pub use error::StoreError;
pub use message::{Response, StoreRequest};
