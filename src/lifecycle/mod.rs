//! # Lifecycle
//!
//! Starting and stopping the store actors, plus logging setup.
//!
//! [`Backend`] creates both stores, spawns each on its own Tokio task and hands out
//! their clients. Shutdown closes the channels by dropping the clients and then awaits the
//! task handles, so every actor finishes the requests it already accepted.

pub mod backend;
pub mod seed;
pub mod tracing;

pub use self::backend::Backend;
pub use self::seed::{Seed, SeedError};
pub use self::tracing::setup_tracing;
