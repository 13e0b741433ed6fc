//! # Price Lookup
//!
//! Inventory and price lookup for a pharmacy counter: staff search and sort the product
//! catalog, and privileged users add, edit and remove products and categories.
//!
//! ## Architecture
//!
//! The heart of the crate is the [`view_model::ProductListViewModel`], a synchronous, pure
//! model of the product list page. Everything it cannot compute on its own is injected:
//!
//! - the **session** ([`model::SessionContext`]) decides the permitted actions,
//! - a **key-value store** ([`local::KeyValueStore`]) remembers the wholesale toggle,
//! - the **stores** ([`clients::ProductStore`], [`clients::CategoryStore`]) hold the records,
//! - a **notifier** ([`notify::Notifier`]) receives outcome messages.
//!
//! [`catalog::CatalogController`] wires these together the way the list page does: load,
//! mutate, notify, reload.
//!
//! ### Stores
//! The default stores are actors from the `record-store` workspace crate, one Tokio task per
//! table. [`product_store`] and [`category_store`] supply the record implementations and
//! [`clients`] the typed handles. [`local::LocalProductStore`] keeps the older device-local
//! JSON format usable behind the same trait.
//!
//! ### Errors
//! Each module owns a `thiserror` enum ([`product_store::ProductError`],
//! [`category_store::CategoryError`], [`local::KvError`], [`catalog::CatalogError`]). Only the
//! binary uses `anyhow`.
//!
//! ### Observability
//! `tracing` everywhere; [`lifecycle::setup_tracing`] installs the subscriber.
//!
//! ## Module Tour
//!
//! | Module | Role |
//! |--------|------|
//! | [`model`] | Product, Category, form data, session |
//! | [`view_model`] | filtering, sorting, permissions, visibility, list snapshot |
//! | [`catalog`] | controller, in-flight guard |
//! | [`product_store`], [`category_store`] | `Record` impls and errors |
//! | [`clients`] | store contracts and actor-backed clients |
//! | [`local`] | preference stores, legacy product mirror |
//! | [`notify`] | notices |
//! | [`icons`] | icon table with fallback |
//! | [`lifecycle`] | store startup/shutdown, seeding, logging |
//! | [`config`] | CLI and environment settings |

pub mod catalog;
pub mod category_store;
pub mod clients;
pub mod config;
pub mod icons;
pub mod lifecycle;
pub mod local;
pub mod model;
pub mod notify;
pub mod product_store;
pub mod view_model;
