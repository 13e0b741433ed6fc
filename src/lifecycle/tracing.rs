//! # Logging
//!
//! [`setup_tracing`] installs a compact `tracing-subscriber` formatter once per process.
//!
//! `RUST_LOG` wins when set; otherwise the configured default filter applies
//! (`PRICE_LOOKUP_LOG`, default `info`).
//!
//! ```bash
//! RUST_LOG=debug price-lookup --query ana
//! ```
//!
//! At `info` each store write shows up as one line:
//!
//! ```text
//! INFO Created record_type="Product" id=product_1 size=1
//! INFO create_product{name=Panadol}: Product added
//! INFO Notice notice="Product added successfully"
//! ```
//!
//! `debug` adds full payloads (`?form`, `?update`) at client entry points.

use tracing_subscriber::EnvFilter;

pub fn setup_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false) // record_type carries the context
        .compact()
        .init();
}
