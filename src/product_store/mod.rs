//! Product table: [`Record`](record_store::Record) impl, errors and constructor.

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::ProductClient;
use crate::model::Product;
use record_store::StoreActor;

/// Creates a new Product store actor and its client.
pub fn new(buffer_size: usize) -> (StoreActor<Product>, ProductClient) {
    let (actor, generic_client) = StoreActor::new(buffer_size);
    (actor, ProductClient::new(generic_client))
}
