//! Category table: [`Record`](record_store::Record) impl, errors and constructor.

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::CategoryClient;
use crate::model::Category;
use record_store::StoreActor;

/// Creates a new Category store actor and its client.
pub fn new(buffer_size: usize) -> (StoreActor<Category>, CategoryClient) {
    let (actor, generic_client) = StoreActor::new(buffer_size);
    (actor, CategoryClient::new(generic_client))
}
