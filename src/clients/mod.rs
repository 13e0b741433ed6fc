//! Typed wrappers around [`StoreClient`](record_store::StoreClient) and the store contracts
//! they implement.

pub mod category_client;
pub mod product_client;
pub mod traits;

pub use category_client::*;
pub use product_client::*;
pub use traits::*;
