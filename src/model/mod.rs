//! Pure data structures. [`Product`] and [`Category`] implement
//! [`Record`](record_store::Record) in their store modules.

pub mod category;
pub mod product;
pub mod session;

pub use category::*;
pub use product::*;
pub use session::*;
