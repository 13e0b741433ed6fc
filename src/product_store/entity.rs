//! [`Record`] implementation for the Product type.
//!
//! Products list newest-first. Ids come from a monotonic counter, so id order is creation
//! order. Every successful write stamps `last_updated` with the store's clock.

use crate::model::{FieldError, Product, ProductFormData, ProductId, ProductUpdate};
use chrono::{DateTime, Utc};
use record_store::Record;
use std::cmp::Ordering;

impl Record for Product {
    type Id = ProductId;
    type Create = ProductFormData;
    type Update = ProductUpdate;
    type Error = FieldError;

    fn id(&self) -> &ProductId {
        &self.id
    }

    fn from_create(
        id: ProductId,
        params: ProductFormData,
        now: DateTime<Utc>,
    ) -> Result<Self, FieldError> {
        params.validate()?;
        Ok(Product::from_form(id, params, now))
    }

    fn on_update(&mut self, update: ProductUpdate, now: DateTime<Utc>) -> Result<(), FieldError> {
        self.apply(update, now)
    }

    fn listing_order(a: &Self, b: &Self) -> Ordering {
        b.id.cmp(&a.id)
    }
}
