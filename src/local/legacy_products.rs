//! # Legacy Local Product Mirror
//!
//! Earlier builds kept the whole catalog in device storage as one JSON array under
//! [`LEGACY_PRODUCTS_KEY`]. [`LocalProductStore`] keeps that format readable and writable
//! behind the same [`ProductStore`] contract as the hosted store.
//!
//! Behavior carried over from that format:
//! - unreadable or malformed data reads as an empty catalog
//! - `create` assigns a fresh id and stamps the time; the id counter lives under
//!   [`LEGACY_NEXT_ID_KEY`] so a deleted product's id is never handed out again
//! - `update` merges the present fields and re-stamps
//! - deleting an unknown id changes nothing and succeeds

use crate::clients::ProductStore;
use crate::local::KeyValueStore;
use crate::model::{Product, ProductFormData, ProductId, ProductUpdate};
use crate::product_store::ProductError;
use async_trait::async_trait;
use record_store::Clock;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, info, instrument, warn};

pub const LEGACY_PRODUCTS_KEY: &str = "wellx-products";
pub const LEGACY_NEXT_ID_KEY: &str = "wellx-products-next-id";

pub struct LocalProductStore {
    kv: Arc<dyn KeyValueStore>,
    clock: Box<dyn Clock>,
    // serialises read-modify-write cycles
    write_lock: Mutex<()>,
}

impl LocalProductStore {
    pub fn new(kv: Arc<dyn KeyValueStore>, clock: impl Clock) -> Self {
        Self {
            kv,
            clock: Box::new(clock),
            write_lock: Mutex::new(()),
        }
    }

    fn load(&self) -> Vec<Product> {
        let Some(raw) = self.kv.get(LEGACY_PRODUCTS_KEY) else {
            return Vec::new();
        };
        serde_json::from_str(&raw).unwrap_or_else(|e| {
            warn!(error = %e, "Unreadable local products, starting empty");
            Vec::new()
        })
    }

    // Never below one past the largest stored id, for data written before the counter existed.
    fn next_id(&self, products: &[Product]) -> u32 {
        let counted = self
            .kv
            .get(LEGACY_NEXT_ID_KEY)
            .and_then(|raw| raw.trim().parse::<u32>().ok())
            .unwrap_or(1);
        let past_max = products.iter().map(|p| p.id.0).max().unwrap_or(0) + 1;
        counted.max(past_max)
    }

    fn save(&self, products: &[Product]) -> Result<(), ProductError> {
        let raw =
            serde_json::to_string(products).map_err(|e| ProductError::Store(e.to_string()))?;
        self.kv
            .set(LEGACY_PRODUCTS_KEY, &raw)
            .map_err(|e| ProductError::Store(e.to_string()))
    }
}

#[async_trait]
impl ProductStore for LocalProductStore {
    async fn list(&self) -> Result<Vec<Product>, ProductError> {
        Ok(self.load())
    }

    async fn get(&self, id: ProductId) -> Result<Option<Product>, ProductError> {
        Ok(self.load().into_iter().find(|p| p.id == id))
    }

    #[instrument(skip(self, form), fields(name = %form.name))]
    async fn create(&self, form: ProductFormData) -> Result<Product, ProductError> {
        form.validate()?;
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);

        let mut products = self.load();
        let next = self.next_id(&products);
        let product = Product::from_form(ProductId(next), form, self.clock.now());
        products.push(product.clone());
        self.save(&products)?;
        self.kv
            .set(LEGACY_NEXT_ID_KEY, &(next + 1).to_string())
            .map_err(|e| ProductError::Store(e.to_string()))?;

        info!(id = %product.id, count = products.len(), "Stored locally");
        Ok(product)
    }

    #[instrument(skip(self, update))]
    async fn update(&self, id: ProductId, update: ProductUpdate) -> Result<Product, ProductError> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);

        let mut products = self.load();
        let Some(product) = products.iter_mut().find(|p| p.id == id) else {
            debug!("No local product to update");
            return Err(ProductError::NotFound(id));
        };
        product.apply(update, self.clock.now())?;
        let updated = product.clone();
        self.save(&products)?;
        Ok(updated)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: ProductId) -> Result<(), ProductError> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);

        let mut products = self.load();
        let before = products.len();
        products.retain(|p| p.id != id);
        if products.len() == before {
            debug!("No local product to delete");
            return Ok(());
        }
        self.save(&products)
    }
}
