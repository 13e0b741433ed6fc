//! Demo data loaded into a fresh backend.

use crate::category_store::CategoryError;
use crate::clients::{CategoryStore, ProductStore};
use crate::model::ProductFormData;
use crate::product_store::ProductError;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Cannot read seed file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid seed file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    Product(#[from] ProductError),

    #[error(transparent)]
    Category(#[from] CategoryError),
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Seed {
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub products: Vec<ProductFormData>,
}

impl Seed {
    pub fn load(path: &Path) -> Result<Self, SeedError> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Writes the seed straight to the stores. Stops at the first rejected record.
    pub async fn apply(
        &self,
        products: &dyn ProductStore,
        categories: &dyn CategoryStore,
    ) -> Result<(), SeedError> {
        for name in &self.categories {
            categories.create(name).await?;
        }
        for form in &self.products {
            products.create(form.clone()).await?;
        }
        info!(
            categories = self.categories.len(),
            products = self.products.len(),
            "Seed applied"
        );
        Ok(())
    }
}
