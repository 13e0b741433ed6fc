//! Collaborator contracts the catalog depends on.
//!
//! The controller only sees these traits, so an actor-backed store, the legacy local mirror
//! and test doubles are interchangeable.

use crate::category_store::CategoryError;
use crate::model::{Category, CategoryId, Product, ProductFormData, ProductId, ProductUpdate};
use crate::product_store::ProductError;
use async_trait::async_trait;

#[async_trait]
pub trait ProductStore: Send + Sync {
    async fn list(&self) -> Result<Vec<Product>, ProductError>;

    async fn get(&self, id: ProductId) -> Result<Option<Product>, ProductError>;

    async fn create(&self, form: ProductFormData) -> Result<Product, ProductError>;

    async fn update(&self, id: ProductId, update: ProductUpdate) -> Result<Product, ProductError>;

    async fn delete(&self, id: ProductId) -> Result<(), ProductError>;
}

#[async_trait]
pub trait CategoryStore: Send + Sync {
    async fn list(&self) -> Result<Vec<Category>, CategoryError>;

    async fn create(&self, name: &str) -> Result<Category, CategoryError>;

    async fn delete(&self, id: CategoryId) -> Result<(), CategoryError>;
}
