use crate::category_store::CategoryError;
use crate::clients::CategoryStore;
use crate::model::{Category, CategoryCreate, CategoryId};
use async_trait::async_trait;
use record_store::{RecordClient, StoreClient, StoreError};
use tracing::{debug, instrument};

/// Client for the Category store actor.
#[derive(Clone)]
pub struct CategoryClient {
    inner: StoreClient<Category>,
}

impl CategoryClient {
    pub fn new(inner: StoreClient<Category>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl RecordClient<Category> for CategoryClient {
    type Error = CategoryError;

    fn inner(&self) -> &StoreClient<Category> {
        &self.inner
    }

    fn map_error(e: StoreError) -> Self::Error {
        CategoryError::from_store(e, None)
    }
}

#[async_trait]
impl CategoryStore for CategoryClient {
    async fn list(&self) -> Result<Vec<Category>, CategoryError> {
        self.list_records().await
    }

    /// Trims `name`; blank names never reach the store.
    #[instrument(skip(self))]
    async fn create(&self, name: &str) -> Result<Category, CategoryError> {
        let payload = CategoryCreate::new(name).ok_or(CategoryError::EmptyName)?;
        debug!("Sending request");
        self.inner.create(payload).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: CategoryId) -> Result<(), CategoryError> {
        debug!("Sending request");
        self.inner
            .delete(id)
            .await
            .map_err(|e| CategoryError::from_store(e, Some(id)))
    }
}
