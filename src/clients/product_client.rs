//! # Product Client
//!
//! Wraps a `StoreClient<Product>` and exposes it as a [`ProductStore`].
use crate::clients::ProductStore;
use crate::model::{Product, ProductFormData, ProductId, ProductUpdate};
use crate::product_store::ProductError;
use async_trait::async_trait;
use record_store::{RecordClient, StoreClient, StoreError};
use tracing::{debug, instrument};

/// Client for the Product store actor.
#[derive(Clone)]
pub struct ProductClient {
    inner: StoreClient<Product>,
}

impl ProductClient {
    pub fn new(inner: StoreClient<Product>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl RecordClient<Product> for ProductClient {
    type Error = ProductError;

    fn inner(&self) -> &StoreClient<Product> {
        &self.inner
    }

    fn map_error(e: StoreError) -> Self::Error {
        ProductError::from_store(e, None)
    }
}

#[async_trait]
impl ProductStore for ProductClient {
    async fn list(&self) -> Result<Vec<Product>, ProductError> {
        self.list_records().await
    }

    async fn get(&self, id: ProductId) -> Result<Option<Product>, ProductError> {
        self.get_record(id).await
    }

    #[instrument(skip(self, form), fields(name = %form.name))]
    async fn create(&self, form: ProductFormData) -> Result<Product, ProductError> {
        debug!(?form, "Sending request");
        self.inner.create(form).await.map_err(Self::map_error)
    }

    #[instrument(skip(self, update))]
    async fn update(&self, id: ProductId, update: ProductUpdate) -> Result<Product, ProductError> {
        debug!(?update, "Sending request");
        self.inner
            .update(id, update)
            .await
            .map_err(|e| ProductError::from_store(e, Some(id)))
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: ProductId) -> Result<(), ProductError> {
        debug!("Sending request");
        self.inner
            .delete(id)
            .await
            .map_err(|e| ProductError::from_store(e, Some(id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use record_store::mock::{create_mock_store, expect_create, expect_update, MockStore};

    fn panadol() -> Product {
        let now = Utc.with_ymd_and_hms(2024, 6, 3, 9, 0, 0).unwrap();
        Product::from_form(
            ProductId(1),
            ProductFormData::new("Panadol", "Analgesics").with_prices(350.0, 500.0),
            now,
        )
    }

    #[tokio::test]
    async fn test_create_forwards_form() {
        let (client, mut receiver) = create_mock_store::<Product>(10);
        let products = ProductClient::new(client);

        let create_task = tokio::spawn(async move {
            products
                .create(ProductFormData::new("Panadol", "Analgesics").with_prices(350.0, 500.0))
                .await
        });

        let (form, responder) = expect_create(&mut receiver)
            .await
            .expect("Expected Create request");
        assert_eq!(form.name, "Panadol");
        assert_eq!(form.retail_price, 500.0);
        responder.send(Ok(panadol())).unwrap();

        assert_eq!(create_task.await.unwrap().unwrap(), panadol());
    }

    #[tokio::test]
    async fn test_update_forwards_payload() {
        let (client, mut receiver) = create_mock_store::<Product>(10);
        let products = ProductClient::new(client);

        let update_task = tokio::spawn(async move {
            products
                .update(
                    ProductId(1),
                    ProductUpdate {
                        quantity: Some(12),
                        ..Default::default()
                    },
                )
                .await
        });

        let (id, update, responder) = expect_update(&mut receiver)
            .await
            .expect("Expected Update request");
        assert_eq!(id, ProductId(1));
        assert_eq!(update.quantity, Some(12));

        let mut updated = panadol();
        updated.quantity = 12;
        responder.send(Ok(updated.clone())).unwrap();

        assert_eq!(update_task.await.unwrap().unwrap(), updated);
    }

    #[tokio::test]
    async fn test_missing_product_maps_to_not_found() {
        let mut mock = MockStore::<Product>::new();
        mock.expect_update(ProductId(5))
            .return_err(StoreError::NotFound("product_5".into()));
        mock.expect_delete(ProductId(5))
            .return_err(StoreError::NotFound("product_5".into()));

        let products = ProductClient::new(mock.client());
        let update = products.update(ProductId(5), ProductUpdate::default()).await;
        assert_eq!(update.unwrap_err(), ProductError::NotFound(ProductId(5)));
        let delete = products.delete(ProductId(5)).await;
        assert_eq!(delete.unwrap_err(), ProductError::NotFound(ProductId(5)));
        mock.verify();
    }

    #[tokio::test]
    async fn test_backend_failure_surfaces_message() {
        let mut mock = MockStore::<Product>::new();
        mock.expect_list()
            .return_err(StoreError::Backend("connection reset".into()));

        let err = ProductClient::new(mock.client()).list().await.unwrap_err();
        assert_eq!(err.to_string(), "Product store error: connection reset");
        mock.verify();
    }
}
