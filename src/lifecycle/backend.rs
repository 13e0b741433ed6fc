use crate::clients::{CategoryClient, ProductClient};
use record_store::{Clock, SystemClock};
use tracing::{error, info};

/// Runs the product and category store actors for the lifetime of the app.
///
/// # Example
///
/// ```rust
/// use price_lookup::clients::ProductStore;
/// use price_lookup::lifecycle::Backend;
/// use price_lookup::model::ProductFormData;
///
/// #[tokio::main]
/// async fn main() {
///     let backend = Backend::start(32);
///     backend
///         .product_client
///         .create(ProductFormData::new("Panadol", "Analgesics"))
///         .await
///         .unwrap();
///     backend.shutdown().await.unwrap();
/// }
/// ```
pub struct Backend {
    pub product_client: ProductClient,
    pub category_client: CategoryClient,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl Backend {
    /// Spawns both stores on the wall clock.
    pub fn start(buffer_size: usize) -> Self {
        Self::start_with_clock(buffer_size, SystemClock)
    }

    pub fn start_with_clock<C: Clock + Clone>(buffer_size: usize, clock: C) -> Self {
        let (product_actor, product_client) = crate::product_store::new(buffer_size);
        let (category_actor, category_client) = crate::category_store::new(buffer_size);

        let product_handle = tokio::spawn(product_actor.run(clock.clone()));
        let category_handle = tokio::spawn(category_actor.run(clock));

        Self {
            product_client,
            category_client,
            handles: vec![product_handle, category_handle],
        }
    }

    /// Drops this backend's clients and waits for both actors to stop.
    ///
    /// Clones handed out earlier (e.g. to a controller) keep their store alive, so drop
    /// those first.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down stores...");
        drop(self.product_client);
        drop(self.category_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Store task failed: {:?}", e);
                return Err(format!("Store task failed: {e:?}"));
            }
        }

        info!("Stores stopped.");
        Ok(())
    }
}
