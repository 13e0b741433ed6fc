//! # Catalog Controller
//!
//! Page-level orchestration around the [`ProductListViewModel`]: loads collections from the
//! stores, runs permission-checked mutations, reports every outcome through the
//! [`Notifier`] and reloads after confirmed writes.
//!
//! ## Rules
//!
//! - Nothing reaches a store without a signed-in session ([`CatalogError::NotSignedIn`]).
//! - Mutations are checked against [`Permissions`] and validated before any request.
//! - A failed load keeps the previous collection. A failed mutation leaves local state alone.
//! - An action on a target has one in-flight slot; repeating it gets [`CatalogError::Busy`].
//! - Loads are numbered when issued. A result older than the one already shown is dropped.
//!
//! The controller takes `&self` everywhere and can be shared behind an `Arc`.

mod error;
mod in_flight;

pub use error::*;
pub use in_flight::*;

use crate::clients::{CategoryStore, ProductStore};
use crate::local::KeyValueStore;
use crate::model::{CategoryCreate, CategoryId, Product, ProductFormData, ProductId, SessionContext};
use crate::category_store::CategoryError;
use crate::notify::Notifier;
use crate::product_store::ProductError;
use crate::view_model::{
    CategoryFilter, Column, ListView, Permissions, ProductListViewModel, SortField, ViewMode,
};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, info, instrument, warn};

struct State {
    vm: ProductListViewModel,
    // tickets of the loads currently shown
    products_shown: u64,
    categories_shown: u64,
}

pub struct CatalogController {
    products: Arc<dyn ProductStore>,
    categories: Arc<dyn CategoryStore>,
    notifier: Arc<dyn Notifier>,
    state: Mutex<State>,
    load_tickets: AtomicU64,
    in_flight: InFlight,
}

impl CatalogController {
    pub fn new(
        products: Arc<dyn ProductStore>,
        categories: Arc<dyn CategoryStore>,
        notifier: Arc<dyn Notifier>,
        session: SessionContext,
        prefs: Arc<dyn KeyValueStore>,
    ) -> Self {
        Self {
            products,
            categories,
            notifier,
            state: Mutex::new(State {
                vm: ProductListViewModel::new(session, prefs),
                products_shown: 0,
                categories_shown: 0,
            }),
            load_tickets: AtomicU64::new(0),
            in_flight: InFlight::default(),
        }
    }

    // Critical sections stay synchronous; the lock is never held across an await.
    fn with_state<R>(&self, f: impl FnOnce(&mut ProductListViewModel) -> R) -> R {
        self.with_loads(|state| f(&mut state.vm))
    }

    fn with_loads<R>(&self, f: impl FnOnce(&mut State) -> R) -> R {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut state)
    }

    fn next_ticket(&self) -> u64 {
        self.load_tickets.fetch_add(1, Ordering::Relaxed) + 1
    }

    pub fn session(&self) -> SessionContext {
        self.with_state(|vm| vm.session().clone())
    }

    pub fn permissions(&self) -> Permissions {
        self.with_state(|vm| vm.permissions())
    }

    pub fn is_busy(&self, kind: ActionKind) -> bool {
        self.in_flight.is_busy(kind)
    }

    pub fn is_busy_for(&self, kind: ActionKind, target: Option<u32>) -> bool {
        self.in_flight.is_busy_for(kind, target)
    }

    fn require_session(&self) -> Result<(), CatalogError> {
        if self.with_state(|vm| vm.session().is_authenticated()) {
            Ok(())
        } else {
            Err(CatalogError::NotSignedIn)
        }
    }

    fn authorize(
        &self,
        kind: ActionKind,
        allowed: impl FnOnce(&Permissions) -> bool,
    ) -> Result<(), CatalogError> {
        self.require_session()?;
        if allowed(&self.permissions()) {
            Ok(())
        } else {
            warn!(action = %kind, "Action not permitted");
            Err(CatalogError::Forbidden(kind))
        }
    }

    fn begin(
        &self,
        kind: ActionKind,
        target: Option<u32>,
    ) -> Result<InFlightGuard<'_>, CatalogError> {
        self.in_flight
            .try_begin(kind, target)
            .ok_or(CatalogError::Busy(kind))
    }

    fn report_failure(&self, title: &str, error: impl std::fmt::Display) {
        self.notifier.error(&format!("{title}: {error}"));
    }

    // -------------------------------------------------------------------------
    // Loading
    // -------------------------------------------------------------------------

    /// Replaces the product collection unless a newer load already landed.
    /// Returns how many were loaded.
    #[instrument(skip(self))]
    pub async fn load_products(&self) -> Result<usize, CatalogError> {
        self.require_session()?;
        let ticket = self.next_ticket();
        match self.products.list().await {
            Ok(products) => {
                let count = products.len();
                let shown = self.with_loads(|state| {
                    if ticket < state.products_shown {
                        return false;
                    }
                    state.products_shown = ticket;
                    state.vm.set_products(products);
                    true
                });
                if shown {
                    info!(count, "Products loaded");
                } else {
                    debug!(ticket, "Stale product load dropped");
                }
                Ok(count)
            }
            Err(e) => {
                self.report_failure("Error loading products", &e);
                Err(e.into())
            }
        }
    }

    #[instrument(skip(self))]
    pub async fn load_categories(&self) -> Result<usize, CatalogError> {
        self.require_session()?;
        let ticket = self.next_ticket();
        match self.categories.list().await {
            Ok(categories) => {
                let count = categories.len();
                let shown = self.with_loads(|state| {
                    if ticket < state.categories_shown {
                        return false;
                    }
                    state.categories_shown = ticket;
                    state.vm.set_categories(categories);
                    true
                });
                if shown {
                    info!(count, "Categories loaded");
                } else {
                    debug!(ticket, "Stale category load dropped");
                }
                Ok(count)
            }
            Err(e) => {
                self.report_failure("Error loading categories", &e);
                Err(e.into())
            }
        }
    }

    /// Loads both collections concurrently; reports the first failure.
    pub async fn refresh(&self) -> Result<(), CatalogError> {
        let (products, categories) = tokio::join!(self.load_products(), self.load_categories());
        products?;
        categories?;
        Ok(())
    }

    /// Single product for the detail page.
    #[instrument(skip(self))]
    pub async fn product_detail(&self, id: ProductId) -> Result<Product, CatalogError> {
        self.require_session()?;
        let result = match self.products.get(id).await {
            Ok(Some(product)) => Ok(product),
            Ok(None) => Err(ProductError::NotFound(id)),
            Err(e) => Err(e),
        };
        result.map_err(|e| {
            self.report_failure("Error loading product", &e);
            e.into()
        })
    }

    // -------------------------------------------------------------------------
    // Product mutations
    // -------------------------------------------------------------------------

    #[instrument(skip(self, form), fields(name = %form.name))]
    pub async fn create_product(&self, form: ProductFormData) -> Result<Product, CatalogError> {
        let kind = ActionKind::CreateProduct;
        self.authorize(kind, |p| p.can_create)?;
        let form = form.normalized();
        if let Err(e) = form.validate() {
            self.report_failure("Error adding product", &e);
            return Err(ProductError::from(e).into());
        }
        let _slot = self.begin(kind, None)?;

        match self.products.create(form).await {
            Ok(product) => {
                info!(id = %product.id, "Product added");
                self.notifier.success("Product added successfully");
                let _ = self.load_products().await;
                Ok(product)
            }
            Err(e) => {
                self.report_failure("Error adding product", &e);
                Err(e.into())
            }
        }
    }

    /// Saves the edit dialog. Blank optional fields clear the stored value.
    #[instrument(skip(self, form))]
    pub async fn update_product(
        &self,
        id: ProductId,
        form: ProductFormData,
    ) -> Result<Product, CatalogError> {
        let kind = ActionKind::UpdateProduct;
        self.authorize(kind, |p| p.can_edit)?;
        if let Err(e) = form.validate() {
            self.report_failure("Error updating product", &e);
            return Err(ProductError::from(e).into());
        }
        let _slot = self.begin(kind, Some(id.0))?;

        match self.products.update(id, form.into()).await {
            Ok(product) => {
                info!(%id, "Product updated");
                self.notifier.success("Product updated successfully");
                let _ = self.load_products().await;
                Ok(product)
            }
            Err(e) => {
                self.report_failure("Error updating product", &e);
                Err(e.into())
            }
        }
    }

    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: ProductId) -> Result<(), CatalogError> {
        let kind = ActionKind::DeleteProduct;
        self.authorize(kind, |p| p.can_delete)?;
        let _slot = self.begin(kind, Some(id.0))?;

        match self.products.delete(id).await {
            Ok(()) => {
                info!(%id, "Product deleted");
                self.notifier.success("Product deleted successfully");
                let _ = self.load_products().await;
                Ok(())
            }
            Err(e) => {
                self.report_failure("Error deleting product", &e);
                Err(e.into())
            }
        }
    }

    // -------------------------------------------------------------------------
    // Category mutations
    // -------------------------------------------------------------------------

    /// Blank names are refused quietly, without a notice or a request.
    #[instrument(skip(self))]
    pub async fn create_category(&self, name: &str) -> Result<(), CatalogError> {
        let kind = ActionKind::CreateCategory;
        self.authorize(kind, |p| p.can_manage_categories)?;
        let Some(create) = CategoryCreate::new(name) else {
            return Err(CategoryError::EmptyName.into());
        };
        let _slot = self.begin(kind, None)?;

        match self.categories.create(&create.name).await {
            Ok(category) => {
                info!(id = %category.id, name = %category.name, "Category added");
                self.notifier.success("Category added successfully");
                let _ = self.load_categories().await;
                Ok(())
            }
            Err(e) => {
                self.report_failure("Error adding category", &e);
                Err(e.into())
            }
        }
    }

    /// Products keep their category name after the category is gone.
    #[instrument(skip(self))]
    pub async fn delete_category(&self, id: CategoryId) -> Result<(), CatalogError> {
        let kind = ActionKind::DeleteCategory;
        self.authorize(kind, |p| p.can_manage_categories)?;
        let _slot = self.begin(kind, Some(id.0))?;

        match self.categories.delete(id).await {
            Ok(()) => {
                info!(%id, "Category deleted");
                self.notifier.success("Category deleted successfully");
                let _ = self.load_categories().await;
                Ok(())
            }
            Err(e) => {
                self.report_failure("Error deleting category", &e);
                Err(e.into())
            }
        }
    }

    // -------------------------------------------------------------------------
    // View state
    // -------------------------------------------------------------------------

    pub fn set_query(&self, text: &str) {
        self.with_state(|vm| vm.set_query(text));
    }

    pub fn set_category_filter(&self, filter: impl Into<CategoryFilter>) {
        let filter = filter.into();
        self.with_state(|vm| vm.set_category_filter(filter));
    }

    pub fn set_sort(&self, field: SortField) {
        self.with_state(|vm| vm.set_sort(field));
    }

    pub fn sort_by_column(&self, column: Column) -> bool {
        self.with_state(|vm| vm.sort_by_column(column))
    }

    pub fn columns(&self) -> Vec<Column> {
        self.with_state(|vm| vm.columns())
    }

    pub fn set_view_mode(&self, mode: ViewMode) {
        self.with_state(|vm| vm.set_view_mode(mode));
    }

    pub fn toggle_wholesale_visibility(&self) -> Result<bool, CatalogError> {
        self.with_state(|vm| vm.toggle_wholesale_visibility())
            .map_err(|e| CatalogError::Preferences(e.to_string()))
    }

    pub fn view(&self) -> ListView {
        self.with_state(|vm| vm.view())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::{CategoryClient, ProductClient};
    use crate::local::MemoryKv;
    use crate::model::{Category, Role, User};
    use crate::notify::{NoticeKind, NoticeLog};
    use chrono::{TimeZone, Utc};
    use record_store::message::StoreRequest;
    use record_store::mock::{
        create_mock_store, expect_create, expect_delete, expect_list, MockStore,
    };
    use record_store::StoreError;
    use tokio::sync::mpsc::Receiver;

    fn now() -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 7, 1, 10, 0, 0).unwrap()
    }

    fn panadol(id: u32) -> Product {
        Product::from_form(
            ProductId(id),
            ProductFormData::new("Panadol", "Analgesics").with_prices(350.0, 500.0),
            now(),
        )
    }

    fn session(role: Role) -> SessionContext {
        SessionContext::for_role(User::new("u-1", "staff@pharmacy.test"), role)
    }

    struct Harness {
        controller: CatalogController,
        products: MockStore<Product>,
        categories: MockStore<Category>,
        log: NoticeLog,
    }

    fn harness(session: SessionContext) -> Harness {
        let products = MockStore::<Product>::new();
        let categories = MockStore::<Category>::new();
        let log = NoticeLog::new();
        let controller = CatalogController::new(
            Arc::new(ProductClient::new(products.client())),
            Arc::new(CategoryClient::new(categories.client())),
            Arc::new(log.clone()),
            session,
            Arc::new(MemoryKv::new()),
        );
        Harness {
            controller,
            products,
            categories,
            log,
        }
    }

    #[tokio::test]
    async fn test_signed_out_never_calls_stores() {
        let h = harness(SessionContext::signed_out());

        assert_eq!(h.controller.load_products().await, Err(CatalogError::NotSignedIn));
        assert_eq!(
            h.controller.delete_product(ProductId(1)).await,
            Err(CatalogError::NotSignedIn)
        );
        h.products.verify();
        assert!(h.log.notices().is_empty());
    }

    #[tokio::test]
    async fn test_failed_load_keeps_previous_products() {
        let mut h = harness(session(Role::Viewer));
        h.products.expect_list().return_ok(vec![panadol(1)]);
        h.products
            .expect_list()
            .return_err(StoreError::Backend("timeout".into()));

        assert_eq!(h.controller.load_products().await, Ok(1));
        assert!(h.controller.load_products().await.is_err());

        assert_eq!(h.controller.view().raw_count, 1);
        assert_eq!(
            h.log.messages(),
            vec!["Error loading products: Product store error: timeout"]
        );
        h.products.verify();
    }

    #[tokio::test]
    async fn test_create_notifies_and_reloads() {
        let mut h = harness(session(Role::Editor));
        h.products.expect_create().return_ok(panadol(1));
        h.products.expect_list().return_ok(vec![panadol(1)]);

        let form = ProductFormData::new("Panadol", "Analgesics").with_prices(350.0, 500.0);
        let created = h.controller.create_product(form).await.unwrap();

        assert_eq!(created.id, ProductId(1));
        assert_eq!(h.controller.view().row_names(), vec!["Panadol"]);
        assert_eq!(h.log.messages(), vec!["Product added successfully"]);
        h.products.verify();
    }

    #[tokio::test]
    async fn test_failed_mutation_does_not_reload() {
        let mut h = harness(session(Role::Admin));
        h.products
            .expect_delete(ProductId(4))
            .return_err(StoreError::Backend("permission denied".into()));

        let result = h.controller.delete_product(ProductId(4)).await;
        assert!(matches!(result, Err(CatalogError::Product(ProductError::Store(_)))));

        let notice = h.log.last().unwrap();
        assert_eq!(notice.kind, NoticeKind::Error);
        assert_eq!(
            notice.message,
            "Error deleting product: Product store error: permission denied"
        );
        // a reload would have hit the empty mock and added a load error
        assert_eq!(h.log.notices().len(), 1);
        h.products.verify();
    }

    #[tokio::test]
    async fn test_permissions_are_enforced() {
        let h = harness(session(Role::Viewer));
        let form = ProductFormData::new("Panadol", "Analgesics");

        assert_eq!(
            h.controller.create_product(form.clone()).await,
            Err(CatalogError::Forbidden(ActionKind::CreateProduct))
        );
        assert_eq!(
            h.controller.update_product(ProductId(1), form).await,
            Err(CatalogError::Forbidden(ActionKind::UpdateProduct))
        );
        assert_eq!(
            h.controller.create_category("Vitamins").await,
            Err(CatalogError::Forbidden(ActionKind::CreateCategory))
        );

        let editor = harness(session(Role::Editor));
        assert_eq!(
            editor.controller.delete_category(CategoryId(1)).await,
            Err(CatalogError::Forbidden(ActionKind::DeleteCategory))
        );
    }

    #[tokio::test]
    async fn test_invalid_form_is_reported_without_request() {
        let h = harness(session(Role::Editor));
        let form = ProductFormData::new("Panadol", "Analgesics").with_prices(-10.0, 500.0);

        let result = h.controller.create_product(form).await;
        assert!(matches!(result, Err(CatalogError::Product(ProductError::Invalid(_)))));
        assert_eq!(
            h.log.messages(),
            vec!["Error adding product: wholesale_price: must be 0 or positive"]
        );
        h.products.verify();
    }

    #[tokio::test]
    async fn test_blank_category_is_ignored_quietly() {
        let h = harness(session(Role::Admin));
        let result = h.controller.create_category("   ").await;
        assert_eq!(result, Err(CatalogError::Category(CategoryError::EmptyName)));
        assert!(h.log.notices().is_empty());
        h.categories.verify();
    }

    #[tokio::test]
    async fn test_missing_product_detail_is_reported() {
        let mut h = harness(session(Role::Viewer));
        h.products.expect_get(ProductId(9)).return_ok(None);

        let result = h.controller.product_detail(ProductId(9)).await;
        assert_eq!(
            result,
            Err(CatalogError::Product(ProductError::NotFound(ProductId(9))))
        );
        assert_eq!(
            h.log.messages(),
            vec!["Error loading product: Product not found: product_9"]
        );
    }

    #[tokio::test]
    async fn test_failed_category_load_keeps_previous() {
        let mut h = harness(session(Role::Viewer));
        h.categories.expect_list().return_ok(vec![Category {
            id: CategoryId(1),
            name: "Analgesics".into(),
            created_at: now(),
        }]);
        h.categories
            .expect_list()
            .return_err(StoreError::Backend("timeout".into()));

        assert_eq!(h.controller.load_categories().await, Ok(1));
        assert!(h.controller.load_categories().await.is_err());

        assert_eq!(h.controller.view().category_options, vec!["all", "Analgesics"]);
        assert_eq!(
            h.log.messages(),
            vec!["Error loading categories: Category store error: timeout"]
        );
        h.categories.verify();
    }

    #[tokio::test]
    async fn test_success_notice_stands_when_reload_fails() {
        let mut h = harness(session(Role::Editor));
        h.products.expect_list().return_ok(vec![panadol(1)]);
        h.products.expect_create().return_ok(panadol(2));
        h.products
            .expect_list()
            .return_err(StoreError::Backend("timeout".into()));

        h.controller.load_products().await.unwrap();
        let form = ProductFormData::new("Panadol", "Analgesics").with_prices(350.0, 500.0);
        let created = h.controller.create_product(form).await;

        assert_eq!(created.map(|p| p.id), Ok(ProductId(2)));
        let kinds: Vec<NoticeKind> = h.log.notices().iter().map(|n| n.kind).collect();
        assert_eq!(kinds, vec![NoticeKind::Success, NoticeKind::Error]);
        assert_eq!(
            h.log.messages(),
            vec![
                "Product added successfully",
                "Error loading products: Product store error: timeout",
            ]
        );
        assert_eq!(h.controller.view().raw_count, 1);
        h.products.verify();
    }

    fn raw_controller(
        role: Role,
    ) -> (Arc<CatalogController>, Receiver<StoreRequest<Product>>, NoticeLog) {
        let (client, receiver) = create_mock_store::<Product>(10);
        let categories = MockStore::<Category>::new();
        let log = NoticeLog::new();
        let controller = Arc::new(CatalogController::new(
            Arc::new(ProductClient::new(client)),
            Arc::new(CategoryClient::new(categories.client())),
            Arc::new(log.clone()),
            session(role),
            Arc::new(MemoryKv::new()),
        ));
        (controller, receiver, log)
    }

    #[tokio::test]
    async fn test_older_load_does_not_overwrite_newer() {
        let (controller, mut receiver, _log) = raw_controller(Role::Viewer);

        let older = {
            let controller = controller.clone();
            tokio::spawn(async move { controller.load_products().await })
        };
        let older_reply = expect_list(&mut receiver)
            .await
            .expect("Expected List request");

        let newer = {
            let controller = controller.clone();
            tokio::spawn(async move { controller.load_products().await })
        };
        let newer_reply = expect_list(&mut receiver)
            .await
            .expect("Expected List request");

        newer_reply.send(Ok(vec![panadol(2), panadol(1)])).unwrap();
        assert_eq!(newer.await.unwrap(), Ok(2));
        older_reply.send(Ok(vec![panadol(1)])).unwrap();
        assert_eq!(older.await.unwrap(), Ok(1));

        assert_eq!(controller.view().raw_count, 2);
    }

    #[tokio::test]
    async fn test_deletes_of_different_products_run_together() {
        let (controller, mut receiver, log) = raw_controller(Role::Admin);

        let first = {
            let controller = controller.clone();
            tokio::spawn(async move { controller.delete_product(ProductId(1)).await })
        };
        let (id, first_reply) = expect_delete(&mut receiver)
            .await
            .expect("Expected Delete request");
        assert_eq!(id, ProductId(1));

        let second = {
            let controller = controller.clone();
            tokio::spawn(async move { controller.delete_product(ProductId(2)).await })
        };
        let (id, second_reply) = expect_delete(&mut receiver)
            .await
            .expect("Expected Delete request");
        assert_eq!(id, ProductId(2));
        assert!(controller.is_busy_for(ActionKind::DeleteProduct, Some(2)));

        // the same product is still in flight
        assert_eq!(
            controller.delete_product(ProductId(1)).await,
            Err(CatalogError::Busy(ActionKind::DeleteProduct))
        );

        second_reply.send(Ok(())).unwrap();
        expect_list(&mut receiver)
            .await
            .expect("Expected List request")
            .send(Ok(vec![panadol(1)]))
            .unwrap();
        assert!(second.await.unwrap().is_ok());

        first_reply.send(Ok(())).unwrap();
        expect_list(&mut receiver)
            .await
            .expect("Expected List request")
            .send(Ok(vec![]))
            .unwrap();
        assert!(first.await.unwrap().is_ok());

        assert!(!controller.is_busy(ActionKind::DeleteProduct));
        assert_eq!(
            log.messages(),
            vec!["Product deleted successfully", "Product deleted successfully"]
        );
    }

    #[tokio::test]
    async fn test_duplicate_create_is_busy() {
        let (controller, mut receiver, log) = raw_controller(Role::Editor);

        let first = {
            let controller = controller.clone();
            tokio::spawn(async move {
                controller
                    .create_product(ProductFormData::new("Panadol", "Analgesics"))
                    .await
            })
        };

        // the first request is now held open
        let (_, responder) = expect_create(&mut receiver)
            .await
            .expect("Expected Create request");
        assert!(controller.is_busy(ActionKind::CreateProduct));

        let second = controller
            .create_product(ProductFormData::new("Amoxil", "Antibiotics"))
            .await;
        assert_eq!(second, Err(CatalogError::Busy(ActionKind::CreateProduct)));

        responder.send(Ok(panadol(1))).unwrap();
        let reload = expect_list(&mut receiver)
            .await
            .expect("Expected List request");
        reload.send(Ok(vec![panadol(1)])).unwrap();

        assert!(first.await.unwrap().is_ok());
        assert!(!controller.is_busy(ActionKind::CreateProduct));
        assert_eq!(log.messages(), vec!["Product added successfully"]);
    }
}
