use chrono::{TimeZone, Utc};
use price_lookup::catalog::{CatalogController, CatalogError};
use price_lookup::lifecycle::Backend;
use price_lookup::local::{FileKv, KeyValueStore, LocalProductStore, MemoryKv, LEGACY_PRODUCTS_KEY};
use price_lookup::model::{ProductFormData, Role, SessionContext, User};
use price_lookup::notify::NoticeLog;
use price_lookup::product_store::ProductError;
use price_lookup::view_model::{EmptyState, SortDirection, SortField};
use record_store::FixedClock;
use std::sync::Arc;

fn session(role: Role) -> SessionContext {
    SessionContext::for_role(User::new("u-1", "lead@pharmacy.test"), role)
}

fn clock() -> FixedClock {
    FixedClock(Utc.with_ymd_and_hms(2024, 9, 2, 8, 0, 0).unwrap())
}

#[tokio::test]
async fn test_full_catalog_workflow() {
    let backend = Backend::start_with_clock(16, clock());
    let log = NoticeLog::new();
    let controller = CatalogController::new(
        Arc::new(backend.product_client.clone()),
        Arc::new(backend.category_client.clone()),
        Arc::new(log.clone()),
        session(Role::Admin),
        Arc::new(MemoryKv::new()),
    );

    // 1. Empty catalog
    controller.refresh().await.unwrap();
    assert_eq!(
        controller.view().empty_state,
        Some(EmptyState::NoProducts { offer_create: true })
    );

    // 2. Categories and products
    controller.create_category(" Analgesics ").await.unwrap();
    controller.create_category("Antibiotics").await.unwrap();
    let panadol = controller
        .create_product(ProductFormData::new("Panadol", "Analgesics").with_prices(350.0, 500.0))
        .await
        .unwrap();
    controller
        .create_product(ProductFormData::new("Amoxil", "Antibiotics").with_prices(900.0, 1200.0))
        .await
        .unwrap();

    let view = controller.view();
    assert_eq!(view.row_names(), vec!["Amoxil", "Panadol"]);
    assert_eq!(view.category_options, vec!["all", "Analgesics", "Antibiotics"]);
    assert_eq!(panadol.last_updated, clock().0);

    // 3. Sort by retail price, descending
    controller.set_sort(SortField::RetailPrice);
    controller.set_sort(SortField::RetailPrice);
    let view = controller.view();
    assert_eq!(view.sort.direction, SortDirection::Desc);
    assert_eq!(view.row_names(), vec!["Amoxil", "Panadol"]);

    // 4. Filters
    controller.set_query("ana");
    assert_eq!(controller.view().row_names(), vec!["Panadol"]);
    controller.set_query("");
    controller.set_category_filter("Vitamins");
    let view = controller.view();
    assert_eq!((view.raw_count, view.filtered_count), (2, 0));
    assert_eq!(view.empty_state, Some(EmptyState::NoMatches));
    controller.set_category_filter("all");

    // 5. Edit and delete
    let mut form = ProductFormData::from_product(&panadol);
    form.quantity = 3;
    let updated = controller.update_product(panadol.id, form).await.unwrap();
    assert_eq!(updated.quantity, 3);
    assert_eq!(controller.product_detail(panadol.id).await.unwrap(), updated);

    controller.delete_product(panadol.id).await.unwrap();
    assert_eq!(controller.view().row_names(), vec!["Amoxil"]);

    assert_eq!(
        log.messages(),
        vec![
            "Category added successfully",
            "Category added successfully",
            "Product added successfully",
            "Product added successfully",
            "Product updated successfully",
            "Product deleted successfully",
        ]
    );

    drop(controller);
    backend.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_store_rejection_reaches_notifier() {
    let backend = Backend::start_with_clock(16, clock());
    let log = NoticeLog::new();
    let controller = CatalogController::new(
        Arc::new(backend.product_client.clone()),
        Arc::new(backend.category_client.clone()),
        Arc::new(log.clone()),
        session(Role::Editor),
        Arc::new(MemoryKv::new()),
    );

    let missing = controller
        .update_product(
            price_lookup::model::ProductId(77),
            ProductFormData::new("Ghost", "None"),
        )
        .await;
    assert_eq!(
        missing,
        Err(CatalogError::Product(ProductError::NotFound(
            price_lookup::model::ProductId(77)
        )))
    );
    assert_eq!(
        log.messages(),
        vec!["Error updating product: Product not found: product_77"]
    );

    drop(controller);
    backend.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_wholesale_toggle_persists_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let prefs_path = dir.path().join("prefs.json");
    let backend = Backend::start_with_clock(16, clock());

    let build = || {
        CatalogController::new(
            Arc::new(backend.product_client.clone()),
            Arc::new(backend.category_client.clone()),
            Arc::new(NoticeLog::new()),
            session(Role::Viewer),
            Arc::new(FileKv::new(&prefs_path)),
        )
    };

    let first = build();
    assert!(first.view().show_wholesale);
    assert!(!first.toggle_wholesale_visibility().unwrap());
    drop(first);

    let second = build();
    assert!(!second.view().show_wholesale);
    drop(second);

    backend.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_controller_over_legacy_mirror() {
    let prefs: Arc<dyn KeyValueStore> = Arc::new(MemoryKv::new());
    let backend = Backend::start_with_clock(16, clock());
    let controller = CatalogController::new(
        Arc::new(LocalProductStore::new(prefs.clone(), clock())),
        Arc::new(backend.category_client.clone()),
        Arc::new(NoticeLog::new()),
        session(Role::Admin),
        prefs.clone(),
    );

    controller
        .create_product(ProductFormData::new("Vitamin C", "Vitamins").with_quantity(0))
        .await
        .unwrap();
    controller.toggle_wholesale_visibility().unwrap();

    let view = controller.view();
    assert_eq!(view.row_names(), vec!["Vitamin C"]);
    assert!(prefs.get(LEGACY_PRODUCTS_KEY).is_some());
    assert_eq!(prefs.get("showWholesale").as_deref(), Some("false"));

    drop(controller);
    backend.shutdown().await.unwrap();
}
