use anyhow::Context;
use clap::Parser;
use price_lookup::catalog::CatalogController;
use price_lookup::clients::ProductStore;
use price_lookup::config::AppConfig;
use price_lookup::lifecycle::{setup_tracing, Backend, Seed};
use price_lookup::local::{FileKv, KeyValueStore, LocalProductStore, MemoryKv};
use price_lookup::notify::TracingNotifier;
use price_lookup::view_model::{Column, ListView, ProductRow, SortDirection, ViewMode};
use record_store::SystemClock;
use std::sync::Arc;
use tracing::{info, warn, Instrument};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::parse();
    setup_tracing(&config.log);

    let prefs: Arc<dyn KeyValueStore> = match &config.prefs {
        Some(path) => {
            let kv = FileKv::new(path);
            info!(path = %kv.path().display(), "Using preferences file");
            Arc::new(kv)
        }
        None => Arc::new(MemoryKv::new()),
    };

    let backend = Backend::start(config.buffer);
    let products: Arc<dyn ProductStore> = if config.local_mirror {
        Arc::new(LocalProductStore::new(prefs.clone(), SystemClock))
    } else {
        Arc::new(backend.product_client.clone())
    };

    if let Some(path) = &config.seed {
        let seed = Seed::load(path).with_context(|| format!("loading {}", path.display()))?;
        seed.apply(products.as_ref(), &backend.category_client)
            .instrument(tracing::info_span!("seeding"))
            .await?;
    }

    let controller = CatalogController::new(
        products,
        Arc::new(backend.category_client.clone()),
        Arc::new(TracingNotifier),
        config.session(),
        prefs,
    );
    controller.refresh().await.context("loading catalog")?;

    if let Some(query) = &config.query {
        controller.set_query(query);
    }
    controller.set_category_filter(config.category.as_str());
    if config.toggle_wholesale {
        controller.toggle_wholesale_visibility()?;
    }
    for field in &config.sort {
        let column = controller
            .columns()
            .into_iter()
            .find(|c| c.sort_field() == Some(*field));
        match column {
            Some(column) => {
                controller.sort_by_column(column);
            }
            None => warn!(%field, "Column not shown, sort ignored"),
        }
    }
    if config.grid {
        controller.set_view_mode(ViewMode::Grid);
    }

    let view = controller.view();
    info!(
        shown = view.filtered_count,
        total = view.raw_count,
        "Catalog ready"
    );
    if config.json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        print_view(&view);
    }

    drop(controller);
    backend.shutdown().await.map_err(anyhow::Error::msg)?;
    Ok(())
}

fn print_view(view: &ListView) {
    println!(
        "Total Products: {}   Categories: {}",
        view.stats.total_products, view.stats.categories
    );

    if let Some(empty) = view.empty_state {
        use price_lookup::view_model::EmptyState;
        match empty {
            EmptyState::NoProducts { offer_create } => {
                println!("No products yet");
                if offer_create {
                    println!("Add Your First Product");
                }
            }
            EmptyState::NoMatches => println!("No products found"),
        }
        return;
    }

    match view.view_mode {
        ViewMode::Table => {
            let headers: Vec<String> = view.columns.iter().map(|c| header(*c, view)).collect();
            println!("{}", headers.join(" | "));
            for row in &view.rows {
                let cells: Vec<String> = view.columns.iter().map(|c| cell(row, *c, view)).collect();
                println!("{}", cells.join(" | "));
            }
        }
        ViewMode::Grid => {
            for row in &view.rows {
                println!("[{}] {} ({})", row.icon, row.product.name, row.product.category);
                if let Some(wholesale) = &row.wholesale_label {
                    println!("    Wholesale: {wholesale}");
                }
                println!("    Retail:    {}", row.retail_label);
                println!("    In stock:  {} ({:?})", row.product.quantity, row.stock);
            }
        }
    }
}

// Marks the active sort column the way the table header shows it.
fn header(column: Column, view: &ListView) -> String {
    match column.sort_field() {
        Some(field) if field == view.sort.field => {
            let arrow = match view.sort.direction {
                SortDirection::Asc => "▲",
                SortDirection::Desc => "▼",
            };
            format!("{} {arrow}", column.header())
        }
        _ => column.header().to_string(),
    }
}

fn cell(row: &ProductRow, column: Column, view: &ListView) -> String {
    match column {
        Column::Name => row.product.name.clone(),
        Column::Category => row.product.category.clone(),
        Column::WholesalePrice => row.wholesale_label.clone().unwrap_or_default(),
        Column::RetailPrice => row.retail_label.clone(),
        Column::Quantity => row.product.quantity.to_string(),
        Column::ExpiryDate => row
            .product
            .expiry_date
            .map(|d| d.to_string())
            .unwrap_or_else(|| "-".to_string()),
        Column::Actions => {
            let mut actions = Vec::new();
            if view.permissions.can_edit {
                actions.push("edit");
            }
            if view.permissions.can_delete {
                actions.push("delete");
            }
            actions.join(",")
        }
    }
}
