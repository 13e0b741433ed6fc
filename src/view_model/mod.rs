//! # Product List View-Model
//!
//! Everything the product list page shows, derived from the loaded collections and the
//! user's choices. No I/O happens here except the visibility toggle's write-through.
//!
//! ## State
//!
//! | Field | Changed by | Persisted |
//! |-------|------------|-----------|
//! | products, categories | [`set_products`](ProductListViewModel::set_products), [`set_categories`](ProductListViewModel::set_categories) | no |
//! | query, category filter | `set_query`, `set_category_filter` | no |
//! | sort | `set_sort` (toggle policy) | no |
//! | view mode | `set_view_mode` | no |
//! | wholesale visibility | `toggle_wholesale_visibility` | yes, key `showWholesale` |
//!
//! ## Example
//!
//! ```rust
//! use price_lookup::local::MemoryKv;
//! use price_lookup::model::{Role, SessionContext, User};
//! use price_lookup::view_model::{EmptyState, ProductListViewModel};
//! use std::sync::Arc;
//!
//! let session = SessionContext::for_role(User::new("u-1", "a@b.test"), Role::Viewer);
//! let vm = ProductListViewModel::new(session, Arc::new(MemoryKv::new()));
//! let view = vm.view();
//! assert_eq!(view.empty_state, Some(EmptyState::NoProducts { offer_create: false }));
//! ```

pub mod filter;
pub mod permissions;
pub mod sort;
pub mod visibility;

pub use filter::*;
pub use permissions::*;
pub use sort::*;
pub use visibility::*;

use crate::icons::{icon_for, IconId};
use crate::local::{KeyValueStore, KvError};
use crate::model::{Category, Product, SessionContext, StockStatus};
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Table,
    Grid,
}

/// Why the list has no rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EmptyState {
    /// The catalog itself is empty; offer the create action when allowed.
    NoProducts { offer_create: bool },
    /// Products exist but the current filters exclude all of them.
    NoMatches,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Column {
    Name,
    Category,
    WholesalePrice,
    RetailPrice,
    Quantity,
    ExpiryDate,
    Actions,
}

impl Column {
    pub fn header(&self) -> &'static str {
        match self {
            Column::Name => "Product Name",
            Column::Category => "Category",
            Column::WholesalePrice => "Wholesale Price",
            Column::RetailPrice => "Retail Price",
            Column::Quantity => "Quantity",
            Column::ExpiryDate => "Expiry Date",
            Column::Actions => "Actions",
        }
    }

    /// The sort a header click selects, if the column is sortable.
    pub fn sort_field(&self) -> Option<SortField> {
        match self {
            Column::Name => Some(SortField::Name),
            Column::Category => Some(SortField::Category),
            Column::WholesalePrice => Some(SortField::WholesalePrice),
            Column::RetailPrice => Some(SortField::RetailPrice),
            Column::Quantity => Some(SortField::Quantity),
            Column::ExpiryDate | Column::Actions => None,
        }
    }
}

/// Header cards on the list page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CatalogStats {
    pub total_products: usize,
    pub categories: usize,
}

/// One product ready to display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductRow {
    pub product: Product,
    pub icon: IconId,
    /// `None` while wholesale prices are hidden.
    pub wholesale_label: Option<String>,
    pub retail_label: String,
    pub stock: StockStatus,
}

impl ProductRow {
    fn new(product: &Product, show_wholesale: bool) -> Self {
        Self {
            icon: icon_for(product.icon.as_deref()),
            wholesale_label: show_wholesale.then(|| product.wholesale_label()),
            retail_label: product.retail_label(),
            stock: product.stock_status(),
            product: product.clone(),
        }
    }
}

/// Render-ready snapshot of the list page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListView {
    pub rows: Vec<ProductRow>,
    pub raw_count: usize,
    pub filtered_count: usize,
    pub empty_state: Option<EmptyState>,
    pub permissions: Permissions,
    pub show_wholesale: bool,
    pub view_mode: ViewMode,
    pub sort: SortState,
    pub query: String,
    pub category_filter: CategoryFilter,
    pub category_options: Vec<String>,
    pub stats: CatalogStats,
    pub columns: Vec<Column>,
}

impl ListView {
    pub fn row_names(&self) -> Vec<&str> {
        self.rows.iter().map(|r| r.product.name.as_str()).collect()
    }
}

pub struct ProductListViewModel {
    session: SessionContext,
    products: Vec<Product>,
    categories: Vec<Category>,
    query: String,
    category_filter: CategoryFilter,
    sort: SortState,
    view_mode: ViewMode,
    wholesale: WholesaleVisibility,
}

impl ProductListViewModel {
    /// Starts empty, sorted by name ascending, in table mode. The wholesale flag is read from `kv`.
    pub fn new(session: SessionContext, kv: Arc<dyn KeyValueStore>) -> Self {
        Self {
            session,
            products: Vec::new(),
            categories: Vec::new(),
            query: String::new(),
            category_filter: CategoryFilter::All,
            sort: SortState::default(),
            view_mode: ViewMode::default(),
            wholesale: WholesaleVisibility::load(kv),
        }
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn set_products(&mut self, products: Vec<Product>) {
        self.products = products;
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn set_categories(&mut self, categories: Vec<Category>) {
        self.categories = categories;
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, text: impl Into<String>) {
        self.query = text.into();
    }

    pub fn category_filter(&self) -> &CategoryFilter {
        &self.category_filter
    }

    pub fn set_category_filter(&mut self, filter: impl Into<CategoryFilter>) {
        self.category_filter = filter.into();
    }

    pub fn sort(&self) -> SortState {
        self.sort
    }

    pub fn set_sort(&mut self, field: SortField) {
        self.sort.set_sort(field);
    }

    /// Header click. Only shown, sortable columns change the sort.
    pub fn sort_by_column(&mut self, column: Column) -> bool {
        match column.sort_field() {
            Some(field) if self.columns().contains(&column) => {
                self.set_sort(field);
                true
            }
            _ => false,
        }
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.view_mode = mode;
    }

    pub fn show_wholesale(&self) -> bool {
        self.wholesale.is_visible()
    }

    pub fn toggle_wholesale_visibility(&mut self) -> Result<bool, KvError> {
        self.wholesale.toggle()
    }

    pub fn permissions(&self) -> Permissions {
        permissions_for(&self.session)
    }

    /// Filtered products in the current sort order.
    pub fn visible_products(&self) -> Vec<&Product> {
        let filtered = filtered_view(&self.products, &self.query, &self.category_filter);
        sorted_view(filtered, self.sort.field, self.sort.direction)
    }

    pub fn columns(&self) -> Vec<Column> {
        let mut columns = vec![Column::Name, Column::Category];
        if self.show_wholesale() {
            columns.push(Column::WholesalePrice);
        }
        columns.extend([Column::RetailPrice, Column::Quantity, Column::ExpiryDate]);
        if self.permissions().has_row_actions() {
            columns.push(Column::Actions);
        }
        columns
    }

    pub fn view(&self) -> ListView {
        let permissions = self.permissions();
        let show_wholesale = self.show_wholesale();
        let rows: Vec<ProductRow> = self
            .visible_products()
            .into_iter()
            .map(|p| ProductRow::new(p, show_wholesale))
            .collect();

        let empty_state = if self.products.is_empty() {
            Some(EmptyState::NoProducts {
                offer_create: permissions.can_create,
            })
        } else if rows.is_empty() {
            Some(EmptyState::NoMatches)
        } else {
            None
        };

        let category_options = std::iter::once(ALL_CATEGORIES.to_string())
            .chain(self.categories.iter().map(|c| c.name.clone()))
            .collect();

        ListView {
            raw_count: self.products.len(),
            filtered_count: rows.len(),
            rows,
            empty_state,
            permissions,
            show_wholesale,
            view_mode: self.view_mode,
            sort: self.sort,
            query: self.query.clone(),
            category_filter: self.category_filter.clone(),
            category_options,
            stats: CatalogStats {
                total_products: self.products.len(),
                categories: self.categories.len(),
            },
            columns: self.columns(),
        }
    }
}
