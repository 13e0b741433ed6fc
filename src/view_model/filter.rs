//! Search and category filtering.

use crate::model::Product;
use serde::{Serialize, Serializer};

/// Sentinel the category picker uses for "no category filter".
pub const ALL_CATEGORIES: &str = "all";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Named(String),
}

impl CategoryFilter {
    /// Exact, case-sensitive match on the category name.
    pub fn matches(&self, category: &str) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Named(name) => name == category,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            CategoryFilter::All => ALL_CATEGORIES,
            CategoryFilter::Named(name) => name,
        }
    }
}

impl Serialize for CategoryFilter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl From<&str> for CategoryFilter {
    fn from(value: &str) -> Self {
        if value == ALL_CATEGORIES {
            CategoryFilter::All
        } else {
            CategoryFilter::Named(value.to_string())
        }
    }
}

/// Case-insensitive substring match on name or category. An empty query matches everything.
pub fn matches_query(product: &Product, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let needle = query.to_lowercase();
    product.name.to_lowercase().contains(&needle)
        || product.category.to_lowercase().contains(&needle)
}

/// Products passing both the query and the category filter, in input order.
pub fn filtered_view<'a>(
    products: &'a [Product],
    query: &str,
    category_filter: &CategoryFilter,
) -> Vec<&'a Product> {
    products
        .iter()
        .filter(|p| matches_query(p, query) && category_filter.matches(&p.category))
        .collect()
}
