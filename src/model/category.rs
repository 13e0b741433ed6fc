use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for Categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(pub u32);

impl From<u32> for CategoryId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for CategoryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "category_{}", self.0)
    }
}

/// A product grouping. Products refer to it by name only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// Payload for creating a Category.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryCreate {
    pub name: String,
}

impl CategoryCreate {
    /// Trims the name; `None` when nothing is left.
    pub fn new(name: &str) -> Option<Self> {
        let name = name.trim();
        if name.is_empty() {
            None
        } else {
            Some(Self {
                name: name.to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_trims_name() {
        let create = CategoryCreate::new("  Vitamins ").unwrap();
        assert_eq!(create.name, "Vitamins");
    }

    #[test]
    fn test_blank_name_is_rejected() {
        assert!(CategoryCreate::new("   ").is_none());
        assert!(CategoryCreate::new("").is_none());
    }

    #[test]
    fn test_id_display() {
        assert_eq!(CategoryId(4).to_string(), "category_4");
    }
}
