//! Command-line and environment configuration for the `price-lookup` binary.

use crate::model::{Role, SessionContext, User};
use crate::view_model::SortField;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "price-lookup", about = "Inventory price lookup", version)]
pub struct AppConfig {
    /// JSON file for device preferences (wholesale toggle, local product mirror).
    /// Kept in memory when unset.
    #[arg(long, value_name = "PATH", env = "PRICE_LOOKUP_PREFS")]
    pub prefs: Option<PathBuf>,

    /// JSON seed with `categories` (names) and `products` (form data)
    #[arg(long, value_name = "PATH", env = "PRICE_LOOKUP_SEED")]
    pub seed: Option<PathBuf>,

    /// Keep products in the legacy local mirror inside the preferences store
    #[arg(long, env = "PRICE_LOOKUP_LOCAL_MIRROR")]
    pub local_mirror: bool,

    /// Role of the signed-in user: admin, editor or viewer
    #[arg(long, default_value = "viewer", env = "PRICE_LOOKUP_ROLE")]
    pub role: Role,

    /// Email of the signed-in user
    #[arg(long, default_value = "staff@pharmacy.local", env = "PRICE_LOOKUP_USER")]
    pub user: String,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "info", env = "PRICE_LOOKUP_LOG")]
    pub log: String,

    /// Request queue capacity of each store
    #[arg(long, default_value = "32", env = "PRICE_LOOKUP_BUFFER")]
    pub buffer: usize,

    /// Free-text filter on product name or category
    #[arg(short, long)]
    pub query: Option<String>,

    /// Category name, or "all"
    #[arg(short, long, default_value = "all")]
    pub category: String,

    /// Sort column; repeating the same column flips the direction
    #[arg(short, long, value_name = "FIELD")]
    pub sort: Vec<SortField>,

    /// Flip the persisted wholesale visibility before printing
    #[arg(long)]
    pub toggle_wholesale: bool,

    /// Print cards instead of a table
    #[arg(long)]
    pub grid: bool,

    /// Print the list view as JSON
    #[arg(long)]
    pub json: bool,
}

impl AppConfig {
    pub fn session(&self) -> SessionContext {
        SessionContext::for_role(User::new(self.user.clone(), self.user.clone()), self.role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::try_parse_from(["price-lookup"]).unwrap();
        assert_eq!(config.role, Role::Viewer);
        assert_eq!(config.category, "all");
        assert!(config.sort.is_empty());
        assert!(!config.session().can_edit());
    }

    #[test]
    fn test_repeated_sort_and_role() {
        let config = AppConfig::try_parse_from([
            "price-lookup",
            "--role",
            "admin",
            "--sort",
            "retail_price",
            "--sort",
            "retail_price",
            "-q",
            "ana",
        ])
        .unwrap();
        assert_eq!(config.sort, vec![SortField::RetailPrice, SortField::RetailPrice]);
        assert!(config.session().is_admin());
        assert_eq!(config.query.as_deref(), Some("ana"));
    }

    #[test]
    fn test_unknown_role_is_rejected() {
        assert!(AppConfig::try_parse_from(["price-lookup", "--role", "owner"]).is_err());
    }
}
