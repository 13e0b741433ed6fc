//! The per-device "show wholesale prices" toggle.

use crate::local::{KeyValueStore, KvError};
use std::sync::Arc;
use tracing::{debug, warn};

pub const SHOW_WHOLESALE_KEY: &str = "showWholesale";

/// Visibility flag backed by a [`KeyValueStore`]. Absent or unreadable values mean visible.
pub struct WholesaleVisibility {
    kv: Arc<dyn KeyValueStore>,
    visible: bool,
}

impl WholesaleVisibility {
    pub fn load(kv: Arc<dyn KeyValueStore>) -> Self {
        let visible = match kv.get(SHOW_WHOLESALE_KEY) {
            None => true,
            Some(raw) => serde_json::from_str::<bool>(&raw).unwrap_or_else(|e| {
                warn!(value = %raw, error = %e, "Unreadable wholesale toggle, showing");
                true
            }),
        };
        Self { kv, visible }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Flips the flag and writes it through. On a write failure the flag stays flipped
    /// for this session and the error is returned.
    pub fn toggle(&mut self) -> Result<bool, KvError> {
        self.visible = !self.visible;
        let raw = serde_json::to_string(&self.visible)?;
        self.kv.set(SHOW_WHOLESALE_KEY, &raw)?;
        debug!(visible = self.visible, "Wholesale toggle saved");
        Ok(self.visible)
    }
}
