//! At most one outstanding request per user action and target.
//!
//! A slot is the action kind plus the id it acts on. Creates have no target, so a
//! second create of the same kind waits for the first.

use serde::Serialize;
use std::collections::HashSet;
use std::fmt::Display;
use std::sync::{Mutex, PoisonError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    CreateProduct,
    UpdateProduct,
    DeleteProduct,
    CreateCategory,
    DeleteCategory,
}

impl Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            ActionKind::CreateProduct => "add product",
            ActionKind::UpdateProduct => "update product",
            ActionKind::DeleteProduct => "delete product",
            ActionKind::CreateCategory => "add category",
            ActionKind::DeleteCategory => "delete category",
        })
    }
}

/// The key an outstanding request holds.
pub type Slot = (ActionKind, Option<u32>);

#[derive(Debug, Default)]
pub struct InFlight {
    active: Mutex<HashSet<Slot>>,
}

impl InFlight {
    /// Claims `(kind, target)`, or `None` while that exact action is outstanding.
    pub fn try_begin(&self, kind: ActionKind, target: Option<u32>) -> Option<InFlightGuard<'_>> {
        let slot = (kind, target);
        let inserted = self
            .active
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(slot);
        inserted.then_some(InFlightGuard { owner: self, slot })
    }

    /// True while any request of `kind` is outstanding, whatever its target.
    pub fn is_busy(&self, kind: ActionKind) -> bool {
        self.active
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .any(|(active, _)| *active == kind)
    }

    pub fn is_busy_for(&self, kind: ActionKind, target: Option<u32>) -> bool {
        self.active
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(&(kind, target))
    }
}

/// Releases the slot on drop, including when the request future is cancelled.
#[derive(Debug)]
pub struct InFlightGuard<'a> {
    owner: &'a InFlight,
    slot: Slot,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.owner
            .active
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.slot);
    }
}
