//! Stable interactable identities.
//!
//! Ids are handed out by the interactable registry and never reused within a
//! registry's lifetime, so they can key per-interactor caches (transform
//! snapshots, previous candidates) without dangling.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of a registered interactable.
///
/// Ordering is by allocation order and is stable across runs, which gives the
/// ranking engine a deterministic last-resort tie-break.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct InteractableId(u32);

impl InteractableId {
    /// Wrap a raw slot index.
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Raw slot index.
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Slot index as `usize` for arena lookups.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for InteractableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "interactable#{}", self.0)
    }
}
