#![warn(missing_docs)]
//! Core primitives shared across the workspace.

pub mod id;

use rand::{rngs::StdRng, SeedableRng};
use serde::{Deserialize, Serialize};

pub use id::InteractableId;

/// Monotonic frame counter driving every interactor update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FrameTick(pub u64);

impl FrameTick {
    /// First frame in any deterministic timeline.
    pub const ZERO: Self = Self(0);

    /// Advance by `delta` frames.
    pub fn advance(self, delta: u64) -> Self {
        Self(self.0 + delta)
    }
}

/// Helper to derive a reproducible RNG for a scenario seed at a given frame.
pub fn scoped_rng(seed: u64, frame: FrameTick) -> StdRng {
    StdRng::seed_from_u64(seed ^ frame.0.rotate_left(32))
}
