//! Near-field poke interaction.
//!
//! A [`PokeInteractor`] follows a probe point (typically a fingertip) and,
//! once per frame, decides which registered [`Interactable`] it is hovering
//! over or pressing into. While pressed it tracks a stabilized touch point
//! with drag thresholding, position pinning and easing.
//!
//! # Frame order
//!
//! Each call to [`PokeInteractor::process`] runs:
//!
//! 1. preprocess: the previous origin becomes the last frame's origin
//! 2. ranking (when not pressing): press candidates first, then hover
//! 3. state transitions and touch-point tracking
//! 4. postprocess: every listed surface's transform is snapshotted so the
//!    next frame can compensate for surfaces that moved
//!
//! # Example
//!
//! ```rust
//! use glam::{Vec2, Vec3};
//! use handpoke_interaction::{FrameInput, Interactable, InteractableRegistry, PokeInteractor};
//! use handpoke_math::Transform;
//! use handpoke_physics::{BoxProximityField, Facing, RectSurface};
//!
//! let mut registry = InteractableRegistry::new();
//! let button = Interactable::builder()
//!     .surface(RectSurface::new(Transform::IDENTITY, Vec2::splat(0.05), Facing::Forward))
//!     .proximity_field(BoxProximityField::new(
//!         Transform::IDENTITY.with_scale(Vec3::new(0.05, 0.05, 0.01)),
//!     ))
//!     .build()
//!     .expect("surface and proximity field are set");
//! let id = registry.register(button);
//!
//! let mut finger = PokeInteractor::default();
//! for z in [0.05, 0.02, -0.002] {
//!     finger.process(&registry, FrameInput::new(Vec3::new(0.0, 0.0, z), 1.0 / 90.0));
//! }
//! assert_eq!(finger.selected(), Some(id));
//! ```

pub mod config;
pub mod curve;
pub mod events;
pub mod geometry;
pub mod interactable;
pub mod interactor;
pub mod ranking;
pub mod registry;
pub mod touch;

pub use config::{
    DragThresholdingConfig, InteractableConfig, InteractorConfig, PositionPinningConfig,
};
pub use curve::{EaseCurve, ProgressCurve};
pub use events::{PointerEvent, PointerEventKind};
pub use interactable::{Interactable, InteractableBuilder};
pub use interactor::{FrameInput, InteractorState, PokeInteractor};
pub use ranking::{Candidate, RankingContext};
pub use registry::InteractableRegistry;
pub use touch::{TouchSample, TouchTracker};

pub use handpoke_core::{FrameTick, InteractableId};

use thiserror::Error;

/// Errors raised while wiring interactables together.
///
/// These are configuration faults caught at build/registration time; the
/// per-frame path never fails.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum InteractionError {
    /// The builder was not given a surface.
    #[error("interactable has no surface")]
    MissingSurface,
    /// The builder was not given a proximity field.
    #[error("interactable has no proximity field")]
    MissingProximityField,
    /// A distance or threshold is negative or not finite.
    #[error("invalid {field}: {value}")]
    InvalidConfig {
        /// Name of the rejected setting.
        field: &'static str,
        /// Rejected value.
        value: f32,
    },
    /// The id does not name a registered interactable.
    #[error("unknown {0}")]
    UnknownInteractable(InteractableId),
}
