//! Pointer lifecycle events.

use handpoke_core::{FrameTick, InteractableId};
use handpoke_math::Pose;
use serde::{Deserialize, Serialize};

/// What happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerEventKind {
    /// Started hovering an interactable.
    HoverEnter,
    /// Stopped hovering an interactable.
    HoverExit,
    /// Pressed an interactable.
    Select,
    /// Lifted off a pressed interactable.
    Unselect,
    /// Press aborted without a release.
    Cancel,
    /// Pose changed while hovering or pressing.
    Move,
}

impl PointerEventKind {
    /// Stable lowercase name for logs.
    pub fn label(self) -> &'static str {
        match self {
            PointerEventKind::HoverEnter => "hover_enter",
            PointerEventKind::HoverExit => "hover_exit",
            PointerEventKind::Select => "select",
            PointerEventKind::Unselect => "unselect",
            PointerEventKind::Cancel => "cancel",
            PointerEventKind::Move => "move",
        }
    }
}

/// A single event emitted by an interactor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    /// Frame the event was emitted on.
    pub tick: FrameTick,
    /// Event type.
    pub kind: PointerEventKind,
    /// Interactable involved.
    pub interactable: InteractableId,
    /// Pointer pose at emission.
    pub pose: Pose,
}
