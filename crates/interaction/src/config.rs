//! Tunables for interactors and interactables.
//!
//! Every struct deserializes with `#[serde(default)]`, so scene files only
//! need to spell out what differs from the defaults below. Distances are in
//! meters, durations in seconds.

use crate::{InteractionError, ProgressCurve};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Probe-side settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractorConfig {
    /// Radius of the sphere around the probe origin.
    pub radius: f32,
    /// Unselect once the probe is this far above the pressed surface.
    pub touch_release_threshold: f32,
    /// Distances closer than this are treated as equal when ranking.
    pub equal_distance_threshold: f32,
}

impl Default for InteractorConfig {
    fn default() -> Self {
        Self {
            radius: 0.005,
            touch_release_threshold: 0.002,
            equal_distance_threshold: 0.001,
        }
    }
}

impl InteractorConfig {
    /// Reject negative or non-finite settings.
    pub fn validated(self) -> Result<Self, InteractionError> {
        non_negative("radius", self.radius)?;
        non_negative("touch_release_threshold", self.touch_release_threshold)?;
        non_negative("equal_distance_threshold", self.equal_distance_threshold)?;
        Ok(self)
    }
}

/// Separates intentional drags from lateral wobble during a press.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DragThresholdingConfig {
    /// Apply thresholding; when off the touch point follows the probe directly.
    pub enabled: bool,
    /// Lateral travel from the compare anchor that starts a drag.
    pub surface_threshold: f32,
    /// Depth change per frame that counts as pressing rather than sliding.
    pub z_threshold: f32,
    /// Easing applied when a drag starts.
    pub ease_curve: ProgressCurve,
}

impl Default for DragThresholdingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            surface_threshold: 0.01,
            z_threshold: 0.01,
            ease_curve: ProgressCurve::default(),
        }
    }
}

/// Limits visible touch-point drift relative to the first contact.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PositionPinningConfig {
    /// Apply pinning.
    pub enabled: bool,
    /// Drift at which the touch point is fully released; 0 disables the ramp.
    pub max_pin_distance: f32,
}

/// Per-interactable settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractableConfig {
    /// Maximum lateral distance from the surface that still registers.
    pub max_distance: f32,
    /// Distance above the surface at which hovering may begin.
    pub enter_hover_distance: f32,
    /// Lateral distance that cancels an active press; 0 never cancels.
    pub release_distance: f32,
    /// Priority for near-equal candidates; higher wins.
    pub tiebreaker_score: i32,
    /// Drag thresholding.
    pub drag_thresholding: DragThresholdingConfig,
    /// Position pinning.
    pub position_pinning: PositionPinningConfig,
}

impl Default for InteractableConfig {
    fn default() -> Self {
        Self {
            max_distance: 0.1,
            enter_hover_distance: 0.0,
            release_distance: 0.25,
            tiebreaker_score: 0,
            drag_thresholding: DragThresholdingConfig::default(),
            position_pinning: PositionPinningConfig::default(),
        }
    }
}

impl InteractableConfig {
    /// Validate distances and clamp `enter_hover_distance` to `max_distance`.
    pub fn validated(mut self) -> Result<Self, InteractionError> {
        non_negative("max_distance", self.max_distance)?;
        non_negative("enter_hover_distance", self.enter_hover_distance)?;
        non_negative("release_distance", self.release_distance)?;
        let drag = &self.drag_thresholding;
        non_negative("drag_thresholding.surface_threshold", drag.surface_threshold)?;
        non_negative("drag_thresholding.z_threshold", drag.z_threshold)?;
        let pinning = &self.position_pinning;
        non_negative("position_pinning.max_pin_distance", pinning.max_pin_distance)?;

        if self.enter_hover_distance > self.max_distance {
            warn!(
                enter_hover_distance = self.enter_hover_distance,
                max_distance = self.max_distance,
                "enter_hover_distance exceeds max_distance; clamping"
            );
            self.enter_hover_distance = self.max_distance;
        }
        Ok(self)
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), InteractionError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(InteractionError::InvalidConfig { field, value })
    }
}
