//! Touch-point stabilization while a surface is pressed.
//!
//! All points are in the pressed surface's local space; distances compared
//! against thresholds are converted to world space first.

use crate::{DragThresholdingConfig, PositionPinningConfig, ProgressCurve};
use glam::Vec3;
use handpoke_math::{clamp01, Transform};

/// One frame of input for [`TouchTracker::update`].
#[derive(Debug, Clone, Copy)]
pub struct TouchSample {
    /// Closest surface point to the probe, surface-local.
    pub surface_point: Vec3,
    /// Absolute change in penetration depth since last frame, world units.
    pub depth_delta: f32,
    /// Current surface transform.
    pub transform: Transform,
    /// Interactor clock in seconds.
    pub now: f64,
}

/// Drag thresholding, position pinning and easing state for one press.
#[derive(Debug, Clone)]
pub struct TouchTracker {
    first_touch: Vec3,
    previous_surface_point: Vec3,
    drag_compare_point: Vec3,
    target: Vec3,
    eased: Vec3,
    is_dragging: bool,
    ease_curve: ProgressCurve,
    previous_progress: f32,
    max_drift: f32,
}

impl TouchTracker {
    /// Capture a new press at `touch_point`.
    ///
    /// `compare_point` is the closest surface point to the probe and anchors
    /// lateral drag detection.
    pub fn begin(touch_point: Vec3, compare_point: Vec3, mut ease_curve: ProgressCurve) -> Self {
        ease_curve.reset();
        Self {
            first_touch: touch_point,
            previous_surface_point: touch_point,
            drag_compare_point: compare_point,
            target: touch_point,
            eased: touch_point,
            is_dragging: false,
            ease_curve,
            previous_progress: 0.0,
            max_drift: 0.0,
        }
    }

    /// Advance one frame and return the eased touch point.
    pub fn update(
        &mut self,
        sample: &TouchSample,
        drag: &DragThresholdingConfig,
        pinning: &PositionPinningConfig,
    ) -> Vec3 {
        let surface_point = sample.surface_point;
        let transform = &sample.transform;

        if drag.enabled {
            let lateral = transform
                .transform_vector(surface_point - self.previous_surface_point)
                .length();
            let is_z_motion = sample.depth_delta > lateral && sample.depth_delta > drag.z_threshold;

            if is_z_motion {
                self.drag_compare_point = surface_point;
            }

            if !self.is_dragging {
                if !is_z_motion {
                    let from_anchor = transform
                        .transform_vector(surface_point - self.drag_compare_point)
                        .length();
                    if from_anchor > drag.surface_threshold {
                        self.is_dragging = true;
                        self.ease_curve.start(sample.now);
                        self.previous_progress = 0.0;
                        self.target = surface_point;
                    }
                }
            } else if is_z_motion {
                self.is_dragging = false;
            } else {
                self.target = surface_point;
            }
        } else {
            self.target = surface_point;
        }

        let mut pinned = self.target;
        if pinning.enabled {
            let delta = pinned - self.first_touch;
            self.max_drift = self.max_drift.max(transform.transform_vector(delta).length());
            let ratio = if pinning.max_pin_distance != 0.0 {
                clamp01(self.max_drift / pinning.max_pin_distance)
            } else {
                1.0
            };
            pinned = self.first_touch + delta * ratio;
        }

        let progress = self.ease_curve.progress(sample.now);
        if progress < 1.0 {
            let step = (progress - self.previous_progress) / (1.0 - self.previous_progress);
            self.eased += step * (pinned - self.eased);
            self.previous_progress = progress;
        } else {
            self.eased = pinned;
        }

        self.previous_surface_point = surface_point;
        self.eased
    }

    /// Local point of first contact.
    pub fn first_touch(&self) -> Vec3 {
        self.first_touch
    }

    /// Where the touch point is heading.
    pub fn target(&self) -> Vec3 {
        self.target
    }

    /// Current eased touch point.
    pub fn eased(&self) -> Vec3 {
        self.eased
    }

    /// Lateral motion has crossed the drag threshold.
    pub fn is_dragging(&self) -> bool {
        self.is_dragging
    }

    /// Largest world distance the target has drifted from first contact.
    pub fn max_drift(&self) -> f32 {
        self.max_drift
    }
}
