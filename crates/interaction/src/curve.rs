//! Time-driven progress curves used to ease the touch point.

use serde::{Deserialize, Serialize};

/// Shape of a progress curve over normalized time `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EaseCurve {
    /// Progress equals normalized time.
    Linear,
    /// Smoothstep: zero slope at both ends.
    #[default]
    EaseInOut,
}

impl EaseCurve {
    /// Evaluate at normalized time `t` (clamped to `[0, 1]`).
    pub fn evaluate(self, t: f32) -> f32 {
        let t = handpoke_math::clamp01(t);
        match self {
            EaseCurve::Linear => t,
            EaseCurve::EaseInOut => t * t * (3.0 - 2.0 * t),
        }
    }
}

/// A curve played over `duration` seconds from an explicit start time.
///
/// A curve that was never started reports full progress, so easing is a
/// no-op until something calls [`ProgressCurve::start`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressCurve {
    /// Curve shape.
    pub curve: EaseCurve,
    /// Seconds from 0 to full progress; non-positive means instantaneous.
    pub duration: f32,
    #[serde(skip)]
    started_at: Option<f64>,
}

impl Default for ProgressCurve {
    fn default() -> Self {
        Self::new(EaseCurve::EaseInOut, 0.05)
    }
}

impl ProgressCurve {
    /// Unstarted curve.
    pub fn new(curve: EaseCurve, duration: f32) -> Self {
        Self {
            curve,
            duration,
            started_at: None,
        }
    }

    /// Restart from zero progress at `now` (seconds).
    pub fn start(&mut self, now: f64) {
        self.started_at = Some(now);
    }

    /// Forget any start time; progress returns to 1.
    pub fn reset(&mut self) {
        self.started_at = None;
    }

    /// True once [`start`](Self::start) has been called since the last reset.
    pub fn is_started(&self) -> bool {
        self.started_at.is_some()
    }

    /// Progress in `[0, 1]` at `now`.
    pub fn progress(&self, now: f64) -> f32 {
        let Some(started_at) = self.started_at else {
            return 1.0;
        };
        if self.duration <= 0.0 {
            return self.curve.evaluate(1.0);
        }
        self.curve.evaluate(((now - started_at) / f64::from(self.duration)) as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn curves_hit_endpoints() {
        for curve in [EaseCurve::Linear, EaseCurve::EaseInOut] {
            assert_eq!(curve.evaluate(0.0), 0.0);
            assert_eq!(curve.evaluate(1.0), 1.0);
            assert_eq!(curve.evaluate(2.0), 1.0);
            assert_eq!(curve.evaluate(-1.0), 0.0);
        }
        assert!((EaseCurve::EaseInOut.evaluate(0.5) - 0.5).abs() < 1e-6);
        assert!(EaseCurve::EaseInOut.evaluate(0.25) < 0.25);
    }

    #[test]
    fn unstarted_curve_is_complete() {
        let curve = ProgressCurve::default();
        assert!(!curve.is_started());
        assert_eq!(curve.progress(0.0), 1.0);
    }

    #[test]
    fn started_curve_ramps_then_saturates() {
        let mut curve = ProgressCurve::new(EaseCurve::Linear, 0.1);
        curve.start(1.0);
        assert_eq!(curve.progress(1.0), 0.0);
        assert!((curve.progress(1.05) - 0.5).abs() < 1e-4);
        assert_eq!(curve.progress(1.2), 1.0);
        curve.reset();
        assert_eq!(curve.progress(1.0), 1.0);
    }

    #[test]
    fn keeps_resolution_deep_into_a_session() {
        // A day and change of accumulated frame time.
        let start = 100_000.0;
        let mut curve = ProgressCurve::new(EaseCurve::Linear, 0.05);
        curve.start(start);
        assert!((curve.progress(start + 0.0005) - 0.01).abs() < 1e-4);
        assert!((curve.progress(start + 0.025) - 0.5).abs() < 1e-4);
    }

    #[test]
    fn zero_duration_is_instant() {
        let mut curve = ProgressCurve::new(EaseCurve::EaseInOut, 0.0);
        curve.start(3.0);
        assert_eq!(curve.progress(3.0), 1.0);
    }

    #[test]
    fn deserializes_from_toml() {
        let curve: ProgressCurve = toml::from_str("curve = \"linear\"\nduration = 0.2").unwrap();
        assert_eq!(curve.curve, EaseCurve::Linear);
        assert_eq!(curve.duration, 0.2);
        assert!(!curve.is_started());
    }
}
