//! Frame-by-frame probe paths for scenario tests.

use glam::Vec3;
use handpoke_core::{scoped_rng, FrameTick};
use rand::Rng;

/// A probe path sampled once per frame.
///
/// Built from straight segments; every segment ends exactly on its target so
/// scenarios can rely on hitting specific depths.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeTrajectory {
    positions: Vec<Vec3>,
}

impl ProbeTrajectory {
    /// Path holding at `start` for one frame.
    pub fn starting_at(start: Vec3) -> Self {
        Self { positions: vec![start] }
    }

    /// Move in a straight line to `to` over `frames` frames (at least one).
    pub fn line_to(mut self, to: Vec3, frames: usize) -> Self {
        let from = self.last();
        let frames = frames.max(1);
        for i in 1..=frames {
            let t = i as f32 / frames as f32;
            self.positions.push(if i == frames { to } else { from.lerp(to, t) });
        }
        self
    }

    /// Stay put for `frames` frames.
    pub fn hold(mut self, frames: usize) -> Self {
        let at = self.last();
        self.positions.extend(std::iter::repeat(at).take(frames));
        self
    }

    /// Add seeded lateral jitter of at most `amplitude` to every position
    /// after the first, keeping depth unchanged.
    pub fn with_jitter(mut self, seed: u64, amplitude: f32) -> Self {
        for (frame, position) in self.positions.iter_mut().enumerate().skip(1) {
            let mut rng = scoped_rng(seed, FrameTick(frame as u64));
            position.x += rng.gen_range(-amplitude..=amplitude);
            position.y += rng.gen_range(-amplitude..=amplitude);
        }
        self
    }

    /// Last position of the path.
    pub fn last(&self) -> Vec3 {
        self.positions.last().copied().unwrap_or(Vec3::ZERO)
    }

    /// Every sampled position, one per frame.
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    /// Number of frames.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// True for a path with no frames.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}
