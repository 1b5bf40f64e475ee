use anyhow::Context;
use glam::Vec3;
use serde::Deserialize;
use std::{fs, path::Path};

#[derive(Debug, Deserialize)]
struct ScriptedProbeFile {
    #[serde(default)]
    start: [f32; 3],
    steps: Vec<ScriptedStep>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
struct ScriptedStep {
    duration: f32,
    to: [f32; 3],
}

/// Replays a probe path: straight segments from the start point through each
/// step's `to`, each taking `duration` seconds.
#[derive(Debug, Clone)]
pub struct ScriptedProbePlayer {
    start: Vec3,
    steps: Vec<ScriptedStep>,
    elapsed: f32,
}

impl ScriptedProbePlayer {
    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read probe script {}", path.display()))?;
        Self::from_json(&contents)
            .with_context(|| format!("invalid probe script {}", path.display()))
    }

    pub fn from_json(contents: &str) -> anyhow::Result<Self> {
        let file: ScriptedProbeFile = serde_json::from_str(contents)?;
        if file.steps.is_empty() {
            anyhow::bail!("probe script contains no steps");
        }
        let invalid = |s: &&ScriptedStep| !(s.duration.is_finite() && s.duration >= 0.0);
        if let Some(step) = file.steps.iter().find(invalid) {
            anyhow::bail!("probe step duration must be non-negative, got {}", step.duration);
        }
        Ok(Self {
            start: Vec3::from_array(file.start),
            steps: file.steps,
            elapsed: 0.0,
        })
    }

    /// Seconds until the last step finishes.
    pub fn total_duration(&self) -> f32 {
        self.steps.iter().map(|s| s.duration).sum()
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.total_duration()
    }

    /// Advance the clock by `dt` and return the probe position.
    pub fn advance(&mut self, dt: f32) -> Vec3 {
        self.elapsed += dt.max(0.0);
        self.position_at(self.elapsed)
    }

    /// Probe position `time` seconds into the script; holds the last target
    /// once the script is over.
    pub fn position_at(&self, time: f32) -> Vec3 {
        let mut from = self.start;
        let mut remaining = time;
        for step in &self.steps {
            let to = Vec3::from_array(step.to);
            if remaining < step.duration {
                return from.lerp(to, remaining / step.duration);
            }
            remaining -= step.duration;
            from = to;
        }
        from
    }
}
