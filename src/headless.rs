use crate::config::SceneConfig;
use crate::scripted_probe::ScriptedProbePlayer;
use anyhow::{Context, Result};
use handpoke_interaction::{
    FrameInput, InteractorState, PointerEvent, PointerEventKind, PokeInteractor,
};
use handpoke_testkit::{EventRecord, JsonlSink};
use std::path::PathBuf;
use tracing::info;

pub struct HeadlessConfig {
    pub scene: SceneConfig,
    pub probe: ScriptedProbePlayer,
    pub frame_rate: f32,
    pub event_log: Option<PathBuf>,
}

/// What a headless run produced.
#[derive(Debug)]
pub struct RunSummary {
    pub frames: u64,
    /// Lifecycle events in emission order; moves are left out.
    pub events: Vec<PointerEvent>,
    pub final_state: InteractorState,
}

impl RunSummary {
    pub fn count(&self, kind: PointerEventKind) -> usize {
        self.events.iter().filter(|e| e.kind == kind).count()
    }
}

pub fn run(mut cfg: HeadlessConfig) -> Result<RunSummary> {
    if !(cfg.frame_rate.is_finite() && cfg.frame_rate > 0.0) {
        anyhow::bail!("frame rate must be positive, got {}", cfg.frame_rate);
    }
    let scene = cfg.scene.build().context("failed to build scene")?;
    let mut finger = PokeInteractor::new(scene.interactor)?;
    let mut sink = cfg.event_log.as_deref().map(JsonlSink::create).transpose()?;

    let dt = 1.0 / cfg.frame_rate;
    let frames = (cfg.probe.total_duration() * cfg.frame_rate).ceil() as u64 + 1;
    let mut events = Vec::new();

    for frame in 0..frames {
        let origin = cfg.probe.advance(if frame == 0 { 0.0 } else { dt });
        finger.process(&scene.registry, FrameInput::new(origin, dt));

        for event in finger.drain_events() {
            if event.kind == PointerEventKind::Move {
                continue;
            }
            info!(
                tick = event.tick.0,
                event = event.kind.label(),
                interactable = %scene.name_of(event.interactable),
                "pointer event"
            );
            if let Some(sink) = sink.as_mut() {
                sink.write(&EventRecord {
                    tick: event.tick,
                    kind: event.kind.label(),
                    interactable: Some(event.interactable),
                    position: event.pose.position.to_array(),
                })?;
            }
            events.push(event);
        }
    }

    if let Some(sink) = sink.as_mut() {
        sink.flush()?;
    }

    Ok(RunSummary {
        frames,
        events,
        final_state: finger.state(),
    })
}
