//! The poke interactor: one probe, many interactables.

use crate::geometry::{depth, distance_above, distance_from};
use crate::ranking::{compute_hover_candidate, compute_press_candidate, Candidate, RankingContext};
use crate::{
    Interactable, InteractableRegistry, InteractionError, InteractorConfig, PointerEvent,
    PointerEventKind, TouchSample, TouchTracker,
};
use glam::{Mat4, Vec3};
use handpoke_core::{FrameTick, InteractableId};
use handpoke_math::{is_finite_vec3, look_rotation, Pose};
use std::collections::HashMap;
use tracing::{debug, trace, warn};

/// Lifecycle state of an interactor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InteractorState {
    /// Ignores frames until re-enabled.
    Disabled,
    /// Nothing hovered.
    Normal,
    /// Hovering an interactable.
    Hover,
    /// Pressing an interactable.
    Select,
}

/// Per-frame input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInput {
    /// Probe position in world space.
    pub origin: Vec3,
    /// Seconds since the previous frame.
    pub delta_seconds: f32,
}

impl FrameInput {
    /// Input for one frame.
    pub fn new(origin: Vec3, delta_seconds: f32) -> Self {
        Self { origin, delta_seconds }
    }
}

enum PressOutcome {
    Hold,
    Release,
    Cancel,
}

/// Tracks a probe against an [`InteractableRegistry`], one frame at a time.
#[derive(Debug)]
pub struct PokeInteractor {
    config: InteractorConfig,
    state: InteractorState,
    tick: FrameTick,
    clock: f64,
    initialized: bool,

    origin: Vec3,
    previous_origin: Vec3,
    closest_point: Vec3,
    touch_point: Vec3,
    touch_normal: Vec3,

    hovered: Option<InteractableId>,
    selected: Option<InteractableId>,
    hit: Option<InteractableId>,
    previous_candidate: Option<InteractableId>,
    touch: Option<TouchTracker>,

    surface_snapshots: HashMap<InteractableId, Mat4>,
    events: Vec<PointerEvent>,
}

impl Default for PokeInteractor {
    fn default() -> Self {
        Self::with_valid_config(InteractorConfig::default())
    }
}

impl PokeInteractor {
    /// Interactor with validated settings.
    pub fn new(config: InteractorConfig) -> Result<Self, InteractionError> {
        Ok(Self::with_valid_config(config.validated()?))
    }

    fn with_valid_config(config: InteractorConfig) -> Self {
        Self {
            config,
            state: InteractorState::Normal,
            tick: FrameTick::ZERO,
            clock: 0.0,
            initialized: false,
            origin: Vec3::ZERO,
            previous_origin: Vec3::ZERO,
            closest_point: Vec3::ZERO,
            touch_point: Vec3::ZERO,
            touch_normal: Vec3::Z,
            hovered: None,
            selected: None,
            hit: None,
            previous_candidate: None,
            touch: None,
            surface_snapshots: HashMap::new(),
            events: Vec::new(),
        }
    }

    /// Run one frame.
    pub fn process(&mut self, registry: &InteractableRegistry, input: FrameInput) {
        self.preprocess(input);

        if self.state != InteractorState::Disabled {
            self.drop_stale(registry);
            if self.state == InteractorState::Select {
                self.select_update(registry);
            } else {
                self.rank(registry);
            }
            if let Some(id) = self.selected.or(self.hovered) {
                self.emit(PointerEventKind::Move, id);
            }
        }

        self.postprocess(registry);
        self.tick = self.tick.advance(1);
    }

    fn preprocess(&mut self, input: FrameInput) {
        if input.delta_seconds.is_finite() {
            self.clock += f64::from(input.delta_seconds.max(0.0));
        }
        if !is_finite_vec3(input.origin) {
            warn!(tick = self.tick.0, "non-finite probe origin; holding last position");
            self.previous_origin = self.origin;
            return;
        }
        self.previous_origin = if self.initialized { self.origin } else { input.origin };
        self.origin = input.origin;
        self.initialized = true;
    }

    /// Forget interactables that were unregistered or disabled since last frame.
    fn drop_stale(&mut self, registry: &InteractableRegistry) {
        if let Some(id) = self.selected.filter(|id| !registry.is_listed(*id)) {
            debug!(%id, "pressed interactable left the registry");
            self.emit(PointerEventKind::Cancel, id);
            self.clear_press();
        }
        if let Some(id) = self.hovered.filter(|id| !registry.is_listed(*id)) {
            self.emit(PointerEventKind::HoverExit, id);
            self.hovered = None;
            self.state = InteractorState::Normal;
        }
        if self.previous_candidate.is_some_and(|id| !registry.is_listed(id)) {
            self.previous_candidate = None;
        }
    }

    fn rank(&mut self, registry: &InteractableRegistry) {
        let candidate = {
            let ctx = RankingContext {
                origin: self.origin,
                previous_origin: self.previous_origin,
                radius: self.config.radius,
                equal_distance_threshold: self.config.equal_distance_threshold,
                previous_candidate: self.previous_candidate,
                surface_snapshots: &self.surface_snapshots,
            };
            match compute_press_candidate(&ctx, registry.list()) {
                Some(press) => {
                    self.hit = Some(press.id);
                    Some(press)
                }
                None => compute_hover_candidate(&ctx, registry.list()),
            }
        };
        self.previous_candidate = candidate.map(|c| c.id);

        if let Some(Candidate {
            closest_point,
            touch_normal,
            ..
        }) = candidate
        {
            self.closest_point = closest_point;
            self.touch_point = closest_point;
            self.touch_normal = touch_normal;
        }
        self.update_hover(candidate.map(|c| c.id));

        if let Some(id) = self.hit {
            match registry.get(id) {
                Some(interactable) => self.select(id, interactable),
                None => self.hit = None,
            }
        }
    }

    fn update_hover(&mut self, next: Option<InteractableId>) {
        if self.hovered == next {
            return;
        }
        if let Some(previous) = self.hovered.take() {
            self.emit(PointerEventKind::HoverExit, previous);
        }
        match next {
            Some(id) => {
                self.hovered = Some(id);
                self.state = InteractorState::Hover;
                self.emit(PointerEventKind::HoverEnter, id);
            }
            None => self.state = InteractorState::Normal,
        }
    }

    fn select(&mut self, id: InteractableId, interactable: &Interactable) {
        let transform = interactable.transform();
        let touch_local = transform.inverse_transform_point(self.touch_point);
        let compare_local =
            transform.inverse_transform_point(interactable.closest_surface_point(self.origin));
        self.touch = Some(TouchTracker::begin(
            touch_local,
            compare_local,
            interactable.config().drag_thresholding.ease_curve.clone(),
        ));
        self.selected = Some(id);
        self.state = InteractorState::Select;
        self.emit(PointerEventKind::Select, id);
    }

    fn select_update(&mut self, registry: &InteractableRegistry) {
        let Some(id) = self.selected else {
            self.hit = None;
            return;
        };
        let Some(interactable) = registry.get(id) else {
            self.emit(PointerEventKind::Cancel, id);
            self.clear_press();
            return;
        };

        match self.track_press(interactable) {
            PressOutcome::Hold => {}
            PressOutcome::Release => {
                self.emit(PointerEventKind::Unselect, id);
                self.clear_press();
                self.hover_update(interactable);
            }
            PressOutcome::Cancel => {
                self.emit(PointerEventKind::Cancel, id);
                self.clear_press();
                self.previous_origin = self.origin;
                self.previous_candidate = None;
            }
        }
    }

    fn track_press(&mut self, interactable: &Interactable) -> PressOutcome {
        let radius = self.config.radius;
        if distance_above(interactable, self.origin, radius) > self.config.touch_release_threshold {
            return PressOutcome::Release;
        }

        let transform = *interactable.transform();
        let surface_point =
            transform.inverse_transform_point(interactable.closest_surface_point(self.origin));
        if !is_finite_vec3(surface_point) {
            warn!(tick = self.tick.0, "non-finite touch point; cancelling press");
            return PressOutcome::Cancel;
        }
        let depth_delta = (depth(interactable, self.origin, radius)
            - depth(interactable, self.previous_origin, radius))
        .abs();

        let Some(tracker) = self.touch.as_mut() else {
            return PressOutcome::Release;
        };
        let config = interactable.config();
        let was_dragging = tracker.is_dragging();
        let eased = tracker.update(
            &TouchSample {
                surface_point,
                depth_delta,
                transform,
                now: self.clock,
            },
            &config.drag_thresholding,
            &config.position_pinning,
        );
        if tracker.is_dragging() != was_dragging {
            trace!(tick = self.tick.0, dragging = tracker.is_dragging(), "drag state changed");
        }

        self.touch_point = transform.transform_point(eased);
        self.touch_normal = interactable.closest_surface_normal(self.touch_point);

        if config.release_distance > 0.0
            && distance_from(interactable, self.origin, radius) > config.release_distance
        {
            return PressOutcome::Cancel;
        }
        PressOutcome::Hold
    }

    fn hover_update(&mut self, interactable: &Interactable) {
        self.touch_point = interactable.compute_closest_point(self.origin);
        self.touch_normal = interactable.closest_surface_normal(self.touch_point);
    }

    fn clear_press(&mut self) {
        self.selected = None;
        self.hit = None;
        self.touch = None;
        self.state = if self.hovered.is_some() {
            InteractorState::Hover
        } else {
            InteractorState::Normal
        };
    }

    fn postprocess(&mut self, registry: &InteractableRegistry) {
        for (id, interactable) in registry.list() {
            self.surface_snapshots
                .insert(id, interactable.transform().world_to_local_matrix());
        }
        self.surface_snapshots.retain(|id, _| registry.is_listed(*id));
    }

    fn emit(&mut self, kind: PointerEventKind, interactable: InteractableId) {
        if kind == PointerEventKind::Move {
            trace!(tick = self.tick.0, %interactable, "move");
        } else {
            debug!(tick = self.tick.0, %interactable, event = kind.label(), "pointer event");
        }
        self.events.push(PointerEvent {
            tick: self.tick,
            kind,
            interactable,
            pose: self.pose(),
        });
    }

    /// Drop any press or hover and stop processing frames.
    pub fn disable(&mut self) {
        if self.state == InteractorState::Disabled {
            return;
        }
        if let Some(id) = self.selected {
            self.emit(PointerEventKind::Cancel, id);
        }
        if let Some(id) = self.hovered {
            self.emit(PointerEventKind::HoverExit, id);
        }
        self.selected = None;
        self.hovered = None;
        self.hit = None;
        self.previous_candidate = None;
        self.touch = None;
        self.state = InteractorState::Disabled;
        debug!(tick = self.tick.0, "interactor disabled");
    }

    /// Resume processing frames.
    pub fn enable(&mut self) {
        if self.state == InteractorState::Disabled {
            self.state = InteractorState::Normal;
            debug!(tick = self.tick.0, "interactor enabled");
        }
    }

    /// Pointer pose: the touch point looking along the surface normal, or
    /// identity when nothing is hovered or pressed.
    pub fn pose(&self) -> Pose {
        if self.selected.or(self.hovered).is_none() {
            return Pose::IDENTITY;
        }
        Pose::new(self.touch_point, look_rotation(self.touch_normal, Vec3::Y))
    }

    /// Take every event emitted since the last drain.
    pub fn drain_events(&mut self) -> Vec<PointerEvent> {
        std::mem::take(&mut self.events)
    }

    /// Events emitted since the last drain.
    pub fn events(&self) -> &[PointerEvent] {
        &self.events
    }

    pub fn config(&self) -> &InteractorConfig {
        &self.config
    }

    pub fn state(&self) -> InteractorState {
        self.state
    }

    /// Frame about to be processed.
    pub fn tick(&self) -> FrameTick {
        self.tick
    }

    /// Seconds accumulated from frame deltas.
    pub fn clock(&self) -> f64 {
        self.clock
    }

    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    pub fn previous_origin(&self) -> Vec3 {
        self.previous_origin
    }

    /// Closest point found by the last ranking pass.
    pub fn closest_point(&self) -> Vec3 {
        self.closest_point
    }

    pub fn touch_point(&self) -> Vec3 {
        self.touch_point
    }

    pub fn touch_normal(&self) -> Vec3 {
        self.touch_normal
    }

    pub fn hovered(&self) -> Option<InteractableId> {
        self.hovered
    }

    pub fn selected(&self) -> Option<InteractableId> {
        self.selected
    }

    /// Winner of the last ranking pass.
    pub fn previous_candidate(&self) -> Option<InteractableId> {
        self.previous_candidate
    }

    pub fn is_dragging(&self) -> bool {
        self.touch.as_ref().is_some_and(TouchTracker::is_dragging)
    }

    /// Touch stabilization state while pressing.
    pub fn touch_tracker(&self) -> Option<&TouchTracker> {
        self.touch.as_ref()
    }
}
