//! Poke Interaction Scenarios
//!
//! Drives a `PokeInteractor` through scripted probe paths against flat pads
//! and checks the emitted lifecycle and the stabilized touch point.

use glam::{Vec2, Vec3};
use handpoke_interaction::{
    DragThresholdingConfig, EaseCurve, FrameInput, Interactable, InteractableConfig,
    InteractableId, InteractableRegistry, InteractorState, PointerEventKind, PokeInteractor,
    PositionPinningConfig, ProgressCurve,
};
use handpoke_math::Transform;
use handpoke_physics::{BoxProximityField, Facing, RectSurface, VolumeMask};
use handpoke_testkit::ProbeTrajectory;

const DT: f32 = 1.0 / 90.0;

/// 0.2 m square pad whose touchable side faces +Z.
fn pad(transform: Transform, config: InteractableConfig) -> Interactable {
    Interactable::builder()
        .surface(RectSurface::new(transform, Vec2::splat(0.2), Facing::Forward))
        .proximity_field(BoxProximityField::new(transform.with_scale(Vec3::new(0.2, 0.2, 0.001))))
        .config(config)
        .build()
        .expect("pad is fully specified")
}

struct Rig {
    registry: InteractableRegistry,
    finger: PokeInteractor,
}

impl Rig {
    fn new() -> Self {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
        Self {
            registry: InteractableRegistry::new(),
            finger: PokeInteractor::default(),
        }
    }

    fn add(&mut self, config: InteractableConfig) -> InteractableId {
        self.registry.register(pad(Transform::IDENTITY, config))
    }

    /// Process one frame and return its lifecycle events (moves dropped).
    fn step(&mut self, origin: Vec3) -> Vec<(PointerEventKind, InteractableId)> {
        self.finger.process(&self.registry, FrameInput::new(origin, DT));
        self.finger
            .drain_events()
            .into_iter()
            .filter(|e| e.kind != PointerEventKind::Move)
            .map(|e| (e.kind, e.interactable))
            .collect()
    }

    fn run(&mut self, path: &ProbeTrajectory) -> Vec<(PointerEventKind, InteractableId)> {
        path.positions().iter().flat_map(|p| self.step(*p)).collect()
    }
}

fn at(x: f32, z: f32) -> Vec3 {
    Vec3::new(x, 0.0, z)
}

fn instant_ease() -> ProgressCurve {
    ProgressCurve::new(EaseCurve::Linear, 0.0)
}

#[test]
fn hover_hysteresis_with_enter_equal_to_max() {
    let config = InteractableConfig {
        max_distance: 0.05,
        enter_hover_distance: 0.05,
        ..Default::default()
    };

    // Starting inside the enter zone never hovers.
    let mut rig = Rig::new();
    rig.add(config.clone());
    assert!(rig.step(at(0.0, 0.03)).is_empty());
    assert!(rig.step(at(0.0, 0.02)).is_empty());

    // Coming from above the enter distance hovers within a single frame.
    let mut rig = Rig::new();
    let id = rig.add(config);
    assert!(rig.step(at(0.0, 0.2)).is_empty());
    assert_eq!(rig.step(at(0.0, 0.04)), vec![(PointerEventKind::HoverEnter, id)]);
    // Once hovering, moving deeper inside the zone keeps the hover.
    assert!(rig.step(at(0.0, 0.03)).is_empty());
    assert!(rig.step(at(0.0, 0.02)).is_empty());
    assert_eq!(rig.finger.hovered(), Some(id));

    assert_eq!(rig.step(at(0.0, 0.2)), vec![(PointerEventKind::HoverExit, id)]);
    assert_eq!(rig.finger.state(), InteractorState::Normal);
}

#[test]
fn release_threshold_controls_unselect() {
    let mut rig = Rig::new();
    let id = rig.add(InteractableConfig::default());

    assert_eq!(rig.step(at(0.0, 0.05)), vec![(PointerEventKind::HoverEnter, id)]);
    assert_eq!(rig.step(at(0.0, -0.001)), vec![(PointerEventKind::Select, id)]);

    // Sphere bottom 1 mm above the surface: within the 2 mm release threshold.
    assert!(rig.step(at(0.0, 0.006)).is_empty());
    assert_eq!(rig.finger.selected(), Some(id));

    // 3 mm above: released, still hovering.
    assert_eq!(rig.step(at(0.0, 0.008)), vec![(PointerEventKind::Unselect, id)]);
    assert_eq!(rig.finger.state(), InteractorState::Hover);
    assert_eq!(rig.finger.hovered(), Some(id));
}

#[test]
fn sliding_off_past_release_distance_cancels() {
    let mut rig = Rig::new();
    let id = rig.add(InteractableConfig {
        release_distance: 0.05,
        ..Default::default()
    });

    rig.step(at(0.0, 0.05));
    assert_eq!(rig.step(at(0.0, -0.001)), vec![(PointerEventKind::Select, id)]);
    assert!(rig.step(at(0.05, -0.001)).is_empty());

    // Past the pad edge by ~0.1 m while still below the surface plane.
    assert_eq!(rig.step(at(0.2, -0.001)), vec![(PointerEventKind::Cancel, id)]);
    assert_eq!(rig.finger.selected(), None);
    assert_eq!(rig.finger.previous_origin(), at(0.2, -0.001));
    assert_eq!(rig.finger.previous_candidate(), None);

    // Tracking was reset, so staying below the surface does not re-press.
    assert_eq!(rig.step(at(0.2, -0.001)), vec![(PointerEventKind::HoverExit, id)]);
    assert_eq!(rig.finger.state(), InteractorState::Normal);
}

#[test]
fn vertical_release_keeps_candidate_for_quick_repress() {
    let config = InteractableConfig {
        enter_hover_distance: 0.02,
        ..Default::default()
    };
    let mut rig = Rig::new();
    let id = rig.add(config.clone());

    assert_eq!(rig.step(at(0.0, 0.1)), vec![(PointerEventKind::HoverEnter, id)]);
    assert_eq!(rig.step(at(0.0, -0.001)), vec![(PointerEventKind::Select, id)]);
    assert_eq!(rig.step(at(0.0, 0.008)), vec![(PointerEventKind::Unselect, id)]);
    assert_eq!(rig.finger.previous_candidate(), Some(id));
    assert_eq!(rig.finger.previous_origin(), at(0.0, -0.001));

    // Still inside the enter zone: hover continues without a fresh enter.
    assert!(rig.step(at(0.0, 0.012)).is_empty());
    assert_eq!(rig.finger.hovered(), Some(id));
    assert_eq!(rig.finger.state(), InteractorState::Hover);

    // Pressing again from inside the zone works for the kept candidate.
    assert_eq!(rig.step(at(0.0, -0.001)), vec![(PointerEventKind::Select, id)]);

    // A finger that never left the zone has no candidate and cannot press.
    let mut fresh = Rig::new();
    fresh.add(config);
    assert!(fresh.step(at(0.0, 0.012)).is_empty());
    assert!(fresh.step(at(0.0, -0.001)).is_empty());
    assert_eq!(fresh.finger.previous_candidate(), None);
}

#[test]
fn zero_release_distance_never_cancels() {
    let mut rig = Rig::new();
    let id = rig.add(InteractableConfig {
        release_distance: 0.0,
        ..Default::default()
    });

    rig.step(at(0.0, 0.05));
    rig.step(at(0.0, -0.001));
    assert!(rig.step(at(0.2, -0.001)).is_empty());
    assert_eq!(rig.finger.selected(), Some(id));
}

#[test]
fn lateral_motion_past_threshold_drags() {
    let mut rig = Rig::new();
    rig.add(InteractableConfig::default());

    rig.step(at(0.0, 0.05));
    rig.step(at(0.0, -0.001));
    assert!(!rig.finger.is_dragging());

    rig.step(at(0.02, -0.001));
    assert!(rig.finger.is_dragging());
}

#[test]
fn pushing_deeper_does_not_drag() {
    let mut rig = Rig::new();
    rig.add(InteractableConfig::default());

    rig.step(at(0.0, 0.05));
    rig.step(at(0.0, -0.001));
    rig.step(at(0.0, -0.021));
    assert!(!rig.finger.is_dragging());
    assert_eq!(rig.finger.state(), InteractorState::Select);

    // Lateral wobble below the threshold from the re-anchored point.
    rig.step(at(0.005, -0.021));
    assert!(!rig.finger.is_dragging());
}

#[test]
fn touch_point_holds_until_drag_starts() {
    let mut rig = Rig::new();
    rig.add(InteractableConfig {
        drag_thresholding: DragThresholdingConfig {
            ease_curve: instant_ease(),
            ..Default::default()
        },
        ..Default::default()
    });

    rig.step(at(0.0, 0.05));
    rig.step(at(0.0, -0.001));
    rig.step(at(0.006, -0.001));
    assert!(rig.finger.touch_point().x.abs() < 1e-6);

    rig.step(at(0.02, -0.001));
    assert!((rig.finger.touch_point().x - 0.02).abs() < 1e-6);
}

#[test]
fn position_pinning_ratio_saturates() {
    let mut rig = Rig::new();
    rig.add(InteractableConfig {
        drag_thresholding: DragThresholdingConfig {
            enabled: false,
            ..Default::default()
        },
        position_pinning: PositionPinningConfig {
            enabled: true,
            max_pin_distance: 0.04,
        },
        ..Default::default()
    });

    rig.step(at(0.0, 0.05));
    rig.step(at(0.0, -0.001));

    rig.step(at(0.01, -0.001));
    assert!((rig.finger.touch_point().x - 0.0025).abs() < 1e-6);

    rig.step(at(0.08, -0.001));
    assert!((rig.finger.touch_point().x - 0.08).abs() < 1e-6);

    rig.step(at(0.01, -0.001));
    assert!((rig.finger.touch_point().x - 0.01).abs() < 1e-6);
    let tracker = rig.finger.touch_tracker().expect("pressing");
    assert!((tracker.max_drift() - 0.08).abs() < 1e-6);
}

#[test]
fn eased_drag_converges_without_overshoot() {
    let mut rig = Rig::new();
    rig.add(InteractableConfig::default());

    rig.step(at(0.0, 0.05));
    rig.step(at(0.0, -0.001));
    rig.step(at(0.03, -0.001));
    assert!(rig.finger.is_dragging());

    let mut previous = rig.finger.touch_point().x;
    assert!(previous < 0.03);
    for _ in 0..12 {
        rig.step(at(0.03, -0.001));
        let x = rig.finger.touch_point().x;
        assert!(x >= previous - 1e-7, "touch point moved backwards");
        assert!(x <= 0.03 + 1e-6, "touch point overshot");
        previous = x;
    }
    assert!((previous - 0.03).abs() < 1e-6);
}

#[test]
fn surface_moving_into_still_probe_presses() {
    let mut rig = Rig::new();
    let id = rig.registry.register(pad(
        Transform::from_position(Vec3::new(0.0, 0.0, -0.05)),
        InteractableConfig::default(),
    ));

    let mut events = rig.step(Vec3::ZERO);
    for frame in 1..=5 {
        let z = -0.05 + 0.01 * frame as f32;
        rig.registry
            .get_mut(id)
            .expect("registered")
            .set_transform(Transform::from_position(Vec3::new(0.0, 0.0, z)));
        events.extend(rig.step(Vec3::ZERO));
    }

    assert_eq!(
        events,
        vec![(PointerEventKind::HoverEnter, id), (PointerEventKind::Select, id)]
    );
    assert_eq!(rig.finger.origin(), Vec3::ZERO);
}

fn masked_rig() -> (Rig, InteractableId) {
    let mut rig = Rig::new();
    let mut masked = pad(Transform::IDENTITY, InteractableConfig::default());
    masked.set_volume_mask(Some(VolumeMask::Sphere {
        center: Vec3::new(0.05, 0.0, 0.0),
        radius: 0.03,
    }));
    let id = rig.registry.register(masked);
    (rig, id)
}

#[test]
fn volume_mask_limits_where_presses_land() {
    let (mut rig, _) = masked_rig();
    let outside = ProbeTrajectory::starting_at(at(-0.05, 0.02)).line_to(at(-0.05, -0.001), 2);
    assert!(rig.run(&outside).is_empty());

    let (mut rig, id) = masked_rig();
    let inside = ProbeTrajectory::starting_at(at(0.05, 0.02)).line_to(at(0.05, -0.001), 2);
    assert_eq!(
        rig.run(&inside),
        vec![(PointerEventKind::HoverEnter, id), (PointerEventKind::Select, id)]
    );
}

#[test]
fn tiebreaker_picks_between_coplanar_pads() {
    for preferred_first in [true, false] {
        let mut rig = Rig::new();
        let plain_config = InteractableConfig::default();
        let preferred_config = InteractableConfig {
            tiebreaker_score: 1,
            ..Default::default()
        };
        let preferred = if preferred_first {
            let preferred = rig.add(preferred_config);
            rig.add(plain_config);
            preferred
        } else {
            rig.add(plain_config);
            rig.add(preferred_config)
        };

        let tap = ProbeTrajectory::starting_at(at(0.0, 0.05)).line_to(at(0.0, -0.001), 1);
        let events = rig.run(&tap);
        assert_eq!(
            events,
            vec![
                (PointerEventKind::HoverEnter, preferred),
                (PointerEventKind::Select, preferred)
            ]
        );
    }
}

#[test]
fn unselect_then_lift_exits_hover() {
    let mut rig = Rig::new();
    let id = rig.add(InteractableConfig::default());
    let path = ProbeTrajectory::starting_at(at(0.0, 0.05))
        .line_to(at(0.0, -0.002), 2)
        .line_to(at(0.0, 0.05), 2)
        .line_to(at(0.0, 0.3), 1);

    assert_eq!(
        rig.run(&path),
        vec![
            (PointerEventKind::HoverEnter, id),
            (PointerEventKind::Select, id),
            (PointerEventKind::Unselect, id),
            (PointerEventKind::HoverExit, id),
        ]
    );
}
