//! Per-frame candidate ranking.
//!
//! Both passes collect every accepted interactable with a score, then pick a
//! winner with [`pick_best`]. Nothing depends on the order interactables are
//! visited in, so any registry listing order gives the same answer.

use crate::geometry::{distance_above, distance_from};
use crate::Interactable;
use glam::{Mat4, Vec3};
use handpoke_core::InteractableId;
use handpoke_math::{is_finite_vec3, project_on_plane, Ray};
use handpoke_physics::SurfaceHit;
use std::collections::HashMap;
use tracing::{trace, warn};

/// Probe state the ranking passes read.
#[derive(Debug, Clone, Copy)]
pub struct RankingContext<'a> {
    /// Probe position this frame.
    pub origin: Vec3,
    /// Probe position last frame.
    pub previous_origin: Vec3,
    /// Probe sphere radius.
    pub radius: f32,
    /// Primary scores closer than this are considered equal.
    pub equal_distance_threshold: f32,
    /// Winner of the previous ranking, exempt from the enter-hover gate.
    pub previous_candidate: Option<InteractableId>,
    /// World-to-local surface matrices captured at the end of last frame.
    pub surface_snapshots: &'a HashMap<InteractableId, Mat4>,
}

/// Winner of a ranking pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    /// Winning interactable.
    pub id: InteractableId,
    /// Proximity-aware closest point to the probe origin.
    pub closest_point: Vec3,
    /// Surface normal at `closest_point`.
    pub touch_normal: Vec3,
}

/// A ranked entry: lower `primary` wins, then higher `tiebreaker`, then lower
/// `secondary`, then lower id.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Score {
    /// Interactable being scored.
    pub id: InteractableId,
    /// Main distance measure.
    pub primary: f32,
    /// Interactable tiebreaker score.
    pub tiebreaker: i32,
    /// Fallback distance measure.
    pub secondary: f32,
}

/// Equality test used for every near-tie decision.
pub fn within_threshold(a: f32, b: f32, threshold: f32) -> bool {
    a == b || (a - b).abs() < threshold
}

/// Pick the winner among `scores`.
///
/// The tie group is every score whose primary is within `threshold` of the
/// minimum primary.
pub fn pick_best(scores: &[Score], threshold: f32) -> Option<InteractableId> {
    let min_primary = scores.iter().map(|s| s.primary).min_by(f32::total_cmp)?;
    scores
        .iter()
        .filter(|s| within_threshold(s.primary, min_primary, threshold))
        .max_by(|a, b| {
            a.tiebreaker
                .cmp(&b.tiebreaker)
                .then_with(|| b.secondary.total_cmp(&a.secondary))
                .then_with(|| b.id.cmp(&a.id))
        })
        .map(|s| s.id)
}

fn passes_enter_hover(
    ctx: &RankingContext<'_>,
    id: InteractableId,
    interactable: &Interactable,
    position: Vec3,
) -> bool {
    ctx.previous_candidate == Some(id)
        || distance_above(interactable, position, ctx.radius)
            > interactable.config().enter_hover_distance
}

/// Hit for a probe already sunk into the surface this frame.
///
/// Only counts while the probe sits over the clipped extent: a probe beside a
/// clipped surface is below its plane without touching it.
fn overlap_hit(
    ctx: &RankingContext<'_>,
    interactable: &Interactable,
    normal: Vec3,
) -> Option<SurfaceHit> {
    let above = distance_above(interactable, ctx.origin, ctx.radius);
    if above > 0.0 {
        return None;
    }
    let point = interactable.closest_surface_point(ctx.origin);
    let lateral = project_on_plane(ctx.origin - point, normal).length();
    if lateral > ctx.radius {
        trace!(lateral, "overlap ignored: probe beside the surface extent");
        return None;
    }
    Some(SurfaceHit {
        point,
        normal,
        distance: above,
    })
}

fn candidate_for(id: InteractableId, interactable: &Interactable, origin: Vec3) -> Candidate {
    let closest_point = interactable.compute_closest_point(origin);
    Candidate {
        id,
        closest_point,
        touch_normal: interactable.closest_surface_normal(closest_point),
    }
}

/// Look for an interactable the probe pushed into since last frame.
///
/// The previous origin is re-expressed relative to where each surface was
/// last frame, so a surface moving into a still probe counts as a press.
/// Returns `None` outright if the probe did not move relative to any gated
/// surface.
pub fn compute_press_candidate<'i>(
    ctx: &RankingContext<'_>,
    interactables: impl IntoIterator<Item = (InteractableId, &'i Interactable)>,
) -> Option<Candidate> {
    let mut scores = Vec::new();
    let mut winners = HashMap::new();

    for (id, interactable) in interactables {
        let transform = interactable.transform();
        let previous_world_to_local = ctx
            .surface_snapshots
            .get(&id)
            .copied()
            .unwrap_or_else(|| transform.world_to_local_matrix());
        let adjusted_origin = transform
            .transform_point(previous_world_to_local.transform_point3(ctx.previous_origin));
        if !is_finite_vec3(adjusted_origin) {
            warn!(%id, "non-finite adjusted origin; skipping interactable");
            continue;
        }

        if !passes_enter_hover(ctx, id, interactable, adjusted_origin) {
            trace!(%id, "press rejected: enter-hover gate");
            continue;
        }

        let movement = ctx.origin - adjusted_origin;
        let magnitude = movement.length();
        if magnitude == 0.0 {
            trace!(%id, "no movement; press pass aborted");
            return None;
        }
        let direction = movement / magnitude;

        let normal = interactable.closest_surface_normal(ctx.origin);
        if direction.dot(normal) >= 0.0 {
            trace!(%id, "press rejected: moving away from surface");
            continue;
        }

        let ray = Ray {
            origin: adjusted_origin,
            direction,
        };
        let hit = interactable
            .surface()
            .raycast(&ray)
            .filter(|hit| hit.distance <= magnitude)
            .or_else(|| overlap_hit(ctx, interactable, normal));
        let Some(hit) = hit else {
            trace!(%id, "press rejected: surface not reached");
            continue;
        };
        if !hit.is_finite() {
            warn!(%id, "non-finite surface hit; skipping interactable");
            continue;
        }

        if !interactable.mask_contains(hit.point) {
            trace!(%id, "press rejected: outside volume mask");
            continue;
        }

        let edge_distance = distance_from(interactable, hit.point, ctx.radius);
        if !edge_distance.is_finite() {
            warn!(%id, "non-finite edge distance; skipping interactable");
            continue;
        }
        if edge_distance > interactable.config().max_distance {
            trace!(%id, edge_distance, "press rejected: beyond max distance");
            continue;
        }

        scores.push(Score {
            id,
            primary: (adjusted_origin - hit.point).dot(hit.normal),
            tiebreaker: interactable.tiebreaker_score(),
            secondary: edge_distance,
        });
        winners.insert(id, interactable);
    }

    let id = pick_best(&scores, ctx.equal_distance_threshold)?;
    let interactable = winners.get(&id)?;
    Some(candidate_for(id, interactable, ctx.origin))
}

/// Closest interactable the probe is hovering above.
pub fn compute_hover_candidate<'i>(
    ctx: &RankingContext<'_>,
    interactables: impl IntoIterator<Item = (InteractableId, &'i Interactable)>,
) -> Option<Candidate> {
    let mut scores = Vec::new();
    let mut winners = HashMap::new();

    for (id, interactable) in interactables {
        if !passes_enter_hover(ctx, id, interactable, ctx.origin)
            && !passes_enter_hover(ctx, id, interactable, ctx.previous_origin)
        {
            trace!(%id, "hover rejected: enter-hover gate");
            continue;
        }

        let hit = interactable.closest_surface_hit(ctx.origin);
        if !hit.is_finite() {
            warn!(%id, "non-finite closest point; skipping interactable");
            continue;
        }
        let surface_to_origin = ctx.origin - hit.point;
        if surface_to_origin.length() == 0.0 || surface_to_origin.dot(hit.normal) <= 0.0 {
            trace!(%id, "hover rejected: not above surface");
            continue;
        }

        if !interactable.mask_contains(ctx.origin) {
            trace!(%id, "hover rejected: outside volume mask");
            continue;
        }

        let distance = distance_from(interactable, ctx.origin, ctx.radius);
        if !distance.is_finite() {
            warn!(%id, "non-finite hover distance; skipping interactable");
            continue;
        }
        if distance > interactable.config().max_distance {
            trace!(%id, distance, "hover rejected: beyond max distance");
            continue;
        }

        scores.push(Score {
            id,
            primary: distance,
            tiebreaker: interactable.tiebreaker_score(),
            secondary: distance,
        });
        winners.insert(id, interactable);
    }

    let id = pick_best(&scores, ctx.equal_distance_threshold)?;
    let interactable = winners.get(&id)?;
    Some(candidate_for(id, interactable, ctx.origin))
}
