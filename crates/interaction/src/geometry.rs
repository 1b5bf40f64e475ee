//! Distances between a probe sphere and an interactable.
//!
//! The probe is a sphere of `radius` around a point; all three measures
//! subtract the radius, so zero means the sphere just touches.

use crate::Interactable;
use glam::Vec3;
use handpoke_math::signed_plane_distance;

/// Signed height of the probe sphere above the surface, along the normal at
/// the closest surface point. Negative once the sphere penetrates.
pub fn distance_above(interactable: &Interactable, point: Vec3, radius: f32) -> f32 {
    let hit = interactable.closest_surface_hit(point);
    signed_plane_distance(point, hit.point, hit.normal) - radius
}

/// Penetration depth; never negative.
pub fn depth(interactable: &Interactable, point: Vec3, radius: f32) -> f32 {
    (-distance_above(interactable, point, radius)).max(0.0)
}

/// Unsigned distance to the proximity-aware closest point.
pub fn distance_from(interactable: &Interactable, point: Vec3, radius: f32) -> f32 {
    (point - interactable.compute_closest_point(point)).length() - radius
}
