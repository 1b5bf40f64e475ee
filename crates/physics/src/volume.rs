//! Optional volumes restricting where touches may land.

use crate::Aabb;
use glam::Vec3;
use handpoke_math::Transform;

/// Exact point-in-volume test used to mask interactables.
#[derive(Debug, Clone, PartialEq)]
pub enum VolumeMask {
    /// World-aligned box.
    Aabb(Aabb),
    /// Oriented box: local half extents under a transform.
    Box {
        /// Placement of the box centre.
        transform: Transform,
        /// Half size per local axis (scaled by the transform).
        half_extents: Vec3,
    },
    /// Sphere in world space.
    Sphere {
        /// Sphere centre.
        center: Vec3,
        /// Sphere radius.
        radius: f32,
    },
}

impl VolumeMask {
    /// Inclusive containment test.
    pub fn contains_point(&self, point: Vec3) -> bool {
        match self {
            VolumeMask::Aabb(aabb) => aabb.contains_point(point),
            VolumeMask::Box {
                transform,
                half_extents,
            } => {
                let local = transform.inverse_transform_point(point);
                local.abs().cmple(half_extents.abs()).all()
            }
            VolumeMask::Sphere { center, radius } => {
                point.distance_squared(*center) <= radius * radius
            }
        }
    }
}

/// Containment against an optional mask; no mask means no constraint.
pub fn passes_mask(mask: Option<&VolumeMask>, point: Vec3) -> bool {
    mask.map_or(true, |mask| mask.contains_point(point))
}
