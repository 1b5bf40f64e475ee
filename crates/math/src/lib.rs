#![warn(missing_docs)]
//! Spatial math shared by surfaces and interactors.
//!
//! Everything here is expressed in glam types. Transforms follow the usual
//! scale → rotate → translate order, so a surface authored in its local frame
//! can be queried in world space and back without drift.

mod pose;
mod ray;
mod transform;

pub use pose::{look_rotation, Pose};
pub use ray::Ray;
pub use transform::Transform;

use glam::Vec3;

/// Clamp a scalar into `[0, 1]`.
pub fn clamp01(value: f32) -> f32 {
    value.clamp(0.0, 1.0)
}

/// Remove the component of `v` that lies along `normal`.
///
/// `normal` does not need to be unit length; a zero normal returns `v`.
pub fn project_on_plane(v: Vec3, normal: Vec3) -> Vec3 {
    let len_sq = normal.length_squared();
    if len_sq <= f32::EPSILON {
        return v;
    }
    v - normal * (v.dot(normal) / len_sq)
}

/// Signed distance of `point` from the plane through `origin` with `normal`.
pub fn signed_plane_distance(point: Vec3, origin: Vec3, normal: Vec3) -> f32 {
    (point - origin).dot(normal)
}

/// True when every component of `v` is finite.
pub fn is_finite_vec3(v: Vec3) -> bool {
    v.x.is_finite() && v.y.is_finite() && v.z.is_finite()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp01_saturates() {
        assert_eq!(clamp01(-0.5), 0.0);
        assert_eq!(clamp01(0.25), 0.25);
        assert_eq!(clamp01(3.0), 1.0);
    }

    #[test]
    fn project_on_plane_drops_normal_component() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        let projected = project_on_plane(v, Vec3::new(0.0, 0.0, 2.0));
        assert_eq!(projected, Vec3::new(1.0, 2.0, 0.0));
        assert_eq!(project_on_plane(v, Vec3::ZERO), v);
    }

    #[test]
    fn signed_distance_follows_normal() {
        let d = signed_plane_distance(Vec3::new(0.0, 0.0, 0.3), Vec3::ZERO, Vec3::Z);
        assert!((d - 0.3).abs() < 1e-6);
        let d = signed_plane_distance(Vec3::new(0.0, 0.0, -0.3), Vec3::ZERO, Vec3::Z);
        assert!((d + 0.3).abs() < 1e-6);
    }

    #[test]
    fn finite_check_rejects_nan() {
        assert!(is_finite_vec3(Vec3::ONE));
        assert!(!is_finite_vec3(Vec3::new(f32::NAN, 0.0, 0.0)));
        assert!(!is_finite_vec3(Vec3::new(0.0, f32::INFINITY, 0.0)));
    }
}
