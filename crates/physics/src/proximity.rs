//! Broad-phase proximity fields.
//!
//! A proximity field maps a probe position to a nearby "anchor" point. The
//! interactable then snaps that anchor onto its surface, which keeps lateral
//! distances stable near rounded or sparse geometry.

use glam::Vec3;
use handpoke_math::Transform;
use std::fmt;

/// Approximate closest-point capability.
pub trait ProximityField: fmt::Debug + Send + Sync {
    /// Closest point of the field to `point`, in world space.
    fn compute_closest_point(&self, point: Vec3) -> Vec3;

    /// Current placement.
    fn transform(&self) -> &Transform;

    /// Move the field along with its surface.
    fn set_transform(&mut self, transform: Transform);
}

/// Field collapsed onto the transform origin.
#[derive(Debug, Clone)]
pub struct PointProximityField {
    /// Placement of the point.
    pub transform: Transform,
}

impl PointProximityField {
    /// Field at `transform`'s origin.
    pub fn new(transform: Transform) -> Self {
        Self { transform }
    }
}

impl ProximityField for PointProximityField {
    fn compute_closest_point(&self, _point: Vec3) -> Vec3 {
        self.transform.position
    }

    fn transform(&self) -> &Transform {
        &self.transform
    }

    fn set_transform(&mut self, transform: Transform) {
        self.transform = transform;
    }
}

/// Filled disc in the local XY plane.
#[derive(Debug, Clone)]
pub struct CircleProximityField {
    /// Placement of the disc centre; local Z is the disc normal.
    pub transform: Transform,
    /// Local radius, scaled by the largest XY scale component.
    pub radius: f32,
}

impl CircleProximityField {
    /// Disc of `radius` at `transform`.
    pub fn new(transform: Transform, radius: f32) -> Self {
        Self { transform, radius }
    }
}

impl ProximityField for CircleProximityField {
    fn compute_closest_point(&self, point: Vec3) -> Vec3 {
        let normal = self.transform.forward();
        let offset = point - self.transform.position;
        let in_plane = handpoke_math::project_on_plane(offset, normal);
        let scale = self.transform.scale.x.abs().max(self.transform.scale.y.abs());
        let radius = self.radius * scale;
        self.transform.position + in_plane.clamp_length_max(radius)
    }

    fn transform(&self) -> &Transform {
        &self.transform
    }

    fn set_transform(&mut self, transform: Transform) {
        self.transform = transform;
    }
}

/// Solid box spanning the unit cube `[-0.5, 0.5]³` under `transform`.
///
/// The transform's scale is the box size. Points inside the box are their own
/// closest point.
#[derive(Debug, Clone)]
pub struct BoxProximityField {
    /// Placement and size of the box.
    pub transform: Transform,
}

impl BoxProximityField {
    /// Box occupying `transform`.
    pub fn new(transform: Transform) -> Self {
        Self { transform }
    }
}

impl ProximityField for BoxProximityField {
    fn compute_closest_point(&self, point: Vec3) -> Vec3 {
        let local = self.transform.inverse_transform_point(point);
        let clamped = local.clamp(Vec3::splat(-0.5), Vec3::splat(0.5));
        self.transform.transform_point(clamped)
    }

    fn transform(&self) -> &Transform {
        &self.transform
    }

    fn set_transform(&mut self, transform: Transform) {
        self.transform = transform;
    }
}

/// Closed set of built-in proximity fields.
#[derive(Debug, Clone)]
pub enum ProximityShape {
    /// Single point.
    Point(PointProximityField),
    /// Flat disc.
    Circle(CircleProximityField),
    /// Solid box.
    Box(BoxProximityField),
}

impl ProximityField for ProximityShape {
    fn compute_closest_point(&self, point: Vec3) -> Vec3 {
        match self {
            ProximityShape::Point(f) => f.compute_closest_point(point),
            ProximityShape::Circle(f) => f.compute_closest_point(point),
            ProximityShape::Box(f) => f.compute_closest_point(point),
        }
    }

    fn transform(&self) -> &Transform {
        match self {
            ProximityShape::Point(f) => f.transform(),
            ProximityShape::Circle(f) => f.transform(),
            ProximityShape::Box(f) => f.transform(),
        }
    }

    fn set_transform(&mut self, transform: Transform) {
        match self {
            ProximityShape::Point(f) => f.set_transform(transform),
            ProximityShape::Circle(f) => f.set_transform(transform),
            ProximityShape::Box(f) => f.set_transform(transform),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_field_ignores_query() {
        let field = PointProximityField::new(Transform::from_position(Vec3::new(1.0, 2.0, 3.0)));
        assert_eq!(field.compute_closest_point(Vec3::ZERO), Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn circle_field_clamps_radially_and_flattens() {
        let field = CircleProximityField::new(Transform::IDENTITY, 0.1);
        let p = field.compute_closest_point(Vec3::new(0.05, 0.0, 0.3));
        assert!((p - Vec3::new(0.05, 0.0, 0.0)).length() < 1e-6);
        let p = field.compute_closest_point(Vec3::new(0.3, 0.4, 0.0));
        assert!((p - Vec3::new(0.06, 0.08, 0.0)).length() < 1e-6);
    }

    #[test]
    fn box_field_is_solid() {
        let field =
            BoxProximityField::new(Transform::IDENTITY.with_scale(Vec3::new(0.2, 0.2, 0.02)));
        let inside = Vec3::new(0.05, -0.05, 0.0);
        assert_eq!(field.compute_closest_point(inside), inside);
        let p = field.compute_closest_point(Vec3::new(0.5, 0.0, 0.5));
        assert!((p - Vec3::new(0.1, 0.0, 0.01)).length() < 1e-6);
    }

    #[test]
    fn shape_enum_moves_with_transform() {
        let mut shape = ProximityShape::Point(PointProximityField::new(Transform::IDENTITY));
        shape.set_transform(Transform::from_position(Vec3::Y));
        assert_eq!(shape.compute_closest_point(Vec3::ZERO), Vec3::Y);
    }
}
