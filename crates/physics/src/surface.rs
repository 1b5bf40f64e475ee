//! The surface capability and its built-in variants.

use crate::{ColliderSurface, MeshSurface, PlaneSurface, RectSurface};
use glam::Vec3;
use handpoke_math::{Ray, Transform};
use std::fmt;

/// Result of a closest-point or ray query against a surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceHit {
    /// World position on the surface.
    pub point: Vec3,
    /// Unit surface normal at `point`, pointing to the touchable side.
    pub normal: Vec3,
    /// Distance from the query point (closest point) or ray origin (raycast).
    pub distance: f32,
}

impl SurfaceHit {
    /// True when every field is finite.
    pub fn is_finite(&self) -> bool {
        handpoke_math::is_finite_vec3(self.point)
            && handpoke_math::is_finite_vec3(self.normal)
            && self.distance.is_finite()
    }
}

/// A touchable shape.
///
/// Surfaces are owned by whoever animates them; interactors only read them.
pub trait Surface: fmt::Debug + Send + Sync {
    /// Current local ↔ world mapping.
    fn transform(&self) -> &Transform;

    /// Move the surface.
    fn set_transform(&mut self, transform: Transform);

    /// Closest point on the surface to `point`. Always answers.
    fn closest_surface_point(&self, point: Vec3) -> SurfaceHit;

    /// First intersection of `ray` with the touchable side of the surface.
    fn raycast(&self, ray: &Ray) -> Option<SurfaceHit>;
}

/// Closed set of built-in surfaces.
#[derive(Debug, Clone)]
pub enum SurfaceShape {
    /// Unbounded plane.
    Plane(PlaneSurface),
    /// Plane clipped to a rectangle.
    Rect(RectSurface),
    /// Box or sphere collider.
    Collider(ColliderSurface),
    /// Triangle mesh.
    Mesh(MeshSurface),
}

impl SurfaceShape {
    fn inner(&self) -> &dyn Surface {
        match self {
            SurfaceShape::Plane(s) => s,
            SurfaceShape::Rect(s) => s,
            SurfaceShape::Collider(s) => s,
            SurfaceShape::Mesh(s) => s,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn Surface {
        match self {
            SurfaceShape::Plane(s) => s,
            SurfaceShape::Rect(s) => s,
            SurfaceShape::Collider(s) => s,
            SurfaceShape::Mesh(s) => s,
        }
    }
}

impl Surface for SurfaceShape {
    fn transform(&self) -> &Transform {
        self.inner().transform()
    }

    fn set_transform(&mut self, transform: Transform) {
        self.inner_mut().set_transform(transform);
    }

    fn closest_surface_point(&self, point: Vec3) -> SurfaceHit {
        self.inner().closest_surface_point(point)
    }

    fn raycast(&self, ray: &Ray) -> Option<SurfaceHit> {
        self.inner().raycast(ray)
    }
}

impl From<PlaneSurface> for SurfaceShape {
    fn from(s: PlaneSurface) -> Self {
        SurfaceShape::Plane(s)
    }
}

impl From<RectSurface> for SurfaceShape {
    fn from(s: RectSurface) -> Self {
        SurfaceShape::Rect(s)
    }
}

impl From<ColliderSurface> for SurfaceShape {
    fn from(s: ColliderSurface) -> Self {
        SurfaceShape::Collider(s)
    }
}

impl From<MeshSurface> for SurfaceShape {
    fn from(s: MeshSurface) -> Self {
        SurfaceShape::Mesh(s)
    }
}
