//! Flat surfaces: unbounded planes and rectangles clipped out of them.
//!
//! The plane lies in the local XY plane. Its touchable side is local +Z for
//! [`Facing::Forward`] and local -Z for [`Facing::Backward`].

use crate::{Surface, SurfaceHit};
use glam::{Vec2, Vec3};
use handpoke_math::{Ray, Transform};

/// Which side of a plane is touchable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    /// Normal along local +Z.
    #[default]
    Forward,
    /// Normal along local -Z.
    Backward,
}

impl Facing {
    fn local_normal(self) -> Vec3 {
        match self {
            Facing::Forward => Vec3::Z,
            Facing::Backward => Vec3::NEG_Z,
        }
    }
}

/// Unbounded plane through the transform origin.
#[derive(Debug, Clone)]
pub struct PlaneSurface {
    transform: Transform,
    facing: Facing,
    double_sided: bool,
}

impl PlaneSurface {
    /// Single-sided plane.
    pub fn new(transform: Transform, facing: Facing) -> Self {
        Self {
            transform,
            facing,
            double_sided: false,
        }
    }

    /// Accept rays arriving from behind as well.
    pub fn double_sided(mut self, double_sided: bool) -> Self {
        self.double_sided = double_sided;
        self
    }

    /// World-space normal of the touchable side.
    pub fn normal(&self) -> Vec3 {
        self.transform.transform_normal(self.facing.local_normal())
    }
}

impl Surface for PlaneSurface {
    fn transform(&self) -> &Transform {
        &self.transform
    }

    fn set_transform(&mut self, transform: Transform) {
        self.transform = transform;
    }

    fn closest_surface_point(&self, point: Vec3) -> SurfaceHit {
        let normal = self.normal();
        let offset = (point - self.transform.position).dot(normal);
        SurfaceHit {
            point: point - normal * offset,
            normal,
            distance: offset.abs(),
        }
    }

    fn raycast(&self, ray: &Ray) -> Option<SurfaceHit> {
        raycast_plane(self.transform.position, self.normal(), self.double_sided, ray)
    }
}

/// Plane clipped to a `size.x` × `size.y` rectangle centred on the local origin.
///
/// `size` is in local units and is scaled by the transform.
#[derive(Debug, Clone)]
pub struct RectSurface {
    transform: Transform,
    size: Vec2,
    facing: Facing,
    double_sided: bool,
}

impl RectSurface {
    /// Single-sided rectangle.
    pub fn new(transform: Transform, size: Vec2, facing: Facing) -> Self {
        debug_assert!(size.x >= 0.0 && size.y >= 0.0);
        Self {
            transform,
            size: size.abs(),
            facing,
            double_sided: false,
        }
    }

    /// Accept rays arriving from behind as well.
    pub fn double_sided(mut self, double_sided: bool) -> Self {
        self.double_sided = double_sided;
        self
    }

    /// Local rectangle size.
    pub fn size(&self) -> Vec2 {
        self.size
    }

    /// World-space normal of the touchable side.
    pub fn normal(&self) -> Vec3 {
        self.transform.transform_normal(self.facing.local_normal())
    }

    fn clip_local(&self, local: Vec3) -> Vec3 {
        let half = self.size * 0.5;
        Vec3::new(local.x.clamp(-half.x, half.x), local.y.clamp(-half.y, half.y), 0.0)
    }

    fn contains_local(&self, local: Vec3) -> bool {
        let half = self.size * 0.5;
        local.x.abs() <= half.x && local.y.abs() <= half.y
    }
}

impl Surface for RectSurface {
    fn transform(&self) -> &Transform {
        &self.transform
    }

    fn set_transform(&mut self, transform: Transform) {
        self.transform = transform;
    }

    fn closest_surface_point(&self, point: Vec3) -> SurfaceHit {
        let local = self.transform.inverse_transform_point(point);
        let clipped = self.transform.transform_point(self.clip_local(local));
        SurfaceHit {
            point: clipped,
            normal: self.normal(),
            distance: (point - clipped).length(),
        }
    }

    fn raycast(&self, ray: &Ray) -> Option<SurfaceHit> {
        let hit = raycast_plane(self.transform.position, self.normal(), self.double_sided, ray)?;
        let local = self.transform.inverse_transform_point(hit.point);
        self.contains_local(local).then_some(hit)
    }
}

fn raycast_plane(origin: Vec3, normal: Vec3, double_sided: bool, ray: &Ray) -> Option<SurfaceHit> {
    let denom = ray.direction.dot(normal);
    if denom.abs() <= 1e-6 {
        return None;
    }
    // Arriving from behind the touchable side.
    if denom > 0.0 && !double_sided {
        return None;
    }
    let t = (origin - ray.origin).dot(normal) / denom;
    if t < 0.0 {
        return None;
    }
    Some(SurfaceHit {
        point: ray.at(t),
        normal: if denom > 0.0 { -normal } else { normal },
        distance: t,
    })
}
