//! Surfaces backed by primitive colliders.
//!
//! Queries run in the collider's rotated frame with scale folded into the
//! extents, so distances come back in world units.

use crate::{check_extent, Aabb, ShapeError, Surface, SurfaceHit};
use glam::Vec3;
use handpoke_math::{Ray, Transform};

/// Primitive collider shape, centred on the transform origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Collider {
    /// Oriented box with local half extents.
    Box {
        /// Half size per local axis.
        half_extents: Vec3,
    },
    /// Sphere with local radius (scaled by the largest scale component).
    Sphere {
        /// Local radius.
        radius: f32,
    },
}

impl Collider {
    /// Reject negative or non-finite extents.
    pub fn validated(self) -> Result<Self, ShapeError> {
        match self {
            Collider::Box { half_extents } => {
                check_extent("box half extent x", half_extents.x)?;
                check_extent("box half extent y", half_extents.y)?;
                check_extent("box half extent z", half_extents.z)?;
            }
            Collider::Sphere { radius } => {
                check_extent("sphere radius", radius)?;
            }
        }
        Ok(self)
    }
}

/// Surface of a box or sphere collider.
#[derive(Debug, Clone)]
pub struct ColliderSurface {
    transform: Transform,
    collider: Collider,
}

impl ColliderSurface {
    /// Wrap a collider.
    pub fn new(transform: Transform, collider: Collider) -> Self {
        Self { transform, collider }
    }

    /// The wrapped collider.
    pub fn collider(&self) -> Collider {
        self.collider
    }

    fn to_frame(&self, world: Vec3) -> Vec3 {
        self.transform.inverse_transform_direction(world - self.transform.position)
    }

    fn from_frame(&self, local: Vec3) -> Vec3 {
        self.transform.position + self.transform.transform_direction(local)
    }

    fn world_half_extents(half_extents: Vec3, scale: Vec3) -> Vec3 {
        (half_extents * scale).abs()
    }

    fn world_radius(&self, radius: f32) -> f32 {
        radius * self.transform.scale.abs().max_element()
    }
}

impl Surface for ColliderSurface {
    fn transform(&self) -> &Transform {
        &self.transform
    }

    fn set_transform(&mut self, transform: Transform) {
        self.transform = transform;
    }

    fn closest_surface_point(&self, point: Vec3) -> SurfaceHit {
        let p = self.to_frame(point);
        let (local_point, local_normal) = match self.collider {
            Collider::Box { half_extents } => {
                closest_on_box(p, Self::world_half_extents(half_extents, self.transform.scale))
            }
            Collider::Sphere { radius } => {
                let r = self.world_radius(radius);
                let n = p.try_normalize().unwrap_or(Vec3::Y);
                (n * r, n)
            }
        };
        let world = self.from_frame(local_point);
        SurfaceHit {
            point: world,
            normal: self.transform.transform_direction(local_normal),
            distance: (point - world).length(),
        }
    }

    fn raycast(&self, ray: &Ray) -> Option<SurfaceHit> {
        let origin = self.to_frame(ray.origin);
        let dir = self.transform.inverse_transform_direction(ray.direction);
        let (t, local_normal) = match self.collider {
            Collider::Box { half_extents } => {
                let he = Self::world_half_extents(half_extents, self.transform.scale);
                let aabb = Aabb::new(-he, he);
                let (t_enter, _, axis) = aabb.slab_interval(origin, dir)?;
                // Rays starting inside the collider do not hit its surface.
                if t_enter < 0.0 {
                    return None;
                }
                let mut n = Vec3::ZERO;
                n[axis] = -dir[axis].signum();
                (t_enter, n)
            }
            Collider::Sphere { radius } => {
                let r = self.world_radius(radius);
                let b = origin.dot(dir);
                let c = origin.length_squared() - r * r;
                if c < 0.0 {
                    return None;
                }
                let disc = b * b - c;
                if disc < 0.0 {
                    return None;
                }
                let t = -b - disc.sqrt();
                if t < 0.0 {
                    return None;
                }
                (t, (origin + dir * t).normalize_or_zero())
            }
        };
        Some(SurfaceHit {
            point: ray.at(t),
            normal: self.transform.transform_direction(local_normal),
            distance: t,
        })
    }
}

/// Closest point on the boundary of a centred box and the outward normal there.
fn closest_on_box(p: Vec3, he: Vec3) -> (Vec3, Vec3) {
    let clamped = Aabb::new(-he, he).closest_point(p);
    if clamped != p {
        let n = (p - clamped).normalize_or_zero();
        return (clamped, n);
    }

    // Inside (or on) the box: push out through the nearest face.
    let gaps = he - p.abs();
    let axis = if gaps.x <= gaps.y && gaps.x <= gaps.z {
        0
    } else if gaps.y <= gaps.z {
        1
    } else {
        2
    };
    let sign = if p[axis] < 0.0 { -1.0 } else { 1.0 };
    let mut point = p;
    point[axis] = sign * he[axis];
    let mut normal = Vec3::ZERO;
    normal[axis] = sign;
    (point, normal)
}
