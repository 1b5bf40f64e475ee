use glam::Vec3;

/// Axis-aligned bounding box in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner.
    pub min: Vec3,
    /// Maximum corner.
    pub max: Vec3,
}

impl Aabb {
    /// Create a new AABB ensuring min <= max per axis.
    pub fn new(min: Vec3, max: Vec3) -> Self {
        debug_assert!(min.cmple(max).all());
        Self { min, max }
    }

    /// Create an AABB from its center and full size.
    pub fn from_center_size(center: Vec3, size: Vec3) -> Self {
        let half = size.abs() * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Inclusive containment test.
    pub fn contains_point(&self, point: Vec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }

    /// Closest point inside the (solid) box.
    pub fn closest_point(&self, point: Vec3) -> Vec3 {
        point.clamp(self.min, self.max)
    }

    /// Slab test. Returns `(t_enter, t_exit, enter_axis)` for the infinite line
    /// through `origin` along `dir`, or `None` when the line misses the box.
    pub(crate) fn slab_interval(&self, origin: Vec3, dir: Vec3) -> Option<(f32, f32, usize)> {
        let mut t_enter = f32::NEG_INFINITY;
        let mut t_exit = f32::INFINITY;
        let mut enter_axis = 0;

        for axis in 0..3 {
            let o = origin[axis];
            let d = dir[axis];
            let (lo, hi) = (self.min[axis], self.max[axis]);
            if d.abs() <= f32::EPSILON {
                if o < lo || o > hi {
                    return None;
                }
                continue;
            }
            let inv = 1.0 / d;
            let mut t1 = (lo - o) * inv;
            let mut t2 = (hi - o) * inv;
            if t1 > t2 {
                std::mem::swap(&mut t1, &mut t2);
            }
            if t1 > t_enter {
                t_enter = t1;
                enter_axis = axis;
            }
            t_exit = t_exit.min(t2);
            if t_enter > t_exit {
                return None;
            }
        }

        Some((t_enter, t_exit, enter_axis))
    }

    /// Distance along the ray to the first intersection, if any.
    ///
    /// A ray starting inside the box reports the exit distance.
    pub fn ray_intersection(&self, origin: Vec3, dir: Vec3) -> Option<f32> {
        let (t_enter, t_exit, _) = self.slab_interval(origin, dir)?;
        if t_exit < 0.0 {
            return None;
        }
        Some(if t_enter < 0.0 { t_exit } else { t_enter })
    }
}
