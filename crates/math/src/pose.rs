use glam::{Mat3, Quat, Vec3};

/// Position and orientation emitted to presentation layers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    /// World position.
    pub position: Vec3,
    /// World rotation.
    pub rotation: Quat,
}

impl Default for Pose {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Pose {
    /// Origin with no rotation.
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
    };

    /// Construct a pose.
    pub fn new(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    /// Local +Z of the pose in world space.
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::Z
    }
}

/// Rotation whose +Z axis points along `forward` with +Y as close to `up` as possible.
///
/// A zero `forward` yields identity; a `forward` parallel to `up` falls back to
/// world +Z as the up hint.
pub fn look_rotation(forward: Vec3, up: Vec3) -> Quat {
    let z = forward.normalize_or_zero();
    if z == Vec3::ZERO {
        return Quat::IDENTITY;
    }
    let mut x = up.cross(z);
    if x.length_squared() <= 1e-12 {
        let fallback = if z.z.abs() < 0.999 { Vec3::Z } else { Vec3::X };
        x = fallback.cross(z);
    }
    let x = x.normalize();
    let y = z.cross(x);
    Quat::from_mat3(&Mat3::from_cols(x, y, z)).normalize()
}
