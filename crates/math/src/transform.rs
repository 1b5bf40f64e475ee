//! Affine local ↔ world mapping.

use glam::{Mat4, Quat, Vec3};

/// Position, rotation and scale of a surface or probe in world space.
///
/// Scale components must be non-zero for the inverse mappings to be defined.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// World position of the local origin.
    pub position: Vec3,
    /// World rotation.
    pub rotation: Quat,
    /// Per-axis scale applied before rotation.
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    /// Identity transform.
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    /// Unrotated, unscaled transform at `position`.
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::IDENTITY
        }
    }

    /// Builder-style rotation override.
    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    /// Builder-style scale override.
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Local +Z axis in world space (unit length).
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::Z
    }

    /// Matrix mapping local points to world points.
    pub fn local_to_world_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }

    /// Matrix mapping world points to local points.
    pub fn world_to_local_matrix(&self) -> Mat4 {
        self.local_to_world_matrix().inverse()
    }

    /// Map a local point into world space.
    pub fn transform_point(&self, local: Vec3) -> Vec3 {
        self.position + self.rotation * (self.scale * local)
    }

    /// Map a world point into local space.
    pub fn inverse_transform_point(&self, world: Vec3) -> Vec3 {
        (self.rotation.inverse() * (world - self.position)) / self.scale
    }

    /// Map a local displacement into world space (scale and rotation, no translation).
    pub fn transform_vector(&self, local: Vec3) -> Vec3 {
        self.rotation * (self.scale * local)
    }

    /// Map a world displacement into local space.
    pub fn inverse_transform_vector(&self, world: Vec3) -> Vec3 {
        (self.rotation.inverse() * world) / self.scale
    }

    /// Rotate a local direction into world space, ignoring scale.
    pub fn transform_direction(&self, local: Vec3) -> Vec3 {
        self.rotation * local
    }

    /// Rotate a world direction into local space, ignoring scale.
    pub fn inverse_transform_direction(&self, world: Vec3) -> Vec3 {
        self.rotation.inverse() * world
    }

    /// Map a local surface normal into world space.
    ///
    /// Uses the inverse-transpose so non-uniform scale keeps normals
    /// perpendicular to the surface.
    pub fn transform_normal(&self, local: Vec3) -> Vec3 {
        (self.rotation * (local / self.scale)).normalize_or_zero()
    }
}
