#![warn(missing_docs)]
//! Touchable geometry: surfaces, proximity fields and volume masks.
//!
//! Surfaces answer exact closest-point and ray queries; proximity fields give
//! a cheap approximate closest point used to stabilize lateral distances;
//! volume masks optionally restrict where a touch may land. All queries are
//! total: degenerate geometry yields a best-effort answer instead of a
//! failure, and callers screen the result for non-finite values.

mod aabb;
mod collider;
mod mesh;
mod plane;
mod proximity;
mod surface;
mod volume;

pub use aabb::Aabb;
pub use collider::{Collider, ColliderSurface};
pub use mesh::MeshSurface;
pub use plane::{Facing, PlaneSurface, RectSurface};
pub use proximity::{
    BoxProximityField, CircleProximityField, PointProximityField, ProximityField, ProximityShape,
};
pub use surface::{Surface, SurfaceHit, SurfaceShape};
pub use volume::{passes_mask, VolumeMask};

use thiserror::Error;

/// Errors raised while building shapes from authored data.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ShapeError {
    /// Mesh index buffer is not a whole number of triangles.
    #[error("mesh index count {0} is not a multiple of 3")]
    IndexCount(usize),
    /// Mesh references a vertex that does not exist.
    #[error("mesh index {index} out of range for {vertex_count} vertices")]
    IndexOutOfRange {
        /// Offending index value.
        index: u32,
        /// Number of vertices supplied.
        vertex_count: usize,
    },
    /// Mesh has no triangles.
    #[error("mesh has no triangles")]
    EmptyMesh,
    /// A size, radius or extent is negative or not finite.
    #[error("invalid {what}: {value}")]
    InvalidExtent {
        /// Which parameter was rejected.
        what: &'static str,
        /// Rejected value.
        value: f32,
    },
}

/// Accept a finite, non-negative size/radius parameter.
pub fn check_extent(what: &'static str, value: f32) -> Result<f32, ShapeError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(ShapeError::InvalidExtent { what, value })
    }
}
