//! Triangle-mesh surfaces.

use crate::{ShapeError, Surface, SurfaceHit};
use glam::Vec3;
use handpoke_math::{Ray, Transform};

/// Arbitrary triangle mesh authored in local space.
///
/// Triangles wind counter-clockwise when viewed from the touchable side.
#[derive(Debug, Clone)]
pub struct MeshSurface {
    transform: Transform,
    vertices: Vec<Vec3>,
    indices: Vec<u32>,
}

impl MeshSurface {
    /// Validate and wrap a mesh.
    pub fn new(
        transform: Transform,
        vertices: Vec<Vec3>,
        indices: Vec<u32>,
    ) -> Result<Self, ShapeError> {
        if indices.len() % 3 != 0 {
            return Err(ShapeError::IndexCount(indices.len()));
        }
        if indices.is_empty() {
            return Err(ShapeError::EmptyMesh);
        }
        if let Some(&index) = indices.iter().find(|&&i| i as usize >= vertices.len()) {
            return Err(ShapeError::IndexOutOfRange {
                index,
                vertex_count: vertices.len(),
            });
        }
        Ok(Self {
            transform,
            vertices,
            indices,
        })
    }

    fn world_triangles(&self) -> impl Iterator<Item = [Vec3; 3]> + '_ {
        self.indices.chunks_exact(3).map(move |tri| {
            [
                self.transform.transform_point(self.vertices[tri[0] as usize]),
                self.transform.transform_point(self.vertices[tri[1] as usize]),
                self.transform.transform_point(self.vertices[tri[2] as usize]),
            ]
        })
    }
}

impl Surface for MeshSurface {
    fn transform(&self) -> &Transform {
        &self.transform
    }

    fn set_transform(&mut self, transform: Transform) {
        self.transform = transform;
    }

    fn closest_surface_point(&self, point: Vec3) -> SurfaceHit {
        let mut best: Option<SurfaceHit> = None;
        for [a, b, c] in self.world_triangles() {
            let Some(normal) = (b - a).cross(c - a).try_normalize() else {
                continue; // Degenerate triangle
            };
            let closest = closest_point_on_triangle(point, a, b, c);
            let distance = (point - closest).length();
            if best.map_or(true, |hit| distance < hit.distance) {
                best = Some(SurfaceHit {
                    point: closest,
                    normal,
                    distance,
                });
            }
        }

        // Every triangle degenerate: fall back to the nearest vertex.
        best.unwrap_or_else(|| {
            let nearest = self
                .world_triangles()
                .flatten()
                .min_by(|a, b| a.distance_squared(point).total_cmp(&b.distance_squared(point)))
                .unwrap_or(self.transform.position);
            SurfaceHit {
                point: nearest,
                normal: self.transform.forward(),
                distance: (point - nearest).length(),
            }
        })
    }

    fn raycast(&self, ray: &Ray) -> Option<SurfaceHit> {
        let mut best: Option<SurfaceHit> = None;
        for [a, b, c] in self.world_triangles() {
            let Some((t, normal)) = intersect_triangle(ray, a, b, c) else {
                continue;
            };
            if best.map_or(true, |hit| t < hit.distance) {
                best = Some(SurfaceHit {
                    point: ray.at(t),
                    normal,
                    distance: t,
                });
            }
        }
        best
    }
}

/// Closest point on triangle `abc` to `p` (Voronoi-region walk).
pub(crate) fn closest_point_on_triangle(p: Vec3, a: Vec3, b: Vec3, c: Vec3) -> Vec3 {
    let ab = b - a;
    let ac = c - a;
    let ap = p - a;
    let d1 = ab.dot(ap);
    let d2 = ac.dot(ap);
    if d1 <= 0.0 && d2 <= 0.0 {
        return a;
    }

    let bp = p - b;
    let d3 = ab.dot(bp);
    let d4 = ac.dot(bp);
    if d3 >= 0.0 && d4 <= d3 {
        return b;
    }

    let vc = d1 * d4 - d3 * d2;
    if vc <= 0.0 && d1 >= 0.0 && d3 <= 0.0 {
        let v = d1 / (d1 - d3);
        return a + ab * v;
    }

    let cp = p - c;
    let d5 = ab.dot(cp);
    let d6 = ac.dot(cp);
    if d6 >= 0.0 && d5 <= d6 {
        return c;
    }

    let vb = d5 * d2 - d1 * d6;
    if vb <= 0.0 && d2 >= 0.0 && d6 <= 0.0 {
        let w = d2 / (d2 - d6);
        return a + ac * w;
    }

    let va = d3 * d6 - d5 * d4;
    if va <= 0.0 && (d4 - d3) >= 0.0 && (d5 - d6) >= 0.0 {
        let w = (d4 - d3) / ((d4 - d3) + (d5 - d6));
        return b + (c - b) * w;
    }

    let denom = 1.0 / (va + vb + vc);
    let v = vb * denom;
    let w = vc * denom;
    a + ab * v + ac * w
}

/// Front-face ray/triangle intersection (Möller–Trumbore).
fn intersect_triangle(ray: &Ray, a: Vec3, b: Vec3, c: Vec3) -> Option<(f32, Vec3)> {
    let ab = b - a;
    let ac = c - a;
    let normal = ab.cross(ac).try_normalize()?;
    // Only the touchable side is hit.
    if ray.direction.dot(normal) >= 0.0 {
        return None;
    }

    let pvec = ray.direction.cross(ac);
    let det = ab.dot(pvec);
    if det.abs() < 1e-10 {
        return None;
    }
    let inv_det = 1.0 / det;
    let tvec = ray.origin - a;
    let u = tvec.dot(pvec) * inv_det;
    if !(0.0..=1.0).contains(&u) {
        return None;
    }
    let qvec = tvec.cross(ab);
    let v = ray.direction.dot(qvec) * inv_det;
    if v < 0.0 || u + v > 1.0 {
        return None;
    }
    let t = ac.dot(qvec) * inv_det;
    (t >= 0.0).then_some((t, normal))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad() -> MeshSurface {
        // 0.2 m square in the XY plane facing +Z.
        let vertices = vec![
            Vec3::new(-0.1, -0.1, 0.0),
            Vec3::new(0.1, -0.1, 0.0),
            Vec3::new(0.1, 0.1, 0.0),
            Vec3::new(-0.1, 0.1, 0.0),
        ];
        MeshSurface::new(Transform::IDENTITY, vertices, vec![0, 1, 2, 0, 2, 3]).unwrap()
    }

    #[test]
    fn rejects_bad_index_buffers() {
        let v = vec![Vec3::ZERO, Vec3::X, Vec3::Y];
        assert_eq!(
            MeshSurface::new(Transform::IDENTITY, v.clone(), vec![0, 1]).unwrap_err(),
            ShapeError::IndexCount(2)
        );
        assert_eq!(
            MeshSurface::new(Transform::IDENTITY, v.clone(), vec![]).unwrap_err(),
            ShapeError::EmptyMesh
        );
        assert!(matches!(
            MeshSurface::new(Transform::IDENTITY, v, vec![0, 1, 5]),
            Err(ShapeError::IndexOutOfRange { index: 5, .. })
        ));
    }

    #[test]
    fn closest_point_above_face() {
        let hit = quad().closest_surface_point(Vec3::new(0.05, 0.02, 0.3));
        assert!((hit.point - Vec3::new(0.05, 0.02, 0.0)).length() < 1e-6);
        assert!((hit.normal - Vec3::Z).length() < 1e-6);
        assert!((hit.distance - 0.3).abs() < 1e-6);
    }

    #[test]
    fn closest_point_clamps_to_edge() {
        let hit = quad().closest_surface_point(Vec3::new(0.3, 0.0, 0.0));
        assert!((hit.point - Vec3::new(0.1, 0.0, 0.0)).length() < 1e-6);
    }

    #[test]
    fn raycast_hits_front_only() {
        let mesh = quad();
        let hit = mesh.raycast(&Ray::new(Vec3::new(0.0, 0.0, 0.5), Vec3::NEG_Z)).unwrap();
        assert!((hit.distance - 0.5).abs() < 1e-6);
        assert!(mesh.raycast(&Ray::new(Vec3::new(0.0, 0.0, -0.5), Vec3::Z)).is_none());
        assert!(mesh.raycast(&Ray::new(Vec3::new(0.5, 0.0, 0.5), Vec3::NEG_Z)).is_none());
    }

    #[test]
    fn degenerate_mesh_still_answers() {
        let v = vec![Vec3::ZERO, Vec3::X, Vec3::X * 2.0];
        let mesh = MeshSurface::new(Transform::IDENTITY, v, vec![0, 1, 2]).unwrap();
        let hit = mesh.closest_surface_point(Vec3::new(1.9, 1.0, 0.0));
        assert!(hit.is_finite());
        assert_eq!(hit.point, Vec3::X * 2.0);
    }
}
