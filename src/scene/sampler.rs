//! Area-weighted random sampling of points on a mesh surface.

use glam::Vec3;
use rand::Rng;

use super::mesh::{triangle_area, TriangleMesh};

/// A point on a mesh surface together with the face normal there.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceSample {
    /// Sampled position.
    pub position: Vec3,
    /// Unit normal of the face the sample lies on.
    pub normal: Vec3,
}

/// Draws points uniformly by area across all triangles of a mesh.
///
/// Building the sampler is O(triangles); each draw is a binary search over
/// the cumulative area table.
#[derive(Debug)]
pub struct SurfaceSampler<'a> {
    mesh: &'a TriangleMesh,
    cumulative: Vec<f32>,
    total: f32,
}

impl<'a> SurfaceSampler<'a> {
    /// Sampler over `mesh`, or `None` when the mesh has no area to sample.
    #[must_use]
    pub fn new(mesh: &'a TriangleMesh) -> Option<Self> {
        let mut total = 0.0;
        let cumulative: Vec<f32> = mesh
            .triangles()
            .map(|[a, b, c]| {
                total += triangle_area(a, b, c);
                total
            })
            .collect();
        (total > 0.0 && total.is_finite()).then_some(Self {
            mesh,
            cumulative,
            total,
        })
    }

    /// Total area being sampled.
    #[must_use]
    pub fn total_area(&self) -> f32 {
        self.total
    }

    /// Draw one surface point.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> SurfaceSample {
        let r = rng.random::<f32>() * self.total;
        // First face whose running total exceeds r; zero-area faces never
        // win because they share their predecessor's total.
        let face = self
            .cumulative
            .partition_point(|&c| c <= r)
            .min(self.cumulative.len() - 1);
        let tri = &self.mesh.indices()[face * 3..face * 3 + 3];
        let [a, b, c] = [tri[0], tri[1], tri[2]]
            .map(|i| self.mesh.positions()[i as usize]);

        // Square-root parameterisation is uniform over the triangle.
        let s = rng.random::<f32>().sqrt();
        let t = rng.random::<f32>();
        let position = a * (1.0 - s) + b * (s * (1.0 - t)) + c * (s * t);
        let normal = (b - a).cross(c - a).try_normalize().unwrap_or(Vec3::Y);

        SurfaceSample { position, normal }
    }
}
