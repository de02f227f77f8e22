//! Indexed triangle meshes and procedural rock geometry.

use glam::{Affine3A, Vec3};
use rand::Rng;
use rustc_hash::FxHashMap;

use crate::error::ShatterError;
use crate::trajectory::uniform;

/// Golden ratio, the long coordinate of the unit-edge icosahedron.
const PHI: f32 = 1.618_034;

/// Icosahedron corners (edge length 2).
pub(crate) const ICOSAHEDRON_VERTICES: [[f32; 3]; 12] = [
    [-1.0, PHI, 0.0],
    [1.0, PHI, 0.0],
    [-1.0, -PHI, 0.0],
    [1.0, -PHI, 0.0],
    [0.0, -1.0, PHI],
    [0.0, 1.0, PHI],
    [0.0, -1.0, -PHI],
    [0.0, 1.0, -PHI],
    [PHI, 0.0, -1.0],
    [PHI, 0.0, 1.0],
    [-PHI, 0.0, -1.0],
    [-PHI, 0.0, 1.0],
];

/// Icosahedron faces, counter-clockwise seen from outside.
pub(crate) const ICOSAHEDRON_FACES: [[usize; 3]; 20] = [
    [0, 11, 5],
    [0, 5, 1],
    [0, 1, 7],
    [0, 7, 10],
    [0, 10, 11],
    [1, 5, 9],
    [5, 11, 4],
    [11, 10, 2],
    [10, 7, 6],
    [7, 1, 8],
    [3, 9, 4],
    [3, 4, 2],
    [3, 2, 6],
    [3, 6, 8],
    [3, 8, 9],
    [4, 9, 5],
    [2, 4, 11],
    [6, 2, 10],
    [8, 6, 7],
    [9, 8, 1],
];

/// Largest icosphere subdivision; 20 * 65² triangles.
pub const MAX_ICOSPHERE_DETAIL: u32 = 64;

/// An indexed triangle list.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TriangleMesh {
    positions: Vec<Vec3>,
    indices: Vec<u32>,
}

impl TriangleMesh {
    /// Build a mesh, validating that `indices` forms whole triangles that
    /// only reference existing vertices.
    pub fn new(
        positions: Vec<Vec3>,
        indices: Vec<u32>,
    ) -> Result<Self, ShatterError> {
        if indices.len() % 3 != 0 {
            return Err(ShatterError::Decomposition(format!(
                "index count {} is not a multiple of 3",
                indices.len()
            )));
        }
        if let Some(&bad) =
            indices.iter().find(|&&i| i as usize >= positions.len())
        {
            return Err(ShatterError::Decomposition(format!(
                "index {bad} out of range for {} vertices",
                positions.len()
            )));
        }
        Ok(Self { positions, indices })
    }

    /// Vertex positions.
    #[must_use]
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    /// Triangle indices, three per face.
    #[must_use]
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Number of triangles.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Corner positions of every triangle.
    pub fn triangles(&self) -> impl Iterator<Item = [Vec3; 3]> + '_ {
        self.indices.chunks_exact(3).map(|tri| {
            [
                self.positions[tri[0] as usize],
                self.positions[tri[1] as usize],
                self.positions[tri[2] as usize],
            ]
        })
    }

    /// Total surface area.
    #[must_use]
    pub fn surface_area(&self) -> f32 {
        self.triangles().map(|[a, b, c]| triangle_area(a, b, c)).sum()
    }

    /// Area-weighted vertex normals. Vertices touching no (non-degenerate)
    /// triangle fall back to their direction from the origin.
    #[must_use]
    pub fn vertex_normals(&self) -> Vec<Vec3> {
        let mut normals = vec![Vec3::ZERO; self.positions.len()];
        for tri in self.indices.chunks_exact(3) {
            let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| i as usize);
            // Cross product length is twice the area: already area-weighted.
            let n = (self.positions[b] - self.positions[a])
                .cross(self.positions[c] - self.positions[a]);
            normals[a] += n;
            normals[b] += n;
            normals[c] += n;
        }
        normals
            .iter()
            .zip(&self.positions)
            .map(|(n, p)| {
                n.try_normalize()
                    .or_else(|| p.try_normalize())
                    .unwrap_or(Vec3::Y)
            })
            .collect()
    }

    /// Copy of this mesh with every vertex mapped through `transform`.
    #[must_use]
    pub fn transformed(&self, transform: &Affine3A) -> Self {
        Self {
            positions: self
                .positions
                .iter()
                .map(|&p| transform.transform_point3(p))
                .collect(),
            indices: self.indices.clone(),
        }
    }

    /// Geodesic sphere: an icosahedron whose faces are each split into
    /// `(detail + 1)²` triangles, projected onto a sphere of `radius`.
    ///
    /// `detail` is capped at [`MAX_ICOSPHERE_DETAIL`].
    #[must_use]
    pub fn icosphere(radius: f32, detail: u32) -> Self {
        let n = detail.min(MAX_ICOSPHERE_DETAIL).saturating_add(1);
        let mut builder = WeldingBuilder::default();

        for face in ICOSAHEDRON_FACES {
            let [a, b, c] = face.map(|i| Vec3::from(ICOSAHEDRON_VERTICES[i]));
            // Barycentric lattice (i, j) with i + j <= n. The weighted sum is
            // symmetric in its operands, so points on an edge shared by two
            // faces come out bit-identical and weld exactly.
            let rows: Vec<Vec<u32>> = (0..=n)
                .map(|i| {
                    (0..=(n - i))
                        .map(|j| {
                            let wb = i as f32 / n as f32;
                            let wc = j as f32 / n as f32;
                            let wa = (n - i - j) as f32 / n as f32;
                            let p = (a * wa + b * wb) + c * wc;
                            builder.vertex(p.normalize() * radius)
                        })
                        .collect()
                })
                .collect();
            for i in 0..n as usize {
                for j in 0..(n as usize - i) {
                    builder.triangle(rows[i][j], rows[i + 1][j], rows[i][j + 1]);
                    if j + 1 < n as usize - i {
                        builder.triangle(
                            rows[i + 1][j],
                            rows[i + 1][j + 1],
                            rows[i][j + 1],
                        );
                    }
                }
            }
        }

        builder.finish()
    }

    /// Copy of this mesh with each vertex pushed along its own normal by
    /// uniform noise in `[-amplitude/2, amplitude/2)`, roughening a regular
    /// silhouette.
    #[must_use]
    pub fn perturbed_along_normals<R: Rng>(
        &self,
        rng: &mut R,
        amplitude: f32,
    ) -> Self {
        let half = amplitude.abs() * 0.5;
        let normals = self.vertex_normals();
        Self {
            positions: self
                .positions
                .iter()
                .zip(normals)
                .map(|(&p, n)| p + n * uniform(rng, -half, half))
                .collect(),
            indices: self.indices.clone(),
        }
    }
}

/// Area of the triangle `abc`.
pub(crate) fn triangle_area(a: Vec3, b: Vec3, c: Vec3) -> f32 {
    (b - a).cross(c - a).length() * 0.5
}

/// Collects triangles, merging vertices that land on the same point.
#[derive(Default)]
struct WeldingBuilder {
    positions: Vec<Vec3>,
    indices: Vec<u32>,
    lookup: FxHashMap<[u32; 3], u32>,
}

impl WeldingBuilder {
    fn vertex(&mut self, p: Vec3) -> u32 {
        // Adding zero folds -0.0 into +0.0 so the bit patterns compare.
        let key = (p + Vec3::ZERO).to_array().map(f32::to_bits);
        let next = self.positions.len() as u32;
        let index = *self.lookup.entry(key).or_insert(next);
        if index == next {
            self.positions.push(p);
        }
        index
    }

    fn triangle(&mut self, a: u32, b: u32, c: u32) {
        self.indices.extend([a, b, c]);
    }

    fn finish(self) -> TriangleMesh {
        TriangleMesh {
            positions: self.positions,
            indices: self.indices,
        }
    }
}
