use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Decomposition", inline)]
#[serde(default)]
/// Geometry parameters shared by the decomposition strategies.
pub struct DecompositionOptions {
    /// Edge length of the procedural cube (it spans `[-extent/2, extent/2]`).
    #[schemars(skip)]
    pub extent: f32,
    /// Fraction of a grid cell a fragment fills, leaving a visible seam.
    #[schemars(title = "Cell Fill", range(min = 0.5, max = 1.0), extend("step" = 0.01))]
    pub gap: f32,
    /// Upper clamp on any requested fragment count.
    #[schemars(skip)]
    pub max_fragments: u32,
    /// Radius of the tiled sphere.
    #[schemars(title = "Tile Radius", range(min = 0.5, max = 3.0), extend("step" = 0.05))]
    pub tile_radius: f32,
    /// Outward offset of a hovered tile.
    #[schemars(title = "Tile Lift", range(min = 0.0, max = 1.0), extend("step" = 0.01))]
    pub tile_strength: f32,
    /// Outward offset of a hovered surface particle.
    #[schemars(skip)]
    pub particle_strength: f32,
    /// Radius of the procedural rock.
    #[schemars(skip)]
    pub rock_radius: f32,
    /// Subdivision detail of the procedural rock.
    #[schemars(skip)]
    pub rock_subdivisions: u32,
    /// Peak-to-peak noise applied along vertex normals of chunk rocks.
    #[schemars(title = "Roughness", range(min = 0.0, max = 0.6), extend("step" = 0.01))]
    pub chunk_noise: f32,
    /// Smallest uniform chunk scale.
    #[schemars(skip)]
    pub chunk_scale_min: f32,
    /// Largest uniform chunk scale.
    #[schemars(skip)]
    pub chunk_scale_max: f32,
}

impl Default for DecompositionOptions {
    fn default() -> Self {
        Self {
            extent: 2.0,
            gap: 0.95,
            max_fragments: 4096,
            tile_radius: 1.3,
            tile_strength: 0.25,
            particle_strength: 0.12,
            rock_radius: 1.2,
            rock_subdivisions: 3,
            chunk_noise: 0.25,
            chunk_scale_min: 0.8,
            chunk_scale_max: 1.1,
        }
    }
}
