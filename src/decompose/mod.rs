//! Shape decomposition strategies.
//!
//! A [`ShapeSource`] names what to fragment; [`ShapeSource::decomposer`]
//! picks the matching [`ShapeDecomposer`]:
//!
//! | Source | Strategy | Hover | Motion |
//! |--------|----------|-------|--------|
//! | `Procedural` | [`GridDecomposer`] | per fragment | bounded |
//! | `ImportedModel` | [`GraphDecomposer`] | per fragment | bounded |
//! | `SampledModel` | [`SampledModelDecomposer`] | group | bounded |
//! | `RockParticles` | [`RockParticleDecomposer`] | group | ballistic |
//! | `HexSphere` | [`TilingDecomposer`] | group | bounded |
//! | `OrganicChunks` | [`ChunkDecomposer`] | group | bounded |
//!
//! Strategies draw all randomness from the [`DecomposeContext`] RNG, so a
//! seeded context reproduces the same set.

mod chunks;
mod graph;
mod grid;
mod surface;
mod tiling;
mod traits;

use std::sync::Arc;

pub use chunks::ChunkDecomposer;
pub use graph::GraphDecomposer;
pub use grid::{grid_edge, GridDecomposer};
use rand::rngs::StdRng;
use rand::SeedableRng;
pub use surface::{RockParticleDecomposer, SampledModelDecomposer};
pub use tiling::{TileLayout, TilingDecomposer};
pub use traits::{HoverScope, MotionMode, ShapeDecomposer};

use crate::error::ShatterError;
use crate::fragment::FragmentSet;
use crate::options::{DecompositionOptions, Options};
use crate::scene::{Model, TriangleMesh, MAX_ICOSPHERE_DETAIL};
use crate::trajectory::TrajectoryPlanner;

/// Everything a strategy draws on while decomposing.
#[derive(Debug)]
pub struct DecomposeContext<'a> {
    /// Plans exploded poses.
    pub planner: TrajectoryPlanner,
    /// Geometry parameters.
    pub options: &'a DecompositionOptions,
    /// Source of all randomness.
    pub rng: StdRng,
}

impl<'a> DecomposeContext<'a> {
    /// Context over `options`. With a seed the RNG is reproducible;
    /// without one it is seeded from the OS.
    #[must_use]
    pub fn new(options: &'a Options, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            planner: TrajectoryPlanner::new(options.trajectory.clone()),
            options: &options.decomposition,
            rng,
        }
    }
}

/// Clamp a requested fragment count into `[1, max_fragments]`, warning when
/// it had to change.
pub(crate) fn clamp_count(
    requested: u32,
    options: &DecompositionOptions,
    strategy: &str,
) -> u32 {
    let count = requested.clamp(1, options.max_fragments.max(1));
    if count != requested {
        log::warn!("{strategy}: fragment count {requested} clamped to {count}");
    }
    count
}

/// The unperturbed rock icosphere, with its subdivision level capped.
pub(crate) fn rock_mesh(
    options: &DecompositionOptions,
    strategy: &str,
) -> TriangleMesh {
    let detail = options.rock_subdivisions.min(MAX_ICOSPHERE_DETAIL);
    if detail != options.rock_subdivisions {
        log::warn!(
            "{strategy}: rock subdivisions {} clamped to {detail}",
            options.rock_subdivisions
        );
    }
    TriangleMesh::icosphere(options.rock_radius, detail)
}

/// What the host wants fragmented.
#[derive(Debug, Clone)]
pub enum ShapeSource {
    /// The built-in cube split into a grid of cells.
    Procedural {
        /// Requested number of cells.
        fragment_count: u32,
    },
    /// An imported model, one fragment per renderable node.
    ImportedModel {
        /// The loaded model.
        model: Arc<Model>,
    },
    /// Particles sampled on the surface of every mesh of a model.
    SampledModel {
        /// The loaded model.
        model: Arc<Model>,
        /// Particles per mesh.
        count: u32,
    },
    /// Particles on a procedural rock that blow out ballistically.
    RockParticles {
        /// Number of particles.
        count: u32,
    },
    /// A sphere covered in tiles.
    HexSphere {
        /// Where the tiles go.
        layout: TileLayout,
    },
    /// Rough rock chunks that scatter a short distance.
    OrganicChunks {
        /// Number of chunks.
        count: u32,
    },
}

impl Default for ShapeSource {
    fn default() -> Self {
        Self::Procedural { fragment_count: 27 }
    }
}

/// Identity of a [`ShapeSource`]; models are identified by version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKey {
    /// See [`ShapeSource::Procedural`].
    Procedural(u32),
    /// Model version.
    ImportedModel(u64),
    /// Model version and per-mesh count.
    SampledModel(u64, u32),
    /// Particle count.
    RockParticles(u32),
    /// Tile layout.
    HexSphere(TileLayout),
    /// Chunk count.
    OrganicChunks(u32),
}

/// Everything that determines a decomposition apart from the options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DecompositionKey {
    /// Which shape.
    pub source: SourceKey,
    /// RNG seed, if any.
    pub seed: Option<u64>,
}

impl ShapeSource {
    /// Memoisation identity.
    #[must_use]
    pub fn key(&self) -> SourceKey {
        match self {
            Self::Procedural { fragment_count } => {
                SourceKey::Procedural(*fragment_count)
            }
            Self::ImportedModel { model } => {
                SourceKey::ImportedModel(model.version())
            }
            Self::SampledModel { model, count } => {
                SourceKey::SampledModel(model.version(), *count)
            }
            Self::RockParticles { count } => SourceKey::RockParticles(*count),
            Self::HexSphere { layout } => SourceKey::HexSphere(*layout),
            Self::OrganicChunks { count } => SourceKey::OrganicChunks(*count),
        }
    }

    /// The strategy that fragments this source.
    #[must_use]
    pub fn decomposer(&self) -> Box<dyn ShapeDecomposer + '_> {
        match self {
            Self::Procedural { fragment_count } => Box::new(GridDecomposer {
                fragment_count: *fragment_count,
            }),
            Self::ImportedModel { model } => {
                Box::new(GraphDecomposer::new(model.as_ref()))
            }
            Self::SampledModel { model, count } => {
                Box::new(SampledModelDecomposer::new(model.as_ref(), *count))
            }
            Self::RockParticles { count } => {
                Box::new(RockParticleDecomposer { count: *count })
            }
            Self::HexSphere { layout } => {
                Box::new(TilingDecomposer { layout: *layout })
            }
            Self::OrganicChunks { count } => {
                Box::new(ChunkDecomposer { count: *count })
            }
        }
    }
}

/// Decompose `source` into a fresh [`FragmentSet`].
pub fn decompose(
    source: &ShapeSource,
    options: &Options,
    seed: Option<u64>,
) -> Result<FragmentSet, ShatterError> {
    let mut ctx = DecomposeContext::new(options, seed);
    let decomposer = source.decomposer();
    let set = decomposer.build(&mut ctx)?;
    log::debug!(
        "{} decomposition produced {} fragments",
        set.strategy(),
        set.len()
    );
    Ok(set)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::SceneNode;

    #[test]
    fn default_source_is_a_27_cell_cube() {
        let set =
            decompose(&ShapeSource::default(), &Options::default(), Some(1))
                .unwrap();
        assert_eq!(set.len(), 27);
        assert_eq!(set.strategy(), "grid");
        assert_eq!(set.hover_scope(), HoverScope::PerFragment);
        assert_eq!(set.motion(), MotionMode::Bounded);
    }

    #[test]
    fn strategy_traits_follow_source_kind() {
        let options = Options::default();
        let cases = [
            (
                ShapeSource::RockParticles { count: 50 },
                HoverScope::Group,
                MotionMode::Ballistic,
            ),
            (
                ShapeSource::HexSphere {
                    layout: TileLayout::TruncatedIcosahedron,
                },
                HoverScope::Group,
                MotionMode::Bounded,
            ),
            (
                ShapeSource::OrganicChunks { count: 6 },
                HoverScope::Group,
                MotionMode::Bounded,
            ),
        ];
        for (source, scope, motion) in cases {
            let set = decompose(&source, &options, Some(4)).unwrap();
            assert_eq!(set.hover_scope(), scope, "{}", set.strategy());
            assert_eq!(set.motion(), motion, "{}", set.strategy());
            assert!(!set.is_empty());
        }
    }

    #[test]
    fn model_key_tracks_version_not_contents() {
        let a = Arc::new(Model::new("m", SceneNode::default()));
        let b = Arc::new(Model::new("m", SceneNode::default()));
        let ka = ShapeSource::ImportedModel {
            model: Arc::clone(&a),
        }
        .key();
        let ka2 = ShapeSource::ImportedModel { model: a }.key();
        let kb = ShapeSource::ImportedModel { model: b }.key();
        assert_eq!(ka, ka2);
        assert_ne!(ka, kb);
    }

    #[test]
    fn empty_model_yields_empty_set() {
        let model = Arc::new(Model::new("empty.glb", SceneNode::default()));
        let set = decompose(
            &ShapeSource::ImportedModel { model },
            &Options::default(),
            None,
        )
        .unwrap();
        assert!(set.is_empty());
    }

    #[test]
    fn unseeded_contexts_differ() {
        let options = Options::default();
        let a = decompose(&ShapeSource::default(), &options, None).unwrap();
        let b = decompose(&ShapeSource::default(), &options, None).unwrap();
        let same = a
            .fragments()
            .iter()
            .zip(b.fragments())
            .all(|(x, y)| x.target_position() == y.target_position());
        assert!(!same);
    }
}
