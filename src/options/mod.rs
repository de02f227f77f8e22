//! Centralized engine options with TOML preset support.
//!
//! All tweakable settings (progress filter, easing, trajectory ranges,
//! decomposition geometry) are consolidated here. Options serialize to/from
//! TOML so hosts can ship presets next to their assets.

mod animation;
mod decomposition;
mod trajectory;

use std::path::Path;

pub use animation::AnimationOptions;
pub use decomposition::DecompositionOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
pub use trajectory::TrajectoryOptions;

use crate::error::ShatterError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[animation]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Progress filter and easing.
    pub animation: AnimationOptions,
    /// Exploded pose planning.
    pub trajectory: TrajectoryOptions,
    /// Shape decomposition geometry.
    pub decomposition: DecompositionOptions,
}

impl Options {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, ShatterError> {
        let content = std::fs::read_to_string(path).map_err(ShatterError::Io)?;
        Self::from_toml(&content)
    }

    /// Parse options from TOML text. Missing fields use defaults.
    pub fn from_toml(content: &str) -> Result<Self, ShatterError> {
        toml::from_str(content)
            .map_err(|e| ShatterError::OptionsParse(e.to_string()))
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), ShatterError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| ShatterError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ShatterError::Io)?;
        }
        std::fs::write(path, content).map_err(ShatterError::Io)
    }

    /// Whether switching from `self` to `other` changes how shapes are
    /// decomposed (and therefore requires a rebuild of the fragment set).
    #[must_use]
    pub fn affects_decomposition(&self, other: &Options) -> bool {
        self.trajectory != other.trajectory
            || self.decomposition != other.decomposition
    }
}
