//! # Generation Configuration
//!
//! One TOML document describes a whole run: the `[generation]` table sets
//! the grid and retry policy, the `[tileset]` table is handed to the core
//! catalog loader unchanged.
//!
//! ```toml
//! [generation]
//! width = 28
//! height = 20
//! seed = 12345
//! max_attempts = 100
//! propagation = "single_hop"
//!
//! [generation.initial]
//! x = 0
//! y = 0
//! tile = 6
//!
//! [tileset]
//! edge_rule = "exact"
//! # [[tileset.tiles]] ...
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tilewave_core::{GenerationSeed, PropagationStrategy, TileId, TilesetConfig};

use crate::error::GenerationResult;

/// Default bound on attempts per run.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 100;

fn default_max_attempts() -> u32 {
    DEFAULT_MAX_ATTEMPTS
}

/// A tile forced at the start of every attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InitialPlacement {
    /// Column.
    pub x: usize,
    /// Row.
    pub y: usize,
    /// Tile forced into the cell.
    pub tile: TileId,
}

/// Grid size, seed and retry policy.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GenerationConfig {
    /// Grid width in cells.
    pub width: usize,
    /// Grid height in cells.
    pub height: usize,
    /// Master seed. Attempt `n` uses `seed.derive(n)`.
    #[serde(default)]
    pub seed: u64,
    /// Attempts before giving up.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    /// Propagation depth.
    #[serde(default)]
    pub propagation: PropagationStrategy,
    /// Optional fixed first placement.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial: Option<InitialPlacement>,
}

impl GenerationConfig {
    /// Creates a config with default seed, attempt bound and propagation.
    #[must_use]
    pub const fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            seed: 0,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            propagation: PropagationStrategy::SingleHop,
            initial: None,
        }
    }

    /// The master seed as a [`GenerationSeed`].
    #[must_use]
    pub const fn master_seed(&self) -> GenerationSeed {
        GenerationSeed::new(self.seed)
    }
}

/// A complete run description.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TilewaveConfig {
    /// Grid and retry settings.
    pub generation: GenerationConfig,
    /// Tile catalog source.
    pub tileset: TilesetConfig,
}

impl TilewaveConfig {
    /// Parses a run description from TOML text.
    ///
    /// # Errors
    ///
    /// Returns `Config` on malformed TOML or unknown fields.
    pub fn from_toml_str(text: &str) -> GenerationResult<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Reads and parses a run description.
    ///
    /// # Errors
    ///
    /// Returns `Io` if the file cannot be read, `Config` if it cannot be parsed.
    pub fn from_toml_file(path: impl AsRef<Path>) -> GenerationResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }
}
