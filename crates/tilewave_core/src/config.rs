//! # Tileset Configuration
//!
//! The catalog's only configuration surface: a list of tiles, each either
//! spelled out with four edge labels or derived by rotating an earlier
//! entry. Loaded once at startup from TOML.
//!
//! ```toml
//! edge_rule = "exact"
//!
//! [[tiles]]
//! id = 1
//! sprite = "shore"
//! edges = ["bbb", "aaa", "aaa", "aaa"]
//!
//! [[tiles]]
//! id = 2
//! base = 1
//! turns = 1
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, CatalogBuilder, EdgeLabel, EdgeRule, TileId, TileSpec};
use crate::error::{WaveError, WaveResult};

/// One `[[tiles]]` entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TileConfig {
    /// Tile identifier, unique within the tileset.
    pub id: TileId,
    /// Sprite name for the renderer. Rotated entries inherit their base's.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sprite: Option<String>,
    /// Edge labels, `[top, right, bottom, left]`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edges: Option<[EdgeLabel; 4]>,
    /// Id of an earlier entry to rotate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base: Option<TileId>,
    /// Quarter turns applied to `base` (default 1).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub turns: Option<u8>,
}

/// A complete tileset: edge rule plus tile list.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TilesetConfig {
    /// Matching rule applied to every adjacency.
    #[serde(default)]
    pub edge_rule: EdgeRule,
    /// Tiles in declaration order. Rotations may only name earlier entries.
    pub tiles: Vec<TileConfig>,
}

impl TilesetConfig {
    /// Parses a tileset from TOML text.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` on malformed TOML or unknown fields.
    pub fn from_toml_str(text: &str) -> WaveResult<Self> {
        toml::from_str(text).map_err(|err| WaveError::InvalidConfig(err.to_string()))
    }

    /// Reads and parses a tileset file.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the file cannot be read or parsed.
    pub fn from_toml_file(path: impl AsRef<Path>) -> WaveResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|err| {
            WaveError::InvalidConfig(format!("cannot read {}: {err}", path.display()))
        })?;
        Self::from_toml_str(&text)
    }

    /// Builds the immutable catalog.
    ///
    /// # Errors
    ///
    /// - `InvalidConfig` for duplicate ids, entries with both or neither of
    ///   `edges` / `base`, `turns` or `sprite` on the wrong kind of entry,
    ///   empty labels, or an empty tile list.
    /// - `UnknownTile` if a rotation names a base that is not declared earlier.
    pub fn build(&self) -> WaveResult<Catalog> {
        let mut builder = CatalogBuilder::new(self.edge_rule);

        for entry in &self.tiles {
            match (&entry.edges, entry.base) {
                (Some(edges), None) => {
                    if entry.turns.is_some() {
                        return Err(WaveError::InvalidConfig(format!(
                            "Tile {} sets turns without a base",
                            entry.id
                        )));
                    }
                    let mut tile = TileSpec::new(entry.id, edges.clone());
                    if let Some(sprite) = &entry.sprite {
                        tile = tile.with_sprite(sprite.clone());
                    }
                    builder.add_tile(tile)?;
                }
                (None, Some(base)) => {
                    if entry.sprite.is_some() {
                        return Err(WaveError::InvalidConfig(format!(
                            "Tile {} is a rotation and inherits the sprite of tile {}",
                            entry.id, base
                        )));
                    }
                    builder.add_rotation(entry.id, base, entry.turns.unwrap_or(1))?;
                }
                (Some(_), Some(_)) => {
                    return Err(WaveError::InvalidConfig(format!(
                        "Tile {} sets both edges and base",
                        entry.id
                    )));
                }
                (None, None) => {
                    return Err(WaveError::InvalidConfig(format!(
                        "Tile {} needs either edges or base",
                        entry.id
                    )));
                }
            }
        }

        builder.build()
    }
}
