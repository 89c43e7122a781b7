//! # TILEWAVE Core
//!
//! Edge-matched tile placement with a Wave Function Collapse style solver.
//!
//! ## Design Principles
//!
//! 1. **Deterministic**: Same seed always produces the same map
//! 2. **Coordinates, not references**: the grid is an arena indexed by `(x, y)`
//! 3. **Monotone**: a cell's option set only ever shrinks
//! 4. **Fail fast**: a contradiction is reported upward, never repaired
//!
//! ## Core Components
//!
//! - `Catalog`: immutable tile table with edge connectors and adjacency table
//! - `Cell`: remaining candidate tile ids for one position
//! - `Grid`: fixed 2-D arena of cells with neighbor lookup
//! - `Solver`: minimum-entropy selection, collapse, propagation
//! - `TilesetConfig`: TOML tileset loading with rotation derivation
//!
//! ## Example
//!
//! ```rust,ignore
//! use tilewave_core::{GenerationSeed, PropagationStrategy, Solver, TilesetConfig};
//!
//! let catalog = TilesetConfig::from_toml_file("tileset.toml")?.build()?;
//! let mut solver = Solver::with_seed(
//!     &catalog,
//!     28,
//!     20,
//!     PropagationStrategy::SingleHop,
//!     GenerationSeed::new(12345),
//! )?;
//!
//! while !solver.is_fully_collapsed() {
//!     let next = solver.select_next_cell()?;
//!     solver.collapse_and_propagate(next.x, next.y, None)?;
//! }
//! let map = solver.grid().tile_map();
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod catalog;
pub mod cell;
pub mod config;
pub mod direction;
pub mod error;
pub mod grid;
pub mod seed;
pub mod solver;
pub mod tilemap;

pub use catalog::{Catalog, CatalogBuilder, EdgeLabel, EdgeRule, TileId, TileSpec};
pub use cell::Cell;
pub use config::{TileConfig, TilesetConfig};
pub use direction::Direction;
pub use error::{WaveError, WaveResult};
pub use grid::{CellCoord, Grid};
pub use seed::GenerationSeed;
pub use solver::{PropagationStrategy, Solver};
pub use tilemap::TileMap;
