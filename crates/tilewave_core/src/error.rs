//! # Solver Error Types
//!
//! All errors that can occur while building a catalog or solving a grid.
//!
//! Only [`WaveError::Contradiction`] is expected during normal generation.
//! Every other kind is a caller or configuration defect and should not be
//! caught and retried.

use thiserror::Error;

use crate::catalog::TileId;

/// Errors that can occur in the tile solver.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WaveError {
    /// Coordinates outside the grid.
    #[error("cell ({x}, {y}) is outside the {width}x{height} grid")]
    OutOfBounds {
        /// Requested column.
        x: usize,
        /// Requested row.
        y: usize,
        /// Grid width.
        width: usize,
        /// Grid height.
        height: usize,
    },

    /// The cell has already been collapsed and cannot change again.
    #[error("cell is already collapsed")]
    AlreadyCollapsed,

    /// A forced choice named a tile that is not in the cell's option set.
    #[error("tile {0} is not among the cell's remaining options")]
    InvalidForcedChoice(TileId),

    /// A collapse was attempted on a cell with no options left.
    #[error("cell has no remaining options")]
    EmptyOptions,

    /// A cell's option set became empty. The grid must be discarded.
    #[error("contradiction at cell ({x}, {y})")]
    Contradiction {
        /// Column of the emptied cell.
        x: usize,
        /// Row of the emptied cell.
        y: usize,
    },

    /// Tile ID not found in the catalog.
    #[error("unknown tile: {0}")]
    UnknownTile(TileId),

    /// Selection was requested on a fully collapsed grid.
    #[error("no uncollapsed cells remain")]
    NoCellsRemain,

    /// Invalid tileset or solver configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl WaveError {
    /// Returns `true` for the one error kind a driver may recover from by
    /// discarding the grid and starting over.
    #[inline]
    #[must_use]
    pub const fn is_contradiction(&self) -> bool {
        matches!(self, Self::Contradiction { .. })
    }
}

/// Result type for solver operations.
pub type WaveResult<T> = Result<T, WaveError>;
