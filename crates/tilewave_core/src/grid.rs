//! # Grid Arena
//!
//! A fixed `width x height` arena of [`Cell`]s stored row-major.
//!
//! Cells are addressed by coordinates only. Nothing hands out long-lived
//! references to cells, so selection and propagation pass [`CellCoord`]s
//! around and the grid stays the single owner.

use crate::catalog::Catalog;
use crate::cell::Cell;
use crate::direction::Direction;
use crate::error::{WaveError, WaveResult};
use crate::tilemap::TileMap;

/// Grid coordinate. `x` is the column, `y` the row (growing downward).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellCoord {
    /// Column.
    pub x: usize,
    /// Row.
    pub y: usize,
}

impl CellCoord {
    /// Creates a new coordinate.
    #[inline]
    #[must_use]
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

/// Exclusive owner of every cell for one generation attempt.
///
/// The shape never changes after construction. On contradiction the whole
/// grid is dropped and a new one is built.
#[derive(Clone, Debug)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Creates a grid where every cell may still be any catalog tile.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if either dimension is zero or the cell count
    /// does not fit in `usize`.
    pub fn new(width: usize, height: usize, catalog: &Catalog) -> WaveResult<Self> {
        if width == 0 || height == 0 {
            return Err(WaveError::InvalidConfig(format!(
                "Grid dimensions must be non-zero, got {width}x{height}"
            )));
        }
        let count = width.checked_mul(height).ok_or_else(|| {
            WaveError::InvalidConfig(format!("Grid of {width}x{height} cells is too large"))
        })?;

        let all: Vec<_> = catalog.ids().collect();
        Ok(Self {
            width,
            height,
            cells: vec![Cell::new(all); count],
        })
    }

    /// Number of columns.
    #[inline]
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    #[inline]
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Total number of cells.
    #[inline]
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    fn index(&self, x: usize, y: usize) -> WaveResult<usize> {
        if x >= self.width || y >= self.height {
            return Err(WaveError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(y * self.width + x)
    }

    /// The cell at `(x, y)`.
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` if the coordinates are outside the grid.
    pub fn at(&self, x: usize, y: usize) -> WaveResult<&Cell> {
        let idx = self.index(x, y)?;
        Ok(&self.cells[idx])
    }

    /// Mutable access to the cell at `(x, y)`.
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` if the coordinates are outside the grid.
    pub fn at_mut(&mut self, x: usize, y: usize) -> WaveResult<&mut Cell> {
        let idx = self.index(x, y)?;
        Ok(&mut self.cells[idx])
    }

    /// The coordinate one step from `coord` in `direction`, if it exists.
    #[must_use]
    pub fn neighbor(&self, coord: CellCoord, direction: Direction) -> Option<CellCoord> {
        let (dx, dy) = direction.offset();
        let x = coord.x.checked_add_signed(dx)?;
        let y = coord.y.checked_add_signed(dy)?;
        (x < self.width && y < self.height).then_some(CellCoord::new(x, y))
    }

    /// The orthogonal neighbors of `(x, y)` that exist. Edge and corner cells
    /// have fewer than four.
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` if `(x, y)` itself is outside the grid.
    pub fn neighbors(&self, x: usize, y: usize) -> WaveResult<Vec<(Direction, CellCoord)>> {
        self.index(x, y)?;
        let origin = CellCoord::new(x, y);
        Ok(Direction::ALL
            .into_iter()
            .filter_map(|dir| self.neighbor(origin, dir).map(|coord| (dir, coord)))
            .collect())
    }

    /// True iff every cell is collapsed.
    #[must_use]
    pub fn is_fully_collapsed(&self) -> bool {
        self.cells.iter().all(Cell::is_collapsed)
    }

    /// Number of collapsed cells.
    #[must_use]
    pub fn collapsed_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_collapsed()).count()
    }

    /// Every cell with its coordinate, row by row.
    pub fn cells(&self) -> impl Iterator<Item = (CellCoord, &Cell)> + '_ {
        let width = self.width;
        self.cells
            .iter()
            .enumerate()
            .map(move |(idx, cell)| (CellCoord::new(idx % width, idx / width), cell))
    }

    /// Option counts per cell, `map[y][x]`.
    #[must_use]
    pub fn entropy_map(&self) -> Vec<Vec<usize>> {
        self.cells
            .chunks(self.width)
            .map(|row| row.iter().map(Cell::entropy).collect())
            .collect()
    }

    /// The decided tile of every cell, or `None` while any cell is undecided.
    #[must_use]
    pub fn tile_map(&self) -> Option<TileMap> {
        let tiles = self
            .cells
            .iter()
            .map(Cell::decided)
            .collect::<Option<Vec<_>>>()?;
        Some(TileMap::new(self.width, self.height, tiles))
    }
}
