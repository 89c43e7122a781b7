//! # Tile Map
//!
//! The finished `(x, y) -> tile id` assignment handed to whatever draws it.

use std::fmt;

use crate::catalog::TileId;

/// A fully decided grid of tile ids, row-major.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TileMap {
    width: usize,
    height: usize,
    tiles: Vec<TileId>,
}

impl TileMap {
    pub(crate) fn new(width: usize, height: usize, tiles: Vec<TileId>) -> Self {
        debug_assert_eq!(tiles.len(), width * height);
        Self {
            width,
            height,
            tiles,
        }
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

    /// Tile at `(x, y)`, or `None` outside the map.
    #[must_use]
    pub fn get(&self, x: usize, y: usize) -> Option<TileId> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.tiles.get(y * self.width + x).copied()
    }

    /// Rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[TileId]> + '_ {
        self.tiles.chunks(self.width)
    }

    /// All tiles, row-major.
    #[must_use]
    pub fn as_slice(&self) -> &[TileId] {
        &self.tiles
    }
}

impl fmt::Display for TileMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pad = self
            .tiles
            .iter()
            .map(|id| id.to_string().len())
            .max()
            .unwrap_or(1);

        for (row_idx, row) in self.rows().enumerate() {
            if row_idx > 0 {
                writeln!(f)?;
            }
            for (col, id) in row.iter().enumerate() {
                if col > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{id:>pad$}")?;
            }
        }
        Ok(())
    }
}
