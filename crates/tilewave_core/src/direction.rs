//! # Grid Directions
//!
//! The four orthogonal directions, in the same order as a tile's edge array
//! (top, right, bottom, left). Rows grow downward, so `Up` is `y - 1`.

/// An orthogonal direction on the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Direction {
    /// Toward row `y - 1`; faces a tile's top edge.
    Up = 0,
    /// Toward column `x + 1`; faces a tile's right edge.
    Right = 1,
    /// Toward row `y + 1`; faces a tile's bottom edge.
    Down = 2,
    /// Toward column `x - 1`; faces a tile's left edge.
    Left = 3,
}

impl Direction {
    /// All directions in edge-array order.
    pub const ALL: [Self; 4] = [Self::Up, Self::Right, Self::Down, Self::Left];

    /// Index into a tile's `[top, right, bottom, left]` edge array.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The direction pointing back the other way.
    #[inline]
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Right => Self::Left,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
        }
    }

    /// Column and row delta of one step in this direction.
    #[inline]
    #[must_use]
    pub const fn offset(self) -> (isize, isize) {
        match self {
            Self::Up => (0, -1),
            Self::Right => (1, 0),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposite_is_involution() {
        for dir in Direction::ALL {
            assert_eq!(dir.opposite().opposite(), dir);
            assert_ne!(dir.opposite(), dir);
        }
    }

    #[test]
    fn test_offsets_cancel_with_opposite() {
        for dir in Direction::ALL {
            let (dx, dy) = dir.offset();
            let (ox, oy) = dir.opposite().offset();
            assert_eq!((dx + ox, dy + oy), (0, 0));
        }
    }

    #[test]
    fn test_index_matches_edge_order() {
        let indices: Vec<usize> = Direction::ALL.iter().map(|d| d.index()).collect();
        assert_eq!(indices, vec![0, 1, 2, 3]);
    }
}
