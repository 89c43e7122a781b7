//! # Cell State
//!
//! One grid position: the tile ids still consistent with already-decided
//! neighbors, plus the decision once it has been made.
//!
//! Option sets only ever shrink. `restrict` removes options, `collapse`
//! reduces the set to the single chosen id. Neither ever adds one back.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::catalog::TileId;
use crate::error::{WaveError, WaveResult};

/// Mutable per-position state.
///
/// Invariant: `decided` is `Some(id)` iff the cell is collapsed, and then
/// `options == [id]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    /// Remaining candidate ids, in catalog order.
    options: Vec<TileId>,
    /// The committed tile, once collapsed.
    decided: Option<TileId>,
}

impl Cell {
    /// Creates an uncollapsed cell with the given candidates.
    #[must_use]
    pub fn new(options: Vec<TileId>) -> Self {
        Self {
            options,
            decided: None,
        }
    }

    /// Number of remaining options. Lower means more constrained.
    #[inline]
    #[must_use]
    pub fn entropy(&self) -> usize {
        self.options.len()
    }

    /// Remaining candidate ids.
    #[inline]
    #[must_use]
    pub fn options(&self) -> &[TileId] {
        &self.options
    }

    /// Whether the cell has been committed to a tile.
    #[inline]
    #[must_use]
    pub const fn is_collapsed(&self) -> bool {
        self.decided.is_some()
    }

    /// The committed tile id, if collapsed.
    #[inline]
    #[must_use]
    pub const fn decided(&self) -> Option<TileId> {
        self.decided
    }

    /// Whether the option set is empty (a contradiction).
    #[inline]
    #[must_use]
    pub fn is_contradicted(&self) -> bool {
        self.options.is_empty()
    }

    /// Commits the cell to one tile and returns its id.
    ///
    /// With `forced` the given id is used; otherwise one option is picked
    /// uniformly at random.
    ///
    /// # Errors
    ///
    /// - `AlreadyCollapsed` if the cell was collapsed before.
    /// - `EmptyOptions` if there is nothing left to choose from.
    /// - `InvalidForcedChoice` if `forced` is not a remaining option.
    pub fn collapse<R: Rng + ?Sized>(
        &mut self,
        forced: Option<TileId>,
        rng: &mut R,
    ) -> WaveResult<TileId> {
        if self.is_collapsed() {
            return Err(WaveError::AlreadyCollapsed);
        }
        if self.options.is_empty() {
            return Err(WaveError::EmptyOptions);
        }

        let chosen = match forced {
            Some(id) if self.options.contains(&id) => id,
            Some(id) => return Err(WaveError::InvalidForcedChoice(id)),
            None => *self.options.choose(rng).ok_or(WaveError::EmptyOptions)?,
        };

        self.options.clear();
        self.options.push(chosen);
        self.decided = Some(chosen);
        Ok(chosen)
    }

    /// Removes every option for which `keep` returns false.
    ///
    /// Returns whether anything was removed.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyCollapsed` on a collapsed cell; its option set is left untouched.
    pub fn restrict<F>(&mut self, mut keep: F) -> WaveResult<bool>
    where
        F: FnMut(TileId) -> bool,
    {
        if self.is_collapsed() {
            return Err(WaveError::AlreadyCollapsed);
        }

        let before = self.options.len();
        self.options.retain(|&id| keep(id));
        Ok(self.options.len() != before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(42)
    }

    #[test]
    fn test_entropy_counts_options() {
        let cell = Cell::new(vec![1, 2, 3]);
        assert_eq!(cell.entropy(), 3);
        assert!(!cell.is_collapsed());
        assert_eq!(cell.decided(), None);
    }

    #[test]
    fn test_random_collapse_picks_an_option() {
        let mut cell = Cell::new(vec![4, 8, 15]);
        let chosen = cell.collapse(None, &mut rng()).unwrap();
        assert!([4, 8, 15].contains(&chosen));
        assert_eq!(cell.options(), &[chosen]);
        assert_eq!(cell.decided(), Some(chosen));
        assert_eq!(cell.entropy(), 1);
    }

    #[test]
    fn test_forced_collapse() {
        let mut cell = Cell::new(vec![1, 2, 3]);
        assert_eq!(cell.collapse(Some(2), &mut rng()), Ok(2));
        assert_eq!(cell.options(), &[2]);
    }

    #[test]
    fn test_forced_collapse_must_be_an_option() {
        let mut cell = Cell::new(vec![1, 2, 3]);
        assert_eq!(
            cell.collapse(Some(9), &mut rng()),
            Err(WaveError::InvalidForcedChoice(9))
        );
        // Failed call leaves the cell as it was.
        assert_eq!(cell.options(), &[1, 2, 3]);
        assert!(!cell.is_collapsed());
    }

    #[test]
    fn test_collapse_twice_fails() {
        let mut cell = Cell::new(vec![1, 2]);
        cell.collapse(None, &mut rng()).unwrap();
        assert_eq!(cell.collapse(None, &mut rng()), Err(WaveError::AlreadyCollapsed));
        assert_eq!(cell.collapse(Some(1), &mut rng()), Err(WaveError::AlreadyCollapsed));
    }

    #[test]
    fn test_collapse_of_empty_cell() {
        let mut cell = Cell::new(Vec::new());
        assert!(cell.is_contradicted());
        assert_eq!(cell.collapse(None, &mut rng()), Err(WaveError::EmptyOptions));
        assert_eq!(cell.collapse(Some(1), &mut rng()), Err(WaveError::EmptyOptions));
    }

    #[test]
    fn test_restrict_reports_change() {
        let mut cell = Cell::new(vec![1, 2, 3, 4]);
        assert_eq!(cell.restrict(|id| id % 2 == 0), Ok(true));
        assert_eq!(cell.options(), &[2, 4]);
        assert_eq!(cell.restrict(|id| id > 0), Ok(false));
        assert_eq!(cell.restrict(|_| false), Ok(true));
        assert!(cell.is_contradicted());
    }

    #[test]
    fn test_restrict_after_collapse_is_rejected() {
        let mut cell = Cell::new(vec![1, 2, 3]);
        cell.collapse(Some(3), &mut rng()).unwrap();
        assert_eq!(cell.restrict(|_| false), Err(WaveError::AlreadyCollapsed));
        assert_eq!(cell.options(), &[3]);
    }

    #[test]
    fn test_random_collapse_is_seeded() {
        let mut a = Cell::new((0..32).collect());
        let mut b = Cell::new((0..32).collect());
        assert_eq!(
            a.collapse(None, &mut ChaCha8Rng::seed_from_u64(7)),
            b.collapse(None, &mut ChaCha8Rng::seed_from_u64(7))
        );
    }
}
