//! # Collapse / Propagate Solver
//!
//! The algorithmic core:
//!
//! 1. **Select**: among uncollapsed cells, find the minimum entropy and
//!    pick one of the tied cells uniformly at random. Row-major first-match
//!    would bias the pattern toward the top-left corner.
//! 2. **Collapse**: commit the selected cell to one of its options.
//! 3. **Propagate**: narrow the neighbors' option sets so that every
//!    remaining option is compatible with the decision.
//!
//! ## Propagation strategies
//!
//! - [`PropagationStrategy::SingleHop`] narrows only the four direct
//!   neighbors of the collapsed cell. A neighbor that shrinks does not
//!   ripple further. This is the classic behavior of the reference tile
//!   generator and contradicts more often.
//! - [`PropagationStrategy::Transitive`] keeps a worklist and re-narrows
//!   the neighbors of every cell whose option set shrank, until nothing
//!   changes.
//!
//! A collapsed neighbor is never restricted. It is checked instead, and an
//! incompatible decision is reported as a contradiction.
//!
//! ## Failure model
//!
//! There is no backtracking. The first empty option set aborts the call
//! with [`WaveError::Contradiction`] and leaves the grid in an unusable
//! state; the caller drops it and starts over.
//!
//! ## Concurrency
//!
//! Single-threaded by construction: every operation takes `&mut self`, so
//! no collapse can interleave with another collapse's propagation.

use std::collections::VecDeque;

use rand::seq::SliceRandom;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, TileId};
use crate::direction::Direction;
use crate::error::{WaveError, WaveResult};
use crate::grid::{CellCoord, Grid};
use crate::seed::GenerationSeed;
use crate::tilemap::TileMap;

/// How far a collapse propagates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropagationStrategy {
    /// Narrow the direct neighbors only.
    #[default]
    SingleHop,
    /// Narrow until no option set changes anymore.
    Transitive,
}

/// Drives one grid from all-options to fully decided (or contradiction).
///
/// Borrows the shared catalog; owns the grid and the random generator.
#[derive(Debug)]
pub struct Solver<'c, R = ChaCha8Rng> {
    catalog: &'c Catalog,
    grid: Grid,
    strategy: PropagationStrategy,
    rng: R,
    /// Collapses performed so far.
    steps: usize,
    /// Scratch: cells tied for minimum entropy.
    ties: Vec<CellCoord>,
    /// Scratch: options of the cell being propagated from.
    support: Vec<TileId>,
    /// Scratch: transitive propagation queue.
    worklist: VecDeque<CellCoord>,
}

impl<'c> Solver<'c, ChaCha8Rng> {
    /// Creates a solver whose randomness is derived from `seed`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if either dimension is zero.
    pub fn with_seed(
        catalog: &'c Catalog,
        width: usize,
        height: usize,
        strategy: PropagationStrategy,
        seed: GenerationSeed,
    ) -> WaveResult<Self> {
        Self::new(catalog, width, height, strategy, seed.rng())
    }
}

impl<'c, R: Rng> Solver<'c, R> {
    /// Creates a solver over a fresh `width x height` grid.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if either dimension is zero.
    pub fn new(
        catalog: &'c Catalog,
        width: usize,
        height: usize,
        strategy: PropagationStrategy,
        rng: R,
    ) -> WaveResult<Self> {
        Ok(Self {
            catalog,
            grid: Grid::new(width, height, catalog)?,
            strategy,
            rng,
            steps: 0,
            ties: Vec::new(),
            support: Vec::new(),
            worklist: VecDeque::new(),
        })
    }

    /// The catalog this solver places tiles from.
    #[must_use]
    pub const fn catalog(&self) -> &'c Catalog {
        self.catalog
    }

    /// The grid being solved.
    #[must_use]
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Mutable access to the grid, for callers that place cells by hand.
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    /// Mutable access to the random generator.
    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    /// The propagation strategy in use.
    #[must_use]
    pub const fn strategy(&self) -> PropagationStrategy {
        self.strategy
    }

    /// Number of collapses performed by this solver.
    #[must_use]
    pub const fn steps(&self) -> usize {
        self.steps
    }

    /// True iff every cell is collapsed.
    #[must_use]
    pub fn is_fully_collapsed(&self) -> bool {
        self.grid.is_fully_collapsed()
    }

    /// Option counts per cell, `map[y][x]`.
    #[must_use]
    pub fn entropy_map(&self) -> Vec<Vec<usize>> {
        self.grid.entropy_map()
    }

    /// Consumes the solver and returns its grid.
    #[must_use]
    pub fn into_grid(self) -> Grid {
        self.grid
    }

    /// Picks the next cell to decide: minimum entropy, ties broken uniformly at random.
    ///
    /// # Errors
    ///
    /// Returns `NoCellsRemain` if every cell is already collapsed.
    pub fn select_next_cell(&mut self) -> WaveResult<CellCoord> {
        self.ties.clear();
        let mut lowest = usize::MAX;

        for (coord, cell) in self.grid.cells() {
            if cell.is_collapsed() {
                continue;
            }
            let entropy = cell.entropy();
            if entropy < lowest {
                lowest = entropy;
                self.ties.clear();
            }
            if entropy == lowest {
                self.ties.push(coord);
            }
        }

        self.ties
            .choose(&mut self.rng)
            .copied()
            .ok_or(WaveError::NoCellsRemain)
    }

    /// Decides the cell at `(x, y)` and propagates the decision.
    ///
    /// With `forced` the cell is committed to that tile, otherwise to a
    /// uniformly random remaining option. Returns the chosen tile.
    ///
    /// # Errors
    ///
    /// - `OutOfBounds`, `AlreadyCollapsed`, `InvalidForcedChoice` for caller mistakes.
    /// - `Contradiction` if the cell had no options left, or if propagation
    ///   emptied a neighbor or met an incompatible collapsed neighbor.
    pub fn collapse_and_propagate(
        &mut self,
        x: usize,
        y: usize,
        forced: Option<TileId>,
    ) -> WaveResult<TileId> {
        let cell = self.grid.at_mut(x, y)?;
        let entropy = cell.entropy();
        let chosen = match cell.collapse(forced, &mut self.rng) {
            Err(WaveError::EmptyOptions) => {
                tracing::debug!("Contradiction: cell ({}, {}) has no options to collapse", x, y);
                return Err(WaveError::Contradiction { x, y });
            }
            result => result?,
        };
        self.steps += 1;

        tracing::trace!(
            "Collapsed ({}, {}) to tile {} from {} options",
            x,
            y,
            chosen,
            entropy
        );

        let origin = CellCoord::new(x, y);
        match self.strategy {
            PropagationStrategy::SingleHop => self.propagate_single_hop(origin)?,
            PropagationStrategy::Transitive => self.propagate_transitive(origin)?,
        }

        Ok(chosen)
    }

    /// One select-collapse-propagate round. Returns the decided coordinate.
    ///
    /// # Errors
    ///
    /// `NoCellsRemain` on a finished grid, or any error from
    /// [`collapse_and_propagate`](Self::collapse_and_propagate).
    pub fn step(&mut self) -> WaveResult<CellCoord> {
        let coord = self.select_next_cell()?;
        self.collapse_and_propagate(coord.x, coord.y, None)?;
        Ok(coord)
    }

    /// Steps until every cell is decided and returns the finished map.
    ///
    /// # Errors
    ///
    /// Stops at the first error, typically a `Contradiction`.
    pub fn run(&mut self) -> WaveResult<TileMap> {
        loop {
            match self.step() {
                Ok(_) => {}
                Err(WaveError::NoCellsRemain) => break,
                Err(err) => return Err(err),
            }
        }
        self.grid.tile_map().ok_or(WaveError::NoCellsRemain)
    }

    fn propagate_single_hop(&mut self, origin: CellCoord) -> WaveResult<()> {
        for direction in Direction::ALL {
            if let Some(target) = self.grid.neighbor(origin, direction) {
                self.narrow(origin, direction, target)?;
            }
        }
        Ok(())
    }

    fn propagate_transitive(&mut self, origin: CellCoord) -> WaveResult<()> {
        self.worklist.clear();
        self.worklist.push_back(origin);
        let mut visited = 0usize;

        while let Some(current) = self.worklist.pop_front() {
            visited += 1;
            for direction in Direction::ALL {
                let Some(target) = self.grid.neighbor(current, direction) else {
                    continue;
                };
                if self.narrow(current, direction, target)? {
                    self.worklist.push_back(target);
                }
            }
        }

        tracing::debug!(
            "Transitive propagation from ({}, {}) visited {} cells",
            origin.x,
            origin.y,
            visited
        );
        Ok(())
    }

    /// Keeps only the options of `target` that some option of `source` allows
    /// on its `direction` side. Returns whether `target` shrank.
    fn narrow(
        &mut self,
        source: CellCoord,
        direction: Direction,
        target: CellCoord,
    ) -> WaveResult<bool> {
        let catalog = self.catalog;
        self.support.clear();
        self.support
            .extend_from_slice(self.grid.at(source.x, source.y)?.options());
        let support = &self.support;
        let allowed = |candidate: TileId| {
            support
                .iter()
                .any(|&tile| catalog.compatible(tile, direction, candidate))
        };

        let cell = self.grid.at_mut(target.x, target.y)?;
        if let Some(decided) = cell.decided() {
            if allowed(decided) {
                return Ok(false);
            }
            tracing::debug!(
                "Contradiction: collapsed cell ({}, {}) rejects tile placed at ({}, {})",
                target.x,
                target.y,
                source.x,
                source.y
            );
            return Err(WaveError::Contradiction {
                x: target.x,
                y: target.y,
            });
        }

        let changed = cell.restrict(allowed)?;
        if cell.is_contradicted() {
            tracing::debug!(
                "Contradiction: cell ({}, {}) lost its last option",
                target.x,
                target.y
            );
            return Err(WaveError::Contradiction {
                x: target.x,
                y: target.y,
            });
        }
        Ok(changed)
    }
}
