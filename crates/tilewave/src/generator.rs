//! # Generator
//!
//! Wraps the core solver in the retry loop: every attempt starts from a
//! fresh grid and its own derived seed, applies the optional initial
//! placement, then solves. Attempts that hit a contradiction are
//! discarded and counted. Any other solver error is a defect in the
//! configuration or the caller and ends the run.

use std::time::Instant;

use tilewave_core::{Catalog, GenerationSeed, Solver, TileMap, WaveError, WaveResult};

use crate::config::{GenerationConfig, TilewaveConfig};
use crate::error::{GenerationError, GenerationResult};

/// Counters for one finished run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GenerationStats {
    /// Attempts made, including the successful one.
    pub attempts: u32,
    /// Attempts discarded on contradiction.
    pub contradictions: u32,
    /// Collapses performed by the successful attempt.
    pub steps: usize,
}

/// A finished map plus how it was reached.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Generation {
    /// The fully decided map.
    pub map: TileMap,
    /// Run counters.
    pub stats: GenerationStats,
    /// Entropy map of the most recent discarded attempt, at the moment it
    /// contradicted. `None` if the first attempt succeeded.
    pub last_contradiction: Option<Vec<Vec<usize>>>,
}

/// Outcome of a single attempt.
enum Attempt {
    Solved { map: TileMap, steps: usize },
    Contradicted { entropy: Vec<Vec<usize>> },
}

/// Owns a catalog and produces maps from it.
#[derive(Debug)]
pub struct Generator {
    catalog: Catalog,
    config: GenerationConfig,
}

impl Generator {
    /// Creates a generator after validating `config` against `catalog`.
    ///
    /// # Errors
    ///
    /// - `InvalidConfig` for a zero-sized or oversized grid, or a zero attempt bound.
    /// - `UnknownTile` if the initial placement names a tile not in the catalog.
    /// - `OutOfBounds` if the initial placement lies outside the grid.
    pub fn new(catalog: Catalog, config: GenerationConfig) -> GenerationResult<Self> {
        if config.width == 0 || config.height == 0 {
            return Err(WaveError::InvalidConfig(format!(
                "Grid must be at least 1x1, got {}x{}",
                config.width, config.height
            ))
            .into());
        }
        if config.width.checked_mul(config.height).is_none() {
            return Err(WaveError::InvalidConfig(format!(
                "Grid of {}x{} cells is too large",
                config.width, config.height
            ))
            .into());
        }
        if config.max_attempts == 0 {
            return Err(WaveError::InvalidConfig("max_attempts must be at least 1".into()).into());
        }
        if let Some(initial) = config.initial {
            catalog.lookup(initial.tile)?;
            if initial.x >= config.width || initial.y >= config.height {
                return Err(WaveError::OutOfBounds {
                    x: initial.x,
                    y: initial.y,
                    width: config.width,
                    height: config.height,
                }
                .into());
            }
        }

        Ok(Self { catalog, config })
    }

    /// Builds the catalog from a run description and wraps it.
    ///
    /// # Errors
    ///
    /// Any catalog build error, or a validation error from [`Generator::new`].
    pub fn from_config(config: &TilewaveConfig) -> GenerationResult<Self> {
        let catalog = config.tileset.build()?;
        Self::new(catalog, config.generation.clone())
    }

    /// The catalog tiles are drawn from.
    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The generation settings.
    #[must_use]
    pub const fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// Generates one map, retrying on contradiction.
    ///
    /// # Errors
    ///
    /// - `AttemptsExhausted` if every attempt contradicted.
    /// - `Wave` for any non-contradiction solver error.
    pub fn generate(&self) -> GenerationResult<Generation> {
        let started = Instant::now();
        let master = self.config.master_seed();
        let mut stats = GenerationStats::default();
        let mut last_contradiction = None;

        for attempt in 0..self.config.max_attempts {
            stats.attempts += 1;
            match self.attempt(master.derive(u64::from(attempt)))? {
                Attempt::Solved { map, steps } => {
                    stats.steps = steps;
                    tracing::info!(
                        "Generated {}x{} map after {} attempts ({} contradictions) in {:?}",
                        map.width(),
                        map.height(),
                        stats.attempts,
                        stats.contradictions,
                        started.elapsed()
                    );
                    return Ok(Generation {
                        map,
                        stats,
                        last_contradiction,
                    });
                }
                Attempt::Contradicted { entropy } => {
                    stats.contradictions += 1;
                    tracing::warn!(
                        "Attempt {} of {} discarded on contradiction",
                        attempt + 1,
                        self.config.max_attempts
                    );
                    last_contradiction = Some(entropy);
                }
            }
        }

        Err(GenerationError::AttemptsExhausted {
            attempts: stats.attempts,
        })
    }

    fn attempt(&self, seed: GenerationSeed) -> WaveResult<Attempt> {
        let mut solver = Solver::with_seed(
            &self.catalog,
            self.config.width,
            self.config.height,
            self.config.propagation,
            seed,
        )?;

        let solved = match self.config.initial {
            Some(initial) => solver
                .collapse_and_propagate(initial.x, initial.y, Some(initial.tile))
                .and_then(|_| solver.run()),
            None => solver.run(),
        };

        match solved {
            Ok(map) => Ok(Attempt::Solved {
                map,
                steps: solver.steps(),
            }),
            Err(err) if err.is_contradiction() => Ok(Attempt::Contradicted {
                entropy: solver.entropy_map(),
            }),
            Err(err) => Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::InitialPlacement;
    use tilewave_core::{CatalogBuilder, EdgeLabel, EdgeRule, TileId, TileSpec};

    fn tile(id: TileId, labels: [&str; 4]) -> TileSpec {
        TileSpec::new(id, labels.map(EdgeLabel::from))
    }

    fn two_colour() -> Catalog {
        let mut builder = CatalogBuilder::new(EdgeRule::Exact);
        builder.add_tile(tile(1, ["a", "a", "a", "a"])).unwrap();
        builder.add_tile(tile(2, ["b", "b", "b", "b"])).unwrap();
        builder.build().unwrap()
    }

    #[test]
    fn test_first_attempt_succeeds() {
        let generator = Generator::new(two_colour(), GenerationConfig::new(5, 4)).unwrap();
        let generation = generator.generate().unwrap();

        assert_eq!(generation.stats.attempts, 1);
        assert_eq!(generation.stats.contradictions, 0);
        assert_eq!(generation.stats.steps, 20);
        assert!(generation.last_contradiction.is_none());

        let first = generation.map.get(0, 0).unwrap();
        assert!(generation.map.as_slice().iter().all(|&id| id == first));
    }

    #[test]
    fn test_initial_placement_is_honoured() {
        let mut config = GenerationConfig::new(3, 3);
        config.initial = Some(InitialPlacement { x: 1, y: 1, tile: 2 });
        let generation = Generator::new(two_colour(), config).unwrap().generate().unwrap();

        assert!(generation.map.as_slice().iter().all(|&id| id == 2));
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let mut zero_attempts = GenerationConfig::new(2, 2);
        zero_attempts.max_attempts = 0;
        assert!(matches!(
            Generator::new(two_colour(), zero_attempts),
            Err(GenerationError::Wave(WaveError::InvalidConfig(_)))
        ));

        assert!(matches!(
            Generator::new(two_colour(), GenerationConfig::new(0, 2)),
            Err(GenerationError::Wave(WaveError::InvalidConfig(_)))
        ));

        assert!(matches!(
            Generator::new(two_colour(), GenerationConfig::new(usize::MAX, 2)),
            Err(GenerationError::Wave(WaveError::InvalidConfig(_)))
        ));

        let mut unknown = GenerationConfig::new(2, 2);
        unknown.initial = Some(InitialPlacement { x: 0, y: 0, tile: 9 });
        assert!(matches!(
            Generator::new(two_colour(), unknown),
            Err(GenerationError::Wave(WaveError::UnknownTile(9)))
        ));

        let mut outside = GenerationConfig::new(2, 2);
        outside.initial = Some(InitialPlacement { x: 2, y: 0, tile: 1 });
        assert!(matches!(
            Generator::new(two_colour(), outside),
            Err(GenerationError::Wave(WaveError::OutOfBounds { x: 2, .. }))
        ));
    }
}
