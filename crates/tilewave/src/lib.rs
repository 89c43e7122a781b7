//! # TILEWAVE
//!
//! Generation driver on top of `tilewave_core`.
//!
//! ## Design Principles
//!
//! 1. **Restart, never repair**: a contradicted attempt is thrown away whole
//! 2. **Bounded**: at most `max_attempts` attempts per run
//! 3. **Reproducible**: attempt `n` always uses `seed.derive(n)`
//!
//! ## Core Components
//!
//! - `TilewaveConfig`: one TOML document holding generation settings and tileset
//! - `Generator`: retry loop producing a `Generation`
//! - `tilewave` binary: command-line front end
//!
//! ## Example
//!
//! ```rust,ignore
//! use tilewave::{Generator, TilewaveConfig};
//!
//! let config = TilewaveConfig::from_toml_file("data/tilesets/coast.toml")?;
//! let generation = Generator::from_config(&config)?.generate()?;
//! println!("{}", generation.map);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod error;
pub mod generator;

pub use config::{GenerationConfig, InitialPlacement, TilewaveConfig, DEFAULT_MAX_ATTEMPTS};
pub use error::{GenerationError, GenerationResult};
pub use generator::{Generation, GenerationStats, Generator};
