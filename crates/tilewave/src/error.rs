//! Error types for the generation driver.

use thiserror::Error;
use tilewave_core::WaveError;

/// Result type for driver operations.
pub type GenerationResult<T> = Result<T, GenerationError>;

/// Errors that end a generation run.
#[derive(Error, Debug)]
pub enum GenerationError {
    /// The solver reported a non-recoverable error, or configuration
    /// validation failed.
    #[error("solver error: {0}")]
    Wave(#[from] WaveError),

    /// Every attempt ended in a contradiction.
    #[error("no contradiction-free map after {attempts} attempts")]
    AttemptsExhausted {
        /// Attempts made before giving up.
        attempts: u32,
    },

    /// A configuration file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A configuration file is not valid TOML for this schema.
    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),
}

impl GenerationError {
    /// Returns `true` if more attempts might have succeeded.
    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        matches!(self, Self::AttemptsExhausted { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wave_errors_convert() {
        let err: GenerationError = WaveError::UnknownTile(4).into();
        assert!(matches!(err, GenerationError::Wave(WaveError::UnknownTile(4))));
        assert!(!err.is_exhausted());
    }

    #[test]
    fn test_exhausted_message() {
        let err = GenerationError::AttemptsExhausted { attempts: 3 };
        assert!(err.is_exhausted());
        assert_eq!(err.to_string(), "no contradiction-free map after 3 attempts");
    }
}
