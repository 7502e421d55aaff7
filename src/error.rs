//! Error types for tour-solver.
//!
//! Every fallible operation returns `Result<T, SolverError>`; library code
//! never panics on bad input.

use thiserror::Error;

/// Result type alias for tour-solver operations.
pub type SolverResult<T> = Result<T, SolverError>;

/// Unified error type for all tour-solver operations.
#[derive(Debug, Error)]
pub enum SolverError {
    // ===== Input Errors =====
    /// A city has a NaN or infinite coordinate, or lies so far from another
    /// city that their distance is not a finite `f64`.
    #[error("Invalid input: city {index} at ({x}, {y}) has a non-finite coordinate or distance")]
    InvalidInput {
        /// Index of the offending city in the input sequence.
        index: usize,
        /// Its x coordinate.
        x: f64,
        /// Its y coordinate.
        y: f64,
    },

    /// A sequence of indices is not a permutation of `0..n`.
    #[error("Invalid tour: {message}")]
    InvalidTour {
        /// What is wrong with the sequence.
        message: String,
    },

    /// A construction start index is outside `0..n`.
    #[error("Invalid start city {start} for {n} cities")]
    InvalidStart {
        /// Requested start index.
        start: usize,
        /// Number of cities.
        n: usize,
    },

    // ===== Configuration Errors =====
    /// Invalid configuration parameter.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },

    /// YAML parsing error.
    #[error("YAML parsing error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// Schema validation error.
    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    // ===== I/O Errors =====
    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SolverError {
    /// Create a configuration error with a message.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an invalid tour error with a message.
    #[must_use]
    pub fn invalid_tour(message: impl Into<String>) -> Self {
        Self::InvalidTour {
            message: message.into(),
        }
    }

    /// Check if this error was caused by the caller's city or tour data
    /// rather than by configuration.
    #[must_use]
    pub const fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidInput { .. } | Self::InvalidTour { .. } | Self::InvalidStart { .. }
        )
    }
}
