//! Simulation-specific error types.
//!
//! The simulation itself has no recoverable failures: its precondition
//! violations (peeking an empty population, asking for the heading of a
//! vertical vector) panic.  Errors here come from the configuration layer,
//! where a bad `assets/asteroids.toml` is reported and replaced by defaults.
//!
//! ## Usage
//!
//! ```rust
//! use shatter::config::SimConfig;
//!
//! let config = SimConfig::default();
//! assert!(config.validate().is_ok());
//! ```

use std::fmt;

/// Top-level error enum for the asteroid simulation.
#[derive(Debug, Clone, PartialEq)]
pub enum SimError {
    /// The configuration file could not be parsed as TOML.
    ConfigParse {
        /// Parser message, including line/column when available.
        message: String,
    },

    /// A `min`/`max` pair is inverted or not finite.
    InvalidRange {
        /// Name of the range (for logging).
        name: &'static str,
        min: f32,
        max: f32,
    },

    /// A count that must be at least `required` is smaller.
    InvalidCount {
        /// Name of the count (for logging).
        name: &'static str,
        got: usize,
        required: usize,
    },

    /// A scalar is outside its usable range.
    InvalidValue {
        /// Name of the value (for logging).
        name: &'static str,
        value: f32,
        /// Human-readable description of the accepted range.
        expected: &'static str,
    },
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::ConfigParse { message } => {
                write!(f, "failed to parse configuration: {}", message)
            }
            SimError::InvalidRange { name, min, max } => write!(
                f,
                "range '{}' is invalid: min {} must be finite and not exceed max {}",
                name, min, max
            ),
            SimError::InvalidCount {
                name,
                got,
                required,
            } => write!(
                f,
                "count '{}' too low: got {}, need at least {}",
                name, got, required
            ),
            SimError::InvalidValue {
                name,
                value,
                expected,
            } => write!(
                f,
                "value '{}' = {} is outside expected range {}",
                name, value, expected
            ),
        }
    }
}

impl std::error::Error for SimError {}

impl From<toml::de::Error> for SimError {
    fn from(err: toml::de::Error) -> Self {
        SimError::ConfigParse {
            message: err.to_string(),
        }
    }
}

/// Convenience alias: a `Result` using `SimError` as the error type.
pub type SimResult<T> = Result<T, SimError>;

// ── Validation helpers ────────────────────────────────────────────────────────

/// Returns an error unless `min <= max` and both are finite.
pub fn validate_range(name: &'static str, min: f32, max: f32) -> SimResult<()> {
    if min.is_finite() && max.is_finite() && min <= max {
        Ok(())
    } else {
        Err(SimError::InvalidRange { name, min, max })
    }
}

/// Returns an error if `got < required`.
pub fn validate_count(name: &'static str, got: usize, required: usize) -> SimResult<()> {
    if got < required {
        Err(SimError::InvalidCount {
            name,
            got,
            required,
        })
    } else {
        Ok(())
    }
}

/// Returns an error if `value` is not strictly positive.
pub fn validate_positive(name: &'static str, value: f32) -> SimResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SimError::InvalidValue {
            name,
            value,
            expected: "(0.0, ∞)",
        })
    }
}
