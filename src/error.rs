//! Error types for watershed computations

use thiserror::Error;

/// Every failure a computation in this crate can report.
#[derive(Error, Debug)]
pub enum HydroError {
    #[error("Invalid unit system '{0}', expected 'si' or 'm'")]
    InvalidUnitSystem(String),

    #[error("Unsupported method '{0}'")]
    UnsupportedMethod(String),

    #[error("Unsupported peak rate factor {0}, choose one of 101, 238, 349, 433, 484, 504, 566")]
    UnsupportedDistribution(u32),

    #[error("Singular matrix at row {row} (pivot {pivot:e})")]
    SingularMatrix { row: usize, pivot: f64 },

    #[error("Shape mismatch in {what}: expected {expected}, got {actual}")]
    ShapeMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Invalid parameter: {name} = {value} ({reason})")]
    InvalidParameter {
        name: &'static str,
        value: String,
        reason: String,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),
}

impl HydroError {
    pub(crate) fn invalid(name: &'static str, value: impl ToString, reason: &str) -> Self {
        HydroError::InvalidParameter {
            name,
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, HydroError>;
