//! # Core Error Types
//!
//! All errors that can occur on the CPU side of the viewer.

use thiserror::Error;

/// Errors that can occur in lattice generation and configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LatticeError {
    /// Fewer than two samples per axis: spacing `(max - min) / (N - 1)`
    /// would divide by zero.
    #[error("lattice needs at least 2 samples per axis, got {0}")]
    TooFewSamples(u32),

    /// Invalid configuration file.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for core operations.
pub type LatticeResult<T> = Result<T, LatticeError>;
