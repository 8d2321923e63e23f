//! # Rendering Error Types
//!
//! Setup failures are fatal and surface here; per-frame conditions
//! (surface starvation) are not errors and never reach this enum.

use thiserror::Error;

/// Errors that can occur while setting up the GPU pipeline.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// No compatible GPU adapter on this machine.
    #[error("no compatible GPU adapter found")]
    AdapterNotFound,

    /// The adapter refused to hand out a device.
    #[error("failed to create GPU device: {0}")]
    DeviceRequest(String),

    /// The window could not back a render surface.
    #[error("failed to create render surface: {0}")]
    SurfaceCreation(String),

    /// Shader compilation or pipeline validation failed. Irrecoverable:
    /// nothing can render without a valid pipeline.
    #[error("pipeline creation failed: {0}")]
    PipelineCreation(String),
}

/// Result type for rendering operations.
pub type RenderResult<T> = Result<T, RenderError>;
