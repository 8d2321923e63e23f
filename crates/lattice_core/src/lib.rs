//! # LATTICE Core
//!
//! CPU-side foundation for the point-lattice viewer:
//! - Vector and matrix math (column-major, uploads directly to the GPU)
//! - Deterministic lattice generation
//! - The interaction state machine that turns pointer events into rotation
//! - Viewer configuration loaded from TOML
//!
//! This crate has no GPU dependencies. Everything here is testable on a
//! headless machine.

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod config;
pub mod error;
pub mod interaction;
pub mod lattice;
pub mod math;

pub use config::{CameraConfig, LatticeConfig, ViewerConfig};
pub use error::{LatticeError, LatticeResult};
pub use interaction::{
    InteractionController, PointerEvent, RotationState, Viewport, DRAG_SENSITIVITY,
};
pub use lattice::PointLattice;
pub use math::{Mat4, Vec2, Vec3, Vec4};
