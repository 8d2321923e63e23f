//! # LATTICE Rendering
//!
//! The GPU-bound half of the point-lattice viewer.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                       FRAME TICK                             │
//! ├──────────────────────────────────────────────────────────────┤
//! │  InteractionController state ──► compose transform           │
//! │        │                              │                      │
//! │        ▼                              ▼                      │
//! │  cursor (transient bytes)      uniform slot overwrite        │
//! │        │                              │                      │
//! │        └────────► acquire surface ◄───┘                      │
//! │                   (none → skip tick)                         │
//! │                        │                                     │
//! │                        ▼                                     │
//! │       bind pipeline + points + uniforms, ONE point draw      │
//! │                        │                                     │
//! │                        ▼                                     │
//! │                 submit + present                             │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! The [`backend::RenderBackend`] trait is the seam between the frame
//! orchestration and the GPU: [`wgpu_backend::WgpuBackend`] is the
//! production implementation, [`backend::RecordingBackend`] the test
//! double.

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod backend;
pub mod error;
pub mod frame;
pub mod renderer;
pub mod scheduler;
pub mod shaders;
pub mod wgpu_backend;

pub use backend::{
    BufferId, BufferUsage, ClearColor, PassEncoder, PipelineDesc, PipelineId, RecordingBackend,
    RenderBackend, SurfaceId, VertexLayout,
};
pub use error::{RenderError, RenderResult};
pub use frame::{compose_transform, CursorUniform, FrameUniforms};
pub use renderer::{FrameRenderer, FrameStats};
pub use scheduler::FrameScheduler;
pub use wgpu_backend::WgpuBackend;
