//! # LATTICE Viewer Application
//!
//! The host layer of the point-lattice viewer: winit window, event loop
//! and the mapping from raw window events to the interaction messages the
//! core consumes. The mapping lives in [`host`] so it stays testable
//! without a window or a GPU.

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod host;

pub use host::PointerTracker;
