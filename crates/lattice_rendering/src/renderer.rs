//! Frame renderer.
//!
//! Orchestrates one render tick: reads the interaction state handed in by
//! the host, composes the frame transform, and drives the backend through
//! the fixed bind-and-draw sequence. Exactly one point draw per frame.

use lattice_core::config::CameraConfig;
use lattice_core::interaction::RotationState;
use lattice_core::lattice::PointLattice;
use lattice_core::math::Vec2;

use crate::backend::{
    BufferUsage, ClearColor, PassEncoder, PipelineDesc, RenderBackend, VertexLayout, BufferId,
    PipelineId, CURSOR_SLOT, TRANSFORM_SLOT, VERTEX_BUFFER_SLOT,
};
use crate::error::RenderResult;
use crate::frame::{compose_transform, CursorUniform, FrameUniforms};
use crate::shaders;

/// Rendering statistics for the frame loop.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameStats {
    /// Frames actually rendered.
    pub frames_rendered: u64,
    /// Ticks skipped because no surface was available.
    pub frames_skipped: u64,
    /// Draw calls in the last rendered frame (always 1).
    pub draw_calls: u32,
    /// Vertices in the last rendered frame.
    pub vertices: u32,
}

/// Renders the static point lattice once per scheduled tick.
///
/// The uniform slot is single-buffered: each tick overwrites the previous
/// frame's transform. The queue orders the write ahead of the submission
/// that consumes it; giving each in-flight frame its own slot would be the
/// hardened variant and is out of scope for this baseline.
pub struct FrameRenderer<B: RenderBackend> {
    backend: B,
    camera: CameraConfig,
    clear: ClearColor,
    vertex_buffer: BufferId,
    uniform_buffer: BufferId,
    pipeline: PipelineId,
    point_count: u32,
    stats: FrameStats,
}

impl<B: RenderBackend> FrameRenderer<B> {
    /// Creates the renderer: uploads the lattice points, allocates the
    /// uniform slot and compiles the point pipeline.
    ///
    /// # Errors
    ///
    /// Returns [`crate::RenderError::PipelineCreation`] if the shader does
    /// not compile — fatal, the viewer cannot run without a pipeline.
    pub fn new(
        mut backend: B,
        lattice: &PointLattice,
        camera: CameraConfig,
        clear: ClearColor,
    ) -> RenderResult<Self> {
        let vertex_buffer = backend.create_buffer(lattice.as_bytes(), BufferUsage::Vertex);
        let uniform_buffer = backend.create_uniform_buffer(FrameUniforms::size());
        let pipeline = backend.create_pipeline(&PipelineDesc {
            label: "points",
            shader_source: shaders::POINTS_WGSL,
            vertex_entry: shaders::VS_ENTRY,
            fragment_entry: shaders::FS_ENTRY,
            layout: VertexLayout::POSITION_F32X3,
        })?;

        tracing::info!(points = lattice.point_count(), "frame renderer ready");

        Ok(Self {
            backend,
            camera,
            clear,
            vertex_buffer,
            uniform_buffer,
            pipeline,
            point_count: lattice.point_count(),
            stats: FrameStats::default(),
        })
    }

    /// Executes one render tick.
    ///
    /// Reads the interaction state as it stood after the most recently
    /// processed input event, overwrites the uniform slot, then draws.
    /// Returns false when the tick was skipped for lack of a surface —
    /// transient backpressure, retried on the next tick.
    pub fn tick(&mut self, rotation: RotationState, cursor: Vec2, aspect: f32) -> bool {
        let transform = compose_transform(&self.camera, rotation, aspect);
        let uniforms = FrameUniforms::new(transform);
        self.backend
            .write_buffer(self.uniform_buffer, uniforms.as_bytes());

        let Some(surface) = self.backend.acquire_surface() else {
            self.stats.frames_skipped += 1;
            tracing::debug!("no frame surface available, skipping tick");
            return false;
        };

        let cursor_uniform = CursorUniform::new(cursor);
        let mut encoder = self.backend.begin_pass(surface, self.clear);
        encoder.bind_pipeline(self.pipeline);
        encoder.bind_vertex_buffer(VERTEX_BUFFER_SLOT, self.vertex_buffer);
        encoder.bind_uniform(TRANSFORM_SLOT, self.uniform_buffer);
        encoder.bind_transient(CURSOR_SLOT, cursor_uniform.as_bytes());
        encoder.draw_points(0, self.point_count);
        self.backend.submit(encoder, surface);

        self.stats.frames_rendered += 1;
        self.stats.draw_calls = 1;
        self.stats.vertices = self.point_count;
        true
    }

    /// Returns the statistics so far.
    #[must_use]
    pub const fn stats(&self) -> FrameStats {
        self.stats
    }

    /// Returns the lattice point count drawn each frame.
    #[must_use]
    pub const fn point_count(&self) -> u32 {
        self.point_count
    }

    /// Returns the backend, for host-side operations such as resize.
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }
}
