//! GPU backend abstraction.
//!
//! The frame renderer talks to the GPU exclusively through
//! [`RenderBackend`] and [`PassEncoder`]. Handles are plain indices so the
//! trait stays borrow-free: the renderer can hold its ids across frames
//! without tying its lifetime to backend internals.
//!
//! Slot numbering follows the shader contract: buffer slot 0 carries the
//! per-vertex positions, slot 1 the frame transform, slot 2 the cursor.

use crate::error::RenderResult;

/// Buffer slot for the per-vertex position data.
pub const VERTEX_BUFFER_SLOT: u32 = 0;
/// Slot for the per-frame transform uniform.
pub const TRANSFORM_SLOT: u32 = 1;
/// Slot for the per-frame cursor scalars.
pub const CURSOR_SLOT: u32 = 2;

/// Handle to a backend buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferId(pub(crate) u32);

/// Handle to a compiled render pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineId(pub(crate) u32);

/// Handle to a frame surface, valid for one frame's presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceId(pub(crate) u32);

/// What a buffer is bound as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferUsage {
    /// Per-vertex data, written once at startup.
    Vertex,
    /// Per-frame scalar/matrix parameters.
    Uniform,
}

/// Clear color for the frame pass, linear RGBA.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClearColor {
    /// Red component.
    pub r: f64,
    /// Green component.
    pub g: f64,
    /// Blue component.
    pub b: f64,
    /// Alpha component.
    pub a: f64,
}

impl ClearColor {
    /// Opaque black, the viewer default.
    pub const BLACK: Self = Self {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 1.0,
    };

    /// Builds a clear color from a linear RGBA array.
    #[must_use]
    pub const fn from_array(rgba: [f64; 4]) -> Self {
        Self {
            r: rgba[0],
            g: rgba[1],
            b: rgba[2],
            a: rgba[3],
        }
    }
}

/// Vertex layout for the point pipeline: one tightly packed `float32x3`
/// position attribute at offset 0, shader location 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexLayout {
    /// Bytes between consecutive vertices.
    pub stride: u64,
}

impl VertexLayout {
    /// Tightly packed `[f32; 3]` positions.
    pub const POSITION_F32X3: Self = Self { stride: 12 };
}

/// Everything needed to build the point pipeline.
#[derive(Debug, Clone, Copy)]
pub struct PipelineDesc<'a> {
    /// Debug label.
    pub label: &'a str,
    /// WGSL source for both stages.
    pub shader_source: &'a str,
    /// Vertex stage entry point.
    pub vertex_entry: &'a str,
    /// Fragment stage entry point.
    pub fragment_entry: &'a str,
    /// Vertex buffer layout.
    pub layout: VertexLayout,
}

/// Records draw state and the one draw call for a frame pass.
///
/// Dropping an encoder without passing it to [`RenderBackend::submit`]
/// abandons the pass; ownership transfer is what ends the encoding.
pub trait PassEncoder {
    /// Selects the render pipeline.
    fn bind_pipeline(&mut self, pipeline: PipelineId);

    /// Binds a vertex buffer to a slot.
    fn bind_vertex_buffer(&mut self, slot: u32, buffer: BufferId);

    /// Binds a uniform buffer to a slot.
    fn bind_uniform(&mut self, slot: u32, buffer: BufferId);

    /// Binds small per-frame scalars (the cursor) by value.
    fn bind_transient(&mut self, slot: u32, bytes: &[u8]);

    /// Issues a point-primitive draw.
    fn draw_points(&mut self, start: u32, count: u32);
}

/// The GPU collaborator consumed by the frame renderer.
///
/// Setup operations are fallible; per-frame operations are not — the only
/// per-frame failure mode is surface starvation, modeled as `None` from
/// [`acquire_surface`](Self::acquire_surface) (transient backpressure, not
/// an error).
pub trait RenderBackend {
    /// Pass encoder produced by [`begin_pass`](Self::begin_pass).
    type Encoder: PassEncoder;

    /// Allocates a buffer initialized with `contents`.
    fn create_buffer(&mut self, contents: &[u8], usage: BufferUsage) -> BufferId;

    /// Allocates a reusable uniform buffer of `size` bytes.
    fn create_uniform_buffer(&mut self, size: u64) -> BufferId;

    /// Overwrites a buffer's contents from the start.
    fn write_buffer(&mut self, buffer: BufferId, bytes: &[u8]);

    /// Compiles the render pipeline.
    ///
    /// # Errors
    ///
    /// Returns [`crate::RenderError::PipelineCreation`] if shader
    /// compilation or pipeline validation fails. Fatal at setup.
    fn create_pipeline(&mut self, desc: &PipelineDesc<'_>) -> RenderResult<PipelineId>;

    /// Requests the surface for this frame.
    ///
    /// `None` is a valid transient result: the tick is skipped and retried
    /// on the next one.
    fn acquire_surface(&mut self) -> Option<SurfaceId>;

    /// Starts the frame pass, clearing the surface.
    fn begin_pass(&mut self, surface: SurfaceId, clear: ClearColor) -> Self::Encoder;

    /// Ends the pass, submits the work and presents the surface.
    fn submit(&mut self, encoder: Self::Encoder, surface: SurfaceId);
}

/// One recorded backend call.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedCall {
    /// `create_buffer` with the byte length and usage.
    CreateBuffer {
        /// Content length in bytes.
        len: usize,
        /// Requested usage.
        usage: BufferUsage,
    },
    /// `create_uniform_buffer`.
    CreateUniformBuffer {
        /// Requested size in bytes.
        size: u64,
    },
    /// `write_buffer`.
    WriteBuffer {
        /// Target buffer.
        buffer: BufferId,
        /// Written bytes.
        bytes: Vec<u8>,
    },
    /// `create_pipeline`.
    CreatePipeline {
        /// Pipeline label.
        label: String,
    },
    /// `acquire_surface` and whether a surface was granted.
    AcquireSurface {
        /// False when the backend reported backpressure.
        granted: bool,
    },
    /// `begin_pass`.
    BeginPass {
        /// Clear color used.
        clear: ClearColor,
    },
    /// `PassEncoder::bind_pipeline`.
    BindPipeline(PipelineId),
    /// `PassEncoder::bind_vertex_buffer`.
    BindVertexBuffer {
        /// Slot index.
        slot: u32,
        /// Bound buffer.
        buffer: BufferId,
    },
    /// `PassEncoder::bind_uniform`.
    BindUniform {
        /// Slot index.
        slot: u32,
        /// Bound buffer.
        buffer: BufferId,
    },
    /// `PassEncoder::bind_transient`.
    BindTransient {
        /// Slot index.
        slot: u32,
        /// Bound bytes.
        bytes: Vec<u8>,
    },
    /// `PassEncoder::draw_points`.
    DrawPoints {
        /// First vertex.
        start: u32,
        /// Vertex count.
        count: u32,
    },
    /// `submit` (includes the present).
    Submit,
}

/// Records every backend call for sequence assertions in tests.
///
/// No GPU behind it; `acquire_surface` can be starved to exercise the
/// skip-tick path.
#[derive(Debug, Default)]
pub struct RecordingBackend {
    /// Call log in invocation order.
    pub log: Vec<RecordedCall>,
    /// When true, `acquire_surface` reports backpressure.
    pub starve_surface: bool,
    /// When set, `create_pipeline` fails with this message.
    pub fail_pipeline: Option<String>,
    next_buffer: u32,
    next_pipeline: u32,
    frame: u32,
}

impl RecordingBackend {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the calls recorded after setup (from the first
    /// `acquire_surface` or `write_buffer` onward there is one sub-slice
    /// per tick; this helper just filters by variant for convenience).
    pub fn calls_matching(&self, predicate: impl Fn(&RecordedCall) -> bool) -> Vec<&RecordedCall> {
        self.log.iter().filter(|c| predicate(c)).collect()
    }
}

/// Encoder half of [`RecordingBackend`].
#[derive(Debug)]
pub struct RecordingEncoder {
    calls: Vec<RecordedCall>,
}

impl PassEncoder for RecordingEncoder {
    fn bind_pipeline(&mut self, pipeline: PipelineId) {
        self.calls.push(RecordedCall::BindPipeline(pipeline));
    }

    fn bind_vertex_buffer(&mut self, slot: u32, buffer: BufferId) {
        self.calls.push(RecordedCall::BindVertexBuffer { slot, buffer });
    }

    fn bind_uniform(&mut self, slot: u32, buffer: BufferId) {
        self.calls.push(RecordedCall::BindUniform { slot, buffer });
    }

    fn bind_transient(&mut self, slot: u32, bytes: &[u8]) {
        self.calls.push(RecordedCall::BindTransient {
            slot,
            bytes: bytes.to_vec(),
        });
    }

    fn draw_points(&mut self, start: u32, count: u32) {
        self.calls.push(RecordedCall::DrawPoints { start, count });
    }
}

impl RenderBackend for RecordingBackend {
    type Encoder = RecordingEncoder;

    fn create_buffer(&mut self, contents: &[u8], usage: BufferUsage) -> BufferId {
        self.log.push(RecordedCall::CreateBuffer {
            len: contents.len(),
            usage,
        });
        let id = BufferId(self.next_buffer);
        self.next_buffer += 1;
        id
    }

    fn create_uniform_buffer(&mut self, size: u64) -> BufferId {
        self.log.push(RecordedCall::CreateUniformBuffer { size });
        let id = BufferId(self.next_buffer);
        self.next_buffer += 1;
        id
    }

    fn write_buffer(&mut self, buffer: BufferId, bytes: &[u8]) {
        self.log.push(RecordedCall::WriteBuffer {
            buffer,
            bytes: bytes.to_vec(),
        });
    }

    fn create_pipeline(&mut self, desc: &PipelineDesc<'_>) -> RenderResult<PipelineId> {
        if let Some(message) = &self.fail_pipeline {
            return Err(crate::RenderError::PipelineCreation(message.clone()));
        }
        self.log.push(RecordedCall::CreatePipeline {
            label: desc.label.to_string(),
        });
        let id = PipelineId(self.next_pipeline);
        self.next_pipeline += 1;
        Ok(id)
    }

    fn acquire_surface(&mut self) -> Option<SurfaceId> {
        let granted = !self.starve_surface;
        self.log.push(RecordedCall::AcquireSurface { granted });
        if granted {
            self.frame = self.frame.wrapping_add(1);
            Some(SurfaceId(self.frame))
        } else {
            None
        }
    }

    fn begin_pass(&mut self, _surface: SurfaceId, clear: ClearColor) -> Self::Encoder {
        RecordingEncoder {
            calls: vec![RecordedCall::BeginPass { clear }],
        }
    }

    fn submit(&mut self, encoder: Self::Encoder, _surface: SurfaceId) {
        self.log.extend(encoder.calls);
        self.log.push(RecordedCall::Submit);
    }
}
