//! wgpu implementation of the render backend.
//!
//! Owns the device, queue and window surface. Handles are indices into
//! internal registries, so the frame renderer never borrows GPU objects.
//! The pass encoder records commands and the whole pass is replayed inside
//! `submit`, which keeps the wgpu render-pass borrow local to one scope.

use std::sync::Arc;

use winit::window::Window;

use crate::backend::{
    BufferId, BufferUsage, ClearColor, PassEncoder, PipelineDesc, PipelineId, RenderBackend,
    SurfaceId,
};
use crate::error::{RenderError, RenderResult};

/// Size of the transient-bytes slot. Generous for the cursor's 16 bytes;
/// uniform bindings of any smaller payload fit without reallocation.
const TRANSIENT_SLOT_BYTES: u64 = 64;

/// Maps a shader slot to its wgpu bind group index.
///
/// Slot 0 is the vertex buffer; uniform slots start at 1 and occupy bind
/// groups from 0 up.
const fn bind_group_index(slot: u32) -> u32 {
    slot.saturating_sub(1)
}

/// Production backend: wgpu device + queue + window surface.
pub struct WgpuBackend {
    device: wgpu::Device,
    queue: wgpu::Queue,
    surface: wgpu::Surface<'static>,
    config: wgpu::SurfaceConfiguration,
    uniform_layout: wgpu::BindGroupLayout,
    buffers: Vec<wgpu::Buffer>,
    /// Bind group per buffer; `None` for vertex buffers.
    bind_groups: Vec<Option<wgpu::BindGroup>>,
    pipelines: Vec<wgpu::RenderPipeline>,
    transient: wgpu::Buffer,
    transient_bind_group: wgpu::BindGroup,
    /// Texture acquired for the in-flight frame.
    pending_surface: Option<wgpu::SurfaceTexture>,
    surface_generation: u32,
}

impl WgpuBackend {
    /// Brings up the GPU for a window: instance, adapter, device and a
    /// configured surface.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::SurfaceCreation`] if the window cannot back
    /// a surface, [`RenderError::AdapterNotFound`] if no compatible GPU
    /// exists, and [`RenderError::DeviceRequest`] if the adapter refuses a
    /// device. All are fatal at setup.
    pub fn new(window: Arc<Window>) -> RenderResult<Self> {
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let size = window.inner_size();
        let surface = instance
            .create_surface(window)
            .map_err(|e| RenderError::SurfaceCreation(e.to_string()))?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .ok_or(RenderError::AdapterNotFound)?;

        tracing::info!(adapter = %adapter.get_info().name, "GPU adapter selected");

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("LATTICE"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
            },
            None,
        ))
        .map_err(|e| RenderError::DeviceRequest(e.to_string()))?;

        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .unwrap_or(caps.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        // One layout serves both uniform slots (transform and cursor).
        let uniform_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Uniform Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let transient = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Transient Bytes"),
            size: TRANSIENT_SLOT_BYTES,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let transient_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Transient Bind Group"),
            layout: &uniform_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: transient.as_entire_binding(),
            }],
        });

        Ok(Self {
            device,
            queue,
            surface,
            config,
            uniform_layout,
            buffers: Vec::new(),
            bind_groups: Vec::new(),
            pipelines: Vec::new(),
            transient,
            transient_bind_group,
            pending_surface: None,
            surface_generation: 0,
        })
    }

    /// Reconfigures the surface after a window resize. Zero-sized extents
    /// are ignored; configuring them is undefined on some platforms.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
    }

    /// Current surface extent in pixels.
    #[must_use]
    pub const fn surface_size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    fn uniform_bind_group(&self, buffer: &wgpu::Buffer) -> wgpu::BindGroup {
        self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Uniform Bind Group"),
            layout: &self.uniform_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
        })
    }
}

/// Recorded pass command, replayed inside `submit`.
#[derive(Debug)]
enum EncoderCommand {
    BindPipeline(PipelineId),
    BindVertexBuffer(u32, BufferId),
    BindUniform(u32, BufferId),
    BindTransient(u32, Vec<u8>),
    DrawPoints { start: u32, count: u32 },
}

/// Pass encoder for [`WgpuBackend`]: records commands for replay.
#[derive(Debug)]
pub struct WgpuEncoder {
    clear: ClearColor,
    commands: Vec<EncoderCommand>,
}

impl PassEncoder for WgpuEncoder {
    fn bind_pipeline(&mut self, pipeline: PipelineId) {
        self.commands.push(EncoderCommand::BindPipeline(pipeline));
    }

    fn bind_vertex_buffer(&mut self, slot: u32, buffer: BufferId) {
        self.commands
            .push(EncoderCommand::BindVertexBuffer(slot, buffer));
    }

    fn bind_uniform(&mut self, slot: u32, buffer: BufferId) {
        self.commands.push(EncoderCommand::BindUniform(slot, buffer));
    }

    fn bind_transient(&mut self, slot: u32, bytes: &[u8]) {
        self.commands
            .push(EncoderCommand::BindTransient(slot, bytes.to_vec()));
    }

    fn draw_points(&mut self, start: u32, count: u32) {
        self.commands.push(EncoderCommand::DrawPoints { start, count });
    }
}

impl RenderBackend for WgpuBackend {
    type Encoder = WgpuEncoder;

    fn create_buffer(&mut self, contents: &[u8], usage: BufferUsage) -> BufferId {
        use wgpu::util::DeviceExt;

        let wgpu_usage = match usage {
            BufferUsage::Vertex => wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            BufferUsage::Uniform => wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        };
        let buffer = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Static Buffer"),
                contents,
                usage: wgpu_usage,
            });

        let bind_group = match usage {
            BufferUsage::Uniform => Some(self.uniform_bind_group(&buffer)),
            BufferUsage::Vertex => None,
        };

        self.buffers.push(buffer);
        self.bind_groups.push(bind_group);
        BufferId((self.buffers.len() - 1) as u32)
    }

    fn create_uniform_buffer(&mut self, size: u64) -> BufferId {
        let buffer = self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Uniform Slot"),
            size,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bind_group = self.uniform_bind_group(&buffer);

        self.buffers.push(buffer);
        self.bind_groups.push(Some(bind_group));
        BufferId((self.buffers.len() - 1) as u32)
    }

    fn write_buffer(&mut self, buffer: BufferId, bytes: &[u8]) {
        let Some(target) = self.buffers.get(buffer.0 as usize) else {
            tracing::warn!(id = buffer.0, "write to unknown buffer ignored");
            return;
        };
        self.queue.write_buffer(target, 0, bytes);
    }

    fn create_pipeline(&mut self, desc: &PipelineDesc<'_>) -> RenderResult<PipelineId> {
        // Validation errors land in the scope instead of panicking, so a
        // broken shader surfaces as a Result at setup.
        self.device.push_error_scope(wgpu::ErrorFilter::Validation);

        let shader = self
            .device
            .create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some(desc.label),
                source: wgpu::ShaderSource::Wgsl(desc.shader_source.into()),
            });

        let pipeline_layout = self
            .device
            .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("Pipeline Layout"),
                bind_group_layouts: &[&self.uniform_layout, &self.uniform_layout],
                push_constant_ranges: &[],
            });

        let pipeline = self
            .device
            .create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some(desc.label),
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: desc.vertex_entry,
                    buffers: &[wgpu::VertexBufferLayout {
                        array_stride: desc.layout.stride,
                        step_mode: wgpu::VertexStepMode::Vertex,
                        attributes: &[wgpu::VertexAttribute {
                            format: wgpu::VertexFormat::Float32x3,
                            offset: 0,
                            shader_location: 0,
                        }],
                    }],
                },
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: desc.fragment_entry,
                    targets: &[Some(wgpu::ColorTargetState {
                        format: self.config.format,
                        // Source-alpha over destination, identical on the
                        // color and alpha channels.
                        blend: Some(wgpu::BlendState {
                            color: wgpu::BlendComponent {
                                src_factor: wgpu::BlendFactor::SrcAlpha,
                                dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
                                operation: wgpu::BlendOperation::Add,
                            },
                            alpha: wgpu::BlendComponent {
                                src_factor: wgpu::BlendFactor::SrcAlpha,
                                dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
                                operation: wgpu::BlendOperation::Add,
                            },
                        }),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                }),
                primitive: wgpu::PrimitiveState {
                    topology: wgpu::PrimitiveTopology::PointList,
                    ..Default::default()
                },
                depth_stencil: None,
                multisample: wgpu::MultisampleState::default(),
                multiview: None,
            });

        if let Some(error) = pollster::block_on(self.device.pop_error_scope()) {
            return Err(RenderError::PipelineCreation(error.to_string()));
        }

        self.pipelines.push(pipeline);
        Ok(PipelineId((self.pipelines.len() - 1) as u32))
    }

    fn acquire_surface(&mut self) -> Option<SurfaceId> {
        match self.surface.get_current_texture() {
            Ok(texture) => {
                self.pending_surface = Some(texture);
                self.surface_generation = self.surface_generation.wrapping_add(1);
                Some(SurfaceId(self.surface_generation))
            }
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                tracing::debug!("surface lost or outdated, reconfiguring");
                self.surface.configure(&self.device, &self.config);
                None
            }
            Err(wgpu::SurfaceError::Timeout) => {
                tracing::debug!("surface acquisition timed out");
                None
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                tracing::warn!("surface out of memory, skipping frame");
                None
            }
        }
    }

    fn begin_pass(&mut self, _surface: SurfaceId, clear: ClearColor) -> Self::Encoder {
        WgpuEncoder {
            clear,
            commands: Vec::with_capacity(8),
        }
    }

    fn submit(&mut self, encoder: Self::Encoder, _surface: SurfaceId) {
        let Some(output) = self.pending_surface.take() else {
            tracing::warn!("submit without an acquired surface ignored");
            return;
        };

        // Transient bytes go through the queue before the pass; queue
        // writes are ordered ahead of the submission below.
        for command in &encoder.commands {
            if let EncoderCommand::BindTransient(_, bytes) = command {
                self.queue.write_buffer(&self.transient, 0, bytes);
            }
        }

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut frame_encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Frame Encoder"),
            });

        {
            let mut pass = frame_encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Points Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: encoder.clear.r,
                            g: encoder.clear.g,
                            b: encoder.clear.b,
                            a: encoder.clear.a,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                ..Default::default()
            });

            for command in &encoder.commands {
                match command {
                    EncoderCommand::BindPipeline(id) => {
                        if let Some(pipeline) = self.pipelines.get(id.0 as usize) {
                            pass.set_pipeline(pipeline);
                        } else {
                            tracing::warn!(id = id.0, "unknown pipeline handle ignored");
                        }
                    }
                    EncoderCommand::BindVertexBuffer(slot, id) => {
                        if let Some(buffer) = self.buffers.get(id.0 as usize) {
                            pass.set_vertex_buffer(*slot, buffer.slice(..));
                        } else {
                            tracing::warn!(id = id.0, "unknown buffer handle ignored");
                        }
                    }
                    EncoderCommand::BindUniform(slot, id) => {
                        if let Some(Some(group)) = self.bind_groups.get(id.0 as usize) {
                            pass.set_bind_group(bind_group_index(*slot), group, &[]);
                        } else {
                            tracing::warn!(id = id.0, "buffer has no uniform binding, ignored");
                        }
                    }
                    EncoderCommand::BindTransient(slot, _) => {
                        pass.set_bind_group(bind_group_index(*slot), &self.transient_bind_group, &[]);
                    }
                    EncoderCommand::DrawPoints { start, count } => {
                        pass.draw(*start..start + count, 0..1);
                    }
                }
            }
        }

        self.queue.submit(std::iter::once(frame_encoder.finish()));
        output.present();
    }
}
