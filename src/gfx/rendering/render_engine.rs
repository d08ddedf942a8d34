//! WGPU-based rendering engine
//!
//! Provides high-level rendering functionality built on top of wgpu,
//! including pipeline management, depth testing, and UI overlay support.
//! A single forward pass draws every visible node with ambient plus one
//! spot light; materials flagged as wireframe use a line-rasterised
//! variant of the same pipeline when the adapter supports it.

use std::sync::Arc;
use wgpu::{Device, TextureFormat};

use crate::gfx::{
    camera::camera_utils::CameraUniform,
    lighting::Lighting,
    resources::{
        global_bindings::{update_global_ubo, GlobalBindings, GlobalUBO},
        material::Material,
        texture_resource::TextureResource,
    },
    scene::{DrawNode, Scene, Vertex3D},
};

/// Errors raised while creating the render engine or presenting frames
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("failed to create rendering surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),
    #[error("failed to acquire a graphics adapter: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),
    #[error("failed to acquire a graphics device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),
    #[error("GPU ran out of memory while acquiring a frame")]
    OutOfMemory,
}

/// Core rendering engine managing GPU resources and draw calls
///
/// The RenderEngine handles all low-level graphics operations including:
/// - Surface and device management
/// - Pipeline creation (solid and wireframe variants)
/// - Depth buffer handling
/// - Camera and lighting uniform updates
/// - UI overlay rendering
pub struct RenderEngine {
    surface: wgpu::Surface<'static>,
    device: Arc<wgpu::Device>,
    queue: Arc<wgpu::Queue>,
    config: wgpu::SurfaceConfiguration,
    depth_texture: TextureResource,
    format: TextureFormat,
    global_ubo: GlobalUBO,
    global_bindings: GlobalBindings,
    solid_pipeline: wgpu::RenderPipeline,
    wireframe_pipeline: Option<wgpu::RenderPipeline>,
}

impl RenderEngine {
    /// Creates a new render engine for the given window
    ///
    /// Initializes wgpu with default settings, creates the depth buffer,
    /// and builds the scene pipelines. The wireframe pipeline is only
    /// created when the adapter exposes `POLYGON_MODE_LINE`; on adapters
    /// without it, wireframe materials fall back to solid rendering.
    ///
    /// # Arguments
    /// * `window` - Window surface target for rendering
    /// * `width` - Initial surface width in pixels
    /// * `height` - Initial surface height in pixels
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        width: u32,
        height: u32,
    ) -> Result<RenderEngine, RenderError> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let surface = instance.create_surface(window)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;

        let line_mode_supported = adapter
            .features()
            .contains(wgpu::Features::POLYGON_MODE_LINE);
        let required_features = if line_mode_supported {
            wgpu::Features::POLYGON_MODE_LINE
        } else {
            wgpu::Features::default()
        };

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("WGPU Device"),
                required_features,
                required_limits: wgpu::Limits {
                    max_texture_dimension_2d: 4096,
                    ..wgpu::Limits::downlevel_defaults()
                },
                memory_hints: wgpu::MemoryHints::default(),
                trace: wgpu::Trace::Off,
            })
            .await?;

        let surface_capabilities = surface.get_capabilities(&adapter);
        let format = surface_capabilities
            .formats
            .iter()
            .copied()
            .find(|f| !f.is_srgb())
            .unwrap_or(surface_capabilities.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: surface_capabilities.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let depth_texture =
            TextureResource::create_depth_texture(&device, &config, "depth_texture");

        let global_ubo = GlobalUBO::new(&device);
        let mut global_bindings = GlobalBindings::new(&device);
        global_bindings.create_bind_group(&device, &global_ubo);

        // Per-node transform bind group layout; must match Node::init_gpu_resources
        let transform_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Transform Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            });

        let material_bind_group_layout = Material::bind_group_layout(&device);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Scene Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("scene.wgsl").into()),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Scene Pipeline Layout"),
            bind_group_layouts: &[
                global_bindings.bind_group_layout(),
                &transform_bind_group_layout,
                &material_bind_group_layout,
            ],
            push_constant_ranges: &[],
        });

        let solid_pipeline = Self::create_scene_pipeline(
            &device,
            &pipeline_layout,
            &shader,
            format,
            wgpu::PolygonMode::Fill,
            "Solid Pipeline",
        );

        let wireframe_pipeline = line_mode_supported.then(|| {
            Self::create_scene_pipeline(
                &device,
                &pipeline_layout,
                &shader,
                format,
                wgpu::PolygonMode::Line,
                "Wireframe Pipeline",
            )
        });

        Ok(RenderEngine {
            surface,
            device: device.into(),
            queue: queue.into(),
            config,
            depth_texture,
            format,
            global_ubo,
            global_bindings,
            solid_pipeline,
            wireframe_pipeline,
        })
    }

    fn create_scene_pipeline(
        device: &Device,
        layout: &wgpu::PipelineLayout,
        shader: &wgpu::ShaderModule,
        format: TextureFormat,
        polygon_mode: wgpu::PolygonMode,
        label: &str,
    ) -> wgpu::RenderPipeline {
        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(label),
            layout: Some(layout),
            vertex: wgpu::VertexState {
                module: shader,
                entry_point: Some("vs_main"),
                buffers: &[Vertex3D::desc()],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                // The ground plane is viewed from both sides while dragging
                cull_mode: None,
                polygon_mode,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: TextureResource::DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        })
    }

    /// Renders a frame with an optional UI overlay
    ///
    /// Draws every visible node with its material's pipeline, then hands
    /// the encoder to the UI callback for overlay rendering.
    ///
    /// Swapchain losses are handled by reconfiguring the surface and
    /// skipping the frame; only out-of-memory is reported as an error.
    ///
    /// # Arguments
    /// * `scene` - Scene containing nodes to render
    /// * `ui_callback` - Optional function that renders UI elements
    pub fn render_frame<F>(
        &mut self,
        scene: &Scene,
        ui_callback: Option<F>,
    ) -> Result<(), RenderError>
    where
        F: FnOnce(&wgpu::Device, &wgpu::Queue, &mut wgpu::CommandEncoder, &wgpu::TextureView),
    {
        let surface_texture = match self.surface.get_current_texture() {
            Ok(texture) => texture,
            Err(wgpu::SurfaceError::Lost) | Err(wgpu::SurfaceError::Outdated) => {
                self.surface.configure(&self.device, &self.config);
                return Ok(());
            }
            Err(wgpu::SurfaceError::Timeout) | Err(wgpu::SurfaceError::Other) => {
                log::warn!("skipping frame: surface texture unavailable");
                return Ok(());
            }
            Err(wgpu::SurfaceError::OutOfMemory) => return Err(RenderError::OutOfMemory),
        };

        let surface_texture_view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Main Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &surface_texture_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: 0.1,
                            g: 0.2,
                            b: 0.3,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            if let Some(global_bind_group) = self.global_bindings.bind_group() {
                render_pass.set_bind_group(0, global_bind_group, &[]);

                for node in scene.nodes.iter() {
                    if !node.visible {
                        continue;
                    }

                    let material = scene.get_material_for_node(node);
                    let Some(material_bind_group) = material.bind_group() else {
                        log::debug!(
                            "skipping '{}': material '{}' has no GPU resources",
                            node.name,
                            material.name
                        );
                        continue;
                    };

                    let pipeline = if material.wireframe {
                        self.wireframe_pipeline.as_ref().unwrap_or(&self.solid_pipeline)
                    } else {
                        &self.solid_pipeline
                    };

                    render_pass.set_pipeline(pipeline);
                    render_pass.set_bind_group(2, material_bind_group, &[]);
                    render_pass.draw_node(node);
                }
            }
        }

        if let Some(ui_callback) = ui_callback {
            ui_callback(
                &self.device,
                &self.queue,
                &mut encoder,
                &surface_texture_view,
            );
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        surface_texture.present();

        Ok(())
    }

    /// Updates camera and lighting uniform buffers
    ///
    /// Should be called each frame before `render_frame`.
    pub fn update(&mut self, camera_uniform: CameraUniform, lighting: &Lighting) {
        update_global_ubo(&mut self.global_ubo, &self.queue, camera_uniform, lighting);
    }

    /// Resizes the render engine surface and recreates the depth buffer
    ///
    /// Zero-sized dimensions are ignored; minimised windows keep the last
    /// valid configuration.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }

        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);

        self.depth_texture =
            TextureResource::create_depth_texture(&self.device, &self.config, "depth_texture");
    }

    /// Returns current surface dimensions
    pub fn get_surface_size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    /// Returns reference to the wgpu device
    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    /// Returns reference to the wgpu command queue
    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    /// Returns the surface texture format
    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.format
    }
}
