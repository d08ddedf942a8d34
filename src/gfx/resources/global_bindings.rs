//! Global uniform bindings for camera and lighting data
//!
//! Manages the GPU uniform buffer and bind group for per-frame state shared
//! by every node in the scene: camera matrices, ambient light, and the
//! spotlight parameters.

use cgmath::InnerSpace;

use crate::{
    gfx::{camera::camera_utils::CameraUniform, lighting::Lighting},
    wgpu_utils::uniform_buffer::UniformBuffer,
};

/// Global uniform buffer content structure
///
/// Contains all per-frame global data visible to the shaders. MUST match
/// the Globals struct in scene.wgsl exactly.
///
/// Packing: `spot_position.w` carries the spotlight intensity,
/// `spot_direction.w` the cosine of the cone angle, and `spot_color.w` the
/// penumbra fraction.
#[repr(C)]
#[derive(Copy, Clone, Debug)]
pub struct GlobalUBOContent {
    view_position: [f32; 4],
    view_proj: [[f32; 4]; 4],
    ambient_color: [f32; 4],
    spot_position: [f32; 4],
    spot_direction: [f32; 4],
    spot_color: [f32; 4],
}

unsafe impl bytemuck::Pod for GlobalUBOContent {}
unsafe impl bytemuck::Zeroable for GlobalUBOContent {}

/// Type alias for the global uniform buffer
pub type GlobalUBO = UniformBuffer<GlobalUBOContent>;

/// Updates the global uniform buffer with camera and lighting data
///
/// Should be called each frame so the shaders see the current camera
/// matrices and whatever spotlight parameters the UI last set.
///
/// # Arguments
/// * `ubo` - The global uniform buffer to update
/// * `queue` - WGPU command queue for buffer updates
/// * `camera` - Updated camera uniform data
/// * `lighting` - Scene lighting state
pub fn update_global_ubo(
    ubo: &mut GlobalUBO,
    queue: &wgpu::Queue,
    camera: CameraUniform,
    lighting: &Lighting,
) {
    let spot = &lighting.spot;
    let direction = (spot.target - spot.position).normalize();

    let content = GlobalUBOContent {
        view_position: camera.view_position,
        view_proj: camera.view_proj,

        ambient_color: [
            lighting.ambient.color[0],
            lighting.ambient.color[1],
            lighting.ambient.color[2],
            1.0,
        ],
        spot_position: [
            spot.position.x,
            spot.position.y,
            spot.position.z,
            spot.intensity,
        ],
        spot_direction: [direction.x, direction.y, direction.z, spot.angle.cos()],
        spot_color: [spot.color[0], spot.color[1], spot.color[2], spot.penumbra],
    };

    ubo.update_content(queue, content);
}

/// Manages the bind group layout and bind group for global uniforms
///
/// Bound to slot 0 in all render pipelines.
pub struct GlobalBindings {
    bind_group_layout: wgpu::BindGroupLayout,
    bind_group: Option<wgpu::BindGroup>,
}

impl GlobalBindings {
    /// Creates a new global bindings manager
    ///
    /// Sets up the bind group layout for global uniforms but doesn't
    /// create the actual bind group until `create_bind_group()` is called.
    pub fn new(device: &wgpu::Device) -> Self {
        let bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Globals Bind Group Layout"),
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

        GlobalBindings {
            bind_group_layout,
            bind_group: None,
        }
    }

    /// Creates the bind group with the provided uniform buffer
    ///
    /// Must be called after the uniform buffer is created and before any
    /// rendering operations that need global uniforms.
    pub fn create_bind_group(&mut self, device: &wgpu::Device, ubo: &GlobalUBO) {
        self.bind_group = Some(device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Global Bind Group"),
            layout: &self.bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: ubo.binding_resource(),
            }],
        }));
    }

    /// Returns the bind group layout for pipeline creation
    pub fn bind_group_layout(&self) -> &wgpu::BindGroupLayout {
        &self.bind_group_layout
    }

    /// Returns the bind group for rendering, if it has been created
    pub fn bind_group(&self) -> Option<&wgpu::BindGroup> {
        self.bind_group.as_ref()
    }
}
