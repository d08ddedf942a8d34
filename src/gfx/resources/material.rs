//! Material system for surface shading
//!
//! Materials decide the base colour of a node plus two rendering switches:
//! `unlit` skips the lighting model entirely and `wireframe` selects the
//! line-rasterised pipeline. Each material owns a small uniform buffer and
//! bind group (group 2 in the shader).

use crate::wgpu_utils::uniform_buffer::UniformBuffer;
use bytemuck::{Pod, Zeroable};
use std::collections::HashMap;

/// GPU representation of a material, padded for std140-style alignment.
///
/// `flags.x` is 1.0 when the material is unlit, 0.0 otherwise. The remaining
/// components are reserved.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct MaterialUniform {
    pub base_color: [f32; 4],
    pub flags: [f32; 4],
}

impl Default for MaterialUniform {
    fn default() -> Self {
        Self {
            base_color: [0.8, 0.8, 0.8, 1.0],
            flags: [0.0; 4],
        }
    }
}

/// A surface material with CPU-side state and lazily created GPU bindings.
pub struct Material {
    pub name: String,
    pub base_color: [f32; 4],
    pub unlit: bool,
    pub wireframe: bool,
    bindings: Option<MaterialBindings>,
    dirty: bool,
}

impl Material {
    pub fn new(name: &str, base_color: [f32; 4]) -> Self {
        Self {
            name: name.to_string(),
            base_color,
            unlit: false,
            wireframe: false,
            bindings: None,
            dirty: true,
        }
    }

    /// Convenience constructor for opaque RGB colours.
    pub fn from_rgb(name: &str, r: f32, g: f32, b: f32) -> Self {
        Self::new(name, [r, g, b, 1.0])
    }

    pub fn unlit(mut self) -> Self {
        self.unlit = true;
        self.dirty = true;
        self
    }

    pub fn set_base_color(&mut self, color: [f32; 4]) {
        if self.base_color != color {
            self.base_color = color;
            self.dirty = true;
        }
    }

    pub fn set_wireframe(&mut self, wireframe: bool) {
        self.wireframe = wireframe;
    }

    fn uniform(&self) -> MaterialUniform {
        MaterialUniform {
            base_color: self.base_color,
            flags: [if self.unlit { 1.0 } else { 0.0 }, 0.0, 0.0, 0.0],
        }
    }

    /// Creates the uniform buffer and bind group if they do not exist yet.
    pub fn ensure_gpu_resources(&mut self, device: &wgpu::Device) {
        if self.bindings.is_none() {
            self.bindings = Some(MaterialBindings::new(device, &self.name, self.uniform()));
            self.dirty = false;
        }
    }

    /// Pushes CPU-side changes to the GPU buffer when needed.
    pub fn update(&mut self, queue: &wgpu::Queue) {
        if self.dirty {
            let uniform = self.uniform();
            if let Some(bindings) = &mut self.bindings {
                bindings.uniform_buffer.update_content(queue, uniform);
                self.dirty = false;
            }
        }
    }

    pub fn bind_group(&self) -> Option<&wgpu::BindGroup> {
        self.bindings.as_ref().map(|b| &b.bind_group)
    }
}

/// Uniform buffer and bind group backing a single material.
struct MaterialBindings {
    uniform_buffer: UniformBuffer<MaterialUniform>,
    bind_group: wgpu::BindGroup,
}

impl MaterialBindings {
    fn new(device: &wgpu::Device, name: &str, content: MaterialUniform) -> Self {
        let uniform_buffer = UniformBuffer::new_with_data(device, &content);

        let layout = Material::bind_group_layout(device);
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(&format!("{} material bind group", name)),
            layout: &layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.binding_resource(),
            }],
        });

        Self {
            uniform_buffer,
            bind_group,
        }
    }
}

impl Material {
    /// Layout shared by every material bind group (group 2).
    pub fn bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
        device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("material bind group layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        })
    }
}

/// Keeps every material by name and hands out a default for untagged nodes.
pub struct MaterialManager {
    materials: HashMap<String, Material>,
    default_material: Material,
}

impl Default for MaterialManager {
    fn default() -> Self {
        Self::new()
    }
}

impl MaterialManager {
    pub fn new() -> Self {
        Self {
            materials: HashMap::new(),
            default_material: Material::from_rgb("Default", 0.8, 0.8, 0.8),
        }
    }

    /// Registers a material, replacing any previous one with the same name.
    pub fn add_material(&mut self, material: Material) {
        self.materials.insert(material.name.clone(), material);
    }

    pub fn get_material(&self, name: &str) -> Option<&Material> {
        self.materials.get(name)
    }

    pub fn get_material_mut(&mut self, name: &str) -> Option<&mut Material> {
        self.materials.get_mut(name)
    }

    /// Looks up a material, falling back to the built-in default.
    pub fn material_for(&self, name: Option<&str>) -> &Material {
        name.and_then(|n| self.materials.get(n))
            .unwrap_or(&self.default_material)
    }

    pub fn material_names(&self) -> Vec<String> {
        self.materials.keys().cloned().collect()
    }

    /// Creates missing GPU resources and flushes any pending changes.
    pub fn update_all_gpu_resources(&mut self, device: &wgpu::Device, queue: &wgpu::Queue) {
        self.default_material.ensure_gpu_resources(device);
        self.default_material.update(queue);
        for material in self.materials.values_mut() {
            material.ensure_gpu_resources(device);
            material.update(queue);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_material_fallback() {
        let manager = MaterialManager::new();
        let material = manager.material_for(Some("missing"));
        assert_eq!(material.name, "Default");
        let material = manager.material_for(None);
        assert_eq!(material.name, "Default");
    }

    #[test]
    fn registered_material_lookup() {
        let mut manager = MaterialManager::new();
        manager.add_material(Material::from_rgb("gold", 1.0, 0.917, 0.0));
        let material = manager.material_for(Some("gold"));
        assert_eq!(material.name, "gold");
        assert_eq!(material.base_color, [1.0, 0.917, 0.0, 1.0]);
    }

    #[test]
    fn color_edit_reaches_uniform() {
        let mut material = Material::from_rgb("sphere", 1.0, 0.917, 0.0);
        material.set_base_color([0.0, 0.5, 1.0, 1.0]);
        assert_eq!(material.uniform().base_color, [0.0, 0.5, 1.0, 1.0]);
        assert!(material.dirty);
    }

    #[test]
    fn unlit_flag_reaches_uniform() {
        let material = Material::from_rgb("flat", 0.0, 1.0, 0.0).unlit();
        assert_eq!(material.uniform().flags[0], 1.0);
        let lit = Material::from_rgb("lit", 0.0, 1.0, 0.0);
        assert_eq!(lit.uniform().flags[0], 0.0);
    }
}
