use std::ops::Range;

use cgmath::{Matrix4, SquareMatrix, Vector3};
use wgpu::Device;

use crate::gfx::{geometry::GeometryData, picking::Aabb};

use super::vertex::Vertex3D;

pub struct Mesh {
    vertices: Vec<Vertex3D>,
    indices: Vec<u32>,
    vertex_buffer: Option<wgpu::Buffer>,
    index_buffer: Option<wgpu::Buffer>,
    pub index_count: u32,
    pub vertex_count: u32,
}

impl Mesh {
    pub fn from_geometry(data: &GeometryData) -> Self {
        let vertices: Vec<Vertex3D> = data
            .vertices
            .iter()
            .enumerate()
            .map(|(i, position)| Vertex3D {
                position: *position,
                normal: data.normals.get(i).copied().unwrap_or([0.0, 1.0, 0.0]),
            })
            .collect();

        Self {
            vertex_count: vertices.len() as u32,
            index_count: data.indices.len() as u32,
            vertices,
            indices: data.indices.clone(),
            vertex_buffer: None,
            index_buffer: None,
        }
    }

    pub fn vertices(&self) -> &[Vertex3D] {
        &self.vertices
    }
}

// GPU resources for a node: transform uniform and its bind group
pub struct NodeGpuResources {
    pub transform_buffer: wgpu::Buffer,
    pub transform_bind_group: wgpu::BindGroup,
}

/// A single scene node: named geometry with a transform and interaction tags.
///
/// The `draggable` and `ground` tags are plain typed fields rather than an
/// open-ended property bag, so the drag contract is checkable at compile
/// time.
pub struct Node {
    pub name: String,
    /// Whether the drag controller may grab this node
    pub draggable: bool,
    /// Marks the node as the ground surface of the scene
    pub ground: bool,
    pub visible: bool,
    pub meshes: Vec<Mesh>,
    pub transform: Matrix4<f32>,
    material_id: Option<String>,
    pub gpu_resources: Option<NodeGpuResources>,
}

impl Node {
    /// Create a node from generated geometry with an identity transform
    pub fn from_geometry(data: &GeometryData) -> Self {
        Self {
            name: String::new(),
            draggable: false,
            ground: false,
            visible: true,
            meshes: vec![Mesh::from_geometry(data)],
            transform: Matrix4::identity(),
            material_id: None,
            gpu_resources: None,
        }
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    pub fn with_material(mut self, material_id: &str) -> Self {
        self.material_id = Some(material_id.to_string());
        self
    }

    pub fn draggable(mut self, draggable: bool) -> Self {
        self.draggable = draggable;
        self
    }

    pub fn ground(mut self, ground: bool) -> Self {
        self.ground = ground;
        self
    }

    pub fn material_id(&self) -> Option<&str> {
        self.material_id.as_deref()
    }

    pub fn set_material(&mut self, material_id: &str) {
        self.material_id = Some(material_id.to_string());
    }

    /// World-space position taken from the transform's translation column
    pub fn position(&self) -> Vector3<f32> {
        self.transform.w.truncate()
    }

    pub fn set_position(&mut self, position: Vector3<f32>) {
        self.transform.w.x = position.x;
        self.transform.w.y = position.y;
        self.transform.w.z = position.z;
    }

    /// Set translation, replacing the current transform
    pub fn set_translation(&mut self, translation: Vector3<f32>) {
        self.transform = Matrix4::from_translation(translation);
    }

    /// Apply translation (multiplies with existing transform)
    pub fn translate(&mut self, translation: Vector3<f32>) {
        self.transform = self.transform * Matrix4::from_translation(translation);
    }

    /// Set uniform scale, replacing the current transform
    pub fn set_scale(&mut self, scale: f32) {
        self.transform = Matrix4::from_scale(scale);
    }

    /// Reset to identity matrix
    pub fn reset_transform(&mut self) {
        self.transform = Matrix4::identity();
    }

    /// Local-space bounding box over all mesh vertices
    pub fn local_aabb(&self) -> Aabb {
        let mut all_vertices = Vec::new();
        for mesh in &self.meshes {
            for vertex in mesh.vertices() {
                all_vertices.push(vertex.position);
            }
        }

        if all_vertices.is_empty() {
            // Fallback to unit cube if no vertices
            Aabb::new(Vector3::new(-0.5, -0.5, -0.5), Vector3::new(0.5, 0.5, 0.5))
        } else {
            Aabb::from_vertices(&all_vertices)
        }
    }

    /// Update the transformation matrix and sync to GPU if resources exist
    pub fn update_transform(&mut self, queue: &wgpu::Queue) {
        if let Some(gpu_resources) = &self.gpu_resources {
            // cgmath matrices are column-major, which is what the GPU expects
            let transform_data: &[f32; 16] = self.transform.as_ref();

            queue.write_buffer(
                &gpu_resources.transform_buffer,
                0,
                bytemuck::cast_slice(transform_data),
            );
        }
    }

    /// Get the transform bind group for rendering
    pub fn get_transform_bind_group(&self) -> Option<&wgpu::BindGroup> {
        self.gpu_resources
            .as_ref()
            .map(|res| &res.transform_bind_group)
    }

    pub fn init_gpu_resources(&mut self, device: &Device) {
        for mesh in self.meshes.iter_mut() {
            let vertex_buffer = wgpu::util::DeviceExt::create_buffer_init(
                device,
                &wgpu::util::BufferInitDescriptor {
                    label: Some("Vertex Buffer"),
                    contents: bytemuck::cast_slice(&mesh.vertices),
                    usage: wgpu::BufferUsages::VERTEX,
                },
            );

            let index_buffer = wgpu::util::DeviceExt::create_buffer_init(
                device,
                &wgpu::util::BufferInitDescriptor {
                    label: Some("Index Buffer"),
                    contents: bytemuck::cast_slice(&mesh.indices),
                    usage: wgpu::BufferUsages::INDEX,
                },
            );

            mesh.vertex_buffer = Some(vertex_buffer);
            mesh.index_buffer = Some(index_buffer);
        }

        // cgmath matrices are already column-major for the GPU
        let transform_data: &[f32; 16] = self.transform.as_ref();

        let transform_buffer = wgpu::util::DeviceExt::create_buffer_init(
            device,
            &wgpu::util::BufferInitDescriptor {
                label: Some("Transform Uniform Buffer"),
                contents: bytemuck::cast_slice(transform_data),
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            },
        );

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

        let transform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Transform Bind Group"),
            layout: &transform_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: transform_buffer.as_entire_binding(),
            }],
        });

        self.gpu_resources = Some(NodeGpuResources {
            transform_buffer,
            transform_bind_group,
        });
    }
}

pub trait DrawNode<'a> {
    fn draw_mesh(&mut self, mesh: &'a Mesh);
    fn draw_mesh_instanced(&mut self, mesh: &'a Mesh, instances: Range<u32>);
    fn draw_node(&mut self, node: &'a Node);
}

impl<'a, 'b> DrawNode<'b> for wgpu::RenderPass<'a>
where
    'b: 'a,
{
    fn draw_mesh(&mut self, mesh: &'b Mesh) {
        self.draw_mesh_instanced(mesh, 0..1);
    }

    fn draw_mesh_instanced(&mut self, mesh: &'b Mesh, instances: Range<u32>) {
        let vertex_buffer = match &mesh.vertex_buffer {
            Some(buffer) => buffer,
            None => return, // Skip drawing if not uploaded
        };
        let index_buffer = match &mesh.index_buffer {
            Some(buffer) => buffer,
            None => return,
        };

        self.set_vertex_buffer(0, vertex_buffer.slice(..));
        self.set_index_buffer(index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        self.draw_indexed(0..mesh.index_count, 0, instances);
    }

    fn draw_node(&mut self, node: &'b Node) {
        let Some(gpu_resources) = &node.gpu_resources else {
            return;
        };
        self.set_bind_group(1, &gpu_resources.transform_bind_group, &[]);
        for mesh in &node.meshes {
            self.draw_mesh(mesh);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::geometry::generate_cube;

    #[test]
    fn test_node_builder_tags() {
        let node = Node::from_geometry(&generate_cube())
            .with_name("plane-1")
            .with_material("plane")
            .draggable(true)
            .ground(true);

        assert_eq!(node.name, "plane-1");
        assert!(node.draggable);
        assert!(node.ground);
        assert_eq!(node.material_id(), Some("plane"));
    }

    #[test]
    fn test_position_follows_translation() {
        let mut node = Node::from_geometry(&generate_cube());
        node.set_translation(Vector3::new(3.0, 0.5, 0.0));
        assert_eq!(node.position(), Vector3::new(3.0, 0.5, 0.0));

        node.set_position(Vector3::new(1.0, 2.0, 3.0));
        assert_eq!(node.position(), Vector3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_local_aabb_covers_unit_cube() {
        let node = Node::from_geometry(&generate_cube());
        let aabb = node.local_aabb();
        assert_eq!(aabb.min, Vector3::new(-0.5, -0.5, -0.5));
        assert_eq!(aabb.max, Vector3::new(0.5, 0.5, 0.5));
    }
}
