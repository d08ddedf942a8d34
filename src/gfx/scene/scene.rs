use wgpu::Device;

use crate::gfx::{
    camera::camera_utils::CameraManager,
    lighting::Lighting,
    resources::material::{Material, MaterialManager},
};

use super::node::Node;

/// Main scene containing nodes, materials, lighting, and the camera
pub struct Scene {
    pub camera_manager: CameraManager,
    pub nodes: Vec<Node>,
    pub material_manager: MaterialManager,
    pub lighting: Lighting,
}

impl Scene {
    /// Creates a new scene with the given camera manager
    pub fn new(camera_manager: CameraManager) -> Self {
        Self {
            camera_manager,
            nodes: Vec::new(),
            material_manager: MaterialManager::new(),
            lighting: Lighting::default(),
        }
    }

    /// Updates the scene (camera matrices, etc.)
    pub fn update(&mut self) {
        self.camera_manager.camera.update_view_proj();
    }

    /// Adds a node to the scene, enforcing a unique name
    ///
    /// Returns the node's index, which stays valid for the lifetime of the
    /// scene (nodes are append-only).
    pub fn add_node(&mut self, mut node: Node) -> usize {
        node.name = self.ensure_unique_name(&node.name);
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    pub fn node(&self, index: usize) -> Option<&Node> {
        self.nodes.get(index)
    }

    pub fn node_mut(&mut self, index: usize) -> Option<&mut Node> {
        self.nodes.get_mut(index)
    }

    pub fn node_by_name(&self, name: &str) -> Option<&Node> {
        self.nodes.iter().find(|node| node.name == name)
    }

    pub fn node_by_name_mut(&mut self, name: &str) -> Option<&mut Node> {
        self.nodes.iter_mut().find(|node| node.name == name)
    }

    /// Gets all node names for UI display
    pub fn node_names(&self) -> Vec<String> {
        self.nodes.iter().map(|node| node.name.clone()).collect()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Creates a new material and adds it to the material manager
    ///
    /// # Returns
    /// Mutable reference to the created material
    pub fn add_material(&mut self, name: &str, base_color: [f32; 4]) -> &mut Material {
        let material = Material::new(name, base_color);
        self.material_manager.add_material(material);
        self.material_manager
            .get_material_mut(name)
            .expect("material was just added")
    }

    /// Convenience method for creating materials with RGB colors
    pub fn add_material_rgb(&mut self, name: &str, r: f32, g: f32, b: f32) -> &mut Material {
        self.add_material(name, [r, g, b, 1.0])
    }

    /// Gets the material for rendering a node
    ///
    /// Returns the material assigned to the node, or the default material if
    /// none is assigned or the assigned name doesn't exist.
    pub fn get_material_for_node(&self, node: &Node) -> &Material {
        self.material_manager.material_for(node.material_id())
    }

    /// Initializes GPU resources for all nodes and materials
    ///
    /// Must be called after the GPU context is available and before rendering.
    pub fn init_gpu_resources(&mut self, device: &Device, queue: &wgpu::Queue) {
        for node in self.nodes.iter_mut() {
            node.init_gpu_resources(device);
        }
        self.material_manager
            .update_all_gpu_resources(device, queue);
    }

    /// Updates all node transforms and syncs to GPU
    pub fn update_all_transforms(&mut self, queue: &wgpu::Queue) {
        for node in &mut self.nodes {
            if node.gpu_resources.is_some() {
                node.update_transform(queue);
            }
        }
    }

    /// Updates material GPU resources when materials have changed
    ///
    /// Call this after modifying material properties to sync changes to GPU.
    pub fn update_materials(&mut self, device: &Device, queue: &wgpu::Queue) {
        self.material_manager
            .update_all_gpu_resources(device, queue);
    }

    pub fn ensure_unique_name(&mut self, desired_name: &str) -> String {
        let mut counter = 0;
        let mut test_name = desired_name.to_string();

        while self.nodes.iter().any(|node| node.name == test_name) {
            counter += 1;
            test_name = format!("{} ({})", desired_name, counter);
        }

        test_name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::{
        camera::{camera_controller::CameraController, orbit_camera::OrbitCamera},
        geometry::generate_cube,
    };
    use cgmath::{Vector3, Zero};

    fn empty_scene() -> Scene {
        let camera =
            OrbitCamera::from_position(Vector3::new(0.0, 0.0, 5.0), Vector3::zero(), 1.0);
        Scene::new(CameraManager::new(camera, CameraController::new(0.005, 0.1)))
    }

    #[test]
    fn test_node_lookup_by_name_and_index() {
        let mut scene = empty_scene();
        let index = scene.add_node(Node::from_geometry(&generate_cube()).with_name("box-1"));

        assert_eq!(scene.node(index).unwrap().name, "box-1");
        assert!(scene.node_by_name("box-1").is_some());
        assert!(scene.node_by_name("missing").is_none());
    }

    #[test]
    fn test_duplicate_names_are_made_unique() {
        let mut scene = empty_scene();
        scene.add_node(Node::from_geometry(&generate_cube()).with_name("box"));
        scene.add_node(Node::from_geometry(&generate_cube()).with_name("box"));

        assert_eq!(scene.node_names(), vec!["box".to_string(), "box (1)".to_string()]);
    }

    #[test]
    fn test_unassigned_material_falls_back_to_default() {
        let mut scene = empty_scene();
        let index = scene.add_node(Node::from_geometry(&generate_cube()).with_name("box"));

        let material = scene.get_material_for_node(scene.node(index).unwrap());
        assert_eq!(material.name, "Default");
    }

    #[test]
    fn test_assigned_material_resolves_for_node() {
        let mut scene = empty_scene();
        scene.add_material_rgb("plane", 1.0, 1.0, 0.0);
        let index = scene.add_node(
            Node::from_geometry(&generate_cube())
                .with_name("plane-1")
                .with_material("plane"),
        );

        let material = scene.get_material_for_node(scene.node(index).unwrap());
        assert_eq!(material.name, "plane");
        assert_eq!(material.base_color, [1.0, 1.0, 0.0, 1.0]);
    }
}
