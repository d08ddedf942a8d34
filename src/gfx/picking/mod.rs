//! # Node Picking System
//!
//! Ray-cast picking of scene nodes from pointer positions.
//!
//! ## How it works
//!
//! 1. **Pointer to Ray**: the camera turns a normalized pointer position into
//!    a world-space ray
//! 2. **Ray-AABB Intersection**: the ray is tested against each node's
//!    transformed bounding box
//! 3. **Ordering**: every hit is returned, sorted nearest first
//!
//! A pick that hits nothing yields an empty vec, never an error.

use cgmath::{ElementWise, InnerSpace, Matrix4, Vector3, Vector4, Zero};

use crate::interaction::pointer::PointerSample;

use super::{camera::orbit_camera::OrbitCamera, scene::Scene};

/// A 3D ray for intersection testing
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    /// Ray origin point in world space
    pub origin: Vector3<f32>,
    /// Ray direction (normalized)
    pub direction: Vector3<f32>,
}

impl Ray {
    /// Create a new ray
    pub fn new(origin: Vector3<f32>, direction: Vector3<f32>) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /// Get a point along the ray at distance t
    pub fn point_at(&self, t: f32) -> Vector3<f32> {
        self.origin + self.direction * t
    }
}

/// Axis-aligned bounding box for intersection testing
#[derive(Debug, Clone, Copy)]
pub struct Aabb {
    /// Minimum corner of the bounding box
    pub min: Vector3<f32>,
    /// Maximum corner of the bounding box
    pub max: Vector3<f32>,
}

impl Aabb {
    /// Create a new AABB
    pub fn new(min: Vector3<f32>, max: Vector3<f32>) -> Self {
        Self { min, max }
    }

    /// Create AABB from a set of vertices
    pub fn from_vertices(vertices: &[[f32; 3]]) -> Self {
        if vertices.is_empty() {
            return Self::new(Vector3::zero(), Vector3::zero());
        }

        let mut min = Vector3::new(vertices[0][0], vertices[0][1], vertices[0][2]);
        let mut max = min;

        for vertex in vertices.iter().skip(1) {
            let v = Vector3::new(vertex[0], vertex[1], vertex[2]);
            min.x = min.x.min(v.x);
            min.y = min.y.min(v.y);
            min.z = min.z.min(v.z);
            max.x = max.x.max(v.x);
            max.y = max.y.max(v.y);
            max.z = max.z.max(v.z);
        }

        Self::new(min, max)
    }

    /// Test ray-AABB intersection
    /// Returns the distance to intersection point, or None if no intersection
    pub fn intersect_ray(&self, ray: &Ray) -> Option<f32> {
        let inv_dir = Vector3::new(
            1.0 / ray.direction.x,
            1.0 / ray.direction.y,
            1.0 / ray.direction.z,
        );

        let t_min = (self.min - ray.origin).mul_element_wise(inv_dir);
        let t_max = (self.max - ray.origin).mul_element_wise(inv_dir);

        let t1 = Vector3::new(
            t_min.x.min(t_max.x),
            t_min.y.min(t_max.y),
            t_min.z.min(t_max.z),
        );
        let t2 = Vector3::new(
            t_min.x.max(t_max.x),
            t_min.y.max(t_max.y),
            t_min.z.max(t_max.z),
        );

        let t_near = t1.x.max(t1.y.max(t1.z));
        let t_far = t2.x.min(t2.y.min(t2.z));

        if t_near <= t_far && t_far >= 0.0 {
            Some(if t_near >= 0.0 { t_near } else { t_far })
        } else {
            None
        }
    }

    /// Apply a transformation matrix to the AABB
    pub fn transform(&self, matrix: &Matrix4<f32>) -> Self {
        // Transform all 8 corners of the AABB and compute new bounds
        let corners = [
            Vector3::new(self.min.x, self.min.y, self.min.z),
            Vector3::new(self.max.x, self.min.y, self.min.z),
            Vector3::new(self.min.x, self.max.y, self.min.z),
            Vector3::new(self.min.x, self.min.y, self.max.z),
            Vector3::new(self.max.x, self.max.y, self.min.z),
            Vector3::new(self.max.x, self.min.y, self.max.z),
            Vector3::new(self.min.x, self.max.y, self.max.z),
            Vector3::new(self.max.x, self.max.y, self.max.z),
        ];

        let mut transformed_corners = Vec::with_capacity(8);
        for corner in &corners {
            let homogeneous = Vector4::new(corner.x, corner.y, corner.z, 1.0);
            let transformed = matrix * homogeneous;
            transformed_corners.push([
                transformed.x / transformed.w,
                transformed.y / transformed.w,
                transformed.z / transformed.w,
            ]);
        }

        Self::from_vertices(&transformed_corners)
    }
}

/// One ray-node intersection
#[derive(Debug, Clone)]
pub struct PickHit {
    /// Index of the hit node in the scene
    pub node_index: usize,
    /// Distance from the camera eye to the intersection point
    pub distance: f32,
    /// World space intersection point
    pub point: Vector3<f32>,
}

/// Picks scene nodes under a pointer position
pub struct NodePicker {
    /// Cache local-space bounding boxes to avoid recomputation
    cached_aabbs: Vec<Option<Aabb>>,
}

impl NodePicker {
    /// Create a new node picker
    pub fn new() -> Self {
        Self {
            cached_aabbs: Vec::new(),
        }
    }

    /// Picks every node under the pointer, nearest first
    ///
    /// Assembles the picking ray from the camera and tests it against each
    /// node's world-space bounding box. Returns an empty vec on a miss.
    pub fn pick(
        &mut self,
        sample: PointerSample,
        camera: &OrbitCamera,
        scene: &Scene,
    ) -> Vec<PickHit> {
        let ray = camera.pick_ray(sample);

        // Ensure we have enough cached AABBs
        while self.cached_aabbs.len() < scene.nodes.len() {
            self.cached_aabbs.push(None);
        }

        let mut hits = Vec::new();

        for (i, node) in scene.nodes.iter().enumerate() {
            let aabb = if let Some(cached) = &self.cached_aabbs[i] {
                *cached
            } else {
                let aabb = node.local_aabb();
                self.cached_aabbs[i] = Some(aabb);
                aabb
            };

            let world_aabb = aabb.transform(&node.transform);

            if let Some(distance) = world_aabb.intersect_ray(&ray) {
                hits.push(PickHit {
                    node_index: i,
                    distance,
                    point: ray.point_at(distance),
                });
            }
        }

        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        hits
    }

    /// Invalidate cached AABBs (call when node geometry changes)
    pub fn invalidate_cache(&mut self) {
        self.cached_aabbs.clear();
    }

    /// Invalidate the cached AABB for a specific node
    pub fn invalidate_node(&mut self, node_index: usize) {
        if node_index < self.cached_aabbs.len() {
            self.cached_aabbs[node_index] = None;
        }
    }
}

impl Default for NodePicker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::{
        camera::{camera_controller::CameraController, camera_utils::CameraManager},
        geometry::{generate_cube, generate_plane},
        scene::Node,
    };

    #[test]
    fn test_aabb_creation() {
        let vertices = vec![[0.0, 0.0, 0.0], [1.0, 1.0, 1.0], [-1.0, -1.0, -1.0]];
        let aabb = Aabb::from_vertices(&vertices);

        assert_eq!(aabb.min, Vector3::new(-1.0, -1.0, -1.0));
        assert_eq!(aabb.max, Vector3::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn test_ray_aabb_intersection() {
        let aabb = Aabb::new(Vector3::new(-1.0, -1.0, -1.0), Vector3::new(1.0, 1.0, 1.0));

        // Ray hitting the box
        let ray = Ray::new(Vector3::new(0.0, 0.0, -5.0), Vector3::new(0.0, 0.0, 1.0));
        assert!(aabb.intersect_ray(&ray).is_some());

        // Ray missing the box
        let ray_miss = Ray::new(Vector3::new(5.0, 0.0, -5.0), Vector3::new(0.0, 0.0, 1.0));
        assert!(aabb.intersect_ray(&ray_miss).is_none());
    }

    #[test]
    fn test_ray_hits_flat_aabb() {
        // A flat plane produces a zero-thickness box; the slab test must
        // still report a hit through it.
        let aabb = Aabb::new(Vector3::new(-15.0, 0.0, -15.0), Vector3::new(15.0, 0.0, 15.0));
        let ray = Ray::new(Vector3::new(0.0, 5.0, 0.0), Vector3::new(0.0, -1.0, 0.0));

        let distance = aabb.intersect_ray(&ray).unwrap();
        assert!((distance - 5.0).abs() < 1e-5);
    }

    fn test_scene() -> Scene {
        let camera = OrbitCamera::from_position(
            Vector3::new(0.0, 0.0, 10.0),
            Vector3::zero(),
            1.0,
        );
        let controller = CameraController::new(0.005, 0.1);
        Scene::new(CameraManager::new(camera, controller))
    }

    #[test]
    fn test_hits_are_ordered_nearest_first() {
        let mut scene = test_scene();

        // Two unit cubes along the center ray, near faces at distances
        // 7.0 and 3.0 from the eye. Insert the far one first so ordering
        // cannot come from insertion order.
        let mut far = Node::from_geometry(&generate_cube()).with_name("far");
        far.transform = Matrix4::from_translation(Vector3::new(0.0, 0.0, 2.5));
        let far_index = scene.add_node(far);

        let mut near = Node::from_geometry(&generate_cube()).with_name("near");
        near.transform = Matrix4::from_translation(Vector3::new(0.0, 0.0, 6.5));
        let near_index = scene.add_node(near);

        let mut picker = NodePicker::new();
        let hits = picker.pick(
            PointerSample { x: 0.0, y: 0.0 },
            &scene.camera_manager.camera,
            &scene,
        );

        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].node_index, near_index);
        assert_eq!(hits[1].node_index, far_index);
        assert!((hits[0].distance - 3.0).abs() < 1e-3);
        assert!((hits[1].distance - 7.0).abs() < 1e-3);
    }

    #[test]
    fn test_miss_yields_empty_hits() {
        let mut scene = test_scene();
        scene.add_node(Node::from_geometry(&generate_cube()).with_name("box"));

        let mut picker = NodePicker::new();
        let hits = picker.pick(
            PointerSample { x: 0.95, y: 0.95 },
            &scene.camera_manager.camera,
            &scene,
        );

        assert!(hits.is_empty());
    }

    #[test]
    fn test_ground_plane_hit_through_center() {
        let camera = OrbitCamera::from_position(
            Vector3::new(1.0, 2.0, 6.0),
            Vector3::zero(),
            1.5,
        );
        let controller = CameraController::new(0.005, 0.1);
        let mut scene = Scene::new(CameraManager::new(camera, controller));
        scene.add_node(
            Node::from_geometry(&generate_plane(30.0, 30.0)).with_name("plane-1"),
        );

        let mut picker = NodePicker::new();
        let hits = picker.pick(
            PointerSample { x: 0.0, y: 0.0 },
            &scene.camera_manager.camera,
            &scene,
        );

        assert_eq!(hits.len(), 1);
        // The center ray passes through the origin, which lies on the plane.
        assert!(hits[0].point.magnitude() < 1e-3);
    }
}
