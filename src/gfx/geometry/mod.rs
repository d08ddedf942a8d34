//! # Procedural Geometry Generation
//!
//! Generates the primitive shapes the playground is built from, so no model
//! files are needed.
//!
//! ## Supported Primitives
//!
//! - **Cube**: unit cube centered at the origin
//! - **Sphere**: UV sphere with configurable resolution
//! - **Plane**: flat XZ plane at y = 0 with configurable size
//!
//! ## Usage
//!
//! ```rust
//! use brae::gfx::geometry::{generate_cube, generate_sphere, generate_plane};
//!
//! let cube = generate_cube();
//! let sphere = generate_sphere(40, 50);
//! let ground = generate_plane(30.0, 30.0);
//! ```

pub mod primitives;

pub use primitives::*;

/// Generated geometry ready to become a mesh
#[derive(Debug, Clone, Default)]
pub struct GeometryData {
    /// Vertex positions (x, y, z)
    pub vertices: Vec<[f32; 3]>,
    /// Normal vectors (x, y, z)
    pub normals: Vec<[f32; 3]>,
    /// Triangle indices (counter-clockwise winding)
    pub indices: Vec<u32>,
}

impl GeometryData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}
