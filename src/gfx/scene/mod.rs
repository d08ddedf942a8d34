//! # Scene Management Module
//!
//! Holds the node set the playground renders and picks against.
//!
//! ## Key Components
//!
//! - [`Scene`] - The main container managing nodes, camera, materials, and
//!   lighting
//! - [`Node`] - A named mesh with a transform and typed `draggable` /
//!   `ground` interaction tags
//! - [`Vertex3D`] - GPU vertex format with position and normal
//!
//! Nodes are built from procedural geometry with builder-style `with_*`
//! methods and added through [`Scene::add_node`], which enforces unique
//! names and returns a stable index. Nodes are append-only: an index handed
//! out once stays valid for the lifetime of the scene, which is what lets
//! the drag controller hold a plain index across frames.

pub mod node;
pub mod scene;
pub mod vertex;

// Re-export main types
pub use node::{DrawNode, Mesh, Node};
pub use scene::Scene;
pub use vertex::Vertex3D;
