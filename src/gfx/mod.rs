//! # Graphics Module
//!
//! 3D rendering and scene management: camera, geometry, lighting, picking,
//! the wgpu render engine, GPU resources, and the scene graph.

pub mod camera;
pub mod geometry;
pub mod lighting;
pub mod picking;
pub mod rendering;
pub mod resources;
pub mod scene;

pub use camera::{CameraManager, OrbitCamera};
pub use picking::{Aabb, NodePicker, PickHit, Ray};
pub use rendering::RenderEngine;
pub use scene::{Node, Scene};
