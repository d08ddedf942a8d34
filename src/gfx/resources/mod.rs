//! # Resource Management Module
//!
//! GPU resource handling for the renderer: materials, global uniform
//! bindings, and texture helpers.

pub mod global_bindings;
pub mod material;
pub mod texture_resource;

// Re-export main types
pub use material::{Material, MaterialManager};
pub use texture_resource::TextureResource;
