// src/wgpu_utils/mod.rs
//! WGPU utility functions and helpers
//!
//! Provides convenient wrappers for common wgpu operations.

pub mod uniform_buffer;

// Re-export main types
pub use uniform_buffer::UniformBuffer;
