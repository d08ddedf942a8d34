// src/lib.rs
//! Brae scene playground
//!
//! An interactive 3D scene built on wgpu and winit: procedural geometry,
//! an orbit camera, ray picking with pointer-driven dragging, and a live
//! options overlay.

pub mod app;
pub mod gfx;
pub mod interaction;
pub mod options;
pub mod prelude;
pub mod ui;
pub mod wgpu_utils;

// Re-export main types for convenience
pub use app::App;

/// Creates a default application instance
pub fn default() -> App {
    App::new()
}
