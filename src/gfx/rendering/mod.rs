//! # Rendering Module
//!
//! WGPU-based forward renderer: surface management, pipeline creation,
//! depth testing, and UI overlay support.

pub mod render_engine;

pub use render_engine::{RenderEngine, RenderError};
