//! # UI Module
//!
//! ImGui-based overlay: context management, input capture, and the default
//! scene options panel.

pub mod manager;
pub mod panel;

// Re-export main types
pub use manager::UiManager;
pub use panel::scene_options_panel;
