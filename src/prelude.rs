//! Convenience re-exports for building scenes

pub use crate::app::App;
pub use crate::default;
pub use crate::gfx::{
    camera::{CameraController, CameraManager, OrbitCamera},
    geometry::{generate_cube, generate_plane, generate_sphere},
    lighting::{AmbientLight, SpotLight},
    picking::{NodePicker, PickHit, Ray},
    scene::{Node, Scene},
};
pub use crate::interaction::{DragController, DragState, PointerSample, PointerTracker};
pub use crate::options::SceneOptions;
pub use crate::ui::scene_options_panel;

pub use cgmath::{Deg, Matrix4, Rad, Vector3};
