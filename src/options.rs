//! Tweakable scene options
//!
//! Holds the parameters exposed in the options overlay. Values are read by
//! the per-frame update callback, so UI edits take effect on the next frame.

/// Live-editable parameters for the playground scene
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneOptions {
    /// Sphere base colour (RGB, 0..1)
    pub sphere_color: [f32; 3],
    /// Render the sphere as a wireframe
    pub sphere_wireframe: bool,
    /// Bounce phase advance per frame, in radians
    pub sphere_speed: f32,
    /// Spot light cone half-angle in radians
    pub spot_angle: f32,
    /// Spot light edge softening fraction (0 = hard edge)
    pub spot_penumbra: f32,
    /// Spot light intensity multiplier
    pub spot_intensity: f32,
}

impl Default for SceneOptions {
    fn default() -> Self {
        Self {
            sphere_color: [1.0, 0.917, 0.0],
            sphere_wireframe: false,
            sphere_speed: 0.01,
            spot_angle: 0.2,
            spot_penumbra: 0.0,
            spot_intensity: 1.0,
        }
    }
}
