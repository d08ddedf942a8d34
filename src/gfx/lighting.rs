//! Scene lighting state
//!
//! One ambient term plus one spot light, mirrored into the global uniform
//! buffer every frame. Parameter changes take effect on the next frame tick.

use cgmath::Vector3;

/// Flat ambient contribution applied to every lit surface
#[derive(Debug, Clone, Copy)]
pub struct AmbientLight {
    pub color: [f32; 3],
}

impl Default for AmbientLight {
    fn default() -> Self {
        Self {
            color: [0.2, 0.2, 0.2],
        }
    }
}

/// Cone spot light aimed from `position` toward `target`
#[derive(Debug, Clone, Copy)]
pub struct SpotLight {
    pub position: Vector3<f32>,
    pub target: Vector3<f32>,
    pub color: [f32; 3],
    /// Half-angle of the cone in radians
    pub angle: f32,
    /// Fraction of the cone over which the edge softens, 0 = hard edge
    pub penumbra: f32,
    pub intensity: f32,
}

impl Default for SpotLight {
    fn default() -> Self {
        Self {
            position: Vector3::new(-100.0, 100.0, 0.0),
            target: Vector3::new(0.0, 0.0, 0.0),
            color: [1.0, 1.0, 1.0],
            angle: 0.2,
            penumbra: 0.0,
            intensity: 1.0,
        }
    }
}

/// All light state carried by a scene
#[derive(Debug, Clone, Copy, Default)]
pub struct Lighting {
    pub ambient: AmbientLight,
    pub spot: SpotLight,
}
