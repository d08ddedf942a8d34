use super::camera_utils::{convert_matrix4_to_array, Camera, CameraUniform};
use crate::gfx::picking::Ray;
use crate::interaction::pointer::PointerSample;
use cgmath::*;

#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: cgmath::Matrix4<f32> = cgmath::Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.5,
    0.0, 0.0, 0.0, 1.0,
);

/// Y-up orbit camera circling a target point.
///
/// Driven by distance/pitch/yaw; the eye position is derived in `update()`.
#[derive(Debug, Clone, Copy)]
pub struct OrbitCamera {
    pub distance: f32,
    pub pitch: f32,
    pub yaw: f32,
    pub eye: Vector3<f32>,
    pub target: Vector3<f32>,
    pub up: Vector3<f32>,
    pub bounds: OrbitCameraBounds,
    pub aspect: f32,
    pub fovy: Rad<f32>,
    pub znear: f32,
    pub zfar: f32,
    pub uniform: CameraUniform,
}

impl Camera for OrbitCamera {
    fn build_view_projection_matrix(&self) -> Matrix4<f32> {
        let eye = Point3::from_vec(self.eye);
        let target = Point3::from_vec(self.target);
        let view = Matrix4::look_at_rh(eye, target, self.up);
        let proj =
            OPENGL_TO_WGPU_MATRIX * perspective(self.fovy, self.aspect, self.znear, self.zfar);
        proj * view
    }
}

impl OrbitCamera {
    pub fn new(distance: f32, pitch: f32, yaw: f32, target: Vector3<f32>, aspect: f32) -> Self {
        let mut camera = Self {
            distance,
            pitch,
            yaw,
            eye: Vector3::zero(), // derived in update()
            target,
            up: Vector3::unit_y(),
            bounds: OrbitCameraBounds::default(),
            aspect,
            fovy: cgmath::Rad(std::f32::consts::PI / 4.0),
            znear: 0.1,
            zfar: 1000.0,
            uniform: CameraUniform::default(),
        };
        camera.update();
        camera
    }

    /// Builds an orbit camera sitting at `eye` and looking at `target`.
    ///
    /// `eye` must not coincide with `target`.
    pub fn from_position(eye: Vector3<f32>, target: Vector3<f32>, aspect: f32) -> Self {
        let offset = eye - target;
        let distance = offset.magnitude();
        let pitch = (offset.y / distance).asin();
        let yaw = offset.x.atan2(offset.z);
        Self::new(distance, pitch, yaw, target, aspect)
    }

    pub fn set_distance(&mut self, distance: f32) {
        self.distance = distance.clamp(
            self.bounds.min_distance.unwrap_or(f32::EPSILON),
            self.bounds.max_distance.unwrap_or(f32::MAX),
        );
        self.update();
    }

    pub fn add_distance(&mut self, delta: f32) {
        let corrected_zoom = f32::log10(self.distance) * delta;
        self.set_distance(self.distance + corrected_zoom);
    }

    pub fn set_pitch(&mut self, pitch: f32) {
        self.pitch = pitch.clamp(self.bounds.min_pitch, self.bounds.max_pitch);
        self.update();
    }

    pub fn add_pitch(&mut self, delta: f32) {
        self.set_pitch(self.pitch + delta);
    }

    pub fn set_yaw(&mut self, yaw: f32) {
        let mut bounded_yaw = yaw;
        if let Some(min_yaw) = self.bounds.min_yaw {
            bounded_yaw = bounded_yaw.max(min_yaw);
        }
        if let Some(max_yaw) = self.bounds.max_yaw {
            bounded_yaw = bounded_yaw.min(max_yaw);
        }
        self.yaw = bounded_yaw;
        self.update();
    }

    pub fn add_yaw(&mut self, delta: f32) {
        self.set_yaw(self.yaw + delta);
    }

    /// Pans the camera relative to the current view direction
    /// delta.0 = horizontal pan (left/right relative to camera view)
    /// delta.1 = vertical pan (up/down relative to camera view)
    pub fn pan(&mut self, delta: (f32, f32)) {
        let forward = (self.target - self.eye).normalize();
        let right = forward.cross(self.up).normalize();
        let up = right.cross(forward).normalize();

        // Scale pan movement by distance for consistent feel at all zoom levels
        let pan_scale = self.distance * 0.1;

        let movement = right * delta.0 * pan_scale + up * delta.1 * pan_scale;
        self.target += movement;
        self.update();
    }

    pub fn resize_projection(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.aspect = width as f32 / height as f32;
    }

    /// Recomputes the eye position from distance/pitch/yaw.
    pub fn update(&mut self) {
        self.eye = self.target
            + self.distance
                * Vector3::new(
                    self.pitch.cos() * self.yaw.sin(),
                    self.pitch.sin(),
                    self.pitch.cos() * self.yaw.cos(),
                );
    }

    /// Refreshes the GPU-facing uniform from the current camera state.
    pub fn update_view_proj(&mut self) {
        self.uniform.view_position = [self.eye.x, self.eye.y, self.eye.z, 1.0];
        self.uniform.view_proj = convert_matrix4_to_array(self.build_view_projection_matrix());
    }

    /// Builds a world-space picking ray through a normalized pointer position.
    ///
    /// The ray originates at the camera eye; its direction comes from
    /// unprojecting the pointer's near and far NDC points through the inverse
    /// view-projection matrix. The wgpu depth-range correction is left out on
    /// purpose, matching the NDC convention of the unprojection.
    pub fn pick_ray(&self, sample: PointerSample) -> Ray {
        let eye = Point3::from_vec(self.eye);
        let target = Point3::from_vec(self.target);
        let view = Matrix4::look_at_rh(eye, target, self.up);
        let proj = perspective(self.fovy, self.aspect, self.znear, self.zfar);

        let inv_view_proj = (proj * view)
            .invert()
            .unwrap_or_else(|| Matrix4::from_scale(1.0));

        let near_point = Vector4::new(sample.x, sample.y, -1.0, 1.0);
        let far_point = Vector4::new(sample.x, sample.y, 1.0, 1.0);

        let world_near = inv_view_proj * near_point;
        let world_far = inv_view_proj * far_point;

        let near_3d = world_near.truncate() / world_near.w;
        let far_3d = world_far.truncate() / world_far.w;

        Ray::new(self.eye, far_3d - near_3d)
    }
}

/// Limits within which the orbit camera may move.
#[derive(Debug, Clone, Copy)]
pub struct OrbitCameraBounds {
    pub min_distance: Option<f32>,
    pub max_distance: Option<f32>,
    pub min_pitch: f32,
    pub max_pitch: f32,
    pub min_yaw: Option<f32>,
    pub max_yaw: Option<f32>,
}

impl Default for OrbitCameraBounds {
    fn default() -> Self {
        Self {
            min_distance: None,
            max_distance: None,
            min_pitch: -std::f32::consts::FRAC_PI_2 + 0.01,
            max_pitch: std::f32::consts::FRAC_PI_2 - 0.01,
            min_yaw: None,
            max_yaw: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_position_recovers_eye() {
        let eye = Vector3::new(1.0, 2.0, 6.0);
        let camera = OrbitCamera::from_position(eye, Vector3::zero(), 1.5);

        assert!((camera.eye - eye).magnitude() < 1e-4);
        assert!((camera.distance - eye.magnitude()).abs() < 1e-4);
    }

    #[test]
    fn test_center_ray_points_at_target() {
        let camera =
            OrbitCamera::from_position(Vector3::new(0.0, 0.0, 10.0), Vector3::zero(), 1.0);
        let ray = camera.pick_ray(PointerSample { x: 0.0, y: 0.0 });

        assert!((ray.origin - camera.eye).magnitude() < 1e-4);
        assert!((ray.direction - Vector3::new(0.0, 0.0, -1.0)).magnitude() < 1e-4);
    }

    #[test]
    fn test_off_center_ray_tilts_with_pointer() {
        let camera =
            OrbitCamera::from_position(Vector3::new(0.0, 0.0, 10.0), Vector3::zero(), 1.0);
        let ray = camera.pick_ray(PointerSample { x: 0.5, y: 0.0 });

        assert!(ray.direction.x > 0.0);
        assert!(ray.direction.z < 0.0);
    }
}
