//! # First-Person Fly Camera
//!
//! Provides the free-flying camera used by the tutorial scenes: yaw/pitch
//! mouse look, WASD-style planar movement, and scroll-wheel zoom.
//!
//! ## Design Principles
//! - **Library-agnostic**: no GL or windowing dependencies in camera math
//! - **Explicit state**: the camera is an owned value passed through the
//!   frame update, not a global
//! - **Mathematical correctness**: standard right-handed Y-up view space

use crate::foundation::math::{utils, Mat4, Mat4Ext, Vec3};

/// Default yaw pointing down -Z
const DEFAULT_YAW: f32 = -90.0;
/// Pitch is clamped short of the poles to avoid view-matrix flip
const PITCH_LIMIT: f32 = 89.0;
/// Scroll zoom range in degrees of vertical field of view
const FOV_MIN: f32 = 1.0;
const FOV_MAX: f32 = 45.0;

/// Discrete movement directions fed from held keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraMovement {
    /// Move along the view direction
    Forward,
    /// Move against the view direction
    Backward,
    /// Strafe left
    Left,
    /// Strafe right
    Right,
    /// Move along world up
    Up,
    /// Move against world up
    Down,
}

/// Free-flying first-person camera
///
/// Maintains a position plus yaw/pitch Euler angles and derives the
/// orthonormal basis from them. The camera supplies the `view` matrix and
/// world-space eye position consumed by the lighting bind-frame contract.
///
/// # Coordinate System
/// Right-handed, Y-up. At the default yaw of -90° the camera looks down the
/// negative Z axis.
#[derive(Debug, Clone)]
pub struct FlyCamera {
    /// Camera position in world space
    pub position: Vec3,
    /// Movement speed in world units per second
    pub speed: f32,
    /// Mouse look sensitivity in degrees per pixel
    pub sensitivity: f32,

    front: Vec3,
    up: Vec3,
    right: Vec3,
    world_up: Vec3,
    yaw: f32,
    pitch: f32,
    fov_degrees: f32,
    aspect: f32,
    near: f32,
    far: f32,
}

impl FlyCamera {
    /// Create a camera at `position` with the given viewport aspect ratio
    ///
    /// The camera starts level, looking down -Z, with a 45° vertical field of
    /// view and 0.1/100.0 clip planes.
    pub fn new(position: Vec3, aspect: f32) -> Self {
        let mut camera = Self {
            position,
            speed: 2.5,
            sensitivity: 0.1,
            front: Vec3::new(0.0, 0.0, -1.0),
            up: Vec3::new(0.0, 1.0, 0.0),
            right: Vec3::new(1.0, 0.0, 0.0),
            world_up: Vec3::new(0.0, 1.0, 0.0),
            yaw: DEFAULT_YAW,
            pitch: 0.0,
            fov_degrees: FOV_MAX,
            aspect,
            near: 0.1,
            far: 100.0,
        };
        camera.update_basis();
        camera
    }

    /// Generate the view matrix for world-to-camera transformation
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at(self.position, self.position + self.front, self.up)
    }

    /// Generate the perspective projection matrix for the current zoom level
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective(
            utils::deg_to_rad(self.fov_degrees),
            self.aspect,
            self.near,
            self.far,
        )
    }

    /// World-space eye position, uploaded as the `viewPos` uniform
    pub fn eye_position(&self) -> Vec3 {
        self.position
    }

    /// Current vertical field of view in degrees
    pub fn fov_degrees(&self) -> f32 {
        self.fov_degrees
    }

    /// Normalized view direction
    pub fn front(&self) -> Vec3 {
        self.front
    }

    /// Set the vertical field of view, clamped to the zoom range
    pub fn set_fov_degrees(&mut self, fov_degrees: f32) {
        self.fov_degrees = utils::clamp(fov_degrees, FOV_MIN, FOV_MAX);
    }

    /// Update the aspect ratio for viewport changes
    ///
    /// Only logs when the change is significant (> 0.01) to reduce log noise
    /// during window resize events.
    pub fn set_aspect_ratio(&mut self, aspect: f32) {
        if (self.aspect - aspect).abs() > 0.01 {
            log::info!("Camera aspect ratio changed: {:.3} -> {:.3}", self.aspect, aspect);
        }
        self.aspect = aspect;
    }

    /// Apply one frame of keyboard movement
    ///
    /// # Arguments
    /// * `direction` - Which way to move, relative to the camera basis
    /// * `delta_time` - Seconds elapsed since the previous frame
    pub fn process_keyboard(&mut self, direction: CameraMovement, delta_time: f32) {
        let velocity = self.speed * delta_time;
        match direction {
            CameraMovement::Forward => self.position += self.front * velocity,
            CameraMovement::Backward => self.position -= self.front * velocity,
            CameraMovement::Left => self.position -= self.right * velocity,
            CameraMovement::Right => self.position += self.right * velocity,
            CameraMovement::Up => self.position += self.world_up * velocity,
            CameraMovement::Down => self.position -= self.world_up * velocity,
        }
    }

    /// Apply a mouse movement delta in pixels
    ///
    /// Yaw accumulates freely; pitch is clamped short of straight up/down so
    /// the view basis never degenerates.
    pub fn process_mouse(&mut self, x_offset: f32, y_offset: f32) {
        self.yaw += x_offset * self.sensitivity;
        self.pitch += y_offset * self.sensitivity;
        self.pitch = utils::clamp(self.pitch, -PITCH_LIMIT, PITCH_LIMIT);
        self.update_basis();
    }

    /// Apply a scroll-wheel zoom delta
    ///
    /// Narrows or widens the field of view within the 1°..45° range.
    pub fn process_scroll(&mut self, y_offset: f32) {
        self.fov_degrees = utils::clamp(self.fov_degrees - y_offset, FOV_MIN, FOV_MAX);
        log::trace!("Camera fov updated to: {:.1}", self.fov_degrees);
    }

    /// Recompute the orthonormal basis from yaw and pitch
    fn update_basis(&mut self) {
        let yaw = utils::deg_to_rad(self.yaw);
        let pitch = utils::deg_to_rad(self.pitch);

        let front = Vec3::new(
            yaw.cos() * pitch.cos(),
            pitch.sin(),
            yaw.sin() * pitch.cos(),
        );
        self.front = front.normalize();
        self.right = self.front.cross(&self.world_up).normalize();
        self.up = self.right.cross(&self.front).normalize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_orientation_looks_down_negative_z() {
        let camera = FlyCamera::new(Vec3::zeros(), 16.0 / 9.0);
        assert_relative_eq!(camera.front().x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(camera.front().y, 0.0, epsilon = 1e-6);
        assert_relative_eq!(camera.front().z, -1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_pitch_is_clamped() {
        let mut camera = FlyCamera::new(Vec3::zeros(), 1.0);
        // A huge upward mouse swing must not flip the camera
        camera.process_mouse(0.0, 10_000.0);
        assert!(camera.front().y < 1.0);
        assert!(camera.front().y > 0.99); // Looking almost straight up

        camera.process_mouse(0.0, -100_000.0);
        assert!(camera.front().y > -1.0);
        assert!(camera.front().y < -0.99);
    }

    #[test]
    fn test_scroll_zoom_is_clamped() {
        let mut camera = FlyCamera::new(Vec3::zeros(), 1.0);
        camera.process_scroll(100.0);
        assert_relative_eq!(camera.fov_degrees(), 1.0);
        camera.process_scroll(-100.0);
        assert_relative_eq!(camera.fov_degrees(), 45.0);
    }

    #[test]
    fn test_forward_movement_follows_view_direction() {
        let mut camera = FlyCamera::new(Vec3::zeros(), 1.0);
        camera.speed = 1.0;
        camera.process_keyboard(CameraMovement::Forward, 2.0);
        assert_relative_eq!(camera.position.z, -2.0, epsilon = 1e-6);

        // Turn 90 degrees right, forward is now +X
        camera.process_mouse(90.0 / camera.sensitivity, 0.0);
        camera.process_keyboard(CameraMovement::Forward, 1.0);
        assert_relative_eq!(camera.position.x, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_vertical_movement_uses_world_up() {
        let mut camera = FlyCamera::new(Vec3::zeros(), 1.0);
        camera.speed = 1.0;
        // Pitch down, then move up: vertical motion must still be world +Y
        camera.process_mouse(0.0, -450.0);
        camera.process_keyboard(CameraMovement::Up, 1.0);
        assert_relative_eq!(camera.position.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(camera.position.y, 1.0, epsilon = 1e-6);
        assert_relative_eq!(camera.position.z, 0.0, epsilon = 1e-6);
    }
}
