//! Math utilities and types
//!
//! Provides fundamental math types for 3D graphics, aliased over [nalgebra].

pub use nalgebra::{Matrix3, Matrix4, Vector2, Vector3, Vector4};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type
pub type Vec4 = Vector4<f32>;

/// 3x3 matrix type
pub type Mat3 = Matrix3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// 2 * Pi
    pub const TAU: f32 = 2.0 * PI;

    /// Pi / 2
    pub const HALF_PI: f32 = PI * 0.5;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;

    /// Radians to degrees conversion factor
    pub const RAD_TO_DEG: f32 = 180.0 / PI;
}

/// Math utility functions
pub mod utils {
    use super::constants;

    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * constants::DEG_TO_RAD
    }

    /// Convert radians to degrees
    pub fn rad_to_deg(radians: f32) -> f32 {
        radians * constants::RAD_TO_DEG
    }

    /// Clamp a value between min and max
    pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
        if value < min {
            min
        } else if value > max {
            max
        } else {
            value
        }
    }

    /// Linear interpolation
    pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
        a + (b - a) * t
    }
}

/// Extension trait for Mat4 with additional convenience methods
pub trait Mat4Ext {
    /// Create a rotation matrix around the X axis
    fn rotation_x(angle: f32) -> Mat4;

    /// Create a rotation matrix around the Y axis
    fn rotation_y(angle: f32) -> Mat4;

    /// Create a rotation matrix around the Z axis
    fn rotation_z(angle: f32) -> Mat4;

    /// Create an OpenGL perspective projection matrix
    fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4;

    /// Create a right-handed look-at view matrix
    fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Mat4;
}

impl Mat4Ext for Mat4 {
    fn rotation_x(angle: f32) -> Mat4 {
        Mat4::from_axis_angle(&Vec3::x_axis(), angle)
    }

    fn rotation_y(angle: f32) -> Mat4 {
        Mat4::from_axis_angle(&Vec3::y_axis(), angle)
    }

    fn rotation_z(angle: f32) -> Mat4 {
        Mat4::from_axis_angle(&Vec3::z_axis(), angle)
    }

    fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
        // Standard OpenGL perspective matrix mapping depth to [-1, 1] NDC
        // with a right-handed view space looking down -Z.
        let tan_half_fovy = (fov_y * 0.5).tan();

        let mut result = Mat4::zeros();
        result[(0, 0)] = 1.0 / (aspect * tan_half_fovy);
        result[(1, 1)] = 1.0 / tan_half_fovy;
        result[(2, 2)] = -(far + near) / (far - near);
        result[(2, 3)] = -(2.0 * far * near) / (far - near);
        result[(3, 2)] = -1.0; // Perspective divide trigger

        result
    }

    fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Mat4 {
        // Right-handed look-at for OpenGL's Y-up, camera-looks-down-negative-Z
        // convention. Equivalent to the classic gluLookAt construction.
        let forward = (target - eye).normalize();
        let right = forward.cross(&up).normalize();
        let camera_up = right.cross(&forward);

        let translation = Mat4::new(
            1.0, 0.0, 0.0, -eye.x,
            0.0, 1.0, 0.0, -eye.y,
            0.0, 0.0, 1.0, -eye.z,
            0.0, 0.0, 0.0, 1.0,
        );

        let rotation = Mat4::new(
            right.x, right.y, right.z, 0.0,
            camera_up.x, camera_up.y, camera_up.z, 0.0,
            -forward.x, -forward.y, -forward.z, 0.0,
            0.0, 0.0, 0.0, 1.0,
        );

        rotation * translation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_deg_rad_conversion_roundtrip() {
        assert_relative_eq!(utils::deg_to_rad(180.0), constants::PI);
        assert_relative_eq!(utils::rad_to_deg(constants::PI), 180.0);
        assert_relative_eq!(utils::rad_to_deg(utils::deg_to_rad(73.5)), 73.5, epsilon = 1e-4);
    }

    #[test]
    fn test_clamp_and_lerp() {
        assert_relative_eq!(utils::clamp(5.0, 0.0, 1.0), 1.0);
        assert_relative_eq!(utils::clamp(-5.0, 0.0, 1.0), 0.0);
        assert_relative_eq!(utils::clamp(0.5, 0.0, 1.0), 0.5);
        assert_relative_eq!(utils::lerp(0.0, 10.0, 0.25), 2.5);
    }

    #[test]
    fn test_look_at_transforms_eye_to_origin() {
        let eye = Vec3::new(0.0, 0.0, 3.0);
        let view = Mat4::look_at(eye, Vec3::zeros(), Vec3::new(0.0, 1.0, 0.0));

        let transformed = view * Vec4::new(eye.x, eye.y, eye.z, 1.0);
        assert_relative_eq!(transformed.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(transformed.y, 0.0, epsilon = 1e-6);
        assert_relative_eq!(transformed.z, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_look_at_points_down_negative_z() {
        // A point directly in front of the camera must land on the -Z axis
        // in view space.
        let view = Mat4::look_at(
            Vec3::new(0.0, 0.0, 3.0),
            Vec3::zeros(),
            Vec3::new(0.0, 1.0, 0.0),
        );
        let ahead = view * Vec4::new(0.0, 0.0, 0.0, 1.0);
        assert_relative_eq!(ahead.z, -3.0, epsilon = 1e-6);
    }

    #[test]
    fn test_perspective_maps_near_and_far_planes() {
        let near = 0.1;
        let far = 100.0;
        let proj = Mat4::perspective(utils::deg_to_rad(45.0), 16.0 / 9.0, near, far);

        // Points on the near/far planes map to -1/+1 NDC depth after the
        // perspective divide.
        let on_near = proj * Vec4::new(0.0, 0.0, -near, 1.0);
        let on_far = proj * Vec4::new(0.0, 0.0, -far, 1.0);
        assert_relative_eq!(on_near.z / on_near.w, -1.0, epsilon = 1e-4);
        assert_relative_eq!(on_far.z / on_far.w, 1.0, epsilon = 1e-4);
    }

    #[test]
    fn test_rotation_y_quarter_turn() {
        let rot = Mat4::rotation_y(constants::HALF_PI);
        let v = rot * Vec4::new(1.0, 0.0, 0.0, 0.0);
        assert_relative_eq!(v.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(v.z, -1.0, epsilon = 1e-6);
    }
}
