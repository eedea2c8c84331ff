//! Orbit camera transform
//!
//! The structure is rotated in front of a camera that sits on the +Z axis
//! looking at the origin. Palm positions live in the same view space the
//! camera sees, so mapping between the two is a rotation plus a zoom scale.

use crate::core::types::{Vec3, Mat4, Quat};

/// Camera orbiting the voxel structure
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitCamera {
    /// Rotation around the vertical axis in radians
    pub yaw: f32,
    /// Rotation around the horizontal axis in radians
    pub pitch: f32,
    /// Distance from the camera to the orbit center
    pub distance: f32,
    /// Distance at which one view unit equals one world unit
    pub reference_distance: f32,
}

impl OrbitCamera {
    /// Create a new camera at `distance`, which also becomes the reference distance
    pub fn new(distance: f32) -> Self {
        Self {
            yaw: 0.0,
            pitch: 0.0,
            distance,
            reference_distance: distance,
        }
    }

    /// World rotation applied to the structure
    pub fn rotation(&self) -> Quat {
        Quat::from_euler(glam::EulerRot::YXZ, self.yaw, self.pitch, 0.0)
    }

    /// How much world space one view unit covers at the current zoom
    pub fn zoom_factor(&self) -> f32 {
        if self.reference_distance > 0.0 {
            self.distance / self.reference_distance
        } else {
            1.0
        }
    }

    /// Map a structure-local point into view space (towards camera is +Z)
    pub fn local_to_view(&self, local: Vec3) -> Vec3 {
        (self.rotation() * local) / self.zoom_factor()
    }

    /// Map a view-space point (e.g. a palm) into the structure's local frame
    pub fn view_to_local(&self, view: Vec3) -> Vec3 {
        self.rotation().conjugate() * (view * self.zoom_factor())
    }

    /// Model matrix for the structure (rotation about the orbit center)
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_quat(self.rotation())
    }

    /// View matrix (world to camera space)
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(Vec3::new(0.0, 0.0, self.distance), Vec3::ZERO, Vec3::Y)
    }
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::new(10.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_mapping() {
        let camera = OrbitCamera::default();
        let p = Vec3::new(1.0, 2.0, 3.0);
        assert!((camera.local_to_view(p) - p).length() < 1e-5);
        assert!((camera.view_to_local(p) - p).length() < 1e-5);
    }

    #[test]
    fn test_yaw_swings_front_to_side() {
        let mut camera = OrbitCamera::default();
        camera.yaw = std::f32::consts::FRAC_PI_2;

        let view = camera.local_to_view(Vec3::Z);
        assert!((view - Vec3::X).length() < 1e-5);
    }

    #[test]
    fn test_view_local_roundtrip_with_zoom() {
        let mut camera = OrbitCamera::default();
        camera.yaw = 0.7;
        camera.pitch = -0.3;
        camera.distance = 20.0;

        let local = Vec3::new(-2.0, 1.0, 4.0);
        let back = camera.view_to_local(camera.local_to_view(local));
        assert!((back - local).length() < 1e-4);

        // Zoomed out: the structure looks half as big
        assert!((camera.zoom_factor() - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_view_matrix_translation() {
        let camera = OrbitCamera::default();
        let origin_in_camera = camera.view_matrix().transform_point3(Vec3::ZERO);
        assert!((origin_in_camera.z - (-10.0)).abs() < 0.001);
    }
}
