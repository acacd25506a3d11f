use bevy_ecs::prelude::*;
use cgmath::{Matrix3, Rad, Vector3};

use super::geospatial::{project, GeoPoint};

/// Tuning for how far the auto-focus moves the camera. The look-at target
/// only drifts a little off the origin and the camera sits just outside
/// the globe, so selecting a place nudges the view instead of snapping
/// onto the marker.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct FramingScales {
    pub target_scale: f32,
    pub camera_scale: f32,
}

impl Default for FramingScales {
    fn default() -> Self {
        Self {
            target_scale: 0.1,
            camera_scale: 1.8,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraFrame {
    pub target: Vector3<f32>,
    pub position: Vector3<f32>,
}

impl CameraFrame {
    /// Rotates the frame about +Y, taking a frame computed in the spinning
    /// globe group's local space into world space.
    pub fn rotated_y(self, angle: f32) -> Self {
        let rotation = Matrix3::from_angle_y(Rad(angle));
        Self {
            target: rotation * self.target,
            position: rotation * self.position,
        }
    }
}

/// Look-at target and camera position along the ray through `point`.
pub fn frame_camera(point: GeoPoint, target_scale: f32, camera_scale: f32) -> CameraFrame {
    CameraFrame {
        target: project(point.latitude, point.longitude, target_scale),
        position: project(point.latitude, point.longitude, camera_scale),
    }
}

impl FramingScales {
    pub fn frame(&self, point: GeoPoint) -> CameraFrame {
        frame_camera(point, self.target_scale, self.camera_scale)
    }
}
