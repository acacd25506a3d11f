use bevy_ecs::prelude::*;
use cgmath::{Matrix4, Rad, Vector3};

use crate::systems::geospatial::ScenePoint;

/// A selectable location: a country or city on the globe, a neighborhood
/// on the city model.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct Marker {
    pub id: String,
    pub name: String,
}

#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub point: ScenePoint,
    /// shell radius on the globe, height above the base plane on the city model
    pub level: f32,
}

/// Position relative to the spinning scene group.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub translation: Vector3<f32>,
    /// radians about +Y
    pub yaw: f32,
    pub scale: f32,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            translation: Vector3::new(0.0, 0.0, 0.0),
            yaw: 0.0,
            scale: 1.0,
        }
    }
}

impl Transform {
    pub fn local_matrix(&self) -> Matrix4<f32> {
        Matrix4::from_translation(self.translation)
            * Matrix4::from_angle_y(Rad(self.yaw))
            * Matrix4::from_scale(self.scale)
    }
}

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selected;

/// Breathing highlight on the selected marker.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Pulse {
    pub scale: f32,
    pub opacity: f32,
}

impl Default for Pulse {
    fn default() -> Self {
        Self {
            scale: 1.0,
            opacity: 0.5,
        }
    }
}

impl Pulse {
    pub fn at(elapsed: f32) -> Self {
        let wave = (elapsed * 3.0).sin();
        Self {
            scale: 1.0 + wave * 0.2,
            opacity: 0.5 - wave * 0.3,
        }
    }
}
