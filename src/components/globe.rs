use bevy_ecs::prelude::*;
use cgmath::{Matrix4, Rad};

use crate::systems::geospatial::coordinates::{AURORA_RADIUS, CLOUD_RADIUS, SURFACE_RADIUS};

#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameClock {
    pub delta: f32,
    pub elapsed: f32,
}

impl FrameClock {
    pub fn advance(&mut self, delta: f32) {
        self.delta = delta;
        self.elapsed += delta;
    }
}

/// Slow yaw of the group holding the globe (or the city model) and its
/// markers.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct GlobeSpin {
    /// radians per second
    pub speed: f32,
    pub angle: f32,
    pub paused: bool,
}

impl GlobeSpin {
    pub fn new(speed: f32) -> Self {
        Self {
            speed,
            angle: 0.0,
            paused: false,
        }
    }

    pub fn advance(&mut self, delta: f32) {
        if !self.paused {
            self.angle = (self.angle + self.speed * delta) % std::f32::consts::TAU;
        }
    }

    pub fn group_matrix(&self) -> Matrix4<f32> {
        Matrix4::from_angle_y(Rad(self.angle))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerKind {
    Surface,
    Clouds,
    Aurora,
}

impl LayerKind {
    pub fn radius(self) -> f32 {
        match self {
            LayerKind::Surface => SURFACE_RADIUS,
            LayerKind::Clouds => CLOUD_RADIUS,
            LayerKind::Aurora => AURORA_RADIUS,
        }
    }
}

/// A sphere shell riding on the globe group, turning on its own at
/// `spin_speed` radians per second.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct ShellLayer {
    pub kind: LayerKind,
    pub spin_speed: f32,
}

impl ShellLayer {
    pub fn earth() -> [ShellLayer; 3] {
        [
            ShellLayer {
                kind: LayerKind::Surface,
                spin_speed: 0.0,
            },
            ShellLayer {
                kind: LayerKind::Clouds,
                spin_speed: 0.01,
            },
            ShellLayer {
                kind: LayerKind::Aurora,
                spin_speed: 0.05,
            },
        ]
    }

    pub fn yaw_at(&self, elapsed: f32) -> f32 {
        (elapsed * self.spin_speed) % std::f32::consts::TAU
    }
}
