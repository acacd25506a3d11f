use std::f32::consts::TAU;

use bevy_ecs::prelude::*;
use cgmath::Vector3;
use rand::Rng;

/// Something circling the scene origin in a horizontal plane: a comet or a
/// distant planet.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct OrbitingBody {
    pub distance: f32,
    /// radians per second
    pub speed: f32,
    pub angle: f32,
    pub height: f32,
    pub size: f32,
    /// spin about the body's own axis, radians per second
    pub rotation_speed: f32,
}

impl OrbitingBody {
    pub fn comet<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            speed: rng.gen_range(0.01..0.03),
            distance: rng.gen_range(30.0..50.0),
            angle: rng.gen_range(0.0..TAU),
            height: rng.gen_range(-5.0..5.0),
            size: 0.2,
            rotation_speed: 0.0,
        }
    }

    /// Orbit through `position`, keeping its height.
    pub fn planet(position: Vector3<f32>, size: f32, speed: f32, rotation_speed: f32) -> Self {
        Self {
            distance: position.x.hypot(position.z),
            speed,
            angle: position.z.atan2(position.x),
            height: position.y,
            size,
            rotation_speed,
        }
    }

    pub fn position_at(&self, elapsed: f32) -> Vector3<f32> {
        let angle = elapsed * self.speed + self.angle;
        Vector3::new(
            angle.cos() * self.distance,
            self.height,
            angle.sin() * self.distance,
        )
    }

    pub fn rotation_at(&self, elapsed: f32) -> f32 {
        (elapsed * self.rotation_speed) % TAU
    }
}

/// The backdrop around the globe: Mars and Venus on slow orbits, a parked
/// Saturn and five comets.
pub fn space_environment<R: Rng + ?Sized>(rng: &mut R) -> Vec<OrbitingBody> {
    // self-rotation of 0.01 and 0.007 rad per frame, taken at 60 fps
    let mut bodies = vec![
        OrbitingBody::planet(Vector3::new(25.0, 0.0, 15.0), 0.8, 0.05, 0.01 * 60.0),
        OrbitingBody::planet(Vector3::new(-30.0, -5.0, -10.0), 0.9, 0.03, 0.007 * 60.0),
        OrbitingBody::planet(Vector3::new(45.0, 10.0, -25.0), 1.5, 0.0, 0.0),
    ];
    bodies.extend((0..5).map(|_| OrbitingBody::comet(rng)));
    bodies
}
