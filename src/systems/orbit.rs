use bevy_ecs::prelude::*;

use crate::components::{
    globe::{FrameClock, GlobeSpin, ShellLayer},
    marker::Transform,
    orbit::OrbitingBody,
};

pub fn spin_scene(clock: Res<FrameClock>, mut spin: ResMut<GlobeSpin>) {
    spin.advance(clock.delta);
}

pub fn spin_layers(clock: Res<FrameClock>, mut layers: Query<(&ShellLayer, &mut Transform)>) {
    for (layer, mut transform) in &mut layers {
        transform.yaw = layer.yaw_at(clock.elapsed);
    }
}

pub fn orbit_bodies(clock: Res<FrameClock>, mut bodies: Query<(&OrbitingBody, &mut Transform)>) {
    for (body, mut transform) in &mut bodies {
        transform.translation = body.position_at(clock.elapsed);
        transform.yaw = body.rotation_at(clock.elapsed);
    }
}
