use bevy_ecs::prelude::*;

use crate::components::{
    globe::FrameClock,
    marker::{Placement, Pulse, Selected, Transform},
};

pub fn place_markers(mut markers: Query<(&Placement, &mut Transform), Changed<Placement>>) {
    for (placement, mut transform) in &mut markers {
        transform.translation = placement.point.to_vector(placement.level);
        tracing::trace!(?placement, "marker placed");
    }
}

pub fn animate_pulse(
    clock: Res<FrameClock>,
    mut markers: Query<(&mut Pulse, &mut Transform), With<Selected>>,
) {
    for (mut pulse, mut transform) in &mut markers {
        *pulse = Pulse::at(clock.elapsed);
        transform.scale = pulse.scale;
    }
}
