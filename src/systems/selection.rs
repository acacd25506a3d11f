use bevy_ecs::prelude::*;

use super::framing::FramingScales;
use super::readiness::{PendingFraming, Readiness};
use crate::components::{controls::OrbitControls, globe::GlobeSpin};

/// The only state the framing procedure depends on: whether something is
/// selected, and which marker.
#[derive(Resource, Debug, Default, Clone, PartialEq, Eq)]
pub struct Selection {
    pub entity: Option<Entity>,
    pub id: Option<String>,
}

impl Selection {
    pub fn is_some(&self) -> bool {
        self.entity.is_some()
    }
}

pub fn apply_pending_framing(
    readiness: Res<Readiness>,
    scales: Res<FramingScales>,
    spin: Res<GlobeSpin>,
    mut pending: ResMut<PendingFraming>,
    mut controls: ResMut<OrbitControls>,
) {
    if let Some(point) = pending.take_if_ready(&readiness) {
        let frame = scales.frame(point).rotated_y(spin.angle);
        tracing::debug!(
            latitude = point.latitude,
            longitude = point.longitude,
            target = ?frame.target,
            position = ?frame.position,
            "framing camera"
        );
        controls.set_goal(frame);
    }
}
