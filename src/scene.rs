use anyhow::{bail, Result};
use bevy_ecs::prelude::*;
use bevy_ecs::schedule::ExecutorKind;
use rand::Rng;

use crate::components::{
    camera::{CameraComponent, CameraUniform},
    controls::{ControlInput, OrbitControls},
    globe::{FrameClock, GlobeSpin, LayerKind, ShellLayer},
    marker::{Marker, Placement, Pulse, Selected, Transform},
    orbit::{space_environment, OrbitingBody},
};
use crate::config::{SceneConfig, SceneKind};
use crate::matrix4_to_array;
use crate::systems::{
    camera::{update_camera, CameraSystem},
    framing::FramingScales,
    geospatial::ScenePoint,
    markers::{animate_pulse, place_markers},
    orbit::{orbit_bodies, spin_layers, spin_scene},
    readiness::{poll_readiness, PendingFraming, ReadySignal, Readiness, SceneReadiness},
    selection::{apply_pending_framing, Selection},
    stars::StarField,
};

/// Headless scene state for one mounted viewer. The host renders from
/// [`GlobeScene::camera_uniform`], [`GlobeScene::marker_matrices`],
/// [`GlobeScene::layer_matrices`], [`GlobeScene::body_matrices`] and
/// [`GlobeScene::stars`], and calls [`ReadySignal::notify`] on the signal
/// returned by [`GlobeScene::new`] once its own setup is done.
pub struct GlobeScene {
    kind: SceneKind,
    world: World,
    schedule: Schedule,
}

impl GlobeScene {
    pub fn new<R: Rng + ?Sized>(config: SceneConfig, rng: &mut R) -> Result<(Self, ReadySignal)> {
        config.validate()?;

        let view = config.view();
        let (camera_component, controls) = CameraSystem::create_camera(view, config.aspect);
        let (signal, listener) = SceneReadiness::channel();

        let mut world = World::new();
        world.insert_resource(FrameClock::default());
        world.insert_resource(GlobeSpin::new(view.spin_speed));
        world.insert_resource(camera_component);
        world.insert_resource(controls);
        world.insert_resource(config.framing);
        world.insert_resource(Readiness::new(listener));
        world.insert_resource(Selection::default());
        world.insert_resource(StarField::generate(&config.stars, rng));

        let mut pending = PendingFraming::default();
        if config.kind == SceneKind::Globe {
            if let Some(focus) = config.globe.initial_focus {
                pending.request(focus);
            }
        }
        world.insert_resource(pending);

        if config.kind == SceneKind::Globe {
            for layer in ShellLayer::earth() {
                let transform = Transform {
                    scale: layer.kind.radius(),
                    ..Transform::default()
                };
                world.spawn((layer, transform));
            }
        }

        let mut schedule = Schedule::default();
        schedule.set_executor_kind(ExecutorKind::SingleThreaded);
        schedule.add_systems(
            (
                poll_readiness,
                apply_pending_framing,
                spin_scene,
                place_markers,
                animate_pulse,
                spin_layers,
                orbit_bodies,
                update_camera,
            )
                .chain(),
        );

        let mut scene = Self {
            kind: config.kind,
            world,
            schedule,
        };
        if config.kind == SceneKind::Globe && config.globe.space_environment {
            for body in space_environment(rng) {
                scene.add_orbiting_body(body);
            }
        }

        tracing::info!(kind = ?config.kind, "scene created");
        Ok((scene, signal))
    }

    pub fn kind(&self) -> SceneKind {
        self.kind
    }

    pub fn add_marker(
        &mut self,
        id: impl Into<String>,
        name: impl Into<String>,
        point: impl Into<ScenePoint>,
        level: f32,
    ) -> Entity {
        let placement = Placement {
            point: point.into(),
            level,
        };
        let transform = Transform {
            translation: placement.point.to_vector(level),
            ..Transform::default()
        };
        let marker = Marker {
            id: id.into(),
            name: name.into(),
        };
        tracing::debug!(id = %marker.id, ?placement, "marker added");
        self.world.spawn((marker, placement, transform)).id()
    }

    pub fn add_orbiting_body(&mut self, body: OrbitingBody) -> Entity {
        let elapsed = self.world.resource::<FrameClock>().elapsed;
        let transform = Transform {
            translation: body.position_at(elapsed),
            yaw: body.rotation_at(elapsed),
            scale: body.size,
        };
        self.world.spawn((body, transform)).id()
    }

    fn find_marker(&mut self, id: &str) -> Option<(Entity, Placement)> {
        let mut query = self.world.query::<(Entity, &Marker, &Placement)>();
        query
            .iter(&self.world)
            .find(|(_, marker, _)| marker.id == id)
            .map(|(entity, _, placement)| (entity, *placement))
    }

    /// Selects the marker with `id`. Globe markers get the camera framed on
    /// them once the scene is ready and hold the group spin still; every
    /// selection stops the camera's auto-rotation.
    pub fn select(&mut self, id: &str) -> Result<()> {
        let Some((entity, placement)) = self.find_marker(id) else {
            bail!("no marker with id {id:?}");
        };

        self.release_selected();
        self.world.entity_mut(entity).insert((Selected, Pulse::default()));

        {
            let mut pending = self.world.resource_mut::<PendingFraming>();
            match placement.point.as_geo() {
                Some(point) => pending.request(point),
                // city model points are already in view, only the rotation stops
                None => pending.discard(),
            }
        }

        self.world.resource_mut::<OrbitControls>().set_paused(true);
        self.world.resource_mut::<GlobeSpin>().paused = placement.point.as_geo().is_some();
        *self.world.resource_mut::<Selection>() = Selection {
            entity: Some(entity),
            id: Some(id.to_owned()),
        };
        tracing::info!(id, "marker selected");
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.release_selected();
        self.cancel_framing();
        self.world.resource_mut::<OrbitControls>().set_paused(false);
        self.world.resource_mut::<GlobeSpin>().paused = false;
        *self.world.resource_mut::<Selection>() = Selection::default();
        tracing::info!("selection cleared");
    }

    fn release_selected(&mut self) {
        let Some(entity) = self.world.resource::<Selection>().entity else {
            return;
        };
        if let Some(mut previous) = self.world.get_entity_mut(entity) {
            previous.remove::<(Selected, Pulse)>();
            if let Some(mut transform) = previous.get_mut::<Transform>() {
                transform.scale = 1.0;
            }
        }
    }

    pub fn selected(&self) -> Option<&str> {
        self.world.resource::<Selection>().id.as_deref()
    }

    pub fn input(&mut self, input: ControlInput) {
        self.world.resource_mut::<OrbitControls>().process_input(input);
    }

    pub fn update(&mut self, delta: f32) {
        self.world.resource_mut::<FrameClock>().advance(delta);
        self.schedule.run(&mut self.world);
    }

    pub fn is_ready(&self) -> bool {
        self.world.resource::<Readiness>().is_ready()
    }

    /// Drops a framing still waiting for readiness. The selection stays.
    pub fn cancel_framing(&mut self) {
        if self.framing_pending() {
            tracing::debug!("pending framing discarded");
        }
        self.world.resource_mut::<PendingFraming>().discard();
    }

    pub fn framing_pending(&self) -> bool {
        self.world.resource::<PendingFraming>().is_pending()
    }

    pub fn framing_scales(&self) -> FramingScales {
        *self.world.resource::<FramingScales>()
    }

    pub fn camera(&self) -> &CameraComponent {
        self.world.resource::<CameraComponent>()
    }

    pub fn controls(&self) -> &OrbitControls {
        self.world.resource::<OrbitControls>()
    }

    pub fn camera_uniform(&self) -> CameraUniform {
        self.camera().camera_uniform
    }

    pub fn spin(&self) -> GlobeSpin {
        *self.world.resource::<GlobeSpin>()
    }

    pub fn stars(&self) -> &StarField {
        self.world.resource::<StarField>()
    }

    /// World-space model matrices of every marker, keyed by marker id.
    pub fn marker_matrices(&mut self) -> Vec<(String, [[f32; 4]; 4])> {
        let group = self.world.resource::<GlobeSpin>().group_matrix();
        let mut query = self.world.query::<(&Marker, &Transform)>();
        query
            .iter(&self.world)
            .map(|(marker, transform)| {
                (marker.id.clone(), matrix4_to_array(group * transform.local_matrix()))
            })
            .collect()
    }

    /// World-space matrices of the surface, cloud and aurora shells. Each
    /// rides on the group spin and turns on its own on top of it.
    pub fn layer_matrices(&mut self) -> Vec<(LayerKind, [[f32; 4]; 4])> {
        let group = self.world.resource::<GlobeSpin>().group_matrix();
        let mut query = self.world.query::<(&ShellLayer, &Transform)>();
        query
            .iter(&self.world)
            .map(|(layer, transform)| {
                (layer.kind, matrix4_to_array(group * transform.local_matrix()))
            })
            .collect()
    }

    /// World-space matrices of planets and comets. They are outside the
    /// spinning group.
    pub fn body_matrices(&mut self) -> Vec<(Entity, [[f32; 4]; 4])> {
        let mut query = self
            .world
            .query_filtered::<(Entity, &Transform), With<OrbitingBody>>();
        query
            .iter(&self.world)
            .map(|(entity, transform)| (entity, matrix4_to_array(transform.local_matrix())))
            .collect()
    }

    pub fn body_position(&self, entity: Entity) -> Option<cgmath::Vector3<f32>> {
        let entity = self.world.get_entity(entity)?;
        entity.get::<OrbitingBody>()?;
        entity.get::<Transform>().map(|transform| transform.translation)
    }

    pub fn marker_translation(&mut self, id: &str) -> Option<cgmath::Vector3<f32>> {
        let mut query = self.world.query::<(&Marker, &Transform)>();
        query
            .iter(&self.world)
            .find(|(marker, _)| marker.id == id)
            .map(|(_, transform)| transform.translation)
    }

    /// Tears the scene down. Any framing still waiting for readiness is
    /// dropped with it, so a late ready signal has nothing to act on.
    pub fn unmount(mut self) {
        self.cancel_framing();
        tracing::info!(kind = ?self.kind, "scene unmounted");
    }
}
