use bevy_ecs::prelude::*;
use cgmath::EuclideanSpace;

use crate::components::{
    camera::{Camera, CameraComponent, CameraUniform},
    controls::OrbitControls,
    globe::FrameClock,
};
use crate::config::ViewConfig;

pub struct CameraSystem {}

impl CameraSystem {
    pub fn create_camera(view: &ViewConfig, aspect: f32) -> (CameraComponent, OrbitControls) {
        let camera = Camera {
            eye: view.eye,
            // orbit around the origin, the globe (or city model) sits there
            target: cgmath::Point3::origin(),
            // which way is "up"
            up: cgmath::Vector3::unit_y(),
            aspect,
            fovy: view.fovy,
            znear: view.znear,
            zfar: view.zfar,
        };

        let mut camera_uniform = CameraUniform::new();
        camera_uniform.update_view_proj(&camera);

        (
            CameraComponent {
                camera,
                camera_uniform,
            },
            OrbitControls::new(view.controls),
        )
    }
}

pub fn update_camera(
    clock: Res<FrameClock>,
    mut controls: ResMut<OrbitControls>,
    mut camera_component: ResMut<CameraComponent>,
) {
    let CameraComponent {
        camera,
        camera_uniform,
    } = &mut *camera_component;
    controls.update_camera(camera, clock.delta);
    camera_uniform.update_view_proj(camera);
}
