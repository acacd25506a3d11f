use std::f32::consts::{FRAC_PI_2, PI, TAU};

use bevy_ecs::prelude::*;
use cgmath::{InnerSpace, Point3, Vector3};

use super::camera::Camera;
use crate::systems::framing::CameraFrame;

const EPS: f32 = 1e-6;
/// Smallest accepted `max_polar_angle`; the camera never sits exactly on a pole.
pub const MIN_POLAR_ANGLE: f32 = EPS;
// goal travel is done once both endpoints are this close
const ARRIVAL_EPS: f32 = 1e-4;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitSettings {
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub max_polar_angle: f32,
    pub enable_pan: bool,
    pub auto_rotate: bool,
    /// Full turns per minute, like three.js `autoRotateSpeed`.
    pub auto_rotate_speed: f32,
    /// Fraction of the remaining distance covered per frame while moving to a
    /// framing goal. 1.0 jumps straight there.
    pub damping: f32,
}

impl OrbitSettings {
    pub fn globe() -> Self {
        Self {
            rotate_speed: 0.5,
            zoom_speed: 0.5,
            min_distance: 1.5,
            max_distance: 8.0,
            max_polar_angle: PI,
            enable_pan: false,
            auto_rotate: false,
            auto_rotate_speed: 2.0,
            damping: 0.1,
        }
    }

    pub fn city() -> Self {
        Self {
            rotate_speed: 0.5,
            zoom_speed: 0.7,
            min_distance: 4.0,
            max_distance: 15.0,
            max_polar_angle: PI / 2.1,
            enable_pan: true,
            auto_rotate: true,
            auto_rotate_speed: 0.5,
            damping: 0.1,
        }
    }
}

impl Default for OrbitSettings {
    fn default() -> Self {
        Self::globe()
    }
}

/// Pointer gestures, already normalized by the host. Rotation and pan are
/// fractions of the viewport height, zoom is in wheel steps (positive
/// zooms in).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlInput {
    Rotate { dx: f32, dy: f32 },
    Zoom(f32),
    Pan { dx: f32, dy: f32 },
}

#[derive(Resource, Debug)]
pub struct OrbitControls {
    pub settings: OrbitSettings,
    goal: Option<CameraFrame>,
    rotate_left: f32,
    rotate_up: f32,
    zoom_scale: f32,
    pan: (f32, f32),
    paused: bool,
}

impl OrbitControls {
    pub fn new(settings: OrbitSettings) -> Self {
        Self {
            settings,
            goal: None,
            rotate_left: 0.0,
            rotate_up: 0.0,
            zoom_scale: 1.0,
            pan: (0.0, 0.0),
            paused: false,
        }
    }

    pub fn goal(&self) -> Option<CameraFrame> {
        self.goal
    }

    pub fn is_moving(&self) -> bool {
        self.goal.is_some()
    }

    pub fn set_goal(&mut self, frame: CameraFrame) {
        self.goal = Some(frame);
    }

    /// Stops auto-rotation while something is selected.
    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    pub fn auto_rotating(&self) -> bool {
        self.settings.auto_rotate && !self.paused && self.goal.is_none()
    }

    pub fn process_input(&mut self, input: ControlInput) {
        // the user grabbing the camera wins over an in-flight framing
        self.goal = None;
        match input {
            ControlInput::Rotate { dx, dy } => {
                self.rotate_left += TAU * dx * self.settings.rotate_speed;
                self.rotate_up += TAU * dy * self.settings.rotate_speed;
            }
            ControlInput::Zoom(steps) => {
                self.zoom_scale *= 0.95_f32.powf(self.settings.zoom_speed * steps);
            }
            ControlInput::Pan { dx, dy } => {
                if self.settings.enable_pan {
                    self.pan.0 += dx;
                    self.pan.1 += dy;
                }
            }
        }
    }

    pub fn update_camera(&mut self, camera: &mut Camera, delta: f32) {
        if let Some(goal) = self.goal {
            self.travel(camera, goal);
            return;
        }

        let mut offset = camera.eye - camera.target;
        let mut radius = offset.magnitude();
        if radius < EPS {
            self.reset_deltas();
            return;
        }

        let idle = self.rotate_left == 0.0
            && self.rotate_up == 0.0
            && self.zoom_scale == 1.0
            && self.pan == (0.0, 0.0);
        if idle && !self.auto_rotating() {
            return;
        }

        let mut theta = offset.x.atan2(offset.z);
        let mut phi = (offset.y / radius).clamp(-1.0, 1.0).acos();

        if self.auto_rotating() {
            theta -= TAU / 60.0 * self.settings.auto_rotate_speed * delta;
        }
        theta -= self.rotate_left;
        phi -= self.rotate_up;
        phi = phi.clamp(EPS, self.settings.max_polar_angle.min(PI - EPS).max(EPS));

        radius = (radius * self.zoom_scale)
            .clamp(self.settings.min_distance, self.settings.max_distance);

        if self.pan != (0.0, 0.0) {
            let forward = (-offset).normalize();
            let right = forward.cross(camera.up).normalize();
            let up = right.cross(forward);
            let shift = (right * -self.pan.0 + up * self.pan.1) * radius;
            camera.target += shift;
        }

        offset = spherical_offset(radius, phi, theta);
        camera.eye = camera.target + offset;
        self.reset_deltas();
    }

    fn travel(&mut self, camera: &mut Camera, goal: CameraFrame) {
        let t = self.settings.damping.clamp(EPS, 1.0);
        let eye = lerp(camera.eye, goal.position, t);
        let target = lerp(camera.target, goal.target, t);
        let arrived = (eye - goal.position).magnitude() < ARRIVAL_EPS
            && (target - goal.target).magnitude() < ARRIVAL_EPS;
        if arrived {
            camera.eye = Point3::new(goal.position.x, goal.position.y, goal.position.z);
            camera.target = Point3::new(goal.target.x, goal.target.y, goal.target.z);
            self.goal = None;
            tracing::debug!("camera settled on framing goal");
        } else {
            camera.eye = Point3::new(eye.x, eye.y, eye.z);
            camera.target = Point3::new(target.x, target.y, target.z);
        }
        self.reset_deltas();
    }

    fn reset_deltas(&mut self) {
        self.rotate_left = 0.0;
        self.rotate_up = 0.0;
        self.zoom_scale = 1.0;
        self.pan = (0.0, 0.0);
    }
}

fn lerp(from: Point3<f32>, goal: Vector3<f32>, t: f32) -> Vector3<f32> {
    let from = Vector3::new(from.x, from.y, from.z);
    from + (goal - from) * t
}

// polar angle from +Y, azimuth from +Z toward +X
fn spherical_offset(radius: f32, phi: f32, theta: f32) -> Vector3<f32> {
    let sin_phi = phi.sin();
    Vector3::new(
        radius * sin_phi * theta.sin(),
        radius * phi.cos(),
        radius * sin_phi * theta.cos(),
    )
}

pub fn polar_angle(camera: &Camera) -> f32 {
    let offset = camera.eye - camera.target;
    let radius = offset.magnitude();
    if radius < EPS {
        return FRAC_PI_2;
    }
    (offset.y / radius).clamp(-1.0, 1.0).acos()
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use cgmath::EuclideanSpace;

    use super::*;

    fn camera_at(eye: Point3<f32>) -> Camera {
        Camera {
            eye,
            target: Point3::origin(),
            up: Vector3::unit_y(),
            aspect: 1.0,
            fovy: 45.0,
            znear: 0.1,
            zfar: 1000.0,
        }
    }

    fn distance(camera: &Camera) -> f32 {
        (camera.eye - camera.target).magnitude()
    }

    #[test]
    fn zoom_is_clamped_to_distance_range() {
        let mut controls = OrbitControls::new(OrbitSettings::globe());
        let mut camera = camera_at(Point3::new(0.0, 0.0, 2.5));

        controls.process_input(ControlInput::Zoom(500.0));
        controls.update_camera(&mut camera, 0.016);
        assert_abs_diff_eq!(distance(&camera), 1.5, epsilon = 1e-5);

        controls.process_input(ControlInput::Zoom(-500.0));
        controls.update_camera(&mut camera, 0.016);
        assert_abs_diff_eq!(distance(&camera), 8.0, epsilon = 1e-4);
    }

    #[test]
    fn rotation_keeps_distance() {
        let mut controls = OrbitControls::new(OrbitSettings::globe());
        let mut camera = camera_at(Point3::new(0.0, 0.0, 2.5));
        controls.process_input(ControlInput::Rotate { dx: 0.1, dy: 0.05 });
        controls.update_camera(&mut camera, 0.016);
        assert_abs_diff_eq!(distance(&camera), 2.5, epsilon = 1e-5);
        assert!(camera.eye.x.abs() > 0.1);
    }

    #[test]
    fn city_camera_stays_above_the_ground() {
        let mut controls = OrbitControls::new(OrbitSettings::city());
        let mut camera = camera_at(Point3::new(0.0, 7.0, 7.0));
        controls.process_input(ControlInput::Rotate { dx: 0.0, dy: -1.0 });
        controls.update_camera(&mut camera, 0.016);
        assert!(polar_angle(&camera) <= PI / 2.1 + 1e-5);
        assert!(camera.eye.y > 0.0);
    }

    #[test]
    fn tiny_polar_limit_pins_camera_to_the_pole() {
        let mut settings = OrbitSettings::globe();
        settings.max_polar_angle = 1e-7;
        let mut controls = OrbitControls::new(settings);
        let mut camera = camera_at(Point3::new(0.0, 0.0, 2.5));
        controls.process_input(ControlInput::Rotate { dx: 0.2, dy: 0.3 });
        controls.update_camera(&mut camera, 0.016);
        assert_abs_diff_eq!(polar_angle(&camera), EPS, epsilon = 1e-4);
        assert_abs_diff_eq!(distance(&camera), 2.5, epsilon = 1e-4);
    }

    #[test]
    fn auto_rotate_turns_at_configured_rate() {
        let mut controls = OrbitControls::new(OrbitSettings::city());
        let mut camera = camera_at(Point3::new(0.0, 0.0, 10.0));
        let before = camera.eye.x.atan2(camera.eye.z);
        controls.update_camera(&mut camera, 1.0);
        let after = camera.eye.x.atan2(camera.eye.z);
        assert_abs_diff_eq!(before - after, TAU / 60.0 * 0.5, epsilon = 1e-5);

        controls.set_paused(true);
        let eye = camera.eye;
        controls.update_camera(&mut camera, 1.0);
        assert_eq!(camera.eye, eye);
    }

    #[test]
    fn pan_is_ignored_on_the_globe() {
        let mut controls = OrbitControls::new(OrbitSettings::globe());
        let mut camera = camera_at(Point3::new(0.0, 0.0, 2.5));
        controls.process_input(ControlInput::Pan { dx: 0.3, dy: 0.3 });
        controls.update_camera(&mut camera, 0.016);
        assert_eq!(camera.target, Point3::origin());
    }

    #[test]
    fn pan_moves_target_and_eye_together() {
        let mut controls = OrbitControls::new(OrbitSettings::city());
        controls.set_paused(true);
        let mut camera = camera_at(Point3::new(0.0, 7.0, 7.0));
        let before = distance(&camera);
        controls.process_input(ControlInput::Pan { dx: 0.1, dy: 0.0 });
        controls.update_camera(&mut camera, 0.016);
        assert!(camera.target.x.abs() > 0.1);
        assert_abs_diff_eq!(distance(&camera), before, epsilon = 1e-4);
    }

    #[test]
    fn goal_is_reached_with_damping() {
        let mut controls = OrbitControls::new(OrbitSettings::globe());
        let mut camera = camera_at(Point3::new(0.0, 0.0, 2.5));
        let goal = CameraFrame {
            target: Vector3::new(0.1, 0.0, 0.0),
            position: Vector3::new(1.8, 0.0, 0.0),
        };
        controls.set_goal(goal);
        controls.update_camera(&mut camera, 0.016);
        assert!(controls.is_moving());
        for _ in 0..500 {
            controls.update_camera(&mut camera, 0.016);
        }
        assert!(!controls.is_moving());
        assert_eq!(camera.eye, Point3::new(1.8, 0.0, 0.0));
        assert_eq!(camera.target, Point3::new(0.1, 0.0, 0.0));
    }

    #[test]
    fn user_input_cancels_goal() {
        let mut controls = OrbitControls::new(OrbitSettings::globe());
        controls.set_goal(CameraFrame {
            target: Vector3::new(0.0, 0.0, 0.0),
            position: Vector3::new(0.0, 0.0, 2.0),
        });
        controls.process_input(ControlInput::Rotate { dx: 0.01, dy: 0.0 });
        assert_eq!(controls.goal(), None);
    }
}
