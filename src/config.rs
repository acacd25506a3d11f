use anyhow::{ensure, Result};
use cgmath::Point3;

use crate::components::controls::{OrbitSettings, MIN_POLAR_ANGLE};
use crate::systems::framing::FramingScales;
use crate::systems::geospatial::GeoPoint;

pub const RIO_DE_JANEIRO: GeoPoint = GeoPoint::new(-22.9068, -43.1729);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneKind {
    Globe,
    City,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewConfig {
    pub eye: Point3<f32>,
    pub fovy: f32,
    pub znear: f32,
    pub zfar: f32,
    pub controls: OrbitSettings,
    /// yaw of the scene group, radians per second
    pub spin_speed: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlobeConfig {
    pub view: ViewConfig,
    /// framed as soon as the scene is ready, before anything is selected
    pub initial_focus: Option<GeoPoint>,
    /// planets and comets circling the globe
    pub space_environment: bool,
}

impl Default for GlobeConfig {
    fn default() -> Self {
        Self {
            view: ViewConfig {
                eye: Point3::new(0.0, 0.0, 2.5),
                fovy: 45.0,
                znear: 0.1,
                zfar: 1000.0,
                controls: OrbitSettings::globe(),
                spin_speed: 0.05,
            },
            initial_focus: Some(RIO_DE_JANEIRO),
            space_environment: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CityConfig {
    pub view: ViewConfig,
}

impl Default for CityConfig {
    fn default() -> Self {
        Self {
            view: ViewConfig {
                eye: Point3::new(0.0, 7.0, 7.0),
                fovy: 45.0,
                znear: 0.1,
                zfar: 1000.0,
                controls: OrbitSettings::city(),
                spin_speed: 0.05,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StarFieldConfig {
    pub radius: f32,
    pub depth: f32,
    pub count: usize,
    pub factor: f32,
    pub saturation: f32,
}

impl Default for StarFieldConfig {
    fn default() -> Self {
        Self {
            radius: 100.0,
            depth: 50.0,
            count: 5000,
            factor: 4.0,
            saturation: 0.5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneConfig {
    pub kind: SceneKind,
    pub aspect: f32,
    pub globe: GlobeConfig,
    pub city: CityConfig,
    pub framing: FramingScales,
    pub stars: StarFieldConfig,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self::globe()
    }
}

impl SceneConfig {
    pub fn globe() -> Self {
        Self {
            kind: SceneKind::Globe,
            aspect: 16.0 / 9.0,
            globe: GlobeConfig::default(),
            city: CityConfig::default(),
            framing: FramingScales::default(),
            stars: StarFieldConfig::default(),
        }
    }

    pub fn city() -> Self {
        Self {
            kind: SceneKind::City,
            ..Self::globe()
        }
    }

    pub fn view(&self) -> &ViewConfig {
        match self.kind {
            SceneKind::Globe => &self.globe.view,
            SceneKind::City => &self.city.view,
        }
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(self.aspect > 0.0, "aspect ratio must be positive, got {}", self.aspect);
        for (name, view) in [("globe", &self.globe.view), ("city", &self.city.view)] {
            let controls = &view.controls;
            ensure!(
                view.znear > 0.0 && view.zfar > view.znear,
                "{name} view: invalid clip range {}..{}",
                view.znear,
                view.zfar
            );
            ensure!(
                view.fovy > 0.0 && view.fovy < 180.0,
                "{name} view: field of view {} out of range",
                view.fovy
            );
            ensure!(
                controls.min_distance > 0.0 && controls.min_distance <= controls.max_distance,
                "{name} controls: invalid distance range {}..{}",
                controls.min_distance,
                controls.max_distance
            );
            ensure!(
                controls.damping > 0.0 && controls.damping <= 1.0,
                "{name} controls: damping {} must be in (0, 1]",
                controls.damping
            );
            ensure!(
                controls.max_polar_angle >= MIN_POLAR_ANGLE,
                "{name} controls: max polar angle {} below {MIN_POLAR_ANGLE}",
                controls.max_polar_angle
            );
        }
        ensure!(
            self.framing.target_scale > 0.0 && self.framing.camera_scale > 0.0,
            "framing scales must be positive, got {:?}",
            self.framing
        );
        ensure!(
            self.stars.radius > 0.0 && self.stars.depth > 0.0,
            "star field radius and depth must be positive"
        );
        Ok(())
    }
}
