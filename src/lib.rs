pub mod components;
pub mod config;
pub mod scene;
pub mod systems;

#[cfg(target_arch = "wasm32")]
mod bindings;

pub use components::controls::ControlInput;
pub use config::{SceneConfig, SceneKind};
pub use scene::GlobeScene;
pub use systems::framing::{frame_camera, CameraFrame, FramingScales};
pub use systems::geospatial::{project, GeoPoint, ModelPoint, ScenePoint};
pub use systems::readiness::{frame_when_ready, ReadyListener, ReadySignal, SceneReadiness};

pub fn matrix4_to_array(mat: cgmath::Matrix4<f32>) -> [[f32; 4]; 4] {
    mat.into()
}

static LOGGING: std::sync::Once = std::sync::Once::new();

/// Installs the global tracing subscriber. Safe to call more than once.
pub fn init_logging() {
    LOGGING.call_once(|| {
        cfg_if::cfg_if! {
            if #[cfg(target_arch = "wasm32")] {
                console_error_panic_hook::set_once();
                tracing_wasm::set_as_global_default();
            } else {
                // the host may have installed its own subscriber already
                let _ = tracing_subscriber::fmt::try_init();
            }
        }
    });
}
