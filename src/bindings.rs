use js_sys::Float32Array;
use wasm_bindgen::prelude::*;

use crate::systems::framing::frame_camera as frame;
use crate::systems::geospatial::{project as project_point, GeoPoint};

#[wasm_bindgen(start)]
pub fn start() {
    crate::init_logging();
}

/// `[x, y, z]` of the point on a sphere of `radius`.
#[wasm_bindgen]
pub fn project(latitude: f32, longitude: f32, radius: f32) -> Float32Array {
    let v = project_point(latitude, longitude, radius);
    Float32Array::from(&[v.x, v.y, v.z][..])
}

/// `[target.x, target.y, target.z, position.x, position.y, position.z]`.
#[wasm_bindgen(js_name = frameCamera)]
pub fn frame_camera(
    latitude: f32,
    longitude: f32,
    target_scale: f32,
    camera_scale: f32,
) -> Float32Array {
    let f = frame(GeoPoint::new(latitude, longitude), target_scale, camera_scale);
    Float32Array::from(
        &[
            f.target.x,
            f.target.y,
            f.target.z,
            f.position.x,
            f.position.y,
            f.position.z,
        ][..],
    )
}
