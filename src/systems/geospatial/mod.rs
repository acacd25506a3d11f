pub mod coordinates;

pub use coordinates::{project, GeoPoint, ModelPoint, ScenePoint};
