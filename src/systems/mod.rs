pub mod camera;
pub mod framing;
pub mod geospatial;
pub mod markers;
pub mod orbit;
pub mod readiness;
pub mod selection;
pub mod stars;
