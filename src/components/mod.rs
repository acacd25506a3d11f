pub mod camera;
pub mod controls;
pub mod globe;
pub mod marker;
pub mod orbit;
