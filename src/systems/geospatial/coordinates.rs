use cgmath::Vector3;

// shell radii for the globe's visual layers
pub const SURFACE_RADIUS: f32 = 1.0;
pub const CLOUD_RADIUS: f32 = 1.01;
pub const MARKER_RADIUS: f32 = 1.02;
pub const AURORA_RADIUS: f32 = 1.03;

/// A location on the reference sphere, in degrees.
///
/// Values are never range-checked. Out of range latitudes and longitudes
/// wrap through the trigonometry and NaN propagates, which keeps poles and
/// the antimeridian rendering exactly the way the call sites expect.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub latitude: f32,
    pub longitude: f32,
}

impl GeoPoint {
    pub const fn new(latitude: f32, longitude: f32) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    pub fn to_vector(self, radius: f32) -> Vector3<f32> {
        project(self.latitude, self.longitude, radius)
    }
}

/// A point on the city model's base plane. These are already in scene
/// units, so no projection is involved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelPoint {
    pub x: f32,
    pub z: f32,
}

impl ModelPoint {
    pub const fn new(x: f32, z: f32) -> Self {
        Self { x, z }
    }

    pub fn to_vector(self, height: f32) -> Vector3<f32> {
        Vector3::new(self.x, height, self.z)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScenePoint {
    Geo(GeoPoint),
    Model(ModelPoint),
}

impl ScenePoint {
    /// `level` is the shell radius for geographic points and the height
    /// above the base plane for model points.
    pub fn to_vector(self, level: f32) -> Vector3<f32> {
        match self {
            ScenePoint::Geo(point) => point.to_vector(level),
            ScenePoint::Model(point) => point.to_vector(level),
        }
    }

    pub fn as_geo(&self) -> Option<GeoPoint> {
        match self {
            ScenePoint::Geo(point) => Some(*point),
            ScenePoint::Model(_) => None,
        }
    }
}

impl From<GeoPoint> for ScenePoint {
    fn from(point: GeoPoint) -> Self {
        ScenePoint::Geo(point)
    }
}

impl From<ModelPoint> for ScenePoint {
    fn from(point: ModelPoint) -> Self {
        ScenePoint::Model(point)
    }
}

pub struct CoordinatesSystem {}

impl CoordinatesSystem {
    // polar angle from +Y, azimuth offset by 180 degrees. the negated x
    // matches the equirectangular earth texture, don't "fix" it
    pub fn lat_lon_to_cartesian(lat: f32, lon: f32, radius: f32) -> [f32; 3] {
        let phi = (90.0 - lat).to_radians();
        let theta = (lon + 180.0).to_radians();

        let x = -(radius * phi.sin() * theta.cos());
        let z = radius * phi.sin() * theta.sin();
        let y = radius * phi.cos();

        [x, y, z]
    }
}

/// Projects a latitude/longitude pair onto a sphere of `radius`.
pub fn project(latitude: f32, longitude: f32, radius: f32) -> Vector3<f32> {
    CoordinatesSystem::lat_lon_to_cartesian(latitude, longitude, radius).into()
}
