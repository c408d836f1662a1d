use glam::{DVec3, Vec3};
use serde::{Deserialize, Serialize};

/// Heliocentric Cartesian position in catalog units (parsecs for HYG)
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogPosition {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl CatalogPosition {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Distance from the origin (the Sun)
    pub fn magnitude(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Euclidean 3-D distance between two positions
    pub fn distance_to(&self, other: &CatalogPosition) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    /// Divide every component by `factor`
    pub fn scaled_down(&self, factor: f64) -> Self {
        Self {
            x: self.x / factor,
            y: self.y / factor,
            z: self.z / factor,
        }
    }

    pub fn to_dvec3(&self) -> DVec3 {
        DVec3::new(self.x, self.y, self.z)
    }

    /// GPU-friendly single precision copy
    pub fn to_vec3(&self) -> Vec3 {
        self.to_dvec3().as_vec3()
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl From<DVec3> for CatalogPosition {
    fn from(v: DVec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}
