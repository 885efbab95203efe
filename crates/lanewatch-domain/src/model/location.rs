//! Location reference type definitions

use serde::{Deserialize, Serialize};

use lanewatch_types::GeoPoint;

/// One entry of a flat location reference list (curated locations,
/// telemetry dropdown cities, or telemetry dropdown landmarks).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationRef {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl LocationRef {
    pub fn new(name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            name: name.into(),
            latitude,
            longitude,
        }
    }

    pub fn point(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }
}
