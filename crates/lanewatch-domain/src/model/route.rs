//! Reference route master type definitions

use serde::{Deserialize, Serialize};

use lanewatch_types::{GeoPoint, RouteSide};

/// One curated route from the reference master. Read-only to the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferenceRoute {
    pub id: String,
    /// Display name, e.g. "LUCKNOW/KANPUR/AMBALA"
    pub name: String,
    /// Up/Down directionality; a route may declare neither
    #[serde(default)]
    pub side: Option<RouteSide>,
    pub source: String,
    pub destination: String,
    /// Ordered intermediate waypoints between source and destination
    #[serde(default)]
    pub middle_stops: Vec<String>,
    #[serde(default)]
    pub source_point: Option<GeoPoint>,
    #[serde(default)]
    pub destination_point: Option<GeoPoint>,
}
