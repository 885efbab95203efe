//! Per-route aggregate types for the lane-status dashboard

use serde::{Deserialize, Serialize};

use lanewatch_types::{GeoPoint, RouteSide};

/// One vehicle grouped into a route bucket
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VehicleEntry {
    pub vehicle_number: String,
    pub rps_number: String,
    pub dispatch_date: String,
    pub last_location_date: String,
    /// Parsed from the "HH:MM:SS" delay field; 0 for unparseable input
    pub late_hours: f64,
    pub middle_stops: Vec<String>,
    /// Last non-"NA" ETA token; empty when every leg is unknown
    pub expected_arrival: String,
    /// Live telemetry position at snapshot time, if the vehicle was seen
    pub position: Option<GeoPoint>,
}

/// Vehicles travelling one direction of a route, in input record order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SideBucket {
    pub total_vehicles: u32,
    /// Entries with strictly positive late_hours
    pub late_vehicles: u32,
    pub vehicles: Vec<VehicleEntry>,
}

/// Per-route grouping of matched shipments into Up/Down buckets.
///
/// Built once per pipeline run; persisted as a full-replacement snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteAggregate {
    pub route_id: String,
    pub source: String,
    pub destination: String,
    pub source_point: Option<GeoPoint>,
    pub destination_point: Option<GeoPoint>,
    pub up: SideBucket,
    pub down: SideBucket,
}

impl RouteAggregate {
    pub fn new(route_id: impl Into<String>, source: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            route_id: route_id.into(),
            source: source.into(),
            destination: destination.into(),
            source_point: None,
            destination_point: None,
            up: SideBucket::default(),
            down: SideBucket::default(),
        }
    }

    pub fn bucket(&self, side: RouteSide) -> &SideBucket {
        match side {
            RouteSide::Up => &self.up,
            RouteSide::Down => &self.down,
        }
    }

    pub fn bucket_mut(&mut self, side: RouteSide) -> &mut SideBucket {
        match side {
            RouteSide::Up => &mut self.up,
            RouteSide::Down => &mut self.down,
        }
    }

    /// Vehicles across both buckets
    pub fn total_vehicles(&self) -> u32 {
        self.up.total_vehicles + self.down.total_vehicles
    }
}
