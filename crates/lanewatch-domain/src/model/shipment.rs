//! Shipment record types

use serde::{Deserialize, Serialize};

use lanewatch_types::{GeoPoint, RouteSide};

/// One row of the fleet-tracking export, already column-mapped.
///
/// Missing export columns arrive as empty strings, never as an error.
/// Immutable once parsed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawShipmentRecord {
    pub vehicle_number: String,
    /// Sender free-text field, often semicolon-delimited waypoints
    pub consigner_name: String,
    /// Receiver free-text field, often semicolon-delimited waypoints
    pub consignee_name: String,
    pub dispatch_date: String,
    /// Semicolon-delimited per-waypoint ETA tokens, "NA" for unknown legs
    pub eta: String,
    /// Accumulated delay as "HH:MM:SS"
    pub delay_time: String,
    pub last_location: String,
    pub last_location_date: String,
    /// External trip-reference identifier from the source system
    pub rps_number: String,
}

/// A raw record with its matched reference route (if any) attached.
///
/// Built once per input record. After construction only the endpoint
/// coordinate slots are overwritten, by the coordinate resolver.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MergedShipment {
    pub record: RawShipmentRecord,
    /// Text before the first `;` of the consigner field, trimmed
    pub source_extracted: String,
    /// Text after the last `;` of the consignee field, trimmed
    pub destination_extracted: String,
    /// Normalized (source, destination) lookup key
    pub match_key: String,
    pub route_id: Option<String>,
    pub route_name: Option<String>,
    pub route_side: Option<RouteSide>,
    pub route_source: Option<String>,
    pub route_destination: Option<String>,
    pub middle_stops: Vec<String>,
    /// Resolved source coordinate; lat/lng always set or cleared together
    pub source_point: Option<GeoPoint>,
    /// Resolved destination coordinate
    pub destination_point: Option<GeoPoint>,
}

impl MergedShipment {
    pub fn has_route(&self) -> bool {
        self.route_id.is_some()
    }
}

/// Candidate reference-route shape derived from unmatched shipments,
/// handed to the upsert repository for later curation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteCandidate {
    /// `/`-joined path: `source/middle1/.../destination`. Uniqueness is
    /// enforced by the repository on this field.
    pub route_name: String,
    pub source: String,
    pub destination: String,
    pub middle_stops: Vec<String>,
}
