//! Live-telemetry snapshot loader
//!
//! The snapshot is a JSON object mapping vehicle number to a position
//! or null for vehicles the tracker has lost.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use lanewatch_domain::service::VehiclePositions;
use lanewatch_types::{Error, GeoPoint, Result};

/// Load a telemetry snapshot from a JSON file
pub fn load_vehicle_positions(path: &Path) -> Result<VehiclePositions> {
    let content = fs::read_to_string(path)
        .map_err(|e| Error::Telemetry(format!("Failed to read snapshot: {}", e)))?;
    parse_vehicle_positions(&content)
}

/// Parse a telemetry snapshot from JSON text
pub fn parse_vehicle_positions(content: &str) -> Result<VehiclePositions> {
    let raw: HashMap<String, Option<GeoPoint>> = serde_json::from_str(content)
        .map_err(|e| Error::Telemetry(format!("Failed to parse snapshot JSON: {}", e)))?;
    Ok(VehiclePositions::build(raw))
}
