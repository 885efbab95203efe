//! Infrastructure layer for lanewatch: file-backed loaders for the
//! shipment export and reference collections, and repository
//! implementations for the dashboard snapshot and route candidates.

pub mod persistence;
pub mod place_csv;
pub mod route_master_loader;
pub mod shipment_csv;
pub mod telemetry_snapshot;
