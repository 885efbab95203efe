//! Matching and aggregation services

pub mod aggregate;
pub mod coords;
pub mod location_match;
pub mod merge;
pub mod normalize;
pub mod report;
pub mod route_index;
pub mod unmatched;

pub use aggregate::{build_aggregates, parse_delay_to_hours, pick_eta_for_destination};
pub use coords::{resolve_aggregate_coordinates, resolve_shipment_coordinates, PlaceIndex, VehiclePositions};
pub use location_match::find_best_location_match;
pub use merge::merge_records;
pub use normalize::{extract_parenthetical_code, normalize_header, normalize_location_key, normalize_simple};
pub use report::generate_lane_report;
pub use route_index::{make_route_key, RouteKeyIndex};
pub use unmatched::collect_unmatched;

/// Default acceptance threshold for the fuzzy location matcher
pub const DEFAULT_MATCH_THRESHOLD: f64 = 0.9;
