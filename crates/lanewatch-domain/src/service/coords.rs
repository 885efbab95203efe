//! Two-stage endpoint coordinate resolution
//!
//! Stage 1 runs per shipment against the telemetry dropdown lists and
//! the matched route's stored coordinates. Stage 2 runs per aggregate,
//! after grouping, against the curated location reference list via the
//! fuzzy matcher. Precedence is always first non-null wins, and a
//! lat/lng pair is resolved together or not at all.

use std::collections::HashMap;

use tracing::warn;

use lanewatch_types::GeoPoint;

use crate::model::{LocationRef, MergedShipment, RouteAggregate};
use crate::service::location_match::find_best_location_match;
use crate::service::normalize::{extract_parenthetical_code, normalize_location_key};
use crate::service::route_index::RouteKeyIndex;

/// Immutable lookup over the telemetry dropdown city and landmark
/// lists, built once per pipeline run.
///
/// Names are keyed by `normalize_location_key`; landmarks are
/// additionally keyed by their trailing parenthetical branch code.
#[derive(Debug, Default)]
pub struct PlaceIndex {
    cities_by_key: HashMap<String, GeoPoint>,
    landmarks_by_key: HashMap<String, GeoPoint>,
    landmarks_by_code: HashMap<String, GeoPoint>,
}

impl PlaceIndex {
    pub fn build(cities: &[LocationRef], landmarks: &[LocationRef]) -> Self {
        let mut index = PlaceIndex::default();
        for city in cities {
            let key = normalize_location_key(&city.name);
            if !key.is_empty() {
                index.cities_by_key.entry(key).or_insert_with(|| city.point());
            }
        }
        for landmark in landmarks {
            let key = normalize_location_key(&landmark.name);
            if !key.is_empty() {
                index
                    .landmarks_by_key
                    .entry(key)
                    .or_insert_with(|| landmark.point());
            }
            let code = extract_parenthetical_code(&landmark.name).to_lowercase();
            if !code.is_empty() {
                index
                    .landmarks_by_code
                    .entry(code)
                    .or_insert_with(|| landmark.point());
            }
        }
        index
    }

    /// City list first, landmark-by-name second
    pub fn by_name(&self, name: &str) -> Option<GeoPoint> {
        let key = normalize_location_key(name);
        if key.is_empty() {
            return None;
        }
        self.cities_by_key
            .get(&key)
            .or_else(|| self.landmarks_by_key.get(&key))
            .copied()
    }

    pub fn landmark_by_code(&self, code: &str) -> Option<GeoPoint> {
        let code = code.trim().to_lowercase();
        if code.is_empty() {
            return None;
        }
        self.landmarks_by_code.get(&code).copied()
    }
}

/// Immutable live-telemetry snapshot keyed by trimmed vehicle number
#[derive(Debug, Default)]
pub struct VehiclePositions {
    positions: HashMap<String, GeoPoint>,
}

impl VehiclePositions {
    /// Build from a nullable-position mapping; vehicles without a fix
    /// are simply absent from the index.
    pub fn build<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (String, Option<GeoPoint>)>,
    {
        let positions = entries
            .into_iter()
            .filter_map(|(vehicle, point)| point.map(|p| (vehicle.trim().to_string(), p)))
            .collect();
        Self { positions }
    }

    /// Exact, trimmed match on vehicle number; no match is no error
    pub fn lookup(&self, vehicle_number: &str) -> Option<GeoPoint> {
        self.positions.get(vehicle_number.trim()).copied()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Stage 1: resolve a shipment's endpoint coordinates.
///
/// Source: dropdown city/landmark by the consigner-derived name, else
/// the matched route's stored source point. Destination: landmark by the
/// consignee branch code, else dropdown by the consignee-derived name,
/// else the route's stored destination point.
pub fn resolve_shipment_coordinates(
    shipment: &mut MergedShipment,
    index: &RouteKeyIndex,
    places: &PlaceIndex,
) {
    let route = index.lookup(&shipment.match_key);
    let route_source = route.and_then(|r| r.source_point);
    let route_destination = route.and_then(|r| r.destination_point);

    shipment.source_point = places
        .by_name(&shipment.source_extracted)
        .or(route_source);

    let branch_code = extract_parenthetical_code(&shipment.destination_extracted);
    shipment.destination_point = places
        .landmark_by_code(&branch_code)
        .or_else(|| places.by_name(&shipment.destination_extracted))
        .or(route_destination);
}

/// Stage 2: backfill aggregate endpoints still unresolved after
/// grouping, via the fuzzy matcher over the curated location list.
/// An endpoint that misses here stays null permanently.
pub fn resolve_aggregate_coordinates(
    aggregates: &mut [RouteAggregate],
    locations: &[LocationRef],
    threshold: f64,
) {
    for aggregate in aggregates {
        if aggregate.source_point.is_none() {
            match find_best_location_match(&aggregate.source, locations, threshold) {
                Some(hit) => aggregate.source_point = Some(hit.point()),
                None => warn!(
                    route = %aggregate.route_id,
                    endpoint = %aggregate.source,
                    "source coordinate unresolved after fuzzy match"
                ),
            }
        }
        if aggregate.destination_point.is_none() {
            match find_best_location_match(&aggregate.destination, locations, threshold) {
                Some(hit) => aggregate.destination_point = Some(hit.point()),
                None => warn!(
                    route = %aggregate.route_id,
                    endpoint = %aggregate.destination,
                    "destination coordinate unresolved after fuzzy match"
                ),
            }
        }
    }
}
