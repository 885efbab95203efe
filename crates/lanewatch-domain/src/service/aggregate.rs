//! Grouping merged shipments into per-route Up/Down buckets

use std::collections::HashMap;

use chrono::NaiveDateTime;
use tracing::{debug, warn};

use crate::model::{MergedShipment, RouteAggregate, VehicleEntry};
use crate::service::coords::VehiclePositions;

/// Parse an "HH:MM:SS" delay string as fractional hours.
///
/// Missing fields default to 0; an empty, malformed, or non-numeric
/// string yields 0, never an error.
pub fn parse_delay_to_hours(delay: &str) -> f64 {
    let delay = delay.trim();
    if delay.is_empty() {
        return 0.0;
    }
    let mut fields = [0.0f64; 3];
    for (i, part) in delay.split(':').enumerate() {
        if i >= fields.len() {
            break;
        }
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        match part.parse::<f64>() {
            Ok(value) => fields[i] = value,
            Err(_) => {
                debug!(delay, "unparseable delay string, treated as zero");
                return 0.0;
            }
        }
    }
    fields[0] + fields[1] / 60.0 + fields[2] / 3600.0
}

/// Pick the destination-leg ETA: among `;`-delimited tokens (trimmed),
/// drop empty and "NA" tokens, take the last remaining one.
pub fn pick_eta_for_destination(eta: &str) -> String {
    eta.split(';')
        .map(str::trim)
        .filter(|t| !t.is_empty() && !t.eq_ignore_ascii_case("NA"))
        .last()
        .map(str::to_string)
        .unwrap_or_default()
}

/// Export date-time formats seen in the wild
const EXPORT_DATE_FORMATS: &[&str] = &[
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
    "%d-%m-%Y %H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
];

/// Best-effort parse of an export date-time string; used only to flag
/// suspicious dispatch dates, never to reject a record.
pub fn parse_export_datetime(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    EXPORT_DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
}

/// Group matched shipments into per-route aggregates, in first-encounter
/// route order; vehicle order inside a bucket equals input record order.
///
/// Shipments without a matched route are skipped here (the unmatched
/// collector owns them). A matched route that declares no side is logged
/// and contributes nothing, not even coordinate backfill.
pub fn build_aggregates(
    shipments: &[MergedShipment],
    positions: &VehiclePositions,
) -> Vec<RouteAggregate> {
    let mut aggregates: Vec<RouteAggregate> = Vec::new();
    let mut index_by_route: HashMap<String, usize> = HashMap::new();

    for shipment in shipments {
        let Some(route_id) = shipment.route_id.as_deref() else {
            continue;
        };
        let Some(side) = shipment.route_side else {
            warn!(
                vehicle = %shipment.record.vehicle_number,
                route = %route_id,
                "matched route declares neither side, excluded from both buckets"
            );
            continue;
        };

        let slot = *index_by_route
            .entry(route_id.to_string())
            .or_insert_with(|| {
                aggregates.push(RouteAggregate::new(
                    route_id,
                    shipment.route_source.clone().unwrap_or_default(),
                    shipment.route_destination.clone().unwrap_or_default(),
                ));
                aggregates.len() - 1
            });
        let aggregate = &mut aggregates[slot];

        // Endpoints backfilled from the first row carrying coordinates
        if aggregate.source_point.is_none() {
            aggregate.source_point = shipment.source_point;
        }
        if aggregate.destination_point.is_none() {
            aggregate.destination_point = shipment.destination_point;
        }

        let record = &shipment.record;
        if !record.dispatch_date.is_empty() && parse_export_datetime(&record.dispatch_date).is_none()
        {
            debug!(
                vehicle = %record.vehicle_number,
                dispatch_date = %record.dispatch_date,
                "unparseable dispatch date on record"
            );
        }

        let late_hours = parse_delay_to_hours(&record.delay_time);
        let bucket = aggregate.bucket_mut(side);
        bucket.total_vehicles += 1;
        if late_hours > 0.0 {
            bucket.late_vehicles += 1;
        }
        bucket.vehicles.push(VehicleEntry {
            vehicle_number: record.vehicle_number.clone(),
            rps_number: record.rps_number.clone(),
            dispatch_date: record.dispatch_date.clone(),
            last_location_date: record.last_location_date.clone(),
            late_hours,
            middle_stops: shipment.middle_stops.clone(),
            expected_arrival: pick_eta_for_destination(&record.eta),
            position: positions.lookup(&record.vehicle_number),
        });
    }

    aggregates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{RawShipmentRecord, ReferenceRoute};
    use crate::service::merge::merge_records;
    use crate::service::route_index::RouteKeyIndex;
    use lanewatch_types::{GeoPoint, RouteSide};

    fn route(id: &str, source: &str, destination: &str, side: Option<RouteSide>) -> ReferenceRoute {
        ReferenceRoute {
            id: id.to_string(),
            name: format!("{}/{}", source, destination),
            side,
            source: source.to_string(),
            destination: destination.to_string(),
            middle_stops: Vec::new(),
            source_point: None,
            destination_point: None,
        }
    }

    fn record(vehicle: &str, consigner: &str, consignee: &str, delay: &str, eta: &str) -> RawShipmentRecord {
        RawShipmentRecord {
            vehicle_number: vehicle.to_string(),
            consigner_name: consigner.to_string(),
            consignee_name: consignee.to_string(),
            delay_time: delay.to_string(),
            eta: eta.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_parse_delay_to_hours() {
        assert!((parse_delay_to_hours("02:30:00") - 2.5).abs() < 1e-9);
        assert!((parse_delay_to_hours("01:15:00") - 1.25).abs() < 1e-9);
        assert!((parse_delay_to_hours("00:00:36") - 0.01).abs() < 1e-9);
        assert_eq!(parse_delay_to_hours(""), 0.0);
        assert_eq!(parse_delay_to_hours("garbage"), 0.0);
        assert_eq!(parse_delay_to_hours("1:xx:00"), 0.0);
        // Missing fields default to zero
        assert!((parse_delay_to_hours("2") - 2.0).abs() < 1e-9);
        assert!((parse_delay_to_hours("0:30") - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_pick_eta_for_destination() {
        assert_eq!(
            pick_eta_for_destination("10/05/2024 10:00:00;NA;12/05/2024 08:00:00"),
            "12/05/2024 08:00:00"
        );
        assert_eq!(pick_eta_for_destination("NA;NA"), "");
        assert_eq!(pick_eta_for_destination(""), "");
        assert_eq!(pick_eta_for_destination(" na ; 11/05/2024 09:30:00 "), "11/05/2024 09:30:00");
    }

    #[test]
    fn test_parse_export_datetime() {
        assert!(parse_export_datetime("15/06/2024 09:00:00").is_some());
        assert!(parse_export_datetime("2024-06-15 09:00:00").is_some());
        assert!(parse_export_datetime("junk").is_none());
    }

    #[test]
    fn test_buckets_and_late_counting() {
        let index = RouteKeyIndex::build(&[
            route("R1", "LUCKNOW", "AMBALA", Some(RouteSide::Up)),
            route("R2", "AMBALA", "LUCKNOW", Some(RouteSide::Down)),
        ]);
        let records = vec![
            record("V1", "LUCKNOW", "AMBALA", "01:15:00", "NA;15/06/2024 09:00:00"),
            record("V2", "AMBALA", "LUCKNOW", "00:00:00", "NA"),
            record("V3", "LUCKNOW", "AMBALA", "", ""),
        ];
        let shipments = merge_records(&records, &index);
        let aggregates = build_aggregates(&shipments, &VehiclePositions::default());

        assert_eq!(aggregates.len(), 2);
        let r1 = &aggregates[0];
        assert_eq!(r1.route_id, "R1");
        assert_eq!(r1.up.total_vehicles, 2);
        assert_eq!(r1.up.late_vehicles, 1);
        assert_eq!(r1.down.total_vehicles, 0);
        assert_eq!(r1.up.vehicles[0].vehicle_number, "V1");
        assert!((r1.up.vehicles[0].late_hours - 1.25).abs() < 1e-9);
        assert_eq!(r1.up.vehicles[0].expected_arrival, "15/06/2024 09:00:00");
        assert_eq!(r1.up.vehicles[1].vehicle_number, "V3");

        let r2 = &aggregates[1];
        // Zero delay is not late: strict > 0
        assert_eq!(r2.down.total_vehicles, 1);
        assert_eq!(r2.down.late_vehicles, 0);
    }

    #[test]
    fn test_sideless_route_joins_neither_bucket() {
        let index = RouteKeyIndex::build(&[route("R1", "LUCKNOW", "AMBALA", None)]);
        let shipments = merge_records(
            &[record("V1", "LUCKNOW", "AMBALA", "01:00:00", "")],
            &index,
        );
        let aggregates = build_aggregates(&shipments, &VehiclePositions::default());
        assert!(aggregates.is_empty());
    }

    #[test]
    fn test_late_never_exceeds_total() {
        let index = RouteKeyIndex::build(&[route("R1", "A", "B", Some(RouteSide::Up))]);
        let records: Vec<_> = (0..10)
            .map(|i| {
                let delay = if i % 2 == 0 { "00:30:00" } else { "junk" };
                record(&format!("V{}", i), "A", "B", delay, "")
            })
            .collect();
        let shipments = merge_records(&records, &index);
        let aggregates = build_aggregates(&shipments, &VehiclePositions::default());
        let bucket = &aggregates[0].up;
        assert!(bucket.late_vehicles <= bucket.total_vehicles);
        assert_eq!(bucket.total_vehicles, 10);
        assert_eq!(bucket.late_vehicles, 5);
    }

    #[test]
    fn test_coordinate_backfill_from_first_carrying_row() {
        let index = RouteKeyIndex::build(&[route("R1", "A", "B", Some(RouteSide::Up))]);
        let mut shipments = merge_records(
            &[
                record("V1", "A", "B", "", ""),
                record("V2", "A", "B", "", ""),
            ],
            &index,
        );
        shipments[1].source_point = Some(GeoPoint::new(5.0, 6.0));
        let aggregates = build_aggregates(&shipments, &VehiclePositions::default());
        // First row had nothing; second row backfills
        assert_eq!(aggregates[0].source_point, Some(GeoPoint::new(5.0, 6.0)));
        assert!(aggregates[0].destination_point.is_none());
    }

    #[test]
    fn test_vehicle_position_attached_from_telemetry() {
        let index = RouteKeyIndex::build(&[route("R1", "A", "B", Some(RouteSide::Up))]);
        let shipments = merge_records(&[record("V1", "A", "B", "", "")], &index);
        let positions =
            VehiclePositions::build(vec![("V1".to_string(), Some(GeoPoint::new(1.0, 2.0)))]);
        let aggregates = build_aggregates(&shipments, &positions);
        assert_eq!(
            aggregates[0].up.vehicles[0].position,
            Some(GeoPoint::new(1.0, 2.0))
        );
    }
}
