//! Attaching reference routes to raw shipment records

use tracing::warn;

use crate::model::{MergedShipment, RawShipmentRecord};
use crate::service::route_index::{make_route_key, RouteKeyIndex};

/// Text before the first `;` of the consigner field (whole string when
/// there is none), trimmed.
pub fn extract_source(consigner: &str) -> String {
    consigner.split(';').next().unwrap_or("").trim().to_string()
}

/// Text after the last `;` of the consignee field (whole string when
/// there is none), trimmed.
pub fn extract_destination(consignee: &str) -> String {
    consignee.rsplit(';').next().unwrap_or("").trim().to_string()
}

/// Attach a reference route (or none) to each raw record.
///
/// A failed lookup is logged and the record continues through the
/// pipeline route-less; it is never a fatal error. Output preserves
/// input order.
pub fn merge_records(records: &[RawShipmentRecord], index: &RouteKeyIndex) -> Vec<MergedShipment> {
    records
        .iter()
        .map(|record| merge_one(record, index))
        .collect()
}

fn merge_one(record: &RawShipmentRecord, index: &RouteKeyIndex) -> MergedShipment {
    let source_extracted = extract_source(&record.consigner_name);
    let destination_extracted = extract_destination(&record.consignee_name);
    let match_key = make_route_key(&source_extracted, &destination_extracted);

    let mut merged = MergedShipment {
        record: record.clone(),
        source_extracted,
        destination_extracted,
        match_key,
        route_id: None,
        route_name: None,
        route_side: None,
        route_source: None,
        route_destination: None,
        middle_stops: Vec::new(),
        source_point: None,
        destination_point: None,
    };

    match index.lookup(&merged.match_key) {
        Some(route) => {
            merged.route_id = Some(route.id.clone());
            merged.route_name = Some(route.name.clone());
            merged.route_side = route.side;
            merged.route_source = Some(route.source.clone());
            merged.route_destination = Some(route.destination.clone());
            merged.middle_stops = route.middle_stops.clone();
        }
        None => {
            warn!(
                vehicle = %record.vehicle_number,
                key = %merged.match_key,
                "no reference route for shipment"
            );
        }
    }

    merged
}
