//! Collecting unmatched shipments into curatable route candidates

use std::collections::HashSet;

use tracing::warn;

use crate::model::{MergedShipment, RouteCandidate};
use crate::service::merge::{extract_destination, extract_source};

/// Deduplicate route-less shipments and reshape them into candidate
/// reference routes for later curation.
///
/// Dedup key is `match_key|consigner|consignee`; the first occurrence
/// wins and output follows input order. Pairs whose endpoints cannot be
/// recovered from any field are dropped, with a warning.
pub fn collect_unmatched(shipments: &[MergedShipment]) -> Vec<RouteCandidate> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut candidates = Vec::new();

    for shipment in shipments.iter().filter(|s| !s.has_route()) {
        let record = &shipment.record;
        let dedup_key = format!(
            "{}|{}|{}",
            shipment.match_key, record.consigner_name, record.consignee_name
        );
        if !seen.insert(dedup_key) {
            continue;
        }

        let source = first_non_empty(&[
            &shipment.source_extracted,
            &extract_source(&record.consigner_name),
            record.consigner_name.trim(),
        ]);
        let destination = first_non_empty(&[
            &shipment.destination_extracted,
            &extract_destination(&record.consignee_name),
            record.consignee_name.trim(),
        ]);

        if source.is_empty() || destination.is_empty() {
            warn!(
                vehicle = %record.vehicle_number,
                "unmatched pair has no usable endpoints, dropped"
            );
            continue;
        }

        let middle_stops = middle_stops_of(&record.consignee_name);
        let route_name = if middle_stops.is_empty() {
            format!("{}/{}", source, destination)
        } else {
            format!("{}/{}/{}", source, middle_stops.join("/"), destination)
        };

        candidates.push(RouteCandidate {
            route_name,
            source,
            destination,
            middle_stops,
        });
    }

    candidates
}

fn first_non_empty(values: &[&str]) -> String {
    values
        .iter()
        .map(|v| v.trim())
        .find(|v| !v.is_empty())
        .unwrap_or("")
        .to_string()
}

/// All `;`-delimited consignee segments except the last, only when the
/// field has more than one segment.
fn middle_stops_of(consignee: &str) -> Vec<String> {
    let segments: Vec<&str> = consignee.split(';').map(str::trim).collect();
    if segments.len() <= 1 {
        return Vec::new();
    }
    segments[..segments.len() - 1]
        .iter()
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}
