//! The reconciliation pipeline
//!
//! One run takes a parsed shipment export plus the reference
//! collections and produces the aggregate snapshot and the unmatched
//! route candidates. Every stage is synchronous and tolerant of dirty
//! rows; once the inputs are loaded the run cannot fail.

use serde::Serialize;
use tracing::info;

use lanewatch_domain::model::{
    LocationRef, RawShipmentRecord, ReferenceRoute, RouteAggregate, RouteCandidate,
};
use lanewatch_domain::service::{
    build_aggregates, collect_unmatched, merge_records, resolve_aggregate_coordinates,
    resolve_shipment_coordinates, PlaceIndex, RouteKeyIndex, VehiclePositions,
    DEFAULT_MATCH_THRESHOLD,
};

/// Everything a pipeline run consumes, already loaded and parsed
#[derive(Debug, Default)]
pub struct PipelineInputs {
    pub records: Vec<RawShipmentRecord>,
    pub routes: Vec<ReferenceRoute>,
    /// Curated location reference list, used by stage-2 resolution
    pub locations: Vec<LocationRef>,
    /// Telemetry dropdown city list
    pub cities: Vec<LocationRef>,
    /// Telemetry dropdown landmark list
    pub landmarks: Vec<LocationRef>,
    pub positions: VehiclePositions,
}

/// Tuning knobs for a pipeline run
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    pub match_threshold: f64,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            match_threshold: DEFAULT_MATCH_THRESHOLD,
        }
    }
}

impl PipelineOptions {
    pub fn with_match_threshold(mut self, threshold: f64) -> Self {
        self.match_threshold = threshold;
        self
    }
}

/// Counters describing what a run did
#[derive(Debug, Clone, Default, Serialize)]
pub struct PipelineSummary {
    pub total_records: usize,
    pub matched_records: usize,
    pub unmatched_records: usize,
    /// Matched records excluded from aggregation for lacking a side
    pub skipped_no_side: usize,
    pub aggregate_count: usize,
    pub candidate_count: usize,
}

#[derive(Debug)]
pub struct PipelineOutput {
    pub aggregates: Vec<RouteAggregate>,
    pub candidates: Vec<RouteCandidate>,
    pub summary: PipelineSummary,
}

/// Run the full reconciliation: merge, candidate collection, stage-1
/// coordinate resolution, aggregation, stage-2 backfill.
pub fn run_pipeline(inputs: &PipelineInputs, options: &PipelineOptions) -> PipelineOutput {
    let index = RouteKeyIndex::build(&inputs.routes);
    let places = PlaceIndex::build(&inputs.cities, &inputs.landmarks);

    let mut shipments = merge_records(&inputs.records, &index);
    let candidates = collect_unmatched(&shipments);

    for shipment in &mut shipments {
        resolve_shipment_coordinates(shipment, &index, &places);
    }

    let mut aggregates = build_aggregates(&shipments, &inputs.positions);
    resolve_aggregate_coordinates(&mut aggregates, &inputs.locations, options.match_threshold);

    let matched_records = shipments.iter().filter(|s| s.has_route()).count();
    let skipped_no_side = shipments
        .iter()
        .filter(|s| s.has_route() && s.route_side.is_none())
        .count();

    let summary = PipelineSummary {
        total_records: shipments.len(),
        matched_records,
        unmatched_records: shipments.len() - matched_records,
        skipped_no_side,
        aggregate_count: aggregates.len(),
        candidate_count: candidates.len(),
    };

    info!(
        total = summary.total_records,
        matched = summary.matched_records,
        unmatched = summary.unmatched_records,
        aggregates = summary.aggregate_count,
        candidates = summary.candidate_count,
        "reconciliation run complete"
    );

    PipelineOutput {
        aggregates,
        candidates,
        summary,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lanewatch_types::{GeoPoint, RouteSide};

    fn reference_route() -> ReferenceRoute {
        ReferenceRoute {
            id: "R1".to_string(),
            name: "LUCKNOW/AMBALA".to_string(),
            side: Some(RouteSide::Up),
            source: "LUCKNOW".to_string(),
            destination: "AMBALA(AML11)".to_string(),
            middle_stops: vec!["KANPUR".to_string()],
            source_point: None,
            destination_point: None,
        }
    }

    fn matched_record() -> RawShipmentRecord {
        RawShipmentRecord {
            vehicle_number: "KA01AB1234".to_string(),
            consigner_name: "LUCKNOW;DEPOT".to_string(),
            consignee_name: "X; AMBALA(AML11)".to_string(),
            dispatch_date: "15/06/2024 08:00:00".to_string(),
            eta: "NA;15/06/2024 09:00:00".to_string(),
            delay_time: "01:15:00".to_string(),
            rps_number: "RPS-1".to_string(),
            ..Default::default()
        }
    }

    fn unmatched_record() -> RawShipmentRecord {
        RawShipmentRecord {
            vehicle_number: "MH12CD5678".to_string(),
            consigner_name: "NAGPUR".to_string(),
            consignee_name: "PUNE".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_run_produces_aggregates_and_candidates() {
        let inputs = PipelineInputs {
            records: vec![matched_record(), unmatched_record()],
            routes: vec![reference_route()],
            locations: vec![
                LocationRef::new("LUCKNOW", 26.85, 80.95),
                LocationRef::new("AMBALA (AML-11)", 30.38, 76.78),
            ],
            ..Default::default()
        };
        let output = run_pipeline(&inputs, &PipelineOptions::default());

        assert_eq!(output.summary.total_records, 2);
        assert_eq!(output.summary.matched_records, 1);
        assert_eq!(output.summary.unmatched_records, 1);
        assert_eq!(output.summary.skipped_no_side, 0);

        assert_eq!(output.aggregates.len(), 1);
        let aggregate = &output.aggregates[0];
        assert_eq!(aggregate.route_id, "R1");
        assert_eq!(aggregate.up.total_vehicles, 1);
        assert_eq!(aggregate.up.late_vehicles, 1);
        assert!((aggregate.up.vehicles[0].late_hours - 1.25).abs() < 1e-9);
        assert_eq!(
            aggregate.up.vehicles[0].expected_arrival,
            "15/06/2024 09:00:00"
        );
        // Stage 2 resolved both endpoints from the curated list
        assert_eq!(aggregate.source_point, Some(GeoPoint::new(26.85, 80.95)));
        assert_eq!(
            aggregate.destination_point,
            Some(GeoPoint::new(30.38, 76.78))
        );

        assert_eq!(output.candidates.len(), 1);
        assert_eq!(output.candidates[0].route_name, "NAGPUR/PUNE");
    }

    #[test]
    fn test_side_less_match_is_counted_but_not_aggregated() {
        let mut route = reference_route();
        route.side = None;
        let inputs = PipelineInputs {
            records: vec![matched_record()],
            routes: vec![route],
            ..Default::default()
        };
        let output = run_pipeline(&inputs, &PipelineOptions::default());
        assert_eq!(output.summary.matched_records, 1);
        assert_eq!(output.summary.skipped_no_side, 1);
        assert!(output.aggregates.is_empty());
        assert!(output.candidates.is_empty());
    }

    #[test]
    fn test_empty_inputs_run_cleanly() {
        let output = run_pipeline(&PipelineInputs::default(), &PipelineOptions::default());
        assert_eq!(output.summary.total_records, 0);
        assert!(output.aggregates.is_empty());
        assert!(output.candidates.is_empty());
    }
}
