//! End-to-end reconciliation test over real files

use std::fs;

use lanewatch_app::{run_pipeline, PipelineInputs, PipelineOptions};
use lanewatch_domain::repository::{AggregateSnapshotRepository, RouteCandidateRepository};
use lanewatch_infra::persistence::{FileAggregateSnapshotRepository, FileRouteCandidateRepository};
use lanewatch_infra::place_csv::load_place_refs;
use lanewatch_infra::route_master_loader::load_routes_from_file;
use lanewatch_infra::shipment_csv::load_shipment_records;
use lanewatch_infra::telemetry_snapshot::load_vehicle_positions;
use lanewatch_types::{GeoPoint, RouteSide};

const EXPORT_CSV: &str = "\
Vehicle Number,Consigner Name,Consignee Name,Dispatch Date,ETA,Delay Time,Last Location,Last Location Date,RPS Number
KA01AB1234,LUCKNOW;DEPOT,X; AMBALA(AML11),15/06/2024 08:00:00,NA;15/06/2024 09:00:00,01:15:00,KANPUR,15/06/2024 07:00:00,RPS-1
MH12CD5678,NAGPUR,AKOLA;PUNE,16/06/2024 10:00:00,NA,00:00:00,NAGPUR,16/06/2024 10:30:00,RPS-2
MH12CD5678,NAGPUR,AKOLA;PUNE,16/06/2024 10:00:00,NA,00:00:00,NAGPUR,16/06/2024 10:30:00,RPS-2
";

const ROUTES_TOML: &str = r#"
[[routes]]
id = "R1"
name = "LUCKNOW/AMBALA"
side = "up"
source = "LUCKNOW"
destination = "AMBALA(AML11)"
middle_stops = ["KANPUR"]
"#;

const LOCATIONS_CSV: &str = "\
name,latitude,longitude
LUCKNOW,26.85,80.95
Safexpress AMBALA (AML-11) Hub,30.38,76.78
";

const TELEMETRY_JSON: &str = r#"{
    "KA01AB1234": {"lat": 27.5, "lng": 79.9},
    "MH12CD5678": null
}"#;

fn load_inputs(dir: &std::path::Path) -> PipelineInputs {
    fs::write(dir.join("export.csv"), EXPORT_CSV).unwrap();
    fs::write(dir.join("routes.toml"), ROUTES_TOML).unwrap();
    fs::write(dir.join("locations.csv"), LOCATIONS_CSV).unwrap();
    fs::write(dir.join("telemetry.json"), TELEMETRY_JSON).unwrap();

    PipelineInputs {
        records: load_shipment_records(dir.join("export.csv")).unwrap(),
        routes: load_routes_from_file(&dir.join("routes.toml")).unwrap(),
        locations: load_place_refs(dir.join("locations.csv")).unwrap(),
        cities: Vec::new(),
        landmarks: Vec::new(),
        positions: load_vehicle_positions(&dir.join("telemetry.json")).unwrap(),
    }
}

#[test]
fn test_reconcile_from_files() {
    let dir = tempfile::tempdir().unwrap();
    let inputs = load_inputs(dir.path());
    let output = run_pipeline(&inputs, &PipelineOptions::default());

    assert_eq!(output.summary.total_records, 3);
    assert_eq!(output.summary.matched_records, 1);
    assert_eq!(output.summary.unmatched_records, 2);

    // One aggregate for the matched lane
    assert_eq!(output.aggregates.len(), 1);
    let aggregate = &output.aggregates[0];
    assert_eq!(aggregate.route_id, "R1");
    assert_eq!(aggregate.up.total_vehicles, 1);
    assert_eq!(aggregate.up.late_vehicles, 1);
    assert_eq!(aggregate.down.total_vehicles, 0);

    let vehicle = &aggregate.up.vehicles[0];
    assert_eq!(vehicle.vehicle_number, "KA01AB1234");
    assert_eq!(vehicle.rps_number, "RPS-1");
    assert!((vehicle.late_hours - 1.25).abs() < 1e-9);
    assert_eq!(vehicle.expected_arrival, "15/06/2024 09:00:00");
    assert_eq!(vehicle.position, Some(GeoPoint::new(27.5, 79.9)));
    assert_eq!(vehicle.middle_stops, vec!["KANPUR"]);

    // Stage-2 backfill resolved both endpoints fuzzily
    assert_eq!(aggregate.source_point, Some(GeoPoint::new(26.85, 80.95)));
    assert_eq!(aggregate.destination_point, Some(GeoPoint::new(30.38, 76.78)));

    // The duplicated unmatched row collapses to one candidate
    assert_eq!(output.candidates.len(), 1);
    let candidate = &output.candidates[0];
    assert_eq!(candidate.route_name, "NAGPUR/AKOLA/PUNE");
    assert_eq!(candidate.source, "NAGPUR");
    assert_eq!(candidate.destination, "PUNE");
    assert_eq!(candidate.middle_stops, vec!["AKOLA"]);

    assert_eq!(inputs.routes[0].side, Some(RouteSide::Up));
}

#[test]
fn test_snapshot_and_candidates_persist_across_runs() {
    let dir = tempfile::tempdir().unwrap();
    let inputs = load_inputs(dir.path());
    let output = run_pipeline(&inputs, &PipelineOptions::default());

    let snapshot_repo = FileAggregateSnapshotRepository::new(dir.path().join("snapshot.json"));
    let candidate_repo = FileRouteCandidateRepository::new(dir.path().join("candidates.json"));

    snapshot_repo.replace_all(&output.aggregates).unwrap();
    let inserted = candidate_repo.upsert_new(&output.candidates).unwrap();
    assert_eq!(inserted, 1);

    // A second identical run replaces the snapshot and inserts nothing new
    let output2 = run_pipeline(&inputs, &PipelineOptions::default());
    snapshot_repo.replace_all(&output2.aggregates).unwrap();
    let inserted2 = candidate_repo.upsert_new(&output2.candidates).unwrap();
    assert_eq!(inserted2, 0);

    let stored = snapshot_repo.find_all().unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].route_id, "R1");
    assert_eq!(stored[0].up.total_vehicles, 1);

    assert_eq!(candidate_repo.find_all().unwrap().len(), 1);
}
