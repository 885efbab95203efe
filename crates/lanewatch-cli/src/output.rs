//! Output formatting module

use serde::Serialize;

use lanewatch_app::{PipelineOutput, PipelineSummary};
use lanewatch_domain::model::{RouteAggregate, RouteCandidate};
use lanewatch_domain::service::generate_lane_report;
use lanewatch_types::{OutputFormat, Result};

#[derive(Serialize)]
struct ReconcileReport<'a> {
    summary: &'a PipelineSummary,
    new_candidates: usize,
    aggregates: &'a [RouteAggregate],
    candidates: &'a [RouteCandidate],
}

pub fn output_reconcile(
    output_format: OutputFormat,
    output: &PipelineOutput,
    new_candidates: usize,
) -> Result<()> {
    if output_format == OutputFormat::Json {
        let report = ReconcileReport {
            summary: &output.summary,
            new_candidates,
            aggregates: &output.aggregates,
            candidates: &output.candidates,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", generate_lane_report(&output.aggregates, &output.candidates));
        println!(
            "Records: {} total, {} matched, {} unmatched",
            output.summary.total_records,
            output.summary.matched_records,
            output.summary.unmatched_records
        );
        if output.summary.skipped_no_side > 0 {
            println!(
                "Skipped (route without side): {}",
                output.summary.skipped_no_side
            );
        }
        println!("New route candidates stored: {}", new_candidates);
    }

    Ok(())
}

pub fn output_candidates(
    output_format: OutputFormat,
    candidates: &[RouteCandidate],
) -> Result<()> {
    if output_format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(candidates)?);
        return Ok(());
    }

    if candidates.is_empty() {
        println!("No unmatched route candidates stored");
        return Ok(());
    }

    println!("Unmatched route candidates ({})", candidates.len());
    println!("================================");
    for candidate in candidates {
        if candidate.middle_stops.is_empty() {
            println!("  {}", candidate.route_name);
        } else {
            println!(
                "  {} (via {})",
                candidate.route_name,
                candidate.middle_stops.join(", ")
            );
        }
    }

    Ok(())
}
