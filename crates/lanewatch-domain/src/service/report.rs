//! Plain-text lane status report

use crate::model::{RouteAggregate, RouteCandidate};

/// Render a human-readable summary of a reconciliation run.
pub fn generate_lane_report(
    aggregates: &[RouteAggregate],
    candidates: &[RouteCandidate],
) -> String {
    let total_vehicles: u32 = aggregates.iter().map(|a| a.total_vehicles()).sum();
    let total_late: u32 = aggregates
        .iter()
        .map(|a| a.up.late_vehicles + a.down.late_vehicles)
        .sum();
    let unresolved = aggregates
        .iter()
        .filter(|a| a.source_point.is_none() || a.destination_point.is_none())
        .count();

    let mut report = String::new();
    report.push_str("==================================================\n");
    report.push_str("              Lane Status Report                  \n");
    report.push_str("==================================================\n\n");
    report.push_str("Summary\n");
    report.push_str(&format!("  Routes:                 {}\n", aggregates.len()));
    report.push_str(&format!("  Vehicles bucketed:      {}\n", total_vehicles));
    report.push_str(&format!("  Late vehicles:          {}\n", total_late));
    report.push_str(&format!("  Unresolved endpoints:   {}\n", unresolved));
    report.push_str(&format!("  Unmatched candidates:   {}\n", candidates.len()));
    report.push('\n');

    if !aggregates.is_empty() {
        report.push_str("Routes\n");
        report.push_str("-".repeat(70).as_str());
        report.push('\n');
        report.push_str(&format!(
            "{:<10} {:<28} {:>7} {:>7} {:>7} {:>7}\n",
            "Route", "Lane", "Up", "UpLate", "Down", "DnLate"
        ));
        report.push_str("-".repeat(70).as_str());
        report.push('\n');
        for aggregate in aggregates {
            let lane = format!("{} -> {}", aggregate.source, aggregate.destination);
            report.push_str(&format!(
                "{:<10} {:<28} {:>7} {:>7} {:>7} {:>7}\n",
                truncate_str(&aggregate.route_id, 9),
                truncate_str(&lane, 27),
                aggregate.up.total_vehicles,
                aggregate.up.late_vehicles,
                aggregate.down.total_vehicles,
                aggregate.down.late_vehicles
            ));
        }
        report.push('\n');
    }

    if !candidates.is_empty() {
        report.push_str("Unmatched route candidates\n");
        report.push_str("-".repeat(50).as_str());
        report.push('\n');
        for candidate in candidates {
            report.push_str(&format!("  {}\n", candidate.route_name));
        }
        report.push('\n');
    }

    report.push_str("==================================================\n");
    report
}

fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() > max_len {
        let truncated: String = s.chars().take(max_len.saturating_sub(2)).collect();
        format!("{}..", truncated)
    } else {
        s.to_string()
    }
}
