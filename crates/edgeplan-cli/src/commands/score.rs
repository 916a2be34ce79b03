use std::fs;

use edgeplan_core::{parse_assignment, parse_catalogue, score_assignment};

pub fn run(input: &str, assignment_path: &str, format: &str) -> anyhow::Result<()> {
    let catalogue = parse_catalogue(&fs::read_to_string(input)?)?;
    let assignment = parse_assignment(&fs::read_to_string(assignment_path)?, &catalogue)?;
    let report = score_assignment(&catalogue, &assignment)?;

    match format {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        _ => {
            println!("✓ Valid assignment ({} placements)", assignment.placements());
            println!("Score: {}", report.score);
            println!("Latency saved: {}", report.total_latency_saved);
            println!(
                "Request weight served from cache: {}/{}",
                report.cached_request_weight, report.total_request_weight
            );
            for utilization in &report.utilization {
                println!(
                    "  cache {}: {}/{} used",
                    utilization.cache, utilization.used, utilization.capacity
                );
            }
        }
    }

    Ok(())
}
