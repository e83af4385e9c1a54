//! Process command implementation
//!
//! Runs the full reconciliation and prints one status row per type.

use std::path::Path;

use colored::Colorize;
use ctsync_core::{Outcome, ReconcileReport};

use super::build_reconciler;
use crate::cli::{ClientArgs, FilterArgs};
use crate::error::Result;

/// Run the process command
///
/// Returns the exit code: 0 if every type succeeded, 1 otherwise.
pub async fn run_process(
    config_path: &Path,
    client: &ClientArgs,
    filter: &FilterArgs,
    json: bool,
) -> Result<i32> {
    let reconciler = build_reconciler(config_path, client, filter)?;
    let report = reconciler.run().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render_table(&report));
    }

    Ok(report.exit_code())
}

/// Render the `type | status` table
pub fn render_table(report: &ReconcileReport) -> String {
    let width = report
        .iter()
        .map(|(key, _)| key.len())
        .chain(std::iter::once("Type".len()))
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    out.push_str(&format!("{:<width$}  {}\n", "Type".bold(), "Status".bold()));
    out.push_str(&format!("{}  {}\n", "-".repeat(width), "-".repeat(6)));

    for (key, result) in report.iter() {
        let status = match &result.outcome {
            Outcome::Success => "Success".green().to_string(),
            other => other.to_string().red().to_string(),
        };
        out.push_str(&format!("{:<width$}  {}\n", key, status));
    }

    let failed = report.failures().count();
    out.push('\n');
    if failed == 0 {
        out.push_str(&format!("{} {} types processed\n", "OK".green().bold(), report.len()));
    } else {
        out.push_str(&format!(
            "{} {} of {} types failed\n",
            "FAILED".red().bold(),
            failed,
            report.len()
        ));
    }
    out
}
