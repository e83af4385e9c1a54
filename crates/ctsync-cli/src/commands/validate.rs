//! Validate command implementation

use std::path::Path;

use colored::Colorize;
use ctsync_meta::{Severity, SyncConfig, ValidationReport};
use serde_json::json;

use crate::error::Result;

/// Run the validate command
///
/// Returns 0 if the config has no errors, 1 otherwise. Warnings do not fail.
pub fn run_validate(config_path: &Path, json: bool) -> Result<i32> {
    let config = SyncConfig::load(config_path)?;
    let report = config.validate();
    let keys: Vec<&str> = config.types.keys().collect();

    if json {
        let output = json!({
            "valid": report.is_valid(),
            "issues": report,
            "types": keys,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print!("{}", render_report(config_path, &report, &keys));
    }

    Ok(if report.is_valid() { 0 } else { 1 })
}

fn render_report(config_path: &Path, report: &ValidationReport, keys: &[&str]) -> String {
    let mut out = String::new();

    for issue in report.issues() {
        let label = match issue.severity {
            Severity::Error => "error".red().bold(),
            Severity::Warning => "warning".yellow().bold(),
        };
        out.push_str(&format!("{}: {}\n", label, issue));
    }

    if report.is_valid() {
        out.push_str(&format!(
            "{} {} defines {} types\n",
            "OK".green().bold(),
            config_path.display(),
            keys.len()
        ));
        for key in keys {
            out.push_str(&format!("  {}\n", key.cyan()));
        }
    } else {
        out.push_str(&format!(
            "{} {} has {} errors\n",
            "INVALID".red().bold(),
            config_path.display(),
            report.errors().count()
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use ctsync_meta::Issue;

    #[test]
    fn test_render_valid_report_lists_types() {
        colored::control::set_override(false);
        let mut report = ValidationReport::default();
        report.push(Issue::warning("types.t.resourceTypeIds", "unknown resource type id `x`"));

        let out = render_report(Path::new("ctsync.yaml"), &report, &["t", "u"]);

        assert!(out.contains("warning: types.t.resourceTypeIds: unknown resource type id `x`"));
        assert!(out.contains("OK ctsync.yaml defines 2 types"));
        assert!(out.contains("  u\n"));
    }

    #[test]
    fn test_render_invalid_report() {
        colored::control::set_override(false);
        let mut report = ValidationReport::default();
        report.push(Issue::error("types", "at least one type is required"));

        let out = render_report(Path::new("ctsync.yaml"), &report, &[]);

        assert!(out.contains("error: types: at least one type is required"));
        assert!(out.contains("INVALID ctsync.yaml has 1 errors"));
    }
}
