//! Plan command implementation
//!
//! Shows the requests process would send. Only the initial query is issued.

use std::path::Path;

use colored::Colorize;
use ctsync_core::{PlannedChange, ReconcilePlan, SweepDecision};

use super::build_reconciler;
use crate::cli::{ClientArgs, FilterArgs};
use crate::error::Result;

/// Run the plan command
pub async fn run_plan(
    config_path: &Path,
    client: &ClientArgs,
    filter: &FilterArgs,
    json: bool,
) -> Result<i32> {
    let reconciler = build_reconciler(config_path, client, filter)?;
    let plan = reconciler.plan().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
    } else {
        print!("{}", render_plan(&plan));
    }

    Ok(0)
}

/// Render the plan in diff style
pub fn render_plan(plan: &ReconcilePlan) -> String {
    if plan.is_noop() {
        return format!(
            "{} No changes needed. Project matches the config.\n",
            "OK".green().bold()
        );
    }

    let mut out = String::new();

    for decision in &plan.sweep {
        match decision {
            SweepDecision::Delete { key, version } => {
                out.push_str(&format!("{} {} (version {})\n", "-".red(), key.red(), version));
            }
            SweepDecision::Untouched { key } => {
                out.push_str(&format!("{} {} (outside whitelist)\n", "=".dimmed(), key.dimmed()));
            }
        }
    }

    for change in &plan.changes {
        match change {
            PlannedChange::Create { draft } => {
                out.push_str(&format!(
                    "{} {} ({} fields)\n",
                    "+".green(),
                    draft.key.green(),
                    draft.field_definitions.len()
                ));
            }
            PlannedChange::Update { key, actions, .. } if actions.is_empty() => {
                out.push_str(&format!("  {} (unchanged)\n", key));
            }
            PlannedChange::Update {
                key,
                version,
                actions,
            } => {
                out.push_str(&format!("{} {} (version {})\n", "~".yellow(), key.yellow(), version));
                for action in actions {
                    out.push_str(&format!("    {}\n", action));
                }
            }
        }
    }

    let deletes = plan.deletions().count();
    let writes = plan.changes.iter().filter(|c| !c.is_noop()).count();
    out.push('\n');
    out.push_str(&format!(
        "{} {} to delete, {} to create or update\n",
        "Plan".blue().bold(),
        deletes,
        writes
    ));
    out
}
