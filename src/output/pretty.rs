//! Human-readable colored text formatter.
//!
//! Produces a terminal-friendly report with ANSI color codes, showing the
//! node inventory, every group's checks with their aggregated states, the
//! nodes a failing check failed on, and a one-line summary.

use crate::report::{State, SummarizedReport};
use colored::Colorize;

/// Formats a [`SummarizedReport`] as human-readable, ANSI-colored text.
///
/// Sections rendered (in order):
/// 1. **Header** — benchmark version and timestamp.
/// 2. **Nodes** — scanned nodes grouped by role.
/// 3. **Results** — per-group checks with aggregated state; failing checks
///    also list the offending nodes and the remediation text.
/// 4. **Summary** — overall status and per-state counts.
pub fn format(report: &SummarizedReport) -> String {
    let mut out = String::new();

    // Header
    let version = if report.version.is_empty() {
        "unknown"
    } else {
        report.version.as_str()
    };
    out.push_str(&format!(
        "\n{}\n",
        format!("  Benchmark Summary: {version}  ")
            .bold()
            .on_blue()
            .white()
    ));
    out.push_str(&format!("  Generated: {}\n\n", report.generated_at));

    // Node inventory
    out.push_str(&format!("{}\n", "Nodes".bold().underline()));
    for (node_type, names) in &report.nodes {
        out.push_str(&format!("  {node_type:<8} {}\n", names.join(", ")));
    }
    out.push('\n');

    // Results tree
    out.push_str(&format!("{}\n", "Results".bold().underline()));
    for group in &report.results {
        out.push_str(&format!(
            "  {}\n",
            format!("{} {}", group.id, group.text).bold()
        ));
        for check in &group.checks {
            // Labels are pre-padded to five characters; format-width padding
            // would count the ANSI escape bytes and misalign the column.
            let state_str = match check.state {
                State::Pass => " PASS".green().bold().to_string(),
                State::Fail => " FAIL".red().bold().to_string(),
                State::Mixed => "MIXED".yellow().bold().to_string(),
                State::Warn => " WARN".yellow().bold().to_string(),
                State::Skip => " SKIP".dimmed().to_string(),
                State::NotApplicable => "  N/A".blue().to_string(),
            };
            out.push_str(&format!(
                "    [{state_str}] {id:<10} {text}\n",
                id = check.id.dimmed(),
                text = check.text,
            ));
            if matches!(check.state, State::Fail | State::Mixed) {
                if !check.nodes.is_empty() {
                    out.push_str(&format!(
                        "            {}\n",
                        format!("failed on: {}", check.nodes.join(", ")).dimmed()
                    ));
                }
                if !check.remediation.is_empty() {
                    out.push_str(&format!(
                        "            {}\n",
                        format!("remediation: {}", check.remediation).dimmed()
                    ));
                }
            }
        }
    }
    out.push('\n');

    // Summary
    let status_str = if report.has_failures() {
        "FAILED".red().bold().to_string()
    } else {
        "PASSED".green().bold().to_string()
    };
    out.push_str(&format!(
        "Result: {status_str}  |  {} checks: {} pass, {} fail, {} warn, {} skip, {} not applicable\n",
        report.total,
        report.pass,
        report.fail,
        report.warn,
        report.skip,
        report.not_applicable,
    ));

    out
}
