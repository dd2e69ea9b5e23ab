//! JSON output formatter.
//!
//! Produces the persisted report document: totals, node inventory, the
//! results tree, and the encoded actual-value data.

use crate::report::SummarizedReport;

/// Formats a [`SummarizedReport`] as pretty-printed JSON.
///
/// Per-node observed values never appear in the results tree; they ship
/// only inside the `actual_value_map_data` field, which the `decode`
/// subcommand (or any consumer of [`crate::actual_values::decode`]) can
/// expand again.
///
/// # Panics
///
/// Panics if the report cannot be serialized (should not happen with valid data).
pub fn format(report: &SummarizedReport) -> String {
    serde_json::to_string_pretty(report).expect("JSON serialization failed")
}
