//! Output formatting for summarized reports.
//!
//! Two formats are supported:
//!
//! | Format | Module | Use case |
//! |--------|--------|----------|
//! | [`Pretty`](OutputFormat::Pretty) | [`pretty`] | Terminal / human review |
//! | [`Json`](OutputFormat::Json)     | [`json`]   | Automation / archiving  |
//!
//! Use [`format_report`] to render a [`SummarizedReport`] in either format.

pub mod json;
pub mod pretty;

use crate::report::SummarizedReport;

/// Supported output formats for summarized reports.
#[derive(Debug, Clone, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable colored text with per-group check states.
    Pretty,
    /// Machine-readable JSON, the persisted report document.
    Json,
}

/// Formats a [`SummarizedReport`] in the requested [`OutputFormat`].
///
/// # Examples
///
/// ```rust,no_run
/// use bench_summarizer::output::{format_report, OutputFormat};
/// # use bench_summarizer::report::SummarizedReport;
/// # fn example(report: &SummarizedReport) {
/// let json = format_report(report, &OutputFormat::Json);
/// println!("{json}");
/// # }
/// ```
pub fn format_report(report: &SummarizedReport, format: &OutputFormat) -> String {
    match format {
        OutputFormat::Pretty => pretty::format(report),
        OutputFormat::Json => json::format(report),
    }
}
