//! # bench-summarizer
//!
//! Summarizes per-node compliance benchmark results into a single report.
//!
//! `bench-summarizer` reads one JSON result file per scanned node, merges
//! every node's answers into one check tree, aggregates a cross-node state
//! per check, and embeds each check's per-node observed values as a
//! compressed, base64-encoded field so bulky values stay out of the results
//! tree while remaining exactly recoverable.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use std::path::Path;
//! use bench_summarizer::{config::Config, output, summarizer};
//!
//! let config = Config::load(None).expect("failed to load config");
//! let report = summarizer::summarize(Path::new("./results"), &config)
//!     .expect("failed to summarize");
//!
//! let text = output::format_report(&report, &output::OutputFormat::Pretty);
//! print!("{text}");
//!
//! if report.has_failures() {
//!     std::process::exit(1);
//! }
//! ```
//!
//! ## Architecture
//!
//! The crate is organized around a pipeline:
//!
//! 1. **[`config`]** — load and validate configuration from TOML files.
//! 2. **[`node_results`]** — deserialize one result file per node.
//! 3. **[`summarizer`]** — merge nodes in parallel and aggregate states.
//! 4. **[`report`]** — core data types ([`report::Group`], [`report::Check`],
//!    [`report::SummarizedReport`]).
//! 5. **[`actual_values`]** — map the results tree into wire structs and run
//!    the serialize, compress, base64 pipeline (and its exact reverse).
//! 6. **[`output`]** — format reports as pretty text or JSON.
//!
//! ## Check states
//!
//! | State | Letter | Meaning |
//! |-------|--------|---------|
//! | Pass | `P` | every node passed |
//! | Fail | `F` | every node failed |
//! | Mixed | `M` | some nodes passed, some failed |
//! | Warn | `W` | a node warned and none failed |
//! | Skip | `S` | skipped via configuration |
//! | Not applicable | `N` | excluded via configuration |

pub mod actual_values;
pub mod config;
pub mod node_results;
pub mod output;
pub mod report;
pub mod summarizer;
