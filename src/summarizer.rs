//! Summarize orchestration.
//!
//! The [`summarize`] function is the main entry-point for turning a
//! directory of per-node benchmark result files into a single
//! [`SummarizedReport`]. It discovers result files, parses them in parallel
//! via [rayon], merges every node's answers into one check tree, aggregates
//! a cross-node state per check, and embeds the encoded actual-value data.

use std::collections::hash_map::Entry;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use walkdir::WalkDir;

use crate::actual_values::{self, ActualValueError};
use crate::config::Config;
use crate::node_results::{self, CheckStatus, NodeResults};
use crate::report::{cmp_dotted_ids, Check, Group, NodeType, State, SummarizedReport};

/// Failure while loading or summarizing node results.
#[derive(Debug, thiserror::Error)]
pub enum SummarizeError {
    #[error("input directory does not exist: {}", .0.display())]
    InputDirMissing(PathBuf),
    #[error("failed to read result file {}: {source}", .path.display())]
    ReadInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse result file {}: {source}", .path.display())]
    ParseInput {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// The directory exists but holds no `*.json` result files. Distinct
    /// from a valid scan with zero groups, which summarizes to an empty
    /// (but well-formed) report.
    #[error("no result files (*.json) found in {}", .0.display())]
    NoInput(PathBuf),
    #[error(transparent)]
    ActualValue(#[from] ActualValueError),
}

/// Summarizes every node result file under `input_dir` into one report.
///
/// # Pipeline
///
/// 1. Collects `*.json` files via [`collect_result_files`]; each file holds
///    one node's results and the file stem names the node.
/// 2. Parses the files **in parallel** using [rayon], failing fast on the
///    first unreadable or malformed file.
/// 3. Merges controls, groups, and checks across nodes (first file in
///    sorted order wins for descriptive text) and aggregates a cross-node
///    [`State`] per check, honoring the skip and not-applicable lists in
///    `config`.
/// 4. Computes totals and the node inventory, optionally drops everything
///    but failures, and encodes the per-node actual values into
///    `actual_value_map_data`.
///
/// # Examples
///
/// ```rust,no_run
/// use std::path::Path;
/// use bench_summarizer::{config::Config, summarizer};
///
/// let config = Config::load(None).unwrap();
/// let report = summarizer::summarize(Path::new("./results"), &config).unwrap();
///
/// std::process::exit(if report.has_failures() { 1 } else { 0 });
/// ```
///
/// # Errors
///
/// Returns a [`SummarizeError`] when the input directory is missing or
/// empty, when any result file fails to read or parse, or when the
/// actual-value encoding fails.
pub fn summarize(input_dir: &Path, config: &Config) -> Result<SummarizedReport, SummarizeError> {
    let parsed = load_results(input_dir)?;

    let mut merged = Merged::default();
    for (node, results) in &parsed {
        log::debug!("merging results for node {node}");
        merge_node(&mut merged, node, results);
    }

    let version = merged.version.clone();
    let nodes = merged
        .nodes
        .iter()
        .map(|(node_type, names)| (*node_type, names.iter().cloned().collect()))
        .collect();

    let mut results = finalize(merged, config);
    let totals = Totals::count(&results);
    if config.report.failures_only {
        retain_failures(&mut results);
    }

    // Built after filtering so the embedded data mirrors the results tree.
    let actual_value_map_data = actual_values::encode(&actual_values::map_groups(&results))?;

    Ok(SummarizedReport {
        version,
        generated_at: chrono::Utc::now().to_rfc3339(),
        total: totals.total,
        pass: totals.pass,
        fail: totals.fail,
        skip: totals.skip,
        warn: totals.warn,
        not_applicable: totals.not_applicable,
        nodes,
        results,
        actual_value_map_data,
    })
}

/// Collects the result files (`*.json`, case-insensitive) directly under
/// `dir`, sorted by path so every run merges nodes in the same order.
///
/// Nested directories are not searched; one results directory holds one
/// flat file per node.
pub fn collect_result_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| {
            e.path()
                .extension()
                .map(|ext| ext.to_string_lossy().eq_ignore_ascii_case("json"))
                .unwrap_or(false)
        })
        .map(|e| e.into_path())
        .collect();
    files.sort();
    files
}

fn load_results(input_dir: &Path) -> Result<Vec<(String, NodeResults)>, SummarizeError> {
    if !input_dir.is_dir() {
        return Err(SummarizeError::InputDirMissing(input_dir.to_path_buf()));
    }
    let files = collect_result_files(input_dir);
    if files.is_empty() {
        return Err(SummarizeError::NoInput(input_dir.to_path_buf()));
    }
    files
        .par_iter()
        .map(|path| {
            let raw = std::fs::read(path).map_err(|source| SummarizeError::ReadInput {
                path: path.clone(),
                source,
            })?;
            let results = serde_json::from_slice(&raw).map_err(|source| {
                SummarizeError::ParseInput {
                    path: path.clone(),
                    source,
                }
            })?;
            Ok((node_results::node_name(path), results))
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Merge accumulators
// ---------------------------------------------------------------------------

#[derive(Default)]
struct Merged {
    version: String,
    nodes: BTreeMap<NodeType, BTreeSet<String>>,
    groups: HashMap<String, GroupAcc>,
}

struct GroupAcc {
    text: String,
    checks: HashMap<String, CheckAcc>,
}

struct CheckAcc {
    text: String,
    node_type: BTreeSet<NodeType>,
    remediation: String,
    audit: String,
    audit_config: String,
    test_info: Vec<String>,
    expected_result: String,
    /// Node name to the status that node reported.
    statuses: BTreeMap<String, CheckStatus>,
    /// Node name to the value that node observed.
    actual_values: BTreeMap<String, String>,
}

fn merge_node(merged: &mut Merged, node: &str, results: &NodeResults) {
    for control in &results.controls {
        if !control.version.is_empty() {
            if merged.version.is_empty() {
                merged.version = control.version.clone();
            } else if merged.version != control.version {
                log::warn!(
                    "node {node} reports benchmark version {} but {} was seen first; keeping {}",
                    control.version,
                    merged.version,
                    merged.version
                );
            }
        }
        merged
            .nodes
            .entry(control.node_type)
            .or_default()
            .insert(node.to_string());

        for group in &control.groups {
            let group_acc = match merged.groups.entry(group.id.clone()) {
                Entry::Occupied(e) => e.into_mut(),
                Entry::Vacant(e) => e.insert(GroupAcc {
                    text: group.text.clone(),
                    checks: HashMap::new(),
                }),
            };
            for check in &group.checks {
                let check_acc = match group_acc.checks.entry(check.id.clone()) {
                    Entry::Occupied(e) => e.into_mut(),
                    Entry::Vacant(e) => e.insert(CheckAcc {
                        text: check.text.clone(),
                        node_type: BTreeSet::new(),
                        remediation: check.remediation.clone(),
                        audit: check.audit.clone(),
                        audit_config: check.audit_config.clone(),
                        test_info: check.test_info.clone(),
                        expected_result: check.expected_result.clone(),
                        statuses: BTreeMap::new(),
                        actual_values: BTreeMap::new(),
                    }),
                };
                check_acc.node_type.insert(control.node_type);
                check_acc.statuses.insert(node.to_string(), check.status);
                check_acc
                    .actual_values
                    .insert(node.to_string(), check.actual_value.clone());
            }
        }
    }
}

/// Turns the merge accumulators into the ordered results tree.
fn finalize(merged: Merged, config: &Config) -> Vec<Group> {
    let mut groups: Vec<(String, GroupAcc)> = merged.groups.into_iter().collect();
    groups.sort_by(|(a, _), (b, _)| cmp_dotted_ids(a, b));

    groups
        .into_iter()
        .map(|(group_id, group_acc)| {
            let mut checks: Vec<(String, CheckAcc)> = group_acc.checks.into_iter().collect();
            checks.sort_by(|(a, _), (b, _)| cmp_dotted_ids(a, b));

            let checks = checks
                .into_iter()
                .map(|(check_id, acc)| {
                    let state = aggregate_state(config, &check_id, &acc.statuses);
                    // BTreeMap iteration order makes this list come out sorted.
                    let nodes = acc
                        .statuses
                        .iter()
                        .filter(|(_, status)| **status != CheckStatus::Pass)
                        .map(|(name, _)| name.clone())
                        .collect();
                    Check {
                        id: check_id,
                        text: acc.text,
                        state,
                        node_type: acc.node_type.into_iter().collect(),
                        nodes,
                        remediation: acc.remediation,
                        audit: acc.audit,
                        audit_config: acc.audit_config,
                        test_info: acc.test_info,
                        expected_result: acc.expected_result,
                        actual_value_node_map: acc.actual_values,
                    }
                })
                .collect();

            Group {
                id: group_id,
                text: group_acc.text,
                checks,
            }
        })
        .collect()
}

/// Aggregates one check's per-node statuses into a single [`State`].
///
/// Configured overrides win over observed statuses; after that, any FAIL
/// makes the check fail (everywhere or mixed), and WARN/INFO surface as a
/// warning only when nothing failed.
fn aggregate_state(config: &Config, check_id: &str, statuses: &BTreeMap<String, CheckStatus>) -> State {
    if config.is_skipped(check_id) {
        return State::Skip;
    }
    if config.is_not_applicable(check_id) {
        return State::NotApplicable;
    }
    let failed = statuses
        .values()
        .filter(|status| **status == CheckStatus::Fail)
        .count();
    if !statuses.is_empty() && failed == statuses.len() {
        State::Fail
    } else if failed > 0 {
        State::Mixed
    } else if statuses
        .values()
        .any(|status| matches!(status, CheckStatus::Warn | CheckStatus::Info))
    {
        State::Warn
    } else {
        State::Pass
    }
}

#[derive(Default)]
struct Totals {
    total: usize,
    pass: usize,
    fail: usize,
    skip: usize,
    warn: usize,
    not_applicable: usize,
}

impl Totals {
    /// Counts every check once. Mixed counts as a failure: the check failed
    /// on at least one node.
    fn count(results: &[Group]) -> Totals {
        let mut totals = Totals::default();
        for group in results {
            for check in &group.checks {
                totals.total += 1;
                match check.state {
                    State::Pass => totals.pass += 1,
                    State::Fail | State::Mixed => totals.fail += 1,
                    State::Skip => totals.skip += 1,
                    State::Warn => totals.warn += 1,
                    State::NotApplicable => totals.not_applicable += 1,
                }
            }
        }
        totals
    }
}

/// Keeps only failing (FAIL or MIXED) checks, dropping groups left empty.
/// Totals are computed before this runs, so they still describe the full
/// scan.
fn retain_failures(results: &mut Vec<Group>) {
    for group in results.iter_mut() {
        group
            .checks
            .retain(|check| matches!(check.state, State::Fail | State::Mixed));
    }
    results.retain(|group| {
        if group.checks.is_empty() {
            log::warn!("group {} has no failing checks, dropped from failures-only report", group.id);
            false
        } else {
            true
        }
    });
}
