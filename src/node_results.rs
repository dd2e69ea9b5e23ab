//! Deserialization types for per-node benchmark result files.
//!
//! Each scanned node produces one JSON document: a list of controls, each
//! holding groups of checks with the status and observed value the node
//! reported. Unknown keys are ignored so newer scanners stay readable.

use std::path::Path;

use crate::report::NodeType;

/// Status a single node reported for a single check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CheckStatus {
    Pass,
    Fail,
    Warn,
    Info,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct CheckResult {
    pub id: String,
    pub text: String,
    pub status: CheckStatus,
    /// Value the check observed on this node (flag contents, permissions, …).
    /// Empty when the scanner recorded nothing.
    #[serde(default)]
    pub actual_value: String,
    #[serde(default)]
    pub remediation: String,
    #[serde(default)]
    pub audit: String,
    #[serde(default)]
    pub audit_config: String,
    #[serde(default)]
    pub test_info: Vec<String>,
    #[serde(default)]
    pub expected_result: String,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct ControlGroup {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub checks: Vec<CheckResult>,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct Control {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub version: String,
    pub node_type: NodeType,
    #[serde(default)]
    pub groups: Vec<ControlGroup>,
}

/// Top-level shape of one node's result file.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct NodeResults {
    #[serde(default)]
    pub controls: Vec<Control>,
}

/// Derives the node name from a result file path: the file stem, so
/// `results/master1.json` names the node `master1`.
pub fn node_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "unknown".to_string())
}
