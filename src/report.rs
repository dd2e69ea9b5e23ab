use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

/// Aggregated result of a check across every node that reported it.
///
/// Serializes as a single letter (`"P"`, `"F"`, `"S"`, `"M"`, `"W"`, `"N"`)
/// to keep the persisted results tree compact. The letters are read back by
/// report consumers, so they are part of the output contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum State {
    /// Every node passed the check.
    #[serde(rename = "P")]
    Pass,
    /// Every node failed the check.
    #[serde(rename = "F")]
    Fail,
    /// The check was skipped via configuration.
    #[serde(rename = "S")]
    Skip,
    /// Some nodes passed and some failed.
    #[serde(rename = "M")]
    Mixed,
    /// At least one node reported a warning and none failed.
    #[serde(rename = "W")]
    Warn,
    /// The check was marked not applicable via configuration.
    #[serde(rename = "N")]
    NotApplicable,
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            State::Pass => write!(f, "pass"),
            State::Fail => write!(f, "fail"),
            State::Skip => write!(f, "skip"),
            State::Mixed => write!(f, "mixed"),
            State::Warn => write!(f, "warn"),
            State::NotApplicable => write!(f, "not applicable"),
        }
    }
}

/// Role of a node in the scanned cluster, as declared by the control that
/// produced its results.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    Etcd,
    Master,
    Node,
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeType::Etcd => write!(f, "etcd"),
            NodeType::Master => write!(f, "master"),
            NodeType::Node => write!(f, "node"),
        }
    }
}

/// A benchmark section: an ordered collection of related checks
/// (for example section `1.1`, "Control Plane Node Configuration Files").
#[derive(Debug, Clone, serde::Serialize)]
pub struct Group {
    pub id: String,
    pub text: String,
    pub checks: Vec<Check>,
}

/// One benchmark check, merged across every node that reported it.
#[derive(Debug, Clone, serde::Serialize)]
pub struct Check {
    pub id: String,
    pub text: String,
    pub state: State,
    /// Node roles this check applies to. Usually one entry; a check shared
    /// between control files carries every role that reported it.
    pub node_type: Vec<NodeType>,
    /// Names of the nodes whose observed status was not PASS, sorted.
    /// Empty for a check that passed everywhere.
    pub nodes: Vec<String>,
    pub remediation: String,
    pub audit: String,
    pub audit_config: String,
    pub test_info: Vec<String>,
    pub expected_result: String,
    /// Per-node observed values, node name to value. Values can be large
    /// (command output, permission listings), so the results tree never
    /// serializes them; they ship only inside
    /// [`SummarizedReport::actual_value_map_data`].
    #[serde(skip)]
    pub actual_value_node_map: BTreeMap<String, String>,
}

/// The complete summarized report persisted for downstream rendering.
///
/// [`total`](Self::total) counts every check once; a [`State::Mixed`] check
/// counts toward [`fail`](Self::fail) because it failed on at least one node.
#[derive(Debug, Clone, serde::Serialize)]
pub struct SummarizedReport {
    /// Benchmark version the nodes were scanned against (e.g. `cis-1.8`).
    pub version: String,
    /// RFC 3339 timestamp of report generation.
    pub generated_at: String,
    pub total: usize,
    pub pass: usize,
    pub fail: usize,
    pub skip: usize,
    pub warn: usize,
    pub not_applicable: usize,
    /// Node inventory: node type to sorted node names.
    // BTreeMap keeps node types in a stable order when serializing to JSON.
    pub nodes: BTreeMap<NodeType, Vec<String>>,
    pub results: Vec<Group>,
    /// Base64 of the gzip-compressed JSON actual-value hierarchy. See
    /// [`crate::actual_values`] for the exact encoding.
    pub actual_value_map_data: String,
}

impl SummarizedReport {
    /// Returns `true` if any check failed on any node.
    ///
    /// Mixed checks count as failures, so this is equivalent to
    /// `self.fail > 0` and is unaffected by failures-only filtering of the
    /// results tree.
    pub fn has_failures(&self) -> bool {
        self.fail > 0
    }
}

/// Orders benchmark ids segment-wise, so `1.2` < `1.10` < `2.1`.
///
/// Ids are split on `.`; numeric segments compare as numbers and anything
/// non-numeric falls back to a plain string comparison. A pure lexical sort
/// would place `1.10` before `1.2` and scramble section order.
pub fn cmp_dotted_ids(a: &str, b: &str) -> Ordering {
    let mut left = a.split('.');
    let mut right = b.split('.');
    loop {
        match (left.next(), right.next()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(l), Some(r)) => {
                let ord = match (l.parse::<u64>(), r.parse::<u64>()) {
                    (Ok(ln), Ok(rn)) => ln.cmp(&rn),
                    _ => l.cmp(r),
                };
                if ord != Ordering::Equal {
                    return ord;
                }
            }
        }
    }
}
