//! Actual-value map encoding.
//!
//! Observed per-node values can be bulky (file permission listings, flag
//! dumps, command output), so the report keeps them out of the results tree.
//! Instead, the hierarchy of groups, checks, and node values is flattened
//! into dedicated wire structs, serialized as compact JSON, gzip-compressed, and
//! base64-encoded into one string that embeds safely inside a JSON or HTML
//! document. [`decode`] reverses the pipeline exactly, so a consumer holding
//! only the report can recover every observed value.
//!
//! The pipeline is a pure function of its input: no I/O, no global state,
//! and safe to run concurrently on independent inputs.
//!
//! ```rust
//! use bench_summarizer::actual_values;
//!
//! let mapped = actual_values::map_groups(&[]);
//! let data = actual_values::encode(&mapped).unwrap();
//! assert_eq!(actual_values::decode(&data).unwrap(), mapped);
//! ```

use std::collections::BTreeMap;
use std::io::{Read, Write};

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;

use crate::report::Group;

/// Failure of one stage of the encode/decode pipeline.
///
/// Every stage fails distinctly, so a caller can tell corrupt base64 from a
/// truncated compressed stream from JSON that no longer matches the wire
/// shape. The first failing stage aborts the pipeline; no partial output is
/// ever returned.
#[derive(Debug, thiserror::Error)]
pub enum ActualValueError {
    /// The mapped hierarchy could not be serialized to JSON.
    #[error("failed to serialize actual value groups: {0}")]
    Serialize(#[source] serde_json::Error),
    /// The compressor reported a fault while writing or finishing the stream.
    #[error("failed to compress actual value data: {0}")]
    Compress(#[source] std::io::Error),
    /// The input string is not valid standard base64.
    #[error("failed to decode actual value data as base64: {0}")]
    Decode(#[source] base64::DecodeError),
    /// The compressed stream is truncated or corrupt.
    #[error("failed to decompress actual value data: {0}")]
    Decompress(#[source] std::io::Error),
    /// The decompressed text does not parse as the wire hierarchy.
    #[error("failed to parse actual value groups: {0}")]
    Parse(#[source] serde_json::Error),
}

/// Wire form of one benchmark group.
///
/// The JSON key names (`id`, `text`, `checks`, `actual_value_node_map`) are
/// read by report consumers and must not change.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ActualValueGroup {
    pub id: String,
    pub text: String,
    pub checks: Vec<ActualValueCheck>,
}

/// Wire form of one check with its per-node observed values.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ActualValueCheck {
    pub id: String,
    pub text: String,
    // BTreeMap serializes keys in sorted order, which keeps the encoded
    // output byte-identical across runs for the same input.
    pub actual_value_node_map: BTreeMap<String, String>,
}

/// Projects the results tree into the wire hierarchy.
///
/// The output has exactly the shape of the input: one [`ActualValueGroup`]
/// per group and one [`ActualValueCheck`] per check, in input order, with
/// `id`, `text`, and the node-value map copied verbatim. Groups without
/// checks and checks with empty maps are preserved, and the output owns its
/// maps, so later mutation of the input cannot leak into it.
pub fn map_groups(groups: &[Group]) -> Vec<ActualValueGroup> {
    groups
        .iter()
        .map(|group| ActualValueGroup {
            id: group.id.clone(),
            text: group.text.clone(),
            checks: group
                .checks
                .iter()
                .map(|check| ActualValueCheck {
                    id: check.id.clone(),
                    text: check.text.clone(),
                    actual_value_node_map: check.actual_value_node_map.clone(),
                })
                .collect(),
        })
        .collect()
}

/// Encodes the wire hierarchy into the embeddable report field.
///
/// Pipeline: compact JSON, then gzip (default compression level, single
/// shot), then standard padded base64. The result contains only base64
/// alphabet characters and needs no further escaping inside JSON, HTML, or
/// XML documents.
///
/// An empty group slice is valid input and produces a string that decodes
/// back to an empty slice.
///
/// # Errors
///
/// Returns [`ActualValueError::Serialize`] if JSON serialization fails and
/// [`ActualValueError::Compress`] if the compressor faults. Neither happens
/// for hierarchies built from strings, but both are surfaced rather than
/// swallowed.
pub fn encode(groups: &[ActualValueGroup]) -> Result<String, ActualValueError> {
    let json = serde_json::to_vec(groups).map_err(ActualValueError::Serialize)?;
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(&json).map_err(ActualValueError::Compress)?;
    let compressed = encoder.finish().map_err(ActualValueError::Compress)?;
    Ok(STANDARD.encode(compressed))
}

/// Decodes a string produced by [`encode`] back into the wire hierarchy.
///
/// Runs the inverse pipeline: base64 decode, gzip decompress, JSON parse.
/// `decode(encode(h))` returns a hierarchy field-for-field equal to `h`.
///
/// # Errors
///
/// Each stage reports its own failure: [`ActualValueError::Decode`] for
/// malformed base64, [`ActualValueError::Decompress`] for a corrupt or
/// truncated gzip stream, and [`ActualValueError::Parse`] for JSON that does
/// not match the wire shape.
pub fn decode(data: &str) -> Result<Vec<ActualValueGroup>, ActualValueError> {
    let compressed = STANDARD.decode(data).map_err(ActualValueError::Decode)?;
    let mut decoder = GzDecoder::new(compressed.as_slice());
    let mut json = Vec::new();
    decoder
        .read_to_end(&mut json)
        .map_err(ActualValueError::Decompress)?;
    serde_json::from_slice(&json).map_err(ActualValueError::Parse)
}
