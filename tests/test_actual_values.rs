use std::collections::BTreeMap;
use std::io::{Read, Write};

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;

use bench_summarizer::actual_values::{self, ActualValueError};
use bench_summarizer::report::{Check, Group, State};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn node_map(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
    entries
        .iter()
        .map(|(node, value)| (node.to_string(), value.to_string()))
        .collect()
}

fn make_check(id: &str, text: &str, values: &[(&str, &str)]) -> Check {
    Check {
        id: id.to_string(),
        text: text.to_string(),
        state: State::Pass,
        node_type: vec![],
        nodes: vec![],
        remediation: String::new(),
        audit: String::new(),
        audit_config: String::new(),
        test_info: vec![],
        expected_result: String::new(),
        actual_value_node_map: node_map(values),
    }
}

fn make_group(id: &str, text: &str, checks: Vec<Check>) -> Group {
    Group {
        id: id.to_string(),
        text: text.to_string(),
        checks,
    }
}

/// Four groups over three nodes, modeled on a small cluster scan: permission
/// observations, plain string observations, and boolean observations. Group
/// 3.1 deliberately holds a check whose id is not prefixed by the group id.
fn seed_groups() -> Vec<Group> {
    let permissions = [
        ("node1", "permission=644"),
        ("node2", "permission=640"),
        ("node3", "permission=600"),
    ];
    let values = [
        ("node1", "testvalue"),
        ("node2", "testvalue1"),
        ("node3", "testvalue2"),
    ];
    let flags = [("node1", "true"), ("node2", "false"), ("node3", "true")];

    vec![
        make_group(
            "1.1",
            "Checks for group 1.1",
            vec![
                make_check("1.1.1", "Check 1.1.1", &permissions),
                make_check("1.1.2", "Check 1.1.2", &values),
            ],
        ),
        make_group(
            "1.2",
            "Checks for group 1.2",
            vec![make_check("1.2.1", "Check 1.2.1", &values)],
        ),
        make_group(
            "2.1",
            "Checks for group 2.1",
            vec![make_check("2.1.1", "Check 2.1.1", &values)],
        ),
        make_group(
            "3.1",
            "Checks for group 3.1",
            vec![make_check("3.2", "Check 3.2", &flags)],
        ),
    ]
}

// --- Mapping ---

#[test]
fn mapping_preserves_structure_and_fields() {
    let groups = seed_groups();
    let mapped = actual_values::map_groups(&groups);

    assert_eq!(mapped.len(), groups.len(), "one output group per input group");
    for (group, av_group) in groups.iter().zip(&mapped) {
        assert_eq!(av_group.id, group.id);
        assert_eq!(av_group.text, group.text);
        assert_eq!(
            av_group.checks.len(),
            group.checks.len(),
            "one output check per input check in group {}",
            group.id
        );
        for (check, av_check) in group.checks.iter().zip(&av_group.checks) {
            assert_eq!(av_check.id, check.id);
            assert_eq!(av_check.text, check.text);
            assert_eq!(av_check.actual_value_node_map, check.actual_value_node_map);
        }
    }
}

#[test]
fn mapping_preserves_empty_groups_and_empty_maps() {
    let groups = vec![
        make_group("1.1", "No checks at all", vec![]),
        make_group(
            "1.2",
            "One check, nothing observed",
            vec![make_check("1.2.1", "Check 1.2.1", &[])],
        ),
    ];
    let mapped = actual_values::map_groups(&groups);

    assert_eq!(mapped.len(), 2);
    assert!(
        mapped[0].checks.is_empty(),
        "a group without checks must map to a group without checks"
    );
    assert!(
        mapped[1].checks[0].actual_value_node_map.is_empty(),
        "an empty node map must stay present and empty"
    );
}

#[test]
fn mapping_an_empty_slice_yields_no_groups() {
    assert!(actual_values::map_groups(&[]).is_empty());
}

#[test]
fn mapped_output_does_not_alias_the_input() {
    let mut groups = seed_groups();
    let mapped = actual_values::map_groups(&groups);

    groups[0].checks[0]
        .actual_value_node_map
        .insert("node9".to_string(), "permission=777".to_string());

    assert!(
        !mapped[0].checks[0].actual_value_node_map.contains_key("node9"),
        "mutating a source map after mapping must not change the output"
    );
}

// --- Encode / decode ---

#[test]
fn round_trip_restores_every_field() {
    let mapped = actual_values::map_groups(&seed_groups());
    let data = actual_values::encode(&mapped).expect("encode should succeed");
    let decoded = actual_values::decode(&data).expect("decode should succeed");

    assert_eq!(decoded, mapped);
}

#[test]
fn encoded_data_is_plain_base64_text() {
    let data = actual_values::encode(&actual_values::map_groups(&seed_groups())).unwrap();

    assert!(!data.is_empty());
    assert!(
        data.chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '+' || c == '/' || c == '='),
        "encoded data must embed in JSON/HTML without escaping: {data}"
    );
}

#[test]
fn empty_hierarchy_encodes_and_decodes() {
    let data = actual_values::encode(&[]).expect("an empty hierarchy is valid input");
    assert!(!data.is_empty(), "even `[]` produces a gzip frame");
    assert!(actual_values::decode(&data).unwrap().is_empty());
}

#[test]
fn decompressed_bytes_match_direct_serialization() {
    let mapped = actual_values::map_groups(&seed_groups());
    let data = actual_values::encode(&mapped).unwrap();

    let compressed = STANDARD.decode(&data).expect("data should be valid base64");
    let mut json = Vec::new();
    GzDecoder::new(compressed.as_slice())
        .read_to_end(&mut json)
        .expect("data should be a valid gzip stream");

    let expected = serde_json::to_vec(&mapped).unwrap();
    assert_eq!(
        json, expected,
        "decompressing the encoded data must yield the exact JSON serialization"
    );
}

// --- Reverse-path failures are attributable to a stage ---

#[test]
fn decode_rejects_text_that_is_not_base64() {
    let err = actual_values::decode("this is not base64!!!").unwrap_err();
    assert!(
        matches!(err, ActualValueError::Decode(_)),
        "expected a base64 decode error, got: {err}"
    );
    assert!(err.to_string().contains("base64"));
}

#[test]
fn decode_rejects_base64_of_bytes_that_are_not_gzip() {
    let data = STANDARD.encode(b"just some plain bytes");
    let err = actual_values::decode(&data).unwrap_err();
    assert!(
        matches!(err, ActualValueError::Decompress(_)),
        "expected a decompression error, got: {err}"
    );
}

#[test]
fn decode_rejects_gzip_of_json_with_the_wrong_shape() {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(br#"{"unexpected": "object, not an array of groups"}"#)
        .unwrap();
    let data = STANDARD.encode(encoder.finish().unwrap());

    let err = actual_values::decode(&data).unwrap_err();
    assert!(
        matches!(err, ActualValueError::Parse(_)),
        "expected a parse error, got: {err}"
    );
}
