use assert_cmd::Command;
use predicates::prelude::*;

fn bench_summarizer() -> Command {
    assert_cmd::cargo::cargo_bin_cmd!("bench-summarizer")
}

#[test]
fn summarize_failing_cluster_exits_1() {
    bench_summarizer()
        .args(["summarize", "--input-dir", "tests/fixtures/three-nodes"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("FAIL"));
}

#[test]
fn summarize_passing_cluster_exits_0() {
    bench_summarizer()
        .args(["summarize", "--input-dir", "tests/fixtures/passing"])
        .assert()
        .success()
        .stdout(predicate::str::contains("PASSED"));
}

#[test]
fn summarize_json_format() {
    bench_summarizer()
        .args([
            "summarize",
            "--input-dir",
            "tests/fixtures/three-nodes",
            "--format",
            "json",
        ])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("\"actual_value_map_data\""))
        .stdout(predicate::str::contains("\"version\": \"cis-1.8\""));
}

#[test]
fn summarize_missing_dir_exits_2() {
    bench_summarizer()
        .args(["summarize", "--input-dir", "tests/fixtures/does-not-exist"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("input directory"));
}

#[test]
fn output_to_file_then_decode_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let report_file = dir.path().join("report.json");

    bench_summarizer()
        .args([
            "summarize",
            "--input-dir",
            "tests/fixtures/three-nodes",
            "--format",
            "json",
            "--output",
            report_file.to_str().unwrap(),
        ])
        .assert()
        .code(1);

    let content = std::fs::read_to_string(&report_file).unwrap();
    let parsed: serde_json::Value =
        serde_json::from_str(&content).expect("Output file should contain valid JSON");
    assert!(parsed["actual_value_map_data"].is_string());

    // The decode subcommand expands the embedded per-node observed values.
    bench_summarizer()
        .args(["decode", report_file.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("actual_value_node_map"))
        .stdout(predicate::str::contains("permission=644"));
}

#[test]
fn decode_missing_file_exits_2() {
    bench_summarizer()
        .args(["decode", "tests/fixtures/no-such-report.json"])
        .assert()
        .code(2);
}

#[test]
fn decode_rejects_a_document_without_the_data_field() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("not-a-report.json");
    std::fs::write(&path, "{\"hello\": 1}").unwrap();

    bench_summarizer()
        .args(["decode", path.to_str().unwrap()])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("actual_value_map_data"));
}

#[test]
fn failures_only_flag_drops_passing_checks() {
    bench_summarizer()
        .args([
            "summarize",
            "--input-dir",
            "tests/fixtures/three-nodes",
            "--failures-only",
        ])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("4.1.1"))
        .stdout(predicate::str::contains("1.1.2"))
        .stdout(predicate::str::contains("4.1.2").not());
}

#[test]
fn skip_flag_marks_check_skipped() {
    bench_summarizer()
        .args([
            "summarize",
            "--input-dir",
            "tests/fixtures/passing",
            "--skip",
            "4.1.1",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("SKIP"))
        .stdout(predicate::str::contains("1 skip"));
}

#[test]
fn invalid_skip_id_exits_2() {
    bench_summarizer()
        .args([
            "summarize",
            "--input-dir",
            "tests/fixtures/passing",
            "--skip",
            "not-an-id",
        ])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid check id"));
}

#[test]
fn config_file_drives_skip() {
    let dir = tempfile::tempdir().unwrap();
    let config_file = dir.path().join("summarizer.toml");
    std::fs::write(&config_file, "[skip]\nchecks = [\"4.1.1\"]\n").unwrap();

    bench_summarizer()
        .args([
            "summarize",
            "--input-dir",
            "tests/fixtures/passing",
            "--config",
            config_file.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("SKIP"));
}

#[test]
fn missing_config_file_exits_2() {
    bench_summarizer()
        .args([
            "summarize",
            "--input-dir",
            "tests/fixtures/passing",
            "--config",
            "tests/fixtures/no-such-config.toml",
        ])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Config file not found"));
}
