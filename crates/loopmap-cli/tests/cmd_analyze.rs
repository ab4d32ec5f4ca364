//! Integration tests for `loopmap analyze` and `loopmap version`.
#![allow(clippy::expect_used)]

use std::fs::File;
use std::io::{Cursor, Write as _};
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use calamine::{Reader, Xlsx, open_workbook_from_rs};
use loopmap_core::EdgeRecord;
use loopmap_excel::{ImportConfig, export_connections};
use tempfile::TempDir;

/// Path to the compiled `loopmap` binary.
fn loopmap_bin() -> PathBuf {
    let mut path = std::env::current_exe().expect("current exe");
    path.pop();
    if path.ends_with("deps") {
        path.pop();
    }
    path.push("loopmap");
    path
}

fn loopmap(args: &[&str]) -> Output {
    Command::new(loopmap_bin())
        .args(args)
        .env_remove("RUST_LOG")
        .env_remove("NO_COLOR")
        .env_remove("LOOPMAP_MAX_FILE_SIZE")
        .output()
        .expect("run loopmap")
}

fn edges(pairs: &[(&str, &str)]) -> Vec<EdgeRecord> {
    pairs.iter().map(|&(a, b)| EdgeRecord::new(a, b)).collect()
}

/// Writes a connections workbook into `dir` and returns its path.
fn workbook(dir: &TempDir, name: &str, records: &[EdgeRecord], config: &ImportConfig) -> PathBuf {
    let path = dir.path().join(name);
    let file = File::create(&path).expect("create fixture");
    export_connections(records, config, file).expect("write fixture");
    path
}

fn default_workbook(dir: &TempDir, pairs: &[(&str, &str)]) -> PathBuf {
    workbook(dir, "map.xlsx", &edges(pairs), &ImportConfig::default())
}

fn path_str(path: &Path) -> &str {
    path.to_str().expect("utf-8 path")
}

fn stdout(out: &Output) -> String {
    String::from_utf8_lossy(&out.stdout).into_owned()
}

fn stderr(out: &Output) -> String {
    String::from_utf8_lossy(&out.stderr).into_owned()
}

const TRIANGLE: &[(&str, &str)] = &[("A", "B"), ("B", "C"), ("C", "A")];

// ---------------------------------------------------------------------------
// version
// ---------------------------------------------------------------------------

#[test]
fn version_prints_core_version() {
    let out = loopmap(&["version"]);
    assert!(out.status.success());
    assert_eq!(stdout(&out).trim(), loopmap_core::version());
}

// ---------------------------------------------------------------------------
// analyze: human mode
// ---------------------------------------------------------------------------

#[test]
fn triangle_human_output() {
    let dir = TempDir::new().expect("tempdir");
    let input = default_workbook(&dir, TRIANGLE);
    let out = loopmap(&["analyze", "--no-color", path_str(&input)]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    let text = stdout(&out);
    assert!(text.contains("Found 1 loop."), "{text}");
    assert!(text.contains("Loop 1: A -> B -> C\n        -> A"), "{text}");
}

#[test]
fn acyclic_input_exits_0_with_message() {
    let dir = TempDir::new().expect("tempdir");
    let input = default_workbook(&dir, &[("A", "B"), ("B", "C")]);
    let out = loopmap(&["analyze", "--no-color", path_str(&input)]);
    assert_eq!(out.status.code(), Some(0));
    assert!(stdout(&out).contains("No loops found."), "{}", stdout(&out));
}

#[test]
fn preview_limits_printed_loops() {
    let dir = TempDir::new().expect("tempdir");
    let input = default_workbook(&dir, &[("a", "b"), ("b", "a"), ("c", "c"), ("d", "d")]);
    let out = loopmap(&["analyze", "--no-color", "--preview", "1", path_str(&input)]);
    assert!(out.status.success());
    let text = stdout(&out);
    assert!(text.contains("Found 3 loops."), "{text}");
    assert!(text.contains("Loop 1:"), "{text}");
    assert!(!text.contains("Loop 2:"), "{text}");
}

#[test]
fn reads_workbook_from_stdin() {
    let dir = TempDir::new().expect("tempdir");
    let input = default_workbook(&dir, TRIANGLE);
    let bytes = std::fs::read(&input).expect("read fixture");

    let mut child = Command::new(loopmap_bin())
        .args(["analyze", "-f", "json", "-"])
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn loopmap");
    child
        .stdin
        .take()
        .expect("stdin piped")
        .write_all(&bytes)
        .expect("write stdin");
    let out = child.wait_with_output().expect("wait");
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    let json: serde_json::Value = serde_json::from_slice(&out.stdout).expect("json");
    assert_eq!(json["loop_count"], 1);
}

// ---------------------------------------------------------------------------
// analyze: JSON mode
// ---------------------------------------------------------------------------

#[test]
fn json_output_carries_both_projections() {
    let dir = TempDir::new().expect("tempdir");
    let mut records = edges(&[("x", "a"), ("a", "x"), ("a", "b"), ("b", "x"), ("x", "a")]);
    records.push(EdgeRecord {
        from: Some("x".to_owned()),
        to: None,
    });
    let input = workbook(&dir, "map.xlsx", &records, &ImportConfig::default());

    let out = loopmap(&["analyze", "-f", "json", path_str(&input)]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    let json: serde_json::Value = serde_json::from_slice(&out.stdout).expect("json");

    assert_eq!(json["node_count"], 3);
    assert_eq!(json["edge_count"], 4);
    assert_eq!(json["dropped_records"], 1);
    assert_eq!(json["duplicate_edges"], 1);
    assert_eq!(json["loop_count"], 2);
    assert_eq!(json["loops"][0]["full_path"], "x -> a -> x");
    assert_eq!(json["loops"][1]["full_path"], "x -> a -> b -> x");

    let tags = json["edge_tags"].as_array().expect("edge_tags array");
    let x_to_a = tags
        .iter()
        .find(|row| row["from"] == "x" && row["to"] == "a")
        .expect("x -> a row");
    assert_eq!(x_to_a["tags"], "Loop_1 | Loop_2");
}

#[test]
fn parallel_output_matches_sequential() {
    let dir = TempDir::new().expect("tempdir");
    let input = default_workbook(
        &dir,
        &[
            ("a", "b"),
            ("b", "c"),
            ("c", "a"),
            ("b", "a"),
            ("c", "d"),
            ("d", "c"),
            ("d", "d"),
        ],
    );
    let sequential = loopmap(&["analyze", "-f", "json", path_str(&input)]);
    let parallel = loopmap(&["analyze", "-f", "json", "--parallel", path_str(&input)]);
    assert!(sequential.status.success());
    assert!(parallel.status.success());
    assert_eq!(sequential.stdout, parallel.stdout);
}

// ---------------------------------------------------------------------------
// analyze: custom layout
// ---------------------------------------------------------------------------

#[test]
fn custom_sheet_and_columns() {
    let dir = TempDir::new().expect("tempdir");
    let layout = ImportConfig {
        sheet: "Edges".to_owned(),
        from_column: "Source".to_owned(),
        to_column: "Target".to_owned(),
    };
    let input = workbook(&dir, "edges.xlsx", &edges(TRIANGLE), &layout);
    let out = loopmap(&[
        "analyze",
        "-f",
        "json",
        "--sheet",
        "Edges",
        "--from-column",
        "source",
        "--to-column",
        "TARGET",
        path_str(&input),
    ]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    let json: serde_json::Value = serde_json::from_slice(&out.stdout).expect("json");
    assert_eq!(json["loop_count"], 1);
}

#[test]
fn extra_columns_and_header_case_are_tolerated() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("kumu.xlsx");

    let mut wb = rust_xlsxwriter::Workbook::new();
    let ws = wb
        .add_worksheet()
        .set_name("Connections")
        .expect("sheet name");
    let rows = [
        ["Label", "FROM", "Type", "to"],
        ["r1", "p", "causal", "q"],
        ["r2", "q", "causal", "p"],
    ];
    for (r, row) in (0u32..).zip(rows) {
        for (c, cell) in (0u16..).zip(row) {
            ws.write(r, c, cell).expect("write cell");
        }
    }
    wb.save(&path).expect("save workbook");

    let out = loopmap(&["analyze", "-f", "json", path_str(&path)]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    let json: serde_json::Value = serde_json::from_slice(&out.stdout).expect("json");
    assert_eq!(json["loops"][0]["full_path"], "p -> q -> p");
}

// ---------------------------------------------------------------------------
// analyze: report workbook
// ---------------------------------------------------------------------------

#[test]
fn output_flag_writes_report_workbook() {
    let dir = TempDir::new().expect("tempdir");
    let input = default_workbook(&dir, TRIANGLE);
    let report = dir.path().join("report.xlsx");

    let out = loopmap(&[
        "analyze",
        "--no-color",
        "--output",
        path_str(&report),
        path_str(&input),
    ]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    assert!(stderr(&out).contains("report written"), "{}", stderr(&out));

    let bytes = std::fs::read(&report).expect("report exists");
    let mut wb: Xlsx<_> = open_workbook_from_rs(Cursor::new(bytes)).expect("valid xlsx");
    assert_eq!(wb.sheet_names(), vec!["Loop_Report", "For_Kumu_Import"]);

    let loops = wb.worksheet_range("Loop_Report").expect("report sheet");
    let rows: Vec<Vec<String>> = loops
        .rows()
        .map(|r| r.iter().map(ToString::to_string).collect())
        .collect();
    assert_eq!(rows[0], vec!["Loop ID", "Length", "Full Path"]);
    assert_eq!(rows[1], vec!["Loop 1", "3", "A -> B -> C -> A"]);

    let tags = wb.worksheet_range("For_Kumu_Import").expect("tags sheet");
    assert_eq!(tags.height(), 4, "header plus three edges");
}

#[test]
fn quiet_suppresses_report_notice() {
    let dir = TempDir::new().expect("tempdir");
    let input = default_workbook(&dir, TRIANGLE);
    let report = dir.path().join("report.xlsx");
    let out = loopmap(&[
        "analyze",
        "-q",
        "-o",
        path_str(&report),
        path_str(&input),
    ]);
    assert!(out.status.success());
    assert!(stderr(&out).is_empty(), "{}", stderr(&out));
    assert!(report.exists());
}

#[test]
fn unwritable_output_exits_1() {
    let dir = TempDir::new().expect("tempdir");
    let input = default_workbook(&dir, TRIANGLE);
    let report = dir.path().join("missing-dir").join("report.xlsx");
    let out = loopmap(&["analyze", "-o", path_str(&report), path_str(&input)]);
    assert_eq!(out.status.code(), Some(1), "stderr: {}", stderr(&out));
    assert!(stderr(&out).contains("failed to write"), "{}", stderr(&out));
}

// ---------------------------------------------------------------------------
// analyze: failures
// ---------------------------------------------------------------------------

#[test]
fn missing_file_exits_2() {
    let out = loopmap(&["analyze", "/no/such/map.xlsx"]);
    assert_eq!(out.status.code(), Some(2));
    assert!(stderr(&out).contains("not found"), "{}", stderr(&out));
}

#[test]
fn missing_sheet_exits_2() {
    let dir = TempDir::new().expect("tempdir");
    let input = default_workbook(&dir, TRIANGLE);
    let out = loopmap(&["analyze", "--sheet", "Elements", path_str(&input)]);
    assert_eq!(out.status.code(), Some(2));
    assert!(stderr(&out).contains("\"Elements\""), "{}", stderr(&out));
}

#[test]
fn missing_column_exits_2() {
    let dir = TempDir::new().expect("tempdir");
    let input = default_workbook(&dir, TRIANGLE);
    let out = loopmap(&["analyze", "--to-column", "Target", path_str(&input)]);
    assert_eq!(out.status.code(), Some(2));
    assert!(stderr(&out).contains("\"Target\""), "{}", stderr(&out));
}

#[test]
fn non_workbook_input_exits_2() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("notes.xlsx");
    std::fs::write(&path, b"From,To\na,b\n").expect("write");
    let out = loopmap(&["analyze", path_str(&path)]);
    assert_eq!(out.status.code(), Some(2));
}

#[test]
fn file_over_size_limit_exits_2() {
    let dir = TempDir::new().expect("tempdir");
    let input = default_workbook(&dir, TRIANGLE);
    let out = loopmap(&["analyze", "--max-file-size", "16", path_str(&input)]);
    assert_eq!(out.status.code(), Some(2));
    assert!(stderr(&out).contains("too large"), "{}", stderr(&out));
}

#[test]
fn size_limit_from_environment() {
    let dir = TempDir::new().expect("tempdir");
    let input = default_workbook(&dir, TRIANGLE);
    let out = Command::new(loopmap_bin())
        .args(["analyze", path_str(&input)])
        .env("LOOPMAP_MAX_FILE_SIZE", "16")
        .env_remove("NO_COLOR")
        .output()
        .expect("run loopmap");
    assert_eq!(out.status.code(), Some(2));
}

#[test]
fn elapsed_timeout_exits_1() {
    let dir = TempDir::new().expect("tempdir");
    let input = default_workbook(&dir, TRIANGLE);
    let out = loopmap(&["analyze", "--timeout", "0", path_str(&input)]);
    assert_eq!(out.status.code(), Some(1), "stderr: {}", stderr(&out));
    assert!(stderr(&out).contains("deadline"), "{}", stderr(&out));
    assert!(stdout(&out).is_empty(), "no partial output: {}", stdout(&out));
}

#[test]
fn verbose_reports_graph_stats() {
    let dir = TempDir::new().expect("tempdir");
    let input = default_workbook(&dir, TRIANGLE);
    let out = loopmap(&["analyze", "-v", "--no-color", path_str(&input)]);
    assert!(out.status.success());
    assert!(
        stderr(&out).contains("graph: 3 nodes, 3 edges"),
        "{}",
        stderr(&out)
    );
}
