//! End-to-end protocol tests driving the real binary over its standard
//! streams, each against a fresh database directory.

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn duckpipe(dir: &TempDir) -> Command {
    let mut cmd = cargo_bin_cmd!("duckpipe");
    cmd.current_dir(dir.path());
    cmd
}

/// Run the binary to completion with `input` on stdin, returning stdout
/// split into lines.
fn run_lines(dir: &TempDir, input: &str) -> Vec<String> {
    let output = duckpipe(dir)
        .write_stdin(input)
        .output()
        .expect("run duckpipe");
    assert!(
        output.status.success(),
        "process exited nonzero: {:?}\nstderr: {}",
        output.status,
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout)
        .expect("utf-8 stdout")
        .lines()
        .map(str::to_owned)
        .collect()
}

#[test]
fn ready_precedes_all_responses() {
    let dir = TempDir::new().expect("temp dir");
    assert_eq!(run_lines(&dir, ""), vec!["READY"]);
}

#[test]
fn fresh_start_answers_count_immediately_after_ready() {
    let dir = TempDir::new().expect("temp dir");
    let lines = run_lines(&dir, "QUERY:SELECT COUNT(*) AS n FROM dummy_data\n");
    assert_eq!(lines, vec!["READY".to_owned(), r#"[{"n":5}]"#.to_owned()]);
}

#[test]
fn unaliased_count_answers_under_the_engine_column_name() {
    let dir = TempDir::new().expect("temp dir");
    let lines = run_lines(&dir, "QUERY:SELECT COUNT(*) FROM dummy_data\n");
    // The engine picks the column name for an unaliased aggregate; only the
    // shape and the count are pinned here.
    assert!(lines[1].starts_with("[{\""), "got: {}", lines[1]);
    assert!(lines[1].ends_with(":5}]"), "got: {}", lines[1]);
}

#[test]
fn bootstrap_is_idempotent_across_restarts() {
    let dir = TempDir::new().expect("temp dir");
    let first = run_lines(&dir, "QUERY:SELECT COUNT(*) AS n FROM dummy_data\n");
    let second = run_lines(&dir, "QUERY:SELECT COUNT(*) AS n FROM dummy_data\n");
    let third = run_lines(&dir, "QUERY:SELECT COUNT(*) AS n FROM dummy_data\n");
    assert_eq!(first[1], r#"[{"n":5}]"#);
    assert_eq!(second[1], r#"[{"n":5}]"#);
    assert_eq!(third[1], r#"[{"n":5}]"#);
}

#[test]
fn lookup_by_id_returns_the_seeded_row() {
    let dir = TempDir::new().expect("temp dir");
    let lines = run_lines(&dir, "QUERY:SELECT name FROM dummy_data WHERE id=2\n");
    assert_eq!(lines[1], r#"[{"name":"Item Two"}]"#);
}

#[test]
fn unknown_command_is_reported_in_band() {
    let dir = TempDir::new().expect("temp dir");
    duckpipe(&dir)
        .write_stdin("PING\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "ERROR: Unknown command. Only QUERY: is supported",
        ));
}

#[test]
fn zero_row_query_answers_with_empty_array() {
    let dir = TempDir::new().expect("temp dir");
    let lines = run_lines(&dir, "QUERY:SELECT * FROM dummy_data WHERE id=99\n");
    assert_eq!(lines[1], "[]");
}

#[test]
fn invalid_sql_does_not_poison_the_connection() {
    let dir = TempDir::new().expect("temp dir");
    let lines = run_lines(
        &dir,
        "QUERY:SELECT * FROM missing_table\nQUERY:SELECT COUNT(*) AS n FROM dummy_data\n",
    );
    assert!(lines[1].starts_with("ERROR: "), "got: {}", lines[1]);
    assert_eq!(lines[2], r#"[{"n":5}]"#);
}

#[test]
fn one_response_line_per_request_line() {
    let dir = TempDir::new().expect("temp dir");
    let lines = run_lines(
        &dir,
        "QUERY:SELECT 1 AS n\nPING\nQUERY:SELECT * FROM nope\nQUERY:SELECT 2 AS n\n",
    );
    assert_eq!(lines.len(), 5);
    assert_eq!(lines[0], "READY");
    assert_eq!(lines[1], r#"[{"n":1}]"#);
    assert_eq!(lines[2], "ERROR: Unknown command. Only QUERY: is supported");
    assert!(lines[3].starts_with("ERROR: "));
    assert_eq!(lines[4], r#"[{"n":2}]"#);
}

#[test]
fn full_rows_keep_column_and_row_order() {
    let dir = TempDir::new().expect("temp dir");
    let lines = run_lines(
        &dir,
        "QUERY:SELECT id, name, value, date_created FROM dummy_data WHERE id<=2 ORDER BY id DESC\n",
    );
    assert_eq!(
        lines[1],
        concat!(
            r#"[{"id":2,"name":"Item Two","value":20.75,"date_created":"2023-02-20"},"#,
            r#"{"id":1,"name":"Item One","value":10.5,"date_created":"2023-01-15"}]"#
        )
    );
}

#[test]
fn date_values_render_as_iso_strings() {
    let dir = TempDir::new().expect("temp dir");
    let lines = run_lines(&dir, "QUERY:SELECT date_created FROM dummy_data WHERE id=1\n");
    assert_eq!(lines[1], r#"[{"date_created":"2023-01-15"}]"#);
}

#[test]
fn database_file_is_created_at_the_fixed_relative_path() {
    let dir = TempDir::new().expect("temp dir");
    run_lines(&dir, "");
    assert!(dir.path().join("mydata.db").exists());
}
