use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const BATCH: &str = r#"
[batch]
name = "textbook"
description = "Classic initial-solution exercises"

[solver]
method = "vam"

[[problems]]
name = "balanced"
supply = "20,30,25"
demand = "10,25,40"
costs = """
8,6,10
9,12,13
14,9,16
"""
method = "least_cost"

[[problems]]
name = "blocked"
supply = "5,5"
demand = "5,5"
costs = "1,inf\ninf,inf"

[[problems]]
name = "vogel"
supply = "7,9,18"
demand = "5,8,7,14"
costs = "19,30,50,10\n70,30,40,60\n40,8,70,20"

[[problems]]
name = "skipped"
enabled = false
supply = "1"
demand = "1"
costs = "1"
"#;

fn write_batch(dir: &TempDir, body: &str) -> String {
    let path = dir.path().join("problems.toml");
    fs::write(&path, body).unwrap();
    path.to_str().unwrap().to_string()
}

fn toml_solve() -> Command {
    cargo_bin_cmd!("toml-solve")
}

#[test]
fn test_batch_continues_past_failures() {
    let dir = TempDir::new().unwrap();
    let summary_path = dir.path().join("summary.json");
    let body = format!(
        "{}\n[error_handling]\non_failure = \"continue\"\n\n[output]\nsummary_path = \"{}\"\n",
        BATCH,
        summary_path.display()
    );
    let config = write_batch(&dir, &body);

    toml_solve().args(["--config", &config]).assert().code(2);

    let summary: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&summary_path).unwrap()).unwrap();
    assert_eq!(summary["batch"], "textbook");
    assert_eq!(summary["total_problems"], 3);
    assert_eq!(summary["solved"], 2);
    assert_eq!(summary["failed"], 1);
    assert_eq!(summary["total_cost"], 835.0 + 779.0);

    let results = summary["results"].as_array().unwrap();
    assert_eq!(results[0]["name"], "balanced");
    assert_eq!(results[0]["method"], "least_cost");
    assert_eq!(results[1]["kind"], "infeasible");
    assert_eq!(results[2]["method"], "vam");
}

#[test]
fn test_batch_stops_on_first_failure_by_default() {
    let dir = TempDir::new().unwrap();
    let config = write_batch(&dir, BATCH);

    let output = toml_solve()
        .args(["--config", &config])
        .assert()
        .code(2)
        .get_output()
        .stdout
        .clone();

    let summary: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(summary["total_problems"], 2);
    assert_eq!(summary["solved"], 1);
}

#[test]
fn test_dry_run_lists_problems() {
    let dir = TempDir::new().unwrap();
    let config = write_batch(&dir, BATCH);

    toml_solve()
        .args(["--config", &config, "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Batch: textbook"))
        .stdout(predicate::str::contains("balanced [enabled] method=least_cost"))
        .stdout(predicate::str::contains("skipped [disabled]"));
}

#[test]
fn test_method_override_is_validated() {
    let dir = TempDir::new().unwrap();
    let config = write_batch(&dir, BATCH);

    toml_solve()
        .args(["--config", &config, "--method", "simplex"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("simplex"));
}

#[test]
fn test_missing_config_file() {
    toml_solve()
        .args(["--config", "does-not-exist.toml"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to load config file"));
}
