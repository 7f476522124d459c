mod common;

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::{contains, is_match};
use tempfile::TempDir;

const BIN_NAME: &str = "results_core_cli";

/// Runs the binary against an isolated data directory with colour and log
/// filters pinned.
fn cli(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin(BIN_NAME).expect("binary exists");
    cmd.env("RESULTS_CORE_HOME", home.path())
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG");
    cmd
}

fn results_file(home: &TempDir) -> std::path::PathBuf {
    let path = home.path().join("results.json");
    fs::write(&path, common::RESULTS_JSON).expect("write results");
    path
}

#[test]
fn help_lists_commands() {
    let home = TempDir::new().unwrap();
    cli(&home)
        .arg("help")
        .assert()
        .success()
        .stdout(contains("Available commands").and(contains("report")).and(contains("quote")));
}

#[test]
fn no_arguments_prints_overview() {
    let home = TempDir::new().unwrap();
    cli(&home)
        .assert()
        .success()
        .stdout(contains("Available commands"));
}

#[test]
fn version_prints_package_version() {
    let home = TempDir::new().unwrap();
    cli(&home)
        .arg("version")
        .assert()
        .success()
        .stdout(contains(format!("Results Core {}", env!("CARGO_PKG_VERSION"))));
}

#[test]
fn range_prints_present_label() {
    let home = TempDir::new().unwrap();
    cli(&home)
        .args(["range", "30d"])
        .assert()
        .success()
        .stdout(is_match(r"\d{2} [A-Z][a-z]{2} \d{4} - Present").unwrap());
}

#[test]
fn unknown_range_warns_and_uses_all_time() {
    let home = TempDir::new().unwrap();
    cli(&home)
        .args(["range", "fortnight"])
        .assert()
        .success()
        .stdout(contains("All Time"))
        .stderr(contains("unrecognised date range"));
}

#[test]
fn unknown_command_suggests_nearest() {
    let home = TempDir::new().unwrap();
    cli(&home)
        .arg("rnage")
        .assert()
        .failure()
        .stderr(contains("unknown command `rnage`").and(contains("did you mean `range`?")));
}

#[test]
fn quote_uses_default_plan_price() {
    let home = TempDir::new().unwrap();
    cli(&home)
        .args(["quote", "monthly"])
        .assert()
        .success()
        .stdout(contains("monthly: £30.00"));
}

#[test]
fn quote_accepts_explicit_base_price() {
    let home = TempDir::new().unwrap();
    cli(&home)
        .args(["quote", "prod_bsp_lays", "--base", "12.5"])
        .assert()
        .success()
        .stdout(contains("prod_bsp_lays: £12.50"));
}

#[test]
fn quote_rejects_unknown_product() {
    let home = TempDir::new().unwrap();
    cli(&home)
        .args(["quote", "lifetime"])
        .assert()
        .failure()
        .stderr(contains("unknown product `lifetime`"));
}

#[test]
fn report_prints_headline_and_tables() {
    let home = TempDir::new().unwrap();
    let path = results_file(&home);
    cli(&home)
        .arg("report")
        .arg(&path)
        .args(["--range", "all"])
        .assert()
        .success()
        .stdout(
            contains("All Time: 3 bets, 1 wins, P/L £34.00")
                .and(contains("Monthly P/L"))
                .and(contains("2023-11"))
                .and(contains("All Odds")),
        );
}

#[test]
fn report_json_is_machine_readable() {
    let home = TempDir::new().unwrap();
    let path = results_file(&home);
    let output = cli(&home)
        .arg("report")
        .arg(&path)
        .arg("--json")
        .output()
        .expect("run report");
    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json stdout");
    assert_eq!(report["cumulative"].as_array().map(Vec::len), Some(3));
    assert_eq!(report["range"]["label"], "All Time");
}

#[test]
fn report_out_writes_file() {
    let home = TempDir::new().unwrap();
    let path = results_file(&home);
    let out = home.path().join("report.json");
    cli(&home)
        .arg("report")
        .arg(&path)
        .args(["--view", "bands", "--out"])
        .arg(&out)
        .assert()
        .success()
        .stdout(contains("Report written to").and(contains("Odds ranges")));
    let saved = fs::read_to_string(&out).expect("report saved");
    assert!(saved.contains("\"by_band\""));
}

#[test]
fn report_rejects_unknown_view() {
    let home = TempDir::new().unwrap();
    let path = results_file(&home);
    cli(&home)
        .arg("report")
        .arg(&path)
        .args(["--view", "pie"])
        .assert()
        .failure()
        .stderr(contains("unknown view `pie`"));
}

#[test]
fn report_on_missing_file_fails() {
    let home = TempDir::new().unwrap();
    cli(&home)
        .args(["report", "does-not-exist.json"])
        .assert()
        .failure()
        .stderr(contains("ERROR:"));
}

#[test]
fn config_init_then_show() {
    let home = TempDir::new().unwrap();
    cli(&home)
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(contains("Configuration written to"));
    assert!(home.path().join("config.json").exists());
    cli(&home)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(contains("\"odds_bands\"").and(contains("\"monthly_layout\"")));
}

#[test]
fn plans_lists_tiers_and_systems() {
    let home = TempDir::new().unwrap();
    cli(&home)
        .arg("plans")
        .assert()
        .success()
        .stdout(contains("Quarterly").and(contains("£80.00")).and(contains("BSP Lays")));
}

#[test]
fn report_json_with_out_keeps_stdout_parseable() {
    let home = TempDir::new().unwrap();
    let path = results_file(&home);
    let out = home.path().join("report.json");
    let output = cli(&home)
        .arg("report")
        .arg(&path)
        .args(["--json", "--out"])
        .arg(&out)
        .output()
        .expect("run report");
    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json stdout");
    assert_eq!(report["cumulative"].as_array().map(Vec::len), Some(3));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Report written to"));
    assert!(out.exists());
}

#[test]
fn report_tolerates_null_and_missing_odds() {
    let home = TempDir::new().unwrap();
    let path = home.path().join("results.json");
    fs::write(
        &path,
        r#"[
            {"date": "2024-05-01", "result": "won", "bsp": 6.0, "stake": 10, "profit_loss": 50},
            {"date": "2024-05-02", "result": "lost", "bsp": null, "stake": 10, "profit_loss": -10},
            {"date": "2024-05-03", "result": "lost", "stake": 10, "profit_loss": -10}
        ]"#,
    )
    .unwrap();
    let output = cli(&home)
        .arg("report")
        .arg(&path)
        .arg("--json")
        .output()
        .expect("run report");
    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json stdout");
    let all_odds = report["by_band"]
        .as_array()
        .and_then(|bands| bands.iter().find(|band| band["label"] == "All Odds"))
        .expect("all odds band");
    assert_eq!(all_odds["bets"], 3);
    assert_eq!(all_odds["avg_odds"].as_f64(), Some(6.0));
}

#[test]
fn report_names_the_bad_field() {
    let home = TempDir::new().unwrap();
    let path = home.path().join("results.json");
    fs::write(&path, r#"[{"date": "2024-05-01", "result": "won", "stake": 10}]"#).unwrap();
    cli(&home)
        .arg("report")
        .arg(&path)
        .assert()
        .failure()
        .stderr(contains("missing field `pl`"));
}

#[test]
fn quote_shows_promotion_label() {
    let home = TempDir::new().unwrap();
    fs::write(
        home.path().join("config.json"),
        r#"{
            "promotions": [{
                "id": "launch",
                "products": ["monthly"],
                "discount_percent": 10,
                "starts_at": "2000-01-01T00:00:00Z",
                "label": "Launch offer"
            }]
        }"#,
    )
    .unwrap();
    cli(&home)
        .args(["quote", "monthly"])
        .assert()
        .success()
        .stdout(contains("monthly: £27.00").and(contains("Launch offer")));
}
