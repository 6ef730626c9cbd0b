//! Command-line tests for the `extrema` binary.

use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Builds the command with an empty config directory and no EXTREMA_*
/// variables leaking in from the environment.
fn extrema(config_home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("extrema").unwrap();
    cmd.env("XDG_CONFIG_HOME", config_home.path())
        .env("HOME", config_home.path())
        .env_remove("RUST_LOG");
    for key in [
        "EXTREMA_EXPR",
        "EXTREMA_EXPECTED",
        "EXTREMA_KIND",
        "EXTREMA_START",
        "EXTREMA_END",
        "EXTREMA_STEP",
        "EXTREMA_PREC",
        "EXTREMA_NEWTON_PREC",
        "EXTREMA_CLASSIFIER_PREC",
        "EXTREMA_MAX_ITERS",
        "EXTREMA_NEWTON_MAX_ITERS",
        "EXTREMA_SEED",
        "EXTREMA_CONFIG",
    ] {
        cmd.env_remove(key);
    }
    cmd
}

#[test]
fn root_prints_newton_root() {
    let home = TempDir::new().unwrap();
    extrema(&home)
        .args(["root", "--expr", "x^3 + 4096", "--guess", "5", "-f", "minimal"])
        .assert()
        .success()
        .stdout(predicate::str::contains("-16.0000000000"));
}

#[test]
fn root_table_output() {
    let home = TempDir::new().unwrap();
    extrema(&home)
        .args(["root", "--expr", "x - 7", "--guess", "-3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Newton Root"))
        .stdout(predicate::str::contains("7.0000000000"));
}

#[test]
fn root_without_real_root_fails() {
    let home = TempDir::new().unwrap();
    extrema(&home)
        .args(["root", "--expr", "x^2 + 1", "--guess", "2.5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Max iterations exceeded"));
}

#[test]
fn classify_quartic_minimum() {
    let home = TempDir::new().unwrap();
    extrema(&home)
        .args(["classify", "--expr", "x^4", "--at", "0", "-f", "minimal"])
        .assert()
        .success()
        .stdout(predicate::str::diff("minimum\n"));
}

#[test]
fn classify_json_output() {
    let home = TempDir::new().unwrap();
    let output = extrema(&home)
        .args(["classify", "--expr", "x^3", "--at", "0", "-f", "json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["Kind"], "inflection");
}

#[test]
fn classify_non_critical_point_fails() {
    let home = TempDir::new().unwrap();
    extrema(&home)
        .args(["classify", "--expr", "x", "--at", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not an extremum"));
}

#[test]
fn extremum_deflates_to_minimum() {
    let home = TempDir::new().unwrap();
    extrema(&home)
        .args([
            "extremum", "--expr", "x^4 - x^2", "--kind", "minimum", "--guess", "0.2", "-f",
            "minimal",
        ])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("0.70710678"));
}

#[test]
fn ranges_parabola_fully_convergent() {
    let home = TempDir::new().unwrap();
    extrema(&home)
        .args([
            "ranges",
            "--expr",
            "-(x - 1)^2",
            "--expected",
            "1",
            "--kind",
            "maximum",
            "--start",
            "-6",
            "--end",
            "6",
            "--step",
            "0.05",
            "--seed",
            "3",
            "-f",
            "minimal",
        ])
        .assert()
        .success()
        .stdout(predicate::str::diff("100.00%\n"));
}

#[test]
fn ranges_table_reports_total() {
    let home = TempDir::new().unwrap();
    extrema(&home)
        .args([
            "ranges", "-e", "x^2", "-x", "0", "-s", "-2", "-E", "2", "--step", "0.1", "--seed",
            "5",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("total correct ranges"));
}

#[test]
fn ranges_json_report() {
    let home = TempDir::new().unwrap();
    let output = extrema(&home)
        .args([
            "ranges", "-e", "-(x - 1)^2", "-x", "1", "-k", "maximum", "-s", "-6", "-E", "6",
            "--step", "0.05", "--seed", "11", "-f", "json",
        ])
        .output()
        .unwrap();

    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["kind"], "maximum");
    assert_eq!(report["ranges"].as_array().unwrap().len(), 1);
    assert_eq!(report["total_share"].as_f64().unwrap(), 1.0);
}

#[test]
fn ranges_csv_rows() {
    let home = TempDir::new().unwrap();
    extrema(&home)
        .args([
            "ranges", "-e", "-(x - 1)^2", "-x", "1", "-k", "maximum", "-s", "-6", "-E", "6",
            "--step", "0.05", "--seed", "4", "-f", "csv",
        ])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("share,start,end\n"))
        .stdout(predicate::str::contains("100.00%"));
}

#[test]
fn ranges_without_convergence_reports_zero() {
    let home = TempDir::new().unwrap();
    let output = extrema(&home)
        .args([
            "ranges", "-e", "-(x - 1)^2", "-x", "2", "-k", "maximum", "-s", "-6", "-E", "6",
            "--step", "0.05", "--seed", "4", "-f", "json",
        ])
        .output()
        .unwrap();

    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let total = report["total_share"].as_f64().unwrap();
    assert_eq!(total, 0.0);
    assert!(total.is_sign_positive());
}

#[test]
fn ranges_rejects_step_that_cannot_advance() {
    let home = TempDir::new().unwrap();
    extrema(&home)
        .args([
            "ranges", "-e", "x^2", "-x", "0", "-s", "1e17", "-E", "2e17", "--step", "0.01",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("too small to advance"));
}

#[test]
fn ranges_rejects_oversized_scan() {
    let home = TempDir::new().unwrap();
    extrema(&home)
        .args(["ranges", "-e", "x^2", "-x", "0", "--step", "1e-12"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("more than"));
}

#[test]
fn ranges_reads_settings_file() {
    let home = TempDir::new().unwrap();
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        "expr = \"-(x - 1)^2\"\nexpected = 1.0\nkind = \"maximum\"\nstart = -6.0\nend = 6.0\nstep = 0.05\nseed = 1"
    )
    .unwrap();

    extrema(&home)
        .args(["ranges", "-f", "minimal", "--config"])
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::diff("100.00%\n"));
}

#[test]
fn ranges_flag_overrides_settings_file() {
    let home = TempDir::new().unwrap();
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        "expr = \"-(x - 1)^2\"\nexpected = 1.0\nkind = \"maximum\"\nstart = -6.0\nend = 6.0\nstep = 0.05\nseed = 1"
    )
    .unwrap();

    // the parabola has no maximum at 2
    extrema(&home)
        .args(["ranges", "-f", "minimal", "--expected", "2", "--config"])
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::diff("0.00%\n"));
}

#[test]
fn ranges_reads_default_settings_location() {
    let home = TempDir::new().unwrap();
    let dir = home.path().join("extrema");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(
        dir.join("ranges.toml"),
        "expr = \"-(x - 1)^2\"\nexpected = 1.0\nkind = \"maximum\"\nstart = -6.0\nend = 6.0\nstep = 0.05\nseed = 2\n",
    )
    .unwrap();

    extrema(&home)
        .args(["ranges", "-f", "minimal"])
        .assert()
        .success()
        .stdout(predicate::str::diff("100.00%\n"));
}

#[test]
fn ranges_missing_expected_fails() {
    let home = TempDir::new().unwrap();
    extrema(&home)
        .args(["ranges", "--expr", "x^2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Missing required setting: expected"));
}

#[test]
fn ranges_precision_from_environment() {
    let home = TempDir::new().unwrap();
    extrema(&home)
        .env("EXTREMA_PREC", "0")
        .args(["ranges", "--expr", "x^2", "--expected", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("prec must be finite and positive"));
}

#[test]
fn invalid_expression_fails() {
    let home = TempDir::new().unwrap();
    extrema(&home)
        .args(["root", "--expr", "x + * 2", "--guess", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid expression at offset 4"));
}
