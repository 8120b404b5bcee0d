//! End-to-end tests for the `deedcheck` binary.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const BAD_DEED: &str = "*** RECORDING REQ ***
Doc: DEED-TRUST-0042
County: S. Clara  |  State: CA
Date Signed: 2024-01-15
Date Recorded: 2024-01-10
Grantor:  T.E.S.L.A. Holdings LLC
Grantee:  John  &  Sarah  Connor
Amount: $1,250,000.00 (One Million Two Hundred Thousand Dollars)
APN: 992-001-XA
Status: PRELIMINARY
*** END ***";

fn good_deed() -> String {
    BAD_DEED
        .replace("Date Recorded: 2024-01-10", "Date Recorded: 2024-01-20")
        .replace("$1,250,000.00", "$1,200,000.00")
}

/// Command isolated from any per-user config file.
fn deedcheck(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("deedcheck").unwrap();
    cmd.env("XDG_CONFIG_HOME", home.path()).env("HOME", home.path());
    cmd
}

fn write(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn validate_good_deed_passes() {
    let home = TempDir::new().unwrap();
    let input = write(home.path(), "good.txt", &good_deed());

    deedcheck(&home)
        .arg("validate")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("STATUS: PASS"))
        .stdout(predicate::str::contains("County: Santa Clara"))
        .stdout(predicate::str::contains("Recorded: 5 days after signing"))
        .stdout(predicate::str::contains("Closing Cost: $14,400.00"));
}

#[test]
fn validate_bad_deed_reports_both_rules() {
    let home = TempDir::new().unwrap();
    let input = write(home.path(), "bad.txt", BAD_DEED);

    deedcheck(&home)
        .arg("validate")
        .arg(&input)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("STATUS: FAIL"))
        .stdout(predicate::str::contains("InvalidDateSequence"))
        .stdout(predicate::str::contains("AmountMismatch"));
}

#[test]
fn validate_json_output_from_stdin() {
    let home = TempDir::new().unwrap();

    let output = deedcheck(&home)
        .args(["validate", "-", "--format", "json"])
        .write_stdin(BAD_DEED)
        .assert()
        .code(1)
        .get_output()
        .stdout
        .clone();

    let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(json["passed"], false);
    assert!(json["deed"].is_null());
    assert!(json["closing_cost"].is_null());
    assert_eq!(json["errors"][0]["kind"], "InvalidDateSequence");
    assert_eq!(json["errors"][1]["kind"], "AmountMismatch");
}

#[test]
fn validate_with_tolerance_override() {
    let home = TempDir::new().unwrap();
    let raw = BAD_DEED.replace("Date Recorded: 2024-01-10", "Date Recorded: 2024-01-20");
    let input = write(home.path(), "deed.txt", &raw);

    deedcheck(&home)
        .arg("validate")
        .arg(&input)
        .args(["--tolerance", "100000"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Closing Cost: $15,000.00"));
}

#[test]
fn validate_unknown_county_fails() {
    let home = TempDir::new().unwrap();
    let input = write(
        home.path(),
        "deed.txt",
        &good_deed().replace("S. Clara", "Atlantis"),
    );

    deedcheck(&home)
        .arg("validate")
        .arg(&input)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("CountyMatch"))
        .stdout(predicate::str::contains("InvalidDateSequence").not());
}

#[test]
fn validate_json_extractor() {
    let home = TempDir::new().unwrap();
    let payload = serde_json::json!({
        "doc": "DEED-7",
        "county_raw": "San Mateo",
        "state": "CA",
        "date_signed": "2024-03-01",
        "date_recorded": "2024-03-05",
        "grantor": "A",
        "grantee": "B",
        "amount_numeric": 500000,
        "amount_words": "Five Hundred Thousand Dollars",
        "apn": "1-2-3",
        "status": "FINAL"
    });
    let input = write(home.path(), "deed.json", &payload.to_string());

    deedcheck(&home)
        .arg("validate")
        .arg(&input)
        .args(["--extractor", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("County: San Mateo"))
        .stdout(predicate::str::contains("Closing Cost: $5,500.00"));
}

#[test]
fn missing_reference_file_is_fatal() {
    let home = TempDir::new().unwrap();
    let input = write(home.path(), "good.txt", &good_deed());

    deedcheck(&home)
        .arg("validate")
        .arg(&input)
        .arg("--counties")
        .arg(home.path().join("nope.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load county reference data"));
}

#[test]
fn missing_input_file() {
    let home = TempDir::new().unwrap();

    deedcheck(&home)
        .args(["validate", "does-not-exist.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));
}

#[test]
fn batch_writes_results_and_summary() {
    let home = TempDir::new().unwrap();
    let inputs = home.path().join("scans");
    fs::create_dir(&inputs).unwrap();
    write(&inputs, "good.txt", &good_deed());
    write(&inputs, "bad.txt", BAD_DEED);
    let out = home.path().join("out");

    deedcheck(&home)
        .arg("batch")
        .arg(format!("{}/*.txt", inputs.display()))
        .arg("--output-dir")
        .arg(&out)
        .arg("--summary")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("1 passed, 1 failed"));

    let good: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(out.join("good.json")).unwrap()).unwrap();
    assert_eq!(good["passed"], true);
    assert_eq!(good["deed"]["county_canonical"], "Santa Clara");

    let summary = fs::read_to_string(out.join("summary.csv")).unwrap();
    assert_eq!(summary.lines().count(), 3);
    assert!(summary.contains("good.txt,passed"));
    assert!(summary.contains("bad.txt,failed"));
}

#[test]
fn batch_keeps_same_named_files_apart() {
    let home = TempDir::new().unwrap();
    let inputs = home.path().join("scans");
    fs::create_dir_all(inputs.join("north")).unwrap();
    fs::create_dir_all(inputs.join("south")).unwrap();
    write(&inputs.join("north"), "deed.txt", &good_deed());
    write(&inputs.join("south"), "deed.txt", BAD_DEED);
    let out = home.path().join("out");

    deedcheck(&home)
        .arg("batch")
        .arg(format!("{}/**/*.txt", inputs.display()))
        .arg("--output-dir")
        .arg(&out)
        .assert()
        .code(1);

    let north: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(out.join("north_deed.json")).unwrap()).unwrap();
    let south: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(out.join("south_deed.json")).unwrap()).unwrap();
    assert_eq!(north["passed"], true);
    assert_eq!(south["passed"], false);
}

#[test]
fn batch_without_matches_fails() {
    let home = TempDir::new().unwrap();

    deedcheck(&home)
        .arg("batch")
        .arg(format!("{}/*.txt", home.path().display()))
        .assert()
        .failure()
        .stderr(predicate::str::contains("No matching files"));
}

#[test]
fn counties_list_and_resolve() {
    let home = TempDir::new().unwrap();

    deedcheck(&home)
        .args(["counties", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Santa Clara"))
        .stdout(predicate::str::contains("San Mateo"));

    deedcheck(&home)
        .args(["counties", "resolve", "S. Clara"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Expanded:   'santa clara'"))
        .stdout(predicate::str::contains("Santa Clara"));

    deedcheck(&home)
        .args(["counties", "resolve", "Atlantis"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("could not match county 'Atlantis'"));
}

#[test]
fn config_init_set_get() {
    let home = TempDir::new().unwrap();
    let config = home.path().join("deedcheck.json");

    deedcheck(&home)
        .arg("--config")
        .arg(&config)
        .args(["config", "init"])
        .assert()
        .success();
    assert!(config.exists());

    deedcheck(&home)
        .arg("--config")
        .arg(&config)
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    deedcheck(&home)
        .arg("--config")
        .arg(&config)
        .args(["config", "set", "validation.county_match_threshold", "0.9"])
        .assert()
        .success();

    deedcheck(&home)
        .arg("--config")
        .arg(&config)
        .args(["config", "get", "validation.county_match_threshold"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0.9"));

    deedcheck(&home)
        .arg("--config")
        .arg(&config)
        .args(["config", "set", "validation.county_match_threshold", "3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("county_match_threshold"));

    deedcheck(&home)
        .arg("--config")
        .arg(&config)
        .args(["config", "get", "validation.nope"])
        .assert()
        .failure();
}
