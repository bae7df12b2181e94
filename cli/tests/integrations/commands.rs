use assert_cmd::Command;
use predicates::prelude::*;

fn metrum() -> Command {
    Command::cargo_bin("metrum").unwrap()
}

#[test]
fn test_cli_parse_with_si_units() {
    metrum()
        .arg("parse")
        .arg("m/s^2")
        .assert()
        .success()
        .stdout("SI.metre SI.second⁻²\n");
}

#[test]
fn test_cli_parse_without_default_units() {
    metrum()
        .arg("--no-default-units")
        .arg("parse")
        .arg("kg m / s^2")
        .assert()
        .success()
        .stdout("kg m s⁻²\n");
}

#[test]
fn test_cli_parse_dimensionless() {
    metrum()
        .arg("parse")
        .arg("1")
        .assert()
        .success()
        .stdout("1\n");
}

#[test]
fn test_cli_parse_failure_shows_diagnostic() {
    metrum()
        .arg("parse")
        .arg("s^")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid units: s^"))
        .stderr(predicate::str::contains("Number is required"))
        .stderr(predicate::str::contains("Number_is_required"));
}

#[test]
fn test_cli_parse_plain() {
    metrum()
        .arg("parse")
        .arg("--plain")
        .arg("m/s/s")
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Invalid units: m/s^<<End of source is required>>/s",
        ));
}

#[test]
fn test_cli_parse_json() {
    let output = metrum()
        .arg("parse")
        .arg("--json")
        .arg("kg m^2")
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["ok"], true);
    assert_eq!(json["units"]["SI.kilogram"], 1);
    assert_eq!(json["units"]["SI.metre"], 2);
    assert_eq!(json["diagnostics"].as_array().map(Vec::len), Some(0));
}

#[test]
fn test_cli_parse_json_failure() {
    let output = metrum()
        .arg("parse")
        .arg("--json")
        .arg("m s^")
        .output()
        .unwrap();
    assert!(!output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["ok"], false);
    assert_eq!(json["diagnostics"][0]["id"], "Number_is_required");
    assert_eq!(json["diagnostics"][0]["span"]["start"], 4);
}

#[test]
fn test_cli_check_equal() {
    metrum()
        .arg("check")
        .arg("metre / second")
        .arg("m s^-1")
        .assert()
        .success()
        .stdout(predicate::str::contains("have the same dimensions"))
        .stdout(predicate::str::contains("SI.metre SI.second⁻¹"));
}

#[test]
fn test_cli_check_different() {
    metrum()
        .arg("check")
        .arg("m")
        .arg("s")
        .assert()
        .failure()
        .stdout(predicate::str::contains("differ"))
        .stdout(predicate::str::contains("m: SI.metre"))
        .stdout(predicate::str::contains("s: SI.second"));
}

#[test]
fn test_cli_check_invalid_expression() {
    metrum()
        .arg("check")
        .arg("m")
        .arg("kg-2")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Exponent symbol ( ^ ) is required"));
}

#[test]
fn test_cli_list_default_units() {
    metrum()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("SI.metre"))
        .stdout(predicate::str::contains("alias"))
        .stdout(predicate::str::contains("11 unit(s)"));
}

#[test]
fn test_cli_list_empty() {
    metrum()
        .arg("list")
        .arg("--no-default-units")
        .assert()
        .success()
        .stdout(predicate::str::contains("No units loaded"));
}

#[test]
fn test_cli_validate_default_units() {
    metrum()
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("No circular definitions"));
}

#[test]
fn test_cli_source_length_limit() {
    metrum()
        .arg("parse")
        .arg("m ".repeat(600))
        .assert()
        .failure()
        .stderr(predicate::str::contains("max_source_chars"));
}
