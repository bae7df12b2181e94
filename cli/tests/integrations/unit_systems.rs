use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn metrum() -> Command {
    Command::cargo_bin("metrum").unwrap()
}

#[test]
fn test_cli_units_file() {
    let temp_dir = TempDir::new().unwrap();
    let units_file = temp_dir.path().join("mechanics.json");
    fs::write(
        &units_file,
        r#"{"units": {"N": [["kg", 1], ["m", 1], ["s", -2]], "J": [["N", 1], ["m", 1]]}}"#,
    )
    .unwrap();

    metrum()
        .arg("--units")
        .arg(&units_file)
        .arg("check")
        .arg("J / s")
        .arg("kg m^2 s^-3")
        .assert()
        .success();
}

#[test]
fn test_cli_dir_loads_only_unit_system_files() {
    let temp_dir = TempDir::new().unwrap();
    let nested = temp_dir.path().join("nested");
    fs::create_dir(&nested).unwrap();
    fs::write(
        nested.join("force.units.json"),
        r#"{"units": {"N": [["kg", 1], ["m", 1], ["s", -2]]}}"#,
    )
    .unwrap();
    fs::write(temp_dir.path().join("notes.json"), "not a unit system").unwrap();

    metrum()
        .arg("list")
        .arg("--dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("kg m s^-2"))
        .stdout(predicate::str::contains("12 unit(s)"));
}

#[test]
fn test_cli_validate_reports_cycles() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("broken.units.json"),
        r#"{"units": {"a": "b", "b": "a", "c": [["a", 2]], "d": "nowhere"}}"#,
    )
    .unwrap();

    metrum()
        .arg("--no-default-units")
        .arg("--dir")
        .arg(temp_dir.path())
        .arg("validate")
        .assert()
        .failure()
        .stdout(predicate::str::contains("Circular definitions"))
        .stdout(predicate::str::contains("  c\n"))
        .stdout(predicate::str::contains("nowhere"));
}

#[test]
fn test_cli_cycle_in_expression() {
    let temp_dir = TempDir::new().unwrap();
    let units_file = temp_dir.path().join("loop.json");
    fs::write(&units_file, r#"{"units": {"a": "b", "b": "a"}}"#).unwrap();

    metrum()
        .arg("--units")
        .arg(&units_file)
        .arg("parse")
        .arg("--plain")
        .arg("kg a")
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "kg a<<Units include circular references>>",
        ));
}

#[test]
fn test_cli_invalid_units_file() {
    let temp_dir = TempDir::new().unwrap();
    let units_file = temp_dir.path().join("bad.json");
    fs::write(&units_file, r#"{"unit": {}}"#).unwrap();

    metrum()
        .arg("--units")
        .arg(&units_file)
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unit system error"));
}

#[test]
fn test_cli_missing_units_file() {
    metrum()
        .arg("--units")
        .arg("/definitely/not/here.json")
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read"));
}

#[test]
fn test_cli_messages_file() {
    let temp_dir = TempDir::new().unwrap();
    let messages_file = temp_dir.path().join("nl.json");
    fs::write(&messages_file, r#"{"Number_is_required": "Getal vereist"}"#).unwrap();

    metrum()
        .arg("--messages")
        .arg(&messages_file)
        .arg("parse")
        .arg("--plain")
        .arg("s^")
        .assert()
        .failure()
        .stderr(predicate::str::contains("s^^<<Getal vereist>>"));
}
