use assert_cmd::Command;

#[test]
fn test_interactive_mode_help() {
    // Interactive mode needs a terminal, so only check that the command exists
    let mut cmd = Command::cargo_bin("metrum").unwrap();
    cmd.arg("interactive").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicates::str::contains("Resolve expressions typed at a prompt"));
}
