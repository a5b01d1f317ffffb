use assert_cmd::Command;

#[test]
fn help_exits_cleanly() {
    Command::cargo_bin("verso")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicates::str::contains("--group"));
}

#[test]
fn unknown_flags_are_usage_errors() {
    Command::cargo_bin("verso")
        .unwrap()
        .arg("--no-such-flag")
        .assert()
        .failure()
        .code(2);
}

#[test]
fn invalid_group_is_a_startup_error() {
    Command::cargo_bin("verso")
        .unwrap()
        .args(["--group", "nightly"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicates::str::contains("unknown group"));
}
