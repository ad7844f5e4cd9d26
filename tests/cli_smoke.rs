use assert_cmd::Command;
use predicates::str::contains;

#[test]
fn todo_help_works() {
    Command::cargo_bin("todo")
        .expect("binary")
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("personal task tracker"))
        .stdout(contains("Add global task"))
        .stdout(contains("Search for a task in local tasks"));
}

#[test]
fn bad_priority_is_a_usage_error() {
    Command::cargo_bin("todo")
        .expect("binary")
        .args(["-al", "x", "-p", "high"])
        .assert()
        .failure();
}
