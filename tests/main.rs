
use assert_cmd::Command;
use predicates::prelude::*;
use team_gate::PKG_VERSION;

#[test]
fn its_executable() {
    let mut cmd = Command::cargo_bin("team-gate").unwrap();
    let result = cmd.arg("--version").assert().success();
    result.stdout(predicate::str::contains(PKG_VERSION));
}

#[test]
fn it_documents_every_input() {
    let mut cmd = Command::cargo_bin("team-gate").unwrap();
    let result = cmd.arg("--help").assert().success();
    result.stdout(
        predicate::str::contains("--github-token")
            .and(predicate::str::contains("--organization"))
            .and(predicate::str::contains("--username"))
            .and(predicate::str::contains("--team"))
            .and(predicate::str::contains("--validate-subscription")),
    );
}
