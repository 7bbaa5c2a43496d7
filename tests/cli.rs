// ABOUTME: Integration tests for the azrollout CLI binary.
// ABOUTME: Validates --help output and configuration failure exit codes.

use assert_cmd::Command;
use predicates::prelude::*;

fn azrollout_cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("azrollout"))
}

#[test]
fn help_describes_the_tool() {
    azrollout_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("last-known-good"))
        .stdout(predicate::str::contains("AZURE_RESOURCE_GROUP"));
}

#[test]
fn missing_configuration_exits_one_without_platform_calls() {
    azrollout_cmd()
        .env_clear()
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains(
            "missing required environment variable",
        ));
}

#[test]
fn missing_tag_is_named_in_the_error() {
    azrollout_cmd()
        .env_clear()
        .env("AZURE_RESOURCE_GROUP", "rg-prod")
        .env("AZURE_APP_NAME", "demo-backend")
        .env("AZURE_ACR_NAME", "demoacr")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("NEW_IMAGE_TAG"));
}
