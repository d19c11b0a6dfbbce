//! Integration tests for the mpick binary.

use assert_cmd::Command;
use predicates::prelude::*;

fn mpick() -> Command {
    Command::cargo_bin("mpick").unwrap()
}

#[test]
fn exact_match_prints_only_that_model() {
    mpick()
        .arg("gpt-4")
        .assert()
        .success()
        .stdout(predicate::str::contains("Matching models for 'gpt-4':"))
        .stdout(predicate::str::contains("gpt-4\n"));
}

#[test]
fn substring_match_lists_candidates() {
    mpick()
        .arg("claude-3")
        .assert()
        .success()
        .stdout(predicate::str::contains("claude-3-opus-20240229"))
        .stdout(predicate::str::contains("claude-3-haiku-20240307"));
}

#[test]
fn misspelling_falls_back_to_close_matches() {
    mpick()
        .arg("gpt4")
        .assert()
        .success()
        .stdout(predicate::str::contains("Matching models for 'gpt4':"))
        .stdout(predicate::str::contains("gpt-4"));
}

#[test]
fn unknown_name_prints_no_matches() {
    mpick()
        .arg("zzz-unknown-model")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "No matching models found for 'zzz-unknown-model'.",
        ));
}

#[test]
fn missing_argument_exits_one() {
    mpick().assert().failure().code(1);
}

#[test]
fn extra_arguments_exit_one() {
    mpick().args(["gpt-4", "claude-2"]).assert().failure().code(1);
}

#[test]
fn help_exits_zero() {
    mpick()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Model name to look up"));
}
