//! Integration tests for general CLI behavior

use predicates::prelude::*;

use crate::helpers::Sandbox;

// ============================================================================
// Help Output Tests
// ============================================================================

#[test]
fn help_lists_subcommands() {
    let mut assert = Sandbox::new().command().arg("--help").assert().success();
    for command in ["play", "read", "capture", "table", "config", "completions"] {
        assert = assert.stdout(predicate::str::contains(command));
    }
}

#[test]
fn play_help_shows_playback_flags() {
    let flags = ["--device", "--baud", "--interval-ms", "--initial-delay-ms", "--plain", "--json"];
    let expected = flags
        .iter()
        .fold(predicate::str::contains("<TEXT>").boxed(), |all, flag| {
            all.and(predicate::str::contains(*flag)).boxed()
        });

    Sandbox::new()
        .command()
        .args(["play", "--help"])
        .assert()
        .success()
        .stdout(expected);
}

#[test]
fn version_is_printed() {
    Sandbox::new()
        .command()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("braille-reader "));
}

// ============================================================================
// Usage Errors
// ============================================================================

#[test]
fn play_without_text_is_usage_error() {
    Sandbox::new()
        .command()
        .arg("play")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("<TEXT>"));
}

#[test]
fn unknown_subcommand_is_usage_error() {
    Sandbox::new().command().arg("scan").assert().code(2);
}

// ============================================================================
// Table and Completions
// ============================================================================

#[test]
fn table_prints_every_symbol() {
    let out = Sandbox::new().run(&["table"]);

    assert_eq!(out.code, 0);
    assert!(out.stdout.contains("A      ⠁     1"));
    assert!(out.stdout.contains("Z      ⠵     1,3,5,6"));
    assert!(out.stdout.contains("space  ⠀     -"));
    assert_eq!(out.stdout.lines().count(), 38);
}

#[test]
fn table_cells_draws_dot_grids() {
    Sandbox::new()
        .command()
        .args(["table", "--cells"])
        .assert()
        .success()
        .stdout(predicate::str::contains("●").and(predicate::str::contains("○")));
}

#[test]
fn completions_for_bash() {
    Sandbox::new()
        .command()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("braille-reader"));
}
