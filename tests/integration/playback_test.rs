//! Integration tests for `play` in line-output mode

use crate::helpers::{as_strs, fast, Sandbox};

#[test]
fn play_prints_each_character_then_completes() {
    let out = Sandbox::new().run(&as_strs(&fast(&["play", "Hi!"])));

    assert_eq!(out.code, 0, "stderr: {}", out.stderr);
    let lines: Vec<&str> = out.stdout.lines().collect();
    assert_eq!(
        lines,
        vec![
            "Loaded 2 character(s).",
            "[1/2] H ⠓ dots: 1,2,5",
            "[2/2] I ⠊ dots: 2,4",
            "Braille text completed.",
        ]
    );
}

#[test]
fn play_keeps_spaces_and_zero() {
    let out = Sandbox::new().run(&as_strs(&fast(&["play", "a 0"])));

    assert_eq!(out.code, 0);
    assert!(out.stdout.contains("[2/3] space ⠀ dots: none"));
    assert!(out.stdout.contains("[3/3] 0 ⠀ dots: none"));
}

#[test]
fn play_json_emits_event_lines() {
    let mut args = fast(&["play", "ab"]);
    args.push("--json".to_string());
    let out = Sandbox::new().run(&as_strs(&args));

    assert_eq!(out.code, 0);
    let events: Vec<serde_json::Value> = out
        .stdout
        .lines()
        .map(|line| serde_json::from_str(line).expect("each line is JSON"))
        .collect();
    assert_eq!(events.len(), 4);
    assert_eq!(events[0]["event"], "loaded");
    assert_eq!(events[0]["total"], 2);
    assert_eq!(events[1]["event"], "character_shown");
    assert_eq!(events[1]["character"], "A");
    assert_eq!(events[1]["index"], 1);
    assert_eq!(events[2]["character"], "B");
    assert_eq!(events[3]["event"], "completed");
}

#[test]
fn hold_last_still_completes() {
    let mut args = fast(&["play", "x"]);
    args.push("--hold-last".to_string());
    let out = Sandbox::new().run(&as_strs(&args));

    assert_eq!(out.code, 0);
    assert!(out.stdout.ends_with("Braille text completed.\n"));
}

#[test]
fn only_symbols_reports_no_valid_text() {
    let out = Sandbox::new().run(&as_strs(&fast(&["play", "@@@"])));

    assert_eq!(out.code, 1);
    assert!(out.stdout.is_empty());
    assert!(out.stderr.contains("No supported characters"));
    assert!(out.stderr.contains("Only letters, digits and spaces"));
}

#[test]
fn blank_text_reports_no_text() {
    let out = Sandbox::new().run(&as_strs(&fast(&["play", "   "])));

    assert_eq!(out.code, 1);
    assert!(out.stderr.contains("No text detected"));
}

#[test]
fn timing_comes_from_config() {
    let sandbox = Sandbox::new();
    sandbox.write_config("[playback]\ninitial_delay_ms = 0\nchar_interval_ms = 1\n");

    let out = sandbox.run(&["play", "ok", "--plain"]);
    assert_eq!(out.code, 0);
    assert!(out.stdout.contains("[2/2] K"));
}

#[test]
fn invalid_config_is_runtime_error() {
    let sandbox = Sandbox::new();
    sandbox.write_config("[playback\n");

    let out = sandbox.run(&as_strs(&fast(&["play", "ok"])));
    assert_eq!(out.code, 1);
    assert!(out.stderr.contains("Invalid config"));
}

// ============================================================================
// Actuator
// ============================================================================

#[cfg(unix)]
#[test]
fn actuator_receives_characters_and_clears() {
    let sandbox = Sandbox::new();
    let device = sandbox.path().join("tty");
    std::fs::write(&device, b"").unwrap();

    let mut args = fast(&["play", "Hi"]);
    args.extend(["--device".to_string(), device.display().to_string()]);
    let out = sandbox.run(&as_strs(&args));

    assert_eq!(out.code, 0, "stderr: {}", out.stderr);
    // connect clear, H, I, end-of-sequence clear, disconnect clear
    assert_eq!(std::fs::read_to_string(&device).unwrap(), "0HI00");
}

#[test]
fn missing_actuator_does_not_stop_playback() {
    let sandbox = Sandbox::new();
    let device = sandbox.path().join("no-such-tty");

    let mut args = fast(&["play", "Hi"]);
    args.extend(["--device".to_string(), device.display().to_string()]);
    let out = sandbox.run(&as_strs(&args));

    assert_eq!(out.code, 0);
    assert!(out.stderr.contains("Actuator unavailable"));
    assert!(out.stdout.contains("Braille text completed."));
}
