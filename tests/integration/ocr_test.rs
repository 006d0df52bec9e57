//! Integration tests for `read` and `capture` with stand-in tools

#![cfg(unix)]

use predicates::prelude::*;

use crate::helpers::{as_strs, fast, Sandbox};

/// Sandbox whose OCR engine prints `text`.
fn with_ocr(text: &str) -> Sandbox {
    let sandbox = Sandbox::new();
    let ocr = sandbox.script("fake-ocr", &format!("printf '%s\\n' '{}'", text));
    sandbox.write_config(&format!("[ocr]\ncommand = \"{}\"\n", ocr.display()));
    sandbox
}

fn image(sandbox: &Sandbox) -> String {
    let path = sandbox.path().join("photo.png");
    std::fs::write(&path, b"png").unwrap();
    path.display().to_string()
}

#[test]
fn read_plays_recognized_text() {
    let sandbox = with_ocr("No. 1!");
    let image = image(&sandbox);

    let out = sandbox.run(&as_strs(&fast(&["read", &image])));
    assert_eq!(out.code, 0, "stderr: {}", out.stderr);
    assert!(out.stdout.contains("Loaded 4 character(s)."));
    assert!(out.stdout.contains("[4/4] 1 ⠁ dots: 1"));
}

#[test]
fn read_reports_progress_on_stderr() {
    let sandbox = with_ocr("ok");
    let image = image(&sandbox);

    sandbox
        .command()
        .args(fast(&["read", &image]))
        .assert()
        .success()
        .stderr(predicate::str::contains("busy: Recognizing text in"));
}

#[test]
fn read_with_empty_ocr_output_reports_no_text() {
    let sandbox = with_ocr("");
    let image = image(&sandbox);

    let out = sandbox.run(&as_strs(&fast(&["read", &image])));
    assert_eq!(out.code, 1);
    assert!(out.stderr.contains("No text detected"));
}

#[test]
fn read_missing_image_fails() {
    let sandbox = with_ocr("HELLO");
    let missing = sandbox.path().join("nope.png").display().to_string();

    let out = sandbox.run(&as_strs(&fast(&["read", &missing])));
    assert_eq!(out.code, 1);
    assert!(out.stderr.contains("Image not found"));
}

#[test]
fn read_without_engine_fails() {
    let sandbox = Sandbox::new();
    let missing = sandbox.path().join("no-tesseract");
    sandbox.write_config(&format!("[ocr]\ncommand = \"{}\"\n", missing.display()));
    let image = image(&sandbox);

    let out = sandbox.run(&as_strs(&fast(&["read", &image])));
    assert_eq!(out.code, 1);
    assert!(out.stderr.contains("is not installed"));
}

#[test]
fn capture_then_read() {
    let sandbox = Sandbox::new();
    let ocr = sandbox.script("fake-ocr", "echo 'go'");
    let source = image(&sandbox);
    let shot = sandbox.path().join("shot.png");
    sandbox.write_config(&format!(
        "[ocr]\ncommand = \"{}\"\n\n[camera]\ncommand = \"cp {} {{output}}\"\n",
        ocr.display(),
        source
    ));

    let shot_arg = shot.display().to_string();
    let out = sandbox.run(&as_strs(&fast(&["capture", "--output", &shot_arg])));
    assert_eq!(out.code, 0, "stderr: {}", out.stderr);
    assert!(shot.exists());
    assert!(out.stderr.contains("busy: Capturing image with cp..."));
    assert!(out.stderr.contains("info: Captured"));
    assert!(out.stdout.contains("[2/2] O"));
}

#[test]
fn failing_camera_is_reported() {
    let sandbox = Sandbox::new();
    let camera = sandbox.script("fake-cam", "echo 'no device' >&2; exit 1");
    sandbox.write_config(&format!(
        "[camera]\ncommand = \"{} {{output}}\"\n",
        camera.display()
    ));

    let out = sandbox.run(&as_strs(&fast(&["capture"])));
    assert_eq!(out.code, 1);
    assert!(out.stderr.contains("no device"));
}
