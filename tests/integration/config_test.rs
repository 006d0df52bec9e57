//! Integration tests for the config subcommands

use crate::helpers::Sandbox;

#[test]
fn show_without_file_prints_defaults() {
    let out = Sandbox::new().run(&["config", "show"]);

    assert_eq!(out.code, 0);
    assert!(out.stdout.contains("[playback]"));
    assert!(out.stdout.contains("char_interval_ms = 3000"));
    assert!(out.stdout.contains("baud_rate = 9600"));
    assert!(out.stdout.contains("language = \"eng\""));
}

#[test]
fn show_reflects_file_values() {
    let sandbox = Sandbox::new();
    sandbox.write_config("[playback]\nchar_interval_ms = 1234\n\n[actuator]\ndevice = \"/dev/ttyACM0\"\n");

    let out = sandbox.run(&["config", "show"]);
    assert_eq!(out.code, 0);
    assert!(out.stdout.contains("char_interval_ms = 1234"));
    assert!(out.stdout.contains("initial_delay_ms = 500"));
    assert!(out.stdout.contains("device = \"/dev/ttyACM0\""));
}

#[test]
fn migrate_yes_adds_missing_fields_and_keeps_values() {
    let sandbox = Sandbox::new();
    sandbox.write_config("# my settings\n[playback]\nchar_interval_ms = 1234\n");

    let out = sandbox.run(&["config", "migrate", "--yes"]);
    assert_eq!(out.code, 0, "stderr: {}", out.stderr);
    assert!(out.stdout.contains("+ initial_delay_ms = 500"));
    assert!(out.stdout.contains("Config updated successfully."));

    let content = std::fs::read_to_string(sandbox.config_path()).unwrap();
    assert!(content.starts_with("# my settings\n"));
    assert!(content.contains("char_interval_ms = 1234"));
    for section in ["[actuator]", "[ocr]", "[camera]", "[logging]"] {
        assert!(content.contains(section), "missing {section}");
    }

    let again = sandbox.run(&["config", "migrate", "--yes"]);
    assert!(again.stdout.contains("Config is already up to date."));
}

#[test]
fn migrate_creates_missing_file() {
    let sandbox = Sandbox::new();

    let out = sandbox.run(&["config", "migrate", "-y"]);
    assert_eq!(out.code, 0);
    assert!(out.stdout.contains("Config file created successfully."));
    assert!(sandbox.config_path().exists());
}

#[test]
fn migrate_without_tty_changes_nothing() {
    let sandbox = Sandbox::new();
    sandbox.write_config("[playback]\nchar_interval_ms = 1234\n");

    let out = sandbox.run(&["config", "migrate"]);
    assert_eq!(out.code, 0);
    assert!(out.stdout.contains("No changes made."));
    assert_eq!(
        std::fs::read_to_string(sandbox.config_path()).unwrap(),
        "[playback]\nchar_interval_ms = 1234\n"
    );
}
