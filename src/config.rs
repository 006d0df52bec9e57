//! Configuration file handling.
//!
//! The config lives at `<config dir>/braille-reader/config.toml` unless
//! `BRAILLE_READER_CONFIG` points elsewhere. Every field has a default, so a
//! missing file or missing section is never an error.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use toml_edit::DocumentMut;

use crate::actuator::{SerialSettings, DEFAULT_BAUD_RATE};
use crate::camera::DEFAULT_CAPTURE_COMMAND;
use crate::player::PlaybackTiming;
use crate::theme::Theme;

/// Environment variable overriding the config file location.
pub const CONFIG_PATH_ENV: &str = "BRAILLE_READER_CONFIG";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub playback: PlaybackConfig,
    pub actuator: ActuatorConfig,
    pub ocr: OcrConfig,
    pub camera: CameraConfig,
    pub display: DisplayConfig,
    pub logging: LoggingConfig,
}

/// `[playback]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Delay before the first character (milliseconds)
    pub initial_delay_ms: u64,
    /// How long each character is shown (milliseconds)
    pub char_interval_ms: u64,
    /// Keep the last character up for one more interval
    pub hold_last: bool,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            initial_delay_ms: PlaybackTiming::DEFAULT_INITIAL_DELAY.as_millis() as u64,
            char_interval_ms: PlaybackTiming::DEFAULT_CHAR_INTERVAL.as_millis() as u64,
            hold_last: false,
        }
    }
}

/// `[actuator]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActuatorConfig {
    /// Serial device path, e.g. `/dev/ttyACM0`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device: Option<PathBuf>,
    pub baud_rate: u32,
    /// Connect to `device` when playback starts
    pub auto_connect: bool,
}

impl Default for ActuatorConfig {
    fn default() -> Self {
        Self {
            device: None,
            baud_rate: DEFAULT_BAUD_RATE,
            auto_connect: true,
        }
    }
}

/// `[ocr]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    /// OCR binary name or path
    pub command: String,
    /// Recognition language
    pub language: String,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            command: "tesseract".to_string(),
            language: "eng".to_string(),
        }
    }
}

/// `[camera]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Capture command template; `{output}` is the image path
    pub command: String,
    /// Where captures are written (defaults to the temp dir)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            command: DEFAULT_CAPTURE_COMMAND.to_string(),
            output_dir: None,
        }
    }
}

/// `[display]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Brighter palette for low-vision users
    pub high_contrast: bool,
}

/// `[logging]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive, e.g. `warn` or `braille_reader=debug`
    pub level: String,
    /// Log file; without one, logs go to stderr outside the TUI
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            file: None,
        }
    }
}

impl Config {
    /// Path of the config file.
    pub fn config_path() -> Result<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_PATH_ENV) {
            return Ok(PathBuf::from(path));
        }
        let dir = dirs::config_dir().context("Could not determine config directory")?;
        Ok(dir.join("braille-reader").join("config.toml"))
    }

    /// Load from the default location, falling back to defaults.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load from `path`. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("Invalid config in {}", path.display()))
    }

    /// Save to the default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))
    }

    pub fn playback_timing(&self) -> PlaybackTiming {
        let timing = PlaybackTiming::new(
            Duration::from_millis(self.playback.initial_delay_ms),
            Duration::from_millis(self.playback.char_interval_ms),
        );
        if self.playback.hold_last {
            timing.holding_last()
        } else {
            timing
        }
    }

    /// Color theme selected by `[display]`.
    pub fn theme(&self) -> Theme {
        if self.display.high_contrast {
            Theme::high_contrast()
        } else {
            Theme::standard()
        }
    }

    /// Serial settings, if a device is configured.
    pub fn serial_settings(&self) -> Option<SerialSettings> {
        self.actuator.device.as_ref().map(|device| SerialSettings {
            device: device.clone(),
            baud_rate: self.actuator.baud_rate,
        })
    }
}

/// Result of adding missing fields to a config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrateResult {
    /// The migrated file content
    pub content: String,
    /// Added fields as `section.key`
    pub added_fields: Vec<String>,
    /// Sections that were missing entirely
    pub sections_added: Vec<String>,
}

impl MigrateResult {
    pub fn has_changes(&self) -> bool {
        !self.added_fields.is_empty() || !self.sections_added.is_empty()
    }
}

/// Add fields present in the default config but missing from `content`.
///
/// Existing values, comments and formatting are preserved. Sections the
/// user replaced with a non-table value are left alone.
pub fn migrate_config(content: &str) -> Result<MigrateResult> {
    let mut doc: DocumentMut = content.parse().context("Config is not valid TOML")?;
    let defaults: DocumentMut = toml::to_string_pretty(&Config::default())?.parse()?;

    let mut added_fields = Vec::new();
    let mut sections_added = Vec::new();

    for (section, item) in defaults.iter() {
        let Some(default_table) = item.as_table() else {
            continue;
        };

        if !doc.contains_key(section) {
            doc.insert(section, item.clone());
            sections_added.push(section.to_string());
            added_fields.extend(
                default_table
                    .iter()
                    .map(|(key, _)| format!("{}.{}", section, key)),
            );
            continue;
        }

        let Some(table) = doc[section].as_table_mut() else {
            continue;
        };
        for (key, value) in default_table.iter() {
            if !table.contains_key(key) {
                table.insert(key, value.clone());
                added_fields.push(format!("{}.{}", section, key));
            }
        }
    }

    Ok(MigrateResult {
        content: doc.to_string(),
        added_fields,
        sections_added,
    })
}
