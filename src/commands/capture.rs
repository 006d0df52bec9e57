//! `capture`: take a photo, OCR it, then play the text.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use braille_reader::camera::{capture_path, CaptureTool, CommandCamera};
use braille_reader::cli::PlaybackArgs;
use braille_reader::tui::StatusLine;
use braille_reader::Config;

use super::play::play_text;
use super::read::read_text;

#[cfg(not(tarpaulin_include))]
pub fn handle(output: Option<&Path>, args: &PlaybackArgs, config: Config) -> Result<()> {
    let config = args.apply(config);
    let image = capture_image(output, &config)?;

    let status = StatusLine::info(format!("Captured {}", image.display()));
    eprintln!("{}", status.to_ansi(&config.theme()));

    let raw = read_text(&image, &config)?;
    play_text(&raw, args, &config)
}

/// Capture one still with the configured camera command.
///
/// Without `output`, a timestamped file is created in `[camera] output_dir`
/// or the temp directory.
pub fn capture_image(output: Option<&Path>, config: &Config) -> Result<PathBuf> {
    let camera = CommandCamera::from_template(&config.camera.command)
        .context("Invalid [camera] command")?;

    let path = match output {
        Some(path) => path.to_path_buf(),
        None => {
            let dir = config
                .camera
                .output_dir
                .clone()
                .unwrap_or_else(std::env::temp_dir);
            fs::create_dir_all(&dir)
                .with_context(|| format!("Failed to create {}", dir.display()))?;
            capture_path(&dir)
        }
    };

    let status = StatusLine::processing(format!("Capturing image with {}...", camera.name()));
    eprintln!("{}", status.to_ansi(&config.theme()));
    camera.capture(&path)?;
    Ok(path)
}
