//! `read <IMAGE>`: OCR an image file, then play the text.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use braille_reader::cli::PlaybackArgs;
use braille_reader::recognition::{OcrEngine, Tesseract};
use braille_reader::tui::StatusLine;
use braille_reader::Config;

use super::play::play_text;

#[cfg(not(tarpaulin_include))]
pub fn handle(image: &Path, args: &PlaybackArgs, config: Config) -> Result<()> {
    let config = args.apply(config);
    let raw = read_text(image, &config)?;
    play_text(&raw, args, &config)
}

/// Run the configured OCR engine over `image`.
pub fn read_text(image: &Path, config: &Config) -> Result<String> {
    let engine = Tesseract::new(&config.ocr.command, &config.ocr.language);
    let status = StatusLine::processing(format!("Recognizing text in {}...", image.display()));
    eprintln!("{}", status.to_ansi(&config.theme()));

    let raw = engine
        .extract_text(image)
        .with_context(|| format!("Could not read text from {}", image.display()))?;
    debug!(chars = raw.chars().count(), "OCR finished");
    Ok(raw)
}
