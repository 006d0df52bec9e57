//! OCR engines.
//!
//! An engine turns an image file into raw text. The text is not filtered
//! here; pass it to [`recognize`](super::recognize).

use std::path::Path;
use std::process::Command;

use tracing::debug;

use super::error::OcrError;

/// A tool that extracts text from an image.
pub trait OcrEngine: Send + Sync {
    /// Human-readable name for messages.
    fn name(&self) -> &str;

    /// Check if the engine can run on this system.
    ///
    /// Should be fast - typically checks if the binary exists.
    fn is_available(&self) -> bool;

    /// Extract raw text from the image at `image`.
    fn extract_text(&self, image: &Path) -> Result<String, OcrError>;
}

/// OCR through the `tesseract` command line tool.
#[derive(Debug, Clone)]
pub struct Tesseract {
    /// Binary name or path
    command: String,
    /// Language passed with `-l` (e.g. `eng`)
    language: String,
}

impl Tesseract {
    pub fn new(command: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            language: language.into(),
        }
    }

    /// Arguments for a run against `image`, printing text to stdout.
    fn args(&self, image: &Path) -> Vec<String> {
        vec![
            image.display().to_string(),
            "stdout".to_string(),
            "-l".to_string(),
            self.language.clone(),
        ]
    }
}

impl Default for Tesseract {
    fn default() -> Self {
        Self::new("tesseract", "eng")
    }
}

impl OcrEngine for Tesseract {
    fn name(&self) -> &str {
        &self.command
    }

    fn is_available(&self) -> bool {
        command_exists(&self.command)
    }

    fn extract_text(&self, image: &Path) -> Result<String, OcrError> {
        if !image.exists() {
            return Err(OcrError::ImageNotFound {
                path: image.to_path_buf(),
            });
        }
        if !self.is_available() {
            return Err(OcrError::NotInstalled {
                engine: self.command.clone(),
            });
        }

        debug!(engine = %self.command, image = %image.display(), "running OCR");
        let output = Command::new(&self.command).args(self.args(image)).output()?;

        if !output.status.success() {
            return Err(OcrError::Failed {
                engine: self.command.clone(),
                message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let text = String::from_utf8_lossy(&output.stdout).to_string();
        debug!(chars = text.chars().count(), "OCR finished");
        Ok(text)
    }
}

/// Check whether `command` resolves to an executable.
///
/// Paths are checked directly, bare names through `which`.
pub(crate) fn command_exists(command: &str) -> bool {
    if command.contains(std::path::MAIN_SEPARATOR) {
        return Path::new(command).is_file();
    }
    Command::new("which")
        .arg(command)
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}
