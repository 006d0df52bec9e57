//! Recognition errors.

use std::path::PathBuf;

/// Outcomes of filtering raw text that leave nothing to play.
///
/// Both are user guidance, not failures of the program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RecognitionError {
    #[error("No text detected in the image")]
    NoTextDetected,

    #[error("No supported characters in the recognized text")]
    NoValidText,
}

impl RecognitionError {
    /// What the user should try next.
    pub fn guidance(&self) -> &'static str {
        match self {
            Self::NoTextDetected => "Make sure there is visible text in the image.",
            Self::NoValidText => {
                "Only letters, digits and spaces can be shown. Try a clearer image."
            }
        }
    }
}

/// Errors from running the OCR engine.
#[derive(Debug, thiserror::Error)]
pub enum OcrError {
    #[error("Image not found: {path}")]
    ImageNotFound { path: PathBuf },

    #[error("OCR engine '{engine}' is not installed")]
    NotInstalled { engine: String },

    #[error("OCR engine '{engine}' failed: {message}")]
    Failed { engine: String, message: String },

    #[error("Failed to run OCR engine: {0}")]
    Io(#[from] std::io::Error),
}
