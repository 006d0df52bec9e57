//! Recognition: raw OCR text to playable sequences.
//!
//! The adapter in this module is a pure transform. Obtaining the raw text
//! is the job of an [`OcrEngine`](ocr::OcrEngine).

mod error;
pub mod ocr;
mod sequence;

pub use error::{OcrError, RecognitionError};
pub use ocr::{OcrEngine, Tesseract};
pub use sequence::RecognizedSequence;

use crate::braille::SymbolTable;

/// Convert raw recognized text into a sequence of supported characters.
///
/// Trims surrounding whitespace, upper-cases, then keeps only characters
/// present in `table`, in their original order (repeats included).
///
/// # Errors
/// - [`RecognitionError::NoTextDetected`] if nothing remains after trimming
/// - [`RecognitionError::NoValidText`] if no character is in the table
pub fn recognize(raw: &str, table: &SymbolTable) -> Result<RecognizedSequence, RecognitionError> {
    let text = raw.trim().to_uppercase();
    if text.is_empty() {
        return Err(RecognitionError::NoTextDetected);
    }

    let chars: Vec<char> = text.chars().filter(|c| table.contains(*c)).collect();
    if chars.is_empty() {
        return Err(RecognitionError::NoValidText);
    }

    Ok(RecognizedSequence::from_filtered(chars))
}
