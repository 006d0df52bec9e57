//! TUI widgets
//!
//! Reusable UI components for the player view.

pub mod braille_cell;
pub mod sequence_strip;

pub use braille_cell::{cell_lines, BrailleCell};
pub use sequence_strip::SequenceStrip;
