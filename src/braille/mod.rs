//! Braille cell encoding
//!
//! - `pattern`: the 6-dot `DotPattern` value type
//! - `table`: the static character to pattern `SymbolTable`

pub mod pattern;
pub mod table;

pub use pattern::DotPattern;
pub use table::{SymbolTable, CLEAR_SENTINEL};
