//! The filtered character sequence handed to the player.

use std::fmt;

/// Ordered characters that are all keys of the symbol table they were
/// filtered against. Only built by [`recognize`](super::recognize).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RecognizedSequence {
    chars: Vec<char>,
}

impl RecognizedSequence {
    pub(super) fn from_filtered(chars: Vec<char>) -> Self {
        Self { chars }
    }

    /// A sequence with no characters.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<char> {
        self.chars.get(index).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = char> + '_ {
        self.chars.iter().copied()
    }

    pub fn as_string(&self) -> String {
        self.chars.iter().collect()
    }
}

impl fmt::Display for RecognizedSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in &self.chars {
            write!(f, "{}", c)?;
        }
        Ok(())
    }
}
