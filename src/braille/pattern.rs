//! Six-dot braille patterns.
//!
//! Bit `i` of the pattern corresponds to dot `i + 1` of the standard cell:
//!
//! ```text
//! 1 4
//! 2 5
//! 3 6
//! ```

use serde::{Serialize, Serializer};

/// Number of dots in a braille cell.
pub const DOT_COUNT: u8 = 6;

/// A 6-bit dot pattern. Always in `0..=63`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct DotPattern(u8);

impl DotPattern {
    /// No raised dots.
    pub const EMPTY: DotPattern = DotPattern(0);

    /// Largest valid pattern (all six dots raised).
    pub const MAX: u8 = 0b11_1111;

    /// Create a pattern from its bit value, rejecting anything wider than 6 bits.
    pub const fn new(bits: u8) -> Option<Self> {
        if bits <= Self::MAX {
            Some(Self(bits))
        } else {
            None
        }
    }

    /// Build a pattern from 1-based dot numbers, e.g. `[1, 4, 5]` for `D`.
    ///
    /// Dot numbers outside `1..=6` are ignored.
    pub fn from_dots(dots: &[u8]) -> Self {
        let bits = dots
            .iter()
            .filter(|d| (1..=DOT_COUNT).contains(*d))
            .fold(0u8, |acc, d| acc | (1 << (d - 1)));
        Self(bits)
    }

    /// Raw bit value.
    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Whether the 1-based `dot` is raised. Out-of-range dots are never raised.
    pub fn is_raised(self, dot: u8) -> bool {
        (1..=DOT_COUNT).contains(&dot) && self.0 & (1 << (dot - 1)) != 0
    }

    /// The raised dots in ascending order.
    pub fn raised_dots(self) -> Vec<u8> {
        (1..=DOT_COUNT).filter(|&d| self.is_raised(d)).collect()
    }

    /// Render as a character from the Unicode braille block (U+2800).
    ///
    /// For six-dot cells the Unicode bit order matches ours, so the
    /// pattern bits are used directly as the offset.
    pub fn to_unicode(self) -> char {
        char::from_u32(0x2800 + u32::from(self.0)).unwrap_or(' ')
    }

    /// Cell rows as `[left, right]` pairs, top to bottom.
    pub fn rows(self) -> [[bool; 2]; 3] {
        [
            [self.is_raised(1), self.is_raised(4)],
            [self.is_raised(2), self.is_raised(5)],
            [self.is_raised(3), self.is_raised(6)],
        ]
    }
}

impl From<DotPattern> for u8 {
    fn from(pattern: DotPattern) -> Self {
        pattern.0
    }
}

impl Serialize for DotPattern {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.0)
    }
}
