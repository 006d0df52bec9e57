//! Character to dot pattern table.
//!
//! Covers `A-Z`, `0-9` and space. Digits `1-9` reuse the patterns of
//! `A-I`; `0` and space have no raised dots.

use super::pattern::DotPattern;

/// Character sent to an actuator to lower every dot.
///
/// This is also the digit zero, so the two are indistinguishable on the wire.
pub const CLEAR_SENTINEL: char = '0';

const fn p(bits: u8) -> DotPattern {
    match DotPattern::new(bits) {
        Some(pattern) => pattern,
        None => panic!("dot pattern wider than 6 bits"),
    }
}

/// Display order: letters, then digits 1-9, then 0, then space.
const STANDARD_ENTRIES: [(char, DotPattern); 37] = [
    ('A', p(0b000001)),
    ('B', p(0b000011)),
    ('C', p(0b001001)),
    ('D', p(0b011001)),
    ('E', p(0b010001)),
    ('F', p(0b001011)),
    ('G', p(0b011011)),
    ('H', p(0b010011)),
    ('I', p(0b001010)),
    ('J', p(0b011010)),
    ('K', p(0b000101)),
    ('L', p(0b000111)),
    ('M', p(0b001101)),
    ('N', p(0b011101)),
    ('O', p(0b010101)),
    ('P', p(0b001111)),
    ('Q', p(0b011111)),
    ('R', p(0b010111)),
    ('S', p(0b001110)),
    ('T', p(0b011110)),
    ('U', p(0b100101)),
    ('V', p(0b100111)),
    ('W', p(0b111010)),
    ('X', p(0b101101)),
    ('Y', p(0b111101)),
    ('Z', p(0b110101)),
    ('1', p(0b000001)),
    ('2', p(0b000011)),
    ('3', p(0b001001)),
    ('4', p(0b011001)),
    ('5', p(0b010001)),
    ('6', p(0b001011)),
    ('7', p(0b011011)),
    ('8', p(0b010011)),
    ('9', p(0b001010)),
    ('0', p(0b000000)),
    (' ', p(0b000000)),
];

static STANDARD: SymbolTable = SymbolTable {
    entries: &STANDARD_ENTRIES,
};

/// Immutable mapping from supported characters to dot patterns.
#[derive(Debug)]
pub struct SymbolTable {
    entries: &'static [(char, DotPattern)],
}

impl SymbolTable {
    /// The process-wide standard table.
    pub fn standard() -> &'static SymbolTable {
        &STANDARD
    }

    /// Look up a character, case-insensitively.
    ///
    /// Returns `None` for characters outside the table.
    pub fn lookup(&self, character: char) -> Option<DotPattern> {
        let upper = to_upper(character);
        self.entries
            .iter()
            .find(|(c, _)| *c == upper)
            .map(|(_, pattern)| *pattern)
    }

    /// Like [`lookup`](Self::lookup), but unknown characters map to the empty pattern.
    pub fn pattern_for(&self, character: char) -> DotPattern {
        self.lookup(character).unwrap_or(DotPattern::EMPTY)
    }

    pub fn contains(&self, character: char) -> bool {
        self.lookup(character).is_some()
    }

    /// All entries in display order.
    pub fn entries(&self) -> impl Iterator<Item = (char, DotPattern)> + '_ {
        self.entries.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Single-character upper-casing. Characters whose uppercase form expands
/// to several characters (e.g. `ß`) are returned unchanged and never match.
fn to_upper(character: char) -> char {
    let mut upper = character.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(c), None) => c,
        _ => character,
    }
}
