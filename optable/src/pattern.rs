use once_cell::sync::Lazy;
use std::collections::HashMap;
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

use crate::error::Error;

/// Number of nibbles in a pattern (one 16-bit opcode).
pub const PATTERN_LEN: usize = 4;

// ----------------------------------------------------------------------------
// Wildcard

/// Wildcard markers found in handler comments.
/// `8xy4` reads "any x, any y", `fx0a` reads "any x", `dxyn` reads "any x, y and n".
/// Markers match in either case, like hex digits (`8XY4` == `8xy4`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
pub enum WildcardKind {
    /// Immediate / count nibble
    #[strum(to_string = "n")]
    Count,
    /// Key index
    #[strum(to_string = "k")]
    Key,
    /// Register Vx
    #[strum(to_string = "x")]
    RegX,
    /// Register Vy
    #[strum(to_string = "y")]
    RegY,
    /// Canonical placeholder
    #[strum(to_string = "_")]
    Any,
}

impl WildcardKind {
    pub fn marker(self) -> char {
        match self {
            WildcardKind::Count => 'n',
            WildcardKind::Key => 'k',
            WildcardKind::RegX => 'x',
            WildcardKind::RegY => 'y',
            WildcardKind::Any => '_',
        }
    }

    pub fn from_marker(c: char) -> Option<Self> {
        MARKERS.get(&c.to_ascii_lowercase()).copied()
    }
}

static MARKERS: Lazy<HashMap<char, WildcardKind>> =
    Lazy::new(|| WildcardKind::iter().map(|k| (k.marker(), k)).collect());

// ----------------------------------------------------------------------------
// Symbol

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Symbol {
    Nibble(u8),
    Placeholder,
}

impl Symbol {
    pub fn parse(c: char) -> Option<Self> {
        if let Some(digit) = c.to_digit(16) {
            return Some(Symbol::Nibble(digit as u8));
        }
        // Every wildcard kind collapses into the same placeholder
        WildcardKind::from_marker(c).map(|_| Symbol::Placeholder)
    }

    pub fn to_char(self) -> char {
        match self {
            Symbol::Nibble(n) => char::from_digit(n as u32, 16).unwrap_or('?'),
            Symbol::Placeholder => WildcardKind::Any.marker(),
        }
    }
}

// ----------------------------------------------------------------------------
// Pattern

/// Normalized opcode pattern, most significant nibble first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pattern([Symbol; PATTERN_LEN]);

impl Pattern {
    pub fn parse(text: &str) -> Result<Self, Error> {
        let count = text.chars().count();
        if count != PATTERN_LEN {
            return Err(Error::PatternLength(text.to_string(), count));
        }
        let mut symbols = [Symbol::Placeholder; PATTERN_LEN];
        for (slot, c) in symbols.iter_mut().zip(text.chars()) {
            *slot = Symbol::parse(c)
                .ok_or_else(|| Error::UnrecognizedPattern(text.to_string(), c))?;
        }
        Ok(Pattern(symbols))
    }

    pub fn placeholders(&self) -> usize {
        self.0.iter().filter(|s| **s == Symbol::Placeholder).count()
    }

    pub fn rightmost_placeholder(&self) -> Option<usize> {
        self.0.iter().rposition(|s| *s == Symbol::Placeholder)
    }

    /// Replace the symbol at `pos` with a concrete nibble.
    pub fn substitute(mut self, pos: usize, nibble: u8) -> Self {
        self.0[pos] = Symbol::Nibble(nibble & 0xF);
        self
    }

    /// The opcode this pattern denotes, if it contains no placeholder.
    pub fn code(&self) -> Option<u16> {
        self.0.iter().try_fold(0u16, |acc, s| match s {
            Symbol::Nibble(n) => Some(acc << 4 | *n as u16),
            Symbol::Placeholder => None,
        })
    }
}

impl std::fmt::Display for Pattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for s in &self.0 {
            write!(f, "{}", s.to_char())?;
        }
        Ok(())
    }
}
