//! Superscript and subscript digit glyphs
//!
//! Script notation (`x^{23}`, `a_1`) is only rewritten when every character
//! of the script run is an ASCII digit, so the table is keyed by the ten
//! decimal digits alone.

use phf::phf_map;

/// Which slot of a [`ScriptGlyphs`] pair to use
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptSlot {
    /// `^` notation
    Superscript,
    /// `_` notation
    Subscript,
}

impl ScriptSlot {
    /// The operator character that introduces this kind of script
    #[inline]
    pub fn operator(self) -> char {
        match self {
            ScriptSlot::Superscript => '^',
            ScriptSlot::Subscript => '_',
        }
    }
}

/// Superscript and subscript forms of one digit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScriptGlyphs {
    pub superscript: char,
    pub subscript: char,
}

impl ScriptGlyphs {
    #[inline]
    pub fn get(self, slot: ScriptSlot) -> char {
        match slot {
            ScriptSlot::Superscript => self.superscript,
            ScriptSlot::Subscript => self.subscript,
        }
    }
}

/// ASCII digit to script glyph mapping
pub static SCRIPT_DIGITS: phf::Map<char, ScriptGlyphs> = phf_map! {
    '0' => ScriptGlyphs { superscript: '\u{2070}', subscript: '\u{2080}' },
    '1' => ScriptGlyphs { superscript: '\u{00B9}', subscript: '\u{2081}' },
    '2' => ScriptGlyphs { superscript: '\u{00B2}', subscript: '\u{2082}' },
    '3' => ScriptGlyphs { superscript: '\u{00B3}', subscript: '\u{2083}' },
    '4' => ScriptGlyphs { superscript: '\u{2074}', subscript: '\u{2084}' },
    '5' => ScriptGlyphs { superscript: '\u{2075}', subscript: '\u{2085}' },
    '6' => ScriptGlyphs { superscript: '\u{2076}', subscript: '\u{2086}' },
    '7' => ScriptGlyphs { superscript: '\u{2077}', subscript: '\u{2087}' },
    '8' => ScriptGlyphs { superscript: '\u{2078}', subscript: '\u{2088}' },
    '9' => ScriptGlyphs { superscript: '\u{2079}', subscript: '\u{2089}' },
};

/// Get the script glyph for an ASCII digit
#[inline]
pub fn script_digit(digit: char, slot: ScriptSlot) -> Option<char> {
    SCRIPT_DIGITS.get(&digit).map(|glyphs| glyphs.get(slot))
}
