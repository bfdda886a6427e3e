//! Replacement engine
//!
//! Two fixed stages over a table snapshot:
//!
//! 1. **Literal substitution**: every rule, longest pattern first, replaces
//!    all non-overlapping occurrences of its pattern. Rules run one after
//!    another, so a later rule sees the output of earlier ones.
//! 2. **Script substitution**: all-digit `^`/`_` runs become superscript and
//!    subscript glyphs (see [`scripts`]).
//!
//! The engine is a pure function of `(table, text)` and never fails on
//! valid UTF-8. Raw byte input goes through [`replace_bytes`], which checks
//! the encoding first.

pub mod scripts;

use std::borrow::Cow;

use super::table::ReplacementTable;
use crate::utils::error::EncodingError;

pub use scripts::{substitute_script, substitute_scripts, try_script_substitute};

/// Stage A: apply every literal rule in table order
pub fn substitute_literals<'a>(table: &ReplacementTable, input: &'a str) -> Cow<'a, str> {
    let mut text = Cow::Borrowed(input);
    let mut buf = [0u8; 4];

    for rule in table.rules() {
        if !text.contains(rule.pattern.as_str()) {
            continue;
        }
        let replacement = rule.replacement.encode_utf8(&mut buf);
        text = Cow::Owned(text.replace(rule.pattern.as_str(), replacement));
    }

    text
}

/// Run both stages over `input`
pub fn replace(table: &ReplacementTable, input: &str) -> String {
    if input.is_empty() {
        return String::new();
    }
    let literal = substitute_literals(table, input);
    substitute_scripts(&literal).into_owned()
}

/// Byte-level entry point: input must be UTF-8, output is UTF-8
pub fn replace_bytes(table: &ReplacementTable, input: &[u8]) -> Result<Vec<u8>, EncodingError> {
    let text = std::str::from_utf8(input)?;
    Ok(replace(table, text).into_bytes())
}
