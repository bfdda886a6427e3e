//! Superscript and subscript substitution
//!
//! `x^2`, `x^{23}`, `a_1` and `a_{10}` become `x²`, `x²³`, `a₁` and `a₁₀`.
//! A script run containing anything other than ASCII digits is left
//! exactly as written, operator and braces included.

use std::borrow::Cow;

use lazy_static::lazy_static;
use regex::{Captures, Regex};

use crate::data::scripts::{script_digit, ScriptSlot};

lazy_static! {
    /// `^` then one word character, or a braced run of them
    static ref SUPERSCRIPT: Regex = Regex::new(r"\^(?:(\w)|\{(\w+)\})").unwrap();
    /// `_` then one word character, or a braced run of them
    static ref SUBSCRIPT: Regex = Regex::new(r"_(?:(\w)|\{(\w+)\})").unwrap();
}

/// Map a captured script run to its glyphs.
///
/// Returns `None` if the run is empty or any character is not `0`-`9`.
pub fn try_script_substitute(run: &str, slot: ScriptSlot) -> Option<String> {
    if run.is_empty() {
        return None;
    }
    run.chars().map(|c| script_digit(c, slot)).collect()
}

fn pattern(slot: ScriptSlot) -> &'static Regex {
    match slot {
        ScriptSlot::Superscript => &*SUPERSCRIPT,
        ScriptSlot::Subscript => &*SUBSCRIPT,
    }
}

/// One pass over `text` for a single operator
pub fn substitute_script(text: &str, slot: ScriptSlot) -> Cow<'_, str> {
    // Skip the regex entirely when the operator never appears
    if !text.contains(slot.operator()) {
        return Cow::Borrowed(text);
    }
    pattern(slot).replace_all(text, |caps: &Captures| {
        let run = caps
            .get(1)
            .or_else(|| caps.get(2))
            .map_or("", |m| m.as_str());
        try_script_substitute(run, slot).unwrap_or_else(|| caps[0].to_string())
    })
}

/// Superscript pass followed by subscript pass
pub fn substitute_scripts(text: &str) -> Cow<'_, str> {
    match substitute_script(text, ScriptSlot::Superscript) {
        Cow::Borrowed(unchanged) => substitute_script(unchanged, ScriptSlot::Subscript),
        Cow::Owned(owned) => {
            Cow::Owned(substitute_script(&owned, ScriptSlot::Subscript).into_owned())
        }
    }
}
