//! Symbol table builder
//!
//! Turns dataset records into a [`ReplacementTable`]. Each record yields at
//! most two rules: one for its mnemonic (AMS) name and one for its LaTeX
//! command, if that command starts with a backslash. Range records yield
//! nothing.

use log::debug;

use super::table::{ReplacementRule, ReplacementTable};
use crate::utils::error::DecodeError;

/// One `<character>` entry of the symbol dataset
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SymbolRecord {
    pub code_point: u32,
    /// The entry describes a span of code points and is never used
    pub is_range: bool,
    pub mnemonic_name: Option<String>,
    pub command_name: Option<String>,
}

impl SymbolRecord {
    /// Single code point record without names
    pub fn new(code_point: u32) -> Self {
        Self {
            code_point,
            ..Default::default()
        }
    }

    /// Record describing a code point range
    pub fn range(start: u32) -> Self {
        Self {
            code_point: start,
            is_range: true,
            ..Default::default()
        }
    }

    pub fn with_mnemonic(mut self, name: impl Into<String>) -> Self {
        self.mnemonic_name = Some(name.into());
        self
    }

    pub fn with_command(mut self, name: impl Into<String>) -> Self {
        self.command_name = Some(name.into());
        self
    }
}

/// Counters collected while building a table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildStats {
    pub records: usize,
    pub ranges_skipped: usize,
    pub mnemonic_rules: usize,
    pub command_rules: usize,
    /// Command names dropped for not starting with a backslash
    pub commands_dropped: usize,
}

/// Decode a dataset code point into a character
#[inline]
pub fn decode_code_point(code_point: u32) -> Result<char, DecodeError> {
    char::from_u32(code_point).ok_or(DecodeError { code_point })
}

/// The command form of a name, if it is one: trimmed and backslash-prefixed
fn command_pattern(name: &str) -> Option<&str> {
    let trimmed = name.trim();
    trimmed.starts_with('\\').then_some(trimmed)
}

/// Build a replacement table, collecting statistics.
///
/// Any record with an invalid code point fails the whole build.
pub fn build_table_with_stats<'a, I>(records: I) -> Result<(ReplacementTable, BuildStats), DecodeError>
where
    I: IntoIterator<Item = &'a SymbolRecord>,
{
    let mut stats = BuildStats::default();
    let mut rules = Vec::new();

    for record in records {
        stats.records += 1;
        if record.is_range {
            stats.ranges_skipped += 1;
            continue;
        }

        let symbol = decode_code_point(record.code_point)?;

        if let Some(mnemonic) = record.mnemonic_name.as_deref().filter(|m| !m.is_empty()) {
            rules.push(ReplacementRule::new(mnemonic, symbol));
            stats.mnemonic_rules += 1;
        }

        if let Some(command) = record.command_name.as_deref() {
            match command_pattern(command) {
                Some(pattern) => {
                    rules.push(ReplacementRule::new(pattern, symbol));
                    stats.command_rules += 1;
                }
                None => stats.commands_dropped += 1,
            }
        }
    }

    let table = ReplacementTable::from_rules(rules);
    debug!(
        "built table: {} rules from {} records ({} ranges skipped, {} commands dropped)",
        table.len(),
        stats.records,
        stats.ranges_skipped,
        stats.commands_dropped
    );
    Ok((table, stats))
}

/// Build a replacement table from records in dataset order
pub fn build_table<'a, I>(records: I) -> Result<ReplacementTable, DecodeError>
where
    I: IntoIterator<Item = &'a SymbolRecord>,
{
    build_table_with_stats(records).map(|(table, _)| table)
}
