//! Replacement rules and the ordered table they live in

use std::cmp::Reverse;

use serde::Serialize;

/// One literal substitution: every occurrence of `pattern` becomes `replacement`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReplacementRule {
    /// Mnemonic name or backslash command, never empty
    pub pattern: String,
    /// The decoded symbol
    pub replacement: char,
}

impl ReplacementRule {
    pub fn new(pattern: impl Into<String>, replacement: char) -> Self {
        Self {
            pattern: pattern.into(),
            replacement,
        }
    }

    /// Pattern length in characters, the table's sort key
    #[inline]
    pub fn pattern_len(&self) -> usize {
        self.pattern.chars().count()
    }
}

/// Immutable, longest-pattern-first list of replacement rules
///
/// The ordering makes `\top` resolve before `\to` can match its prefix.
/// Tables are never edited after construction; a reload builds a new one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReplacementTable {
    rules: Vec<ReplacementRule>,
}

impl ReplacementTable {
    /// Empty table: the engine then only performs script substitution
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a table from rules in derivation order.
    ///
    /// Rules with an empty pattern are dropped. The rest are stably sorted
    /// by pattern length, descending, so rules of equal length keep their
    /// relative order.
    pub fn from_rules(mut rules: Vec<ReplacementRule>) -> Self {
        rules.retain(|rule| !rule.pattern.is_empty());
        rules.sort_by_key(|rule| Reverse(rule.pattern_len()));
        Self { rules }
    }

    #[inline]
    pub fn rules(&self) -> &[ReplacementRule] {
        &self.rules
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// First rule with exactly this pattern
    pub fn lookup(&self, pattern: &str) -> Option<char> {
        self.rules
            .iter()
            .find(|rule| rule.pattern == pattern)
            .map(|rule| rule.replacement)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sorted_longest_first() {
        let table = ReplacementTable::from_rules(vec![
            ReplacementRule::new("\\to", '→'),
            ReplacementRule::new("\\top", '⊤'),
            ReplacementRule::new("le", '≤'),
        ]);
        let patterns: Vec<&str> = table.rules().iter().map(|r| r.pattern.as_str()).collect();
        assert_eq!(patterns, vec!["\\top", "\\to", "le"]);
    }

    #[test]
    fn test_equal_lengths_keep_order() {
        let table = ReplacementTable::from_rules(vec![
            ReplacementRule::new("\\ge", '≥'),
            ReplacementRule::new("\\alpha", 'α'),
            ReplacementRule::new("\\le", '≤'),
            ReplacementRule::new("\\ne", '≠'),
        ]);
        let patterns: Vec<&str> = table.rules().iter().map(|r| r.pattern.as_str()).collect();
        assert_eq!(patterns, vec!["\\alpha", "\\ge", "\\le", "\\ne"]);
    }

    #[test]
    fn test_length_counts_characters() {
        // "ää" is 4 bytes but 2 characters; "abc" sorts ahead of it
        let table = ReplacementTable::from_rules(vec![
            ReplacementRule::new("ää", 'x'),
            ReplacementRule::new("abc", 'y'),
        ]);
        assert_eq!(table.rules()[0].pattern, "abc");
    }

    #[test]
    fn test_empty_pattern_dropped() {
        let table = ReplacementTable::from_rules(vec![
            ReplacementRule::new("", 'x'),
            ReplacementRule::new("\to", '→'),
        ]);
        assert_eq!(table.rules(), &[ReplacementRule::new("\\to", '→')]);
        assert_eq!(crate::core::engine::replace(&table, "ab"), "ab");
    }

    #[test]
    fn test_lookup() {
        let table = ReplacementTable::from_rules(vec![ReplacementRule::new("\\alpha", 'α')]);
        assert_eq!(table.lookup("\\alpha"), Some('α'));
        assert_eq!(table.lookup("\\beta"), None);
        assert!(ReplacementTable::empty().is_empty());
    }
}
