//! Integration tests for latex-unicode: dataset → table → replacement

use std::sync::Arc;

use latex_unicode::{
    build_table, load_table_from_xml, parse_dataset, replace, EngineState, InterceptionPoint,
    LoadError, MemoryDatasetSource, ReplacementRule, ReplacementTable, Settings, StdDatasetSource,
    SymbolRecord,
};

/// Excerpt shaped like the W3C unicode.xml
const DATASET: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE charlist>
<charlist>
  <character id="U00041-0005A" dec="65-90" mode="text" type="other">
    <latex>\Latin</latex>
  </character>
  <character id="U003B1" dec="945" mode="math" type="other">
    <latex>\alpha </latex>
    <AMS>alpha</AMS>
    <description>GREEK SMALL LETTER ALPHA</description>
  </character>
  <character id="U003B2" dec="946" mode="math" type="other">
    <latex>\beta </latex>
  </character>
  <character id="U02192" dec="8594" mode="math" type="relation">
    <latex>\to </latex>
  </character>
  <character id="U022A4" dec="8868" mode="math" type="other">
    <latex>\top </latex>
  </character>
  <character id="U02264" dec="8804" mode="math" type="relation">
    <latex>\leq </latex>
  </character>
  <character id="U02208" dec="8712" mode="math" type="relation">
    <latex>\in </latex>
  </character>
  <character id="U0211D" dec="8477" mode="math" type="other">
    <latex>\mathbb{R}</latex>
  </character>
  <character id="U000A0" dec="160" mode="text" type="punctuation">
    <latex>~</latex>
  </character>
</charlist>"#;

fn table() -> ReplacementTable {
    load_table_from_xml(DATASET).unwrap()
}

// ============================================================================
// Table construction
// ============================================================================

mod table_building {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_sorted_by_length_non_increasing() {
        let table = table();
        let lengths: Vec<usize> = table.rules().iter().map(|r| r.pattern_len()).collect();
        assert!(lengths.windows(2).all(|w| w[0] >= w[1]), "{:?}", lengths);
    }

    #[test]
    fn test_equal_lengths_in_derivation_order() {
        let table = table();
        let four: Vec<&str> = table
            .rules()
            .iter()
            .filter(|r| r.pattern_len() == 4)
            .map(|r| r.pattern.as_str())
            .collect();
        assert_eq!(four, vec!["\\top", "\\leq"]);
        let five: Vec<&str> = table
            .rules()
            .iter()
            .filter(|r| r.pattern_len() == 5)
            .map(|r| r.pattern.as_str())
            .collect();
        assert_eq!(five, vec!["alpha", "\\beta"]);
    }

    #[test]
    fn test_range_record_yields_nothing() {
        let table = table();
        assert_eq!(table.lookup("\\Latin"), None);
    }

    #[test]
    fn test_non_command_names_dropped() {
        let table = table();
        assert_eq!(table.lookup("~"), None);
        assert_eq!(table.len(), 8);
    }

    #[test]
    fn test_mnemonic_kept_when_command_dropped() {
        let records = vec![SymbolRecord::new(0x3B1)
            .with_mnemonic("alpha")
            .with_command("alpha")];
        let table = build_table(&records).unwrap();
        assert_eq!(table.rules(), &[ReplacementRule::new("alpha", 'α')]);
    }

    #[test]
    fn test_rebuild_is_identical() {
        let records = parse_dataset(DATASET).unwrap();
        assert_eq!(build_table(&records).unwrap(), build_table(&records).unwrap());
        assert_eq!(table(), table());
    }
}

// ============================================================================
// Replacement
// ============================================================================

mod replacement {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_unknown_command_verbatim() {
        let table = ReplacementTable::from_rules(vec![
            ReplacementRule::new("\\alpha", 'α'),
            ReplacementRule::new("\\leq", '≤'),
        ]);
        assert_eq!(replace(&table, "\\alpha \\leq \\beta"), "α ≤ \\beta");
    }

    #[test]
    fn test_longest_pattern_first() {
        assert_eq!(replace(&table(), "\\top"), "⊤");
        assert_eq!(replace(&table(), "a \\to b"), "a → b");
    }

    #[test]
    fn test_braced_command() {
        assert_eq!(replace(&table(), "x \\in \\mathbb{R}^3"), "x ∈ ℝ³");
    }

    #[test]
    fn test_script_notation() {
        let table = table();
        assert_eq!(replace(&table, "x^{23}"), "x²³");
        assert_eq!(replace(&table, "x^{2a}"), "x^{2a}");
        assert_eq!(replace(&table, "x^23"), "x²3");
        assert_eq!(replace(&table, "a_1"), "a₁");
    }

    #[test]
    fn test_chat_message() {
        assert_eq!(
            replace(&table(), "so \\alpha_0 \\leq \\beta^{10}, right?"),
            "so α₀ ≤ β¹⁰, right?"
        );
    }

    #[test]
    fn test_idempotent() {
        let table = table();
        for input in [
            "\\alpha \\to \\beta",
            "x_1^2 + x_2^2 \\leq 1",
            "\\top \\in \\mathbb{R}",
            "nothing to see here",
        ] {
            let once = replace(&table, input);
            assert_eq!(replace(&table, &once), once, "input: {}", input);
        }
    }

    #[test]
    fn test_non_ascii_text_preserved() {
        assert_eq!(
            replace(&table(), "日本語 \\alpha émoji 🎉 x_2"),
            "日本語 α émoji 🎉 x₂"
        );
    }
}

// ============================================================================
// Host layer
// ============================================================================

mod host {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_std_source_reload_from_cache_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("latex_unicode.xml");
        std::fs::write(&path, DATASET).unwrap();

        let state = EngineState::new(StdDatasetSource::new(&path), Settings::default());
        let report = state.initialize().unwrap();
        assert_eq!(report.rules, 8);
        assert_eq!(report.stats.ranges_skipped, 1);
        assert_eq!(
            state.intercept(InterceptionPoint::Print, "\\alpha^2"),
            "α²"
        );
    }

    #[test]
    fn test_corrupt_cache_keeps_table() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("latex_unicode.xml");
        std::fs::write(&path, DATASET).unwrap();

        let state = EngineState::new(StdDatasetSource::new(&path), Settings::default());
        state.reload().unwrap();
        let before = state.table();

        std::fs::write(&path, "<charlist><character dec=\"x\"/></charlist>").unwrap();
        assert!(matches!(state.reload(), Err(LoadError::Dataset(_))));
        assert!(Arc::ptr_eq(&before, &state.table()));
    }

    #[test]
    fn test_memory_source_redownload_swaps_table() {
        let source = MemoryDatasetSource::with_cached(
            r#"<charlist><character dec="946"><latex>\beta</latex></character></charlist>"#,
        );
        source.set_remote(DATASET);
        let state = EngineState::new(source, Settings::default());
        state.reload().unwrap();
        assert_eq!(state.table().len(), 1);

        assert!(state.run_command("redownload").is_ok());
        assert_eq!(state.table().len(), 8);
    }

    #[test]
    fn test_each_point_switch() {
        let source = MemoryDatasetSource::with_cached(DATASET);
        let state = EngineState::new(source, Settings::default());
        state.reload().unwrap();

        state.set_option("input", "off").unwrap();
        assert_eq!(
            state.intercept(InterceptionPoint::InputDisplay, "\\alpha"),
            "\\alpha"
        );
        assert_eq!(state.intercept(InterceptionPoint::Send, "\\alpha"), "α");
        assert_eq!(state.intercept(InterceptionPoint::Print, "\\alpha"), "α");
    }
}
