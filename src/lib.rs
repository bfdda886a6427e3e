//! # latex-unicode
//!
//! Replace LaTeX markup in chat text with Unicode characters.
//!
//! ## Features
//!
//! - **Symbol table** built from the W3C `unicode.xml` character dataset
//! - **Longest match first**: `\top` never turns into `→p`
//! - **Script notation**: `x^{23}` → `x²³`, `a_1` → `a₁`
//! - **Host layer**: atomic table reload, per-point hooks, `reload` /
//!   `redownload` commands
//! - **WASM Support**: Compiles to WebAssembly for browser clients
//!
//! ## Usage Examples
//!
//! ### Building a table and replacing text
//!
//! ```rust
//! use latex_unicode::{build_table, replace, SymbolRecord};
//!
//! let records = vec![
//!     SymbolRecord::new(0x3B1).with_command(r"\alpha"),
//!     SymbolRecord::new(0x2264).with_command(r"\leq"),
//! ];
//! let table = build_table(&records).unwrap();
//! assert_eq!(replace(&table, r"\alpha \leq x^{2}"), "α ≤ x²");
//! ```
//!
//! ### From the dataset document
//!
//! ```rust
//! use latex_unicode::{load_table_from_xml, replace};
//!
//! let table = load_table_from_xml(r#"<charlist>
//!     <character dec="8594"><latex>\to</latex></character>
//!     <character dec="8868"><latex>\top</latex></character>
//! </charlist>"#).unwrap();
//! assert_eq!(replace(&table, r"\top"), "⊤");
//! ```

/// Core modules: table builder, table, replacement engine
pub mod core;

/// Data layer - static mappings
pub mod data;

/// Dataset parsing and sources
pub mod dataset;

/// Host integration: engine state, hooks, options, commands
pub mod host;

/// Utility modules
pub mod utils;

/// WASM bindings (feature-gated)
#[cfg(feature = "wasm")]
pub mod wasm;

// Re-export core functions
pub use core::{
    build_table, build_table_with_stats, replace, replace_bytes, try_script_substitute, BuildStats,
    ReplacementRule, ReplacementTable, SymbolRecord,
};

pub use data::{ScriptGlyphs, ScriptSlot, SCRIPT_DIGITS};
pub use dataset::{parse_dataset, DatasetSource, MemoryDatasetSource, StdDatasetSource};
pub use host::{
    Command, CommandStatus, Config, ConfigOption, EngineState, InterceptionPoint, Settings,
};

// Re-export utilities
pub use utils::error::{
    ConfigError, ConfigValidationError, DatasetError, DecodeError, EncodingError, FetchError,
    InvalidArgumentError, LoadError, LoadResult,
};

/// Parse a dataset document and build its replacement table
pub fn load_table_from_xml(xml: &str) -> LoadResult<ReplacementTable> {
    let records = parse_dataset(xml)?;
    Ok(build_table(&records)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DATASET: &str = r#"<charlist>
        <character dec="65-90"><latex>\A</latex></character>
        <character dec="945"><AMS>alpha</AMS><latex>alpha</latex></character>
        <character dec="8804"><latex>\leq</latex></character>
    </charlist>"#;

    #[test]
    fn test_load_table_from_xml() {
        let table = load_table_from_xml(DATASET).unwrap();
        let patterns: Vec<&str> = table.rules().iter().map(|r| r.pattern.as_str()).collect();
        // Range record contributes nothing; "alpha" as a command is dropped
        assert_eq!(patterns, vec!["alpha", "\\leq"]);
    }

    #[test]
    fn test_load_table_decode_error() {
        let err = load_table_from_xml(r#"<charlist><character dec="1114112"/></charlist>"#)
            .unwrap_err();
        assert!(matches!(err, LoadError::Decode(DecodeError { code_point: 0x110000 })));
    }

    #[test]
    fn test_load_table_oversized_code_point() {
        let err = load_table_from_xml(r#"<charlist><character dec="4294967296"/></charlist>"#)
            .unwrap_err();
        assert!(matches!(err, LoadError::Decode(DecodeError { .. })));
    }

    #[test]
    fn test_replace_end_to_end() {
        let table = load_table_from_xml(DATASET).unwrap();
        assert_eq!(replace(&table, r"alpha \leq \beta_2"), "α ≤ \\beta₂");
    }
}
