//! Core replacement modules
//!
//! - `builder`: dataset records → ordered replacement table
//! - `table`: the immutable rule table
//! - `engine`: literal and script substitution over a table snapshot

pub mod builder;
pub mod engine;
pub mod table;

pub use builder::{build_table, build_table_with_stats, decode_code_point, BuildStats, SymbolRecord};
pub use engine::{replace, replace_bytes, substitute_literals, substitute_scripts, try_script_substitute};
pub use table::{ReplacementRule, ReplacementTable};
