//! Data layer - Static mappings
//!
//! The symbol table itself is built at runtime from the W3C dataset; the
//! only compiled-in data is the script digit mapping.

pub mod scripts;

// Re-export commonly used items
pub use scripts::{script_digit, ScriptGlyphs, ScriptSlot, SCRIPT_DIGITS};
