//! WASM bindings for latex-unicode
//!
//! Browser chat clients fetch `unicode.xml` themselves and hand the text to
//! [`LatexUnicode::new`]; the resulting object replaces text synchronously.

#[cfg(feature = "wasm")]
use std::sync::Arc;

#[cfg(feature = "wasm")]
use wasm_bindgen::prelude::*;

#[cfg(feature = "wasm")]
use crate::core::table::ReplacementTable;

/// Initialize panic hook for better error messages in browser console
#[cfg(feature = "wasm")]
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Replacement engine bound to one dataset
#[cfg(feature = "wasm")]
#[wasm_bindgen]
pub struct LatexUnicode {
    table: Arc<ReplacementTable>,
}

#[cfg(feature = "wasm")]
#[wasm_bindgen]
impl LatexUnicode {
    /// Build from the text of a `unicode.xml` document
    #[wasm_bindgen(constructor)]
    pub fn new(xml: &str) -> Result<LatexUnicode, JsError> {
        let table = crate::load_table_from_xml(xml).map_err(|e| JsError::new(&e.to_string()))?;
        Ok(LatexUnicode {
            table: Arc::new(table),
        })
    }

    /// Replace LaTeX commands and script notation in `text`
    pub fn replace(&self, text: &str) -> String {
        crate::replace(&self.table, text)
    }

    /// Number of replacement rules
    #[wasm_bindgen(js_name = "ruleCount")]
    pub fn rule_count(&self) -> usize {
        self.table.len()
    }

    /// All rules as `[{ pattern, replacement }]`, longest pattern first
    pub fn rules(&self) -> Result<JsValue, JsError> {
        serde_wasm_bindgen::to_value(self.table.rules()).map_err(|e| JsError::new(&e.to_string()))
    }
}

/// Replace script notation only, without a symbol table
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = "replaceScripts")]
pub fn replace_scripts_wasm(text: &str) -> String {
    crate::core::substitute_scripts(text).into_owned()
}
