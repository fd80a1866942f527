//! WASM bindings for browser-based eId rewriting.
//!
//! This module exposes the core rewriting functions to JavaScript via wasm-bindgen.

use wasm_bindgen::prelude::*;

use crate::eid::rewrite_all_eids;
use crate::xml::{parse_document, write_document};

/// Initialize panic hook for better error messages in the browser console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "wasm")]
    console_error_panic_hook::set_once();
}

/// Rewrite the eIds in an Akoma Ntoso XML document.
///
/// Takes the document as an XML string and returns the rewritten XML.
#[wasm_bindgen]
pub fn rewrite_eids(xml: &str) -> Result<String, JsValue> {
    let mut doc = parse_document(xml).map_err(|e| JsValue::from_str(&e.to_string()))?;
    rewrite_all_eids(&mut doc);
    Ok(write_document(&doc))
}
