//! WASM bindings for in-browser conversion.

use wasm_bindgen::prelude::*;

/// Initialize panic hook for better error messages in the browser console.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Convert a HaoDoo `.pdb`/`.updb` book to EPUB.
///
/// Takes the raw container bytes and returns EPUB bytes.
#[wasm_bindgen]
pub fn haodoo_to_epub(data: &[u8]) -> Result<Vec<u8>, JsValue> {
    crate::haodoo_bytes_to_epub(data.to_vec()).map_err(|e| JsValue::from_str(&e.to_string()))
}
