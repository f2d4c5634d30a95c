//! WebAssembly entry point.

use wasm_bindgen::prelude::*;

use crate::api::{self, OptimizeRequest};

/// Solves a transportation problem described by a JS object with the
/// shape of [`OptimizeRequest`]; returns `{ solution, total_cost }`.
///
/// Errors are thrown as strings.
#[wasm_bindgen]
pub fn optimize(request: JsValue) -> Result<JsValue, JsValue> {
    let request: OptimizeRequest = serde_wasm_bindgen::from_value(request)
        .map_err(|e| JsValue::from_str(&format!("invalid request: {e}")))?;
    let response = api::optimize(&request).map_err(|e| JsValue::from_str(&e.to_string()))?;
    serde_wasm_bindgen::to_value(&response).map_err(|e| JsValue::from_str(&e.to_string()))
}
