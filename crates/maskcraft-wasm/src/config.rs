//! Editor configuration passed from JavaScript.

use maskcraft_core::EditorConfig;
use wasm_bindgen::prelude::*;

/// Parse an optional configuration object. `undefined` and `null` give the
/// defaults; missing fields take their default values.
pub(crate) fn parse_config(value: JsValue) -> Result<EditorConfig, JsValue> {
    if value.is_undefined() || value.is_null() {
        return Ok(EditorConfig::default());
    }
    let config: EditorConfig = serde_wasm_bindgen::from_value(value)
        .map_err(|e| JsValue::from_str(&format!("Invalid editor config: {e}")))?;
    config.validate().map_err(|e| JsValue::from_str(&e.to_string()))?;
    Ok(config)
}

/// Report a rejected editor operation on the browser console and convert it
/// into a JS error.
pub(crate) fn rejected(err: impl std::fmt::Display) -> JsValue {
    let message = err.to_string();
    #[cfg(target_arch = "wasm32")]
    web_sys::console::warn_1(&JsValue::from_str(&message));
    JsValue::from_str(&message)
}
