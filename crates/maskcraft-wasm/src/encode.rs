//! PNG encoding WASM bindings.
//!
//! Both editors hand their results to the generator as PNG: the image as
//! RGBA, the mask as 8-bit greyscale.

use crate::types::{JsImage, JsMask};
use maskcraft_core::encode;
use wasm_bindgen::prelude::*;

/// Encode an RGBA image as PNG bytes.
#[wasm_bindgen]
pub fn encode_png(image: &JsImage) -> Result<Vec<u8>, JsValue> {
    let rgba = image.to_rgba().map_err(|e| JsValue::from_str(&e))?;
    encode::encode_png(&rgba)
        .map(|encoded| encoded.bytes)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Encode a mask as greyscale PNG bytes.
#[wasm_bindgen]
pub fn encode_mask_png(mask: &JsMask) -> Result<Vec<u8>, JsValue> {
    let gray = mask.to_gray().map_err(|e| JsValue::from_str(&e))?;
    encode::encode_png_mask(&gray)
        .map(|encoded| encoded.bytes)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}
