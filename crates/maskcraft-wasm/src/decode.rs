//! Image decoding WASM bindings.
//!
//! # Example
//!
//! ```typescript
//! import { decode_image } from '@maskcraft/wasm';
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const image = decode_image(bytes, file.type);
//! console.log(`Decoded ${image.width}x${image.height}`);
//! ```

use crate::types::JsImage;
use maskcraft_core::decode;
use wasm_bindgen::prelude::*;

/// Decode PNG or JPEG bytes into RGBA.
///
/// JPEG sources have their EXIF orientation applied, matching how a browser
/// shows them.
///
/// # Errors
///
/// Returns an error if the MIME type is not PNG or JPEG, or the bytes do not
/// decode.
#[wasm_bindgen]
pub fn decode_image(bytes: &[u8], mime_type: &str) -> Result<JsImage, JsValue> {
    decode::decode_image(bytes, mime_type)
        .map(JsImage::from_rgba)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Whether `mime_type` is a format [`decode_image`] accepts.
#[wasm_bindgen]
pub fn is_supported_mime(mime_type: &str) -> bool {
    decode::ImageFormatTag::from_mime(mime_type).is_ok()
}
