//! Maskcraft WASM - WebAssembly bindings for Maskcraft
//!
//! This crate exposes the maskcraft-core editors to JavaScript/TypeScript.
//!
//! # Module Structure
//!
//! - `types` - WASM-compatible wrappers for images, masks and exports
//! - `region` - Region selector (crop / outpaint)
//! - `paint` - Mask painter (brush, eraser, expand, super-zoom)
//! - `decode` - PNG / JPEG decoding
//! - `encode` - PNG encoding of exported images and masks
//!
//! # Usage
//!
//! ```typescript
//! import init, { decode_image, JsMaskPainter, encode_png, encode_mask_png }
//!   from '@maskcraft/wasm';
//!
//! await init();
//!
//! const image = decode_image(new Uint8Array(await file.arrayBuffer()), file.type);
//! const painter = new JsMaskPainter(false, undefined);
//! painter.load_image(image);
//! // ... pointer events ...
//! const result = painter.export();
//! const imagePng = encode_png(result.image);
//! const maskPng = encode_mask_png(result.mask);
//! ```

use wasm_bindgen::prelude::*;

mod config;
mod decode;
mod encode;
mod paint;
mod region;
mod types;

pub use decode::{decode_image, is_supported_mime};
pub use encode::{encode_mask_png, encode_png};
pub use paint::JsMaskPainter;
pub use region::{ratio_presets, JsRegionSelector};
pub use types::{JsExport, JsImage, JsMask};

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
