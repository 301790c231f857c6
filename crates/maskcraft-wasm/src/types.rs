//! WASM-compatible wrapper types for image and mask data.
//!
//! These types hold pixel buffers in WASM memory and copy them out to
//! JavaScript on request.

use image::{GrayImage, RgbaImage};
use maskcraft_core::{EditKind, PaintExport, RegionExport};
use wasm_bindgen::prelude::*;

/// An RGBA image for JavaScript.
///
/// # Memory Management
///
/// `pixels()` copies the buffer into a fresh `Uint8Array`. It can be passed
/// straight to `new ImageData(new Uint8ClampedArray(pixels), width)`.
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct JsImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

#[wasm_bindgen]
impl JsImage {
    /// Create an image from RGBA bytes (4 per pixel, row-major).
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> JsImage {
        JsImage {
            width,
            height,
            pixels,
        }
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.pixels.len()
    }

    /// Returns RGBA pixel data as Uint8Array (copied).
    pub fn pixels(&self) -> Vec<u8> {
        self.pixels.clone()
    }

    /// Explicitly free WASM memory.
    pub fn free(self) {}
}

impl JsImage {
    pub(crate) fn from_rgba(image: RgbaImage) -> Self {
        Self {
            width: image.width(),
            height: image.height(),
            pixels: image.into_raw(),
        }
    }

    /// Copy into a core image. Fails when the buffer length does not match
    /// `width * height * 4`.
    pub(crate) fn to_rgba(&self) -> Result<RgbaImage, String> {
        RgbaImage::from_raw(self.width, self.height, self.pixels.clone()).ok_or_else(|| {
            format!(
                "Pixel buffer holds {} bytes, expected {} for {}x{} RGBA",
                self.pixels.len(),
                self.width as usize * self.height as usize * 4,
                self.width,
                self.height
            )
        })
    }
}

/// A single-channel mask for JavaScript: 0 keeps a pixel, 255 regenerates it.
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct JsMask {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

#[wasm_bindgen]
impl JsMask {
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns one intensity byte per pixel (copied).
    pub fn pixels(&self) -> Vec<u8> {
        self.pixels.clone()
    }

    /// Expand to opaque grey RGBA for drawing onto a canvas.
    pub fn to_rgba(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|&v| [v, v, v, 255]).collect()
    }
}

impl JsMask {
    pub(crate) fn from_gray(mask: GrayImage) -> Self {
        Self {
            width: mask.width(),
            height: mask.height(),
            pixels: mask.into_raw(),
        }
    }

    pub(crate) fn to_gray(&self) -> Result<GrayImage, String> {
        GrayImage::from_raw(self.width, self.height, self.pixels.clone()).ok_or_else(|| {
            format!(
                "Mask buffer holds {} bytes, expected {}",
                self.pixels.len(),
                self.width as usize * self.height as usize
            )
        })
    }
}

/// Image and optional mask produced by either editor.
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct JsExport {
    image: JsImage,
    mask: Option<JsMask>,
    kind: &'static str,
}

#[wasm_bindgen]
impl JsExport {
    #[wasm_bindgen(getter)]
    pub fn image(&self) -> JsImage {
        self.image.clone()
    }

    /// Missing for plain crops.
    #[wasm_bindgen(getter)]
    pub fn mask(&self) -> Option<JsMask> {
        self.mask.clone()
    }

    /// One of `crop`, `outpaint`, `inpaint`, `superzoom`.
    #[wasm_bindgen(getter)]
    pub fn kind(&self) -> String {
        self.kind.to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn is_outpaint(&self) -> bool {
        self.kind == "outpaint"
    }

    #[wasm_bindgen(getter)]
    pub fn is_super_zoom(&self) -> bool {
        self.kind == "superzoom"
    }
}

impl From<RegionExport> for JsExport {
    fn from(export: RegionExport) -> Self {
        let kind = if export.mask.is_some() { "outpaint" } else { "crop" };
        Self {
            image: JsImage::from_rgba(export.image),
            mask: export.mask.map(JsMask::from_gray),
            kind,
        }
    }
}

impl From<PaintExport> for JsExport {
    fn from(export: PaintExport) -> Self {
        let kind = match export.kind {
            EditKind::Inpaint => "inpaint",
            EditKind::Outpaint => "outpaint",
            EditKind::SuperZoom => "superzoom",
        };
        Self {
            image: JsImage::from_rgba(export.image),
            mask: Some(JsMask::from_gray(export.mask)),
            kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Luma, Rgba};

    #[test]
    fn test_js_image_round_trip() {
        let img = JsImage::new(2, 1, vec![1, 2, 3, 4, 5, 6, 7, 8]);
        let core = img.to_rgba().unwrap();
        assert_eq!(*core.get_pixel(1, 0), Rgba([5, 6, 7, 8]));
        let back = JsImage::from_rgba(core);
        assert_eq!(back.pixels(), img.pixels());
        assert_eq!(back.byte_length(), 8);
    }

    #[test]
    fn test_js_image_rejects_short_buffer() {
        let img = JsImage::new(10, 10, vec![0; 12]);
        let err = img.to_rgba().unwrap_err();
        assert!(err.contains("expected 400"));
    }

    #[test]
    fn test_mask_to_rgba() {
        let mask = JsMask::from_gray(GrayImage::from_pixel(2, 1, Luma([200])));
        assert_eq!(mask.to_rgba(), vec![200, 200, 200, 255, 200, 200, 200, 255]);
        assert_eq!(mask.to_gray().unwrap().get_pixel(1, 0).0[0], 200);
    }

    #[test]
    fn test_export_kinds() {
        let crop = JsExport::from(RegionExport {
            image: RgbaImage::new(2, 2),
            mask: None,
        });
        assert_eq!(crop.kind(), "crop");
        assert!(crop.mask().is_none());

        let zoom = JsExport::from(PaintExport {
            image: RgbaImage::new(2, 2),
            mask: GrayImage::new(2, 2),
            kind: EditKind::SuperZoom,
        });
        assert!(zoom.is_super_zoom());
        assert!(!zoom.is_outpaint());
        assert_eq!(zoom.mask().unwrap().width(), 2);
    }
}
