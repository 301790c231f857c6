//! PNG encoding for exported images and masks.

use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, GrayImage, ImageEncoder, RgbaImage};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur during PNG encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// PNG encoding failed
    #[error("PNG encoding failed: {0}")]
    EncodingFailed(String),
}

/// Encoded bytes with their MIME type, ready for the generation backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodedImage {
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

fn encode(
    pixels: &[u8],
    width: u32,
    height: u32,
    color: ExtendedColorType,
) -> Result<EncodedImage, EncodeError> {
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let mut bytes = Vec::new();
    PngEncoder::new(&mut bytes)
        .write_image(pixels, width, height, color)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(EncodedImage {
        bytes,
        mime_type: "image/png".to_string(),
    })
}

/// Encode an RGBA image as PNG.
pub fn encode_png(image: &RgbaImage) -> Result<EncodedImage, EncodeError> {
    let (width, height) = image.dimensions();
    encode(image.as_raw(), width, height, ExtendedColorType::Rgba8)
}

/// Encode a grayscale mask as an 8-bit grayscale PNG.
pub fn encode_png_mask(mask: &GrayImage) -> Result<EncodedImage, EncodeError> {
    let (width, height) = mask.dimensions();
    encode(mask.as_raw(), width, height, ExtendedColorType::L8)
}
