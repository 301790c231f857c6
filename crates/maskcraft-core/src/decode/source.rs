//! Decoding uploaded bytes into an RGBA bitmap.

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::{DynamicImage, ImageReader, RgbaImage};

use super::{DecodeError, ImageFormatTag, Orientation};

/// Decode `bytes` of the given MIME type into an RGBA bitmap.
///
/// JPEG sources have their EXIF orientation applied.
///
/// # Errors
///
/// - `UnsupportedFormat` if `mime` is not PNG or JPEG
/// - `CorruptedFile` if the bytes do not decode as that format
/// - `EmptyImage` if the decoded image has no pixels
pub fn decode_image(bytes: &[u8], mime: &str) -> Result<RgbaImage, DecodeError> {
    let format = ImageFormatTag::from_mime(mime)?;

    let mut reader = ImageReader::new(Cursor::new(bytes));
    reader.set_format(format.to_image_format());
    let img = reader
        .decode()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    let img = match format {
        ImageFormatTag::Jpeg => apply_orientation(img, get_orientation(bytes)),
        ImageFormatTag::Png => img,
    };

    let rgba = img.into_rgba8();
    if rgba.width() == 0 || rgba.height() == 0 {
        return Err(DecodeError::EmptyImage);
    }

    tracing::debug!(
        width = rgba.width(),
        height = rgba.height(),
        format = format.mime_type(),
        "decoded source image"
    );
    Ok(rgba)
}

/// Read the EXIF orientation from image bytes.
///
/// Returns `Orientation::Normal` when there is no EXIF block.
pub fn get_orientation(bytes: &[u8]) -> Orientation {
    let mut cursor = Cursor::new(bytes);
    Reader::new()
        .read_from_container(&mut cursor)
        .ok()
        .and_then(|exif| {
            exif.get_field(Tag::Orientation, In::PRIMARY)
                .and_then(|field| field.value.get_uint(0))
        })
        .map(Orientation::from)
        .unwrap_or_default()
}

fn apply_orientation(img: DynamicImage, orientation: Orientation) -> DynamicImage {
    match orientation {
        Orientation::Normal => img,
        Orientation::FlipHorizontal => img.fliph(),
        Orientation::Rotate180 => img.rotate180(),
        Orientation::FlipVertical => img.flipv(),
        Orientation::Transpose => img.rotate90().fliph(),
        Orientation::Rotate90CW => img.rotate90(),
        Orientation::Transverse => img.rotate270().fliph(),
        Orientation::Rotate270CW => img.rotate270(),
    }
}
