//! Flattening and super-zoom export for the mask painter.

use image::{imageops, GrayImage, RgbaImage};
use serde::{Deserialize, Serialize};

use crate::config::PainterConfig;
use crate::error::EditorError;
use crate::geometry::{Point, Rotation, Size, ViewTransform};
use crate::raster::{
    draw_transformed, fill_footprint, solid_canvas, MaskBuffer, PRESERVE, REGENERATE,
};

const BACKGROUND: [u8; 4] = [0, 0, 0, 255];

/// What a painter export is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EditKind {
    /// Canvas matches the image; the mask marks pixels to regenerate.
    Inpaint,
    /// Canvas was expanded beyond the image.
    Outpaint,
    /// A zoomed crop of the painted region with surrounding context to
    /// generate.
    SuperZoom,
}

/// Image and mask handed to the generator.
#[derive(Debug, Clone, PartialEq)]
pub struct PaintExport {
    pub image: RgbaImage,
    pub mask: GrayImage,
    pub kind: EditKind,
}

impl PaintExport {
    pub fn is_outpaint(&self) -> bool {
        self.kind == EditKind::Outpaint
    }

    pub fn is_super_zoom(&self) -> bool {
        self.kind == EditKind::SuperZoom
    }
}

/// The base image drawn at `(offset_x, offset_y)` on a black canvas.
pub(super) fn compose(
    base: &RgbaImage,
    canvas_w: u32,
    canvas_h: u32,
    offset_x: u32,
    offset_y: u32,
) -> RgbaImage {
    let mut canvas = solid_canvas(canvas_w, canvas_h, BACKGROUND);
    imageops::overlay(&mut canvas, base, offset_x as i64, offset_y as i64);
    canvas
}

/// Crop the painted region out of `composed` and scale it into the centre
/// of a square output.
///
/// The selection is every mask pixel above `selection_threshold`, padded and
/// clamped to the canvas. The companion mask is black exactly where the crop
/// lands.
pub(super) fn super_zoom(
    composed: &RgbaImage,
    mask: &MaskBuffer,
    config: &PainterConfig,
) -> Result<PaintExport, EditorError> {
    let threshold = config.selection_threshold;
    let selection = mask
        .bounding_box(|v| v > threshold)
        .ok_or(EditorError::EmptySelection)?;
    let crop = selection.padded(config.zoom_padding, mask.width(), mask.height());

    let region = imageops::crop_imm(composed, crop.x, crop.y, crop.width, crop.height).to_image();

    let size = config.zoom_output_size;
    let longest = crop.width.max(crop.height) as f64;
    let scale = size as f64 * config.zoom_fill_fraction / longest;
    let centre = size as f64 / 2.0;
    let view = ViewTransform::new(
        Point::new(centre, centre),
        Rotation::Deg0,
        scale,
        Size::of_pixels(crop.width, crop.height),
    )
    .ok_or(EditorError::EmptySelection)?;

    let mut image = solid_canvas(size, size, BACKGROUND);
    draw_transformed(&mut image, &region, &view, None);

    let mut zoom_mask = MaskBuffer::filled(size, size, REGENERATE);
    fill_footprint(&mut zoom_mask, &view, PRESERVE, None);

    tracing::debug!(
        x = crop.x,
        y = crop.y,
        width = crop.width,
        height = crop.height,
        scale,
        "super-zoom region exported"
    );

    Ok(PaintExport {
        image,
        mask: zoom_mask.into_gray(),
        kind: EditKind::SuperZoom,
    })
}
