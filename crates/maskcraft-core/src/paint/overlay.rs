//! On-screen composite of the base image and the mask tint.

use image::{imageops, RgbaImage};

use super::PaintTool;
use crate::raster::{tint_by_mask, MaskBuffer};

/// Red tint shown for brush and eraser.
pub const EDIT_TINT: [u8; 4] = [239, 68, 68, 102];
/// Emerald tint shown for the super-zoom tool.
pub const ZOOM_TINT: [u8; 4] = [16, 185, 129, 102];

pub(super) fn tint_for(tool: PaintTool) -> [u8; 4] {
    match tool {
        PaintTool::SuperZoom => ZOOM_TINT,
        PaintTool::Brush | PaintTool::Eraser => EDIT_TINT,
    }
}

/// Base image at its offset on a transparent canvas, with the mask tinted
/// over it when `show_mask` is set.
pub(super) fn render(
    base: &RgbaImage,
    mask: &MaskBuffer,
    offset: (u32, u32),
    tool: PaintTool,
    show_mask: bool,
) -> RgbaImage {
    let (width, height) = mask.dimensions();
    let mut canvas = RgbaImage::new(width, height);
    imageops::overlay(&mut canvas, base, offset.0 as i64, offset.1 as i64);
    if show_mask {
        tint_by_mask(&mut canvas, mask, tint_for(tool));
    }
    canvas
}
