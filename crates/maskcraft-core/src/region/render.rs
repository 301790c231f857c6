//! Preview and export rendering for the region selector.

use image::{GrayImage, RgbaImage};

use super::{Constraints, SelectorMode};
use crate::config::SelectorConfig;
use crate::geometry::{PixelRect, Point, Rotation, Size, ViewTransform};
use crate::raster::{
    draw_transformed, fill_footprint, fill_rect, solid_canvas, MaskBuffer, PRESERVE, REGENERATE,
};

const SURFACE_COLOR: [u8; 4] = [2, 6, 23, 255];
const BOX_COLOR: [u8; 4] = [30, 41, 59, 255];
const VEIL_COLOR: [u8; 4] = [0, 0, 0, 217];
const CROP_BORDER: [u8; 4] = [255, 255, 255, 255];
const OUTPAINT_BORDER: [u8; 4] = [59, 130, 246, 255];
const GUIDE_COLOR: [u8; 4] = [255, 255, 255, 102];
const EXPORT_BACKGROUND: [u8; 4] = [0, 0, 0, 255];

/// Result of [`RegionSelector::export`](super::RegionSelector::export).
#[derive(Debug, Clone, PartialEq)]
pub struct RegionExport {
    pub image: RgbaImage,
    /// Outpaint only: white where content must be generated, black over
    /// the image.
    pub mask: Option<GrayImage>,
}

pub(super) fn preview(
    image: &RgbaImage,
    constraints: &Constraints,
    view: &ViewTransform,
    mode: SelectorMode,
) -> RgbaImage {
    let width = constraints.surface.width.round().max(1.0) as u32;
    let height = constraints.surface.height.round().max(1.0) as u32;
    let mut canvas = solid_canvas(width, height, SURFACE_COLOR);
    let frame = constraints.box_pixels();

    fill_rect(&mut canvas, frame, BOX_COLOR);
    draw_transformed(&mut canvas, image, view, Some(frame));

    for band in outside(frame, width, height) {
        fill_rect(&mut canvas, band, VEIL_COLOR);
    }

    let border = match mode {
        SelectorMode::Crop => CROP_BORDER,
        SelectorMode::Outpaint => OUTPAINT_BORDER,
    };
    for edge in outline(frame, 2) {
        fill_rect(&mut canvas, edge, border);
    }

    if mode == SelectorMode::Crop {
        for guide in thirds(frame) {
            fill_rect(&mut canvas, guide, GUIDE_COLOR);
        }
    }

    canvas
}

/// Render at `config.output_width` pixels wide, keeping the box aspect.
///
/// A box tall enough to push the height past `config.max_output_dimension`
/// is rendered that high instead, with the width narrowed to match. The view
/// is the preview's, scaled by the output-to-box ratio of the limiting side.
pub(super) fn export(
    image: &RgbaImage,
    constraints: &Constraints,
    offset: Point,
    scale: f64,
    rotation: Rotation,
    mode: SelectorMode,
    config: &SelectorConfig,
) -> Option<RegionExport> {
    let (out_w, out_h, ratio) = output_size(
        constraints.box_size,
        config.output_width,
        config.max_output_dimension,
    );

    let view = ViewTransform::new(
        Point::new(
            out_w as f64 / 2.0 + offset.x * ratio,
            out_h as f64 / 2.0 + offset.y * ratio,
        ),
        rotation,
        scale * ratio,
        Size::of_pixels(image.width(), image.height()),
    )?;

    let mut canvas = solid_canvas(out_w, out_h, EXPORT_BACKGROUND);
    draw_transformed(&mut canvas, image, &view, None);

    let mask = match mode {
        SelectorMode::Crop => None,
        SelectorMode::Outpaint => {
            let mut mask = MaskBuffer::filled(out_w, out_h, REGENERATE);
            fill_footprint(&mut mask, &view, PRESERVE, None);
            Some(mask.into_gray())
        }
    };

    Some(RegionExport {
        image: canvas,
        mask,
    })
}

/// Export dimensions and the output-to-box ratio for a box of `box_size`.
fn output_size(box_size: Size, output_width: u32, max_dimension: u32) -> (u32, u32, f64) {
    let aspect = box_size.aspect_ratio();
    let max_dimension = max_dimension.max(1);
    let out_w = output_width.clamp(1, max_dimension);
    let out_h = (out_w as f64 / aspect).round().max(1.0);
    if out_h <= max_dimension as f64 {
        return (out_w, out_h as u32, out_w as f64 / box_size.width);
    }

    let out_h = max_dimension;
    let out_w = (out_h as f64 * aspect).round().clamp(1.0, max_dimension as f64) as u32;
    tracing::warn!(
        requested_width = output_width,
        width = out_w,
        height = out_h,
        "export height capped; width narrowed to keep the box aspect"
    );
    (out_w, out_h, out_h as f64 / box_size.height)
}

/// The four bands of a `width x height` canvas around `frame`.
fn outside(frame: PixelRect, width: u32, height: u32) -> [PixelRect; 4] {
    let right = frame.right().min(width);
    let bottom = frame.bottom().min(height);
    [
        PixelRect::new(0, 0, width, frame.y),
        PixelRect::new(0, bottom, width, height.saturating_sub(bottom)),
        PixelRect::new(0, frame.y, frame.x, bottom.saturating_sub(frame.y)),
        PixelRect::new(
            right,
            frame.y,
            width.saturating_sub(right),
            bottom.saturating_sub(frame.y),
        ),
    ]
}

/// A stroke of `thickness` centred on the edges of `frame`.
fn outline(frame: PixelRect, thickness: u32) -> [PixelRect; 4] {
    let half = thickness / 2;
    let x = frame.x.saturating_sub(half);
    let y = frame.y.saturating_sub(half);
    let outer_w = frame.right() + half - x;
    let outer_h = frame.bottom() + half - y;
    [
        PixelRect::new(x, y, outer_w, thickness),
        PixelRect::new(x, frame.bottom().saturating_sub(half), outer_w, thickness),
        PixelRect::new(x, y, thickness, outer_h),
        PixelRect::new(frame.right().saturating_sub(half), y, thickness, outer_h),
    ]
}

/// One-pixel rule-of-thirds lines inside `frame`.
fn thirds(frame: PixelRect) -> [PixelRect; 4] {
    let third_x = |k: u32| frame.x + (frame.width as f64 * k as f64 / 3.0).round() as u32;
    let third_y = |k: u32| frame.y + (frame.height as f64 * k as f64 / 3.0).round() as u32;
    [
        PixelRect::new(third_x(1), frame.y, 1, frame.height),
        PixelRect::new(third_x(2), frame.y, 1, frame.height),
        PixelRect::new(frame.x, third_y(1), frame.width, 1),
        PixelRect::new(frame.x, third_y(2), frame.width, 1),
    ]
}
