//! Box geometry and scale limits for the region selector.

use super::{AspectRatio, SelectorMode};
use crate::geometry::{PixelRect, Point, Rotation, Size};

/// Geometry derived from the surface, image, rotation, ratio and mode.
///
/// Recomputed only when one of those inputs changes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Constraints {
    /// Editing surface size
    pub surface: Size,
    /// Target box size in surface pixels
    pub box_size: Size,
    /// Top-left of the target box in surface pixels
    pub box_origin: Point,
    /// Image size as seen by the box (width/height swapped at 90° and 270°)
    pub image_size: Size,
    /// Scale at which the whole image is visible inside the box
    pub fit_scale: f64,
    /// Lowest scale the mode allows
    pub min_scale: f64,
}

impl Constraints {
    /// Compute the box and scale limits.
    ///
    /// The box is the largest rectangle of the target ratio that fits the
    /// surface minus `padding` on each side. In crop mode the floor is the
    /// covering scale; in outpaint mode it is `outpaint_floor × fit_scale`.
    ///
    /// Returns `None` when the surface, padding or image leave no area.
    pub fn compute(
        surface: Size,
        padding: f64,
        image: Size,
        rotation: Rotation,
        ratio: AspectRatio,
        mode: SelectorMode,
        outpaint_floor: f64,
    ) -> Option<Constraints> {
        if surface.is_degenerate() || image.is_degenerate() {
            return None;
        }

        let inset = padding * 2.0;
        let avail = Size::new(surface.width - inset, surface.height - inset);
        if avail.is_degenerate() {
            return None;
        }

        let (img_w, img_h) = rotation.rotated_size(image.width, image.height);
        let effective_ratio = ratio.resolve(img_w / img_h);
        if !(effective_ratio.is_finite() && effective_ratio > 0.0) {
            return None;
        }

        let box_size = if effective_ratio > avail.aspect_ratio() {
            Size::new(avail.width, avail.width / effective_ratio)
        } else {
            Size::new(avail.height * effective_ratio, avail.height)
        };
        if box_size.is_degenerate() {
            return None;
        }

        let scale_x = box_size.width / img_w;
        let scale_y = box_size.height / img_h;
        let fit_scale = scale_x.min(scale_y);
        let min_scale = match mode {
            SelectorMode::Crop => scale_x.max(scale_y),
            SelectorMode::Outpaint => fit_scale * outpaint_floor,
        };

        Some(Constraints {
            surface,
            box_size,
            box_origin: Point::new(
                (surface.width - box_size.width) / 2.0,
                (surface.height - box_size.height) / 2.0,
            ),
            image_size: Size::new(img_w, img_h),
            fit_scale,
            min_scale,
        })
    }

    pub fn box_center(&self) -> Point {
        Point::new(
            self.box_origin.x + self.box_size.width / 2.0,
            self.box_origin.y + self.box_size.height / 2.0,
        )
    }

    /// The box snapped to whole surface pixels.
    pub fn box_pixels(&self) -> PixelRect {
        let x = self.box_origin.x.round().max(0.0);
        let y = self.box_origin.y.round().max(0.0);
        let right = (self.box_origin.x + self.box_size.width).round().max(x);
        let bottom = (self.box_origin.y + self.box_size.height).round().max(y);
        PixelRect::new(x as u32, y as u32, (right - x) as u32, (bottom - y) as u32)
    }

    /// Scale the mode's floor applies to a requested scale.
    pub fn effective_scale(&self, scale: f64) -> f64 {
        scale.max(self.min_scale)
    }

    /// Scale a freshly loaded, rotated or re-ratioed image starts at.
    pub fn default_scale(&self, mode: SelectorMode, outpaint_default: f64) -> f64 {
        match mode {
            SelectorMode::Crop => self.min_scale,
            SelectorMode::Outpaint => self.fit_scale * outpaint_default,
        }
    }

    /// Clamp `offset` so a crop never reveals the box background.
    ///
    /// Per axis `|offset| <= (rendered - box) / 2`, floored at zero. Outpaint
    /// offsets pass through unchanged.
    pub fn clamp_offset(&self, offset: Point, scale: f64, mode: SelectorMode) -> Point {
        match mode {
            SelectorMode::Outpaint => offset,
            SelectorMode::Crop => {
                let active = self.effective_scale(scale);
                let slack = |image: f64, frame: f64| ((image * active - frame) / 2.0).max(0.0);
                let max_dx = slack(self.image_size.width, self.box_size.width);
                let max_dy = slack(self.image_size.height, self.box_size.height);
                Point::new(
                    offset.x.clamp(-max_dx, max_dx),
                    offset.y.clamp(-max_dy, max_dy),
                )
            }
        }
    }
}

/// Free-function form of [`Constraints::compute`].
pub fn compute_constraints(
    surface: Size,
    padding: f64,
    image: Size,
    rotation: Rotation,
    ratio: AspectRatio,
    mode: SelectorMode,
    outpaint_floor: f64,
) -> Option<Constraints> {
    Constraints::compute(
        surface,
        padding,
        image,
        rotation,
        ratio,
        mode,
        outpaint_floor,
    )
}
