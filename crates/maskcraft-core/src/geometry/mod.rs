//! Coordinate-space primitives shared by both editors.
//!
//! # Coordinate Spaces
//!
//! - **Image space**: native pixel coordinates of the source bitmap, origin at
//!   its top-left corner.
//! - **Box space**: the fixed-aspect target rectangle, centred in the editing
//!   surface (region selector) or the canvas itself (mask painter).
//! - **Screen space**: pointer coordinates on the displayed surface.
//!
//! All angles follow the canvas convention: y grows downward, so a positive
//! rotation turns clockwise on screen.

mod affine;
mod rotation;

pub use affine::{Affine, ViewTransform};
pub use rotation::Rotation;

use serde::{Deserialize, Serialize};

/// A point in any of the coordinate spaces.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Component-wise difference `self - other`.
    pub fn delta(self, other: Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }
}

/// A floating-point extent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Size of a pixel buffer.
    pub fn of_pixels(width: u32, height: u32) -> Self {
        Self::new(width as f64, height as f64)
    }

    /// True if either side is zero, negative or not finite.
    pub fn is_degenerate(&self) -> bool {
        !(self.width.is_finite() && self.height.is_finite())
            || self.width <= 0.0
            || self.height <= 0.0
    }

    pub fn aspect_ratio(&self) -> f64 {
        self.width / self.height
    }
}

/// An integer pixel rectangle; `x + width` and `y + height` are exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl PixelRect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> u32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }

    /// Grow by `amount` on every side, clamped to a `bound_w x bound_h` buffer.
    pub fn padded(&self, amount: u32, bound_w: u32, bound_h: u32) -> PixelRect {
        let x = self.x.saturating_sub(amount);
        let y = self.y.saturating_sub(amount);
        let right = self.right().saturating_add(amount).min(bound_w);
        let bottom = self.bottom().saturating_add(amount).min(bound_h);
        PixelRect::new(x, y, right.saturating_sub(x), bottom.saturating_sub(y))
    }
}

/// Where a canvas is displayed on screen, possibly scaled by layout.
///
/// Converts pointer coordinates into canvas pixel coordinates the way the
/// painter's pointer handlers need them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DisplayRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl DisplayRect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Map a client point to canvas pixels. `None` if the rect has no area.
    pub fn to_canvas(&self, client: Point, canvas_width: u32, canvas_height: u32) -> Option<Point> {
        if Size::new(self.width, self.height).is_degenerate() {
            return None;
        }
        let scale_x = canvas_width as f64 / self.width;
        let scale_y = canvas_height as f64 / self.height;
        Some(Point::new(
            (client.x - self.left) * scale_x,
            (client.y - self.top) * scale_y,
        ))
    }
}
