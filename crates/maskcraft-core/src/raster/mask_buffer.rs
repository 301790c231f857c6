//! Owned, versioned grayscale mask buffer.

use image::{GrayImage, Luma};

use crate::geometry::{PixelRect, Point};

/// A grayscale edit mask.
///
/// Every mutating call bumps [`revision`](MaskBuffer::revision), so a caller
/// that caches a rendered overlay can tell when it is stale.
#[derive(Debug, Clone, PartialEq)]
pub struct MaskBuffer {
    pixels: GrayImage,
    revision: u64,
}

impl MaskBuffer {
    /// Create a `width x height` mask with every pixel set to `value`.
    pub fn filled(width: u32, height: u32, value: u8) -> Self {
        Self {
            pixels: GrayImage::from_pixel(width, height, Luma([value])),
            revision: 0,
        }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Intensity at `(x, y)`, or `None` outside the buffer.
    pub fn get(&self, x: u32, y: u32) -> Option<u8> {
        self.pixels.get_pixel_checked(x, y).map(|p| p.0[0])
    }

    pub fn as_gray(&self) -> &GrayImage {
        &self.pixels
    }

    pub fn to_gray(&self) -> GrayImage {
        self.pixels.clone()
    }

    pub fn into_gray(self) -> GrayImage {
        self.pixels
    }

    #[inline]
    fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }

    pub(crate) fn set(&mut self, x: u32, y: u32, value: u8) {
        self.pixels.put_pixel(x, y, Luma([value]));
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.touch();
    }

    /// Set every pixel to `value`.
    pub fn fill(&mut self, value: u8) {
        for p in self.pixels.pixels_mut() {
            p.0[0] = value;
        }
        self.touch();
    }

    /// Set every pixel inside `rect` (clipped to the buffer) to `value`.
    pub fn fill_rect(&mut self, rect: PixelRect, value: u8) {
        let right = rect.right().min(self.width());
        let bottom = rect.bottom().min(self.height());
        for y in rect.y.min(bottom)..bottom {
            for x in rect.x.min(right)..right {
                self.set(x, y, value);
            }
        }
        self.touch();
    }

    /// Stamp a round dab of `value` centred at `center`.
    ///
    /// Coverage is 1.0 within `inner_radius`, falls linearly to 0.0 at
    /// `radius`, and is zero beyond. With `inner_radius >= radius` the dab is
    /// a solid disc. Each pixel is blended toward `value` by its coverage,
    /// measured from the pixel centre.
    pub fn stamp(&mut self, center: Point, radius: f64, inner_radius: f64, value: u8) {
        if !(radius.is_finite() && radius > 0.0) || !center.x.is_finite() || !center.y.is_finite() {
            return;
        }
        let inner = inner_radius.clamp(0.0, radius);
        let (w, h) = self.dimensions();

        let x_start = (center.x - radius).floor().max(0.0) as u32;
        let y_start = (center.y - radius).floor().max(0.0) as u32;
        let x_end = ((center.x + radius).ceil().max(0.0) as u32).min(w);
        let y_end = ((center.y + radius).ceil().max(0.0) as u32).min(h);

        let target = value as f64;
        for y in y_start..y_end {
            for x in x_start..x_end {
                let dx = x as f64 + 0.5 - center.x;
                let dy = y as f64 + 0.5 - center.y;
                let dist = (dx * dx + dy * dy).sqrt();

                let coverage = if dist <= inner {
                    1.0
                } else if dist >= radius {
                    0.0
                } else {
                    (radius - dist) / (radius - inner)
                };

                if coverage <= 0.0 {
                    continue;
                }

                let old = self.pixels.get_pixel(x, y).0[0] as f64;
                let blended = old + (target - old) * coverage;
                self.set(x, y, blended.clamp(0.0, 255.0).round() as u8);
            }
        }
        self.touch();
    }

    /// Replace every intensity `v` with `255 - v`.
    pub fn invert(&mut self) {
        for p in self.pixels.pixels_mut() {
            p.0[0] = 255 - p.0[0];
        }
        self.touch();
    }

    /// Tight bounding box of the pixels whose intensity satisfies `predicate`.
    ///
    /// Returns `None` if no pixel matches. This is a full scan of the buffer.
    pub fn bounding_box<F>(&self, predicate: F) -> Option<PixelRect>
    where
        F: Fn(u8) -> bool,
    {
        let (w, h) = self.dimensions();
        let mut min_x = w;
        let mut min_y = h;
        let mut max_x = 0;
        let mut max_y = 0;
        let mut found = false;

        for (x, y, p) in self.pixels.enumerate_pixels() {
            if predicate(p.0[0]) {
                min_x = min_x.min(x);
                min_y = min_y.min(y);
                max_x = max_x.max(x);
                max_y = max_y.max(y);
                found = true;
            }
        }

        found.then(|| {
            let (width, height) = (max_x - min_x + 1, max_y - min_y + 1);
            PixelRect::new(min_x, min_y, width, height)
        })
    }

    /// A larger mask filled with `fill`, with this mask copied in at
    /// `(offset_x, offset_y)`.
    pub fn grown(
        &self,
        new_width: u32,
        new_height: u32,
        offset_x: u32,
        offset_y: u32,
        fill: u8,
    ) -> MaskBuffer {
        let mut grown = GrayImage::from_pixel(new_width, new_height, Luma([fill]));
        image::imageops::replace(&mut grown, &self.pixels, offset_x as i64, offset_y as i64);
        MaskBuffer {
            pixels: grown,
            revision: self.revision.wrapping_add(1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::{PRESERVE, REGENERATE};

    #[test]
    fn test_filled_and_get() {
        let mask = MaskBuffer::filled(4, 3, PRESERVE);
        assert_eq!(mask.dimensions(), (4, 3));
        assert_eq!(mask.get(3, 2), Some(0));
        assert_eq!(mask.get(4, 0), None);
    }

    #[test]
    fn test_revision_bumps_on_write() {
        let mut mask = MaskBuffer::filled(4, 4, PRESERVE);
        let r0 = mask.revision();
        mask.fill(REGENERATE);
        mask.invert();
        assert_eq!(mask.revision(), r0 + 2);
    }

    #[test]
    fn test_hard_stamp_covers_disc() {
        let mut mask = MaskBuffer::filled(200, 200, PRESERVE);
        mask.stamp(Point::new(100.0, 100.0), 20.0, 20.0, REGENERATE);

        assert_eq!(mask.get(100, 100), Some(255));
        // Pixel centre (119.5, 100.5) is within 19.5
        assert_eq!(mask.get(119, 100), Some(255));
        // Pixel centre (120.5, 100.5) is outside the disc
        assert_eq!(mask.get(120, 100), Some(0));
        // Diagonal corner of the square is outside the disc
        assert_eq!(mask.get(81, 81), Some(0));
    }

    #[test]
    fn test_hard_stamp_bounding_box() {
        let mut mask = MaskBuffer::filled(512, 512, PRESERVE);
        mask.stamp(Point::new(100.0, 100.0), 20.0, 20.0, REGENERATE);
        let bbox = mask.bounding_box(|v| v > 128).unwrap();
        assert_eq!(bbox, PixelRect::new(80, 80, 40, 40));
    }

    #[test]
    fn test_soft_stamp_falloff() {
        let mut mask = MaskBuffer::filled(200, 200, PRESERVE);
        // Inner radius 10, outer 40
        mask.stamp(Point::new(100.5, 100.5), 40.0, 10.0, REGENERATE);

        assert_eq!(mask.get(100, 100), Some(255));
        assert_eq!(mask.get(105, 100), Some(255));
        // 25px out: coverage (40-25)/30 = 0.5
        let mid = mask.get(125, 100).unwrap();
        assert!((mid as i32 - 128).abs() <= 1, "got {mid}");
        // Beyond the radius: untouched
        assert_eq!(mask.get(141, 100), Some(0));
    }

    #[test]
    fn test_soft_stamp_is_monotonic_outward() {
        let mut mask = MaskBuffer::filled(200, 200, PRESERVE);
        mask.stamp(Point::new(100.5, 100.5), 50.0, 0.0, REGENERATE);
        let mut prev = 255;
        for x in 100..160 {
            let v = mask.get(x, 100).unwrap();
            assert!(v <= prev);
            prev = v;
        }
    }

    #[test]
    fn test_eraser_stamp_paints_black() {
        let mut mask = MaskBuffer::filled(50, 50, REGENERATE);
        mask.stamp(Point::new(25.0, 25.0), 5.0, 5.0, PRESERVE);
        assert_eq!(mask.get(25, 25), Some(0));
        assert_eq!(mask.get(0, 0), Some(255));
    }

    #[test]
    fn test_stamp_off_canvas_is_clipped() {
        let mut mask = MaskBuffer::filled(10, 10, PRESERVE);
        mask.stamp(Point::new(-3.0, -3.0), 5.0, 5.0, REGENERATE);
        assert_eq!(mask.get(0, 0), Some(255));
        mask.stamp(Point::new(500.0, 500.0), 5.0, 5.0, REGENERATE);
        assert_eq!(mask.get(9, 9), Some(0));
    }

    #[test]
    fn test_invert_values() {
        let mut mask = MaskBuffer::filled(2, 1, 0);
        mask.set(1, 0, 100);
        mask.invert();
        assert_eq!(mask.get(0, 0), Some(255));
        assert_eq!(mask.get(1, 0), Some(155));
    }

    #[test]
    fn test_bounding_box_empty() {
        let mask = MaskBuffer::filled(20, 20, PRESERVE);
        assert!(mask.bounding_box(|v| v > 128).is_none());
    }

    #[test]
    fn test_fill_rect_clips() {
        let mut mask = MaskBuffer::filled(10, 10, PRESERVE);
        mask.fill_rect(PixelRect::new(8, 8, 5, 5), REGENERATE);
        assert_eq!(mask.get(9, 9), Some(255));
        assert_eq!(mask.get(7, 9), Some(0));
    }

    #[test]
    fn test_grown_copies_at_offset() {
        let mut mask = MaskBuffer::filled(4, 4, PRESERVE);
        mask.set(1, 2, 77);
        let grown = mask.grown(4, 10, 0, 6, REGENERATE);
        assert_eq!(grown.dimensions(), (4, 10));
        assert_eq!(grown.get(1, 8), Some(77));
        assert_eq!(grown.get(0, 0), Some(255));
        assert_eq!(grown.get(0, 6), Some(0));
    }
}
