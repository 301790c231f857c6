//! Transformed drawing onto RGBA canvases and masks.

use image::{Rgba, RgbaImage};

use super::{composite_over, sample_bilinear, MaskBuffer};
use crate::geometry::{PixelRect, Point, ViewTransform};

/// A `width x height` canvas filled with `color`.
pub fn solid_canvas(width: u32, height: u32, color: [u8; 4]) -> RgbaImage {
    RgbaImage::from_pixel(width, height, Rgba(color))
}

/// Composite `color` over every pixel of `rect`, clipped to the canvas.
pub fn fill_rect(canvas: &mut RgbaImage, rect: PixelRect, color: [u8; 4]) {
    let right = rect.right().min(canvas.width());
    let bottom = rect.bottom().min(canvas.height());
    for y in rect.y.min(bottom)..bottom {
        for x in rect.x.min(right)..right {
            composite_over(canvas.get_pixel_mut(x, y), color);
        }
    }
}

/// Destination pixel range `(x0, y0, x1, y1)` that can be touched by the
/// transformed image, intersected with the target and the optional clip.
fn footprint_span(
    target_w: u32,
    target_h: u32,
    view: &ViewTransform,
    clip: Option<PixelRect>,
) -> Option<(u32, u32, u32, u32)> {
    let size = view.image_size();
    let corners = [
        Point::new(0.0, 0.0),
        Point::new(size.width, 0.0),
        Point::new(0.0, size.height),
        Point::new(size.width, size.height),
    ]
    .map(|p| view.to_screen_space(p));

    let min_x = corners.iter().map(|p| p.x).fold(f64::INFINITY, f64::min);
    let max_x = corners.iter().map(|p| p.x).fold(f64::NEG_INFINITY, f64::max);
    let min_y = corners.iter().map(|p| p.y).fold(f64::INFINITY, f64::min);
    let max_y = corners.iter().map(|p| p.y).fold(f64::NEG_INFINITY, f64::max);

    let (mut x0, mut y0, mut x1, mut y1) = (0u32, 0u32, target_w, target_h);
    if let Some(c) = clip {
        x0 = c.x;
        y0 = c.y;
        x1 = c.right().min(target_w);
        y1 = c.bottom().min(target_h);
    }

    // One pixel of slack on each side for the inclusive edge test
    let fx0 = (min_x.floor() - 1.0).max(0.0) as u32;
    let fy0 = (min_y.floor() - 1.0).max(0.0) as u32;
    let fx1 = (max_x.ceil() + 1.0).max(0.0).min(u32::MAX as f64) as u32;
    let fy1 = (max_y.ceil() + 1.0).max(0.0).min(u32::MAX as f64) as u32;

    let x0 = x0.max(fx0);
    let y0 = y0.max(fy0);
    let x1 = x1.min(fx1);
    let y1 = y1.min(fy1);

    (x0 < x1 && y0 < y1).then_some((x0, y0, x1, y1))
}

/// Visit every destination pixel whose centre lies on the image footprint.
fn for_each_covered<F>(
    target_w: u32,
    target_h: u32,
    view: &ViewTransform,
    clip: Option<PixelRect>,
    mut visit: F,
) -> u64
where
    F: FnMut(u32, u32, Point),
{
    let Some((x0, y0, x1, y1)) = footprint_span(target_w, target_h, view, clip) else {
        return 0;
    };

    let mut covered = 0u64;
    for y in y0..y1 {
        for x in x0..x1 {
            let centre = Point::new(x as f64 + 0.5, y as f64 + 0.5);
            if view.covers(centre) {
                visit(x, y, view.to_image_space(centre));
                covered += 1;
            }
        }
    }
    covered
}

/// Draw `src` onto `dst` through `view`, compositing source-over.
///
/// Returns the number of destination pixels covered by the image.
pub fn draw_transformed(
    dst: &mut RgbaImage,
    src: &RgbaImage,
    view: &ViewTransform,
    clip: Option<PixelRect>,
) -> u64 {
    let (w, h) = dst.dimensions();
    for_each_covered(w, h, view, clip, |x, y, p| {
        let pixel = sample_bilinear(src, p.x, p.y);
        composite_over(dst.get_pixel_mut(x, y), pixel);
    })
}

/// Set `value` on every mask pixel covered by the image footprint under
/// `view`. Uses the same coverage test as [`draw_transformed`].
pub fn fill_footprint(
    mask: &mut MaskBuffer,
    view: &ViewTransform,
    value: u8,
    clip: Option<PixelRect>,
) -> u64 {
    let (w, h) = mask.dimensions();
    let covered = for_each_covered(w, h, view, clip, |x, y, _| mask.set(x, y, value));
    mask.mark_dirty();
    covered
}

/// Composite `tint` over `dst`, weighted per pixel by mask intensity.
///
/// A white mask pixel receives the tint at its full alpha; a black one is
/// left untouched. The mask must match the canvas dimensions.
pub fn tint_by_mask(dst: &mut RgbaImage, mask: &MaskBuffer, tint: [u8; 4]) {
    if dst.dimensions() != mask.dimensions() {
        return;
    }
    for (x, y, pixel) in dst.enumerate_pixels_mut() {
        let weight = mask.get(x, y).unwrap_or(0) as u32;
        if weight == 0 {
            continue;
        }
        let alpha = (tint[3] as u32 * weight + 127) / 255;
        composite_over(pixel, [tint[0], tint[1], tint[2], alpha as u8]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Rotation, Size};

    fn view(center: Point, rotation: Rotation, scale: f64, w: f64, h: f64) -> ViewTransform {
        ViewTransform::new(center, rotation, scale, Size::new(w, h)).unwrap()
    }

    #[test]
    fn test_draw_identity_copies_pixels() {
        let src = RgbaImage::from_fn(4, 4, |x, y| Rgba([(x * 60) as u8, (y * 60) as u8, 0, 255]));
        let mut dst = solid_canvas(4, 4, [0, 0, 0, 255]);
        let vt = view(Point::new(2.0, 2.0), Rotation::Deg0, 1.0, 4.0, 4.0);
        let covered = draw_transformed(&mut dst, &src, &vt, None);
        assert_eq!(covered, 16);
        assert_eq!(dst, src);
    }

    #[test]
    fn test_draw_rotated_90() {
        // 2x1 image: left red, right blue. After +90° the red pixel is on top.
        let mut src = RgbaImage::new(2, 1);
        src.put_pixel(0, 0, Rgba([255, 0, 0, 255]));
        src.put_pixel(1, 0, Rgba([0, 0, 255, 255]));
        let mut dst = solid_canvas(1, 2, [0, 0, 0, 255]);
        let vt = view(Point::new(0.5, 1.0), Rotation::Deg90, 1.0, 2.0, 1.0);
        draw_transformed(&mut dst, &src, &vt, None);
        assert_eq!(dst.get_pixel(0, 0).0, [255, 0, 0, 255]);
        assert_eq!(dst.get_pixel(0, 1).0, [0, 0, 255, 255]);
    }

    #[test]
    fn test_draw_respects_clip() {
        let src = RgbaImage::from_pixel(10, 10, Rgba([255, 255, 255, 255]));
        let mut dst = solid_canvas(10, 10, [0, 0, 0, 255]);
        let vt = view(Point::new(5.0, 5.0), Rotation::Deg0, 1.0, 10.0, 10.0);
        let covered = draw_transformed(&mut dst, &src, &vt, Some(PixelRect::new(2, 2, 3, 3)));
        assert_eq!(covered, 9);
        assert_eq!(dst.get_pixel(0, 0).0, [0, 0, 0, 255]);
        assert_eq!(dst.get_pixel(3, 3).0, [255, 255, 255, 255]);
    }

    #[test]
    fn test_draw_off_canvas_covers_nothing() {
        let src = RgbaImage::from_pixel(4, 4, Rgba([255, 255, 255, 255]));
        let mut dst = solid_canvas(4, 4, [0, 0, 0, 255]);
        let vt = view(Point::new(-50.0, -50.0), Rotation::Deg0, 1.0, 4.0, 4.0);
        assert_eq!(draw_transformed(&mut dst, &src, &vt, None), 0);
    }

    #[test]
    fn test_footprint_matches_drawn_pixels() {
        let src = RgbaImage::from_pixel(30, 20, Rgba([255, 255, 255, 255]));
        let mut dst = solid_canvas(64, 64, [0, 0, 0, 255]);
        let mut mask = MaskBuffer::filled(64, 64, 255);
        let vt = view(Point::new(31.3, 29.7), Rotation::Deg270, 1.37, 30.0, 20.0);

        let drawn = draw_transformed(&mut dst, &src, &vt, None);
        let marked = fill_footprint(&mut mask, &vt, 0, None);
        assert_eq!(drawn, marked);

        for (x, y, p) in dst.enumerate_pixels() {
            let image_pixel = p.0 == [255, 255, 255, 255];
            let preserved = mask.get(x, y) == Some(0);
            assert_eq!(image_pixel, preserved, "mismatch at ({x}, {y})");
        }
    }

    #[test]
    fn test_fill_rect_composites() {
        let mut canvas = solid_canvas(4, 4, [200, 200, 200, 255]);
        fill_rect(&mut canvas, PixelRect::new(0, 0, 2, 4), [0, 0, 0, 128]);
        assert!((canvas.get_pixel(0, 0).0[0] as i32 - 100).abs() <= 1);
        assert_eq!(canvas.get_pixel(3, 0).0, [200, 200, 200, 255]);
    }

    #[test]
    fn test_tint_by_mask_weights() {
        let mut canvas = solid_canvas(2, 1, [0, 0, 0, 0]);
        let mut mask = MaskBuffer::filled(2, 1, 0);
        mask.set(1, 0, 255);
        tint_by_mask(&mut canvas, &mask, [239, 68, 68, 102]);
        assert_eq!(canvas.get_pixel(0, 0).0, [0, 0, 0, 0]);
        assert_eq!(canvas.get_pixel(1, 0).0, [239, 68, 68, 102]);
    }
}
