//! Pixel sampling and alpha compositing.

use image::{Rgba, RgbaImage};

/// Get a pixel as [f32; 4].
#[inline]
fn get_pixel_f32(image: &RgbaImage, px: u32, py: u32) -> [f32; 4] {
    let p = image.get_pixel(px, py).0;
    [p[0] as f32, p[1] as f32, p[2] as f32, p[3] as f32]
}

/// Sample an RGBA image with bilinear interpolation.
///
/// `x` and `y` are image-space coordinates where pixel `i` has its centre at
/// `i + 0.5`. Neighbours outside the image are clamped to the edge, so a
/// uniform image samples to the same colour everywhere, including its border.
/// Whether a point is on the image at all is the caller's decision.
pub fn sample_bilinear(image: &RgbaImage, x: f64, y: f64) -> [u8; 4] {
    let (w, h) = image.dimensions();
    if w == 0 || h == 0 {
        return [0, 0, 0, 0];
    }

    let max_x = (w - 1) as f64;
    let max_y = (h - 1) as f64;
    let sx = (x - 0.5).clamp(0.0, max_x);
    let sy = (y - 0.5).clamp(0.0, max_y);

    let x0 = sx.floor() as u32;
    let y0 = sy.floor() as u32;
    let x1 = (x0 + 1).min(w - 1);
    let y1 = (y0 + 1).min(h - 1);

    // Fractional distances
    let fx = (sx - x0 as f64) as f32;
    let fy = (sy - y0 as f64) as f32;

    let p00 = get_pixel_f32(image, x0, y0);
    let p10 = get_pixel_f32(image, x1, y0);
    let p01 = get_pixel_f32(image, x0, y1);
    let p11 = get_pixel_f32(image, x1, y1);

    let mut result = [0u8; 4];
    for i in 0..4 {
        let v = p00[i] * (1.0 - fx) * (1.0 - fy)
            + p10[i] * fx * (1.0 - fy)
            + p01[i] * (1.0 - fx) * fy
            + p11[i] * fx * fy;
        result[i] = v.clamp(0.0, 255.0).round() as u8;
    }

    result
}

/// Composite `src` over `dst` (straight alpha, source-over).
#[inline]
pub fn composite_over(dst: &mut Rgba<u8>, src: [u8; 4]) {
    let sa = src[3] as f32 / 255.0;
    if src[3] == 255 {
        dst.0 = src;
        return;
    }
    if src[3] == 0 {
        return;
    }

    let da = dst.0[3] as f32 / 255.0;
    let out_a = sa + da * (1.0 - sa);
    for i in 0..3 {
        let c = (src[i] as f32 * sa + dst.0[i] as f32 * da * (1.0 - sa)) / out_a;
        dst.0[i] = c.clamp(0.0, 255.0).round() as u8;
    }
    dst.0[3] = (out_a * 255.0).clamp(0.0, 255.0).round() as u8;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_fn(width, height, |x, _| Rgba([(x * 10) as u8, 0, 0, 255]))
    }

    #[test]
    fn test_sample_at_pixel_centre_is_exact() {
        let img = gradient(10, 4);
        assert_eq!(sample_bilinear(&img, 3.5, 1.5), [30, 0, 0, 255]);
    }

    #[test]
    fn test_sample_between_pixels() {
        let img = gradient(10, 4);
        // Halfway between pixel 3 (30) and pixel 4 (40)
        assert_eq!(sample_bilinear(&img, 4.0, 1.5)[0], 35);
    }

    #[test]
    fn test_sample_clamps_at_edges() {
        let img = gradient(10, 4);
        assert_eq!(sample_bilinear(&img, 0.0, 0.0)[0], 0);
        assert_eq!(sample_bilinear(&img, 10.0, 4.0)[0], 90);
    }

    #[test]
    fn test_sample_uniform_stays_uniform() {
        let img = RgbaImage::from_pixel(3, 3, Rgba([12, 34, 56, 255]));
        for (x, y) in [(0.0, 0.0), (1.3, 2.9), (3.0, 3.0)] {
            assert_eq!(sample_bilinear(&img, x, y), [12, 34, 56, 255]);
        }
    }

    #[test]
    fn test_composite_opaque_replaces() {
        let mut dst = Rgba([0, 0, 0, 255]);
        composite_over(&mut dst, [200, 100, 50, 255]);
        assert_eq!(dst, Rgba([200, 100, 50, 255]));
    }

    #[test]
    fn test_composite_transparent_keeps() {
        let mut dst = Rgba([9, 9, 9, 255]);
        composite_over(&mut dst, [200, 100, 50, 0]);
        assert_eq!(dst, Rgba([9, 9, 9, 255]));
    }

    #[test]
    fn test_composite_half_alpha_over_black() {
        let mut dst = Rgba([0, 0, 0, 255]);
        composite_over(&mut dst, [200, 100, 50, 128]);
        assert_eq!(dst.0[3], 255);
        assert!((dst.0[0] as i32 - 100).abs() <= 1);
        assert!((dst.0[1] as i32 - 50).abs() <= 1);
    }

    #[test]
    fn test_composite_onto_transparent() {
        let mut dst = Rgba([0, 0, 0, 0]);
        composite_over(&mut dst, [239, 68, 68, 102]);
        assert_eq!(dst, Rgba([239, 68, 68, 102]));
    }
}
