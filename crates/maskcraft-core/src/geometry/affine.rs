//! Affine transforms and the editor view transform.
//!
//! Matrices use the 2-D canvas layout:
//! ```text
//! | a  c  e |
//! | b  d  f |
//! | 0  0  1 |
//! ```
//! so that `x' = a*x + c*y + e` and `y' = b*x + d*y + f`.

use super::{Point, Rotation, Size};

/// A 2-D affine transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Affine {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Default for Affine {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Affine {
    pub const IDENTITY: Affine = Affine {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        e: 0.0,
        f: 0.0,
    };

    pub fn translate(tx: f64, ty: f64) -> Self {
        Affine {
            e: tx,
            f: ty,
            ..Self::IDENTITY
        }
    }

    pub fn scale(s: f64) -> Self {
        Affine {
            a: s,
            d: s,
            ..Self::IDENTITY
        }
    }

    pub fn rotate(rotation: Rotation) -> Self {
        let (sin, cos) = rotation.sin_cos();
        Affine {
            a: cos,
            b: sin,
            c: -sin,
            d: cos,
            e: 0.0,
            f: 0.0,
        }
    }

    /// `self * rhs`: the result applies `rhs` first, then `self`.
    pub fn then(&self, rhs: &Affine) -> Affine {
        Affine {
            a: self.a * rhs.a + self.c * rhs.b,
            b: self.b * rhs.a + self.d * rhs.b,
            c: self.a * rhs.c + self.c * rhs.d,
            d: self.b * rhs.c + self.d * rhs.d,
            e: self.a * rhs.e + self.c * rhs.f + self.e,
            f: self.b * rhs.e + self.d * rhs.f + self.f,
        }
    }

    #[inline]
    pub fn apply(&self, p: Point) -> Point {
        Point::new(
            self.a * p.x + self.c * p.y + self.e,
            self.b * p.x + self.d * p.y + self.f,
        )
    }

    /// Inverse transform, or `None` if the matrix is singular.
    pub fn invert(&self) -> Option<Affine> {
        let det = self.a * self.d - self.b * self.c;
        if !det.is_finite() || det.abs() < f64::EPSILON {
            return None;
        }
        Some(Affine {
            a: self.d / det,
            b: -self.b / det,
            c: -self.c / det,
            d: self.a / det,
            e: (self.c * self.f - self.d * self.e) / det,
            f: (self.b * self.e - self.a * self.f) / det,
        })
    }
}

/// Maps image space to a target space (screen or export canvas) and back.
///
/// Built once per render pass from the viewport state. The forward order is
/// translate to `center` → rotate → scale → offset by minus half the image,
/// so the image is drawn centred on its own midpoint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    forward: Affine,
    inverse: Affine,
    image_size: Size,
}

impl ViewTransform {
    /// Returns `None` when `scale` is not a positive finite number.
    pub fn new(center: Point, rotation: Rotation, scale: f64, image_size: Size) -> Option<Self> {
        if !(scale.is_finite() && scale > 0.0) || image_size.is_degenerate() {
            return None;
        }
        let forward = Affine::translate(center.x, center.y)
            .then(&Affine::rotate(rotation))
            .then(&Affine::scale(scale))
            .then(&Affine::translate(
                -image_size.width / 2.0,
                -image_size.height / 2.0,
            ));
        let inverse = forward.invert()?;
        Some(Self {
            forward,
            inverse,
            image_size,
        })
    }

    pub fn to_screen_space(&self, image_point: Point) -> Point {
        self.forward.apply(image_point)
    }

    pub fn to_image_space(&self, screen_point: Point) -> Point {
        self.inverse.apply(screen_point)
    }

    pub fn image_size(&self) -> Size {
        self.image_size
    }

    /// True if `screen_point` lands on the image footprint.
    ///
    /// Edges are inclusive within a small tolerance so a footprint that
    /// exactly meets a pixel centre counts as covering it.
    #[inline]
    pub fn covers(&self, screen_point: Point) -> bool {
        const EDGE_TOLERANCE: f64 = 1e-6;
        let p = self.to_image_space(screen_point);
        p.x >= -EDGE_TOLERANCE
            && p.y >= -EDGE_TOLERANCE
            && p.x <= self.image_size.width + EDGE_TOLERANCE
            && p.y <= self.image_size.height + EDGE_TOLERANCE
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn rotation_strategy() -> impl Strategy<Value = Rotation> {
        prop_oneof![
            Just(Rotation::Deg0),
            Just(Rotation::Deg90),
            Just(Rotation::Deg180),
            Just(Rotation::Deg270),
        ]
    }

    proptest! {
        /// Property: image → screen → image returns the original point.
        #[test]
        fn prop_screen_image_round_trip(
            rotation in rotation_strategy(),
            scale in 0.05f64..=10.0,
            (cx, cy) in (-500.0f64..=500.0, -500.0f64..=500.0),
            (w, h) in (1.0f64..=4000.0, 1.0f64..=4000.0),
            (px, py) in (-100.0f64..=4100.0, -100.0f64..=4100.0),
        ) {
            let vt = ViewTransform::new(Point::new(cx, cy), rotation, scale, Size::new(w, h))
                .unwrap();
            let p = Point::new(px, py);
            let back = vt.to_image_space(vt.to_screen_space(p));
            prop_assert!((back.x - p.x).abs() < 1e-6);
            prop_assert!((back.y - p.y).abs() < 1e-6);
        }
    }
}
