//! Target aspect ratios for the region selector.

use serde::{Deserialize, Serialize};

/// Aspect ratio of the crop / outpaint box.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum AspectRatio {
    /// Match the (rotated) image's own ratio.
    #[default]
    Free,
    /// A fixed width / height ratio.
    Fixed(f64),
}

/// A labelled ratio offered in the ratio picker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatioPreset {
    pub label: &'static str,
    pub ratio: AspectRatio,
}

impl RatioPreset {
    const fn new(label: &'static str, ratio: AspectRatio) -> Self {
        Self { label, ratio }
    }
}

impl AspectRatio {
    /// Ratios offered by the editor, in menu order.
    pub const PRESETS: [RatioPreset; 10] = [
        RatioPreset::new("Free", AspectRatio::Free),
        RatioPreset::new("1:1", AspectRatio::Fixed(1.0)),
        RatioPreset::new("16:9", AspectRatio::Fixed(16.0 / 9.0)),
        RatioPreset::new("9:16", AspectRatio::Fixed(9.0 / 16.0)),
        RatioPreset::new("4:3", AspectRatio::Fixed(4.0 / 3.0)),
        RatioPreset::new("3:4", AspectRatio::Fixed(3.0 / 4.0)),
        RatioPreset::new("2:1", AspectRatio::Fixed(2.0)),
        RatioPreset::new("1:2", AspectRatio::Fixed(0.5)),
        RatioPreset::new("2:3", AspectRatio::Fixed(2.0 / 3.0)),
        RatioPreset::new("3:2", AspectRatio::Fixed(1.5)),
    ];

    /// Interpret a numeric ratio where `0` (or anything non-positive or not
    /// finite) means `Free`.
    pub fn from_value(value: f64) -> Self {
        if value.is_finite() && value > 0.0 {
            AspectRatio::Fixed(value)
        } else {
            AspectRatio::Free
        }
    }

    /// Numeric form, with `Free` as `0`.
    pub fn value(self) -> f64 {
        match self {
            AspectRatio::Free => 0.0,
            AspectRatio::Fixed(r) => r,
        }
    }

    /// The ratio the box actually uses, given the rotated image aspect.
    pub fn resolve(self, image_aspect: f64) -> f64 {
        match self {
            AspectRatio::Free => image_aspect,
            AspectRatio::Fixed(r) => r,
        }
    }
}
