//! Tools and brush settings for the mask painter.

use serde::{Deserialize, Serialize};

use crate::raster::{PRESERVE, REGENERATE};

/// Smallest brush diameter in pixels.
pub const MIN_BRUSH_SIZE: f64 = 5.0;
/// Largest brush diameter in pixels.
pub const MAX_BRUSH_SIZE: f64 = 300.0;

/// Active painting tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PaintTool {
    /// Marks pixels for regeneration
    #[default]
    Brush,
    /// Marks pixels to keep
    Eraser,
    /// Marks the region of interest for a super-zoom export
    SuperZoom,
}

impl PaintTool {
    /// Mask intensity this tool paints.
    pub fn paint_value(self) -> u8 {
        match self {
            PaintTool::Brush | PaintTool::SuperZoom => REGENERATE,
            PaintTool::Eraser => PRESERVE,
        }
    }
}

/// Brush diameter and hardness.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Brush {
    /// Diameter in canvas pixels, within `5..=300`
    pub size: f64,
    /// 0 (soft) to 100 (hard)
    pub hardness: u8,
}

impl Default for Brush {
    fn default() -> Self {
        Self {
            size: 50.0,
            hardness: 100,
        }
    }
}

impl Brush {
    pub fn with_size(self, size: f64) -> Self {
        if !size.is_finite() {
            return self;
        }
        Self {
            size: size.clamp(MIN_BRUSH_SIZE, MAX_BRUSH_SIZE),
            ..self
        }
    }

    pub fn with_hardness(self, hardness: u8) -> Self {
        Self {
            hardness: hardness.min(100),
            ..self
        }
    }

    pub fn radius(&self) -> f64 {
        self.size / 2.0
    }

    /// Radius inside which a stamp is fully opaque.
    ///
    /// At or above `hard_threshold` the whole disc is solid; below it the
    /// solid core is `radius × hardness / 100` and the rest fades out.
    pub fn inner_radius(&self, hard_threshold: u8) -> f64 {
        if self.hardness >= hard_threshold {
            self.radius()
        } else {
            self.radius() * self.hardness as f64 / 100.0
        }
    }
}
