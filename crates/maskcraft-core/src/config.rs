//! Editor configuration.
//!
//! Every field has a default so a caller can override a single value from a
//! partial JSON object (the bindings deserialize through `serde-wasm-bindgen`).

use serde::{Deserialize, Serialize};

use crate::error::EditorError;
use crate::paint::{MaskPainter, PainterMode};
use crate::region::{AspectRatio, RegionSelector, SelectorMode};

/// Top-level configuration shared by both editors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub selector: SelectorConfig,
    pub painter: PainterConfig,
}

/// Region selector (crop / outpaint) settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    /// Editing surface width in pixels
    pub surface_width: f64,
    /// Editing surface height in pixels
    pub surface_height: f64,
    /// Gap kept between the surface edge and the target box
    pub padding: f64,
    /// Width of the exported image; height follows the box aspect ratio
    pub output_width: u32,
    /// Largest exported width or height; tall boxes narrow the export to fit
    pub max_output_dimension: u32,
    /// Scale ceiling for wheel zoom
    pub wheel_max_scale: f64,
    /// Scale ceiling for the zoom buttons and slider
    pub button_max_scale: f64,
    /// Scale change per zoom button press
    pub zoom_step: f64,
    /// Scale change per unit of wheel delta
    pub wheel_sensitivity: f64,
    /// Outpaint scale floor as a fraction of the fit scale
    pub outpaint_floor: f64,
    /// Initial outpaint scale as a fraction of the fit scale
    pub outpaint_default: f64,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            surface_width: 1600.0,
            surface_height: 1000.0,
            padding: 20.0,
            output_width: 1500,
            max_output_dimension: 8192,
            wheel_max_scale: 10.0,
            button_max_scale: 3.0,
            zoom_step: 0.1,
            wheel_sensitivity: 0.001,
            outpaint_floor: 0.2,
            outpaint_default: 0.8,
        }
    }
}

/// Mask painter settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PainterConfig {
    /// Pixels added per expand operation
    pub expand_increment: u32,
    /// Largest canvas width or height an expand may produce
    pub max_canvas_dimension: u32,
    /// Hardness at or above which the brush stamps a solid disc
    pub hard_brush_threshold: u8,
    /// Mask intensity above which a pixel counts as selected for super-zoom
    pub selection_threshold: u8,
    /// Padding added around the super-zoom selection
    pub zoom_padding: u32,
    /// Side of the square super-zoom output
    pub zoom_output_size: u32,
    /// Fraction of the super-zoom output occupied by the selection
    pub zoom_fill_fraction: f64,
}

impl Default for PainterConfig {
    fn default() -> Self {
        Self {
            expand_increment: 512,
            max_canvas_dimension: 8192,
            hard_brush_threshold: 95,
            selection_threshold: 128,
            zoom_padding: 20,
            zoom_output_size: 1024,
            zoom_fill_fraction: 0.7,
        }
    }
}

impl EditorConfig {
    /// Check that sizes are positive and fractions are in range.
    pub fn validate(&self) -> Result<(), EditorError> {
        let s = &self.selector;
        let p = &self.painter;

        let positive = [
            ("surface_width", s.surface_width),
            ("surface_height", s.surface_height),
            ("wheel_max_scale", s.wheel_max_scale),
            ("button_max_scale", s.button_max_scale),
            ("zoom_step", s.zoom_step),
            ("wheel_sensitivity", s.wheel_sensitivity),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(EditorError::InvalidConfig(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }

        if !(s.padding.is_finite() && s.padding >= 0.0) {
            return Err(EditorError::InvalidConfig(format!(
                "padding must not be negative, got {}",
                s.padding
            )));
        }

        let fractions = [
            ("outpaint_floor", s.outpaint_floor),
            ("outpaint_default", s.outpaint_default),
            ("zoom_fill_fraction", p.zoom_fill_fraction),
        ];
        for (name, value) in fractions {
            if !(value > 0.0 && value <= 1.0) {
                return Err(EditorError::InvalidConfig(format!(
                    "{name} must be in (0, 1], got {value}"
                )));
            }
        }

        let counts = [
            ("output_width", s.output_width),
            ("max_output_dimension", s.max_output_dimension),
            ("expand_increment", p.expand_increment),
            ("max_canvas_dimension", p.max_canvas_dimension),
            ("zoom_output_size", p.zoom_output_size),
        ];
        for (name, value) in counts {
            if value == 0 {
                return Err(EditorError::InvalidConfig(format!(
                    "{name} must be non-zero"
                )));
            }
        }

        if s.output_width > s.max_output_dimension {
            return Err(EditorError::InvalidConfig(format!(
                "output_width {} exceeds max_output_dimension {}",
                s.output_width, s.max_output_dimension
            )));
        }

        if p.hard_brush_threshold > 100 {
            return Err(EditorError::InvalidConfig(format!(
                "hard_brush_threshold must be at most 100, got {}",
                p.hard_brush_threshold
            )));
        }

        Ok(())
    }

    /// A region selector using this configuration.
    pub fn region_selector(&self, mode: SelectorMode, ratio: AspectRatio) -> RegionSelector {
        RegionSelector::new(self.selector.clone(), mode, ratio)
    }

    /// A mask painter using this configuration.
    pub fn mask_painter(&self, mode: PainterMode) -> MaskPainter {
        MaskPainter::new(self.painter.clone(), mode)
    }
}
