//! Mask painter: paint a regenerate/preserve mask over an image, grow the
//! canvas for outpainting, and export either the full canvas or a zoomed
//! crop of a painted region.
//!
//! The painter owns one [`MaskBuffer`] the size of the canvas. White (255)
//! marks pixels to regenerate, black (0) pixels to keep. The base image sits
//! at an offset inside the canvas given by how far the canvas has grown to
//! the left and top.

mod brush;
mod export;
mod overlay;

pub use brush::{Brush, PaintTool, MAX_BRUSH_SIZE, MIN_BRUSH_SIZE};
pub use export::{EditKind, PaintExport};
pub use overlay::{EDIT_TINT, ZOOM_TINT};

use image::RgbaImage;
use serde::{Deserialize, Serialize};

use crate::config::PainterConfig;
use crate::error::{Axis, EditorError};
use crate::geometry::Point;
use crate::raster::{MaskBuffer, PRESERVE, REGENERATE};

/// Which features the painter offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PainterMode {
    /// Brush, eraser, super-zoom and expand
    #[default]
    Edit,
    /// Brush and eraser only
    Upscale,
}

/// Side of the canvas to grow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExpandDirection {
    Top,
    Bottom,
    Left,
    Right,
}

/// Pixels added on each side of the base image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Expansion {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl Expansion {
    pub fn horizontal(&self) -> u32 {
        self.left + self.right
    }

    pub fn vertical(&self) -> u32 {
        self.top + self.bottom
    }

    pub fn is_empty(&self) -> bool {
        self.horizontal() == 0 && self.vertical() == 0
    }
}

/// Interactive mask painter.
#[derive(Debug, Clone)]
pub struct MaskPainter {
    config: PainterConfig,
    mode: PainterMode,
    image: Option<RgbaImage>,
    mask: Option<MaskBuffer>,
    expansion: Expansion,
    tool: PaintTool,
    brush: Brush,
    show_mask: bool,
    stroking: bool,
}

impl MaskPainter {
    pub fn new(config: PainterConfig, mode: PainterMode) -> Self {
        Self {
            config,
            mode,
            image: None,
            mask: None,
            expansion: Expansion::default(),
            tool: PaintTool::default(),
            brush: Brush::default(),
            show_mask: true,
            stroking: false,
        }
    }

    pub fn mode(&self) -> PainterMode {
        self.mode
    }

    pub fn tool(&self) -> PaintTool {
        self.tool
    }

    pub fn brush(&self) -> Brush {
        self.brush
    }

    pub fn show_mask(&self) -> bool {
        self.show_mask
    }

    pub fn expansion(&self) -> Expansion {
        self.expansion
    }

    pub fn is_stroking(&self) -> bool {
        self.stroking
    }

    pub fn image(&self) -> Option<&RgbaImage> {
        self.image.as_ref()
    }

    pub fn mask(&self) -> Option<&MaskBuffer> {
        self.mask.as_ref()
    }

    /// Whether the expand controls apply in the current mode and tool.
    pub fn can_expand(&self) -> bool {
        self.mode == PainterMode::Edit && self.tool != PaintTool::SuperZoom
    }

    /// Start a new session on `image` with an all-preserve mask.
    pub fn load_image(&mut self, image: RgbaImage) {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            tracing::warn!("ignoring empty image");
            return;
        }
        tracing::debug!(width, height, mode = ?self.mode, "painter image loaded");
        self.mask = Some(MaskBuffer::filled(width, height, PRESERVE));
        self.image = Some(image);
        self.expansion = Expansion::default();
        self.stroking = false;
    }

    /// Switch tools. Choosing super-zoom starts a fresh selection by
    /// clearing the mask.
    pub fn select_tool(&mut self, tool: PaintTool) -> Result<(), EditorError> {
        if tool == PaintTool::SuperZoom && self.mode == PainterMode::Upscale {
            tracing::warn!("super-zoom rejected in upscale mode");
            return Err(EditorError::Unavailable {
                operation: "super zoom",
                reason: "not offered in upscale mode",
            });
        }
        tracing::debug!(?tool, "tool selected");
        self.tool = tool;
        self.stroking = false;
        if tool == PaintTool::SuperZoom {
            self.clear();
        }
        Ok(())
    }

    pub fn set_brush_size(&mut self, size: f64) {
        self.brush = self.brush.with_size(size);
    }

    pub fn set_brush_hardness(&mut self, hardness: u8) {
        self.brush = self.brush.with_hardness(hardness);
    }

    pub fn set_show_mask(&mut self, show: bool) {
        self.show_mask = show;
    }

    /// Begin a stroke with a stamp at `point` (canvas pixels).
    pub fn pointer_down(&mut self, point: Point) {
        if self.mask.is_none() {
            return;
        }
        self.stroking = true;
        self.stamp(point);
    }

    /// Continue the stroke. Ignored unless the pointer is down.
    pub fn pointer_move(&mut self, point: Point) {
        if self.stroking {
            self.stamp(point);
        }
    }

    pub fn pointer_up(&mut self) {
        self.stroking = false;
    }

    /// Leaving the canvas ends the stroke.
    pub fn pointer_leave(&mut self) {
        self.pointer_up();
    }

    /// Grow the canvas by the configured increment on one side. The new
    /// area is marked for regeneration and existing paint keeps its place
    /// relative to the base image.
    pub fn expand(&mut self, direction: ExpandDirection) -> Result<(), EditorError> {
        if self.mode == PainterMode::Upscale {
            return Err(EditorError::Unavailable {
                operation: "expand",
                reason: "not offered in upscale mode",
            });
        }
        if self.tool == PaintTool::SuperZoom {
            return Err(EditorError::Unavailable {
                operation: "expand",
                reason: "not offered while super-zoom is active",
            });
        }
        let Some(mask) = self.mask.as_ref() else {
            return Ok(());
        };

        let step = self.config.expand_increment;
        let limit = self.config.max_canvas_dimension;
        let (old_w, old_h) = mask.dimensions();

        let (axis, grown) = match direction {
            ExpandDirection::Left | ExpandDirection::Right => {
                (Axis::Horizontal, old_w.checked_add(step))
            }
            ExpandDirection::Top | ExpandDirection::Bottom => {
                (Axis::Vertical, old_h.checked_add(step))
            }
        };
        let grown = match grown {
            Some(g) if g <= limit => g,
            _ => {
                tracing::warn!(?direction, limit, "expand rejected at canvas limit");
                return Err(EditorError::CanvasLimit { axis, limit });
            }
        };

        let (new_w, new_h, shift_x, shift_y) = match direction {
            ExpandDirection::Top => (old_w, grown, 0, step),
            ExpandDirection::Bottom => (old_w, grown, 0, 0),
            ExpandDirection::Left => (grown, old_h, step, 0),
            ExpandDirection::Right => (grown, old_h, 0, 0),
        };

        let next = mask.grown(new_w, new_h, shift_x, shift_y, REGENERATE);
        self.mask = Some(next);
        match direction {
            ExpandDirection::Top => self.expansion.top += step,
            ExpandDirection::Bottom => self.expansion.bottom += step,
            ExpandDirection::Left => self.expansion.left += step,
            ExpandDirection::Right => self.expansion.right += step,
        }
        tracing::debug!(?direction, width = new_w, height = new_h, "canvas expanded");
        Ok(())
    }

    /// Mark the whole canvas as preserve.
    pub fn clear(&mut self) {
        if let Some(mask) = self.mask.as_mut() {
            mask.fill(PRESERVE);
        }
    }

    pub fn invert(&mut self) {
        if let Some(mask) = self.mask.as_mut() {
            mask.invert();
        }
    }

    /// Where the base image's top-left sits on the canvas.
    pub fn image_offset(&self) -> Option<(u32, u32)> {
        self.image.as_ref()?;
        Some((self.expansion.left, self.expansion.top))
    }

    pub fn canvas_size(&self) -> Option<(u32, u32)> {
        self.mask.as_ref().map(MaskBuffer::dimensions)
    }

    /// Composite for display: the base image with the mask tint on top.
    pub fn render_overlay(&self) -> Option<RgbaImage> {
        let image = self.image.as_ref()?;
        let mask = self.mask.as_ref()?;
        let offset = self.image_offset()?;
        let overlay = overlay::render(image, mask, offset, self.tool, self.show_mask);
        Some(overlay)
    }

    /// Produce the image/mask pair for the generator.
    ///
    /// With super-zoom active this crops and scales the painted region and
    /// fails with [`EditorError::EmptySelection`] when nothing is painted.
    /// Otherwise it flattens the canvas and returns the mask as painted.
    /// The session is left untouched either way.
    pub fn export(&self) -> Result<PaintExport, EditorError> {
        let (Some(image), Some(mask)) = (self.image.as_ref(), self.mask.as_ref()) else {
            return Err(EditorError::Unavailable {
                operation: "export",
                reason: "no image loaded",
            });
        };
        let (canvas_w, canvas_h) = mask.dimensions();
        let composed = export::compose(
            image,
            canvas_w,
            canvas_h,
            self.expansion.left,
            self.expansion.top,
        );

        if self.tool == PaintTool::SuperZoom {
            return export::super_zoom(&composed, mask, &self.config).inspect_err(|err| {
                tracing::warn!(%err, "super-zoom export rejected");
            });
        }

        let kind = if self.expansion.is_empty() {
            EditKind::Inpaint
        } else {
            EditKind::Outpaint
        };
        tracing::debug!(width = canvas_w, height = canvas_h, ?kind, "mask exported");
        Ok(PaintExport {
            image: composed,
            mask: mask.to_gray(),
            kind,
        })
    }

    /// Discard the session without exporting.
    pub fn cancel(&mut self) {
        self.image = None;
        self.mask = None;
        self.expansion = Expansion::default();
        self.stroking = false;
    }

    fn stamp(&mut self, point: Point) {
        let Some(mask) = self.mask.as_mut() else {
            return;
        };
        let radius = self.brush.radius();
        let inner = self.brush.inner_radius(self.config.hard_brush_threshold);
        mask.stamp(point, radius, inner, self.tool.paint_value());
    }
}
