//! Mask painter WASM bindings.
//!
//! Pointer events are given in client coordinates together with the
//! canvas element's bounding rectangle, so a canvas scaled by CSS still
//! paints under the cursor.
//!
//! # Example
//!
//! ```typescript
//! import { JsMaskPainter } from '@maskcraft/wasm';
//!
//! const painter = new JsMaskPainter(false, undefined);
//! painter.load_image(image);
//! canvas.onpointerdown = (e) => {
//!   const r = canvas.getBoundingClientRect();
//!   painter.pointer_down(e.clientX, e.clientY, r.left, r.top, r.width, r.height);
//! };
//! painter.expand('left');
//! const result = painter.export();
//! ```

use crate::config::{parse_config, rejected};
use crate::types::{JsExport, JsImage};
use maskcraft_core::{DisplayRect, ExpandDirection, MaskPainter, PaintTool, PainterMode, Point};
use wasm_bindgen::prelude::*;

pub(crate) fn tool_from_str(tool: &str) -> Result<PaintTool, String> {
    match tool {
        "brush" => Ok(PaintTool::Brush),
        "eraser" => Ok(PaintTool::Eraser),
        "superzoom" => Ok(PaintTool::SuperZoom),
        other => Err(format!("Unknown tool: {}", other)),
    }
}

pub(crate) fn direction_from_str(direction: &str) -> Result<ExpandDirection, String> {
    match direction {
        "top" => Ok(ExpandDirection::Top),
        "bottom" => Ok(ExpandDirection::Bottom),
        "left" => Ok(ExpandDirection::Left),
        "right" => Ok(ExpandDirection::Right),
        other => Err(format!("Unknown expand direction: {}", other)),
    }
}

fn tool_name(tool: PaintTool) -> &'static str {
    match tool {
        PaintTool::Brush => "brush",
        PaintTool::Eraser => "eraser",
        PaintTool::SuperZoom => "superzoom",
    }
}

/// Interactive mask painter.
#[wasm_bindgen]
pub struct JsMaskPainter {
    inner: MaskPainter,
}

#[wasm_bindgen]
impl JsMaskPainter {
    /// Create a painter. Upscale mode offers only brush and eraser.
    #[wasm_bindgen(constructor)]
    pub fn new(upscale: bool, config: JsValue) -> Result<JsMaskPainter, JsValue> {
        let config = parse_config(config)?;
        let mode = if upscale {
            PainterMode::Upscale
        } else {
            PainterMode::Edit
        };
        Ok(Self {
            inner: config.mask_painter(mode),
        })
    }

    pub fn load_image(&mut self, image: &JsImage) -> Result<(), JsValue> {
        let rgba = image.to_rgba().map_err(rejected)?;
        self.inner.load_image(rgba);
        Ok(())
    }

    /// `"brush"`, `"eraser"` or `"superzoom"`.
    pub fn select_tool(&mut self, tool: &str) -> Result<(), JsValue> {
        let tool = tool_from_str(tool).map_err(rejected)?;
        self.inner.select_tool(tool).map_err(rejected)
    }

    #[wasm_bindgen(getter)]
    pub fn tool(&self) -> String {
        tool_name(self.inner.tool()).to_string()
    }

    pub fn set_brush_size(&mut self, size: f64) {
        self.inner.set_brush_size(size);
    }

    pub fn set_brush_hardness(&mut self, hardness: u8) {
        self.inner.set_brush_hardness(hardness);
    }

    #[wasm_bindgen(getter)]
    pub fn brush_size(&self) -> f64 {
        self.inner.brush().size
    }

    #[wasm_bindgen(getter)]
    pub fn brush_hardness(&self) -> u8 {
        self.inner.brush().hardness
    }

    pub fn set_show_mask(&mut self, show: bool) {
        self.inner.set_show_mask(show);
    }

    pub fn pointer_down(
        &mut self,
        client_x: f64,
        client_y: f64,
        left: f64,
        top: f64,
        width: f64,
        height: f64,
    ) {
        if let Some(point) = self.to_canvas(client_x, client_y, left, top, width, height) {
            self.inner.pointer_down(point);
        }
    }

    pub fn pointer_move(
        &mut self,
        client_x: f64,
        client_y: f64,
        left: f64,
        top: f64,
        width: f64,
        height: f64,
    ) {
        if let Some(point) = self.to_canvas(client_x, client_y, left, top, width, height) {
            self.inner.pointer_move(point);
        }
    }

    pub fn pointer_up(&mut self) {
        self.inner.pointer_up();
    }

    pub fn pointer_leave(&mut self) {
        self.inner.pointer_leave();
    }

    /// `"top"`, `"bottom"`, `"left"` or `"right"`.
    pub fn expand(&mut self, direction: &str) -> Result<(), JsValue> {
        let direction = direction_from_str(direction).map_err(rejected)?;
        self.inner.expand(direction).map_err(rejected)
    }

    #[wasm_bindgen(getter)]
    pub fn can_expand(&self) -> bool {
        self.inner.can_expand()
    }

    pub fn clear(&mut self) {
        self.inner.clear();
    }

    pub fn invert(&mut self) {
        self.inner.invert();
    }

    #[wasm_bindgen(getter)]
    pub fn canvas_width(&self) -> u32 {
        self.inner.canvas_size().map_or(0, |(w, _)| w)
    }

    #[wasm_bindgen(getter)]
    pub fn canvas_height(&self) -> u32 {
        self.inner.canvas_size().map_or(0, |(_, h)| h)
    }

    #[wasm_bindgen(getter)]
    pub fn image_offset_x(&self) -> u32 {
        self.inner.image_offset().map_or(0, |(x, _)| x)
    }

    #[wasm_bindgen(getter)]
    pub fn image_offset_y(&self) -> u32 {
        self.inner.image_offset().map_or(0, |(_, y)| y)
    }

    pub fn render_overlay(&self) -> Option<JsImage> {
        self.inner.render_overlay().map(JsImage::from_rgba)
    }

    pub fn export(&self) -> Result<JsExport, JsValue> {
        self.inner.export().map(JsExport::from).map_err(rejected)
    }

    pub fn cancel(&mut self) {
        self.inner.cancel();
    }
}

impl JsMaskPainter {
    fn to_canvas(
        &self,
        client_x: f64,
        client_y: f64,
        left: f64,
        top: f64,
        width: f64,
        height: f64,
    ) -> Option<Point> {
        let (canvas_w, canvas_h) = self.inner.canvas_size()?;
        let display = DisplayRect::new(left, top, width, height);
        display.to_canvas(Point::new(client_x, client_y), canvas_w, canvas_h)
    }
}
