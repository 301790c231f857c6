//! Region selector WASM bindings.
//!
//! # Example
//!
//! ```typescript
//! import { JsRegionSelector } from '@maskcraft/wasm';
//!
//! const selector = new JsRegionSelector('crop', 1.0, undefined);
//! selector.load_image(image);
//! canvas.onpointerdown = (e) => selector.pointer_down(e.offsetX, e.offsetY);
//! canvas.onpointermove = (e) => selector.pointer_move(e.offsetX, e.offsetY);
//! canvas.onpointerup = () => selector.pointer_up();
//! canvas.onwheel = (e) => selector.wheel(e.deltaY);
//!
//! const result = selector.export();
//! ```

use crate::config::{parse_config, rejected};
use crate::types::{JsExport, JsImage};
use maskcraft_core::{AspectRatio, Point, RegionSelector, SelectorMode};
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// One entry of the aspect ratio menu.
#[derive(Debug, Clone, Serialize)]
struct RatioPresetJs {
    label: &'static str,
    /// 0 for free
    value: f64,
}

/// The aspect ratio menu as `[{ label, value }]`, `value` 0 meaning free.
#[wasm_bindgen]
pub fn ratio_presets() -> Result<JsValue, JsValue> {
    let presets: Vec<RatioPresetJs> = AspectRatio::PRESETS
        .iter()
        .map(|p| RatioPresetJs {
            label: p.label,
            value: p.ratio.value(),
        })
        .collect();
    serde_wasm_bindgen::to_value(&presets).map_err(|e| JsValue::from_str(&e.to_string()))
}

pub(crate) fn mode_from_str(mode: &str) -> Result<SelectorMode, String> {
    match mode {
        "crop" => Ok(SelectorMode::Crop),
        "outpaint" => Ok(SelectorMode::Outpaint),
        other => Err(format!("Unknown selector mode: {}", other)),
    }
}

/// Interactive crop / outpaint selector.
#[wasm_bindgen]
pub struct JsRegionSelector {
    inner: RegionSelector,
}

#[wasm_bindgen]
impl JsRegionSelector {
    /// Create a selector in `"crop"` or `"outpaint"` mode. `ratio` 0 means
    /// free; `config` may be `undefined`.
    #[wasm_bindgen(constructor)]
    pub fn new(mode: &str, ratio: f64, config: JsValue) -> Result<JsRegionSelector, JsValue> {
        let mode = mode_from_str(mode).map_err(rejected)?;
        let config = parse_config(config)?;
        Ok(Self {
            inner: config.region_selector(mode, AspectRatio::from_value(ratio)),
        })
    }

    pub fn load_image(&mut self, image: &JsImage) -> Result<(), JsValue> {
        let rgba = image.to_rgba().map_err(rejected)?;
        self.inner.load_image(rgba);
        Ok(())
    }

    pub fn set_surface(&mut self, width: f64, height: f64) {
        self.inner.set_surface(width, height);
    }

    pub fn pointer_down(&mut self, x: f64, y: f64) {
        self.inner.begin_drag(Point::new(x, y));
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) {
        self.inner.drag_to(Point::new(x, y));
    }

    pub fn pointer_up(&mut self) {
        self.inner.end_drag();
    }

    pub fn pointer_leave(&mut self) {
        self.inner.pointer_leave();
    }

    pub fn wheel(&mut self, delta_y: f64) {
        self.inner.wheel(delta_y);
    }

    pub fn zoom_in(&mut self) {
        self.inner.zoom_in();
    }

    pub fn zoom_out(&mut self) {
        self.inner.zoom_out();
    }

    pub fn set_scale(&mut self, scale: f64) {
        self.inner.set_scale(scale);
    }

    pub fn rotate_left(&mut self) {
        self.inner.rotate_left();
    }

    pub fn rotate_right(&mut self) {
        self.inner.rotate_right();
    }

    /// `0` selects the free ratio.
    pub fn set_aspect_ratio(&mut self, ratio: f64) {
        self.inner.set_aspect_ratio(AspectRatio::from_value(ratio));
    }

    /// Outpaint only. Returns whether the view changed.
    pub fn fit(&mut self) -> bool {
        self.inner.fit()
    }

    #[wasm_bindgen(getter)]
    pub fn scale(&self) -> f64 {
        self.inner.viewport().scale
    }

    /// Slider minimum, or 0 before an image is loaded.
    #[wasm_bindgen(getter)]
    pub fn min_scale(&self) -> f64 {
        self.inner.scale_range().map_or(0.0, |(lo, _)| lo)
    }

    #[wasm_bindgen(getter)]
    pub fn max_scale(&self) -> f64 {
        self.inner.scale_range().map_or(0.0, |(_, hi)| hi)
    }

    #[wasm_bindgen(getter)]
    pub fn rotation(&self) -> u16 {
        self.inner.viewport().rotation.degrees()
    }

    #[wasm_bindgen(getter)]
    pub fn is_dragging(&self) -> bool {
        self.inner.is_dragging()
    }

    /// The editing surface, or nothing before an image is loaded.
    pub fn render_preview(&self) -> Option<JsImage> {
        self.inner.render_preview().map(JsImage::from_rgba)
    }

    pub fn export(&self) -> Option<JsExport> {
        self.inner.export().map(JsExport::from)
    }

    pub fn cancel(&mut self) {
        self.inner.cancel();
    }
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_new_rejects_unknown_mode() {
        let selector = JsRegionSelector::new("zoom", 0.0, JsValue::UNDEFINED);
        assert!(selector.is_err());
    }

    #[wasm_bindgen_test]
    fn test_ratio_presets() {
        assert!(ratio_presets().is_ok());
    }
}
