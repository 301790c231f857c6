//! Region selector: position, scale and rotate an image inside a target box,
//! then export either a crop or an outpaint canvas with its mask.
//!
//! The selector keeps one piece of derived state, the [`Constraints`], and
//! recomputes it only when the surface, image, rotation, ratio or mode
//! changes. Every other operation reads it.
//!
//! Degenerate inputs (no image loaded, a surface smaller than its padding)
//! turn operations into no-ops rather than errors.

mod aspect;
mod constraints;
mod render;

pub use aspect::{AspectRatio, RatioPreset};
pub use constraints::{compute_constraints, Constraints};
pub use render::RegionExport;

use image::RgbaImage;
use serde::{Deserialize, Serialize};

use crate::config::SelectorConfig;
use crate::geometry::{Point, Rotation, Size, ViewTransform};

/// What the exported region is used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SelectorMode {
    /// The image must always cover the box.
    #[default]
    Crop,
    /// The image may shrink inside the box; uncovered area is regenerated.
    Outpaint,
}

/// User-controlled view state.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    /// Requested scale. The effective scale never drops below the floor.
    pub scale: f64,
    /// Offset of the image centre from the box centre, in surface pixels.
    pub offset: Point,
    pub rotation: Rotation,
    pub ratio: AspectRatio,
}

/// Interactive crop / outpaint selector.
#[derive(Debug, Clone)]
pub struct RegionSelector {
    config: SelectorConfig,
    mode: SelectorMode,
    initial_ratio: AspectRatio,
    image: Option<RgbaImage>,
    surface: Size,
    viewport: Viewport,
    constraints: Option<Constraints>,
    drag_anchor: Option<Point>,
}

impl RegionSelector {
    /// Create an empty selector. `ratio` is the ratio every loaded image
    /// starts with.
    pub fn new(config: SelectorConfig, mode: SelectorMode, ratio: AspectRatio) -> Self {
        let surface = Size::new(config.surface_width, config.surface_height);
        Self {
            config,
            mode,
            initial_ratio: ratio,
            image: None,
            surface,
            viewport: Viewport {
                ratio,
                ..Viewport::default()
            },
            constraints: None,
            drag_anchor: None,
        }
    }

    pub fn mode(&self) -> SelectorMode {
        self.mode
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn constraints(&self) -> Option<&Constraints> {
        self.constraints.as_ref()
    }

    pub fn surface(&self) -> Size {
        self.surface
    }

    pub fn image(&self) -> Option<&RgbaImage> {
        self.image.as_ref()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag_anchor.is_some()
    }

    /// Range offered by the zoom slider.
    pub fn scale_range(&self) -> Option<(f64, f64)> {
        let c = self.constraints.as_ref()?;
        Some((c.min_scale, self.config.button_max_scale.max(c.min_scale)))
    }

    /// Replace the image. Rotation, offset and ratio reset and the scale
    /// starts at the mode's default.
    pub fn load_image(&mut self, image: RgbaImage) {
        if image.width() == 0 || image.height() == 0 {
            tracing::warn!("ignoring empty image");
            return;
        }
        tracing::debug!(
            width = image.width(),
            height = image.height(),
            mode = ?self.mode,
            "selector image loaded"
        );
        self.image = Some(image);
        self.drag_anchor = None;
        self.viewport = Viewport {
            ratio: self.initial_ratio,
            ..Viewport::default()
        };
        self.recompute();
        self.reset_view();
    }

    /// Resize the editing surface. Crop keeps the current scale (raised to
    /// the new floor); outpaint returns to its default scale.
    pub fn set_surface(&mut self, width: f64, height: f64) {
        self.surface = Size::new(width, height);
        self.recompute();
        let Some(c) = self.constraints else {
            return;
        };
        self.viewport.scale = match self.mode {
            SelectorMode::Crop => self.viewport.scale.max(c.min_scale),
            SelectorMode::Outpaint => c.default_scale(self.mode, self.config.outpaint_default),
        };
    }

    pub fn begin_drag(&mut self, pointer: Point) {
        if self.image.is_none() || self.constraints.is_none() {
            return;
        }
        self.drag_anchor = Some(pointer.delta(self.viewport.offset));
    }

    /// Move the image with the pointer. Crop offsets are clamped so the box
    /// stays covered.
    pub fn drag_to(&mut self, pointer: Point) {
        let (Some(anchor), Some(c)) = (self.drag_anchor, self.constraints) else {
            return;
        };
        let raw = pointer.delta(anchor);
        self.viewport.offset = c.clamp_offset(raw, self.viewport.scale, self.mode);
    }

    pub fn end_drag(&mut self) {
        self.drag_anchor = None;
    }

    /// Leaving the surface ends any drag.
    pub fn pointer_leave(&mut self) {
        self.end_drag();
    }

    /// Mouse-wheel zoom. Scrolling down (positive `delta_y`) zooms out.
    pub fn wheel(&mut self, delta_y: f64) {
        let ceiling = self.config.wheel_max_scale;
        let next = self.viewport.scale - delta_y * self.config.wheel_sensitivity;
        self.apply_scale(next, ceiling);
    }

    pub fn zoom_in(&mut self) {
        let next = self.viewport.scale + self.config.zoom_step;
        self.apply_scale(next, self.config.button_max_scale);
    }

    /// Step the scale down toward the floor. A wheel zoom above the button
    /// ceiling steps down from where it is.
    pub fn zoom_out(&mut self) {
        let Some(c) = self.constraints else {
            return;
        };
        self.viewport.scale = (self.viewport.scale - self.config.zoom_step).max(c.min_scale);
    }

    /// Slider zoom, limited to [`scale_range`](Self::scale_range).
    pub fn set_scale(&mut self, scale: f64) {
        if !scale.is_finite() {
            return;
        }
        self.apply_scale(scale, self.config.button_max_scale);
    }

    pub fn rotate_left(&mut self) {
        self.rotate_to(self.viewport.rotation.rotate_left());
    }

    pub fn rotate_right(&mut self) {
        self.rotate_to(self.viewport.rotation.rotate_right());
    }

    pub fn set_aspect_ratio(&mut self, ratio: AspectRatio) {
        self.viewport.ratio = ratio;
        if self.image.is_none() {
            return;
        }
        self.recompute();
        self.reset_view();
    }

    /// Show the whole image inside the box. Outpaint only; returns whether
    /// anything changed.
    pub fn fit(&mut self) -> bool {
        if self.mode != SelectorMode::Outpaint {
            return false;
        }
        let Some(c) = self.constraints else {
            return false;
        };
        self.viewport.scale = c.fit_scale;
        self.viewport.offset = Point::ZERO;
        true
    }

    /// Scale actually used for rendering and export.
    pub fn effective_scale(&self) -> Option<f64> {
        let c = self.constraints.as_ref()?;
        Some(c.effective_scale(self.viewport.scale))
    }

    /// Offset actually used for rendering and export.
    pub fn clamped_offset(&self) -> Option<Point> {
        let c = self.constraints.as_ref()?;
        let offset = c.clamp_offset(self.viewport.offset, self.viewport.scale, self.mode);
        Some(offset)
    }

    /// Image-to-surface transform for the current view.
    pub fn view_transform(&self) -> Option<ViewTransform> {
        let c = self.constraints.as_ref()?;
        let image = self.image.as_ref()?;
        let offset = self.clamped_offset()?;
        let centre = c.box_center();
        ViewTransform::new(
            Point::new(centre.x + offset.x, centre.y + offset.y),
            self.viewport.rotation,
            c.effective_scale(self.viewport.scale),
            Size::of_pixels(image.width(), image.height()),
        )
    }

    /// Render the editing surface.
    pub fn render_preview(&self) -> Option<RgbaImage> {
        let c = self.constraints.as_ref()?;
        let image = self.image.as_ref()?;
        let view = self.view_transform()?;
        Some(render::preview(image, c, &view, self.mode))
    }

    /// Render the region at output resolution.
    pub fn export(&self) -> Option<RegionExport> {
        let c = self.constraints.as_ref()?;
        let image = self.image.as_ref()?;
        let offset = self.clamped_offset()?;
        let export = render::export(
            image,
            c,
            offset,
            c.effective_scale(self.viewport.scale),
            self.viewport.rotation,
            self.mode,
            &self.config,
        )?;
        tracing::debug!(
            width = export.image.width(),
            height = export.image.height(),
            mode = ?self.mode,
            "region exported"
        );
        Some(export)
    }

    /// Drop the image and all view state without exporting.
    pub fn cancel(&mut self) {
        self.image = None;
        self.constraints = None;
        self.drag_anchor = None;
        self.viewport = Viewport {
            ratio: self.initial_ratio,
            ..Viewport::default()
        };
    }

    fn rotate_to(&mut self, rotation: Rotation) {
        if self.image.is_none() {
            return;
        }
        self.viewport.rotation = rotation;
        self.recompute();
        self.reset_view();
    }

    /// Apply `scale` between the floor and `ceiling`. The floor wins when a
    /// tiny image pushes it above the ceiling.
    fn apply_scale(&mut self, scale: f64, ceiling: f64) {
        let Some(c) = self.constraints else {
            return;
        };
        self.viewport.scale = scale.min(ceiling).max(c.min_scale);
    }

    fn reset_view(&mut self) {
        if let Some(c) = self.constraints {
            self.viewport.scale = c.default_scale(self.mode, self.config.outpaint_default);
        }
        self.viewport.offset = Point::ZERO;
    }

    fn recompute(&mut self) {
        self.constraints = self.image.as_ref().and_then(|image| {
            compute_constraints(
                self.surface,
                self.config.padding,
                Size::of_pixels(image.width(), image.height()),
                self.viewport.rotation,
                self.viewport.ratio,
                self.mode,
                self.config.outpaint_floor,
            )
        });
        match &self.constraints {
            Some(c) => tracing::debug!(
                box_width = c.box_size.width,
                box_height = c.box_size.height,
                min_scale = c.min_scale,
                fit_scale = c.fit_scale,
                "selector constraints updated"
            ),
            None if self.image.is_some() => {
                tracing::debug!(
                    surface_width = self.surface.width,
                    surface_height = self.surface.height,
                    "surface leaves no room for the box"
                )
            }
            None => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    const RED: Rgba<u8> = Rgba([200, 30, 30, 255]);

    fn solid(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_pixel(width, height, RED)
    }

    fn selector(mode: SelectorMode, ratio: AspectRatio) -> RegionSelector {
        RegionSelector::new(SelectorConfig::default(), mode, ratio)
    }

    fn crop_selector(ratio: AspectRatio) -> RegionSelector {
        let mut s = selector(SelectorMode::Crop, ratio);
        s.load_image(solid(800, 600));
        s
    }

    #[test]
    fn test_operations_before_load_are_noops() {
        let mut s = selector(SelectorMode::Crop, AspectRatio::Free);
        s.begin_drag(Point::new(10.0, 10.0));
        s.drag_to(Point::new(50.0, 50.0));
        s.wheel(-100.0);
        s.zoom_in();
        s.rotate_right();
        assert!(!s.is_dragging());
        assert!(s.constraints().is_none());
        assert!(s.render_preview().is_none());
        assert!(s.export().is_none());
        assert_eq!(s.viewport().rotation, Rotation::Deg0);
    }

    #[test]
    fn test_empty_image_is_ignored() {
        let mut s = selector(SelectorMode::Crop, AspectRatio::Free);
        s.load_image(RgbaImage::new(0, 10));
        assert!(s.image().is_none());
    }

    #[test]
    fn test_load_starts_at_cover_scale() {
        let s = crop_selector(AspectRatio::Fixed(1.0));
        assert!((s.viewport().scale - 1.6).abs() < 1e-12);
        assert_eq!(s.viewport().offset, Point::ZERO);
    }

    #[test]
    fn test_outpaint_starts_below_fit() {
        let mut s = selector(SelectorMode::Outpaint, AspectRatio::Fixed(1.0));
        s.load_image(solid(800, 600));
        assert!((s.viewport().scale - 0.96).abs() < 1e-12);
    }

    #[test]
    fn test_square_crop_drag_and_export() {
        let mut s = crop_selector(AspectRatio::Fixed(1.0));
        s.begin_drag(Point::new(700.0, 500.0));
        s.drag_to(Point::new(750.0, 550.0));
        s.end_drag();
        assert_eq!(s.viewport().offset, Point::new(50.0, 0.0));

        let export = s.export().unwrap();
        assert_eq!(export.image.dimensions(), (1500, 1500));
        assert!(export.mask.is_none());
        assert!(export.image.pixels().all(|p| *p == RED));
    }

    #[test]
    fn test_drag_anchor_follows_existing_offset() {
        let mut s = crop_selector(AspectRatio::Fixed(1.0));
        s.begin_drag(Point::new(0.0, 0.0));
        s.drag_to(Point::new(40.0, 0.0));
        s.pointer_leave();
        assert!(!s.is_dragging());

        // Second drag continues from (40, 0)
        s.begin_drag(Point::new(100.0, 100.0));
        s.drag_to(Point::new(130.0, 100.0));
        assert_eq!(s.viewport().offset, Point::new(70.0, 0.0));
    }

    #[test]
    fn test_drag_without_begin_is_ignored() {
        let mut s = crop_selector(AspectRatio::Fixed(1.0));
        s.drag_to(Point::new(100.0, 100.0));
        assert_eq!(s.viewport().offset, Point::ZERO);
    }

    #[test]
    fn test_crop_drag_is_clamped() {
        let mut s = crop_selector(AspectRatio::Fixed(1.0));
        s.begin_drag(Point::ZERO);
        s.drag_to(Point::new(-1000.0, 1000.0));
        assert_eq!(s.viewport().offset, Point::new(-160.0, 0.0));
    }

    #[test]
    fn test_outpaint_drag_is_free() {
        let mut s = selector(SelectorMode::Outpaint, AspectRatio::Free);
        s.load_image(solid(800, 600));
        s.begin_drag(Point::ZERO);
        s.drag_to(Point::new(-1000.0, 1000.0));
        assert_eq!(s.viewport().offset, Point::new(-1000.0, 1000.0));
    }

    #[test]
    fn test_wheel_zoom() {
        let mut s = crop_selector(AspectRatio::Fixed(1.0));
        s.wheel(-1000.0);
        assert!((s.viewport().scale - 2.6).abs() < 1e-9);
        s.wheel(-100_000.0);
        assert_eq!(s.viewport().scale, 10.0);
        s.wheel(100_000.0);
        assert!((s.viewport().scale - 1.6).abs() < 1e-12);
    }

    #[test]
    fn test_buttons_and_slider() {
        let mut s = crop_selector(AspectRatio::Fixed(1.0));
        s.zoom_in();
        assert!((s.viewport().scale - 1.7).abs() < 1e-9);
        s.zoom_out();
        s.zoom_out();
        assert!((s.viewport().scale - 1.6).abs() < 1e-12);
        s.set_scale(7.0);
        assert_eq!(s.viewport().scale, 3.0);
        s.set_scale(f64::NAN);
        assert_eq!(s.viewport().scale, 3.0);
        let (lo, hi) = s.scale_range().unwrap();
        assert!((lo - 1.6).abs() < 1e-12);
        assert_eq!(hi, 3.0);
    }

    #[test]
    fn test_button_ceiling_does_not_shrink_wheel_zoom() {
        let mut s = crop_selector(AspectRatio::Fixed(1.0));
        s.wheel(-5000.0);
        assert!((s.viewport().scale - 6.6).abs() < 1e-9);
        s.zoom_in();
        assert_eq!(s.viewport().scale, 3.0);
    }

    #[test]
    fn test_zoom_out_steps_down_from_wheel_zoom() {
        let mut s = crop_selector(AspectRatio::Fixed(1.0));
        s.wheel(-5000.0);
        s.zoom_out();
        assert!((s.viewport().scale - 6.5).abs() < 1e-9);

        s.wheel(100_000.0);
        s.zoom_out();
        assert!((s.viewport().scale - 1.6).abs() < 1e-12);
    }

    #[test]
    fn test_floor_wins_over_ceiling_for_tiny_images() {
        let mut s = selector(SelectorMode::Crop, AspectRatio::Free);
        s.load_image(solid(10, 10));
        let floor = s.constraints().unwrap().min_scale;
        assert!(floor > 3.0);
        s.zoom_in();
        assert_eq!(s.viewport().scale, floor);
    }

    #[test]
    fn test_rotation_resets_view() {
        let mut s = crop_selector(AspectRatio::Free);
        s.wheel(-500.0);
        s.begin_drag(Point::ZERO);
        s.drag_to(Point::new(30.0, 30.0));
        s.rotate_right();
        assert_eq!(s.viewport().rotation, Rotation::Deg90);
        assert_eq!(s.viewport().offset, Point::ZERO);
        assert_eq!(s.constraints().unwrap().image_size, Size::new(600.0, 800.0));
        assert_eq!(s.viewport().scale, s.constraints().unwrap().min_scale);
    }

    #[test]
    fn test_four_turns_restore_constraints() {
        let mut s = crop_selector(AspectRatio::Fixed(16.0 / 9.0));
        let before = *s.constraints().unwrap();
        for _ in 0..4 {
            s.rotate_left();
        }
        assert_eq!(s.viewport().rotation, Rotation::Deg0);
        assert_eq!(*s.constraints().unwrap(), before);
    }

    #[test]
    fn test_ratio_change_recomputes_box() {
        let mut s = crop_selector(AspectRatio::Free);
        s.set_aspect_ratio(AspectRatio::Fixed(2.0));
        assert_eq!(s.constraints().unwrap().box_size, Size::new(1560.0, 780.0));
        assert_eq!(s.export().unwrap().image.dimensions(), (1500, 750));
    }

    #[test]
    fn test_fit_is_outpaint_only() {
        let mut crop = crop_selector(AspectRatio::Fixed(1.0));
        assert!(!crop.fit());

        let mut s = selector(SelectorMode::Outpaint, AspectRatio::Fixed(1.0));
        s.load_image(solid(800, 600));
        s.begin_drag(Point::ZERO);
        s.drag_to(Point::new(100.0, 0.0));
        assert!(s.fit());
        assert!((s.viewport().scale - 1.2).abs() < 1e-12);
        assert_eq!(s.viewport().offset, Point::ZERO);
    }

    #[test]
    fn test_crop_effective_scale_never_below_floor() {
        let mut s = crop_selector(AspectRatio::Fixed(1.0));
        s.set_surface(1600.0, 2000.0);
        let c = *s.constraints().unwrap();
        assert!(s.effective_scale().unwrap() >= c.min_scale);
        assert!(s.viewport().scale >= c.min_scale);
    }

    #[test]
    fn test_surface_too_small_disables_selector() {
        let mut s = crop_selector(AspectRatio::Free);
        s.set_surface(30.0, 30.0);
        assert!(s.constraints().is_none());
        assert!(s.render_preview().is_none());
        s.set_surface(1600.0, 1000.0);
        assert!(s.render_preview().is_some());
    }

    #[test]
    fn test_outpaint_export_mask() {
        let mut s = selector(SelectorMode::Outpaint, AspectRatio::Fixed(1.0));
        s.load_image(solid(800, 600));
        let export = s.export().unwrap();
        let mask = export.mask.unwrap();
        assert_eq!(mask.dimensions(), export.image.dimensions());

        // Corners are outside the shrunken image
        assert_eq!(mask.get_pixel(0, 0).0[0], 255);
        assert_eq!(*export.image.get_pixel(0, 0), Rgba([0, 0, 0, 255]));
        // Centre is image
        assert_eq!(mask.get_pixel(750, 750).0[0], 0);
        assert_eq!(*export.image.get_pixel(750, 750), RED);
    }

    #[test]
    fn test_tall_free_crop_export_is_capped() {
        let mut s = selector(SelectorMode::Crop, AspectRatio::Free);
        s.load_image(solid(1, 5000));
        let export = s.export().unwrap();
        let (width, height) = export.image.dimensions();
        assert_eq!(height, 8192);
        assert!(width >= 1 && width <= 8192);
        assert!(export.image.pixels().all(|p| *p == RED));
    }

    #[test]
    fn test_cancel_drops_state() {
        let mut s = crop_selector(AspectRatio::Fixed(1.0));
        s.begin_drag(Point::ZERO);
        s.cancel();
        assert!(s.image().is_none());
        assert!(!s.is_dragging());
        assert!(s.export().is_none());
        assert_eq!(s.viewport().ratio, AspectRatio::Fixed(1.0));
    }

    #[test]
    fn test_preview_size_matches_surface() {
        let s = crop_selector(AspectRatio::Free);
        let preview = s.render_preview().unwrap();
        assert_eq!(preview.dimensions(), (1600, 1000));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use image::Rgba;
    use proptest::prelude::*;

    const FILL: Rgba<u8> = Rgba([40, 180, 90, 255]);

    fn small_config() -> SelectorConfig {
        SelectorConfig {
            surface_width: 160.0,
            surface_height: 100.0,
            padding: 2.0,
            output_width: 120,
            ..SelectorConfig::default()
        }
    }

    fn ratio_strategy() -> impl Strategy<Value = AspectRatio> {
        prop_oneof![
            Just(AspectRatio::Free),
            (0.3f64..=3.0).prop_map(AspectRatio::Fixed),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(48))]

        /// Property: a crop export is entirely image, whatever the view.
        #[test]
        fn prop_crop_export_is_fully_covered(
            (w, h) in (4u32..=60, 4u32..=60),
            ratio in ratio_strategy(),
            turns in 0usize..4,
            zoom in -3000.0f64..=0.0,
            (dx, dy) in (-500.0f64..=500.0, -500.0f64..=500.0),
        ) {
            let mut s = RegionSelector::new(small_config(), SelectorMode::Crop, ratio);
            s.load_image(RgbaImage::from_pixel(w, h, FILL));
            for _ in 0..turns {
                s.rotate_right();
            }
            s.wheel(zoom);
            s.begin_drag(Point::ZERO);
            s.drag_to(Point::new(dx, dy));

            let export = s.export().unwrap();
            prop_assert!(export.mask.is_none());
            prop_assert!(export.image.pixels().all(|p| *p == FILL));
        }

        /// Property: outpaint image and mask are exact complements.
        #[test]
        fn prop_outpaint_mask_complements_image(
            (w, h) in (4u32..=60, 4u32..=60),
            ratio in ratio_strategy(),
            turns in 0usize..4,
            zoom in -1000.0f64..=1000.0,
            (dx, dy) in (-120.0f64..=120.0, -120.0f64..=120.0),
        ) {
            let mut s = RegionSelector::new(small_config(), SelectorMode::Outpaint, ratio);
            s.load_image(RgbaImage::from_pixel(w, h, FILL));
            for _ in 0..turns {
                s.rotate_left();
            }
            s.wheel(zoom);
            s.begin_drag(Point::ZERO);
            s.drag_to(Point::new(dx, dy));

            let export = s.export().unwrap();
            let mask = export.mask.unwrap();
            for (x, y, pixel) in export.image.enumerate_pixels() {
                let m = mask.get_pixel(x, y).0[0];
                if *pixel == FILL {
                    prop_assert_eq!(m, 0);
                } else {
                    prop_assert_eq!(*pixel, Rgba([0, 0, 0, 255]));
                    prop_assert_eq!(m, 255);
                }
            }
        }

        /// Property: rotating right then left restores constraints and view.
        #[test]
        fn prop_rotation_is_reversible(
            (w, h) in (1u32..=80, 1u32..=80),
            ratio in ratio_strategy(),
            outpaint in any::<bool>(),
        ) {
            let mode = if outpaint { SelectorMode::Outpaint } else { SelectorMode::Crop };
            let mut s = RegionSelector::new(small_config(), mode, ratio);
            s.load_image(RgbaImage::from_pixel(w, h, FILL));
            let before = (*s.constraints().unwrap(), *s.viewport());
            s.rotate_right();
            s.rotate_left();
            prop_assert_eq!(before, (*s.constraints().unwrap(), *s.viewport()));
        }
    }
}
