//! Raster primitives used by both editors.
//!
//! Images are `image::RgbaImage` buffers (8-bit RGBA). Masks are
//! [`MaskBuffer`]s: grayscale buffers where 0 means "preserve" and 255 means
//! "regenerate", with intermediate values carrying partial edit weight.
//!
//! Drawing is done by inverse mapping: for each destination pixel centre we
//! ask the [`ViewTransform`](crate::geometry::ViewTransform) where it lands in
//! the source. The same coverage test decides where an image is drawn and
//! where its footprint is marked in a mask, so the two always agree.

mod draw;
mod mask_buffer;
mod sample;

pub use draw::{draw_transformed, fill_footprint, fill_rect, solid_canvas, tint_by_mask};
pub use mask_buffer::MaskBuffer;
pub use sample::{composite_over, sample_bilinear};

/// Intensity marking a mask pixel "preserve".
pub const PRESERVE: u8 = 0;
/// Intensity marking a mask pixel "regenerate".
pub const REGENERATE: u8 = 255;
