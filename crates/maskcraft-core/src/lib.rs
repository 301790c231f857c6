//! Maskcraft Core - image region editing library
//!
//! This crate provides the two interactive editors that prepare images for
//! generative editing:
//!
//! - [`RegionSelector`] positions, scales and rotates an image inside a
//!   target box and exports a crop, or an outpaint canvas with its mask.
//! - [`MaskPainter`] paints a regenerate/preserve mask, grows the canvas for
//!   outpainting and exports a super-zoom crop of a painted region.
//!
//! Both editors are synchronous state machines driven by discrete input
//! events. They render into owned `image` buffers; the caller decides how to
//! present them.

pub mod config;
pub mod decode;
pub mod encode;
pub mod error;
pub mod geometry;
pub mod paint;
pub mod raster;
pub mod region;

pub use config::{EditorConfig, PainterConfig, SelectorConfig};
pub use error::{Axis, EditorError};
pub use geometry::{DisplayRect, PixelRect, Point, Rotation, Size, ViewTransform};
pub use paint::{
    Brush, EditKind, ExpandDirection, Expansion, MaskPainter, PaintExport, PaintTool, PainterMode,
};
pub use raster::MaskBuffer;
pub use region::{AspectRatio, Constraints, RegionExport, RegionSelector, SelectorMode, Viewport};
