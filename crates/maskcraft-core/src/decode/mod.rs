//! Source image decoding.
//!
//! The editors take a decoded RGBA bitmap plus the format tag it arrived
//! with. This module turns uploaded bytes into that bitmap, applying EXIF
//! orientation to JPEG sources so the pixels match what a browser displays.

mod source;
mod types;

pub use source::{decode_image, get_orientation};
pub use types::{DecodeError, ImageFormatTag, Orientation};
