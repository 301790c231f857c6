//! Export encoding.
//!
//! Every exported image and mask is encoded as PNG. Masks in particular must
//! never go through a lossy codec: intermediate gray levels from soft brush
//! edges carry edit weight.

mod png;

pub use png::{encode_png, encode_png_mask, EncodeError, EncodedImage};
