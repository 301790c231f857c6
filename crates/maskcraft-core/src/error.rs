//! Editor-level error types.
//!
//! These cover the conditions a caller is expected to surface to the user
//! (an empty super-zoom selection, a canvas that cannot grow any further).
//! Degenerate geometry and "not loaded yet" states are not errors: the
//! editors treat them as silent no-ops.

use thiserror::Error;

/// Canvas axis named in [`EditorError::CanvasLimit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Axis::Horizontal => f.write_str("width"),
            Axis::Vertical => f.write_str("height"),
        }
    }
}

/// Errors returned by the region selector and mask painter.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EditorError {
    /// Super-zoom export was requested with nothing painted.
    #[error("Paint the zoom region first")]
    EmptySelection,

    /// Expanding the canvas would exceed the configured maximum dimension.
    #[error("Canvas {axis} cannot exceed {limit} pixels")]
    CanvasLimit { axis: Axis, limit: u32 },

    /// The operation is disabled in the current mode or tool.
    #[error("{operation} is unavailable: {reason}")]
    Unavailable {
        operation: &'static str,
        reason: &'static str,
    },

    /// Configuration values are out of range.
    #[error("Invalid editor configuration: {0}")]
    InvalidConfig(String),
}
