//! Full color inversion stage.

use crate::enhance::{FilterKind, ProcessContext, StageError};
use crate::frame::Frame;

/// Invert every color channel of a frame; alpha passes through.
///
/// # Errors
///
/// Returns [`StageError::ConstructionFailed`] when the inversion filter is
/// unavailable in this context. The auto-adjust path maps that failure to a
/// soft no-op instead; direct callers decide for themselves.
pub fn invert_colors(ctx: &ProcessContext, frame: &Frame) -> Result<Frame, StageError> {
    ctx.construct(FilterKind::ColorInvert)?;

    let mut pixels = frame.pixels.clone();
    for chunk in pixels.chunks_exact_mut(4) {
        chunk[0] = 255 - chunk[0];
        chunk[1] = 255 - chunk[1];
        chunk[2] = 255 - chunk[2];
        // chunk[3] (alpha) unchanged
    }

    Ok(Frame {
        width: frame.width,
        height: frame.height,
        pixels,
    })
}
