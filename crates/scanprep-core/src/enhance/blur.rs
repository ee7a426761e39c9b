//! Gaussian blur stage.
//!
//! Blur implementations may grow the canvas past the input extent; the
//! result is always re-cropped to the original extent. Unlike the other
//! stages, an unavailable blur filter is a soft no-op: the input comes back
//! unchanged and a diagnostic is emitted, so a capture loop is never aborted
//! over a missing smoothing pass.

use crate::enhance::{FilterKind, ProcessContext};
use crate::frame::Frame;
use crate::geometry::crop_px;

/// Default blur radius for text-edge smoothing before thresholding.
pub const DEFAULT_BLUR_RADIUS: f32 = 2.0;

/// Blur a frame, preserving its extent.
///
/// A non-positive radius or an unavailable blur filter returns the input
/// unchanged; this stage never reports failure.
pub fn gaussian_blur(ctx: &ProcessContext, frame: &Frame, radius: f32) -> Frame {
    if ctx.construct(FilterKind::GaussianBlur).is_err() {
        tracing::debug!("gaussian blur unavailable, returning frame unchanged");
        return frame.clone();
    }

    if radius <= 0.0 || frame.is_empty() {
        return frame.clone();
    }

    let Some(img) = frame.to_rgba_image() else {
        return frame.clone();
    };

    let blurred = image::imageops::blur(&img, radius);
    let result = Frame::from_rgba_image(blurred);

    // Undo any canvas growth
    if result.width != frame.width || result.height != frame.height {
        let left = (result.width.saturating_sub(frame.width)) / 2;
        let top = (result.height.saturating_sub(frame.height)) / 2;
        return crop_px(&result, left, top, frame.width, frame.height);
    }

    result
}
