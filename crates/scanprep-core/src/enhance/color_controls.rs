//! Saturation/contrast/brightness color stage.
//!
//! One affine stage shared by grayscale conversion (saturation 0, neutral
//! contrast/brightness) and the auto-adjust contrast/brightness correction.
//! Per pixel, in normalized [0, 1] math: mix toward luma by `saturation`,
//! scale about the 0.5 midpoint by `contrast`, then add `brightness`. Alpha
//! passes through untouched.

use crate::enhance::{FilterKind, ProcessContext, StageError};
use crate::frame::Frame;
use crate::luma;

/// Apply the color-controls stage.
///
/// * `saturation` - 0.0 desaturates fully, 1.0 is neutral
/// * `brightness` - additive offset in normalized units, 0.0 is neutral
/// * `contrast` - multiplicative factor about mid-gray, 1.0 is neutral
///
/// # Errors
///
/// Returns [`StageError::ConstructionFailed`] when the color-controls filter
/// is unavailable in this context.
pub fn color_controls(
    ctx: &ProcessContext,
    frame: &Frame,
    saturation: f64,
    brightness: f64,
    contrast: f64,
) -> Result<Frame, StageError> {
    ctx.construct(FilterKind::ColorControls)?;

    let mut pixels = frame.pixels.clone();
    for chunk in pixels.chunks_exact_mut(4) {
        let mut r = chunk[0] as f64 / 255.0;
        let mut g = chunk[1] as f64 / 255.0;
        let mut b = chunk[2] as f64 / 255.0;

        if saturation != 1.0 {
            let gray = luma::luma(r, g, b);
            r = gray + (r - gray) * saturation;
            g = gray + (g - gray) * saturation;
            b = gray + (b - gray) * saturation;
        }

        if contrast != 1.0 {
            r = (r - 0.5) * contrast + 0.5;
            g = (g - 0.5) * contrast + 0.5;
            b = (b - 0.5) * contrast + 0.5;
        }

        if brightness != 0.0 {
            r += brightness;
            g += brightness;
            b += brightness;
        }

        chunk[0] = (r.clamp(0.0, 1.0) * 255.0).round() as u8;
        chunk[1] = (g.clamp(0.0, 1.0) * 255.0).round() as u8;
        chunk[2] = (b.clamp(0.0, 1.0) * 255.0).round() as u8;
        // chunk[3] (alpha) unchanged
    }

    Ok(Frame {
        width: frame.width,
        height: frame.height,
        pixels,
    })
}

/// Desaturate a frame, leaving contrast and brightness neutral.
///
/// # Errors
///
/// Returns [`StageError::ConstructionFailed`] when the color-controls filter
/// is unavailable in this context.
pub fn grayscale(ctx: &ProcessContext, frame: &Frame) -> Result<Frame, StageError> {
    color_controls(ctx, frame, 0.0, 0.0, 1.0)
}
