//! Brightness-driven auto-adjust.
//!
//! Scanned documents are assumed to be either dark text on a light
//! background or light text on a dark background. The frame's mean
//! brightness picks between the two corrections: a bright background is
//! fully inverted (legible once flattened), a dark background gets a
//! contrast/brightness stretch lifting its mean toward mid-gray.
//!
//! The stretch treats the observed luma as the frame's minimum brightness
//! and 255 as its maximum rather than measuring an actual min/max pair, so
//! genuinely low-contrast frames with a bright-ish mean may come out
//! under-stretched.

use crate::enhance::color_controls::color_controls;
use crate::enhance::invert::invert_colors;
use crate::enhance::{ProcessContext, StageError};
use crate::frame::Frame;
use crate::AdjustmentPlan;

/// Sample a frame's mean brightness and normalize its appearance.
///
/// Area-averages the full extent into one mean pixel, derives an
/// [`AdjustmentPlan`] from its luma, and applies either a full inversion
/// (bright background) or a contrast/brightness correction (dark
/// background). A failed adjustment or inversion stage degrades to the
/// unmodified input.
///
/// # Errors
///
/// Returns [`StageError::ConstructionFailed`] only when the area-average
/// sampling capability itself is unavailable.
pub fn analyze_and_adjust(ctx: &ProcessContext, frame: &Frame) -> Result<Frame, StageError> {
    let sample = ctx.average_color(frame)?;
    let plan = AdjustmentPlan::for_sample(&sample);

    tracing::debug!(
        luma = sample.luma(),
        invert = plan.invert,
        contrast = plan.contrast_factor,
        offset = plan.brightness_offset,
        "auto-adjust plan"
    );

    let adjusted = if plan.invert {
        invert_colors(ctx, frame)
    } else {
        color_controls(
            ctx,
            frame,
            1.0,
            plan.brightness_offset as f64 / 255.0,
            plan.contrast_factor,
        )
    };

    // Adjustment-stage construction failure is a soft fallback here, unlike
    // the standalone stages.
    Ok(adjusted.unwrap_or_else(|_| frame.clone()))
}
