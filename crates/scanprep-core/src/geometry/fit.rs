//! Aspect-preserving resize to a target extent.
//!
//! Two policies:
//! - **fit** (contain/letterbox): the whole frame stays visible inside the
//!   target, possibly leaving empty space. The canvas is not padded out to
//!   the target; the result is the scaled frame plus its centered placement.
//! - **fill** (cover): the frame covers the target completely, overflow
//!   cropped away to exactly the target extent.

use crate::frame::{Frame, SamplingFilter};
use crate::geometry::roi::crop_px;
use crate::geometry::types::{RectF, SizeF};

/// Result of a letterbox fit: the scaled frame and where it sits within the
/// target extent.
#[derive(Debug, Clone, PartialEq)]
pub struct FitResult {
    /// The uniformly scaled frame.
    pub frame: Frame,
    /// Centered placement of the scaled frame within the target extent.
    pub placement: RectF,
}

/// Scale a frame uniformly so it fits entirely within `target`, centered.
///
/// The scale is `min(target.width/width, target.height/height)`; neither axis
/// of the result exceeds the target and the frame's aspect ratio is
/// preserved. A degenerate (empty) target returns the frame unchanged with an
/// identity placement.
pub fn resize_to_fit(frame: &Frame, target: SizeF, filter: SamplingFilter) -> FitResult {
    if frame.is_empty() || target.is_empty() {
        let placement = RectF::new(0.0, 0.0, frame.width as f64, frame.height as f64);
        return FitResult {
            frame: frame.clone(),
            placement,
        };
    }

    let scale = (target.width / frame.width as f64).min(target.height / frame.height as f64);

    // Floor, not round: rounding up even half a pixel would push the scaled
    // extent past the target. The tolerance keeps exact products from being
    // dragged down a pixel by float error.
    let new_w = (((frame.width as f64 * scale + DIM_TOLERANCE).floor()) as u32).max(1);
    let new_h = (((frame.height as f64 * scale + DIM_TOLERANCE).floor()) as u32).max(1);
    let scaled = resize_exact(frame, new_w, new_h, filter);

    let placement = RectF::new(
        (target.width - scaled.width as f64) / 2.0,
        (target.height - scaled.height as f64) / 2.0,
        scaled.width as f64,
        scaled.height as f64,
    );

    FitResult {
        frame: scaled,
        placement,
    }
}

/// Scale a frame uniformly so it covers `target`, then crop the centered
/// region of exactly the target extent.
///
/// The scale is `max(target.width/width, target.height/height)`. If rounding
/// at the boundary leaves the centered crop not fully contained in the scaled
/// extent, the scaled (uncropped) frame is returned instead of failing.
pub fn resize_to_fill(frame: &Frame, target: SizeF, filter: SamplingFilter) -> Frame {
    if frame.is_empty() || target.is_empty() {
        return frame.clone();
    }

    let scale = (target.width / frame.width as f64).max(target.height / frame.height as f64);
    let new_w = (((frame.width as f64 * scale).round()) as u32).max(1);
    let new_h = (((frame.height as f64 * scale).round()) as u32).max(1);
    let scaled = resize_exact(frame, new_w, new_h, filter);

    let target_w = target.width.round().max(1.0) as u32;
    let target_h = target.height.round().max(1.0) as u32;

    // Boundary rounding can leave the scaled frame a pixel short of the
    // target; fall back to the uncropped scaled frame in that case.
    if scaled.width < target_w || scaled.height < target_h {
        return scaled;
    }

    let left = (scaled.width - target_w) / 2;
    let top = (scaled.height - target_h) / 2;
    crop_px(&scaled, left, top, target_w, target_h)
}

/// Tolerance when flooring scaled extents to pixels.
const DIM_TOLERANCE: f64 = 1e-6;

/// Resize a frame to exact pixel dimensions.
fn resize_exact(frame: &Frame, new_w: u32, new_h: u32, filter: SamplingFilter) -> Frame {
    if new_w == frame.width && new_h == frame.height {
        return frame.clone();
    }

    let Some(img) = frame.to_rgba_image() else {
        return frame.clone();
    };
    let resized = image::imageops::resize(&img, new_w, new_h, filter.to_image_filter());
    Frame::from_rgba_image(resized)
}


// ============================================================================
// Property-Based Tests
// ============================================================================
