//! Threshold emphasis stage.
//!
//! A per-channel affine stretch that pushes values below the threshold
//! toward black and stretches the span above it across the full range,
//! emphasizing text edges ahead of recognition.

use crate::enhance::{FilterKind, ProcessContext, StageError};
use crate::frame::Frame;

/// Default threshold for text emphasis.
pub const DEFAULT_THRESHOLD: f64 = 0.5;

/// Apply a per-channel threshold stretch.
///
/// In normalized [0, 1] math each of R, G, B maps through
/// `output = input * scale + bias` with `scale = 1 / (1 - threshold)` and
/// `bias = -threshold * scale`; alpha passes through as identity.
///
/// `threshold` must be strictly less than 1; this is a caller contract and
/// is not guarded internally (1.0 divides by zero).
///
/// # Errors
///
/// Returns [`StageError::ConstructionFailed`] when the threshold-stretch
/// filter is unavailable in this context.
pub fn threshold_emphasis(
    ctx: &ProcessContext,
    frame: &Frame,
    threshold: f64,
) -> Result<Frame, StageError> {
    ctx.construct(FilterKind::ThresholdStretch)?;

    let scale = 1.0 / (1.0 - threshold);
    let bias = -threshold * scale;

    let mut pixels = frame.pixels.clone();
    for chunk in pixels.chunks_exact_mut(4) {
        for channel in chunk.iter_mut().take(3) {
            let v = *channel as f64 / 255.0;
            let stretched = v * scale + bias;
            *channel = (stretched.clamp(0.0, 1.0) * 255.0).round() as u8;
        }
        // chunk[3] (alpha) unchanged
    }

    Ok(Frame {
        width: frame.width,
        height: frame.height,
        pixels,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> ProcessContext {
        ProcessContext::new()
    }

    #[test]
    fn test_half_threshold_on_mid_gray() {
        // threshold 0.5 -> scale 2, bias -1: 128/255 maps to 2*(128/255) - 1
        let frame = Frame::filled(1, 1, [128, 128, 128, 255]);
        let result = threshold_emphasis(&ctx(), &frame, 0.5).unwrap();

        let expected = ((128.0 / 255.0) * 2.0 - 1.0) * 255.0;
        let got = result.rgba_at(0, 0)[0] as f64;
        assert!((got - expected).abs() <= 1.0, "got {}, want ~{}", got, expected);
    }

    #[test]
    fn test_below_threshold_clamps_to_black() {
        let frame = Frame::filled(1, 1, [64, 64, 64, 255]);
        let result = threshold_emphasis(&ctx(), &frame, 0.5).unwrap();
        assert_eq!(result.rgba_at(0, 0), [0, 0, 0, 255]);
    }

    #[test]
    fn test_white_stays_white() {
        let frame = Frame::filled(1, 1, [255, 255, 255, 255]);
        let result = threshold_emphasis(&ctx(), &frame, 0.5).unwrap();
        assert_eq!(result.rgba_at(0, 0), [255, 255, 255, 255]);
    }

    #[test]
    fn test_zero_threshold_is_identity() {
        // scale 1, bias 0
        let frame = Frame::new(2, 1, vec![13, 200, 97, 255, 0, 255, 128, 80]);
        let result = threshold_emphasis(&ctx(), &frame, 0.0).unwrap();
        assert_eq!(result, frame);
    }

    #[test]
    fn test_alpha_passes_through() {
        let frame = Frame::filled(2, 2, [64, 128, 200, 90]);
        let result = threshold_emphasis(&ctx(), &frame, 0.5).unwrap();
        assert_eq!(result.rgba_at(1, 1)[3], 90);
    }

    #[test]
    fn test_channels_stretched_independently() {
        let frame = Frame::filled(1, 1, [64, 160, 255, 255]);
        let result = threshold_emphasis(&ctx(), &frame, 0.5).unwrap();

        let [r, g, b, _] = result.rgba_at(0, 0);
        assert_eq!(r, 0); // below threshold
        assert!(g > 0 && g < 255); // inside the stretched span
        assert_eq!(b, 255); // at the top
    }

    #[test]
    fn test_construction_failure_surfaces() {
        let restricted = ProcessContext::without(&[FilterKind::ThresholdStretch]);
        let frame = Frame::filled(1, 1, [1, 2, 3, 255]);
        assert!(threshold_emphasis(&restricted, &frame, 0.5).is_err());
    }
}
