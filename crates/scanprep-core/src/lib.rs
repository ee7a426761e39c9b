//! Scanprep Core - Frame preprocessing library
//!
//! This crate prepares a captured raster frame for downstream recognition
//! (OCR/scanning). It provides coordinate-space geometry (rotation, ROI crop,
//! aspect-preserving fit/fill) and adaptive appearance enhancement (grayscale,
//! blur, threshold stretch, brightness-driven auto-adjust).

pub mod enhance;
pub mod frame;
pub mod geometry;
pub mod luma;

pub use enhance::{
    analyze_and_adjust, color_controls, gaussian_blur, grayscale, invert_colors,
    threshold_emphasis, FilterKind, ProcessContext, StageError, DEFAULT_BLUR_RADIUS,
    DEFAULT_THRESHOLD,
};
pub use frame::{Frame, SamplingFilter};
pub use geometry::{
    apply_orientation, crop_to_roi, orientation_from_jpeg, resize_to_fill, resize_to_fit,
    roi_crop_rect, rotate, rotated_bounds, Affine, FitResult, Orientation, RectF, RoiCropOptions,
    SizeF, CARD_ASPECT_RATIO,
};

/// Luma value (0-255 scale) above which a frame is classified as having a
/// bright background.
pub const BRIGHT_BACKGROUND_LUMA: f64 = 192.0;

/// Fixed brightness nudge applied to bright-background frames.
pub const BRIGHT_BACKGROUND_OFFSET: i32 = -15;

/// Target mid-gray level a dark background's mean is pushed toward.
pub const TARGET_MID_LEVEL: f64 = 128.0;

/// Mean color of a sampled region, produced by area-averaging.
///
/// Channels are on a 0-255 scale but kept fractional so that large regions
/// retain sub-level precision.
#[derive(Debug, Clone, Copy, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct BrightnessSample {
    /// Mean red channel (0.0 to 255.0)
    pub r: f64,
    /// Mean green channel (0.0 to 255.0)
    pub g: f64,
    /// Mean blue channel (0.0 to 255.0)
    pub b: f64,
    /// Mean alpha channel (0.0 to 255.0)
    pub a: f64,
}

impl BrightnessSample {
    /// Create a sample from mean channel values.
    pub fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Perceptual brightness of the sample.
    pub fn luma(&self) -> f64 {
        luma::luma(self.r, self.g, self.b)
    }

    /// Whether the sampled region reads as a bright (light) background.
    pub fn is_bright_background(&self) -> bool {
        self.luma() > BRIGHT_BACKGROUND_LUMA
    }
}

/// Correction derived from a [`BrightnessSample`].
///
/// Computed fresh for every auto-adjust call; lighting may change between
/// frames, so a plan is never reused.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AdjustmentPlan {
    /// Multiplicative contrast factor (always positive).
    pub contrast_factor: f64,
    /// Additive brightness offset on a 0-255 scale, in [-255, 255].
    pub brightness_offset: i32,
    /// Whether the frame should be fully color-inverted instead of stretched.
    pub invert: bool,
}

impl AdjustmentPlan {
    /// Derive the correction for a sampled frame.
    ///
    /// Bright backgrounds get a full inversion plus a small fixed negative
    /// brightness nudge; dark backgrounds get a contrast stretch that treats
    /// the observed luma as the frame's minimum brightness and 255 as its
    /// maximum, with brightness lifting the mean toward mid-gray.
    ///
    /// # Example
    ///
    /// ```
    /// use scanprep_core::{AdjustmentPlan, BrightnessSample};
    ///
    /// // A near-white mean reads as a bright background and inverts
    /// let bright = BrightnessSample::new(240.0, 240.0, 240.0, 255.0);
    /// assert!(AdjustmentPlan::for_sample(&bright).invert);
    ///
    /// // A black mean gets lifted toward mid-gray instead
    /// let dark = BrightnessSample::new(0.0, 0.0, 0.0, 255.0);
    /// let plan = AdjustmentPlan::for_sample(&dark);
    /// assert!(!plan.invert);
    /// assert_eq!(plan.brightness_offset, 128);
    /// ```
    pub fn for_sample(sample: &BrightnessSample) -> Self {
        let luma = sample.luma();
        let invert = luma > BRIGHT_BACKGROUND_LUMA;

        let contrast_factor = if luma < 255.0 {
            255.0 / (255.0 - luma)
        } else {
            1.0
        };

        let brightness_offset = if invert {
            BRIGHT_BACKGROUND_OFFSET
        } else {
            (TARGET_MID_LEVEL - luma) as i32
        };

        Self {
            contrast_factor,
            brightness_offset,
            invert,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_luma_white() {
        let sample = BrightnessSample::new(255.0, 255.0, 255.0, 255.0);
        assert!((sample.luma() - 255.0).abs() < 1e-9);
        assert!(sample.is_bright_background());
    }

    #[test]
    fn test_sample_luma_black() {
        let sample = BrightnessSample::new(0.0, 0.0, 0.0, 255.0);
        assert!(sample.luma().abs() < f64::EPSILON);
        assert!(!sample.is_bright_background());
    }

    #[test]
    fn test_sample_luma_weights() {
        // Pure green dominates perceived brightness
        let green = BrightnessSample::new(0.0, 255.0, 0.0, 255.0);
        let blue = BrightnessSample::new(0.0, 0.0, 255.0, 255.0);
        assert!(green.luma() > blue.luma());
    }

    #[test]
    fn test_plan_bright_background_inverts() {
        let sample = BrightnessSample::new(255.0, 255.0, 255.0, 255.0);
        let plan = AdjustmentPlan::for_sample(&sample);
        assert!(plan.invert);
        assert_eq!(plan.brightness_offset, BRIGHT_BACKGROUND_OFFSET);
        // luma >= 255 takes the divide-by-zero guard
        assert!((plan.contrast_factor - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_plan_dark_background_stretches() {
        let sample = BrightnessSample::new(0.0, 0.0, 0.0, 255.0);
        let plan = AdjustmentPlan::for_sample(&sample);
        assert!(!plan.invert);
        assert!((plan.contrast_factor - 1.0).abs() < f64::EPSILON);
        assert_eq!(plan.brightness_offset, 128);
    }

    #[test]
    fn test_plan_mid_gray() {
        let sample = BrightnessSample::new(128.0, 128.0, 128.0, 255.0);
        let plan = AdjustmentPlan::for_sample(&sample);
        assert!(!plan.invert);
        // 255 / (255 - 128) ≈ 2.008
        assert!((plan.contrast_factor - 255.0 / 127.0).abs() < 1e-9);
        assert_eq!(plan.brightness_offset, 0);
    }

    #[test]
    fn test_plan_classification_boundary() {
        // Exactly at the threshold is not bright (strict comparison)
        let at = BrightnessSample::new(192.0, 192.0, 192.0, 255.0);
        assert!(!AdjustmentPlan::for_sample(&at).invert);

        let above = BrightnessSample::new(200.0, 200.0, 200.0, 255.0);
        assert!(AdjustmentPlan::for_sample(&above).invert);
    }

    #[test]
    fn test_plan_offset_in_range() {
        for v in [0.0, 64.0, 127.0, 191.9, 192.1, 255.0] {
            let plan = AdjustmentPlan::for_sample(&BrightnessSample::new(v, v, v, 255.0));
            assert!(plan.brightness_offset >= -255 && plan.brightness_offset <= 255);
            assert!(plan.contrast_factor > 0.0);
        }
    }
}
