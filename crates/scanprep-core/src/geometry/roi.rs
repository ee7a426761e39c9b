//! Region-of-interest cropping with display-to-sensor coordinate mapping.
//!
//! A scan overlay is drawn in display coordinates on a screen that presents
//! the camera frame aspect-fill (the frame covers the screen, overflow
//! clipped). Mapping the overlay back into sensor space therefore uses the
//! *smaller* of the two axis scales, because that is the scale the fill
//! layout actually applied before clipping the larger dimension.
//!
//! The crop width is derived from the crop height and a fixed target aspect
//! ratio rather than from the overlay's on-screen width, and the crop is
//! horizontally centered in the frame regardless of where the overlay sits.
//! Both are deliberate: the overlay marks a card-shaped scan target whose
//! height is the reliable cue.

use serde::{Deserialize, Serialize};

use crate::frame::Frame;
use crate::geometry::types::{RectF, SizeF};

/// Width/height ratio of an ID-1 card scan target.
pub const CARD_ASPECT_RATIO: f64 = 1.586;

/// Options for the ROI crop mapping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoiCropOptions {
    /// Target aspect ratio of the crop (width = height * aspect_ratio).
    pub aspect_ratio: f64,
}

impl Default for RoiCropOptions {
    fn default() -> Self {
        Self {
            aspect_ratio: CARD_ASPECT_RATIO,
        }
    }
}

/// Compute the sensor-space crop rect for a display-space ROI.
///
/// `roi` is in display coordinates on a screen of `screen` size; `image` is
/// the sensor-space frame extent. The returned rect is in the bottom-up
/// coordinate space the mapping is defined in (display y grows downward, the
/// sensor-space origin used here grows upward); [`crop_to_roi`] converts to
/// raster rows internally.
///
/// # Example
///
/// ```
/// use scanprep_core::{roi_crop_rect, RectF, RoiCropOptions, SizeF};
///
/// // 400x800 screen showing a 1200x1600 sensor frame: min scale is 2
/// let rect = roi_crop_rect(
///     SizeF::new(1200.0, 1600.0),
///     RectF::new(50.0, 300.0, 300.0, 100.0),
///     SizeF::new(400.0, 800.0),
///     RoiCropOptions::default(),
/// );
/// assert!((rect.height - 200.0).abs() < 1e-9);
/// assert!((rect.width - 317.2).abs() < 1e-9);
/// ```
pub fn roi_crop_rect(image: SizeF, roi: RectF, screen: SizeF, opts: RoiCropOptions) -> RectF {
    let width_scale = image.width / screen.width;
    let height_scale = image.height / screen.height;
    let min_scale = width_scale.min(height_scale);

    let crop_height = roi.height * min_scale;
    let crop_width = crop_height * opts.aspect_ratio;

    let x = (image.width - crop_width) / 2.0;
    let y = image.height - (roi.y + roi.height) * min_scale;

    RectF::new(x, y, crop_width, crop_height)
}

/// Crop a frame to the sensor-space region behind a display-space ROI.
///
/// Degenerate inputs (empty frame, empty screen, empty ROI) fall back to a
/// clone of the input or a clamped minimal crop; this never raises.
pub fn crop_to_roi(frame: &Frame, roi: RectF, screen: SizeF, opts: RoiCropOptions) -> Frame {
    if frame.is_empty() || screen.is_empty() {
        return frame.clone();
    }

    let image = SizeF::new(frame.width as f64, frame.height as f64);
    let rect = roi_crop_rect(image, roi, screen, opts);
    if rect.is_empty() {
        return frame.clone();
    }

    // Convert the bottom-up rect into top-down raster rows
    let top = image.height - rect.y - rect.height;
    crop_px(
        frame,
        rect.x.round().max(0.0) as u32,
        top.round().max(0.0) as u32,
        rect.width.round() as u32,
        rect.height.round() as u32,
    )
}

/// Crop a frame to a pixel rect, clamping to the frame bounds.
///
/// Minimum output dimension is 1x1; requests that fall entirely outside the
/// frame are pulled back to the nearest edge.
pub(crate) fn crop_px(frame: &Frame, left: u32, top: u32, width: u32, height: u32) -> Frame {
    let left = left.min(frame.width.saturating_sub(1));
    let top = top.min(frame.height.saturating_sub(1));
    let right = (left + width).min(frame.width);
    let bottom = (top + height).min(frame.height);

    let out_width = right.saturating_sub(left).max(1);
    let out_height = bottom.saturating_sub(top).max(1);

    let mut output = vec![0u8; (out_width * out_height * 4) as usize];

    for y in 0..out_height {
        let src_start = (((top + y) * frame.width + left) * 4) as usize;
        let src_end = src_start + (out_width * 4) as usize;
        let dst_start = (y * out_width * 4) as usize;
        let dst_end = dst_start + (out_width * 4) as usize;
        output[dst_start..dst_end].copy_from_slice(&frame.pixels[src_start..src_end]);
    }

    Frame {
        width: out_width,
        height: out_height,
        pixels: output,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Frame where each pixel's red channel encodes its position.
    fn test_frame(width: u32, height: u32) -> Frame {
        let mut pixels = Vec::with_capacity((width * height * 4) as usize);
        for y in 0..height {
            for x in 0..width {
                let v = ((y * width + x) % 256) as u8;
                pixels.extend_from_slice(&[v, v, v, 255]);
            }
        }
        Frame::new(width, height, pixels)
    }

    #[test]
    fn test_roi_rect_worked_example() {
        // screen 400x800, sensor 1200x1600, roi (50,300) 300x100:
        // min_scale = min(3, 2) = 2, crop 317.2x200 at (441.4, 800)
        let rect = roi_crop_rect(
            SizeF::new(1200.0, 1600.0),
            RectF::new(50.0, 300.0, 300.0, 100.0),
            SizeF::new(400.0, 800.0),
            RoiCropOptions::default(),
        );

        assert!((rect.height - 200.0).abs() < 1e-9);
        assert!((rect.width - 317.2).abs() < 1e-9);
        assert!((rect.x - 441.4).abs() < 1e-9);
        assert!((rect.y - 800.0).abs() < 1e-9);
    }

    #[test]
    fn test_roi_width_is_ignored_for_sizing() {
        let image = SizeF::new(1200.0, 1600.0);
        let screen = SizeF::new(400.0, 800.0);
        let opts = RoiCropOptions::default();

        let narrow = roi_crop_rect(image, RectF::new(50.0, 300.0, 10.0, 100.0), screen, opts);
        let wide = roi_crop_rect(image, RectF::new(50.0, 300.0, 390.0, 100.0), screen, opts);
        assert_eq!(narrow, wide);
    }

    #[test]
    fn test_roi_horizontal_position_is_ignored() {
        let image = SizeF::new(1200.0, 1600.0);
        let screen = SizeF::new(400.0, 800.0);
        let opts = RoiCropOptions::default();

        let left = roi_crop_rect(image, RectF::new(0.0, 300.0, 300.0, 100.0), screen, opts);
        let right = roi_crop_rect(image, RectF::new(100.0, 300.0, 300.0, 100.0), screen, opts);
        assert_eq!(left.x, right.x);
        assert_eq!(left.width, right.width);
    }

    #[test]
    fn test_custom_aspect_ratio() {
        let rect = roi_crop_rect(
            SizeF::new(1200.0, 1600.0),
            RectF::new(50.0, 300.0, 300.0, 100.0),
            SizeF::new(400.0, 800.0),
            RoiCropOptions { aspect_ratio: 1.0 },
        );
        assert!((rect.width - rect.height).abs() < 1e-9);
    }

    #[test]
    fn test_crop_to_roi_dimensions() {
        let frame = test_frame(120, 160);
        let result = crop_to_roi(
            &frame,
            RectF::new(5.0, 30.0, 30.0, 10.0),
            SizeF::new(40.0, 80.0),
            RoiCropOptions::default(),
        );

        // min_scale = min(3, 2) = 2 -> crop height 20, width 31.72 -> 32
        assert_eq!(result.height, 20);
        assert_eq!(result.width, 32);
    }

    #[test]
    fn test_crop_to_roi_vertical_flip() {
        // ROI at the top of the display must select rows near the top of the
        // frame: bottom-up origin y = H - (roi.y + roi.h) * scale is high,
        // which converts back to a small top row.
        let frame = test_frame(100, 200);
        let screen = SizeF::new(100.0, 200.0); // scale 1
        let opts = RoiCropOptions { aspect_ratio: 1.0 };

        let top_roi = crop_to_roi(&frame, RectF::new(0.0, 0.0, 100.0, 10.0), screen, opts);
        // Rows 0..10, so the first pixel is position (x=45, y=0): centered
        // horizontally at (100-10)/2 = 45
        assert_eq!(top_roi.height, 10);
        assert_eq!(top_roi.rgba_at(0, 0)[0], 45);
    }

    #[test]
    fn test_empty_roi_falls_back_to_clone() {
        let frame = test_frame(100, 100);
        let result = crop_to_roi(
            &frame,
            RectF::new(0.0, 10.0, 50.0, 0.0),
            SizeF::new(100.0, 100.0),
            RoiCropOptions::default(),
        );
        assert_eq!(result, frame);
    }

    #[test]
    fn test_empty_screen_falls_back_to_clone() {
        let frame = test_frame(100, 100);
        let result = crop_to_roi(
            &frame,
            RectF::new(0.0, 10.0, 50.0, 20.0),
            SizeF::new(0.0, 100.0),
            RoiCropOptions::default(),
        );
        assert_eq!(result, frame);
    }

    #[test]
    fn test_crop_px_clamps_to_bounds() {
        let frame = test_frame(10, 10);
        let result = crop_px(&frame, 8, 8, 50, 50);
        assert_eq!(result.width, 2);
        assert_eq!(result.height, 2);
    }

    #[test]
    fn test_crop_px_minimum_dimension() {
        let frame = test_frame(10, 10);
        let result = crop_px(&frame, 20, 20, 0, 0);
        assert_eq!(result.width, 1);
        assert_eq!(result.height, 1);
    }

    #[test]
    fn test_crop_px_preserves_values() {
        let frame = test_frame(10, 10);
        let result = crop_px(&frame, 3, 3, 4, 4);
        // Value at (3, 3) = 3 * 10 + 3 = 33
        assert_eq!(result.rgba_at(0, 0)[0], 33);
        assert_eq!(result.width, 4);
        assert_eq!(result.height, 4);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
