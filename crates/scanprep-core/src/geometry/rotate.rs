//! Frame rotation about the frame center.
//!
//! Uses inverse mapping: for each pixel of the output, the source position
//! that contributes to it is found by applying the inverse rotation, then
//! sampled with bilinear interpolation. The output canvas is the natural
//! bounding box of the rotated frame; nothing is cropped or padded here.

use crate::frame::Frame;
use crate::geometry::types::Affine;

/// Compute the bounding-box dimensions of a rotated frame.
///
/// Rotating by anything other than a quadrant angle pushes the corners
/// outside the original bounds; this returns the minimal box containing the
/// whole rotated frame.
pub fn rotated_bounds(width: u32, height: u32, degrees: f64) -> (u32, u32) {
    // Normalize so 360, 720, etc. hit the fast paths
    let normalized = degrees % 360.0;
    let abs = normalized.abs();

    if abs < 0.001 || (360.0 - abs) < 0.001 {
        return (width, height);
    }
    if (abs - 90.0).abs() < 0.001 || (abs - 270.0).abs() < 0.001 {
        return (height, width);
    }
    if (abs - 180.0).abs() < 0.001 {
        return (width, height);
    }

    let w = width as f64;
    let h = height as f64;
    let rotation = Affine::rotation_about(w / 2.0, h / 2.0, degrees.to_radians());

    let corners = [(0.0, 0.0), (w, 0.0), (0.0, h), (w, h)];
    let mut min_x = f64::INFINITY;
    let mut min_y = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;
    let mut max_y = f64::NEG_INFINITY;
    for (cx, cy) in corners {
        let (x, y) = rotation.apply(cx, cy);
        min_x = min_x.min(x);
        min_y = min_y.min(y);
        max_x = max_x.max(x);
        max_y = max_y.max(y);
    }

    let new_w = (max_x - min_x).round() as u32;
    let new_h = (max_y - min_y).round() as u32;
    (new_w.max(1), new_h.max(1))
}

/// Rotate a frame about its own center.
///
/// `degrees == 0` is an explicit fast path returning a byte-identical clone
/// of the input, per the pipeline contract; it is not merely a numerically
/// near-identity result. For nonzero angles the pivot is `(width/2,
/// height/2)` of the input and the output extent is whatever the rotation
/// naturally produces.
///
/// # Example
///
/// ```
/// use scanprep_core::{rotate, Frame};
///
/// let frame = Frame::filled(40, 20, [128, 128, 128, 255]);
///
/// // A quarter turn swaps the extent
/// let turned = rotate(&frame, 90.0);
/// assert_eq!((turned.width, turned.height), (20, 40));
///
/// // Zero degrees is byte-identical
/// assert_eq!(rotate(&frame, 0.0), frame);
/// ```
pub fn rotate(frame: &Frame, degrees: f64) -> Frame {
    if degrees == 0.0 {
        return frame.clone();
    }

    let (src_w, src_h) = (frame.width as f64, frame.height as f64);
    let (dst_w, dst_h) = rotated_bounds(frame.width, frame.height, degrees);

    // Map dst -> src for sampling; using the forward angle here makes the
    // visual rotation counter-clockwise for positive degrees in y-down
    // raster space.
    let inverse = Affine::translation(-(dst_w as f64) / 2.0, -(dst_h as f64) / 2.0)
        .then(Affine::rotation(degrees.to_radians()))
        .then(Affine::translation(src_w / 2.0, src_h / 2.0));

    let mut output = vec![0u8; (dst_w * dst_h * 4) as usize];

    for dst_y in 0..dst_h {
        for dst_x in 0..dst_w {
            let (src_x, src_y) = inverse.apply(dst_x as f64, dst_y as f64);
            let pixel = sample_bilinear(frame, src_x, src_y);

            let dst_idx = ((dst_y * dst_w + dst_x) * 4) as usize;
            output[dst_idx..dst_idx + 4].copy_from_slice(&pixel);
        }
    }

    Frame {
        width: dst_w,
        height: dst_h,
        pixels: output,
    }
}

/// Sample a pixel using bilinear interpolation over the 4 nearest neighbors.
///
/// Out-of-bounds positions sample as fully transparent black.
fn sample_bilinear(frame: &Frame, x: f64, y: f64) -> [u8; 4] {
    let (w, h) = (frame.width as i64, frame.height as i64);

    if x < 0.0 || x >= (w - 1) as f64 || y < 0.0 || y >= (h - 1) as f64 {
        return [0, 0, 0, 0];
    }

    let x0 = x.floor() as u32;
    let y0 = y.floor() as u32;
    let x1 = x0 + 1;
    let y1 = y0 + 1;

    let fx = x - x0 as f64;
    let fy = y - y0 as f64;

    let p00 = frame.rgba_at(x0, y0);
    let p10 = frame.rgba_at(x1, y0);
    let p01 = frame.rgba_at(x0, y1);
    let p11 = frame.rgba_at(x1, y1);

    let mut result = [0u8; 4];
    for i in 0..4 {
        let v = p00[i] as f64 * (1.0 - fx) * (1.0 - fy)
            + p10[i] as f64 * fx * (1.0 - fy)
            + p01[i] as f64 * (1.0 - fx) * fy
            + p11[i] as f64 * fx * fy;
        result[i] = v.clamp(0.0, 255.0).round() as u8;
    }

    result
}
