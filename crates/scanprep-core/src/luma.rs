//! Luma calculation utilities using ITU-R BT.601 coefficients.
//!
//! Shared by the enhancement stages for desaturation and by the auto-adjust
//! brightness classification. The weights are fixed, not configurable.

/// BT.601 coefficient for red channel in luma calculation.
pub const LUMA_R: f64 = 0.299;

/// BT.601 coefficient for green channel in luma calculation.
pub const LUMA_G: f64 = 0.587;

/// BT.601 coefficient for blue channel in luma calculation.
pub const LUMA_B: f64 = 0.114;

/// Calculate luma from RGB values.
///
/// Scale-agnostic: the result is on whatever scale the inputs share
/// (0.0-1.0 normalized or 0.0-255.0).
#[inline]
pub fn luma(r: f64, g: f64, b: f64) -> f64 {
    LUMA_R * r + LUMA_G * g + LUMA_B * b
}

/// Calculate luma from u8 RGB values (0 to 255).
#[inline]
pub fn luma_u8(r: u8, g: u8, b: u8) -> u8 {
    luma(r as f64, g as f64, b as f64).clamp(0.0, 255.0).round() as u8
}
