//! Sensor orientation normalization.
//!
//! Captured stills carry an EXIF orientation tag describing how the sensor
//! was held; recognizers want the frame upright. Quadrant reorientation goes
//! through here, arbitrary angles through [`rotate`](crate::geometry::rotate).

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::DynamicImage;
use serde::{Deserialize, Serialize};

use crate::frame::Frame;

/// The eight ways a captured frame can be oriented relative to upright.
///
/// Discriminants follow the EXIF `Orientation` tag (1 through 8). Anything
/// outside that range decodes as [`Orientation::Normal`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum Orientation {
    /// Already upright.
    #[default]
    Normal = 1,
    /// Mirrored across the vertical axis.
    FlipHorizontal = 2,
    /// Half turn (upside down).
    Rotate180 = 3,
    /// Mirrored across the horizontal axis.
    FlipVertical = 4,
    /// Mirrored, then turned a quarter counter-clockwise.
    Transpose = 5,
    /// Quarter turn clockwise.
    Rotate90CW = 6,
    /// Mirrored, then turned a quarter clockwise.
    Transverse = 7,
    /// Quarter turn counter-clockwise.
    Rotate270CW = 8,
}

impl Orientation {
    /// Whether correcting this orientation exchanges the frame's width and
    /// height. True for the quarter-turn cases, mirrored or not.
    #[inline]
    pub fn swaps_dimensions(self) -> bool {
        matches!(
            self,
            Self::Transpose | Self::Rotate90CW | Self::Transverse | Self::Rotate270CW
        )
    }
}

impl From<u32> for Orientation {
    fn from(value: u32) -> Self {
        match value {
            2 => Self::FlipHorizontal,
            3 => Self::Rotate180,
            4 => Self::FlipVertical,
            5 => Self::Transpose,
            6 => Self::Rotate90CW,
            7 => Self::Transverse,
            8 => Self::Rotate270CW,
            // 1 is Normal; anything out of range degrades to Normal too
            _ => Self::Normal,
        }
    }
}

/// Apply an orientation correction to a frame, producing an upright frame.
///
/// `Orientation::Normal` returns a clone of the input unchanged.
pub fn apply_orientation(frame: &Frame, orientation: Orientation) -> Frame {
    if orientation == Orientation::Normal {
        return frame.clone();
    }

    let Some(img) = frame.to_rgba_image() else {
        return frame.clone();
    };
    let img = DynamicImage::ImageRgba8(img);

    let corrected = match orientation {
        Orientation::Normal => img,
        Orientation::FlipHorizontal => img.fliph(),
        Orientation::Rotate180 => img.rotate180(),
        Orientation::FlipVertical => img.flipv(),
        Orientation::Transpose => img.rotate90().fliph(),
        Orientation::Rotate90CW => img.rotate90(),
        Orientation::Transverse => img.rotate270().fliph(),
        Orientation::Rotate270CW => img.rotate270(),
    };

    Frame::from_rgba_image(corrected.into_rgba8())
}

/// Extract the EXIF orientation from encoded JPEG bytes.
///
/// Returns `Orientation::Normal` if no EXIF data is present or the tag cannot
/// be read; orientation extraction never fails the capture loop.
pub fn orientation_from_jpeg(bytes: &[u8]) -> Orientation {
    let mut cursor = Cursor::new(bytes);
    let Ok(exif) = Reader::new().read_from_container(&mut cursor) else {
        return Orientation::Normal;
    };

    exif.get_field(Tag::Orientation, In::PRIMARY)
        .and_then(|field| field.value.get_uint(0))
        .map(Orientation::from)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_by_one() -> Frame {
        // Left pixel red, right pixel blue
        Frame::new(2, 1, vec![255, 0, 0, 255, 0, 0, 255, 255])
    }

    #[test]
    fn test_normal_is_clone() {
        let frame = two_by_one();
        let result = apply_orientation(&frame, Orientation::Normal);
        assert_eq!(result, frame);
    }

    #[test]
    fn test_flip_horizontal_swaps_pixels() {
        let frame = two_by_one();
        let result = apply_orientation(&frame, Orientation::FlipHorizontal);
        assert_eq!(result.rgba_at(0, 0), [0, 0, 255, 255]);
        assert_eq!(result.rgba_at(1, 0), [255, 0, 0, 255]);
    }

    #[test]
    fn test_rotate90_swaps_dimensions() {
        let frame = two_by_one();
        let result = apply_orientation(&frame, Orientation::Rotate90CW);
        assert_eq!(result.width, 1);
        assert_eq!(result.height, 2);
    }

    #[test]
    fn test_rotate180_preserves_dimensions() {
        let frame = two_by_one();
        let result = apply_orientation(&frame, Orientation::Rotate180);
        assert_eq!(result.width, 2);
        assert_eq!(result.height, 1);
        assert_eq!(result.rgba_at(0, 0), [0, 0, 255, 255]);
    }

    #[test]
    fn test_swaps_dimensions_flags() {
        assert!(!Orientation::Normal.swaps_dimensions());
        assert!(!Orientation::Rotate180.swaps_dimensions());
        assert!(Orientation::Rotate90CW.swaps_dimensions());
        assert!(Orientation::Rotate270CW.swaps_dimensions());
        assert!(Orientation::Transpose.swaps_dimensions());
        assert!(Orientation::Transverse.swaps_dimensions());
    }

    #[test]
    fn test_orientation_from_invalid_values() {
        assert_eq!(Orientation::from(0), Orientation::Normal);
        assert_eq!(Orientation::from(9), Orientation::Normal);
        assert_eq!(Orientation::from(6), Orientation::Rotate90CW);
    }

    #[test]
    fn test_orientation_from_garbage_bytes() {
        // Not a JPEG at all: extraction degrades to Normal
        assert_eq!(orientation_from_jpeg(&[0u8; 16]), Orientation::Normal);
        assert_eq!(orientation_from_jpeg(&[]), Orientation::Normal);
    }
}
