//! Deterministic coordinate-space operations on frames.
//!
//! Geometry never signals errors: degenerate inputs (empty rects, zero-sized
//! targets, crops that fall outside the source) are handled by clamping or by
//! falling back to the unmodified frame.

mod fit;
mod orientation;
mod roi;
mod rotate;
mod types;

pub use fit::{resize_to_fill, resize_to_fit, FitResult};
pub(crate) use roi::crop_px;
pub use orientation::{apply_orientation, orientation_from_jpeg, Orientation};
pub use roi::{crop_to_roi, roi_crop_rect, RoiCropOptions, CARD_ASPECT_RATIO};
pub use rotate::{rotate, rotated_bounds};
pub use types::{Affine, RectF, SizeF};
