//! Appearance normalization stages.
//!
//! Every stage is optional and independently callable, and no stage keeps
//! state between calls. Stages are constructed through a shared
//! [`ProcessContext`]; construction can fail when the host lacks a filter
//! capability, and each stage maps that failure to its own documented policy:
//!
//! - [`grayscale`], [`threshold_emphasis`], [`invert_colors`] surface
//!   [`StageError::ConstructionFailed`] to the caller;
//! - [`gaussian_blur`] absorbs it into a soft no-op returning the input;
//! - [`analyze_and_adjust`] surfaces it only for the sampling capability and
//!   soft-falls-back for its internal adjustment stages.
//!
//! The asymmetry is intentional and preserved; do not unify it.

mod auto_adjust;
mod blur;
mod color_controls;
mod invert;
mod threshold;

pub use auto_adjust::analyze_and_adjust;
pub use blur::{gaussian_blur, DEFAULT_BLUR_RADIUS};
pub use color_controls::{color_controls, grayscale};
pub use invert::invert_colors;
pub use threshold::{threshold_emphasis, DEFAULT_THRESHOLD};

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::frame::Frame;
use crate::BrightnessSample;

/// Error types for enhancement stage construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StageError {
    /// The underlying filter could not be constructed in this context.
    #[error("failed to construct {filter} filter")]
    ConstructionFailed {
        /// Which filter was unavailable.
        filter: FilterKind,
    },
}

/// The named filters an enhancement stage may require.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FilterKind {
    /// Saturation/brightness/contrast affine color stage.
    ColorControls,
    /// Gaussian blur.
    GaussianBlur,
    /// Per-channel threshold stretch.
    ThresholdStretch,
    /// Full color inversion.
    ColorInvert,
    /// Area-average region sampling.
    AreaAverage,
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FilterKind::ColorControls => "color controls",
            FilterKind::GaussianBlur => "gaussian blur",
            FilterKind::ThresholdStretch => "threshold stretch",
            FilterKind::ColorInvert => "color invert",
            FilterKind::AreaAverage => "area average",
        };
        f.write_str(name)
    }
}

/// Shared rendering/processing context for the enhancement stages.
///
/// The host-graphics analogue of this context is expensive to construct, so
/// callers create one per session and reuse it. All methods take `&self`;
/// the context is safe to share across threads as long as nothing mutates
/// it, which nothing here does.
///
/// The context carries the capability table consulted when a stage builds
/// its filter. Hosts with every capability use [`ProcessContext::new`];
/// restricted hosts (and the fallback-policy tests) use
/// [`ProcessContext::without`].
#[derive(Debug, Clone, Default)]
pub struct ProcessContext {
    unavailable: Vec<FilterKind>,
}

impl ProcessContext {
    /// Create a context with every filter capability available.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a context in which the given filters cannot be constructed.
    pub fn without(filters: &[FilterKind]) -> Self {
        Self {
            unavailable: filters.to_vec(),
        }
    }

    /// Construct the named filter, or report that it is unavailable.
    pub(crate) fn construct(&self, filter: FilterKind) -> Result<(), StageError> {
        if self.unavailable.contains(&filter) {
            Err(StageError::ConstructionFailed { filter })
        } else {
            Ok(())
        }
    }

    /// Area-average a frame's full extent into a single mean RGBA sample.
    ///
    /// This is the sampling step behind [`analyze_and_adjust`]; it renders
    /// the mean of every pixel into one conceptual 1x1 buffer.
    pub fn average_color(&self, frame: &Frame) -> Result<BrightnessSample, StageError> {
        self.construct(FilterKind::AreaAverage)?;

        if frame.is_empty() {
            return Ok(BrightnessSample::default());
        }

        let mut sums = [0.0f64; 4];
        for chunk in frame.pixels.chunks_exact(4) {
            sums[0] += chunk[0] as f64;
            sums[1] += chunk[1] as f64;
            sums[2] += chunk[2] as f64;
            sums[3] += chunk[3] as f64;
        }

        let count = frame.pixel_count() as f64;
        Ok(BrightnessSample::new(
            sums[0] / count,
            sums[1] / count,
            sums[2] / count,
            sums[3] / count,
        ))
    }

    /// Materialize a frame into a displayable bitmap.
    ///
    /// Returns `None` only when the pixel buffer does not match the frame's
    /// stated extent.
    pub fn materialize(&self, frame: &Frame) -> Option<image::RgbaImage> {
        frame.to_rgba_image()
    }
}
