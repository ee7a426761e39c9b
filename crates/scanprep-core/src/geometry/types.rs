//! Geometry value types.
//!
//! Extents are kept in `f64` because transforms may be fractional; raster
//! operations round to pixel coordinates at the last step.

use serde::{Deserialize, Serialize};

/// A floating-point extent.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SizeF {
    pub width: f64,
    pub height: f64,
}

impl SizeF {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// A non-positive dimension denotes an empty size.
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// An origin + size rectangle in a named coordinate space.
///
/// Which space (display vs. sensor, top-down vs. bottom-up) is documented at
/// each use site; the type itself is space-agnostic.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RectF {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl RectF {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// A rect with a non-positive dimension denotes "empty"; downstream crops
    /// clamp rather than raise.
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    pub fn max_x(&self) -> f64 {
        self.x + self.width
    }

    pub fn max_y(&self) -> f64 {
        self.y + self.height
    }

    /// Whether `other` lies entirely within this rect.
    pub fn contains_rect(&self, other: &RectF) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.max_x() <= self.max_x()
            && other.max_y() <= self.max_y()
    }
}

/// A 2D affine map: `(x, y) -> (a*x + c*y + tx, b*x + d*y + ty)`.
///
/// Pivoted transforms are composed left-to-right as translate-to-origin →
/// rotate/scale → translate-back. The identity (angle 0, scale 1, translation
/// 0) composes to an exact no-op, not just a numerically-near one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Affine {
    a: f64,
    b: f64,
    c: f64,
    d: f64,
    tx: f64,
    ty: f64,
}

impl Affine {
    /// The identity transform.
    pub fn identity() -> Self {
        Self {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            tx: 0.0,
            ty: 0.0,
        }
    }

    /// Pure translation.
    pub fn translation(tx: f64, ty: f64) -> Self {
        Self {
            tx,
            ty,
            ..Self::identity()
        }
    }

    /// Pure rotation about the origin, counter-clockwise in math coordinates.
    pub fn rotation(radians: f64) -> Self {
        let (sin, cos) = radians.sin_cos();
        Self {
            a: cos,
            b: sin,
            c: -sin,
            d: cos,
            tx: 0.0,
            ty: 0.0,
        }
    }

    /// Pure per-axis scale about the origin.
    pub fn scale(sx: f64, sy: f64) -> Self {
        Self {
            a: sx,
            d: sy,
            ..Self::identity()
        }
    }

    /// Rotation about an arbitrary pivot point.
    pub fn rotation_about(cx: f64, cy: f64, radians: f64) -> Self {
        Self::translation(-cx, -cy)
            .then(Self::rotation(radians))
            .then(Self::translation(cx, cy))
    }

    /// Compose with a following transform: `self` first, then `next`.
    pub fn then(self, next: Affine) -> Affine {
        Affine {
            a: next.a * self.a + next.c * self.b,
            b: next.b * self.a + next.d * self.b,
            c: next.a * self.c + next.c * self.d,
            d: next.b * self.c + next.d * self.d,
            tx: next.a * self.tx + next.c * self.ty + next.tx,
            ty: next.b * self.tx + next.d * self.ty + next.ty,
        }
    }

    /// Apply the map to a point.
    #[inline]
    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        (
            self.a * x + self.c * y + self.tx,
            self.b * x + self.d * y + self.ty,
        )
    }

    /// Exact identity check.
    pub fn is_identity(&self) -> bool {
        *self == Self::identity()
    }
}

impl Default for Affine {
    fn default() -> Self {
        Self::identity()
    }
}
