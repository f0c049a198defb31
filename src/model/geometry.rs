//! Normalized page geometry.

use serde::{Deserialize, Serialize};

/// A rectangle on the page, conventionally normalized to `[0, 1]`.
///
/// `top` grows downward: a fragment near the top of the page has a small
/// `top` value. Coordinates are stored exactly as supplied; values outside
/// `[0, 1]` are kept rather than clamped.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Left edge
    pub left: f32,
    /// Top edge
    pub top: f32,
    /// Right edge
    pub right: f32,
    /// Bottom edge
    pub bottom: f32,
}

impl BoundingBox {
    /// Create a new bounding box.
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// The box covering the whole page, used when grounding is missing.
    pub fn full_page() -> Self {
        Self::new(0.0, 0.0, 1.0, 1.0)
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    pub fn center_x(&self) -> f32 {
        (self.left + self.right) / 2.0
    }

    pub fn center_y(&self) -> f32 {
        (self.top + self.bottom) / 2.0
    }

    /// Check whether every coordinate lies inside the unit square.
    pub fn is_normalized(&self) -> bool {
        [self.left, self.top, self.right, self.bottom]
            .iter()
            .all(|v| (0.0..=1.0).contains(v))
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::full_page()
    }
}

/// Anything placed on a page by a bounding box.
pub trait Positioned {
    /// The item's bounding box.
    fn bbox(&self) -> &BoundingBox;
}

impl Positioned for BoundingBox {
    fn bbox(&self) -> &BoundingBox {
        self
    }
}

impl<T: Positioned + ?Sized> Positioned for &T {
    fn bbox(&self) -> &BoundingBox {
        (**self).bbox()
    }
}
