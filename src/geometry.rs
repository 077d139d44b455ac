//! CSS-pixel and raster-pixel geometry.
//!
//! All remote measurements arrive in CSS pixels; captured bitmaps are in
//! raster pixels. The two are related by the device pixel ratio, and every
//! conversion goes through [`to_raster_px`] so the rounding policy
//! (round-half-up) is fixed in exactly one place.

use serde::{Deserialize, Serialize};

// ============================================================================
// Rounding Policy
// ============================================================================

/// Converts a CSS-pixel measure to raster pixels.
///
/// Multiplies by the device pixel ratio and rounds half-up. Negative
/// inputs clamp to zero.
///
/// # Example
///
/// ```
/// use webdriver_screenshot::geometry::to_raster_px;
///
/// assert_eq!(to_raster_px(500.0, 2.0), 1000);
/// assert_eq!(to_raster_px(333.0, 1.5), 500); // 499.5 rounds up
/// ```
#[inline]
#[must_use]
pub fn to_raster_px(css: f64, dpr: f64) -> u32 {
    let scaled = css * dpr;
    if scaled <= 0.0 {
        return 0;
    }
    (scaled + 0.5).floor() as u32
}

// ============================================================================
// Viewport
// ============================================================================

/// Viewport dimensions in CSS pixels.
///
/// Read at the start of each capture sequence; the caller may resize the
/// window between sequences, so it is never cached across calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    /// Width in CSS pixels.
    pub width: u32,
    /// Height in CSS pixels.
    pub height: u32,
}

impl Viewport {
    /// Creates a new viewport.
    #[inline]
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Returns `true` if the full document fits in the viewport.
    #[inline]
    #[must_use]
    pub const fn contains_document(&self, document_height: u32) -> bool {
        document_height <= self.height
    }
}

// ============================================================================
// BoundingBox
// ============================================================================

/// An element's bounding rectangle in CSS pixels.
///
/// As reported by the probe the box is viewport-relative; call
/// [`to_document`](Self::to_document) with the scroll offset at
/// measurement time to obtain absolute document coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Left edge in CSS pixels.
    pub x: f64,
    /// Top edge in CSS pixels.
    pub y: f64,
    /// Width in CSS pixels.
    pub width: f64,
    /// Height in CSS pixels.
    pub height: f64,
}

impl BoundingBox {
    /// Creates a new bounding box.
    #[inline]
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Converts a viewport-relative box to absolute document coordinates.
    #[inline]
    #[must_use]
    pub fn to_document(self, scroll_y: u32) -> Self {
        Self {
            y: self.y + f64::from(scroll_y),
            ..self
        }
    }
}

// ============================================================================
// CropRect
// ============================================================================

/// A crop rectangle in raster pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropRect {
    /// Left edge in raster pixels.
    pub x: u32,
    /// Top edge in raster pixels.
    pub y: u32,
    /// Width in raster pixels.
    pub width: u32,
    /// Height in raster pixels.
    pub height: u32,
}

impl CropRect {
    /// Computes the raster-pixel rectangle for a document-space box.
    ///
    /// Each edge and extent is converted through the fixed rounding
    /// policy. Edges left of or above the document origin clamp to zero.
    #[must_use]
    pub fn from_box(bounds: &BoundingBox, dpr: f64) -> Self {
        Self {
            x: to_raster_px(bounds.x, dpr),
            y: to_raster_px(bounds.y, dpr),
            width: to_raster_px(bounds.width, dpr),
            height: to_raster_px(bounds.height, dpr),
        }
    }

    /// Clamps the rectangle to a source raster's edges.
    ///
    /// Returns `None` if the clamped region has zero area, which the
    /// caller surfaces as an out-of-bounds failure.
    #[must_use]
    pub fn clamp_to(&self, source_width: u32, source_height: u32) -> Option<Self> {
        if self.x >= source_width || self.y >= source_height {
            return None;
        }

        let width = self.width.min(source_width - self.x);
        let height = self.height.min(source_height - self.y);

        if width == 0 || height == 0 {
            return None;
        }

        Some(Self {
            x: self.x,
            y: self.y,
            width,
            height,
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
