//! Element region extraction.
//!
//! An element screenshot is a crop of a full-document capture: resolve
//! the selector, convert its viewport-relative box to absolute document
//! coordinates, stitch the document, and cut the element's rectangle
//! out at the same device pixel ratio the document was captured under.

use tracing::debug;

use crate::conditioning;
use crate::error::{Error, Result};
use crate::geometry::{BoundingBox, CropRect};
use crate::options::ScreenshotOptions;
use crate::probe::{Probe, bounded};
use crate::raster::Raster;
use crate::selector::By;

use super::document::capture_document_raster;

// ============================================================================
// Element Screenshot
// ============================================================================

/// Captures the element matching `selector`, cropped from a
/// full-document capture.
///
/// Zero matches fail with [`Error::ElementNotFound`]. Multiple matches
/// use the first in document order, unless the options require a unique
/// match, in which case they fail with [`Error::AmbiguousSelector`].
///
/// # Example
///
/// ```ignore
/// let footer = make_element_screenshot(probe.as_ref(), &By::css(".footer"), &options).await?;
/// ```
pub async fn make_element_screenshot(
    probe: &dyn Probe,
    selector: &By,
    options: &ScreenshotOptions,
) -> Result<Raster> {
    let mut state = conditioning::before_screenshot(probe, options).await?;
    let result = capture_element_raster(probe, selector, options).await;
    let restored = conditioning::after_screenshot(probe, &mut state).await;

    let raster = result?;
    restored?;
    Ok(raster)
}

async fn capture_element_raster(
    probe: &dyn Probe,
    selector: &By,
    options: &ScreenshotOptions,
) -> Result<Raster> {
    let bounds = resolve_element(probe, selector, options).await?;

    let scroll_y = bounded(
        "read scroll offset",
        options.remote_timeout_ms,
        probe.scroll_offset(),
    )
    .await?;
    let document_bounds = bounds.to_document(scroll_y);

    debug!(
        selector = %selector,
        x = document_bounds.x,
        y = document_bounds.y,
        width = document_bounds.width,
        height = document_bounds.height,
        "Resolved element bounds"
    );

    let (document, geometry) = capture_document_raster(probe, options).await?;

    let requested = CropRect::from_box(&document_bounds, geometry.dpr);
    let clamped = requested
        .clamp_to(document.width(), document.height())
        .ok_or_else(|| {
            Error::out_of_bounds(
                requested.x,
                requested.y,
                requested.width,
                requested.height,
                document.width(),
                document.height(),
            )
        })?;

    if clamped != requested {
        debug!(?requested, ?clamped, "Clamped crop region to raster edges");
    }

    Ok(document.crop(&clamped))
}

// ============================================================================
// Selector Resolution
// ============================================================================

async fn resolve_element(
    probe: &dyn Probe,
    selector: &By,
    options: &ScreenshotOptions,
) -> Result<BoundingBox> {
    let boxes = bounded(
        "resolve element",
        options.remote_timeout_ms,
        probe.element_boxes(selector),
    )
    .await?;

    match boxes.len() {
        0 => Err(Error::element_not_found(selector.to_string())),
        n if n > 1 && options.require_unique_match => {
            Err(Error::ambiguous_selector(selector.to_string(), n))
        }
        _ => Ok(boxes[0]),
    }
}

// ============================================================================
// Tests
// ============================================================================
