//! Full-document tile capture and stitching.
//!
//! The engine measures the page once, walks the scroll plan in order
//! (scroll → settle → capture), and composes the tiles top-to-bottom
//! into a single raster covering the whole document. The final tile
//! overlaps the previous one whenever the document height is not an
//! exact multiple of the viewport height; only its bottom remainder
//! rows are pasted.
//!
//! The scroll position is restored to its pre-capture value on every
//! exit path, success or failure.

use std::time::Duration;

use tracing::debug;

use crate::conditioning;
use crate::error::{Error, Result};
use crate::geometry::{Viewport, to_raster_px};
use crate::options::ScreenshotOptions;
use crate::probe::{Probe, bounded};
use crate::raster::Raster;

use super::plan::scroll_positions;

// ============================================================================
// CaptureGeometry
// ============================================================================

/// Page measurements taken once at the start of a capture sequence.
///
/// The device pixel ratio in particular is never re-queried mid-stitch;
/// a mid-sequence change would tear the composed raster.
#[derive(Debug, Clone, Copy)]
pub(crate) struct CaptureGeometry {
    pub viewport: Viewport,
    pub dpr: f64,
    pub document_height: u32,
    pub original_scroll: u32,
}

pub(crate) async fn measure(
    probe: &dyn Probe,
    options: &ScreenshotOptions,
) -> Result<CaptureGeometry> {
    let timeout_ms = options.remote_timeout_ms;

    let viewport = bounded("measure viewport", timeout_ms, probe.viewport_size()).await?;
    if viewport.width == 0 || viewport.height == 0 {
        return Err(Error::stitch_inconsistency(format!(
            "viewport has zero dimension: {}x{}",
            viewport.width, viewport.height
        )));
    }

    let dpr = bounded(
        "measure device pixel ratio",
        timeout_ms,
        probe.device_pixel_ratio(),
    )
    .await?;
    if !dpr.is_finite() || dpr <= 0.0 {
        return Err(Error::stitch_inconsistency(format!(
            "device pixel ratio {dpr} is not positive"
        )));
    }

    let document_height = bounded(
        "measure document height",
        timeout_ms,
        probe.document_height(),
    )
    .await?;
    let original_scroll = bounded("read scroll offset", timeout_ms, probe.scroll_offset()).await?;

    debug!(
        viewport_width = viewport.width,
        viewport_height = viewport.height,
        dpr,
        document_height,
        original_scroll,
        "Measured capture geometry"
    );

    Ok(CaptureGeometry {
        viewport,
        dpr,
        document_height,
        original_scroll,
    })
}

// ============================================================================
// Document Screenshot
// ============================================================================

/// Captures the full document at full fidelity.
///
/// Applies conditioning, stitches as many viewport tiles as the
/// document height requires, and restores page state before returning.
///
/// # Example
///
/// ```ignore
/// let raster = make_document_screenshot(probe.as_ref(), &options).await?;
/// assert_eq!(raster.height(), document_height * dpr);
/// ```
pub async fn make_document_screenshot(
    probe: &dyn Probe,
    options: &ScreenshotOptions,
) -> Result<Raster> {
    let mut state = conditioning::before_screenshot(probe, options).await?;
    let result = capture_document_raster(probe, options).await;
    let restored = conditioning::after_screenshot(probe, &mut state).await;

    let (raster, _) = result?;
    restored?;
    Ok(raster)
}

/// Core engine without conditioning: measure, stitch, restore scroll.
///
/// Also returns the geometry the raster was captured under so region
/// extraction can crop with the same cached device pixel ratio.
pub(crate) async fn capture_document_raster(
    probe: &dyn Probe,
    options: &ScreenshotOptions,
) -> Result<(Raster, CaptureGeometry)> {
    let geometry = measure(probe, options).await?;

    let result = stitch(probe, options, &geometry).await;
    let restored = bounded(
        "restore scroll position",
        options.remote_timeout_ms,
        probe.scroll_to(geometry.original_scroll),
    )
    .await;

    let raster = result?;
    restored?;
    Ok((raster, geometry))
}

// ============================================================================
// Stitching
// ============================================================================

async fn stitch(
    probe: &dyn Probe,
    options: &ScreenshotOptions,
    geometry: &CaptureGeometry,
) -> Result<Raster> {
    let tile_width = to_raster_px(f64::from(geometry.viewport.width), geometry.dpr);
    let tile_height = to_raster_px(f64::from(geometry.viewport.height), geometry.dpr);
    if tile_width == 0 || tile_height == 0 {
        return Err(Error::stitch_inconsistency(format!(
            "computed tile dimensions are {tile_width}x{tile_height}"
        )));
    }

    // Fast path: the whole document is visible in one tile.
    if geometry.viewport.contains_document(geometry.document_height) {
        debug!(
            document_height = geometry.document_height,
            "Document fits viewport, capturing single tile"
        );
        return capture_tile(probe, options, 0, tile_width, tile_height).await;
    }

    let total_height = to_raster_px(f64::from(geometry.document_height), geometry.dpr);
    let positions = scroll_positions(geometry.document_height, geometry.viewport.height);
    let tile_count = positions.len();

    debug!(
        document_height = geometry.document_height,
        tile_count, total_height, "Stitching document from tiles"
    );

    let mut composed = Raster::new(tile_width, total_height);
    let mut cursor = 0u32;

    for (index, &y) in positions.iter().enumerate() {
        let tile = capture_tile(probe, options, y, tile_width, tile_height).await?;

        let last = index == tile_count - 1;
        let rows = if last { total_height - cursor } else { tile_height };
        if rows > tile_height {
            return Err(Error::stitch_inconsistency(format!(
                "final tile holds {tile_height} rows but {rows} are required to reach \
                 height {total_height}"
            )));
        }

        // The last tile overlaps the previous one; keep its bottom rows.
        let src_row = tile_height - rows;
        composed.paste_rows(&tile, src_row, cursor, rows)?;
        cursor += rows;

        debug!(
            tile = index + 1,
            of = tile_count,
            y,
            rows,
            "Pasted tile into composite"
        );
    }

    Ok(composed)
}

/// Scrolls to `y`, waits for the remote to settle, captures one tile,
/// and validates its dimensions against the cached geometry.
async fn capture_tile(
    probe: &dyn Probe,
    options: &ScreenshotOptions,
    y: u32,
    expected_width: u32,
    expected_height: u32,
) -> Result<Raster> {
    let timeout_ms = options.remote_timeout_ms;

    bounded("scroll to tile", timeout_ms, probe.scroll_to(y)).await?;
    if options.settle_delay_ms > 0 {
        tokio::time::sleep(Duration::from_millis(options.settle_delay_ms)).await;
    }

    let bytes = bounded("capture tile", timeout_ms, probe.capture_viewport()).await?;
    let tile = Raster::from_png_bytes(&bytes)?;

    if tile.width() != expected_width || tile.height() != expected_height {
        return Err(Error::stitch_inconsistency(format!(
            "tile at y={y} is {}x{}, expected {expected_width}x{expected_height}",
            tile.width(),
            tile.height()
        )));
    }

    Ok(tile)
}

// ============================================================================
// Tests
// ============================================================================
