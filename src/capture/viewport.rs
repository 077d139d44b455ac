//! Current-viewport capture.

use std::time::Duration;

use tracing::debug;

use crate::conditioning;
use crate::error::Result;
use crate::options::ScreenshotOptions;
use crate::probe::{Probe, bounded};
use crate::raster::Raster;

// ============================================================================
// Viewport Screenshot
// ============================================================================

/// Captures exactly one tile at the current scroll position.
///
/// No stitching and no scrolling: the page is left where the caller put
/// it, with conditioning applied around the single capture.
pub async fn make_viewport_screenshot(
    probe: &dyn Probe,
    options: &ScreenshotOptions,
) -> Result<Raster> {
    let mut state = conditioning::before_screenshot(probe, options).await?;
    let result = capture_viewport_raster(probe, options).await;
    let restored = conditioning::after_screenshot(probe, &mut state).await;

    let raster = result?;
    restored?;
    Ok(raster)
}

async fn capture_viewport_raster(
    probe: &dyn Probe,
    options: &ScreenshotOptions,
) -> Result<Raster> {
    // Conditioning just mutated page styles; give the remote one settle
    // interval before sampling pixels.
    if options.settle_delay_ms > 0 {
        tokio::time::sleep(Duration::from_millis(options.settle_delay_ms)).await;
    }

    let bytes = bounded(
        "capture viewport",
        options.remote_timeout_ms,
        probe.capture_viewport(),
    )
    .await?;
    let raster = Raster::from_png_bytes(&bytes)?;

    debug!(
        width = raster.width(),
        height = raster.height(),
        "Captured viewport"
    );
    Ok(raster)
}

// ============================================================================
// Tests
// ============================================================================
