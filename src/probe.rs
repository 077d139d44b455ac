//! Remote probe capability set.
//!
//! The probe is the boundary between this crate and the browser-automation
//! transport. It exposes exactly the measurements, scroll commands, style
//! mutations, and bitmap captures the capture engines consume; session
//! management, protocol plumbing, and retry policy all live on the far
//! side of this trait.
//!
//! Probe calls are issued strictly sequentially within a capture sequence.
//! The scroll position is shared mutable state on the remote session, so
//! the engines never fan out probe calls concurrently.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::time::timeout;

use crate::error::{Error, Result};
use crate::geometry::{BoundingBox, Viewport};
use crate::selector::By;

// ============================================================================
// StyleTarget
// ============================================================================

/// Target of a conditioning style mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StyleTarget {
    /// The document root element.
    #[serde(rename = "document")]
    Document,
    /// Every fixed-position element on the page.
    #[serde(rename = "fixedElements")]
    FixedElements,
}

// ============================================================================
// Probe Trait
// ============================================================================

/// Consumed browser capability set.
///
/// Implementations wrap a concrete automation transport (WebDriver,
/// BiDi, an extension protocol) and translate each capability onto it.
/// All geometry is reported in CSS pixels; [`capture_viewport`]
/// returns a PNG-encoded bitmap of the visible viewport in raster
/// pixels (CSS × device pixel ratio).
///
/// [`capture_viewport`]: Probe::capture_viewport
#[async_trait]
pub trait Probe: Send + Sync {
    /// Returns the current viewport dimensions.
    async fn viewport_size(&self) -> Result<Viewport>;

    /// Returns the device pixel ratio.
    async fn device_pixel_ratio(&self) -> Result<f64>;

    /// Returns the total scrollable document height.
    async fn document_height(&self) -> Result<u32>;

    /// Returns the current vertical scroll offset.
    async fn scroll_offset(&self) -> Result<u32>;

    /// Scrolls the page to the given vertical offset.
    ///
    /// The remote clamps the offset to the scrollable range, matching
    /// `window.scrollTo` semantics.
    async fn scroll_to(&self, y: u32) -> Result<()>;

    /// Captures the visible viewport as PNG bytes.
    async fn capture_viewport(&self) -> Result<Vec<u8>>;

    /// Returns the viewport-relative bounding boxes of every element
    /// matching `selector`, in document order.
    ///
    /// An empty vec means no match; the engines map that to
    /// [`Error::ElementNotFound`].
    async fn element_boxes(&self, selector: &By) -> Result<Vec<BoundingBox>>;

    /// Sets a style property on `target` and returns the previous value.
    ///
    /// The returned value is fed back verbatim to reverse the mutation.
    async fn mutate_style(
        &self,
        target: StyleTarget,
        property: &str,
        value: &str,
    ) -> Result<String>;
}

// ============================================================================
// Round-Trip Bounding
// ============================================================================

/// Bounds a single remote round-trip by the configured timeout.
///
/// Exceeding the bound aborts the capture sequence with
/// [`Error::RemoteTimeout`] naming the operation.
pub(crate) async fn bounded<T>(
    operation: &str,
    timeout_ms: u64,
    fut: impl Future<Output = Result<T>> + Send,
) -> Result<T> {
    match timeout(Duration::from_millis(timeout_ms), fut).await {
        Ok(result) => result,
        Err(_) => Err(Error::remote_timeout(operation, timeout_ms)),
    }
}

// ============================================================================
// Fake Probe (test support)
// ============================================================================

#[cfg(test)]
pub(crate) mod fake {
    //! Scripted probe over a synthetic document.
    //!
    //! The virtual document is a vertical gradient: raster row `d` has the
    //! color [`row_color`]`(d)`, so a composed raster can be checked
    //! pixel-wise for ordering, gaps, and duplicated seams.

    use std::collections::HashMap;
    use std::io::Cursor;
    use std::sync::Mutex;

    use image::{Rgba, RgbaImage};

    use super::*;
    use crate::geometry::to_raster_px;

    /// Color of absolute document raster row `d`.
    pub(crate) fn row_color(d: u32) -> Rgba<u8> {
        Rgba([(d & 0xff) as u8, ((d >> 8) & 0xff) as u8, 180, 255])
    }

    struct FakeState {
        viewport: Viewport,
        dpr: f64,
        document_height: u32,
        scroll_y: u32,
        boxes: HashMap<String, Vec<BoundingBox>>,
        styles: HashMap<(StyleTarget, String), String>,
        scroll_log: Vec<u32>,
        captures: Vec<u32>,
        fail_capture_at: Option<usize>,
        style_calls: usize,
        fail_style_at: Option<usize>,
        capture_delay_ms: u64,
        tile_height_override: Option<u32>,
    }

    /// Scripted in-memory probe for engine tests.
    pub(crate) struct FakeProbe {
        state: Mutex<FakeState>,
    }

    impl FakeProbe {
        pub(crate) fn new(viewport: Viewport, dpr: f64, document_height: u32) -> Self {
            Self {
                state: Mutex::new(FakeState {
                    viewport,
                    dpr,
                    document_height,
                    scroll_y: 0,
                    boxes: HashMap::new(),
                    styles: HashMap::new(),
                    scroll_log: Vec::new(),
                    captures: Vec::new(),
                    fail_capture_at: None,
                    style_calls: 0,
                    fail_style_at: None,
                    capture_delay_ms: 0,
                    tile_height_override: None,
                }),
            }
        }

        pub(crate) fn with_boxes(self, selector: &str, boxes: Vec<BoundingBox>) -> Self {
            self.state
                .lock()
                .unwrap()
                .boxes
                .insert(selector.to_string(), boxes);
            self
        }

        pub(crate) fn with_style(self, target: StyleTarget, property: &str, value: &str) -> Self {
            self.state
                .lock()
                .unwrap()
                .styles
                .insert((target, property.to_string()), value.to_string());
            self
        }

        pub(crate) fn with_scroll(self, y: u32) -> Self {
            self.state.lock().unwrap().scroll_y = y;
            self
        }

        pub(crate) fn fail_capture_at(self, index: usize) -> Self {
            self.state.lock().unwrap().fail_capture_at = Some(index);
            self
        }

        pub(crate) fn fail_style_at(self, index: usize) -> Self {
            self.state.lock().unwrap().fail_style_at = Some(index);
            self
        }

        pub(crate) fn with_capture_delay_ms(self, delay: u64) -> Self {
            self.state.lock().unwrap().capture_delay_ms = delay;
            self
        }

        pub(crate) fn with_tile_height_override(self, height: u32) -> Self {
            self.state.lock().unwrap().tile_height_override = Some(height);
            self
        }

        /// Scroll offsets passed to `scroll_to`, in call order.
        pub(crate) fn scroll_log(&self) -> Vec<u32> {
            self.state.lock().unwrap().scroll_log.clone()
        }

        /// Scroll offset at each capture, in call order.
        pub(crate) fn captures(&self) -> Vec<u32> {
            self.state.lock().unwrap().captures.clone()
        }

        pub(crate) fn current_scroll(&self) -> u32 {
            self.state.lock().unwrap().scroll_y
        }

        pub(crate) fn style(&self, target: StyleTarget, property: &str) -> Option<String> {
            self.state
                .lock()
                .unwrap()
                .styles
                .get(&(target, property.to_string()))
                .cloned()
        }
    }

    #[async_trait]
    impl Probe for FakeProbe {
        async fn viewport_size(&self) -> Result<Viewport> {
            Ok(self.state.lock().unwrap().viewport)
        }

        async fn device_pixel_ratio(&self) -> Result<f64> {
            Ok(self.state.lock().unwrap().dpr)
        }

        async fn document_height(&self) -> Result<u32> {
            Ok(self.state.lock().unwrap().document_height)
        }

        async fn scroll_offset(&self) -> Result<u32> {
            Ok(self.state.lock().unwrap().scroll_y)
        }

        async fn scroll_to(&self, y: u32) -> Result<()> {
            let mut state = self.state.lock().unwrap();
            let max = state
                .document_height
                .saturating_sub(state.viewport.height);
            state.scroll_y = y.min(max);
            state.scroll_log.push(y);
            Ok(())
        }

        async fn capture_viewport(&self) -> Result<Vec<u8>> {
            let (delay, width, height, start_row) = {
                let mut state = self.state.lock().unwrap();
                state.captures.push(state.scroll_y);
                if state.fail_capture_at == Some(state.captures.len()) {
                    return Err(Error::probe("capture failed"));
                }

                let width = to_raster_px(f64::from(state.viewport.width), state.dpr);
                let height = state
                    .tile_height_override
                    .unwrap_or_else(|| to_raster_px(f64::from(state.viewport.height), state.dpr));
                let start_row = to_raster_px(f64::from(state.scroll_y), state.dpr);
                (state.capture_delay_ms, width, height, start_row)
            };

            if delay > 0 {
                tokio::time::sleep(Duration::from_millis(delay)).await;
            }

            let tile = RgbaImage::from_fn(width, height, |_, y| row_color(start_row + y));
            let mut bytes = Cursor::new(Vec::new());
            tile.write_to(&mut bytes, image::ImageFormat::Png)
                .map_err(Error::Image)?;
            Ok(bytes.into_inner())
        }

        async fn element_boxes(&self, selector: &By) -> Result<Vec<BoundingBox>> {
            Ok(self
                .state
                .lock()
                .unwrap()
                .boxes
                .get(selector.value())
                .cloned()
                .unwrap_or_default())
        }

        async fn mutate_style(
            &self,
            target: StyleTarget,
            property: &str,
            value: &str,
        ) -> Result<String> {
            let mut state = self.state.lock().unwrap();
            state.style_calls += 1;
            if state.fail_style_at == Some(state.style_calls) {
                return Err(Error::probe("style mutation failed"));
            }
            let previous = state
                .styles
                .insert((target, property.to_string()), value.to_string());
            Ok(previous.unwrap_or_default())
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
