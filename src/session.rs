//! Session façade and persistence commands.
//!
//! A [`Session`] binds the capture engines to one remote browser
//! session. The remote scroll position is shared mutable state, so all
//! capture sequences through a session are serialized by a capture
//! lock; two sessions over distinct probes run independently.
//!
//! # Example
//!
//! ```ignore
//! use webdriver_screenshot::{ScreenshotOptions, Session};
//!
//! let session = Session::new(probe);
//! let options = ScreenshotOptions::new();
//!
//! session.save_document_screenshot("shots/page.png", &options).await?;
//! session.save_element_screenshot("shots/footer.png", ".footer", &options).await?;
//! session.save_viewport_screenshot("shots/viewport.png", &options).await?;
//! ```

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::debug;

use crate::capture::{
    make_document_screenshot, make_element_screenshot, make_viewport_screenshot,
};
use crate::error::{Error, Result};
use crate::options::ScreenshotOptions;
use crate::probe::Probe;
use crate::raster::Raster;
use crate::selector::By;

// ============================================================================
// Session
// ============================================================================

/// Internal shared state for a session.
struct SessionInner {
    /// Probe over the remote browser session.
    probe: Arc<dyn Probe>,
    /// Serializes capture sequences on this session.
    capture_lock: Mutex<()>,
}

/// A handle to one remote browser session's capture commands.
///
/// Cheap to clone; clones share the probe and the capture lock.
#[derive(Clone)]
pub struct Session {
    inner: Arc<SessionInner>,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session").finish_non_exhaustive()
    }
}

impl Session {
    /// Creates a session over a probe.
    #[must_use]
    pub fn new(probe: Arc<dyn Probe>) -> Self {
        Self {
            inner: Arc::new(SessionInner {
                probe,
                capture_lock: Mutex::new(()),
            }),
        }
    }
}

// ============================================================================
// Session - Capture
// ============================================================================

impl Session {
    /// Captures the full document as an in-memory raster.
    pub async fn document_screenshot(&self, options: &ScreenshotOptions) -> Result<Raster> {
        options.validate().map_err(Error::config)?;
        let _guard = self.inner.capture_lock.lock().await;
        make_document_screenshot(self.inner.probe.as_ref(), options).await
    }

    /// Captures the element matching `selector` as an in-memory raster.
    pub async fn element_screenshot(
        &self,
        selector: impl Into<By>,
        options: &ScreenshotOptions,
    ) -> Result<Raster> {
        options.validate().map_err(Error::config)?;
        let selector = selector.into();
        let _guard = self.inner.capture_lock.lock().await;
        make_element_screenshot(self.inner.probe.as_ref(), &selector, options).await
    }

    /// Captures the current viewport as an in-memory raster.
    pub async fn viewport_screenshot(&self, options: &ScreenshotOptions) -> Result<Raster> {
        options.validate().map_err(Error::config)?;
        let _guard = self.inner.capture_lock.lock().await;
        make_viewport_screenshot(self.inner.probe.as_ref(), options).await
    }
}

// ============================================================================
// Session - Persistence Commands
// ============================================================================

impl Session {
    /// Captures the full document and writes it to `path` as PNG.
    pub async fn save_document_screenshot(
        &self,
        path: impl AsRef<Path>,
        options: &ScreenshotOptions,
    ) -> Result<()> {
        let raster = self.document_screenshot(options).await?;
        persist(path.as_ref(), &raster)
    }

    /// Captures the element matching `selector` and writes it to `path`
    /// as PNG.
    pub async fn save_element_screenshot(
        &self,
        path: impl AsRef<Path>,
        selector: impl Into<By>,
        options: &ScreenshotOptions,
    ) -> Result<()> {
        let raster = self.element_screenshot(selector, options).await?;
        persist(path.as_ref(), &raster)
    }

    /// Captures the current viewport and writes it to `path` as PNG.
    pub async fn save_viewport_screenshot(
        &self,
        path: impl AsRef<Path>,
        options: &ScreenshotOptions,
    ) -> Result<()> {
        let raster = self.viewport_screenshot(options).await?;
        persist(path.as_ref(), &raster)
    }
}

// ============================================================================
// Persistence
// ============================================================================

fn persist(path: &Path, raster: &Raster) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(Error::Io)?;
    }

    raster.save_png(path)?;

    debug!(
        path = %path.display(),
        width = raster.width(),
        height = raster.height(),
        "Saved screenshot"
    );
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use crate::geometry::{BoundingBox, Viewport};
    use crate::probe::fake::FakeProbe;

    fn fast_options() -> ScreenshotOptions {
        ScreenshotOptions::new().with_settle_delay_ms(0)
    }

    fn session(probe: FakeProbe) -> (Session, Arc<FakeProbe>) {
        let probe = Arc::new(probe);
        (Session::new(probe.clone()), probe)
    }

    #[tokio::test]
    async fn test_save_document_screenshot_writes_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shots").join("document.png");
        let (session, _) = session(FakeProbe::new(Viewport::new(800, 500), 1.0, 1300));

        session
            .save_document_screenshot(&path, &fast_options())
            .await
            .unwrap();

        let saved = Raster::from_png_bytes(&std::fs::read(&path).unwrap()).unwrap();
        assert_eq!((saved.width(), saved.height()), (800, 1300));
    }

    #[tokio::test]
    async fn test_save_element_screenshot_writes_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("footer.png");
        let (session, _) = session(
            FakeProbe::new(Viewport::new(800, 500), 2.0, 1300)
                .with_boxes(".footer", vec![BoundingBox::new(0.0, 1200.0, 400.0, 100.0)]),
        );

        session
            .save_element_screenshot(&path, ".footer", &fast_options())
            .await
            .unwrap();

        let saved = Raster::from_png_bytes(&std::fs::read(&path).unwrap()).unwrap();
        assert_eq!((saved.width(), saved.height()), (800, 200));
    }

    #[tokio::test]
    async fn test_save_viewport_screenshot_writes_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("viewport.png");
        let (session, _) = session(FakeProbe::new(Viewport::new(640, 480), 1.0, 300));

        session
            .save_viewport_screenshot(&path, &fast_options())
            .await
            .unwrap();

        let saved = Raster::from_png_bytes(&std::fs::read(&path).unwrap()).unwrap();
        assert_eq!((saved.width(), saved.height()), (640, 480));
    }

    #[tokio::test]
    async fn test_write_failure_surfaces_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let (session, _) = session(FakeProbe::new(Viewport::new(640, 480), 1.0, 300));

        // The target path is an existing directory.
        let err = session
            .save_viewport_screenshot(dir.path(), &fast_options())
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Io(_)));
    }

    #[tokio::test]
    async fn test_invalid_options_are_rejected() {
        let (session, probe) = session(FakeProbe::new(Viewport::new(640, 480), 1.0, 300));
        let options = fast_options().with_remote_timeout_ms(0);

        let err = session.document_screenshot(&options).await.unwrap_err();

        assert!(matches!(err, Error::Config { .. }));
        assert!(probe.captures().is_empty());
    }

    #[tokio::test]
    async fn test_concurrent_captures_are_serialized() {
        let (session, probe) = session(FakeProbe::new(Viewport::new(800, 500), 1.0, 1300));
        let options = fast_options();

        let (a, b) = tokio::join!(
            session.document_screenshot(&options),
            session.document_screenshot(&options),
        );
        a.unwrap();
        b.unwrap();

        // Each sequence runs contiguously: plan positions then the
        // scroll restore, twice, with no interleaving.
        assert_eq!(
            probe.scroll_log(),
            vec![0, 500, 800, 0, 0, 500, 800, 0]
        );
    }
}
