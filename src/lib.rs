//! WebDriver Screenshot - full-fidelity screenshot capture for browser
//! automation.
//!
//! This library extends a browser-automation client with pixel-accurate
//! screenshots of the entire document, of a single DOM element, and of
//! the current viewport, suitable for visual-regression baselines.
//!
//! # Architecture
//!
//! The crate never talks to a wire protocol. It consumes an abstract
//! [`Probe`], the capability set a transport must provide (measure,
//! scroll, capture, mutate styles), and builds the capture engines on
//! top:
//!
//! - **Conditioning** mutates transient page state (scrollbars,
//!   animations, fixed elements) before capture and reverses every
//!   mutation afterward, on every exit path.
//! - **Stitching** covers a tall document with an ordered sequence of
//!   viewport tiles and composes them seam-free, trimming the overlap
//!   of the final tile.
//! - **Region extraction** crops an element's rectangle out of a
//!   full-document capture at the same device pixel ratio.
//!
//! All CSS-to-raster-pixel conversion rounds half-up through a single
//! policy function, because rounding drift is where stitching seams
//! come from.
//!
//! # Quick Start
//!
//! ```ignore
//! use std::sync::Arc;
//!
//! use webdriver_screenshot::{ScreenshotOptions, Session};
//!
//! #[tokio::main]
//! async fn main() -> webdriver_screenshot::Result<()> {
//!     // Wrap your automation transport in the Probe trait.
//!     let probe = Arc::new(MyWebDriverProbe::connect().await?);
//!     let session = Session::new(probe);
//!
//!     let options = ScreenshotOptions::new().with_freeze_fixed_elements();
//!
//!     // Full document, stitched from as many tiles as needed.
//!     session.save_document_screenshot("shots/page.png", &options).await?;
//!
//!     // One element, cropped from a document capture.
//!     session.save_element_screenshot("shots/footer.png", ".footer", &options).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`capture`] | Document, element, and viewport capture engines |
//! | [`conditioning`] | Pre/post capture page conditioning |
//! | [`error`] | Error types and [`Result`] alias |
//! | [`geometry`] | CSS/raster pixel geometry and rounding policy |
//! | [`options`] | Capture configuration |
//! | [`probe`] | Remote probe capability trait |
//! | [`raster`] | Owned raster buffers and PNG persistence |
//! | [`selector`] | Element locator strategies |
//! | [`session`] | Session façade and persistence commands |
//!
//! # Guarantees
//!
//! - Tiles are captured at strictly non-decreasing scroll positions and
//!   composed in that order; the last position never scrolls past the
//!   document end.
//! - The device pixel ratio is read once per capture sequence.
//! - Scroll position and every conditioning mutation are restored
//!   before a capture call returns, including on failure.
//! - Capture sequences on one [`Session`] are serialized; a failed
//!   sequence never returns a partial raster.

// ============================================================================
// Modules
// ============================================================================

/// Document, element, and viewport capture engines.
pub mod capture;

/// Pre/post capture page conditioning.
///
/// Applied by the engines; exposed for hosts composing their own
/// capture flow.
pub mod conditioning;

/// Error types and result aliases.
///
/// All fallible operations return [`Result<T>`] which uses [`Error`].
pub mod error;

/// CSS-pixel and raster-pixel geometry.
///
/// Home of the fixed round-half-up conversion policy.
pub mod geometry;

/// Capture configuration options.
pub mod options;

/// Remote probe capability set.
///
/// Implement [`Probe`] over your automation transport to use the crate.
pub mod probe;

/// Owned raster buffers.
pub mod raster;

/// Element locator strategies.
pub mod selector;

/// Session façade and persistence commands.
pub mod session;

// ============================================================================
// Re-exports
// ============================================================================

// Capture engines
pub use capture::{make_document_screenshot, make_element_screenshot, make_viewport_screenshot};

// Conditioning
pub use conditioning::{ConditioningState, after_screenshot, before_screenshot};

// Error types
pub use error::{Error, Result};

// Geometry types
pub use geometry::{BoundingBox, CropRect, Viewport};

// Options
pub use options::ScreenshotOptions;

// Probe types
pub use probe::{Probe, StyleTarget};

// Raster type
pub use raster::Raster;

// Selector type
pub use selector::By;

// Session façade
pub use session::Session;
