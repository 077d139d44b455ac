//! Error types for screenshot capture.
//!
//! This module defines all error types used throughout the crate.
//!
//! # Usage
//!
//! All fallible operations return [`Result<T>`] which uses [`Error`]:
//!
//! ```ignore
//! use webdriver_screenshot::{Result, Session};
//!
//! async fn example(session: &Session) -> Result<()> {
//!     session
//!         .save_document_screenshot("shots/page.png", &Default::default())
//!         .await?;
//!     Ok(())
//! }
//! ```
//!
//! # Error Categories
//!
//! | Category | Variants |
//! |----------|----------|
//! | Configuration | [`Error::Config`] |
//! | Remote | [`Error::RemoteTimeout`], [`Error::Probe`] |
//! | Selector | [`Error::ElementNotFound`], [`Error::AmbiguousSelector`] |
//! | Composition | [`Error::StitchInconsistency`], [`Error::OutOfBounds`] |
//! | External | [`Error::Io`], [`Error::Image`] |

// ============================================================================
// Imports
// ============================================================================

use std::io::Error as IoError;
use std::result::Result as StdResult;

use image::ImageError;
use thiserror::Error;

// ============================================================================
// Result Alias
// ============================================================================

/// Result type alias using crate [`enum@Error`].
///
/// All fallible operations in this crate return this type.
pub type Result<T> = StdResult<T, Error>;

// ============================================================================
// Error Enum
// ============================================================================

/// Main error type for the crate.
///
/// Each variant includes relevant context for debugging.
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// Configuration error.
    ///
    /// Returned when capture options are invalid.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },

    // ========================================================================
    // Remote Errors
    // ========================================================================
    /// A remote round-trip exceeded its time bound.
    ///
    /// The capture sequence is aborted; remaining tiles are not captured.
    #[error("Remote timeout after {timeout_ms}ms: {operation}")]
    RemoteTimeout {
        /// Description of the remote operation that timed out.
        operation: String,
        /// Milliseconds waited before timeout.
        timeout_ms: u64,
    },

    /// The remote probe reported a failure.
    ///
    /// Wraps script/protocol errors surfaced by the transport behind
    /// the probe interface.
    #[error("Probe error: {message}")]
    Probe {
        /// Description of the remote-side failure.
        message: String,
    },

    // ========================================================================
    // Selector Errors
    // ========================================================================
    /// Selector matched no elements.
    ///
    /// Returned before any capture is attempted.
    #[error("Element not found: {selector}")]
    ElementNotFound {
        /// Selector used (strategy:value form).
        selector: String,
    },

    /// Selector matched more than one element while a unique match
    /// was required.
    #[error("Ambiguous selector: {selector} matched {matches} elements")]
    AmbiguousSelector {
        /// Selector used (strategy:value form).
        selector: String,
        /// Number of elements matched.
        matches: usize,
    },

    // ========================================================================
    // Composition Errors
    // ========================================================================
    /// Crop region is empty after clamping to the source raster.
    #[error(
        "Crop region out of bounds: {width}x{height} at ({x},{y}) \
         against {source_width}x{source_height} raster"
    )]
    OutOfBounds {
        /// Requested left edge in raster pixels.
        x: u32,
        /// Requested top edge in raster pixels.
        y: u32,
        /// Requested width in raster pixels.
        width: u32,
        /// Requested height in raster pixels.
        height: u32,
        /// Source raster width.
        source_width: u32,
        /// Source raster height.
        source_height: u32,
    },

    /// Internal invariant violation during stitching.
    ///
    /// Indicates a measurement/capture mismatch (e.g. a tile with
    /// unexpected dimensions). Fatal for the capture sequence, never
    /// retried, never silently degraded.
    #[error("Stitch inconsistency: {message}")]
    StitchInconsistency {
        /// Description of the violated invariant.
        message: String,
    },

    // ========================================================================
    // External Errors
    // ========================================================================
    /// IO error while persisting a raster.
    #[error("IO error: {0}")]
    Io(#[from] IoError),

    /// Image decode or encode error.
    #[error("Image error: {0}")]
    Image(#[from] ImageError),

    /// Base64 decode error for a screenshot payload.
    #[error("Base64 error: {0}")]
    Base64(#[from] base64::DecodeError),
}

// ============================================================================
// Error Constructors
// ============================================================================

impl Error {
    /// Creates a configuration error.
    #[inline]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Creates a remote timeout error.
    #[inline]
    pub fn remote_timeout(operation: impl Into<String>, timeout_ms: u64) -> Self {
        Self::RemoteTimeout {
            operation: operation.into(),
            timeout_ms,
        }
    }

    /// Creates a probe error.
    #[inline]
    pub fn probe(message: impl Into<String>) -> Self {
        Self::Probe {
            message: message.into(),
        }
    }

    /// Creates an element not found error.
    #[inline]
    pub fn element_not_found(selector: impl Into<String>) -> Self {
        Self::ElementNotFound {
            selector: selector.into(),
        }
    }

    /// Creates an ambiguous selector error.
    #[inline]
    pub fn ambiguous_selector(selector: impl Into<String>, matches: usize) -> Self {
        Self::AmbiguousSelector {
            selector: selector.into(),
            matches,
        }
    }

    /// Creates an out of bounds error.
    #[inline]
    pub fn out_of_bounds(
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        source_width: u32,
        source_height: u32,
    ) -> Self {
        Self::OutOfBounds {
            x,
            y,
            width,
            height,
            source_width,
            source_height,
        }
    }

    /// Creates a stitch inconsistency error.
    #[inline]
    pub fn stitch_inconsistency(message: impl Into<String>) -> Self {
        Self::StitchInconsistency {
            message: message.into(),
        }
    }
}

// ============================================================================
// Error Predicates
// ============================================================================

impl Error {
    /// Returns `true` if this is a timeout error.
    #[inline]
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::RemoteTimeout { .. })
    }

    /// Returns `true` if this is a selector resolution error.
    #[inline]
    #[must_use]
    pub fn is_selector_error(&self) -> bool {
        matches!(
            self,
            Self::ElementNotFound { .. } | Self::AmbiguousSelector { .. }
        )
    }

    /// Returns `true` if this is a composition invariant violation.
    #[inline]
    #[must_use]
    pub fn is_stitch_error(&self) -> bool {
        matches!(
            self,
            Self::StitchInconsistency { .. } | Self::OutOfBounds { .. }
        )
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::ErrorKind;

    #[test]
    fn test_remote_timeout_display() {
        let err = Error::remote_timeout("capture tile 3", 5000);
        assert_eq!(err.to_string(), "Remote timeout after 5000ms: capture tile 3");
    }

    #[test]
    fn test_element_not_found_display() {
        let err = Error::element_not_found("css:.footer");
        assert_eq!(err.to_string(), "Element not found: css:.footer");
    }

    #[test]
    fn test_ambiguous_selector_display() {
        let err = Error::ambiguous_selector("css:li", 12);
        assert_eq!(
            err.to_string(),
            "Ambiguous selector: css:li matched 12 elements"
        );
    }

    #[test]
    fn test_is_timeout() {
        let timeout_err = Error::remote_timeout("scroll", 1000);
        let other_err = Error::probe("test");

        assert!(timeout_err.is_timeout());
        assert!(!other_err.is_timeout());
    }

    #[test]
    fn test_is_selector_error() {
        let not_found = Error::element_not_found("css:#missing");
        let ambiguous = Error::ambiguous_selector("tag:div", 3);
        let other = Error::stitch_inconsistency("test");

        assert!(not_found.is_selector_error());
        assert!(ambiguous.is_selector_error());
        assert!(!other.is_selector_error());
    }

    #[test]
    fn test_is_stitch_error() {
        let stitch = Error::stitch_inconsistency("tile mismatch");
        let bounds = Error::out_of_bounds(10, 10, 0, 0, 800, 600);
        let other = Error::probe("test");

        assert!(stitch.is_stitch_error());
        assert!(bounds.is_stitch_error());
        assert!(!other.is_stitch_error());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = IoError::new(ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
