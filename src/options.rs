//! Capture configuration options.
//!
//! Every recognized option is an explicit struct field with a fixed
//! default; there is no dynamic option bag.
//!
//! # Example
//!
//! ```
//! use webdriver_screenshot::ScreenshotOptions;
//!
//! let options = ScreenshotOptions::new()
//!     .with_freeze_fixed_elements()
//!     .with_settle_delay_ms(250);
//!
//! assert!(options.hide_scrollbars);
//! assert!(options.freeze_fixed_elements);
//! ```

// ============================================================================
// ScreenshotOptions
// ============================================================================

/// Configuration for a capture sequence.
///
/// Controls page conditioning, selector-resolution policy, and the
/// timing bounds applied to remote round-trips.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenshotOptions {
    /// Hide scrollbars for the duration of the capture.
    pub hide_scrollbars: bool,

    /// Pin fixed-position elements in place so they appear once in a
    /// stitched document instead of repeating per tile.
    pub freeze_fixed_elements: bool,

    /// Suppress CSS animations, transitions, and the text caret for
    /// deterministic pixels.
    pub disable_animations: bool,

    /// Fail with an ambiguous-selector error when an element selector
    /// matches more than one element. When false, the first match in
    /// document order is used.
    pub require_unique_match: bool,

    /// Wait after each scroll for remote layout/paint to settle,
    /// in milliseconds.
    pub settle_delay_ms: u64,

    /// Bound on each remote round-trip, in milliseconds.
    pub remote_timeout_ms: u64,
}

// ============================================================================
// Constructors
// ============================================================================

impl ScreenshotOptions {
    /// Creates options with default settings.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            hide_scrollbars: true,
            freeze_fixed_elements: false,
            disable_animations: false,
            require_unique_match: false,
            settle_delay_ms: 100,
            remote_timeout_ms: 30_000,
        }
    }
}

impl Default for ScreenshotOptions {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Builder Methods
// ============================================================================

impl ScreenshotOptions {
    /// Leaves scrollbars visible during capture.
    #[inline]
    #[must_use]
    pub fn with_visible_scrollbars(mut self) -> Self {
        self.hide_scrollbars = false;
        self
    }

    /// Enables fixed-element freezing.
    #[inline]
    #[must_use]
    pub fn with_freeze_fixed_elements(mut self) -> Self {
        self.freeze_fixed_elements = true;
        self
    }

    /// Enables animation and caret suppression.
    #[inline]
    #[must_use]
    pub fn with_disabled_animations(mut self) -> Self {
        self.disable_animations = true;
        self
    }

    /// Requires element selectors to match exactly one element.
    #[inline]
    #[must_use]
    pub fn with_unique_match(mut self) -> Self {
        self.require_unique_match = true;
        self
    }

    /// Sets the post-scroll settle delay in milliseconds.
    #[inline]
    #[must_use]
    pub fn with_settle_delay_ms(mut self, delay_ms: u64) -> Self {
        self.settle_delay_ms = delay_ms;
        self
    }

    /// Sets the remote round-trip bound in milliseconds.
    #[inline]
    #[must_use]
    pub fn with_remote_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.remote_timeout_ms = timeout_ms;
        self
    }
}

// ============================================================================
// Validation
// ============================================================================

impl ScreenshotOptions {
    /// Validates the options configuration.
    ///
    /// # Errors
    ///
    /// Returns error message if validation fails.
    pub fn validate(&self) -> Result<(), String> {
        if self.remote_timeout_ms == 0 {
            return Err("Remote timeout must be greater than zero".to_string());
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
