//! Element locator strategies.
//!
//! Provides Selenium-like `By` selectors for resolving the element whose
//! bounding box a region capture targets. The probe implementation maps
//! each strategy onto whatever lookup its remote end supports.
//!
//! # Example
//!
//! ```ignore
//! use webdriver_screenshot::By;
//!
//! // CSS selector (default)
//! session.save_element_screenshot("footer.png", By::css(".footer"), &opts).await?;
//!
//! // By ID (shorthand for CSS #id)
//! session.save_element_screenshot("form.png", By::id("login-form"), &opts).await?;
//!
//! // By XPath
//! session.save_element_screenshot("btn.png", By::xpath("//button"), &opts).await?;
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

// ============================================================================
// By Enum
// ============================================================================

/// Element locator strategy (like Selenium's `By`).
///
/// Matches are always in document order; the first match is used unless
/// the capture options require a unique match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "strategy", content = "value")]
pub enum By {
    /// CSS selector (most common).
    ///
    /// # Example
    /// ```ignore
    /// By::css(".footer")
    /// By::css("[data-testid='hero']")
    /// ```
    #[serde(rename = "css")]
    Css(String),

    /// XPath expression.
    ///
    /// # Example
    /// ```ignore
    /// By::xpath("//main//table[1]")
    /// ```
    #[serde(rename = "xpath")]
    XPath(String),

    /// Element ID (shorthand for `#id` CSS selector).
    #[serde(rename = "id")]
    Id(String),

    /// Tag name.
    #[serde(rename = "tag")]
    Tag(String),

    /// Class name (single class).
    #[serde(rename = "class")]
    Class(String),

    /// Name attribute.
    #[serde(rename = "name")]
    Name(String),
}

impl By {
    /// Creates a CSS selector.
    #[inline]
    pub fn css(selector: impl Into<String>) -> Self {
        Self::Css(selector.into())
    }

    /// Creates an XPath selector.
    #[inline]
    pub fn xpath(expr: impl Into<String>) -> Self {
        Self::XPath(expr.into())
    }

    /// Creates an ID selector.
    #[inline]
    pub fn id(id: impl Into<String>) -> Self {
        Self::Id(id.into())
    }

    /// Creates a tag name selector.
    #[inline]
    pub fn tag(tag: impl Into<String>) -> Self {
        Self::Tag(tag.into())
    }

    /// Creates a class name selector.
    #[inline]
    pub fn class(class: impl Into<String>) -> Self {
        Self::Class(class.into())
    }

    /// Creates a name attribute selector.
    #[inline]
    pub fn name(name: impl Into<String>) -> Self {
        Self::Name(name.into())
    }

    /// Returns the strategy name for probe implementations.
    #[must_use]
    pub fn strategy(&self) -> &'static str {
        match self {
            Self::Css(_) => "css",
            Self::XPath(_) => "xpath",
            Self::Id(_) => "id",
            Self::Tag(_) => "tag",
            Self::Class(_) => "class",
            Self::Name(_) => "name",
        }
    }

    /// Returns the selector value.
    #[must_use]
    pub fn value(&self) -> &str {
        match self {
            Self::Css(v)
            | Self::XPath(v)
            | Self::Id(v)
            | Self::Tag(v)
            | Self::Class(v)
            | Self::Name(v) => v,
        }
    }
}

impl fmt::Display for By {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.strategy(), self.value())
    }
}

// ============================================================================
// From implementations for ergonomics
// ============================================================================

impl From<&str> for By {
    /// Converts a string to CSS selector (default).
    fn from(s: &str) -> Self {
        Self::Css(s.to_string())
    }
}

impl From<String> for By {
    /// Converts a string to CSS selector (default).
    fn from(s: String) -> Self {
        Self::Css(s)
    }
}

// ============================================================================
// Tests
// ============================================================================
