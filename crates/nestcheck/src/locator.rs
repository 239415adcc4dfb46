//! Locator abstraction for element selection.
//!
//! A [`Locator`] binds one semantic name to exactly one [`Selector`]. Locators
//! are plain values built on every access, so nothing holds a reference to a
//! DOM node that a re-render could invalidate.

use std::fmt;

/// Selector type for locating elements
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Selector {
    /// CSS selector (e.g., "#current-age")
    Css(String),
    /// XPath selector
    XPath(String),
    /// Anchor matched by its visible text
    LinkText(String),
}

impl Selector {
    /// Create a CSS selector
    #[must_use]
    pub fn css(selector: impl Into<String>) -> Self {
        Self::Css(selector.into())
    }

    /// Create an XPath selector
    #[must_use]
    pub fn xpath(selector: impl Into<String>) -> Self {
        Self::XPath(selector.into())
    }

    /// Create a link text selector
    #[must_use]
    pub fn link_text(text: impl Into<String>) -> Self {
        Self::LinkText(text.into())
    }

    /// Raw selector expression
    #[must_use]
    pub fn expression(&self) -> &str {
        match self {
            Self::Css(s) | Self::XPath(s) | Self::LinkText(s) => s,
        }
    }

    /// XPath equivalent for selectors that are not CSS
    #[must_use]
    pub fn to_xpath(&self) -> Option<String> {
        match self {
            Self::Css(_) => None,
            Self::XPath(s) => Some(s.clone()),
            Self::LinkText(text) => Some(format!("//a[normalize-space(.)={}]", xpath_literal(text))),
        }
    }

    /// Convert to a JavaScript expression evaluating to the first match or null
    #[must_use]
    pub fn to_query(&self) -> String {
        match self {
            Self::Css(s) => format!("document.querySelector({s:?})"),
            Self::XPath(_) | Self::LinkText(_) => {
                let xpath = self.to_xpath().unwrap_or_default();
                format!("document.evaluate({xpath:?}, document, null, XPathResult.FIRST_ORDERED_NODE_TYPE, null).singleNodeValue")
            }
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Css(s) => write!(f, "css={s}"),
            Self::XPath(s) => write!(f, "xpath={s}"),
            Self::LinkText(s) => write!(f, "link={s}"),
        }
    }
}

/// Quote a string for use inside an XPath expression.
fn xpath_literal(text: &str) -> String {
    if !text.contains('\'') {
        format!("'{text}'")
    } else if !text.contains('"') {
        format!("\"{text}\"")
    } else {
        let parts: Vec<String> = text.split('\'').map(|p| format!("'{p}'")).collect();
        format!("concat({})", parts.join(", \"'\", "))
    }
}

/// A semantic name bound to one selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locator {
    name: &'static str,
    selector: Selector,
}

impl Locator {
    /// Create a locator
    #[must_use]
    pub const fn new(name: &'static str, selector: Selector) -> Self {
        Self { name, selector }
    }

    /// Semantic name used in logs and errors
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Selector used to resolve the element
    #[must_use]
    pub const fn selector(&self) -> &Selector {
        &self.selector
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.selector)
    }
}
