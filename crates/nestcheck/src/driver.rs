//! Driver - abstract browser automation trait
//!
//! Every primitive the page objects need, expressed against a [`Selector`].
//! Implementations:
//!
//! - `ChromiumDriver` - CDP via chromiumoxide (feature `browser`)
//! - [`MockDriver`] - in-memory element table for unit tests

use crate::locator::Selector;
use crate::result::{CheckError, CheckResult};
use async_trait::async_trait;
use std::collections::HashMap;

/// PNG signature, returned by the mock screenshot
const PNG_MAGIC: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

/// Abstract driver trait for browser automation
///
/// Queries return `Ok(false)` / `Ok(None)` for absent elements; actions on
/// absent elements fail.
#[async_trait]
pub trait Driver: Send + Sync {
    /// Navigate to URL
    async fn navigate(&mut self, url: &str) -> CheckResult<()>;

    /// Maximize the browser window
    async fn maximize_window(&mut self) -> CheckResult<()>;

    /// Get current URL
    async fn current_url(&self) -> CheckResult<String>;

    /// Whether an element matching the selector is attached
    async fn is_present(&self, selector: &Selector) -> CheckResult<bool>;

    /// Whether the element is rendered
    async fn is_displayed(&self, selector: &Selector) -> CheckResult<bool>;

    /// Whether the element would receive a click
    async fn is_clickable(&self, selector: &Selector) -> CheckResult<bool>;

    /// Clear an input's value
    async fn clear(&mut self, selector: &Selector) -> CheckResult<()>;

    /// Type text into an input
    async fn type_text(&mut self, selector: &Selector, text: &str) -> CheckResult<()>;

    /// Click with native event dispatch
    async fn click(&mut self, selector: &Selector) -> CheckResult<()>;

    /// Click through `HTMLElement.click()`, bypassing overlays
    async fn click_via_script(&mut self, selector: &Selector) -> CheckResult<()>;

    /// Visible text of the element
    async fn text(&self, selector: &Selector) -> CheckResult<Option<String>>;

    /// Current value of an input
    async fn value(&self, selector: &Selector) -> CheckResult<Option<String>>;

    /// Capture the viewport as PNG
    async fn screenshot(&self) -> CheckResult<Vec<u8>>;

    /// Close the browser
    async fn close(&mut self) -> CheckResult<()>;
}

/// Side effect applied when a mock element is clicked
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickEffect {
    /// Make another element visible
    Show(Selector),
    /// Hide an element
    Hide(Selector),
    /// Replace an element's text
    SetText(Selector, String),
}

/// Mock DOM element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockElement {
    /// Rendered on the page
    pub displayed: bool,
    /// Accepts input
    pub enabled: bool,
    /// Covered by an overlay that swallows native clicks
    pub intercepted: bool,
    /// Visible text
    pub text: String,
    /// Input value
    pub value: String,
    /// Effects applied on click
    pub on_click: Vec<ClickEffect>,
}

impl Default for MockElement {
    fn default() -> Self {
        Self::visible()
    }
}

impl MockElement {
    /// A rendered, enabled element
    #[must_use]
    pub fn visible() -> Self {
        Self {
            displayed: true,
            enabled: true,
            intercepted: false,
            text: String::new(),
            value: String::new(),
            on_click: Vec::new(),
        }
    }

    /// An attached element that is not rendered
    #[must_use]
    pub fn hidden() -> Self {
        Self {
            displayed: false,
            ..Self::visible()
        }
    }

    /// Set visible text
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Set input value
    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    /// Cover the element with an overlay
    #[must_use]
    pub const fn intercepted(mut self) -> Self {
        self.intercepted = true;
        self
    }

    /// Disable the element
    #[must_use]
    pub const fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Add a click effect
    #[must_use]
    pub fn on_click(mut self, effect: ClickEffect) -> Self {
        self.on_click.push(effect);
        self
    }

    const fn is_clickable(&self) -> bool {
        self.displayed && self.enabled && !self.intercepted
    }
}

/// Mock driver for unit testing
#[derive(Debug, Default)]
pub struct MockDriver {
    /// Current URL
    pub current_url: String,
    /// Whether the window was maximized
    pub maximized: bool,
    /// Mock elements keyed by selector
    pub elements: HashMap<Selector, MockElement>,
    /// Navigation failure to simulate
    pub navigation_error: Option<String>,
    /// Call history for verification
    pub call_history: Vec<String>,
}

impl MockDriver {
    /// Create new mock driver
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a mock element (builder form)
    #[must_use]
    pub fn with_element(mut self, selector: Selector, element: MockElement) -> Self {
        self.add_element(selector, element);
        self
    }

    /// Add a mock element
    pub fn add_element(&mut self, selector: Selector, element: MockElement) {
        let _ = self.elements.insert(selector, element);
    }

    /// Make navigation fail with a message
    #[must_use]
    pub fn with_navigation_error(mut self, message: impl Into<String>) -> Self {
        self.navigation_error = Some(message.into());
        self
    }

    /// Look up a mock element
    #[must_use]
    pub fn element(&self, selector: &Selector) -> Option<&MockElement> {
        self.elements.get(selector)
    }

    /// Look up a mock element mutably
    pub fn element_mut(&mut self, selector: &Selector) -> Option<&mut MockElement> {
        self.elements.get_mut(selector)
    }

    /// Get call history
    #[must_use]
    pub fn history(&self) -> &[String] {
        &self.call_history
    }

    /// Check if method was called
    #[must_use]
    pub fn was_called(&self, method: &str) -> bool {
        self.call_history.iter().any(|c| c.starts_with(method))
    }

    /// Count calls with the given prefix
    #[must_use]
    pub fn calls_to(&self, prefix: &str) -> usize {
        self.call_history
            .iter()
            .filter(|c| c.starts_with(prefix))
            .count()
    }

    /// Values typed so far, as `(selector expression, text)` pairs
    #[must_use]
    pub fn typed_values(&self) -> Vec<(String, String)> {
        self.call_history
            .iter()
            .filter_map(|c| c.strip_prefix("type:"))
            .filter_map(|rest| rest.split_once('='))
            .map(|(sel, text)| (sel.to_string(), text.to_string()))
            .collect()
    }

    fn interactable(&mut self, selector: &Selector) -> CheckResult<&mut MockElement> {
        match self.elements.get_mut(selector) {
            Some(el) if el.displayed && el.enabled => Ok(el),
            Some(_) => Err(CheckError::driver(format!(
                "element not interactable: {selector}"
            ))),
            None => Err(CheckError::driver(format!("no such element: {selector}"))),
        }
    }

    fn apply(&mut self, effects: Vec<ClickEffect>) {
        for effect in effects {
            match effect {
                ClickEffect::Show(target) => {
                    if let Some(el) = self.elements.get_mut(&target) {
                        el.displayed = true;
                    }
                }
                ClickEffect::Hide(target) => {
                    if let Some(el) = self.elements.get_mut(&target) {
                        el.displayed = false;
                    }
                }
                ClickEffect::SetText(target, text) => {
                    if let Some(el) = self.elements.get_mut(&target) {
                        el.text = text;
                    }
                }
            }
        }
    }
}

#[async_trait]
impl Driver for MockDriver {
    async fn navigate(&mut self, url: &str) -> CheckResult<()> {
        self.call_history.push(format!("navigate:{url}"));
        if let Some(message) = &self.navigation_error {
            return Err(CheckError::NavigationFailure {
                url: url.to_string(),
                message: message.clone(),
            });
        }
        self.current_url = url.to_string();
        Ok(())
    }

    async fn maximize_window(&mut self) -> CheckResult<()> {
        self.call_history.push("maximize".to_string());
        self.maximized = true;
        Ok(())
    }

    async fn current_url(&self) -> CheckResult<String> {
        Ok(self.current_url.clone())
    }

    async fn is_present(&self, selector: &Selector) -> CheckResult<bool> {
        Ok(self.elements.contains_key(selector))
    }

    async fn is_displayed(&self, selector: &Selector) -> CheckResult<bool> {
        Ok(self.elements.get(selector).is_some_and(|el| el.displayed))
    }

    async fn is_clickable(&self, selector: &Selector) -> CheckResult<bool> {
        Ok(self
            .elements
            .get(selector)
            .is_some_and(MockElement::is_clickable))
    }

    async fn clear(&mut self, selector: &Selector) -> CheckResult<()> {
        self.call_history
            .push(format!("clear:{}", selector.expression()));
        self.interactable(selector)?.value.clear();
        Ok(())
    }

    async fn type_text(&mut self, selector: &Selector, text: &str) -> CheckResult<()> {
        self.call_history
            .push(format!("type:{}={text}", selector.expression()));
        self.interactable(selector)?.value.push_str(text);
        Ok(())
    }

    async fn click(&mut self, selector: &Selector) -> CheckResult<()> {
        self.call_history
            .push(format!("click:{}", selector.expression()));
        let el = self.interactable(selector)?;
        if el.intercepted {
            return Err(CheckError::driver(format!(
                "click intercepted by overlay: {selector}"
            )));
        }
        let effects = el.on_click.clone();
        self.apply(effects);
        Ok(())
    }

    async fn click_via_script(&mut self, selector: &Selector) -> CheckResult<()> {
        self.call_history
            .push(format!("script_click:{}", selector.expression()));
        let effects = self
            .elements
            .get(selector)
            .map(|el| el.on_click.clone())
            .ok_or_else(|| CheckError::driver(format!("no such element: {selector}")))?;
        self.apply(effects);
        Ok(())
    }

    async fn text(&self, selector: &Selector) -> CheckResult<Option<String>> {
        Ok(self.elements.get(selector).map(|el| el.text.clone()))
    }

    async fn value(&self, selector: &Selector) -> CheckResult<Option<String>> {
        Ok(self.elements.get(selector).map(|el| el.value.clone()))
    }

    async fn screenshot(&self) -> CheckResult<Vec<u8>> {
        Ok(PNG_MAGIC.to_vec())
    }

    async fn close(&mut self) -> CheckResult<()> {
        self.call_history.push("close".to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod mock_element_tests {
        use super::*;

        #[test]
        fn test_visible_defaults() {
            let el = MockElement::visible();
            assert!(el.displayed);
            assert!(el.enabled);
            assert!(el.is_clickable());
        }

        #[test]
        fn test_intercepted_not_clickable() {
            assert!(!MockElement::visible().intercepted().is_clickable());
            assert!(!MockElement::visible().disabled().is_clickable());
            assert!(!MockElement::hidden().is_clickable());
        }
    }

    mod mock_driver_tests {
        use super::*;

        #[test]
        fn test_mock_driver_creation() {
            let driver = MockDriver::new();
            assert!(driver.elements.is_empty());
            assert!(driver.current_url.is_empty());
            assert!(driver.history().is_empty());
        }

        #[tokio::test]
        async fn test_navigate_records_history() {
            let mut driver = MockDriver::new();
            driver.navigate("https://example.com").await.unwrap();
            assert_eq!(driver.current_url().await.unwrap(), "https://example.com");
            assert!(driver.was_called("navigate"));
        }

        #[tokio::test]
        async fn test_navigate_failure() {
            let mut driver = MockDriver::new().with_navigation_error("offline");
            let err = driver.navigate("https://example.com").await.unwrap_err();
            assert!(matches!(err, CheckError::NavigationFailure { .. }));
            assert!(driver.current_url.is_empty());
        }

        #[tokio::test]
        async fn test_clear_and_type() {
            let sel = Selector::css("#current-age");
            let mut driver =
                MockDriver::new().with_element(sel.clone(), MockElement::visible().with_value("9"));
            driver.clear(&sel).await.unwrap();
            driver.type_text(&sel, "30").await.unwrap();
            assert_eq!(driver.value(&sel).await.unwrap().as_deref(), Some("30"));
            assert_eq!(
                driver.typed_values(),
                vec![("#current-age".to_string(), "30".to_string())]
            );
        }

        #[tokio::test]
        async fn test_type_into_missing_element_fails() {
            let mut driver = MockDriver::new();
            let err = driver
                .type_text(&Selector::css("#nope"), "1")
                .await
                .unwrap_err();
            assert!(err.to_string().contains("no such element"));
        }

        #[tokio::test]
        async fn test_intercepted_click_only_via_script() {
            let toggle = Selector::css("#single");
            let mut driver = MockDriver::new()
                .with_element(toggle.clone(), MockElement::visible().intercepted());
            assert!(!driver.is_clickable(&toggle).await.unwrap());
            assert!(driver.click(&toggle).await.is_err());
            driver.click_via_script(&toggle).await.unwrap();
            assert_eq!(driver.calls_to("script_click:#single"), 1);
        }

        #[tokio::test]
        async fn test_click_effects() {
            let button = Selector::css("#submit");
            let result = Selector::css("#result");
            let mut driver = MockDriver::new()
                .with_element(
                    button.clone(),
                    MockElement::visible()
                        .on_click(ClickEffect::Show(result.clone()))
                        .on_click(ClickEffect::SetText(result.clone(), "done".to_string()))
                        .on_click(ClickEffect::Hide(button.clone())),
                )
                .with_element(result.clone(), MockElement::hidden());

            driver.click(&button).await.unwrap();
            assert!(driver.is_displayed(&result).await.unwrap());
            assert!(!driver.is_displayed(&button).await.unwrap());
            assert_eq!(driver.text(&result).await.unwrap().as_deref(), Some("done"));
        }

        #[tokio::test]
        async fn test_queries_on_absent_element() {
            let driver = MockDriver::new();
            let sel = Selector::css("#absent");
            assert!(!driver.is_present(&sel).await.unwrap());
            assert!(!driver.is_displayed(&sel).await.unwrap());
            assert!(driver.text(&sel).await.unwrap().is_none());
        }

        #[tokio::test]
        async fn test_screenshot_is_png() {
            let driver = MockDriver::new();
            let png = driver.screenshot().await.unwrap();
            assert_eq!(&png[..4], &[0x89, 0x50, 0x4E, 0x47]);
        }
    }
}
