//! Browser session and the primitive actions page objects are built from.

use crate::driver::Driver;
use crate::locator::Locator;
use crate::result::{CheckError, CheckResult};
use crate::screenshot::ScreenshotSink;
use crate::wait::{Readiness, WaitOptions};
use tokio::time::Instant;
use tracing::{debug, warn};

/// One browser session plus its wait policy and screenshot sink.
///
/// Actions run strictly one after another; every element is resolved afresh
/// from its [`Locator`] at the moment it is used.
#[derive(Debug)]
pub struct Session<D: Driver> {
    driver: D,
    wait: WaitOptions,
    screenshots: ScreenshotSink,
}

impl<D: Driver> Session<D> {
    /// Create a session with default waits and screenshots disabled
    #[must_use]
    pub fn new(driver: D) -> Self {
        Self {
            driver,
            wait: WaitOptions::default(),
            screenshots: ScreenshotSink::disabled(),
        }
    }

    /// Set the implicit wait policy
    #[must_use]
    pub const fn with_wait(mut self, wait: WaitOptions) -> Self {
        self.wait = wait;
        self
    }

    /// Set the screenshot sink
    #[must_use]
    pub fn with_screenshots(mut self, sink: ScreenshotSink) -> Self {
        self.screenshots = sink;
        self
    }

    /// Underlying driver
    #[must_use]
    pub const fn driver(&self) -> &D {
        &self.driver
    }

    /// Underlying driver, mutably
    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    /// Implicit wait policy
    #[must_use]
    pub const fn wait_options(&self) -> WaitOptions {
        self.wait
    }

    /// Screenshot sink
    #[must_use]
    pub const fn screenshots(&self) -> &ScreenshotSink {
        &self.screenshots
    }

    /// Navigate to `url`; failures are fatal
    pub async fn navigate(&mut self, url: &str) -> CheckResult<()> {
        debug!(url, "navigate");
        self.driver.navigate(url).await.map_err(|e| match e {
            CheckError::NavigationFailure { .. } => e,
            other => CheckError::NavigationFailure {
                url: url.to_string(),
                message: other.to_string(),
            },
        })
    }

    /// Maximize the browser window
    pub async fn maximize(&mut self) -> CheckResult<()> {
        debug!("maximize window");
        self.driver.maximize_window().await
    }

    async fn check(&self, locator: &Locator, readiness: Readiness) -> CheckResult<bool> {
        let selector = locator.selector();
        match readiness {
            Readiness::Present => self.driver.is_present(selector).await,
            Readiness::Displayed => self.driver.is_displayed(selector).await,
            Readiness::Clickable => self.driver.is_clickable(selector).await,
        }
    }

    /// Poll until `locator` meets `readiness` or the wait budget runs out.
    /// Probes at least once.
    pub async fn wait_for(
        &self,
        locator: &Locator,
        readiness: Readiness,
        options: WaitOptions,
    ) -> CheckResult<bool> {
        let deadline = Instant::now() + options.timeout();
        loop {
            if self.check(locator, readiness).await? {
                return Ok(true);
            }
            if Instant::now() >= deadline {
                debug!(locator = locator.name(), %readiness, "wait timed out");
                return Ok(false);
            }
            tokio::time::sleep(options.poll_interval()).await;
        }
    }

    /// Poll until `locator` is absent or not rendered. Probes at least once.
    pub async fn wait_until_hidden(
        &self,
        locator: &Locator,
        options: WaitOptions,
    ) -> CheckResult<bool> {
        let deadline = Instant::now() + options.timeout();
        loop {
            if !self.driver.is_displayed(locator.selector()).await? {
                return Ok(true);
            }
            if Instant::now() >= deadline {
                debug!(locator = locator.name(), "still displayed after wait");
                return Ok(false);
            }
            tokio::time::sleep(options.poll_interval()).await;
        }
    }

    async fn ready(&self, locator: &Locator, readiness: Readiness) -> CheckResult<()> {
        if self.wait_for(locator, readiness, self.wait).await? {
            Ok(())
        } else {
            Err(CheckError::ElementNotInteractable {
                locator: locator.name().to_string(),
                timeout_ms: self.wait.timeout_ms,
            })
        }
    }

    /// Wait for the field, clear it and type `value`
    pub async fn set_field(&mut self, locator: &Locator, value: &str) -> CheckResult<()> {
        self.ready(locator, Readiness::Displayed).await?;
        debug!(locator = locator.name(), value, "set field");
        self.driver.clear(locator.selector()).await?;
        if !value.is_empty() {
            self.driver.type_text(locator.selector(), value).await?;
        }
        Ok(())
    }

    /// Wait until clickable, then click
    pub async fn click(&mut self, locator: &Locator) -> CheckResult<()> {
        self.ready(locator, Readiness::Clickable).await?;
        debug!(locator = locator.name(), "click");
        self.driver.click(locator.selector()).await
    }

    /// Click through script, for controls whose native click an overlay intercepts
    pub async fn click_via_script(&mut self, locator: &Locator) -> CheckResult<()> {
        self.ready(locator, Readiness::Present).await?;
        debug!(locator = locator.name(), "click via script");
        self.driver.click_via_script(locator.selector()).await
    }

    /// Visible text of an element
    pub async fn read_text(&self, locator: &Locator) -> CheckResult<String> {
        self.ready(locator, Readiness::Present).await?;
        self.driver
            .text(locator.selector())
            .await?
            .ok_or_else(|| CheckError::ElementNotFound {
                locator: locator.name().to_string(),
            })
    }

    /// Current value of an input
    pub async fn read_value(&self, locator: &Locator) -> CheckResult<String> {
        self.ready(locator, Readiness::Present).await?;
        self.driver
            .value(locator.selector())
            .await?
            .ok_or_else(|| CheckError::ElementNotFound {
                locator: locator.name().to_string(),
            })
    }

    /// Non-blocking presence and visibility check
    pub async fn is_visible(&self, locator: &Locator) -> CheckResult<bool> {
        self.driver.is_displayed(locator.selector()).await
    }

    /// Non-blocking clickability check
    pub async fn is_clickable(&self, locator: &Locator) -> CheckResult<bool> {
        self.driver.is_clickable(locator.selector()).await
    }

    /// Capture a named screenshot. Failures are logged, never returned.
    pub async fn capture(&mut self, name: &str) {
        if !self.screenshots.is_enabled() {
            return;
        }
        let png = match self.driver.screenshot().await {
            Ok(png) => png,
            Err(e) => {
                warn!(name, error = %e, "screenshot capture failed");
                return;
            }
        };
        match self.screenshots.store(name, &png) {
            Ok(Some(path)) => debug!(name, path = %path.display(), "screenshot saved"),
            Ok(None) => {}
            Err(e) => warn!(name, error = %e, "screenshot write failed"),
        }
    }

    /// Close the browser
    pub async fn close(mut self) -> CheckResult<()> {
        self.driver.close().await
    }
}
