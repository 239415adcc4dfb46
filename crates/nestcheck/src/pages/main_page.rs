//! Navigation and bootstrap: open the calculator and clear the consent banner.

use super::PageObject;
use crate::driver::Driver;
use crate::locator::{Locator, Selector};
use crate::result::CheckResult;
use crate::session::Session;
use crate::wait::Readiness;
use tracing::{info, warn};

/// Public address of the calculator
pub const CALCULATOR_URL: &str =
    "https://www.securian.com/insights-tools/retirement-calculator.html";

/// Upper bound on waiting for a late consent banner
pub const CONSENT_WAIT_MS: u64 = 2_000;

const CONSENT_CLOSE_XPATH: &str = "//*[@class='onetrust-close-btn-handler onetrust-close-btn-ui banner-close-button ot-close-icon']";

/// Landing page that hosts the calculator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MainPage {
    url: String,
}

impl Default for MainPage {
    fn default() -> Self {
        Self::new(CALCULATOR_URL)
    }
}

impl MainPage {
    /// Page at a custom address (staging, local mirror)
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    /// Target URL
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Close button of the cookie-consent banner
    #[must_use]
    pub fn consent_close() -> Locator {
        Locator::new("cookie consent close button", Selector::xpath(CONSENT_CLOSE_XPATH))
    }

    /// Open the calculator, maximize the window and dismiss the consent
    /// banner if one is showing.
    ///
    /// Navigation errors propagate. Consent dismissal never fails.
    pub async fn launch<D: Driver>(&self, session: &mut Session<D>) -> CheckResult<()> {
        session.navigate(&self.url).await?;
        session.maximize().await?;
        info!(url = %self.url, "calculator page launched");
        self.dismiss_consent(session).await;
        Ok(())
    }

    /// Best-effort consent dismissal; returns whether a click happened.
    ///
    /// Waits for the close button to become clickable for the session's
    /// implicit wait, capped at [`CONSENT_WAIT_MS`].
    pub async fn dismiss_consent<D: Driver>(&self, session: &mut Session<D>) -> bool {
        let close = Self::consent_close();
        let wait = session.wait_options();
        let wait = wait.with_timeout(wait.timeout_ms.min(CONSENT_WAIT_MS));
        let attempt: CheckResult<bool> = async {
            if !session.wait_for(&close, Readiness::Clickable, wait).await? {
                return Ok(false);
            }
            session.driver_mut().click(close.selector()).await?;
            Ok(true)
        }
        .await;

        match attempt {
            Ok(true) => {
                info!("cookie consent dismissed");
                session.capture("cookie_consent").await;
                true
            }
            Ok(false) => false,
            Err(e) => {
                warn!(error = %e, "cookie consent not dismissed, continuing");
                false
            }
        }
    }
}

impl PageObject for MainPage {
    fn url_pattern(&self) -> &str {
        &self.url
    }

    fn page_name(&self) -> &str {
        "main page"
    }
}
