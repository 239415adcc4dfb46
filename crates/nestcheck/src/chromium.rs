//! Chromium driver over the Chrome DevTools Protocol.
//!
//! Element reads run as page-side JavaScript built from [`Selector::to_query`];
//! typing and native clicks go through chromiumoxide element handles so the
//! page receives real input events.

use crate::driver::Driver;
use crate::locator::Selector;
use crate::result::{CheckError, CheckResult};
use async_trait::async_trait;
use chromiumoxide::browser::{Browser as CdpBrowser, BrowserConfig as CdpConfig};
use chromiumoxide::cdp::browser_protocol::browser::{
    Bounds, GetWindowForTargetParams, SetWindowBoundsParams, WindowState,
};
use chromiumoxide::cdp::browser_protocol::page::{
    CaptureScreenshotFormat, CaptureScreenshotParams,
};
use chromiumoxide::element::Element;
use chromiumoxide::page::Page as CdpPage;
use futures::StreamExt;
use tracing::debug;

/// Launch configuration for [`ChromiumDriver`]
#[derive(Debug, Clone)]
pub struct ChromiumConfig {
    /// Run without a visible window
    pub headless: bool,
    /// Chromium sandbox (disable in containers)
    pub sandbox: bool,
    /// Path to chromium binary (None = auto-detect)
    pub chromium_path: Option<String>,
    /// Initial window width
    pub window_width: u32,
    /// Initial window height
    pub window_height: u32,
}

impl Default for ChromiumConfig {
    fn default() -> Self {
        Self {
            headless: true,
            sandbox: true,
            chromium_path: None,
            window_width: 1920,
            window_height: 1080,
        }
    }
}

/// Driver backed by a launched Chromium instance
#[derive(Debug)]
pub struct ChromiumDriver {
    browser: CdpBrowser,
    page: CdpPage,
    handle: tokio::task::JoinHandle<()>,
}

impl ChromiumDriver {
    /// Launch Chromium and open a blank page
    pub async fn launch(config: &ChromiumConfig) -> CheckResult<Self> {
        let mut builder = CdpConfig::builder().window_size(config.window_width, config.window_height);
        if !config.headless {
            builder = builder.with_head();
        }
        if !config.sandbox {
            builder = builder.no_sandbox();
        }
        if let Some(ref path) = config.chromium_path {
            builder = builder.chrome_executable(path);
        }
        let cdp_config = builder.build().map_err(CheckError::driver)?;

        let (browser, mut handler) = CdpBrowser::launch(cdp_config)
            .await
            .map_err(|e| CheckError::driver(e.to_string()))?;

        let handle = tokio::spawn(async move {
            while let Some(h) = handler.next().await {
                if h.is_err() {
                    break;
                }
            }
        });

        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| CheckError::driver(e.to_string()))?;

        debug!(headless = config.headless, "chromium launched");
        Ok(Self {
            browser,
            page,
            handle,
        })
    }

    async fn eval<T: serde::de::DeserializeOwned>(&self, script: String) -> CheckResult<T> {
        self.page
            .evaluate(script)
            .await
            .map_err(|e| CheckError::driver(e.to_string()))?
            .into_value()
            .map_err(|e| CheckError::driver(e.to_string()))
    }

    async fn element(&self, selector: &Selector) -> CheckResult<Element> {
        let found = match selector.to_xpath() {
            Some(xpath) => self.page.find_xpath(xpath).await,
            None => self.page.find_element(selector.expression()).await,
        };
        found.map_err(|e| CheckError::driver(format!("{selector}: {e}")))
    }
}

/// Wrap a page-side element probe; `el` is bound to the query result.
fn probe(selector: &Selector, body: &str) -> String {
    format!("(() => {{ const el = {}; {body} }})()", selector.to_query())
}

const DISPLAYED: &str = "if (!el) return false; \
    const r = el.getBoundingClientRect(); const s = window.getComputedStyle(el); \
    return r.width > 0 && r.height > 0 && s.visibility !== 'hidden' && s.display !== 'none';";

const CLICKABLE: &str = "if (!el || el.disabled) return false; \
    const r = el.getBoundingClientRect(); \
    if (r.width === 0 || r.height === 0) return false; \
    const top = document.elementFromPoint(r.left + r.width / 2, r.top + r.height / 2); \
    return top !== null && (top === el || el.contains(top));";

#[async_trait]
impl Driver for ChromiumDriver {
    async fn navigate(&mut self, url: &str) -> CheckResult<()> {
        let nav = |e: chromiumoxide::error::CdpError| CheckError::NavigationFailure {
            url: url.to_string(),
            message: e.to_string(),
        };
        self.page.goto(url).await.map_err(nav)?;
        self.page.wait_for_navigation().await.map_err(nav)?;
        Ok(())
    }

    async fn maximize_window(&mut self) -> CheckResult<()> {
        let window = self
            .page
            .execute(GetWindowForTargetParams::default())
            .await
            .map_err(|e| CheckError::driver(e.to_string()))?;
        let bounds = Bounds::builder().window_state(WindowState::Maximized).build();
        self.page
            .execute(SetWindowBoundsParams::new(window.result.window_id.clone(), bounds))
            .await
            .map_err(|e| CheckError::driver(e.to_string()))?;
        Ok(())
    }

    async fn current_url(&self) -> CheckResult<String> {
        self.page
            .url()
            .await
            .map(Option::unwrap_or_default)
            .map_err(|e| CheckError::driver(e.to_string()))
    }

    async fn is_present(&self, selector: &Selector) -> CheckResult<bool> {
        self.eval(probe(selector, "return el !== null;")).await
    }

    async fn is_displayed(&self, selector: &Selector) -> CheckResult<bool> {
        self.eval(probe(selector, DISPLAYED)).await
    }

    async fn is_clickable(&self, selector: &Selector) -> CheckResult<bool> {
        self.eval(probe(selector, CLICKABLE)).await
    }

    async fn clear(&mut self, selector: &Selector) -> CheckResult<()> {
        let cleared: bool = self
            .eval(probe(
                selector,
                "if (!el) return false; el.focus(); el.value = ''; \
                 el.dispatchEvent(new Event('input', { bubbles: true })); return true;",
            ))
            .await?;
        if cleared {
            Ok(())
        } else {
            Err(CheckError::driver(format!("no such element: {selector}")))
        }
    }

    async fn type_text(&mut self, selector: &Selector, text: &str) -> CheckResult<()> {
        let element = self.element(selector).await?;
        element
            .click()
            .await
            .map_err(|e| CheckError::driver(e.to_string()))?;
        element
            .type_str(text)
            .await
            .map_err(|e| CheckError::driver(e.to_string()))?;
        Ok(())
    }

    async fn click(&mut self, selector: &Selector) -> CheckResult<()> {
        self.element(selector)
            .await?
            .click()
            .await
            .map_err(|e| CheckError::driver(e.to_string()))?;
        Ok(())
    }

    async fn click_via_script(&mut self, selector: &Selector) -> CheckResult<()> {
        let clicked: bool = self
            .eval(probe(selector, "if (!el) return false; el.click(); return true;"))
            .await?;
        if clicked {
            Ok(())
        } else {
            Err(CheckError::driver(format!("no such element: {selector}")))
        }
    }

    async fn text(&self, selector: &Selector) -> CheckResult<Option<String>> {
        self.eval(probe(selector, "return el ? el.innerText : null;"))
            .await
    }

    async fn value(&self, selector: &Selector) -> CheckResult<Option<String>> {
        self.eval(probe(
            selector,
            "return el ? (el.value === undefined ? null : String(el.value)) : null;",
        ))
        .await
    }

    async fn screenshot(&self) -> CheckResult<Vec<u8>> {
        let params = CaptureScreenshotParams::builder()
            .format(CaptureScreenshotFormat::Png)
            .build();
        let screenshot = self
            .page
            .execute(params)
            .await
            .map_err(|e| CheckError::Screenshot {
                message: e.to_string(),
            })?;

        use base64::Engine;
        base64::engine::general_purpose::STANDARD
            .decode(&screenshot.data)
            .map_err(|e| CheckError::Screenshot {
                message: e.to_string(),
            })
    }

    async fn close(&mut self) -> CheckResult<()> {
        self.browser
            .close()
            .await
            .map_err(|e| CheckError::driver(e.to_string()))?;
        self.handle.abort();
        Ok(())
    }
}
