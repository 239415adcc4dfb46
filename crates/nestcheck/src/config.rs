//! Suite configuration, read from YAML.
//!
//! Every key is optional; missing keys take the [`Default`] values, which
//! run headless against the public calculator with bundled fixtures.

#[cfg(feature = "browser")]
use crate::chromium::ChromiumConfig;
use crate::fixture::TestData;
use crate::pages::{MainPage, CALCULATOR_URL};
use crate::result::{CheckError, CheckResult};
use crate::screenshot::ScreenshotSink;
use crate::wait::{WaitOptions, DEFAULT_POLL_INTERVAL_MS, DEFAULT_WAIT_TIMEOUT_MS};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration for one suite run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SuiteConfig {
    /// Calculator page address
    pub base_url: String,
    /// Directory holding `positive.json` / `negative.json` (bundled data if unset)
    pub fixtures_dir: Option<PathBuf>,
    /// Where checkpoint screenshots go
    pub screenshot_dir: PathBuf,
    /// Capture checkpoint screenshots
    pub screenshots: bool,
    /// Implicit wait budget per element action
    pub element_timeout_ms: u64,
    /// Delay between readiness probes
    pub poll_interval_ms: u64,
    /// Run without a visible window
    pub headless: bool,
    /// Chromium executable (auto-detected if unset)
    pub chromium_path: Option<PathBuf>,
    /// Chromium sandbox (disable in containers)
    pub sandbox: bool,
    /// Browser window width
    pub window_width: u32,
    /// Browser window height
    pub window_height: u32,
    /// Stop after the first failed scenario
    pub fail_fast: bool,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            base_url: CALCULATOR_URL.to_string(),
            fixtures_dir: None,
            screenshot_dir: PathBuf::from("target/nestcheck/screenshots"),
            screenshots: true,
            element_timeout_ms: DEFAULT_WAIT_TIMEOUT_MS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            headless: true,
            chromium_path: None,
            sandbox: true,
            window_width: 1920,
            window_height: 1080,
            fail_fast: false,
        }
    }
}

impl SuiteConfig {
    /// Parse YAML text
    pub fn from_yaml(yaml: &str) -> CheckResult<Self> {
        let config: Self = serde_yaml_ng::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a YAML file
    pub fn load(path: impl AsRef<Path>) -> CheckResult<Self> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path).map_err(|e| {
            CheckError::config(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_yaml(&yaml)
    }

    /// Reject settings no run could succeed with
    pub fn validate(&self) -> CheckResult<()> {
        let url = self.base_url.trim();
        if url.is_empty() {
            return Err(CheckError::config("base_url is empty"));
        }
        if !(url.starts_with("http://") || url.starts_with("https://") || url.starts_with("file://"))
        {
            return Err(CheckError::config(format!(
                "base_url '{url}' must start with http://, https:// or file://"
            )));
        }
        if self.poll_interval_ms == 0 {
            return Err(CheckError::config("poll_interval_ms must be greater than zero"));
        }
        if self.window_width == 0 || self.window_height == 0 {
            return Err(CheckError::config("window size must be non-zero"));
        }
        Ok(())
    }

    /// Implicit wait policy
    #[must_use]
    pub fn wait_options(&self) -> WaitOptions {
        WaitOptions::new()
            .with_timeout(self.element_timeout_ms)
            .with_poll_interval(self.poll_interval_ms)
    }

    /// Screenshot sink, disabled when screenshots are off
    #[must_use]
    pub fn screenshot_sink(&self) -> ScreenshotSink {
        if self.screenshots {
            ScreenshotSink::new(self.screenshot_dir.clone())
        } else {
            ScreenshotSink::disabled()
        }
    }

    /// Landing page at `base_url`
    #[must_use]
    pub fn main_page(&self) -> MainPage {
        MainPage::new(self.base_url.trim())
    }

    /// Test data from `fixtures_dir`, or the bundled fixtures
    pub fn test_data(&self) -> CheckResult<TestData> {
        match &self.fixtures_dir {
            Some(dir) => TestData::load_dir(dir),
            None => TestData::bundled(),
        }
    }

    /// Chromium launch settings
    #[cfg(feature = "browser")]
    #[must_use]
    pub fn chromium_config(&self) -> ChromiumConfig {
        ChromiumConfig {
            headless: self.headless,
            sandbox: self.sandbox,
            chromium_path: self
                .chromium_path
                .as_ref()
                .map(|p| p.to_string_lossy().into_owned()),
            window_width: self.window_width,
            window_height: self.window_height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod load_tests {
        use super::*;

        #[test]
        fn test_defaults() {
            let config = SuiteConfig::default();
            assert_eq!(config.base_url, CALCULATOR_URL);
            assert!(config.validate().is_ok());
            assert_eq!(config.wait_options().timeout_ms, 10_000);
            assert_eq!(config.wait_options().poll_interval_ms, 100);
        }

        #[test]
        fn test_partial_yaml_keeps_defaults() {
            let config = SuiteConfig::from_yaml(
                "base_url: http://localhost:8080/calc.html\nelement_timeout_ms: 2500\nfail_fast: true\n",
            )
            .unwrap();
            assert_eq!(config.base_url, "http://localhost:8080/calc.html");
            assert_eq!(config.element_timeout_ms, 2500);
            assert!(config.fail_fast);
            assert!(config.headless);
            assert_eq!(config.window_width, 1920);
        }

        #[test]
        fn test_unknown_key_rejected() {
            let err = SuiteConfig::from_yaml("base_ulr: http://x\n").unwrap_err();
            assert!(matches!(err, CheckError::Yaml(_)));
        }

        #[test]
        fn test_load_file() {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("nestcheck.yaml");
            std::fs::write(&path, "screenshots: false\nsandbox: false\n").unwrap();
            let config = SuiteConfig::load(&path).unwrap();
            assert!(!config.screenshots);
            assert!(!config.screenshot_sink().is_enabled());
        }

        #[test]
        fn test_load_missing_file() {
            let err = SuiteConfig::load("/nonexistent/nestcheck.yaml").unwrap_err();
            assert!(matches!(err, CheckError::Config { .. }));
        }
    }

    mod validate_tests {
        use super::*;

        #[test]
        fn test_empty_url() {
            let config = SuiteConfig {
                base_url: "  ".into(),
                ..SuiteConfig::default()
            };
            assert!(config.validate().is_err());
        }

        #[test]
        fn test_url_scheme() {
            let config = SuiteConfig {
                base_url: "www.securian.com".into(),
                ..SuiteConfig::default()
            };
            assert!(config.validate().is_err());
        }

        #[test]
        fn test_zero_poll_interval() {
            let err = SuiteConfig::from_yaml("poll_interval_ms: 0\n").unwrap_err();
            assert!(err.is_fatal());
        }
    }

    mod derive_tests {
        use super::*;

        #[test]
        fn test_fixtures_dir() {
            let dir = tempfile::tempdir().unwrap();
            std::fs::write(dir.path().join("positive.json"), r#"{"k": {"currentAge": 1}}"#)
                .unwrap();
            std::fs::write(dir.path().join("negative.json"), "{}").unwrap();
            let config = SuiteConfig {
                fixtures_dir: Some(dir.path().to_path_buf()),
                ..SuiteConfig::default()
            };
            let data = config.test_data().unwrap();
            assert!(data.positive().contains("k"));
            assert!(data.negative().is_empty());
        }

        #[test]
        fn test_bundled_fixtures_by_default() {
            let data = SuiteConfig::default().test_data().unwrap();
            assert!(data.positive().contains("validAge30"));
        }

        #[test]
        fn test_main_page_url() {
            let config = SuiteConfig {
                base_url: " http://localhost/calc ".into(),
                ..SuiteConfig::default()
            };
            assert_eq!(config.main_page().url(), "http://localhost/calc");
        }
    }
}
