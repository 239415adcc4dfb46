//! Nestcheck: BDD checks for the pre-retirement savings calculator
//!
//! Scenario steps written in plain language drive a real browser through
//! page objects for the calculator form. Form inputs and expected outcomes
//! come from two JSON stores keyed by scenario name.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐   ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//! │ .feature     │──►│ StepRegistry │──►│ Page objects │──►│ Session      │
//! │ (scenarios)  │   │ (regex)      │   │ + TestData   │   │ + Driver     │
//! └──────────────┘   └──────────────┘   └──────────────┘   └──────────────┘
//!         ▲                                                        │
//!         └─────────────── ScenarioRunner / SuiteReport ◄──────────┘
//! ```
//!
//! # Example
//!
//! ```no_run
//! use nestcheck::{
//!     CalculatorPage, Feature, MainPage, MockDriver, ScenarioRunner, Session, StepRegistry,
//!     TestData, World,
//! };
//! use std::sync::Arc;
//!
//! # async fn run() -> nestcheck::CheckResult<()> {
//! let feature = Feature::load("features/pre_retirement_calculator.feature")?;
//! let data = Arc::new(TestData::bundled()?);
//! let mut world = World::new(
//!     Session::new(MockDriver::new()),
//!     MainPage::default(),
//!     CalculatorPage::new(data),
//! );
//! let report = ScenarioRunner::new()
//!     .with_tags(["smoke"])
//!     .run(&[feature], &StepRegistry::calculator()?, &mut world)
//!     .await;
//! assert!(report.all_passed());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

#[cfg(feature = "browser")]
mod chromium;
mod config;
mod driver;
mod feature;
mod fixture;
pub mod lint;
mod locator;
pub mod pages;
mod result;
mod runner;
mod screenshot;
mod session;
pub mod steps;
#[cfg(test)]
mod testing;
mod wait;
mod world;

#[cfg(feature = "browser")]
pub use chromium::{ChromiumConfig, ChromiumDriver};
pub use config::SuiteConfig;
pub use driver::{ClickEffect, Driver, MockDriver, MockElement};
pub use feature::{Feature, KeyReference, Scenario, Step};
pub use fixture::{
    FieldValue, ScenarioRecord, ScenarioStore, TestData, ALL_EMPTY_SCENARIO, NEGATIVE_FILE,
    POSITIVE_FILE,
};
pub use lint::{lint_feature, LintIssue, LintReport, LintSeverity};
pub use locator::{Locator, Selector};
pub use pages::{
    CalculatorElement, CalculatorPage, MainPage, MaritalStatus, PageObject, SocialSecurity,
    CALCULATOR_URL, CONSENT_WAIT_MS,
};
pub use result::{CheckError, CheckResult};
pub use runner::{ScenarioResult, ScenarioRunner, Status, StepResult, SuiteReport};
pub use screenshot::ScreenshotSink;
pub use session::Session;
pub use steps::{DataSource, StepCall, StepKind, StepRegistry};
pub use wait::{Readiness, WaitOptions, DEFAULT_POLL_INTERVAL_MS, DEFAULT_WAIT_TIMEOUT_MS};
pub use world::World;
