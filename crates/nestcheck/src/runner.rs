//! Scenario runner and suite report.

use crate::driver::Driver;
use crate::feature::{Feature, Scenario};
use crate::result::CheckResult;
use crate::steps::StepRegistry;
use crate::world::World;
use serde::Serialize;
use std::path::Path;
use std::time::{Duration, Instant};
use tracing::{error, info, warn};

/// Outcome of a step or scenario
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// Completed without error
    Passed,
    /// Raised an error
    Failed,
    /// Not run because an earlier step or scenario failed
    Skipped,
}

/// Result of one step
#[derive(Debug, Clone, Serialize)]
pub struct StepResult {
    /// Keyword as written
    pub keyword: String,
    /// Step text
    pub text: String,
    /// 1-based source line
    pub line: usize,
    /// Outcome
    pub status: Status,
    /// Error message if failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Result of one scenario
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioResult {
    /// Feature name
    pub feature: String,
    /// Scenario name
    pub name: String,
    /// Outcome
    pub status: Status,
    /// Per-step outcomes
    pub steps: Vec<StepResult>,
    /// First error, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Wall-clock time in milliseconds
    pub duration_ms: u64,
}

impl ScenarioResult {
    fn skipped(feature: &Feature, scenario: &Scenario) -> Self {
        Self {
            feature: feature.name.clone(),
            name: scenario.name.clone(),
            status: Status::Skipped,
            steps: scenario
                .steps
                .iter()
                .map(|s| StepResult {
                    keyword: s.keyword.clone(),
                    text: s.text.clone(),
                    line: s.line,
                    status: Status::Skipped,
                    error: None,
                })
                .collect(),
            error: None,
            duration_ms: 0,
        }
    }
}

/// Results of a whole run
#[derive(Debug, Clone, Default, Serialize)]
pub struct SuiteReport {
    /// Scenario results in execution order
    pub results: Vec<ScenarioResult>,
    /// Whether the run stopped early (fatal error or fail-fast)
    pub aborted: bool,
    /// Wall-clock time in milliseconds
    pub duration_ms: u64,
}

impl SuiteReport {
    fn count(&self, status: Status) -> usize {
        self.results.iter().filter(|r| r.status == status).count()
    }

    /// Passed scenarios
    #[must_use]
    pub fn passed(&self) -> usize {
        self.count(Status::Passed)
    }

    /// Failed scenarios
    #[must_use]
    pub fn failed(&self) -> usize {
        self.count(Status::Failed)
    }

    /// Skipped scenarios
    #[must_use]
    pub fn skipped(&self) -> usize {
        self.count(Status::Skipped)
    }

    /// Scenarios in the report
    #[must_use]
    pub fn total(&self) -> usize {
        self.results.len()
    }

    /// Whether every scenario passed
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.results.iter().all(|r| r.status == Status::Passed)
    }

    /// Failed scenarios
    #[must_use]
    pub fn failures(&self) -> Vec<&ScenarioResult> {
        self.results
            .iter()
            .filter(|r| r.status == Status::Failed)
            .collect()
    }

    /// Pretty JSON rendering
    pub fn to_json(&self) -> CheckResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the JSON rendering to `path`
    pub fn write_json(&self, path: impl AsRef<Path>) -> CheckResult<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

/// Runs scenarios one after another against a single world
#[derive(Debug, Clone, Default)]
pub struct ScenarioRunner {
    fail_fast: bool,
    tags: Vec<String>,
    name_filter: Option<String>,
}

impl ScenarioRunner {
    /// Runner with no filters
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stop after the first failed scenario
    #[must_use]
    pub const fn with_fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = fail_fast;
        self
    }

    /// Only run scenarios carrying one of these tags
    #[must_use]
    pub fn with_tags(mut self, tags: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.tags = tags
            .into_iter()
            .map(|t| t.into().trim_start_matches('@').to_string())
            .collect();
        self
    }

    /// Only run scenarios whose name contains `filter`
    #[must_use]
    pub fn with_name_filter(mut self, filter: impl Into<String>) -> Self {
        self.name_filter = Some(filter.into());
        self
    }

    /// Whether `scenario` passes the tag and name filters
    #[must_use]
    pub fn selects(&self, scenario: &Scenario) -> bool {
        let tagged = self.tags.is_empty() || self.tags.iter().any(|t| scenario.has_tag(t));
        let named = self
            .name_filter
            .as_deref()
            .map_or(true, |f| scenario.name.contains(f));
        tagged && named
    }

    /// Run every selected scenario of `features` in order
    pub async fn run<D: Driver>(
        &self,
        features: &[Feature],
        registry: &StepRegistry,
        world: &mut World<D>,
    ) -> SuiteReport {
        let start = Instant::now();
        let mut report = SuiteReport::default();

        for feature in features {
            for scenario in feature.scenarios.iter().filter(|s| self.selects(s)) {
                if report.aborted {
                    report.results.push(ScenarioResult::skipped(feature, scenario));
                    continue;
                }
                let (result, fatal) = Self::run_scenario(feature, scenario, registry, world).await;
                let failed = result.status == Status::Failed;
                report.results.push(result);
                if fatal || (failed && self.fail_fast) {
                    warn!(scenario = %scenario.name, fatal, "aborting run");
                    report.aborted = true;
                }
            }
        }

        report.duration_ms = millis(start.elapsed());
        info!(
            passed = report.passed(),
            failed = report.failed(),
            skipped = report.skipped(),
            "run finished"
        );
        report
    }

    async fn run_scenario<D: Driver>(
        feature: &Feature,
        scenario: &Scenario,
        registry: &StepRegistry,
        world: &mut World<D>,
    ) -> (ScenarioResult, bool) {
        let start = Instant::now();
        let mut result = ScenarioResult::skipped(feature, scenario);
        let mut fatal = false;
        info!(scenario = %scenario.name, "scenario started");

        for (step, outcome) in scenario.steps.iter().zip(result.steps.iter_mut()) {
            let run = match registry.resolve(&step.text) {
                Ok(call) => world.execute(&call).await,
                Err(e) => Err(e),
            };
            match run {
                Ok(()) => outcome.status = Status::Passed,
                Err(e) => {
                    error!(scenario = %scenario.name, step = %step.text, error = %e, "step failed");
                    fatal = e.is_fatal();
                    outcome.status = Status::Failed;
                    outcome.error = Some(e.to_string());
                    result.error = Some(e.to_string());
                    break;
                }
            }
        }

        result.status = if result.error.is_some() {
            Status::Failed
        } else {
            Status::Passed
        };
        result.duration_ms = millis(start.elapsed());
        info!(scenario = %scenario.name, status = ?result.status, "scenario finished");
        (result, fatal)
    }
}
