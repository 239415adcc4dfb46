//! `nestcheck run`

use super::lint::lint_file;
use crate::commands::RunArgs;
use crate::error::{CliError, CliResult};
use crate::output::Reporter;
use nestcheck::{
    Feature, LintSeverity, ScenarioRunner, StepRegistry, SuiteConfig, SuiteReport, TestData,
};
use std::sync::Arc;
use tracing::info;

/// Layer command-line overrides over the config file (or defaults)
pub fn resolve_config(args: &RunArgs) -> CliResult<SuiteConfig> {
    let mut config = match &args.config {
        Some(path) => SuiteConfig::load(path)?,
        None => SuiteConfig::default(),
    };
    if let Some(url) = &args.base_url {
        config.base_url.clone_from(url);
    }
    if let Some(dir) = &args.fixtures {
        config.fixtures_dir = Some(dir.clone());
    }
    if let Some(dir) = &args.screenshots {
        config.screenshot_dir.clone_from(dir);
        config.screenshots = true;
    }
    if args.no_screenshots {
        config.screenshots = false;
    }
    if args.headed {
        config.headless = false;
    }
    if args.no_sandbox {
        config.sandbox = false;
    }
    if let Some(path) = &args.chromium {
        config.chromium_path = Some(path.clone());
    }
    if let Some(ms) = args.timeout {
        config.element_timeout_ms = ms;
    }
    if args.fail_fast {
        config.fail_fast = true;
    }
    config.validate()?;
    Ok(config)
}

/// Runner with the fail-fast setting and the tag/name filters
#[must_use]
pub fn build_runner(args: &RunArgs, config: &SuiteConfig) -> ScenarioRunner {
    let mut runner = ScenarioRunner::new()
        .with_fail_fast(config.fail_fast)
        .with_tags(args.tag.iter().cloned());
    if let Some(filter) = &args.filter {
        runner = runner.with_name_filter(filter.clone());
    }
    runner
}

/// Parse the feature files and refuse to start a browser if any step is
/// undefined or names missing test data.
pub fn prepare(
    args: &RunArgs,
    registry: &StepRegistry,
    data: &TestData,
    out: &Reporter,
) -> CliResult<Vec<Feature>> {
    let mut errors = 0;
    for path in &args.features {
        let issues: Vec<_> = lint_file(path, registry, data)?
            .into_iter()
            .filter(|i| i.severity == LintSeverity::Error)
            .collect();
        out.lint_issues(&path.display().to_string(), &issues);
        errors += issues.len();
    }
    if errors > 0 {
        return Err(CliError::Lint { errors });
    }
    args.features
        .iter()
        .map(|path| Feature::load(path).map_err(CliError::from))
        .collect()
}

/// Run the features in Chromium and report
pub fn execute(args: &RunArgs, out: &Reporter) -> CliResult<()> {
    let config = resolve_config(args)?;
    let data = Arc::new(config.test_data()?);
    let registry = StepRegistry::calculator()?;
    let features = prepare(args, &registry, &data, out)?;
    let runner = build_runner(args, &config);

    let selected: usize = features
        .iter()
        .map(|f| f.scenarios.iter().filter(|s| runner.selects(s)).count())
        .sum();
    if selected == 0 {
        return Err(CliError::invalid_argument(
            "no scenario matches the given tags and filter",
        ));
    }
    info!(url = %config.base_url, scenarios = selected, "starting run");

    let report = run_in_browser(&config, &features, &registry, &runner, data)?;
    if let Some(path) = &args.report {
        report.write_json(path)?;
        out.info(&format!("report written to {}", path.display()));
    }
    out.suite_report(&report);

    if report.all_passed() {
        Ok(())
    } else {
        Err(CliError::ScenarioFailures {
            failed: report.total() - report.passed(),
            total: report.total(),
        })
    }
}

#[cfg(feature = "browser")]
fn run_in_browser(
    config: &SuiteConfig,
    features: &[Feature],
    registry: &StepRegistry,
    runner: &ScenarioRunner,
    data: Arc<TestData>,
) -> CliResult<SuiteReport> {
    use nestcheck::{CalculatorPage, ChromiumDriver, Session, World};

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::config(format!("Failed to create async runtime: {e}")))?;
    rt.block_on(async move {
        let driver = ChromiumDriver::launch(&config.chromium_config()).await?;
        let session = Session::new(driver)
            .with_wait(config.wait_options())
            .with_screenshots(config.screenshot_sink());
        let mut world = World::new(session, config.main_page(), CalculatorPage::new(data));
        let report = runner.run(features, registry, &mut world).await;
        if let Err(e) = world.into_session().close().await {
            tracing::warn!(error = %e, "browser did not close cleanly");
        }
        Ok::<_, CliError>(report)
    })
}

#[cfg(not(feature = "browser"))]
fn run_in_browser(
    _config: &SuiteConfig,
    _features: &[Feature],
    _registry: &StepRegistry,
    _runner: &ScenarioRunner,
    _data: Arc<TestData>,
) -> CliResult<SuiteReport> {
    Err(CliError::config(
        "browser support not enabled. Rebuild with --features browser",
    ))
}
