//! `nestcheck lint`

use super::load_test_data;
use crate::commands::LintArgs;
use crate::error::{CliError, CliResult};
use crate::output::Reporter;
use nestcheck::{lint_feature, CheckError, Feature, LintIssue, LintSeverity, StepRegistry};
use std::path::Path;
use tracing::debug;

/// Lint every feature file; fails when any file has errors
pub fn execute(args: &LintArgs, out: &Reporter) -> CliResult<()> {
    let data = load_test_data(args.fixtures.as_deref())?;
    let registry = StepRegistry::calculator()?;

    let mut errors = 0;
    for path in &args.features {
        let file = path.display().to_string();
        let issues = lint_file(path, &registry, &data)?;
        let file_errors = issues
            .iter()
            .filter(|i| i.severity == LintSeverity::Error)
            .count();
        debug!(file = %file, issues = issues.len(), "linted");
        out.lint_issues(&file, &issues);
        if file_errors == 0 {
            out.success(&format!("{file}: ok"));
        }
        errors += file_errors;
    }

    if errors > 0 {
        return Err(CliError::Lint { errors });
    }
    Ok(())
}

/// Findings for one file; a parse error becomes a single finding
pub fn lint_file(
    path: &Path,
    registry: &StepRegistry,
    data: &nestcheck::TestData,
) -> CliResult<Vec<LintIssue>> {
    match Feature::load(path) {
        Ok(feature) => Ok(lint_feature(&feature, registry, data).issues),
        Err(CheckError::FeatureParse { line, message }) => Ok(vec![LintIssue {
            severity: LintSeverity::Error,
            line,
            scenario: String::new(),
            message,
        }]),
        // Position is part of the parser's message
        Err(e @ CheckError::Gherkin { .. }) => Ok(vec![LintIssue {
            severity: LintSeverity::Error,
            line: 0,
            scenario: String::new(),
            message: e.to_string(),
        }]),
        Err(e) => Err(e.into()),
    }
}
