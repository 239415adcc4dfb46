//! Static checks on feature files
//!
//! Catches what would otherwise only fail once a browser is running:
//! steps with no (or several) bindings, scenario keys missing from the
//! store their step reads, option arguments outside the accepted set and
//! negative records whose `errorField` has no inline error element.

use crate::feature::Feature;
use crate::fixture::{TestData, ALL_EMPTY_SCENARIO};
use crate::pages::{CalculatorElement, MaritalStatus, SocialSecurity};
use crate::steps::{DataSource, StepKind, StepRegistry};
use std::fmt;

/// Lint severity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LintSeverity {
    /// Must be fixed
    Error,
    /// Should be reviewed
    Warning,
}

impl fmt::Display for LintSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warning => write!(f, "warning"),
        }
    }
}

/// One finding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintIssue {
    /// Severity level
    pub severity: LintSeverity,
    /// 1-based line in the feature file
    pub line: usize,
    /// Scenario the finding belongs to
    pub scenario: String,
    /// Human-readable message
    pub message: String,
}

impl fmt::Display for LintIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} (line {}, scenario '{}')",
            self.severity, self.message, self.line, self.scenario
        )
    }
}

/// Findings for one feature
#[derive(Debug, Clone, Default)]
pub struct LintReport {
    /// All findings, in file order
    pub issues: Vec<LintIssue>,
    /// Scenarios examined
    pub scenarios_checked: usize,
    /// Steps examined (background steps count once per scenario)
    pub steps_checked: usize,
}

impl LintReport {
    /// Whether any finding is an error
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.issues
            .iter()
            .any(|i| i.severity == LintSeverity::Error)
    }

    /// Number of errors
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == LintSeverity::Error)
            .count()
    }

    fn push(&mut self, severity: LintSeverity, line: usize, scenario: &str, message: String) {
        self.issues.push(LintIssue {
            severity,
            line,
            scenario: scenario.to_string(),
            message,
        });
    }
}

/// Check every step of `feature` against the registry and test data
#[must_use]
pub fn lint_feature(feature: &Feature, registry: &StepRegistry, data: &TestData) -> LintReport {
    let mut report = LintReport::default();
    for scenario in &feature.scenarios {
        report.scenarios_checked += 1;
        if scenario.steps.is_empty() {
            report.push(
                LintSeverity::Warning,
                scenario.line,
                &scenario.name,
                "scenario has no steps".to_string(),
            );
        }
        for step in &scenario.steps {
            report.steps_checked += 1;
            let call = match registry.resolve(&step.text) {
                Ok(call) => call,
                Err(e) => {
                    report.push(LintSeverity::Error, step.line, &scenario.name, e.to_string());
                    continue;
                }
            };
            let Some(arg) = call.arg() else {
                continue;
            };
            if let Some(message) = check_argument(call.kind(), arg, data) {
                report.push(LintSeverity::Error, step.line, &scenario.name, message);
            }
        }
    }
    report
}

fn check_argument(kind: StepKind, arg: &str, data: &TestData) -> Option<String> {
    match kind {
        StepKind::SelectMaritalStatus => arg.parse::<MaritalStatus>().err().map(|e| e.to_string()),
        StepKind::SelectSocialSecurity | StepKind::AssertSocialSecurityFields => {
            arg.parse::<SocialSecurity>().err().map(|e| e.to_string())
        }
        _ => match kind.data_source()? {
            DataSource::Positive => data.positive().get(arg).err().map(|e| e.to_string()),
            DataSource::Outcome => check_outcome_key(arg, data),
        },
    }
}

fn check_outcome_key(key: &str, data: &TestData) -> Option<String> {
    if key == ALL_EMPTY_SCENARIO {
        return match data.negative().get(key) {
            Ok(record) => record.field("errorMsg").err().map(|e| e.to_string()),
            Err(e) => Some(e.to_string()),
        };
    }
    if let Ok(record) = data.negative().get(key) {
        return match record.input("errorField") {
            Ok(field) if CalculatorElement::inline_error_for(&field).is_none() => Some(format!(
                "negative scenario '{key}' names '{field}', which has no inline error"
            )),
            Ok(_) => None,
            Err(e) => Some(e.to_string()),
        };
    }
    if data.positive().contains(key) {
        None
    } else {
        Some(format!("scenario '{key}' not found in positive or negative test data"))
    }
}
