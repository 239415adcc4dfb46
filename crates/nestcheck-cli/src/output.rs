//! Console output for run reports, lint findings and listings

use console::{style, Term};
use nestcheck::{LintIssue, LintSeverity, Status, SuiteReport};

/// Writes human-readable output to stdout
#[derive(Debug)]
pub struct Reporter {
    term: Term,
    /// Whether to use colors
    pub use_color: bool,
    /// Quiet mode
    pub quiet: bool,
}

impl Default for Reporter {
    fn default() -> Self {
        Self::new(true, false)
    }
}

impl Reporter {
    /// Create a reporter
    #[must_use]
    pub fn new(use_color: bool, quiet: bool) -> Self {
        Self {
            term: Term::stdout(),
            use_color,
            quiet,
        }
    }

    fn line(&self, text: &str) {
        let _ = self.term.write_line(text);
    }

    fn marker(&self, status: Status) -> String {
        match (status, self.use_color) {
            (Status::Passed, true) => style("✓").green().bold().to_string(),
            (Status::Failed, true) => style("✗").red().bold().to_string(),
            (Status::Skipped, true) => style("-").yellow().to_string(),
            (Status::Passed, false) => "PASS".to_string(),
            (Status::Failed, false) => "FAIL".to_string(),
            (Status::Skipped, false) => "SKIP".to_string(),
        }
    }

    /// Print a plain line unless quiet
    pub fn info(&self, message: &str) {
        if !self.quiet {
            self.line(message);
        }
    }

    /// Print a section heading unless quiet
    pub fn heading(&self, title: &str) {
        if self.quiet {
            return;
        }
        if self.use_color {
            self.line(&style(title).bold().underlined().to_string());
        } else {
            self.line(title);
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        if !self.quiet {
            self.line(&format!("{} {message}", self.marker(Status::Passed)));
        }
    }

    /// Print a failure message; shown even in quiet mode
    pub fn failure(&self, message: &str) {
        self.line(&format!("{} {message}", self.marker(Status::Failed)));
    }

    /// Print a run report: one line per scenario, failing steps, totals
    pub fn suite_report(&self, report: &SuiteReport) {
        for result in &report.results {
            if result.status == Status::Failed {
                self.line(&format!("{} {}", self.marker(result.status), result.name));
                for step in result.steps.iter().filter(|s| s.status == Status::Failed) {
                    self.line(&format!(
                        "    line {}: {} {}",
                        step.line, step.keyword, step.text
                    ));
                    if let Some(error) = &step.error {
                        self.line(&format!("    {error}"));
                    }
                }
            } else if !self.quiet {
                self.line(&format!("{} {}", self.marker(result.status), result.name));
            }
        }

        let summary = format!(
            "{} scenarios: {} passed, {} failed, {} skipped ({} ms)",
            report.total(),
            report.passed(),
            report.failed(),
            report.skipped(),
            report.duration_ms
        );
        if report.all_passed() {
            self.success(&summary);
        } else {
            self.failure(&summary);
        }
    }

    /// Print lint findings for one file
    pub fn lint_issues(&self, file: &str, issues: &[LintIssue]) {
        for issue in issues {
            let label = match (issue.severity, self.use_color) {
                (LintSeverity::Error, true) => style("error").red().bold().to_string(),
                (LintSeverity::Warning, true) => style("warning").yellow().bold().to_string(),
                (severity, false) => severity.to_string(),
            };
            if issue.severity == LintSeverity::Warning && self.quiet {
                continue;
            }
            let location = match (issue.line, issue.scenario.as_str()) {
                (0, _) => file.to_string(),
                (line, "") => format!("{file}:{line}"),
                (line, scenario) => format!("{file}:{line}, scenario '{scenario}'"),
            };
            self.line(&format!("{label}: {} ({location})", issue.message));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_markers() {
        let reporter = Reporter::new(false, false);
        assert_eq!(reporter.marker(Status::Passed), "PASS");
        assert_eq!(reporter.marker(Status::Failed), "FAIL");
        assert_eq!(reporter.marker(Status::Skipped), "SKIP");
    }

    #[test]
    fn test_default_uses_color() {
        let reporter = Reporter::default();
        assert!(reporter.use_color);
        assert!(!reporter.quiet);
    }
}
