//! Step Binding Layer
//!
//! Maps scenario step text to page operations through anchored regular
//! expressions. A quoted argument (`"validAge30"`, `"yes"`) is captured and
//! handed to the page method unchanged.

use crate::result::{CheckError, CheckResult};
use regex::Regex;
use std::fmt;

/// Operation a step binds to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepKind {
    /// `MainPage::launch`
    LaunchCalculator,
    /// `CalculatorPage::enter_customer_details`
    FillCustomerDetails,
    /// `CalculatorPage::select_marital_status`
    SelectMaritalStatus,
    /// `CalculatorPage::select_social_security`
    SelectSocialSecurity,
    /// `CalculatorPage::assert_social_security_fields_visible`
    AssertSocialSecurityFields,
    /// `CalculatorPage::enter_default_overrides`
    ChangeDefaultValues,
    /// `CalculatorPage::assert_default_overrides_persisted`
    AssertDefaultValuesPersisted,
    /// `CalculatorPage::submit_form`
    SubmitForm,
    /// `CalculatorPage::validate_outcome`
    ValidateOutcome,
    /// `CalculatorPage::assert_result_visible`
    AssertResultVisible,
}

/// Which test-data store a step reads its quoted key from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSource {
    /// Form inputs only
    Positive,
    /// Expected outcome: negative store for error cases, positive otherwise
    Outcome,
}

const QUOTED: &str = r#""([^"]*)""#;

impl StepKind {
    /// Every binding, in registration order
    pub const ALL: [Self; 10] = [
        Self::LaunchCalculator,
        Self::FillCustomerDetails,
        Self::SelectMaritalStatus,
        Self::SelectSocialSecurity,
        Self::AssertSocialSecurityFields,
        Self::ChangeDefaultValues,
        Self::AssertDefaultValuesPersisted,
        Self::SubmitForm,
        Self::ValidateOutcome,
        Self::AssertResultVisible,
    ];

    /// Human-readable step text with the argument as a placeholder
    #[must_use]
    pub const fn template(self) -> &'static str {
        match self {
            Self::LaunchCalculator => "User is on the pre-retirement calculator page",
            Self::FillCustomerDetails => {
                "User fills \"<key>\" fields on the pre-retirement calculator page"
            }
            Self::SelectMaritalStatus => {
                "User selects marital status as \"<status>\" on the pre-retirement calculator page"
            }
            Self::SelectSocialSecurity => {
                "User selects social security field as \"<option>\" on the pre-retirement calculator page"
            }
            Self::AssertSocialSecurityFields => "social security benefits \"<option>\" visible",
            Self::ChangeDefaultValues => {
                "User changes the \"<key>\" calculator values on the pre-retirement calculator page"
            }
            Self::AssertDefaultValuesPersisted => {
                "User sees the \"<key>\" calculator values persisted"
            }
            Self::SubmitForm => "User submits the retirement calculator form",
            Self::ValidateOutcome => {
                "User is able to see message for \"<key>\" with retirement saving amount"
            }
            Self::AssertResultVisible => "User is able to see message with retirement saving amount",
        }
    }

    /// Anchored pattern matching this step's text
    #[must_use]
    pub fn pattern(self) -> String {
        let template = self.template();
        let escaped = match (template.find("\"<"), template.find(">\"")) {
            (Some(start), Some(end)) => format!(
                "{}{QUOTED}{}",
                regex::escape(&template[..start]),
                regex::escape(&template[end + 2..])
            ),
            _ => regex::escape(template),
        };
        format!("^{escaped}$")
    }

    /// Whether the step captures a quoted argument
    #[must_use]
    pub const fn takes_argument(self) -> bool {
        !matches!(
            self,
            Self::LaunchCalculator | Self::SubmitForm | Self::AssertResultVisible
        )
    }

    /// Store the quoted argument names a scenario key in, if any
    #[must_use]
    pub const fn data_source(self) -> Option<DataSource> {
        match self {
            Self::FillCustomerDetails
            | Self::ChangeDefaultValues
            | Self::AssertDefaultValuesPersisted => Some(DataSource::Positive),
            Self::ValidateOutcome => Some(DataSource::Outcome),
            _ => None,
        }
    }
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.template())
    }
}

/// A resolved step: what to run and with which argument
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepCall {
    kind: StepKind,
    arg: Option<String>,
}

impl StepCall {
    /// Build a call directly, bypassing text matching
    #[must_use]
    pub fn new(kind: StepKind, arg: Option<String>) -> Self {
        Self { kind, arg }
    }

    /// Bound operation
    #[must_use]
    pub const fn kind(&self) -> StepKind {
        self.kind
    }

    /// Captured argument, if any
    #[must_use]
    pub fn arg(&self) -> Option<&str> {
        self.arg.as_deref()
    }

    /// Captured argument, failing when the binding has none
    pub fn required_arg(&self) -> CheckResult<&str> {
        self.arg().ok_or_else(|| CheckError::UndefinedStep {
            text: format!("{} (missing quoted argument)", self.kind),
        })
    }
}

#[derive(Debug, Clone)]
struct Binding {
    regex: Regex,
    kind: StepKind,
}

/// Table of step bindings
#[derive(Debug, Clone, Default)]
pub struct StepRegistry {
    bindings: Vec<Binding>,
}

impl StepRegistry {
    /// Empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the calculator vocabulary
    pub fn calculator() -> CheckResult<Self> {
        let mut registry = Self::new();
        for kind in StepKind::ALL {
            registry.register(&kind.pattern(), kind)?;
        }
        Ok(registry)
    }

    /// Add a binding
    pub fn register(&mut self, pattern: &str, kind: StepKind) -> CheckResult<()> {
        let regex = Regex::new(pattern)
            .map_err(|e| CheckError::config(format!("invalid step pattern '{pattern}': {e}")))?;
        self.bindings.push(Binding { regex, kind });
        Ok(())
    }

    /// Number of bindings
    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Whether no bindings are registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Registered patterns with their operation
    pub fn patterns(&self) -> impl Iterator<Item = (&str, StepKind)> {
        self.bindings.iter().map(|b| (b.regex.as_str(), b.kind))
    }

    /// Match step text (keyword already stripped) to exactly one binding
    pub fn resolve(&self, text: &str) -> CheckResult<StepCall> {
        let text = text.trim();
        let mut matches = self
            .bindings
            .iter()
            .filter_map(|b| b.regex.captures(text).map(|caps| (b, caps)));

        let Some((binding, caps)) = matches.next() else {
            return Err(CheckError::UndefinedStep {
                text: text.to_string(),
            });
        };
        let rest: Vec<&Binding> = matches.map(|(b, _)| b).collect();
        if !rest.is_empty() {
            let patterns = std::iter::once(binding)
                .chain(rest)
                .map(|b| b.regex.as_str().to_string())
                .collect();
            return Err(CheckError::AmbiguousStep {
                text: text.to_string(),
                patterns,
            });
        }

        let arg = caps.get(1).map(|m| m.as_str().to_string());
        Ok(StepCall::new(binding.kind, arg))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> StepRegistry {
        StepRegistry::calculator().unwrap()
    }

    mod pattern_tests {
        use super::*;

        #[test]
        fn test_patterns_are_anchored() {
            for kind in StepKind::ALL {
                let pattern = kind.pattern();
                assert!(pattern.starts_with('^') && pattern.ends_with('$'), "{pattern}");
            }
        }

        #[test]
        fn test_every_template_resolves_to_itself() {
            let registry = registry();
            for kind in StepKind::ALL {
                let text = kind
                    .template()
                    .replace("<key>", "validAge30")
                    .replace("<status>", "single")
                    .replace("<option>", "yes");
                let call = registry.resolve(&text).unwrap();
                assert_eq!(call.kind(), kind);
                assert_eq!(call.arg().is_some(), kind.takes_argument(), "{kind:?}");
            }
        }

        #[test]
        fn test_vocabulary_size() {
            assert_eq!(registry().len(), 10);
            assert_eq!(registry().patterns().count(), 10);
        }
    }

    mod resolve_tests {
        use super::*;

        #[test]
        fn test_captures_scenario_key() {
            let call = registry()
                .resolve(r#"User fills "negativeAge" fields on the pre-retirement calculator page"#)
                .unwrap();
            assert_eq!(call.kind(), StepKind::FillCustomerDetails);
            assert_eq!(call.arg(), Some("negativeAge"));
        }

        #[test]
        fn test_message_steps_are_distinct() {
            let registry = registry();
            let with_key = registry
                .resolve(r#"User is able to see message for "allEmpty" with retirement saving amount"#)
                .unwrap();
            let without = registry
                .resolve("User is able to see message with retirement saving amount")
                .unwrap();
            assert_eq!(with_key.kind(), StepKind::ValidateOutcome);
            assert_eq!(without.kind(), StepKind::AssertResultVisible);
            assert_eq!(without.arg(), None);
        }

        #[test]
        fn test_surrounding_whitespace_ignored() {
            let call = registry()
                .resolve("  User submits the retirement calculator form ")
                .unwrap();
            assert_eq!(call.kind(), StepKind::SubmitForm);
        }

        #[test]
        fn test_empty_argument_captured() {
            let call = registry()
                .resolve(r#"social security benefits "" visible"#)
                .unwrap();
            assert_eq!(call.arg(), Some(""));
        }

        #[test]
        fn test_undefined_step() {
            let err = registry()
                .resolve("User submits the form twice")
                .unwrap_err();
            assert!(matches!(err, CheckError::UndefinedStep { ref text } if text == "User submits the form twice"));
        }

        #[test]
        fn test_partial_text_does_not_match() {
            let err = registry()
                .resolve("User submits the retirement calculator form again")
                .unwrap_err();
            assert!(matches!(err, CheckError::UndefinedStep { .. }));
        }

        #[test]
        fn test_ambiguous_step() {
            let mut registry = registry();
            registry
                .register(r"^User submits the .* form$", StepKind::SubmitForm)
                .unwrap();
            let err = registry
                .resolve("User submits the retirement calculator form")
                .unwrap_err();
            match err {
                CheckError::AmbiguousStep { patterns, .. } => assert_eq!(patterns.len(), 2),
                other => panic!("unexpected error: {other}"),
            }
        }

        #[test]
        fn test_invalid_pattern_rejected() {
            let err = StepRegistry::new()
                .register("^(unclosed$", StepKind::SubmitForm)
                .unwrap_err();
            assert!(matches!(err, CheckError::Config { .. }));
        }
    }

    mod call_tests {
        use super::*;

        #[test]
        fn test_required_arg() {
            let call = StepCall::new(StepKind::FillCustomerDetails, None);
            assert!(call.required_arg().is_err());
            let call = StepCall::new(StepKind::FillCustomerDetails, Some("validAge30".into()));
            assert_eq!(call.required_arg().unwrap(), "validAge30");
        }

        #[test]
        fn test_data_sources() {
            assert_eq!(
                StepKind::FillCustomerDetails.data_source(),
                Some(DataSource::Positive)
            );
            assert_eq!(
                StepKind::ValidateOutcome.data_source(),
                Some(DataSource::Outcome)
            );
            assert_eq!(StepKind::SelectMaritalStatus.data_source(), None);
        }
    }
}
