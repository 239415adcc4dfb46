//! Feature files
//!
//! Parsing is done by the `gherkin` crate. The resulting AST is flattened
//! into runnable scenarios: background steps (feature and rule level) are
//! prepended, tags are inherited from the feature, rule and examples table,
//! and outlines are expanded one scenario per examples row.

use crate::result::{CheckError, CheckResult};
use crate::steps::{DataSource, StepRegistry};
use gherkin::GherkinEnv;
use std::path::Path;

/// One step line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    /// Keyword as written (`Given`, `And`, `*` ...)
    pub keyword: String,
    /// Step text after the keyword
    pub text: String,
    /// 1-based source line
    pub line: usize,
}

impl Step {
    fn from_gherkin(step: &gherkin::Step) -> Self {
        Self {
            keyword: step.keyword.trim().to_string(),
            text: step.value.trim().to_string(),
            line: step.position.line,
        }
    }
}

/// A runnable scenario
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scenario {
    /// Scenario name; outline rows get an `(example N)` suffix
    pub name: String,
    /// Tags without `@`, inherited tags included
    pub tags: Vec<String>,
    /// Background steps followed by the scenario's own
    pub steps: Vec<Step>,
    /// 1-based line of the `Scenario` keyword
    pub line: usize,
}

impl Scenario {
    /// Whether the scenario carries `tag` (with or without `@`)
    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        let tag = tag.trim_start_matches('@');
        self.tags.iter().any(|t| t == tag)
    }
}

/// A quoted scenario key referenced by a data-driven step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyReference {
    /// Scenario key
    pub key: String,
    /// Store the step reads it from
    pub source: DataSource,
    /// Scenario the step belongs to
    pub scenario: String,
    /// 1-based source line of the step
    pub line: usize,
}

/// A parsed feature file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feature {
    /// Feature name
    pub name: String,
    /// Feature-level tags without `@`
    pub tags: Vec<String>,
    /// Scenarios in file order
    pub scenarios: Vec<Scenario>,
}

fn strip_tags(tags: &[String]) -> impl Iterator<Item = String> + '_ {
    tags.iter().map(|t| t.trim_start_matches('@').to_string())
}

fn substitute(text: &str, header: &[String], row: &[String]) -> String {
    header
        .iter()
        .zip(row)
        .fold(text.to_string(), |acc, (name, value)| {
            acc.replace(&format!("<{name}>"), value)
        })
}

fn is_outline(scenario: &gherkin::Scenario) -> bool {
    !scenario.examples.is_empty()
        || scenario.keyword.contains("Outline")
        || scenario.keyword.contains("Template")
}

/// Steps, tags and scenarios are collected per container (feature or rule)
struct Flattener<'a> {
    background: Vec<Step>,
    tags: Vec<String>,
    out: &'a mut Vec<Scenario>,
}

impl Flattener<'_> {
    fn push(&mut self, scenario: &gherkin::Scenario) -> CheckResult<()> {
        let mut tags = self.tags.clone();
        tags.extend(strip_tags(&scenario.tags));
        let own: Vec<Step> = scenario.steps.iter().map(Step::from_gherkin).collect();
        let line = scenario.position.line;

        if !is_outline(scenario) {
            let mut steps = self.background.clone();
            steps.extend(own);
            self.out.push(Scenario {
                name: scenario.name.trim().to_string(),
                tags,
                steps,
                line,
            });
            return Ok(());
        }

        let mut expanded = 0;
        for examples in &scenario.examples {
            let Some(table) = &examples.table else {
                continue;
            };
            let Some((header, rows)) = table.rows.split_first() else {
                continue;
            };
            for (index, row) in rows.iter().enumerate() {
                if row.len() != header.len() {
                    return Err(CheckError::FeatureParse {
                        line: table.position.line + index + 1,
                        message: format!(
                            "row has {} cells, header has {}",
                            row.len(),
                            header.len()
                        ),
                    });
                }
                expanded += 1;
                let mut row_tags = tags.clone();
                row_tags.extend(strip_tags(&examples.tags));
                let mut steps = self.background.clone();
                steps.extend(own.iter().map(|step| Step {
                    text: substitute(&step.text, header, row),
                    ..step.clone()
                }));
                self.out.push(Scenario {
                    name: format!("{} (example {expanded})", scenario.name.trim()),
                    tags: row_tags,
                    steps,
                    line,
                });
            }
        }
        if expanded == 0 {
            return Err(CheckError::FeatureParse {
                line,
                message: format!("Scenario Outline '{}' has no Examples rows", scenario.name.trim()),
            });
        }
        Ok(())
    }
}

impl Feature {
    /// Parse feature source text
    pub fn parse(source: &str) -> CheckResult<Self> {
        let parsed = gherkin::Feature::parse(source, GherkinEnv::default()).map_err(|e| {
            CheckError::Gherkin {
                message: e.to_string(),
            }
        })?;
        Self::from_gherkin(&parsed)
    }

    /// Read and parse a feature file
    pub fn load(path: impl AsRef<Path>) -> CheckResult<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::parse(&source)
    }

    /// Flatten a `gherkin` AST into runnable scenarios
    pub fn from_gherkin(feature: &gherkin::Feature) -> CheckResult<Self> {
        let tags: Vec<String> = strip_tags(&feature.tags).collect();
        let background: Vec<Step> = feature
            .background
            .iter()
            .flat_map(|b| b.steps.iter().map(Step::from_gherkin))
            .collect();

        let mut scenarios = Vec::new();
        let mut top = Flattener {
            background: background.clone(),
            tags: tags.clone(),
            out: &mut scenarios,
        };
        for scenario in &feature.scenarios {
            top.push(scenario)?;
        }
        for rule in &feature.rules {
            let mut rule_background = background.clone();
            rule_background.extend(
                rule.background
                    .iter()
                    .flat_map(|b| b.steps.iter().map(Step::from_gherkin)),
            );
            let mut rule_tags = tags.clone();
            rule_tags.extend(strip_tags(&rule.tags));
            let mut within = Flattener {
                background: rule_background,
                tags: rule_tags,
                out: &mut scenarios,
            };
            for scenario in &rule.scenarios {
                within.push(scenario)?;
            }
        }

        Ok(Self {
            name: feature.name.trim().to_string(),
            tags,
            scenarios,
        })
    }

    /// Quoted scenario keys referenced by data-driven steps, in file order.
    /// Steps that do not resolve are reported as errors.
    pub fn scenario_keys(&self, registry: &StepRegistry) -> CheckResult<Vec<KeyReference>> {
        let mut keys = Vec::new();
        for scenario in &self.scenarios {
            for step in &scenario.steps {
                let call = registry.resolve(&step.text)?;
                if let (Some(source), Some(key)) = (call.kind().data_source(), call.arg()) {
                    keys.push(KeyReference {
                        key: key.to_string(),
                        source,
                        scenario: scenario.name.clone(),
                        line: step.line,
                    });
                }
            }
        }
        Ok(keys)
    }
}
