//! Test Data Store
//!
//! Two read-only JSON stores keyed by scenario name: `positive` holds form
//! inputs, `negative` holds expected validation outcomes. Each record is a
//! flat field → value mapping. Lookups fail loudly on missing keys or fields
//! so a typo never reaches the page as an empty input.

use crate::result::{CheckError, CheckResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

/// Reserved scenario key for "every required field left empty"
pub const ALL_EMPTY_SCENARIO: &str = "allEmpty";

/// File name of the positive store inside a fixtures directory
pub const POSITIVE_FILE: &str = "positive.json";

/// File name of the negative store inside a fixtures directory
pub const NEGATIVE_FILE: &str = "negative.json";

const BUNDLED_POSITIVE: &str = include_str!("../fixtures/positive.json");
const BUNDLED_NEGATIVE: &str = include_str!("../fixtures/negative.json");

/// Scalar fixture value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// JSON string
    Text(String),
    /// JSON number
    Number(serde_json::Number),
    /// JSON boolean
    Flag(bool),
    /// JSON null
    Empty,
}

impl FieldValue {
    /// Text typed into a form field; null renders as empty
    #[must_use]
    pub fn as_input(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Number(n) => n.to_string(),
            Self::Flag(b) => b.to_string(),
            Self::Empty => String::new(),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_input())
    }
}

/// One row of test data
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioRecord {
    key: String,
    fields: BTreeMap<String, FieldValue>,
}

impl ScenarioRecord {
    /// Create a record
    #[must_use]
    pub fn new(key: impl Into<String>, fields: BTreeMap<String, FieldValue>) -> Self {
        Self {
            key: key.into(),
            fields,
        }
    }

    /// Scenario key
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Field value, failing with `FieldMissing`
    pub fn field(&self, name: &str) -> CheckResult<&FieldValue> {
        self.fields.get(name).ok_or_else(|| CheckError::FieldMissing {
            key: self.key.clone(),
            field: name.to_string(),
        })
    }

    /// Field rendered as form input
    pub fn input(&self, name: &str) -> CheckResult<String> {
        self.field(name).map(FieldValue::as_input)
    }

    /// Field if present
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    /// Field names in sorted order
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }
}

/// A named mapping from scenario key to record
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioStore {
    name: String,
    records: BTreeMap<String, ScenarioRecord>,
}

impl ScenarioStore {
    /// Parse a store from its JSON document
    pub fn from_json(name: impl Into<String>, json: &str) -> CheckResult<Self> {
        let raw: BTreeMap<String, BTreeMap<String, FieldValue>> = serde_json::from_str(json)?;
        let records = raw
            .into_iter()
            .map(|(key, fields)| (key.clone(), ScenarioRecord::new(key, fields)))
            .collect();
        Ok(Self {
            name: name.into(),
            records,
        })
    }

    /// Store name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Record for `key`, failing with `ScenarioNotFound`
    pub fn get(&self, key: &str) -> CheckResult<&ScenarioRecord> {
        self.records
            .get(key)
            .ok_or_else(|| CheckError::ScenarioNotFound {
                store: self.name.clone(),
                key: key.to_string(),
            })
    }

    /// Whether `key` exists
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.records.contains_key(key)
    }

    /// Scenario keys in sorted order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.records.keys().map(String::as_str)
    }

    /// Number of records
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Both stores, loaded once and shared read-only
#[derive(Debug, Clone, PartialEq)]
pub struct TestData {
    positive: ScenarioStore,
    negative: ScenarioStore,
}

impl TestData {
    /// Parse both stores from JSON text
    pub fn from_json_strs(positive: &str, negative: &str) -> CheckResult<Self> {
        Ok(Self {
            positive: ScenarioStore::from_json("positive", positive)?,
            negative: ScenarioStore::from_json("negative", negative)?,
        })
    }

    /// Load `positive.json` and `negative.json` from a directory
    pub fn load_dir(dir: impl AsRef<Path>) -> CheckResult<Self> {
        let dir = dir.as_ref();
        let positive = std::fs::read_to_string(dir.join(POSITIVE_FILE))?;
        let negative = std::fs::read_to_string(dir.join(NEGATIVE_FILE))?;
        let data = Self::from_json_strs(&positive, &negative)?;
        tracing::debug!(
            dir = %dir.display(),
            positive = data.positive.len(),
            negative = data.negative.len(),
            "test data loaded"
        );
        Ok(data)
    }

    /// Fixtures compiled into the crate
    pub fn bundled() -> CheckResult<Self> {
        Self::from_json_strs(BUNDLED_POSITIVE, BUNDLED_NEGATIVE)
    }

    /// Store of valid inputs
    #[must_use]
    pub const fn positive(&self) -> &ScenarioStore {
        &self.positive
    }

    /// Store of expected validation outcomes
    #[must_use]
    pub const fn negative(&self) -> &ScenarioStore {
        &self.negative
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    mod field_value_tests {
        use super::*;

        #[test]
        fn test_as_input() {
            let values: BTreeMap<String, FieldValue> =
                serde_json::from_str(r#"{"a": 30, "b": "50,000", "c": null, "d": true, "e": 2.5}"#)
                    .unwrap();
            assert_eq!(values["a"].as_input(), "30");
            assert_eq!(values["b"].as_input(), "50,000");
            assert_eq!(values["c"].as_input(), "");
            assert_eq!(values["d"].as_input(), "true");
            assert_eq!(values["e"].as_input(), "2.5");
        }

        #[test]
        fn test_negative_number() {
            let v: FieldValue = serde_json::from_str("-5").unwrap();
            assert_eq!(v.as_input(), "-5");
        }

        #[test]
        fn test_nested_value_rejected() {
            let err = ScenarioStore::from_json("positive", r#"{"k": {"f": {"x": 1}}}"#);
            assert!(matches!(err, Err(CheckError::Json(_))));
        }
    }

    mod store_tests {
        use super::*;

        #[test]
        fn test_get_missing_key() {
            let store = ScenarioStore::from_json("positive", r#"{"a": {}}"#).unwrap();
            let err = store.get("b").unwrap_err();
            assert!(matches!(
                err,
                CheckError::ScenarioNotFound { ref store, ref key } if store == "positive" && key == "b"
            ));
        }

        #[test]
        fn test_field_missing() {
            let store = ScenarioStore::from_json("positive", r#"{"a": {"x": 1}}"#).unwrap();
            let record = store.get("a").unwrap();
            assert_eq!(record.input("x").unwrap(), "1");
            assert!(matches!(
                record.input("y").unwrap_err(),
                CheckError::FieldMissing { ref key, ref field } if key == "a" && field == "y"
            ));
        }

        #[test]
        fn test_keys_sorted() {
            let store =
                ScenarioStore::from_json("negative", r#"{"b": {}, "a": {}, "c": {}}"#).unwrap();
            assert_eq!(store.keys().collect::<Vec<_>>(), vec!["a", "b", "c"]);
            assert_eq!(store.len(), 3);
            assert!(!store.is_empty());
        }
    }

    mod test_data_tests {
        use super::*;

        #[test]
        fn test_bundled_has_reserved_scenario() {
            let data = TestData::bundled().unwrap();
            assert!(data.positive().contains(ALL_EMPTY_SCENARIO));
            let expected = data.negative().get(ALL_EMPTY_SCENARIO).unwrap();
            assert!(!expected.input("errorMsg").unwrap().is_empty());
        }

        #[test]
        fn test_bundled_valid_age_30() {
            let data = TestData::bundled().unwrap();
            let record = data.positive().get("validAge30").unwrap();
            assert_eq!(record.input("currentAge").unwrap(), "30");
            assert_eq!(record.input("retiringAge").unwrap(), "65");
            assert_eq!(record.input("currentAnnualIncome").unwrap(), "50000");
        }

        #[test]
        fn test_load_dir() {
            let tmp = tempfile::tempdir().unwrap();
            std::fs::write(tmp.path().join(POSITIVE_FILE), r#"{"k": {"currentAge": 40}}"#)
                .unwrap();
            std::fs::write(tmp.path().join(NEGATIVE_FILE), "{}").unwrap();
            let data = TestData::load_dir(tmp.path()).unwrap();
            assert_eq!(data.positive().get("k").unwrap().input("currentAge").unwrap(), "40");
            assert!(data.negative().is_empty());
        }

        #[test]
        fn test_load_dir_missing_file() {
            let tmp = tempfile::tempdir().unwrap();
            assert!(matches!(
                TestData::load_dir(tmp.path()),
                Err(CheckError::Io(_))
            ));
        }
    }

    proptest! {
        #[test]
        fn prop_text_renders_verbatim(s in "[^\"\\\\]{0,24}") {
            let json = serde_json::to_string(&serde_json::json!({"k": {"f": s.clone()}})).unwrap();
            let store = ScenarioStore::from_json("positive", &json).unwrap();
            prop_assert_eq!(store.get("k").unwrap().input("f").unwrap(), s);
        }

        #[test]
        fn prop_integers_render_as_json(n in any::<i64>()) {
            let json = format!(r#"{{"k": {{"f": {n}}}}}"#);
            let store = ScenarioStore::from_json("positive", &json).unwrap();
            prop_assert_eq!(store.get("k").unwrap().input("f").unwrap(), n.to_string());
        }
    }
}
