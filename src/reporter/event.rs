//! Payloads delivered by the test engine with each lifecycle hook.
//!
//! Only the fields read by the reporter are modelled; anything else the
//! engine sends is ignored on deserialization.

use serde_derive::Deserialize;
use serde_json::Value;

/// Field-by-field overwrite of `self` with every field present in `other`.
pub trait Merge {
    fn merge(&mut self, other: &Self);
}

macro_rules! merge_present {
    ($target: expr, $source: expr, $($field: ident),+) => {
        $(
            if $source.$field.is_some() {
                $target.$field = $source.$field.clone();
            }
        )+
    };
}

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RawSuite {
    pub id: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RawSpec {
    pub id: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub failed_expectations: Option<Vec<RawExpectation>>,
    #[serde(default)]
    pub total_expectations: Option<u64>,
    #[serde(default)]
    pub passed_expectations: Option<Vec<RawExpectation>>,
}

/// One assertion result as reported by the engine.
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RawExpectation {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub stack: Option<String>,
    /// `Some(Value::Null)` when the engine sent an explicit `null`.
    #[serde(default, deserialize_with = "crate::reporter::serialize::present::deserialize")]
    pub expected: Option<Value>,
    #[serde(default)]
    pub matcher_name: Option<String>,
}

/// Identity of the engine a reporter gets attached to.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct EngineInfo {
    pub name: String,
    pub version: String,
}

impl EngineInfo {
    pub fn new<N: Into<String>, V: Into<String>>(name: N, version: V) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }

    pub fn major_version(&self) -> Option<u64> {
        self.version.split('.').next()?.trim().parse().ok()
    }
}

impl Merge for RawSuite {
    fn merge(&mut self, other: &Self) {
        self.id = other.id.clone();
        merge_present!(self, other, description, full_name, status);
    }
}

impl Merge for RawSpec {
    fn merge(&mut self, other: &Self) {
        self.id = other.id.clone();
        merge_present!(
            self,
            other,
            description,
            full_name,
            status,
            failed_expectations,
            total_expectations,
            passed_expectations
        );
    }
}
