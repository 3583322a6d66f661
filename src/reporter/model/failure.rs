use serde_derive::Serialize;
use serde_json::Value;

use crate::reporter::event::RawExpectation;

#[derive(Debug, Serialize, Clone, Copy, PartialEq)]
#[serde(rename_all = "camelCase")]
pub enum FailureKind {
    /// A failed expectation inside a spec.
    Expect,
}

/// One failed assertion of a spec.
#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Failure {
    pub r#type: FailureKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected: Option<Value>,
    pub passed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matcher_name: Option<String>,
    #[serde(with = "crate::reporter::serialize::trace")]
    pub trace: Option<String>,
}

impl From<&RawExpectation> for Failure {
    fn from(expectation: &RawExpectation) -> Self {
        Self {
            r#type: FailureKind::Expect,
            expected: expectation.expected.clone(),
            passed: false,
            message: expectation.message.clone(),
            matcher_name: expectation.matcher_name.clone(),
            trace: expectation.stack.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_failure_wire_format() {
        let failure = Failure::from(&RawExpectation {
            message: Some("Expected 1 to be 2.".to_owned()),
            stack: Some("Error: Expected 1 to be 2.".to_owned()),
            expected: Some(json!(2)),
            matcher_name: Some("toBe".to_owned()),
        });

        assert_eq!(
            serde_json::to_value(&failure).unwrap(),
            json!({
                "type": "expect",
                "expected": 2,
                "passed": false,
                "message": "Expected 1 to be 2.",
                "matcherName": "toBe",
                "trace": { "stack": "Error: Expected 1 to be 2." }
            })
        );
    }

    #[test]
    fn test_failure_keeps_null_expected() {
        let raw: RawExpectation = serde_json::from_value(json!({
            "message": "m",
            "stack": "s",
            "matcherName": "toThrow",
            "expected": null
        }))
        .unwrap();

        assert_eq!(
            serde_json::to_string(&Failure::from(&raw)).unwrap(),
            r#"{"type":"expect","expected":null,"passed":false,"message":"m","matcherName":"toThrow","trace":{"stack":"s"}}"#
        );
    }

    #[test]
    fn test_failure_omits_missing_fields() {
        let failure = Failure::from(&RawExpectation::default());

        assert_eq!(
            serde_json::to_value(&failure).unwrap(),
            json!({ "type": "expect", "passed": false, "trace": {} })
        );
    }
}
