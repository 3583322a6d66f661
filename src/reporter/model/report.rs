use serde_derive::Serialize;

use super::{to_seconds, Suite};

/// Final result of a whole run.
#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub passed: bool,
    pub duration_sec: f64,
    pub suites: Vec<Suite>,
}

impl Report {
    /// Builds the report out of root suites, given in the order they started.
    pub fn from_root_suites(suites: Vec<Suite>) -> Self {
        let mut duration = 0;
        let mut passed = true;
        for suite in &suites {
            duration += suite.duration;
            passed = passed && suite.passed;
        }
        Self {
            passed,
            duration_sec: to_seconds(duration),
            suites,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn suite(description: &str, passed: bool, duration: i64) -> Suite {
        Suite {
            description: description.to_owned(),
            passed,
            duration,
            duration_sec: to_seconds(duration),
            suites: vec![],
            specs: vec![],
        }
    }

    #[test]
    fn test_empty_run_passes() {
        let report = Report::from_root_suites(vec![]);

        assert!(report.passed);
        assert_eq!(report.duration_sec, 0.0);
        assert_eq!(report.to_json().unwrap(), r#"{"passed":true,"durationSec":0.0,"suites":[]}"#);
    }

    #[test]
    fn test_rollup_of_root_suites() {
        let report = Report::from_root_suites(vec![suite("A", true, 1200), suite("B", false, 300)]);

        assert!(!report.passed);
        assert_eq!(report.duration_sec, 1.5);
        assert_eq!(report.suites[0].description, "A");
        assert_eq!(report.suites[1].description, "B");
    }
}
