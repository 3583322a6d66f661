use serde_derive::Serialize;

use super::Spec;

/// A suite with its nested suites and direct specs, in start order.
#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Suite {
    pub description: String,
    pub passed: bool,
    pub duration: i64,
    pub duration_sec: f64,
    pub suites: Vec<Suite>,
    pub specs: Vec<Spec>,
}

impl Suite {
    /// Number of specs in this suite and every nested suite.
    pub fn spec_count(&self) -> usize {
        self.specs.len() + self.suites.iter().map(Suite::spec_count).sum::<usize>()
    }
}
