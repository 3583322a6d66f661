use serde_derive::Serialize;

use super::Failure;

/// Outcome of one executed spec.
#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Spec {
    pub description: String,
    pub passed: bool,
    pub skipped: bool,
    pub duration: i64,
    pub duration_sec: f64,
    pub total_count: u64,
    pub passed_count: u64,
    pub failed_count: u64,
    pub failures: Vec<Failure>,
}
