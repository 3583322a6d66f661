use crate::reporter::cache::Entity;
use crate::reporter::event::{RawSpec, RawSuite};
use crate::reporter::model::{to_seconds, Failure, Spec};
use crate::time::timer::Timer;

const STATUS_PASSED: &str = "passed";
const STATUS_PENDING: &str = "pending";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    NotStarted,
    Started,
    Done,
}

#[derive(Debug, Clone)]
pub struct SuiteRecord {
    pub raw: RawSuite,
    pub phase: Phase,
    pub parent_id: Option<String>,
    pub suites: Vec<String>,
    pub specs: Vec<String>,
    pub passed: bool,
    pub timer: Option<Timer>,
    pub duration: Option<i64>,
}

#[derive(Debug, Clone)]
pub struct SpecRecord {
    pub raw: RawSpec,
    pub phase: Phase,
    pub suite_id: Option<String>,
    pub timer: Option<Timer>,
    pub duration: Option<i64>,
    pub outcome: Option<SpecOutcome>,
}

/// Everything derived from a spec's final payload.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecOutcome {
    pub skipped: bool,
    pub passed: bool,
    pub total_count: u64,
    pub passed_count: u64,
    pub failed_count: u64,
    pub failures: Vec<Failure>,
}

impl Entity for SuiteRecord {
    type Raw = RawSuite;

    const KIND: &'static str = "suite";

    fn id(raw: &RawSuite) -> &str {
        &raw.id
    }

    fn create(raw: &RawSuite) -> Self {
        Self {
            raw: raw.clone(),
            phase: Phase::NotStarted,
            parent_id: None,
            suites: Vec::new(),
            specs: Vec::new(),
            passed: true,
            timer: None,
            duration: None,
        }
    }

    fn raw_mut(&mut self) -> &mut RawSuite {
        &mut self.raw
    }
}

impl Entity for SpecRecord {
    type Raw = RawSpec;

    const KIND: &'static str = "spec";

    fn id(raw: &RawSpec) -> &str {
        &raw.id
    }

    fn create(raw: &RawSpec) -> Self {
        Self {
            raw: raw.clone(),
            phase: Phase::NotStarted,
            suite_id: None,
            timer: None,
            duration: None,
            outcome: None,
        }
    }

    fn raw_mut(&mut self) -> &mut RawSpec {
        &mut self.raw
    }
}

impl SuiteRecord {
    /// Drops what only matters while the suite is open.
    pub fn strip(&mut self) {
        self.timer = None;
        self.raw.full_name = None;
    }
}

impl SpecRecord {
    /// Drops what only matters while the spec is running.
    pub fn strip(&mut self) {
        self.timer = None;
        self.raw.full_name = None;
    }

    /// Reportable form of the spec, once it is done.
    pub fn to_spec(&self) -> Option<Spec> {
        let outcome = self.outcome.as_ref()?;
        let duration = self.duration.unwrap_or(Timer::NOT_STARTED);
        Some(Spec {
            description: self.raw.description.clone().unwrap_or_default(),
            passed: outcome.passed,
            skipped: outcome.skipped,
            duration,
            duration_sec: to_seconds(duration),
            total_count: outcome.total_count,
            passed_count: outcome.passed_count,
            failed_count: outcome.failed_count,
            failures: outcome.failures.clone(),
        })
    }
}

impl From<&RawSpec> for SpecOutcome {
    fn from(raw: &RawSpec) -> Self {
        let status = raw.status.as_deref();
        let skipped = status == Some(STATUS_PENDING);
        let failed = raw.failed_expectations.as_deref().unwrap_or_default();
        Self {
            skipped,
            passed: skipped || status == Some(STATUS_PASSED),
            total_count: raw.total_expectations.unwrap_or(0),
            passed_count: raw.passed_expectations.as_ref().map_or(0, |p| p.len() as u64),
            failed_count: failed.len() as u64,
            failures: failed.iter().map(Failure::from).collect(),
        }
    }
}
