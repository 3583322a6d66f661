//! Aggregation of engine lifecycle events into a nested run report.
//!
//! The engine calls the [`Lifecycle`] hooks strictly one at a time, in the
//! nesting order of its suites and specs. [`Reporter`] keeps one record per
//! suite and spec, tracks the currently open suites on a stack and builds
//! the final [`Report`] once the run finishes.

pub mod cache;
pub mod error;
pub mod event;
pub mod model;
pub mod record;
pub mod serialize;

use derivative::*;

use self::cache::EntityCache;
use self::error::Error;
use self::event::{EngineInfo, RawSpec, RawSuite};
use self::model::{to_seconds, Report, Suite};
use self::record::{Phase, SpecOutcome, SpecRecord, SuiteRecord};
use crate::configuration::constants::engine::MIN_LIFECYCLE_MAJOR_VERSION;
use crate::time::timer::{Clock, SystemClock, Timer};

/// Hooks invoked by the test engine during a run.
pub trait Lifecycle {
    fn suite_started(&mut self, suite: &RawSuite) -> Result<(), Error>;
    fn suite_done(&mut self, suite: &RawSuite) -> Result<(), Error>;
    fn spec_started(&mut self, spec: &RawSpec) -> Result<(), Error>;
    fn spec_done(&mut self, spec: &RawSpec) -> Result<(), Error>;
    fn run_finished(&mut self) -> Result<(), Error>;
}

#[derive(Debug)]
struct Finished {
    report: Report,
    text: String,
}

#[derive(Derivative)]
#[derivative(Debug)]
pub struct Reporter {
    specs: EntityCache<SpecRecord>,
    suites: EntityCache<SuiteRecord>,
    root_suites: Vec<String>,
    suite_stack: Vec<String>,
    #[derivative(Debug = "ignore")]
    clock: Box<dyn Clock>,
    finished: Option<Finished>,
}

impl Default for Reporter {
    fn default() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Reporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_clock<C: Clock + 'static>(clock: C) -> Self {
        Self {
            specs: EntityCache::new(),
            suites: EntityCache::new(),
            root_suites: Vec::new(),
            suite_stack: Vec::new(),
            clock: Box::new(clock),
            finished: None,
        }
    }

    /// Creates a reporter for the given engine, failing if there is no engine
    /// or it does not report lifecycle events.
    pub fn attach(engine: Option<&EngineInfo>) -> Result<Self, Error> {
        let engine = engine.ok_or_else(|| Error::configuration("test engine not found"))?;
        if engine.name.trim().is_empty() {
            return Err(Error::configuration("test engine has no name"));
        }
        match engine.major_version() {
            Some(major) if major >= MIN_LIFECYCLE_MAJOR_VERSION => {
                info!("Attached reporter to {} {}", engine.name, engine.version);
                Ok(Self::new())
            }
            _ => Err(Error::configuration(format!(
                "{} {} does not report lifecycle events, version {}.x or newer is required",
                engine.name, engine.version, MIN_LIFECYCLE_MAJOR_VERSION
            ))),
        }
    }

    /// Replaces the clock used to time suites and specs.
    pub fn clock<C: Clock + 'static>(mut self, clock: C) -> Self {
        self.clock = Box::new(clock);
        self
    }

    #[inline]
    pub fn has_suite(&self, id: &str) -> bool {
        self.suites.has(id)
    }

    #[inline]
    pub fn has_spec(&self, id: &str) -> bool {
        self.specs.has(id)
    }

    pub fn suite_count(&self) -> usize {
        self.suites.len()
    }

    pub fn spec_count(&self) -> usize {
        self.specs.len()
    }

    /// Ids of suites started but not yet done, outermost first.
    pub fn open_suites(&self) -> &[String] {
        &self.suite_stack
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.finished.is_some()
    }

    /// The final report, or `None` while the run has not finished.
    pub fn report(&self) -> Option<&Report> {
        self.finished.as_ref().map(|f| &f.report)
    }

    /// The final report as JSON, or `None` while the run has not finished.
    pub fn report_as_text(&self) -> Option<&str> {
        self.finished.as_ref().map(|f| f.text.as_str())
    }

    fn phase_of_suite(&self, id: &str) -> Phase {
        self.suites.get(id).map_or(Phase::NotStarted, |s| s.phase)
    }

    fn phase_of_spec(&self, id: &str) -> Phase {
        self.specs.get(id).map_or(Phase::NotStarted, |s| s.phase)
    }

    fn suite_mut(&mut self, id: &str) -> Result<&mut SuiteRecord, Error> {
        self.suites
            .get_mut(id)
            .ok_or_else(|| Error::protocol(format!("suite '{}' is unknown", id)))
    }

    fn rollup(&mut self, parent_id: Option<&str>, passed: bool) -> Result<(), Error> {
        if let Some(parent_id) = parent_id {
            let parent = self.suite_mut(parent_id)?;
            parent.passed = parent.passed && passed;
        }
        Ok(())
    }

    fn build_suite(&self, id: &str) -> Result<Suite, Error> {
        let record = self
            .suites
            .get(id)
            .ok_or_else(|| Error::protocol(format!("suite '{}' is unknown", id)))?;
        let suites = record
            .suites
            .iter()
            .map(|child| self.build_suite(child))
            .collect::<Result<Vec<_>, _>>()?;
        let specs = record
            .specs
            .iter()
            .map(|spec_id| {
                self.specs
                    .get(spec_id)
                    .and_then(SpecRecord::to_spec)
                    .ok_or_else(|| Error::protocol(format!("spec '{}' never finished", spec_id)))
            })
            .collect::<Result<Vec<_>, _>>()?;
        let duration = record.duration.unwrap_or(Timer::NOT_STARTED);
        Ok(Suite {
            description: record.raw.description.clone().unwrap_or_default(),
            passed: record.passed,
            duration,
            duration_sec: to_seconds(duration),
            suites,
            specs,
        })
    }
}

impl Lifecycle for Reporter {
    fn suite_started(&mut self, raw: &RawSuite) -> Result<(), Error> {
        if self.phase_of_suite(&raw.id) != Phase::NotStarted {
            debug!("Suite '{}' started again, merging payload only", raw.id);
            self.suites.get_or_create(raw);
            return Ok(());
        }
        let parent_id = self.suite_stack.last().cloned();
        let clock = &*self.clock;
        let suite = self.suites.get_or_create(raw);
        suite.suites.clear();
        suite.specs.clear();
        suite.passed = true;
        suite.parent_id = parent_id.clone();
        suite.phase = Phase::Started;
        suite.timer = Some(Timer::new().start_with(clock));

        match parent_id {
            Some(parent_id) => self.suite_mut(&parent_id)?.suites.push(raw.id.clone()),
            None => self.root_suites.push(raw.id.clone()),
        }
        self.suite_stack.push(raw.id.clone());
        debug!("Suite '{}' started at depth {}", raw.id, self.suite_stack.len());
        Ok(())
    }

    fn suite_done(&mut self, raw: &RawSuite) -> Result<(), Error> {
        match self.phase_of_suite(&raw.id) {
            Phase::NotStarted => {
                return Err(Error::protocol(format!(
                    "suite '{}' finished before it started",
                    raw.id
                )))
            }
            Phase::Done => {
                let parent_id = self.suites.get(&raw.id).and_then(|s| s.parent_id.clone());
                if let Some(parent_id) = &parent_id {
                    if self.phase_of_suite(parent_id) != Phase::Started {
                        return Err(Error::protocol(format!(
                            "suite '{}' finished again after its parent '{}'",
                            raw.id, parent_id
                        )));
                    }
                }
                debug!("Suite '{}' finished again, merging payload only", raw.id);
                let suite = self.suites.get_or_create(raw);
                let (parent_id, passed) = (suite.parent_id.clone(), suite.passed);
                return self.rollup(parent_id.as_deref(), passed);
            }
            Phase::Started => {}
        }
        if self.suite_stack.last() != Some(&raw.id) {
            return Err(Error::protocol(format!(
                "suite '{}' finished while '{}' is still open",
                raw.id,
                self.suite_stack.last().map(String::as_str).unwrap_or_default()
            )));
        }

        let clock = &*self.clock;
        let suite = self.suites.get_or_create(raw);
        let duration = suite
            .timer
            .map_or(Timer::NOT_STARTED, |t| t.elapsed_with(clock));
        suite.duration = Some(duration);
        suite.phase = Phase::Done;
        suite.strip();
        let (parent_id, passed) = (suite.parent_id.clone(), suite.passed);

        self.suite_stack.pop();
        debug!(
            "Suite '{}' done in {} ms, passed: {}",
            raw.id, duration, passed
        );
        self.rollup(parent_id.as_deref(), passed)
    }

    fn spec_started(&mut self, raw: &RawSpec) -> Result<(), Error> {
        if self.phase_of_spec(&raw.id) != Phase::NotStarted {
            debug!("Spec '{}' started again, merging payload only", raw.id);
            self.specs.get_or_create(raw);
            return Ok(());
        }
        let suite_id = self.suite_stack.last().cloned().ok_or_else(|| {
            Error::protocol(format!("spec '{}' started outside of any suite", raw.id))
        })?;

        let clock = &*self.clock;
        let spec = self.specs.get_or_create(raw);
        spec.timer = Some(Timer::new().start_with(clock));
        spec.suite_id = Some(suite_id.clone());
        spec.phase = Phase::Started;

        self.suite_mut(&suite_id)?.specs.push(raw.id.clone());
        trace!("Spec '{}' started in suite '{}'", raw.id, suite_id);
        Ok(())
    }

    fn spec_done(&mut self, raw: &RawSpec) -> Result<(), Error> {
        let phase = self.phase_of_spec(&raw.id);
        if phase == Phase::NotStarted {
            return Err(Error::protocol(format!(
                "spec '{}' finished before it started",
                raw.id
            )));
        }
        let suite_id = self
            .specs
            .get(&raw.id)
            .and_then(|s| s.suite_id.clone())
            .ok_or_else(|| Error::protocol(format!("spec '{}' has no suite", raw.id)))?;
        if self.phase_of_suite(&suite_id) != Phase::Started {
            return Err(Error::protocol(format!(
                "spec '{}' finished after its suite '{}'",
                raw.id, suite_id
            )));
        }

        let clock = &*self.clock;
        let spec = self.specs.get_or_create(raw);
        if spec.phase == Phase::Started {
            let duration = spec
                .timer
                .map_or(Timer::NOT_STARTED, |t| t.elapsed_with(clock));
            spec.duration = Some(duration);
            spec.phase = Phase::Done;
        }
        let outcome = SpecOutcome::from(&spec.raw);
        let passed = outcome.passed;
        if !passed {
            debug!(
                "Spec '{}' failed with {} failed expectations",
                raw.id, outcome.failed_count
            );
        }
        spec.outcome = Some(outcome);
        spec.strip();

        self.rollup(Some(&suite_id), passed)
    }

    fn run_finished(&mut self) -> Result<(), Error> {
        if self.is_finished() {
            debug!("Run already finished, keeping the existing report");
            return Ok(());
        }
        if let Some(open) = self.suite_stack.last() {
            return Err(Error::protocol(format!(
                "run finished while suite '{}' is still open",
                open
            )));
        }
        if let Some(open) = self.specs.values().find(|s| s.phase == Phase::Started) {
            return Err(Error::protocol(format!(
                "run finished while spec '{}' is still running",
                open.raw.id
            )));
        }

        let suites = self
            .root_suites
            .iter()
            .map(|id| self.build_suite(id))
            .collect::<Result<Vec<_>, _>>()?;
        let report = Report::from_root_suites(suites);
        let text = report.to_json().map_err(Error::Serialize)?;
        info!(
            "Run finished: {} suites, {} specs, passed: {}, {}s",
            self.suites.len(),
            self.specs.len(),
            report.passed,
            report.duration_sec
        );
        self.finished = Some(Finished { report, text });
        Ok(())
    }
}
