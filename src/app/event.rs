use serde_derive::Deserialize;

use crate::reporter::error::Error;
use crate::reporter::event::{EngineInfo, RawSpec, RawSuite};
use crate::reporter::Lifecycle;

/// One line of a recorded event stream, e.g.
/// `{"event": "specDone", "payload": {"id": "spec0", "status": "passed"}}`.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(tag = "event", content = "payload", rename_all = "camelCase")]
pub enum Event {
    Engine(EngineInfo),
    SuiteStarted(RawSuite),
    SuiteDone(RawSuite),
    SpecStarted(RawSpec),
    SpecDone(RawSpec),
    #[serde(alias = "jasmineDone")]
    RunFinished,
}

impl Event {
    pub fn apply<L: Lifecycle>(&self, lifecycle: &mut L) -> Result<(), Error> {
        match self {
            Event::Engine(_) => Ok(()),
            Event::SuiteStarted(suite) => lifecycle.suite_started(suite),
            Event::SuiteDone(suite) => lifecycle.suite_done(suite),
            Event::SpecStarted(spec) => lifecycle.spec_started(spec),
            Event::SpecDone(spec) => lifecycle.spec_done(spec),
            Event::RunFinished => lifecycle.run_finished(),
        }
    }
}
