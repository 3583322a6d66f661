#[macro_use]
extern crate log;

pub mod app;
pub mod configuration;
pub mod reporter;
pub mod time;

pub use self::reporter::error::Error;
pub use self::reporter::event::{EngineInfo, RawExpectation, RawSpec, RawSuite};
pub use self::reporter::model::{Failure, Report, Spec, Suite};
pub use self::reporter::{Lifecycle, Reporter};
