pub mod event;

use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;

use crate::app::event::Event;
use crate::configuration::settings::Settings;
use crate::reporter::error::Error;
use crate::reporter::event::EngineInfo;
use crate::reporter::Reporter;
use crate::time::timer::{Clock, SystemClock};

/// Replays a recorded event stream into a [`Reporter`] and writes out the report.
pub struct App<C = SystemClock> {
    settings: Settings,
    clock: C,
}

impl App<SystemClock> {
    pub fn new(settings: Settings) -> Self {
        Self::with_clock(settings, SystemClock)
    }
}

impl<C> App<C>
where
    C: Clock + Clone + 'static,
{
    pub fn with_clock(settings: Settings, clock: C) -> Self {
        Self { settings, clock }
    }

    pub fn run(&self, events: Option<&Path>) -> Result<(), Error> {
        let reporter = match events {
            Some(path) => {
                info!("Replaying events from {}", path.display());
                self.replay(BufReader::new(File::open(path)?))?
            }
            None => {
                info!("Replaying events from stdin");
                self.replay(io::stdin().lock())?
            }
        };
        match &self.settings.output {
            Some(path) => {
                save_into_file(path, &self.render(&reporter)?)?;
                info!("Report written to {}", path.display());
                Ok(())
            }
            None => self.write_report(&reporter, &mut io::stdout().lock()),
        }
    }

    /// Feeds every event of `input` to a fresh reporter. The stream must end
    /// with the run finished.
    pub fn replay<R: BufRead>(&self, input: R) -> Result<Reporter, Error> {
        let mut reporter: Option<Reporter> = None;
        for (index, line) in input.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let event: Event = serde_json::from_str(&line).map_err(|source| Error::Decode {
                line: index + 1,
                source,
            })?;
            trace!("Event {}: {:?}", index + 1, event);
            if let Event::Engine(engine) = &event {
                if reporter.is_some() {
                    return Err(Error::protocol(format!(
                        "engine announced on line {} after the run began",
                        index + 1
                    )));
                }
                reporter = Some(self.attach(Some(engine))?);
                continue;
            }
            if reporter.is_none() {
                reporter = Some(self.attach(self.settings.engine.as_ref())?);
            }
            if let Some(reporter) = reporter.as_mut() {
                event.apply(reporter)?;
            }
        }

        let reporter = match reporter {
            Some(reporter) => reporter,
            None => self.attach(self.settings.engine.as_ref())?,
        };
        if !reporter.is_finished() {
            return Err(Error::protocol("event stream ended before the run finished"));
        }
        Ok(reporter)
    }

    /// The report text as configured, compact or pretty-printed.
    pub fn render(&self, reporter: &Reporter) -> Result<String, Error> {
        let report = reporter.report().ok_or_else(|| {
            Error::protocol("report is not available before the run finished")
        })?;
        if self.settings.pretty {
            return report.to_json_pretty().map_err(Error::Serialize);
        }
        match reporter.report_as_text() {
            Some(text) => Ok(text.to_owned()),
            None => report.to_json().map_err(Error::Serialize),
        }
    }

    pub fn write_report<W: Write>(&self, reporter: &Reporter, writer: &mut W) -> Result<(), Error> {
        writeln!(writer, "{}", self.render(reporter)?)?;
        writer.flush()?;
        Ok(())
    }

    fn attach(&self, engine: Option<&EngineInfo>) -> Result<Reporter, Error> {
        Ok(Reporter::attach(engine)?.clock(self.clock.clone()))
    }
}

/// Writes `text` to `path`, creating parent directories as needed.
pub fn save_into_file(path: &Path, text: &str) -> Result<(), Error> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, text)?;
    Ok(())
}
