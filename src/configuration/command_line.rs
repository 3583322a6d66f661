use crate::configuration::constants::cargo_env::CARGO_PKG_NAME;
use clap::arg_enum;
use log::LevelFilter;
use std::path::PathBuf;
use structopt::StructOpt;

arg_enum! {
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub enum LogLevel {
        Off, Error, Warn, Info, Debug, Trace,
    }
}

#[derive(StructOpt, Debug)]
#[structopt(name = CARGO_PKG_NAME)]
pub struct Opt {
    /// Recorded lifecycle events, one JSON object per line. Reads stdin when omitted
    #[structopt(parse(from_os_str))]
    pub events: Option<PathBuf>,

    /// Set a custom settings file. Supported: YAML, JSON, TOML
    #[structopt(long, short = "c", parse(from_os_str))]
    pub config: Option<PathBuf>,

    /// File to which the JSON report is written, stdout when omitted
    #[structopt(long, short = "o", parse(from_os_str))]
    pub output: Option<PathBuf>,

    /// Pretty-print the JSON report
    #[structopt(long, short = "p")]
    pub pretty: bool,

    /// Sets a logging level
    #[structopt(case_insensitive = true, long, short = "L", possible_values = &LogLevel::variants(), env = "LOG_LEVEL")]
    pub logging: Option<LogLevel>,

    /// File to which application will write logs
    #[structopt(long, short = "O", env = "LOG_OUTPUT_FILE")]
    pub log_output_file: Option<PathBuf>,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_options() {
        let opt = Opt::from_iter(&[
            CARGO_PKG_NAME,
            "events.jsonl",
            "--output",
            "report.json",
            "--pretty",
            "-L",
            "debug",
        ]);

        assert_eq!(opt.events, Some(PathBuf::from("events.jsonl")));
        assert_eq!(opt.output, Some(PathBuf::from("report.json")));
        assert!(opt.pretty);
        assert_eq!(opt.logging, Some(LogLevel::Debug));
        assert!(opt.config.is_none());
    }

    #[test]
    fn test_log_level_conversion() {
        assert_eq!(LevelFilter::from(LogLevel::Off), LevelFilter::Off);
        assert_eq!(LevelFilter::from(LogLevel::Warn), LevelFilter::Warn);
        assert_eq!(LevelFilter::from(LogLevel::Trace), LevelFilter::Trace);
    }
}
