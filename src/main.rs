#[macro_use]
extern crate log;

use log::LevelFilter;
use std::{path::PathBuf, process::exit};
use structopt::StructOpt;

use suite_report::{
    app::App,
    configuration::command_line::{LogLevel, Opt},
    configuration::settings::Settings,
    Error,
};

fn main() {
    let options = Opt::from_args();

    if let Err(e) = init_logging(
        options.logging.unwrap_or(LogLevel::Info).into(),
        &options.log_output_file,
    ) {
        eprintln!("Failed to initialise logging: {}", e);
        exit(2);
    }

    match run(options) {
        Ok(()) => debug!("Done"),
        Err(e) => {
            error!("{}", e);
            exit(1);
        }
    }
}

fn run(options: Opt) -> Result<(), Error> {
    let mut settings = Settings::load(options.config)?;
    if options.output.is_some() {
        settings.output = options.output;
    }
    settings.pretty |= options.pretty;
    debug!("Initiated settings {:#?}", settings);

    App::new(settings).run(options.events.as_deref())
}

fn init_logging(level: LevelFilter, output: &Option<PathBuf>) -> Result<(), fern::InitError> {
    let mut dispatcher = fern::Dispatch::new()
        // Perform allocation-free log formatting
        .format(|out, message, record| {
            out.finish(format_args!(
                "{}[{}:{}][{}] {}",
                chrono::Local::now().format("[%Y-%m-%d][%H:%M:%S]"),
                record.target(),
                record
                    .line()
                    .map(|v| v.to_string())
                    .unwrap_or_else(|| "".to_owned()),
                record.level(),
                message
            ))
        })
        .level(level)
        .chain(std::io::stderr());

    if let Some(log_file) = output {
        dispatcher = dispatcher.chain(fern::log_file(log_file)?)
    }
    dispatcher.apply()?;
    info!("Logging level {} enabled", level);
    Ok(())
}
