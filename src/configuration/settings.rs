use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use serde_derive::Deserialize;
use std::path::PathBuf;

use crate::configuration::constants::settings::ENV_PREFIX;
use crate::reporter::event::EngineInfo;

/// Settings read from an optional file and `SUITE_REPORT_*` environment variables.
#[derive(Debug, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub output: Option<PathBuf>,
    pub pretty: bool,
    /// Engine to assume when the event stream does not announce one.
    pub engine: Option<EngineInfo>,
}

impl Settings {
    pub fn load(file: Option<PathBuf>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();
        if let Some(file) = file {
            builder = builder.add_source(File::from(file));
        }
        Self::build(builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        ))
    }

    fn build(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        builder.build()?.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    #[test]
    fn test_defaults_without_sources() {
        let settings = Settings::build(Config::builder()).unwrap();

        assert_eq!(settings, Settings::default());
        assert!(!settings.pretty);
    }

    #[test]
    fn test_read_toml_settings() {
        let source = r#"
            output = "target/report.json"
            pretty = true

            [engine]
            name = "jasmine"
            version = "2.4.1"
        "#;
        let builder = Config::builder().add_source(File::from_str(source, FileFormat::Toml));

        let settings = Settings::build(builder).unwrap();

        assert_eq!(settings.output, Some(PathBuf::from("target/report.json")));
        assert!(settings.pretty);
        assert_eq!(settings.engine, Some(EngineInfo::new("jasmine", "2.4.1")));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let result = Settings::load(Some(PathBuf::from("does/not/exist.toml")));

        assert!(result.is_err());
    }
}
