use std::fmt;
use std::io;

/// An error raised while collecting or producing a report.
#[derive(Debug)]
#[non_exhaustive]
pub enum Error {
    /// The test engine is missing or cannot drive this reporter.
    Configuration(String),
    /// Lifecycle hooks were called out of their nesting order.
    Protocol(String),
    /// A line of a recorded event stream could not be decoded.
    Decode {
        line: usize,
        source: serde_json::Error,
    },
    Serialize(serde_json::Error),
    Io(io::Error),
}

impl Error {
    pub(crate) fn protocol<S: Into<String>>(message: S) -> Self {
        Error::Protocol(message.into())
    }

    pub(crate) fn configuration<S: Into<String>>(message: S) -> Self {
        Error::Configuration(message.into())
    }
}

impl ::std::error::Error for Error {
    fn source(&self) -> Option<&(dyn ::std::error::Error + 'static)> {
        match *self {
            Error::Decode { ref source, .. } => Some(source),
            Error::Serialize(ref err) => Some(err),
            Error::Io(ref err) => Some(err),
            Error::Configuration(_) | Error::Protocol(_) => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::Configuration(ref err) => write!(f, "Configuration error: {}", err),
            Error::Protocol(ref err) => write!(f, "Protocol violation: {}", err),
            Error::Decode { line, ref source } => {
                write!(f, "Cannot decode event on line {}: {}", line, source)
            }
            Error::Serialize(ref err) => write!(f, "Cannot serialize report: {}", err),
            Error::Io(ref err) => err.fmt(f),
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<config::ConfigError> for Error {
    fn from(err: config::ConfigError) -> Self {
        Error::Configuration(err.to_string())
    }
}
