use std::{fmt, io};

/// Errors raised while configuring loggers.
///
/// Log calls never fail; these only come out of configuration and setup.
#[derive(Debug)]
pub enum LogError {
    /// The configuration file could not be read.
    ConfigRead { path: String, source: io::Error },
    /// A flag name in a `flags` list is not recognized.
    UnknownFlag(String),
    /// A file sink could not be opened.
    SinkOpen { path: String, source: io::Error },
}

impl fmt::Display for LogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use LogError::*;
        match self {
            ConfigRead { path, source } => write!(f, "error reading file {path}: {source}"),
            UnknownFlag(name) => write!(f, "unknown log flag: {name:?}"),
            SinkOpen { path, source } => write!(f, "cannot open log sink {path}: {source}"),
        }
    }
}

impl std::error::Error for LogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LogError::ConfigRead { source, .. } | LogError::SinkOpen { source, .. } => Some(source),
            LogError::UnknownFlag(_) => None,
        }
    }
}
