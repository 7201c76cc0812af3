//! What the ingestion binaries tell the logging layer at startup.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Where log records are rendered for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// One flattened JSON object per line, for log shippers.
    #[default]
    Json,
    /// Multi-line output with file and line, for a terminal.
    Pretty,
}

/// A `--log-format` value that is neither `json` nor `pretty`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown log format '{0}' (expected json or pretty)")]
pub struct UnknownLogFormat(pub String);

impl FromStr for LogFormat {
    type Err = UnknownLogFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("json") {
            Ok(Self::Json)
        } else if s.eq_ignore_ascii_case("pretty") {
            Ok(Self::Pretty)
        } else {
            Err(UnknownLogFormat(s.to_string()))
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Json => "json",
            Self::Pretty => "pretty",
        })
    }
}

/// Logging setup for one service process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    service: String,
    directives: String,
    format: LogFormat,
}

impl LoggingConfig {
    /// `directives` is an `EnvFilter` string such as `info` or
    /// `clipmint_multipart=debug,info`.
    pub fn new(service: impl Into<String>, directives: impl Into<String>, format: LogFormat) -> Self {
        Self {
            service: service.into(),
            directives: directives.into(),
            format,
        }
    }

    pub fn service(&self) -> &str {
        &self.service
    }

    pub fn format(&self) -> LogFormat {
        self.format
    }

    /// The filter to install. `RUST_LOG`, when set and valid, replaces the
    /// configured directives.
    pub(crate) fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.directives))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_names_are_case_insensitive() {
        assert_eq!("json".parse::<LogFormat>(), Ok(LogFormat::Json));
        assert_eq!("Pretty".parse::<LogFormat>(), Ok(LogFormat::Pretty));
        assert_eq!(
            "yaml".parse::<LogFormat>(),
            Err(UnknownLogFormat("yaml".to_string()))
        );
    }

    #[test]
    fn format_displays_as_its_flag_value() {
        for format in [LogFormat::Json, LogFormat::Pretty] {
            assert_eq!(format.to_string().parse::<LogFormat>(), Ok(format));
        }
    }

    #[test]
    fn unknown_format_message_names_the_value() {
        let err = "xml".parse::<LogFormat>().unwrap_err();
        assert_eq!(err.to_string(), "unknown log format 'xml' (expected json or pretty)");
    }

    #[test]
    fn config_keeps_service_and_format() {
        let config = LoggingConfig::new("clipmint-ingest", "debug", LogFormat::Pretty);
        assert_eq!(config.service(), "clipmint-ingest");
        assert_eq!(config.format(), LogFormat::Pretty);
    }
}
