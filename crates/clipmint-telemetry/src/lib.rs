//! Structured logging for the clipmint ingestion services.
//!
//! Binaries call [`Telemetry::init`] once; library crates only use the
//! `log_*!` macros, which stamp every record with a stable `event` field.
//!
//! ```ignore
//! use clipmint_telemetry::{LogFormat, LoggingConfig, Telemetry};
//!
//! let telemetry = Telemetry::init(LoggingConfig::new("clipmint-ingest", "info", LogFormat::Json))?;
//! ```

pub mod config;
pub mod logging;

pub use config::{LogFormat, LoggingConfig, UnknownLogFormat};
pub use logging::events;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TelemetryError {
    /// A global subscriber was already installed.
    #[error("failed to initialize logging: {0}")]
    LoggingInit(String),
}

/// Proof that the global subscriber is installed.
#[derive(Debug)]
pub struct Telemetry {
    config: LoggingConfig,
}

impl Telemetry {
    pub fn init(config: LoggingConfig) -> Result<Self, TelemetryError> {
        logging::install(&config)?;
        Ok(Self { config })
    }

    /// Service name for lifecycle events.
    pub fn service_name(&self) -> &str {
        self.config.service()
    }

    /// Format the subscriber renders in.
    pub fn format(&self) -> LogFormat {
        self.config.format()
    }
}
