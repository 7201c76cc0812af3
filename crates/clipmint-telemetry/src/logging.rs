//! Global subscriber setup and the `event` vocabulary shared by the
//! ingestion crates.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::{LogFormat, LoggingConfig, TelemetryError};

/// Install the process-wide subscriber.
///
/// Exactly one of the two formatting layers is present; the other is `None`
/// and passes every event through untouched.
pub fn install(config: &LoggingConfig) -> Result<(), TelemetryError> {
    let (json, pretty) = match config.format() {
        LogFormat::Json => (
            Some(
                fmt::layer()
                    .json()
                    .flatten_event(true)
                    .with_current_span(true)
                    .with_span_list(false),
            ),
            None,
        ),
        LogFormat::Pretty => (
            None,
            Some(fmt::layer().pretty().with_file(true).with_line_number(true)),
        ),
    };

    tracing_subscriber::registry()
        .with(config.env_filter())
        .with(json)
        .with(pretty)
        .try_init()
        .map_err(|e| TelemetryError::LoggingInit(e.to_string()))
}

/// Values of the `event` field.
pub mod events {
    pub const STARTUP: &str = "startup";
    pub const SHUTDOWN: &str = "shutdown";
    pub const LISTENING: &str = "listening";

    /// Body split into fields and files.
    pub const UPLOAD_PARSED: &str = "upload_parsed";

    /// Body wrapped in the fallback envelope.
    pub const UPLOAD_DEGRADED: &str = "upload_degraded";

    /// Refused on its content type before the body was read.
    pub const UPLOAD_REJECTED: &str = "upload_rejected";
}

#[doc(hidden)]
#[macro_export]
macro_rules! __log_event {
    ($level:ident, $event:expr, $($field:tt)*) => {
        tracing::$level!(event = $event, $($field)*)
    };
}

/// `info` record tagged `event = "startup"`.
#[macro_export]
macro_rules! log_startup {
    ($($field:tt)*) => { $crate::__log_event!(info, $crate::events::STARTUP, $($field)*) };
}

#[macro_export]
macro_rules! log_shutdown {
    ($($field:tt)*) => { $crate::__log_event!(info, $crate::events::SHUTDOWN, $($field)*) };
}

#[macro_export]
macro_rules! log_listening {
    ($($field:tt)*) => { $crate::__log_event!(info, $crate::events::LISTENING, $($field)*) };
}

/// Logged at `debug`: one per successful upload is too chatty for `info`.
#[macro_export]
macro_rules! log_upload_parsed {
    ($($field:tt)*) => { $crate::__log_event!(debug, $crate::events::UPLOAD_PARSED, $($field)*) };
}

#[macro_export]
macro_rules! log_upload_degraded {
    ($($field:tt)*) => { $crate::__log_event!(warn, $crate::events::UPLOAD_DEGRADED, $($field)*) };
}

#[macro_export]
macro_rules! log_upload_rejected {
    ($($field:tt)*) => { $crate::__log_event!(info, $crate::events::UPLOAD_REJECTED, $($field)*) };
}
