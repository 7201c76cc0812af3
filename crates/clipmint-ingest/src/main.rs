//! clipmint upload ingestion service.
//!
//! `serve` runs the HTTP endpoint that turns multipart video uploads into
//! parsed fields and files; `inspect` runs the same parser over a captured
//! request body on disk.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use clipmint_telemetry::{log_startup, LogFormat, LoggingConfig, Telemetry};

mod api;
mod error;
mod inspect;
mod receipt;
mod server;

use inspect::InspectError;
use server::{ServerConfig, DEFAULT_MAX_BODY_SIZE};

#[derive(Parser, Debug)]
#[command(
    name = "clipmint-ingest",
    about = "clipmint upload ingestion service",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the ingestion HTTP server.
    Serve {
        /// Listen address.
        #[arg(long, env = "CLIPMINT_LISTEN", default_value = "127.0.0.1:8787")]
        listen: SocketAddr,

        /// Maximum request body size in bytes.
        #[arg(long, env = "CLIPMINT_MAX_BODY_SIZE", default_value_t = DEFAULT_MAX_BODY_SIZE)]
        max_body_size: usize,

        /// Log level (overridden by RUST_LOG).
        #[arg(long, env = "CLIPMINT_LOG_LEVEL", default_value = "info")]
        log_level: String,

        /// Log format (json or pretty).
        #[arg(long, env = "CLIPMINT_LOG_FORMAT", default_value = "json")]
        log_format: LogFormat,
    },

    /// Parse a captured request body and print a JSON summary.
    Inspect {
        /// Content-Type header the body was sent with.
        #[arg(long)]
        content_type: String,

        /// Path to the raw body bytes.
        #[arg(long)]
        body: PathBuf,

        /// Include text field values in the output.
        #[arg(long)]
        show_values: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Command::Serve {
            listen,
            max_body_size,
            log_level,
            log_format,
        } => {
            let config = LoggingConfig::new("clipmint-ingest", log_level, log_format);
            let telemetry = match Telemetry::init(config) {
                Ok(t) => t,
                Err(e) => {
                    eprintln!("error: {}", e);
                    return ExitCode::from(1);
                }
            };
            log_startup!(
                service = telemetry.service_name(),
                version = env!("CARGO_PKG_VERSION"),
                log_format = %telemetry.format(),
                "starting"
            );

            let rt = tokio::runtime::Runtime::new().expect("Failed to create runtime");
            rt.block_on(async {
                let config = ServerConfig {
                    listen_addr: listen,
                    max_body_size,
                };
                match server::run(config).await {
                    Ok(()) => ExitCode::SUCCESS,
                    Err(e) => {
                        eprintln!("error: {}", e);
                        ExitCode::from(1)
                    }
                }
            })
        }

        Command::Inspect {
            content_type,
            body,
            show_values,
        } => match inspect::inspect_file(&content_type, &body, show_values) {
            Ok(receipt) => match serde_json::to_string_pretty(&receipt) {
                Ok(json) => {
                    println!("{}", json);
                    if receipt.degraded {
                        eprintln!("warning: body could not be parsed, fallback envelope used");
                    }
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    eprintln!("error: {}", e);
                    ExitCode::from(1)
                }
            },
            Err(e) => {
                eprintln!("error: {}", e);
                // Exit codes:
                // 1 = request rejected (content type / boundary)
                // 3 = I/O error
                match e {
                    InspectError::Rejected(_) => ExitCode::from(1),
                    InspectError::Io { .. } => ExitCode::from(3),
                }
            }
        },
    }
}
