//! Booking CLI - command line client for the booking API gateway

mod commands;
mod config;

use anyhow::Result;
use booking_core::FileStorage;
use booking_core::tracing::{InstrumentationConfig, init_tracing};
use booking_http::ApiClient;
use booking_http::client::error::ClientError;
use clap::{Parser, ValueEnum};
use commands::Commands;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Parser)]
#[command(name = "booking")]
#[command(about = "Command line client for the booking API gateway")]
#[command(version)]
struct Cli {
    /// Configuration file (TOML or YAML)
    #[arg(short = 'c', long, global = true)]
    config: Option<PathBuf>,

    /// Set logging level
    #[arg(short = 'l', long, global = true, default_value = "warn")]
    log_level: LogLevel,

    /// Override the token storage file
    #[arg(long, global = true)]
    storage: Option<PathBuf>,

    /// Override the API base URL
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let level = cli.log_level.as_str();
    let instrumentation = InstrumentationConfig::from_env().with_log_level(format!(
        "booking={level},booking_http={level},booking_core={level}"
    ));
    if let Err(err) = init_tracing(&instrumentation) {
        eprintln!("warning: failed to initialize logging: {err}");
    }

    match run(cli).await {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let mut settings = config::Settings::load(cli.config.as_deref())?;
    if let Some(path) = cli.storage {
        settings.storage.path = path;
    }
    if let Some(url) = cli.api_url {
        settings.api.base_url = url;
    }
    debug!(?settings, "settings loaded");

    let client = ApiClient::builder()
        .config(settings.client_config())
        .storage(Arc::new(FileStorage::new(&settings.storage.path)))
        .on_unauthorized(|| info!("session expired, run `booking login` to sign in again"))
        .build()?;

    match cli.command.execute(&client).await {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(err) => {
            report(&err, cli.command.default_message());
            Ok(ExitCode::FAILURE)
        }
    }
}

fn report(err: &ClientError, default_message: &str) {
    debug!(error = %err, "command failed");
    eprintln!("{}", failure_report(err, default_message));
}

/// Text printed for a failed command: `error: <message> [code]`, plus a
/// login hint after a 401
fn failure_report(err: &ClientError, default_message: &str) -> String {
    let message = err.user_message(default_message);
    let mut report = match err.code() {
        Some(code) => format!("error: {message} [{code}]"),
        None => format!("error: {message}"),
    };
    if err.is_unauthorized() {
        report.push_str("\nhint: run `booking login` to sign in again");
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use booking_http::client::error::ErrorPayload;
    use serde_json::json;

    #[test]
    fn report_includes_backend_code() {
        let err = ClientError::BadRequest(ErrorPayload {
            status: 409,
            data: json!({ "detail": { "code": "SLOT_TAKEN", "message": "Slot already booked" } }),
        });
        assert_eq!(
            failure_report(&err, "Could not create the booking"),
            "error: Slot already booked [SLOT_TAKEN]"
        );
    }

    #[test]
    fn report_without_code_uses_default() {
        let err = ClientError::ServerError(ErrorPayload {
            status: 500,
            data: json!({ "detail": { "internal": true } }),
        });
        assert_eq!(
            failure_report(&err, "Could not load your bookings"),
            "error: Could not load your bookings"
        );
    }

    #[test]
    fn report_hints_login_after_unauthorized() {
        let err = ClientError::AuthenticationFailed(ErrorPayload {
            status: 401,
            data: json!({ "detail": "Token has expired" }),
        });
        assert_eq!(
            failure_report(&err, "Login failed"),
            "error: Token has expired\nhint: run `booking login` to sign in again"
        );
    }
}
