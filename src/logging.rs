use crate::models::DecoratorSettings;
use anyhow::{Context, Result};
use camino::Utf8PathBuf;
use std::fs;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Prefix for rotated log files
pub const LOG_PREFIX: &str = "roomdecor";

/// Output options for [`init`]
#[derive(Debug, Clone)]
pub struct LogOptions {
    /// Directory for log files (e.g., "logs")
    pub log_dir: String,

    /// Prefix for log files (e.g., "roomdecor")
    pub log_prefix: String,

    /// Use debug level instead of info
    pub debug_mode: bool,

    /// Write JSON lines to the file instead of plain text
    pub json: bool,

    /// Also log to the terminal
    pub console: bool,
}

impl LogOptions {
    pub fn from_settings(settings: &DecoratorSettings, console: bool) -> Self {
        Self {
            log_dir: settings.log_dir.clone(),
            log_prefix: LOG_PREFIX.to_string(),
            debug_mode: settings.debug_mode,
            json: settings.json_logs,
            console,
        }
    }
}

/// Setup logging with a daily rotating file appender.
///
/// `RUST_LOG` overrides the level chosen by `debug_mode` when it is set.
///
/// # Returns
/// A guard that must be held for the duration of the program to keep logging active
pub fn init(options: &LogOptions) -> Result<WorkerGuard> {
    ensure_log_dir(&options.log_dir)?;

    let file_appender = rolling::daily(&options.log_dir, &options.log_prefix);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // Exactly one of the two file layers is active
    let text_layer = (!options.json).then(|| {
        tracing_subscriber::fmt::layer()
            .with_writer(non_blocking.clone())
            .with_ansi(false) // No ANSI codes in log files
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
    });
    let json_layer = options.json.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(non_blocking)
            .with_target(true)
            .with_thread_ids(true)
    });
    let console_layer = options.console.then(|| {
        tracing_subscriber::fmt::layer()
            .with_ansi(true)
            .with_target(false)
    });

    tracing_subscriber::registry()
        .with(env_filter(options.debug_mode))
        .with(text_layer)
        .with(json_layer)
        .with(console_layer)
        .try_init()
        .context("Failed to install global tracing subscriber")?;

    tracing::info!(
        "Logging initialized: dir={}, prefix={}, debug={}, json={}, console={}",
        options.log_dir,
        options.log_prefix,
        options.debug_mode,
        options.json,
        options.console
    );

    Ok(guard)
}

/// Setup file-only text logging.
pub fn setup_logging(log_dir: &str, log_prefix: &str, debug_mode: bool) -> Result<WorkerGuard> {
    init(&LogOptions {
        log_dir: log_dir.to_string(),
        log_prefix: log_prefix.to_string(),
        debug_mode,
        json: false,
        console: false,
    })
}

fn ensure_log_dir(log_dir: &str) -> Result<()> {
    let log_path = Utf8PathBuf::from(log_dir);
    if !log_path.exists() {
        fs::create_dir_all(&log_path)
            .with_context(|| format!("Failed to create log directory: {}", log_dir))?;
    }
    Ok(())
}

fn env_filter(debug_mode: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if debug_mode {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    })
}
