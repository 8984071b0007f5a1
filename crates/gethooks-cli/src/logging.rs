//! Logging initialization

use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::args::{Args, LogFormat};

/// Initialize logging based on CLI arguments
///
/// Diagnostics go to stderr so that list output on stdout stays clean.
pub fn init(args: &Args) -> Result<()> {
    let level = if args.quiet {
        Level::ERROR
    } else {
        match args.verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        }
    };

    let env_filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    let log_file = match args.log_file {
        Some(ref path) => Some(
            std::fs::File::create(path)
                .map(Arc::new)
                .with_context(|| format!("Failed to create log file: {}", path))?,
        ),
        None => None,
    };

    match args.log_format {
        LogFormat::Text => {
            let subscriber = tracing_subscriber::registry().with(env_filter).with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(args.verbose >= 2)
                    .with_file(args.verbose >= 3)
                    .with_line_number(args.verbose >= 3),
            );

            if let Some(file) = log_file {
                subscriber
                    .with(fmt::layer().with_ansi(false).with_writer(file))
                    .init();
            } else {
                subscriber.init();
            }
        }
        LogFormat::Json => {
            let subscriber = tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json().with_writer(std::io::stderr));

            if let Some(file) = log_file {
                subscriber
                    .with(fmt::layer().json().with_writer(file))
                    .init();
            } else {
                subscriber.init();
            }
        }
        LogFormat::Compact => {
            let subscriber = tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().compact().with_writer(std::io::stderr));

            if let Some(file) = log_file {
                subscriber
                    .with(fmt::layer().compact().with_ansi(false).with_writer(file))
                    .init();
            } else {
                subscriber.init();
            }
        }
    }

    Ok(())
}
