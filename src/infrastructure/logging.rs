//! Logging system configuration and initialization
//!
//! Sets up tracing with:
//! - `RUST_LOG`-style env filtering, falling back to the configured level
//! - console output in either human-readable or JSON format
//! - optional daily-rolled file output

use anyhow::Result;
use lazy_static::lazy_static;
use std::sync::Mutex;
use tracing::info;
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::{
    layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry,
};

use crate::infrastructure::config::LoggingConfig;

// Keeps the non-blocking file writers alive for the process lifetime.
lazy_static! {
    static ref LOG_GUARDS: Mutex<Vec<non_blocking::WorkerGuard>> = Mutex::new(Vec::new());
}

/// Initialize the logging system. Call once at startup, before anything
/// emits events; a second call returns an error from the subscriber
/// registry.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.clone()));

    let file_layer = if config.file_output {
        let appender = rolling::daily(&config.log_dir, "shop-catalog.log");
        let (writer, guard) = non_blocking(appender);
        if let Ok(mut guards) = LOG_GUARDS.lock() {
            guards.push(guard);
        }
        Some(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false),
        )
    } else {
        None
    };

    if config.json_format {
        Registry::default()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json().boxed())
            .with(file_layer)
            .try_init()?;
    } else {
        Registry::default()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().boxed())
            .with(file_layer)
            .try_init()?;
    }

    info!(
        level = %config.level,
        json = config.json_format,
        file_output = config.file_output,
        "logging initialized"
    );
    Ok(())
}
