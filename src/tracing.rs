//! Log output for the `reduced-model` binary
//!
//! The library never installs a subscriber. It emits `trace` events for each
//! edit and walk, and `debug` events when an edit is rejected or a document
//! is loaded. This module wires those events to stderr and a log file.
//!
//! `RUST_LOG` picks what reaches stderr (`warn` when unset), e.g.
//! `RUST_LOG=reduced_model::model=trace` to follow every propagation walk.
//! The file under [`crate::config_paths::logs_dir`] always records `debug`
//! and above, one file per day.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// File name prefix of the rolling log
pub const LOG_FILE: &str = "reduced-model.log";

/// Installs the stderr and log-file layers.
///
/// Stdout is left to the token dump. A missing log directory only costs the
/// file layer.
pub fn init() {
    let stderr_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .with_filter(stderr_filter);

    let file_layer = match crate::config_paths::ensure_logs_dir() {
        Ok(logs_dir) => {
            let appender = tracing_appender::rolling::daily(logs_dir, LOG_FILE);
            Some(
                fmt::layer()
                    .with_writer(appender)
                    .with_ansi(false)
                    .with_target(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new("reduced_model=debug")),
            )
        }
        Err(e) => {
            eprintln!("reduced-model: logging to stderr only ({e})");
            None
        }
    };

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(file_layer)
        .init();
}
