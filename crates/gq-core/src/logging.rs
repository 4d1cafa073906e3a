//! Logging initialization using the `tracing` ecosystem.
//!
//! Console output is always enabled; passing a log directory adds a
//! daily-rotating file layer via `tracing-appender`. The level comes from the
//! `RUST_LOG` env var when set, otherwise from the explicit parameter.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the global tracing subscriber. Call once at program start.
///
/// # Parameters
///
/// - `log_level`: fallback level if `RUST_LOG` is not set (e.g. `"info"`)
/// - `log_dir`: optional directory for daily-rotating log files
/// - `module_name`: log file prefix (e.g. `"gq-runner"`)
pub fn init_logging(log_level: &str, log_dir: Option<&str>, module_name: &str) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let file_layer = log_dir.map(|dir| {
        let appender = tracing_appender::rolling::daily(dir, module_name);
        fmt::layer().with_writer(appender).with_ansi(false).with_target(true)
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true).with_ansi(true))
        .with(file_layer)
        .init();
}
