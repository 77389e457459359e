use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt as _, util::SubscriberInitExt as _};

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

// Initialize tracing-subscriber and return a guard that flushes the log file on drop
pub fn init_tracing_subscriber(log_file: Option<&Path>) -> anyhow::Result<Option<TelemetryGuard>> {
    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_filter(env_filter());

    let Some(log_file) = log_file else {
        tracing_subscriber::registry().with(console_layer).init();
        return Ok(None);
    };

    let log_dir = match log_file.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => std::env::current_dir()?,
    };
    std::fs::create_dir_all(&log_dir)?;
    let file_name = log_file
        .file_name()
        .ok_or_else(|| anyhow::anyhow!("log file path has no file name: {}", log_file.display()))?;

    let file_appender = RollingFileAppender::new(Rotation::NEVER, log_dir, file_name);
    let (writer, worker_guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .with_filter(env_filter());

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();

    Ok(Some(TelemetryGuard {
        _worker_guard: worker_guard,
    }))
}

pub struct TelemetryGuard {
    _worker_guard: WorkerGuard,
}
