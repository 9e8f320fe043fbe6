//! Logging setup: stderr plus a per-session log file.
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Installs the global subscriber and returns the resolved session id.
///
/// Filtering follows `RUST_LOG`, defaulting to `info`. The file goes to
/// `<log dir>/<session id>/client.log`.
pub fn setup_logging(session_id: Option<&str>, log_dir: Option<&Path>) -> Result<String> {
    let session_id = session_id
        .map(str::to_owned)
        .unwrap_or_else(|| chrono::Local::now().format("session_%Y%m%d_%H%M%S").to_string());

    let log_root = log_dir.map(Path::to_path_buf).unwrap_or_else(default_log_dir);
    let session_log_dir = log_root.join(&session_id);
    std::fs::create_dir_all(&session_log_dir).with_context(|| {
        format!(
            "failed to create log directory {}",
            session_log_dir.display()
        )
    })?;

    let file_appender = tracing_appender::rolling::never(&session_log_dir, "client.log");
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);
    let stderr_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    // Leak the guard to keep file writer alive
    std::mem::forget(guard);

    tracing::info!("Logging initialized: session={}", session_id);
    tracing::info!("Log file: {}/client.log", session_log_dir.display());

    Ok(session_id)
}

/// Platform cache directory, e.g. `~/.cache/snake/logs` on Linux.
fn default_log_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "snake")
        .map(|dirs| dirs.cache_dir().join("logs"))
        .unwrap_or_else(|| PathBuf::from("/tmp/snake/logs"))
}
