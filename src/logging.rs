//! Subscriber setup for the command-line front end.

use color_eyre::{eyre::eyre, Result};
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Filter from RUST_LOG, falling back to `level`.
pub fn env_filter(level: &str) -> EnvFilter {
  EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

/// Install the global subscriber.
///
/// Logs go to stderr, or to `file` (appended, non-blocking) when given. The
/// returned guard flushes the file writer on drop and must be held for the
/// lifetime of the program.
pub fn init(level: &str, file: Option<&Path>) -> Result<Option<WorkerGuard>> {
  let filter = env_filter(level);

  match file {
    Some(path) => {
      let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
      let name = path
        .file_name()
        .ok_or_else(|| eyre!("Log file path has no file name: {}", path.display()))?;
      std::fs::create_dir_all(dir)
        .map_err(|e| eyre!("Failed to create log directory {}: {}", dir.display(), e))?;

      let (writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::never(dir, name));
      tracing_subscriber::registry()
        .with(
          fmt::layer()
            .with_writer(writer)
            .with_ansi(false)
            .with_filter(filter),
        )
        .try_init()
        .map_err(|e| eyre!("Failed to install log subscriber: {}", e))?;
      Ok(Some(guard))
    }
    None => {
      tracing_subscriber::registry()
        .with(
          fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_filter(filter),
        )
        .try_init()
        .map_err(|e| eyre!("Failed to install log subscriber: {}", e))?;
      Ok(None)
    }
  }
}
