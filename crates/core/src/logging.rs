//! Log setup shared by every hitlens entry point.
//!
//! Each component writes its own daily file under `~/.hitlens/logs`
//! (`<component>.log.<date>`). Stdout belongs to command output, so the
//! terminal layer, when enabled, goes to stderr.

use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Takes precedence over `RUST_LOG`.
pub const LOG_ENV: &str = "HITLENS_LOG";

/// Hitlens crates at `info`, everything else at `warn`.
const DEFAULT_DIRECTIVES: &str =
    "warn,hitlens_core=info,hitlens_memory=info,hitlens_runtime=info,hitlens_cli=info";

pub fn log_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".hitlens/logs")
}

fn build_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES))
}

/// Install the global subscriber for `component`. Keep the returned guard
/// alive until exit or buffered file output is lost.
pub fn init_logging(component: &str, to_stderr: bool) -> WorkerGuard {
    let log_dir = log_dir();
    let _ = std::fs::create_dir_all(&log_dir);

    let file_appender = tracing_appender::rolling::daily(&log_dir, format!("{component}.log"));
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true);
    let stderr_layer = to_stderr.then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .compact()
    });

    tracing_subscriber::registry()
        .with(build_filter())
        .with(file_layer)
        .with(stderr_layer)
        .init();

    tracing::debug!(component, dir = %log_dir.display(), "logging initialized");
    guard
}
