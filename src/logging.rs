//! Tracing setup: a human-readable stderr layer plus a JSON file rolled daily.

use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

const FALLBACK_DIR: &str = "logs";
const FALLBACK_FILE: &str = "gpa_explorer.log";

/// Splits `LOG_FILE_PATH` into the directory and file-name prefix the
/// rolling appender wants. A bare file name logs under `logs/`.
pub fn log_target(log_file_path: &str) -> (PathBuf, String) {
    let path = Path::new(log_file_path);
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map_or_else(|| PathBuf::from(FALLBACK_DIR), Path::to_path_buf);
    let file = path
        .file_name()
        .map_or_else(|| FALLBACK_FILE.to_string(), |f| f.to_string_lossy().into_owned());
    (dir, file)
}

/// Installs the global subscriber. `RUST_LOG` filters stderr (info by
/// default), `RUST_LOG_JSON` filters the file (debug by default).
///
/// Keep the returned guard alive for the life of the process or buffered
/// file output is lost.
pub fn init(log_file_path: &str) -> Result<WorkerGuard> {
    let (dir, file) = log_target(log_file_path);
    let (file_writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::daily(dir, file));

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(file_writer)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .try_init()?;

    Ok(guard)
}
