//! Logging setup for observed tasks: console output by default, or a JSONL
//! file sink when a log path is configured. Everything is resolved from the
//! environment into [`LogSettings`] before any subscriber is built.

use std::path::{Path, PathBuf};

use once_cell::sync::OnceCell;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt as _;
use tracing_subscriber::util::SubscriberInitExt as _;

static INIT: OnceCell<()> = OnceCell::new();

const TRUE_WORDS: [&str; 5] = ["1", "true", "yes", "on", "enabled"];
const FALSE_WORDS: [&str; 5] = ["0", "false", "no", "off", "disabled"];

fn parse_bool(value: &str) -> Option<bool> {
    let v = value.trim().to_ascii_lowercase();
    if TRUE_WORDS.contains(&v.as_str()) {
        Some(true)
    } else if FALSE_WORDS.contains(&v.as_str()) {
        Some(false)
    } else {
        None
    }
}

/// Logging settings for one process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    pub enabled: bool,
    /// Level or filter directive, e.g. `info` or `taskscope_core=debug`.
    pub filter: String,
    /// When set, log lines go to this file as JSONL instead of the console.
    pub json_log_path: Option<PathBuf>,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            filter: "info".into(),
            json_log_path: None,
        }
    }
}

impl LogSettings {
    /// Resolve settings from the environment:
    /// - `TASKSCOPE_OBSERVABILITY_ENABLED` / `TASKSCOPE_OBSERVABILITY`: enable
    ///   flag (default enabled; unrecognized values count as enabled).
    /// - `TASKSCOPE_LOG_LEVEL`, then `RUST_LOG`: filter directive.
    /// - `TASKSCOPE_JSON_LOG_PATH`: JSONL file sink.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let enabled = ["TASKSCOPE_OBSERVABILITY_ENABLED", "TASKSCOPE_OBSERVABILITY"]
            .iter()
            .find_map(|key| std::env::var(key).ok())
            .map(|value| parse_bool(&value).unwrap_or(true))
            .unwrap_or(defaults.enabled);
        let filter = std::env::var("TASKSCOPE_LOG_LEVEL")
            .or_else(|_| std::env::var("RUST_LOG"))
            .unwrap_or(defaults.filter);
        let json_log_path = std::env::var("TASKSCOPE_JSON_LOG_PATH")
            .ok()
            .map(PathBuf::from);
        Self {
            enabled,
            filter,
            json_log_path,
        }
    }
}

/// Directory and file name for the JSONL sink. An extensionless or bare path
/// falls back to the current directory and a default file name.
fn split_log_path(path: &Path) -> (PathBuf, String) {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("taskscope.logs.jsonl")
        .to_string();
    (dir, file_name)
}

fn install_subscriber(settings: &LogSettings) {
    let filter =
        EnvFilter::try_new(&settings.filter).unwrap_or_else(|_| EnvFilter::new("info"));
    match &settings.json_log_path {
        Some(path) => {
            let (dir, file_name) = split_log_path(path);
            let _ = std::fs::create_dir_all(&dir);
            let sink = tracing_appender::rolling::never(dir, file_name);
            let json_layer = tracing_subscriber::fmt::layer()
                .json()
                .with_target(false)
                .with_writer(sink);
            let _ = tracing_subscriber::registry()
                .with(filter)
                .with(json_layer)
                .try_init();
        }
        None => {
            let console_layer = tracing_subscriber::fmt::layer()
                .compact()
                .with_target(false);
            let _ = tracing_subscriber::registry()
                .with(filter)
                .with(console_layer)
                .try_init();
        }
    }
}

/// Initialize observability logging once per process, from [`LogSettings::from_env`].
/// Later calls are no-ops.
pub fn init_observability() {
    INIT.get_or_init(|| {
        let settings = LogSettings::from_env();
        if settings.enabled {
            install_subscriber(&settings);
        }
    });
}
