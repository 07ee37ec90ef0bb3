//! Logging setup for lockstep with file output and optional stdout.
//!
//! Logs always go to a file at `warn` level (or higher if the environment
//! asks for it). Stdout logging is enabled when `LOCKSTEP_LOG` or `RUST_LOG`
//! is set, or in debug builds.
//!
//! ## Environment Variables
//!
//! 1. **`LOCKSTEP_LOG`** (highest priority) - lockstep-specific logging control
//! 2. **`RUST_LOG`** - Standard tracing environment variable
//! 3. **Default** - `warn` globally, `info` for lockstep crates
//!
//! ## Log File Location
//!
//! Default: `<data_local_dir>/lockstep/logs/lockstep-<pid>.log`
//! - macOS: `~/Library/Application Support/lockstep/logs/lockstep-12345.log`
//! - Linux: `~/.local/share/lockstep/logs/lockstep-12345.log`
//!
//! Override with `LogConfig::log_file_path`.

use std::{env, path::PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry,
};

/// Returned from [`init`]; must be held alive to ensure log file flushing.
pub struct LogGuard {
    _file_guard: WorkerGuard,
    pub log_file: PathBuf,
}

pub struct LogConfig {
    pub log_file_path: Option<PathBuf>,
}

/// Initialize logging.
///
/// Respects the environment variable priority described in the module docs:
/// `LOCKSTEP_LOG` > `RUST_LOG` > default settings.
///
/// The returned [`LogGuard`] must be held for the lifetime of the program --
/// dropping it flushes and stops the background file writer.
///
/// Safe to call multiple times -- will not crash if logging is already initialized.
pub fn init(config: LogConfig) -> Result<LogGuard, Box<dyn std::error::Error + Send + Sync>> {
    let (log_dir, filename) = resolve_log_path(config.log_file_path);

    std::fs::create_dir_all(&log_dir).ok();

    let file_appender = tracing_appender::rolling::never(&log_dir, &filename);
    let (non_blocking_file, file_guard) = tracing_appender::non_blocking(file_appender);

    let file_filter = create_file_filter()?;
    let file_layer = fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false)
        .with_filter(file_filter);

    let stdout_enabled =
        env::var("LOCKSTEP_LOG").is_ok() || env::var("RUST_LOG").is_ok() || cfg!(debug_assertions);

    let stdout_layer = if stdout_enabled {
        Some(fmt::layer().with_filter(create_filter()?))
    } else {
        None
    };

    Registry::default()
        .with(file_layer)
        .with(stdout_layer)
        .try_init()?;

    Ok(LogGuard {
        _file_guard: file_guard,
        log_file: log_dir.join(filename),
    })
}

/// Initialize logging for tests.
///
/// Identical to [`init`] but stdout-only (no file output), with a name that makes it
/// clear this is safe for test usage. Will not crash if called multiple times or if
/// logging is already initialized by another test.
#[allow(clippy::let_unit_value)]
pub fn test() {
    let _ = test_init();
}

fn test_init() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter = create_filter()?;
    fmt().with_env_filter(filter).try_init()?;
    Ok(())
}

fn resolve_log_path(override_path: Option<PathBuf>) -> (PathBuf, String) {
    let filename = format!("lockstep-{}.log", std::process::id());

    if let Some(path) = override_path {
        if path.extension().is_some() {
            let dir = path.parent().unwrap_or_else(|| std::path::Path::new("."));
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or(filename);
            return (dir.to_path_buf(), name);
        }
        return (path, filename);
    }

    let dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("lockstep")
        .join("logs");

    (dir, filename)
}

/// File filter: uses user-specified level if set, otherwise defaults to `warn`.
fn create_file_filter() -> Result<EnvFilter, Box<dyn std::error::Error + Send + Sync>> {
    if env::var("LOCKSTEP_LOG").is_ok() || env::var("RUST_LOG").is_ok() {
        return create_filter();
    }
    Ok(EnvFilter::new("warn"))
}

/// Create the appropriate [`EnvFilter`] based on environment variables.
///
/// Implements the priority system: `LOCKSTEP_LOG` > `RUST_LOG` > defaults.
fn create_filter() -> Result<EnvFilter, Box<dyn std::error::Error + Send + Sync>> {
    // Priority order:
    // 1. LOCKSTEP_LOG - if set, expand it to lockstep namespaces (highest priority)
    // 2. RUST_LOG (standard tracing env var) - if set, use it directly
    // 3. Default - warn globally, info for lockstep crates

    if let Ok(lockstep_log) = env::var("LOCKSTEP_LOG") {
        return Ok(expand_lockstep_log(&lockstep_log));
    }

    if let Ok(rust_log) = env::var("RUST_LOG") {
        return Ok(EnvFilter::new(rust_log));
    }

    Ok(EnvFilter::new("warn,lockstep=info,lockstep_log=info"))
}

/// Expand `LOCKSTEP_LOG` values into full tracing filter strings.
///
/// - `LOCKSTEP_LOG=debug` becomes `warn,lockstep=debug,lockstep_log=debug`
/// - `LOCKSTEP_LOG=lockstep=trace` is used as-is (advanced syntax)
fn expand_lockstep_log(lockstep_log: &str) -> EnvFilter {
    if lockstep_log.contains('=') || lockstep_log.contains(':') || lockstep_log.contains(',') {
        return EnvFilter::new(lockstep_log);
    }

    EnvFilter::new(format!(
        "warn,lockstep={lockstep_log},lockstep_log={lockstep_log}"
    ))
}
