//! Console logging bootstrap.
//!
//! # Invariants
//! - Logging init is idempotent for the same level.
//! - Re-initialization with a different level is rejected.
//! - Initialization never panics.
//!
//! In the browser records go to the devtools console through `console_log`.
//! A native host (unit tests) has no console, so only the level filter is set
//! and records are dropped.

use std::sync::OnceLock;

use log::{LevelFilter, info};

static ACTIVE_LEVEL: OnceLock<LevelFilter> = OnceLock::new();

/// Installs the console logger at `level` (`error`, `warn`, `info`, `debug`,
/// `trace` or `off`).
///
/// # Errors
/// - Returns an error when `level` is unsupported.
/// - Returns an error when logging is already active at a different level, or
///   another logger owns the `log` facade.
pub fn init_logging(level: &str) -> Result<(), String> {
    let wanted = normalize_level(level)?;

    if let Some(active) = ACTIVE_LEVEL.get() {
        if *active != wanted {
            return Err(format!(
                "logging already initialized with level `{active}`; \
                 refusing to switch to `{wanted}`"
            ));
        }
        return Ok(());
    }

    install(wanted)?;
    // A concurrent init cannot happen on the single wasm thread; keep the first value.
    let _ = ACTIVE_LEVEL.set(wanted);

    info!(
        "event=core_init module=logging status=ok level={} version={}",
        wanted,
        env!("CARGO_PKG_VERSION")
    );
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn install(level: LevelFilter) -> Result<(), String> {
    match level.to_level() {
        Some(level) => console_log::init_with_level(level)
            .map_err(|err| format!("failed to install logger: {err}")),
        None => {
            log::set_max_level(LevelFilter::Off);
            Ok(())
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn install(level: LevelFilter) -> Result<(), String> {
    log::set_max_level(level);
    Ok(())
}

/// Returns the active level, or `None` before [`init_logging`] succeeded.
pub fn logging_status() -> Option<LevelFilter> {
    ACTIVE_LEVEL.get().copied()
}

fn normalize_level(level: &str) -> Result<LevelFilter, String> {
    match level.trim().to_ascii_lowercase().as_str() {
        "off" => Ok(LevelFilter::Off),
        "error" => Ok(LevelFilter::Error),
        "warn" | "warning" => Ok(LevelFilter::Warn),
        "info" => Ok(LevelFilter::Info),
        "debug" => Ok(LevelFilter::Debug),
        "trace" => Ok(LevelFilter::Trace),
        other => Err(format!("unsupported log level `{other}`")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_level_accepts_known_names() {
        assert_eq!(normalize_level("INFO"), Ok(LevelFilter::Info));
        assert_eq!(normalize_level(" warning "), Ok(LevelFilter::Warn));
        assert!(normalize_level("loud").is_err());
    }

    #[test]
    fn init_is_idempotent_and_rejects_level_switch() {
        assert!(init_logging("debug").is_ok());
        assert!(init_logging("debug").is_ok());
        assert_eq!(logging_status(), Some(LevelFilter::Debug));
        assert_eq!(log::max_level(), LevelFilter::Debug);
        let err = init_logging("error").unwrap_err();
        assert!(err.contains("refusing to switch"));
    }
}
