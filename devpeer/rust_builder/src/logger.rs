//! Log dispatcher for the native library.

use std::time::SystemTime;

use fern::Dispatch;
use log::{info, LevelFilter};

/// Installs a stdout logger at `level`.
///
/// Flutter hot restarts reload Dart but keep the native library loaded, so a
/// second call finds a logger already installed and returns an error.
///
/// # Errors
///
/// Returns an error if a global logger is already set.
pub fn initialize(level: LevelFilter) -> Result<(), String> {
    Dispatch::new()
        .level(level)
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{date} - {level}] {message} [{file}:{line}]",
                date = humantime::format_rfc3339(SystemTime::now()),
                level = record.level(),
                file = record.file().unwrap_or("unknown"),
                line = record.line().unwrap_or(0),
            ));
        })
        .chain(std::io::stdout())
        .apply()
        .map_err(|e| format!("Failed to initialize logger: {e}"))?;

    info!("Logger initialized: level={level:?}, stdout");
    Ok(())
}
