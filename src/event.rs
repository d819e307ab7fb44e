//! Log callback hook.
//!
//! Hosts that do not install a `tracing` subscriber can still observe the
//! library's warnings by registering a plain callback. Every message is sent
//! to both.

use std::sync::{Mutex, OnceLock};

/// Log level for log callbacks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

type LogCallback = Box<dyn Fn(LogLevel, &str) + Send + Sync + 'static>;

fn log_callback() -> &'static Mutex<Option<LogCallback>> {
    static CALLBACK: OnceLock<Mutex<Option<LogCallback>>> = OnceLock::new();
    CALLBACK.get_or_init(|| Mutex::new(None))
}

/// Set the global log callback, replacing any previous one.
pub fn set_log_callback<F>(callback: F)
where
    F: Fn(LogLevel, &str) + Send + Sync + 'static,
{
    if let Ok(mut guard) = log_callback().lock() {
        *guard = Some(Box::new(callback));
    }
}

/// Remove the global log callback.
pub fn clear_log_callback() {
    if let Ok(mut guard) = log_callback().lock() {
        *guard = None;
    }
}

/// Emit a log message to `tracing` and to the registered callback.
pub fn emit_log(level: LogLevel, message: &str) {
    match level {
        LogLevel::Debug => tracing::debug!(target: "chipfield", "{message}"),
        LogLevel::Info => tracing::info!(target: "chipfield", "{message}"),
        LogLevel::Warn => tracing::warn!(target: "chipfield", "{message}"),
        LogLevel::Error => tracing::error!(target: "chipfield", "{message}"),
    }

    if let Ok(guard) = log_callback().lock() {
        if let Some(callback) = guard.as_ref() {
            callback(level, message);
        }
    }
}
