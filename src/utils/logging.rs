//! Conditional logging macros gated on a module-level `ENABLE_LOGS` const.
//!
//! Chatty modules (the sampling loop) define `const ENABLE_LOGS: bool` and
//! use these instead of the bare `log` macros so their output can be
//! silenced without touching call sites.

/// Info logging, compiled out when the calling module sets
/// `ENABLE_LOGS = false`.
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            log::info!($($arg)*);
        }
    };
}

/// Warn logging gated on the calling module's `ENABLE_LOGS`.
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            log::warn!($($arg)*);
        }
    };
}

/// Error logging gated on the calling module's `ENABLE_LOGS`.
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            log::error!($($arg)*);
        }
    };
}
