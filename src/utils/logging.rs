//! Conditional logging macros that check a module-level `ENABLE_LOGS` flag,
//! plus an `env_logger` bootstrap for embedding binaries and tests.
//!
//! Each module using the macros defines its own switch:
//! ```rust
//! const ENABLE_LOGS: bool = true;
//! ```
//! The macros are exported at the crate root.

use std::sync::Once;

static INIT: Once = Once::new();

/// Initialize `env_logger` (reads `RUST_LOG`), defaulting to info level.
/// Safe to call more than once; only the first call takes effect.
pub fn init_logging() {
    INIT.call_once(|| {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();
    });
}

/// Conditional info logging; gated on the calling module's `ENABLE_LOGS`.
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            log::info!($($arg)*);
        }
    };
}

/// Conditional warn logging; gated on the calling module's `ENABLE_LOGS`.
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            log::warn!($($arg)*);
        }
    };
}

/// Conditional error logging; gated on the calling module's `ENABLE_LOGS`.
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            log::error!($($arg)*);
        }
    };
}
