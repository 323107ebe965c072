#![deny(missing_docs)]
//! Shared logging utilities for the catalog workspace.
//!
//! The `catalog_*` macros are the only logging entry points used by the
//! library crates. They forward to the `log` facade, so the binary decides
//! where output goes; tests install a terminal logger through
//! [`initialize_for_tests`].

use log::LevelFilter;

/// Logs a trace-level message using the global logging facade.
#[macro_export]
macro_rules! catalog_trace {
    ($($arg:tt)*) => {{
        log::trace!($($arg)*);
    }};
}

/// Logs a debug-level message using the global logging facade.
#[macro_export]
macro_rules! catalog_debug {
    ($($arg:tt)*) => {{
        log::debug!($($arg)*);
    }};
}

/// Logs an info-level message using the global logging facade.
#[macro_export]
macro_rules! catalog_info {
    ($($arg:tt)*) => {{
        log::info!($($arg)*);
    }};
}

/// Logs a warn-level message using the global logging facade.
#[macro_export]
macro_rules! catalog_warn {
    ($($arg:tt)*) => {{
        log::warn!($($arg)*);
    }};
}

/// Logs an error-level message using the global logging facade.
#[macro_export]
macro_rules! catalog_error {
    ($($arg:tt)*) => {{
        log::error!($($arg)*);
    }};
}

/// Level used by [`initialize_for_tests`]: debug in debug builds, info otherwise.
pub fn test_level() -> LevelFilter {
    if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

/// Initializes a terminal logger for use in tests.
///
/// Safe to call from every test; only the first call installs a logger.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, CombinedLogger, ConfigBuilder, TermLogger, TerminalMode};

    let config = ConfigBuilder::new()
        .set_target_level(LevelFilter::Error)
        .build();

    // Another test may already have installed the global logger.
    let _ = CombinedLogger::init(vec![TermLogger::new(
        test_level(),
        config,
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}
