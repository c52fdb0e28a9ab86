//! Logging setup for binaries and tests.
//!
//! The library itself only emits `tracing` events under the `colstep_core`
//! target: seek phases and per-cursor steps at `trace`, stopped cursor groups
//! and sealed blocks at `debug`, loaded configs at `info`, and yields requested
//! in a no-yield context at `warn`. Nothing is printed until a subscriber is
//! installed, either by the embedding application or by the helpers below
//! (`logging` feature).
//!
//! The filter comes from `COLSTEP_LOG`, then `RUST_LOG`, then the level passed
//! by the caller.

/// Environment variable with a filter directive, checked before `RUST_LOG`.
pub const LOG_ENV: &str = "COLSTEP_LOG";

/// Filter directive limiting output to this crate at `level`.
pub fn crate_directive(level: &str) -> String {
    format!("{}={}", env!("CARGO_CRATE_NAME"), level.trim())
}

#[cfg(feature = "logging")]
mod subscriber {
    use super::{LOG_ENV, crate_directive};
    use tracing_subscriber::{EnvFilter, fmt};

    fn filter(level: &str) -> EnvFilter {
        EnvFilter::try_from_env(LOG_ENV)
            .or_else(|_| EnvFilter::try_from_default_env())
            .unwrap_or_else(|_| EnvFilter::new(crate_directive(level)))
    }

    pub fn install(level: &str) -> bool {
        fmt()
            .with_env_filter(filter(level))
            .with_target(true)
            .with_line_number(true)
            .try_init()
            .is_ok()
    }

    pub fn install_test() -> bool {
        fmt()
            .with_env_filter(filter("trace"))
            .with_test_writer()
            .try_init()
            .is_ok()
    }
}

/// Install a global subscriber at `info`.
///
/// Returns `false` if a subscriber was already installed or the `logging`
/// feature is off.
///
/// ```rust
/// colstep_core::logging::init();
/// ```
pub fn init() -> bool {
    init_with_level("info")
}

/// Install a global subscriber at `level` unless the environment overrides it.
///
/// ```rust
/// colstep_core::logging::init_with_level("debug");
/// ```
pub fn init_with_level(level: &str) -> bool {
    #[cfg(feature = "logging")]
    {
        subscriber::install(level)
    }
    #[cfg(not(feature = "logging"))]
    {
        let _ = level;
        false
    }
}

/// Route `trace`-level output into the test harness's captured stdout.
/// Safe to call from every test.
pub fn init_test() -> bool {
    #[cfg(feature = "logging")]
    {
        subscriber::install_test()
    }
    #[cfg(not(feature = "logging"))]
    {
        false
    }
}
