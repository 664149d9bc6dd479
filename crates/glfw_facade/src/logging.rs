//! Logging setup
//!
//! The crate logs through the `log` facade: debug lines when native objects
//! are created or destroyed, trace lines for every dispatched event and
//! warnings for errors reported by the native layer.

pub use log::{debug, error, info, trace, warn};

/// Filter used when `RUST_LOG` is not set
pub const DEFAULT_FILTER: &str = "info,glfw_facade=debug";

/// Install `env_logger`, honouring `RUST_LOG`
///
/// Panics if a logger is already installed; see [`try_init`].
pub fn init() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(DEFAULT_FILTER)).init();
}

/// Install `env_logger` unless a logger is already installed
///
/// Output is captured by the test harness when built for tests.
pub fn try_init() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(DEFAULT_FILTER))
        .is_test(cfg!(test))
        .try_init();
}
