//! Logger setup for hosts embedding the engine

/// Filter used when `RUST_LOG` is unset
const DEFAULT_FILTER: &str = "info";

/// Logger reading `RUST_LOG`, falling back to [`DEFAULT_FILTER`].
///
/// `RUST_LOG=pinchcraft=debug` shows every applied place/remove and lock
/// transition.
pub fn builder() -> env_logger::Builder {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(DEFAULT_FILTER))
}

/// Install the logger. Panics if another logger is already installed.
///
/// # Example
/// ```no_run
/// pinchcraft::core::logging::init();
/// log::info!("Session started");
/// ```
pub fn init() {
    builder().init();
}

/// Install the logger unless one is already present. Returns whether this
/// call installed it, so hosts restarting a session in one process can call
/// it freely.
pub fn try_init() -> bool {
    builder().try_init().is_ok()
}
