//! Logging initialization utilities.

use env_logger::Env;

/// Initialize logging with a default filter level.
///
/// Report records from [`LogCrateSink`](crate::sink::LogCrateSink) go to the
/// `reqlog` target at `info`, so they show up without extra configuration.
pub fn init() {
    let env = Env::default().default_filter_or("info");
    env_logger::Builder::from_env(env).init();
}

/// Like [`init`], but safe to call more than once (e.g. from every test).
pub fn try_init() -> bool {
    let env = Env::default().default_filter_or("info");
    env_logger::Builder::from_env(env).try_init().is_ok()
}
