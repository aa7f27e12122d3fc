//! Logging setup.
//!
//! Library crates only emit through `log`; the binary installs `env_logger`
//! once at startup. Human-facing progress output goes to stdout separately.

use log::LevelFilter;

/// Maps the `-v` count to a level filter.
pub fn level_for_verbosity(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    }
}

/// Installs the stderr logger at the level for `verbosity`.
///
/// Only the first call installs a logger; later calls are ignored.
pub fn init(verbosity: u8) {
    let _ = env_logger::Builder::new()
        .filter_level(level_for_verbosity(verbosity))
        .format_timestamp(None)
        .try_init();
}
