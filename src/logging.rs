//! Logger setup for the binary and for tests that want log output.
use env_logger::{Builder, Env};
use log::LevelFilter;

/// Initializes the global logger.
///
/// When `verbose` is `true`, debug messages such as rejected moves and path
/// progress are printed. Otherwise only info level and above are shown.
/// `RUST_LOG` still takes precedence over either default.
pub fn init(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    init_with_filter(&level.to_string());
}

/// Initializes the global logger with an explicit default filter string,
/// for example `"trek=trace"`.
pub fn init_with_filter(filter: &str) {
    let env = Env::default().default_filter_or(filter);
    let mut builder = Builder::from_env(env);
    builder.format_timestamp_millis();

    // `try_init` only fails if a logger was already set. Ignore that case so
    // tests can call `init` multiple times without panicking.
    let _ = builder.try_init();
}
