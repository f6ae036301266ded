use tracing_subscriber::EnvFilter;

/// Install the fmt subscriber shared by the binaries.
///
/// `RUST_LOG` takes precedence; otherwise `info`, or `debug` when verbose.
/// Output goes to stderr so stdout stays usable for results.
pub fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // Ignore the error if a subscriber is already installed
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_level(true)
        .with_ansi(true)
        .try_init();
}
