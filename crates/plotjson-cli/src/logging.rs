use tracing_subscriber::{fmt, EnvFilter};

/// Environment variable that overrides the `-v`/`-q` derived filter
pub const LOG_ENV: &str = "PLOTJSON_LOG";

/// Install a stderr subscriber. `PLOTJSON_LOG` takes any `EnvFilter`
/// directive and wins over the command-line flags.
pub fn setup_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "debug",
        (false, _) => "trace",
    };

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(level));

    if let Err(e) = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
    {
        eprintln!("plotjson: logging disabled: {}", e);
    }
}
