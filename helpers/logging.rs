use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Installs the stderr diagnostics subscriber.
///
/// `RUST_LOG` wins when set; otherwise the level follows the `-v` count and
/// stays at `warn` so a quiet run prints only its report line.
pub fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
