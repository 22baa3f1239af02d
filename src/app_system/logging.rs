use tracing::warn;
use tracing_subscriber::fmt::time::uptime;
use tracing_subscriber::EnvFilter;

/// Installs the global subscriber once for the whole application.
///
/// `RUST_LOG` wins over `default_filter` when it is set and parses.
pub fn setup_tracing(default_filter: &str) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    if let Err(e) = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_timer(uptime())
        .compact()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }
}
