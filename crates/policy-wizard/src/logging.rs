use tracing_subscriber::EnvFilter;

/// Environment variable holding a `tracing` filter directive.
pub const LOG_ENV: &str = "POLICY_WIZARD_LOG";

const DEFAULT_FILTER: &str = "warn";

/// Picks the filter: `-v` flags, then [`LOG_ENV`], then the config file, then `warn`.
pub fn filter_for(verbose: u8, configured: Option<&str>) -> EnvFilter {
    if verbose > 0 {
        let level = match verbose {
            1 => "info",
            2 => "debug",
            _ => "trace",
        };
        return EnvFilter::new(level);
    }
    if let Ok(filter) = EnvFilter::try_from_env(LOG_ENV) {
        return filter;
    }
    configured
        .and_then(|directive| EnvFilter::try_new(directive).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}

/// Installs the stderr subscriber; later calls are ignored.
pub fn init(verbose: u8, configured: Option<&str>) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter_for(verbose, configured))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
