use tracing_subscriber::EnvFilter;

/// Environment variable holding a full filter directive, e.g. `loanpay=trace`.
pub const LOG_ENV: &str = "LOANPAY_LOG";

/// Install the stderr subscriber. Stdout carries only command output.
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
