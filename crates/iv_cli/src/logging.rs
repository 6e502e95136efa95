use tracing_subscriber::EnvFilter;

/// Filter directives are read from this variable, e.g. `IV_LOG=iv_parser=debug`.
const LOG_ENV: &str = "IV_LOG";

pub(crate) fn init() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(true)
        .compact()
        .try_init();
}
