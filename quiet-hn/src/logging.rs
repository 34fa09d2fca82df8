use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const DEFAULT_DIRECTIVES: &str = "info";

/// Build the log filter from explicit directives, falling back to `info`
/// when they are absent, blank or do not parse.
pub fn filter_from(directives: Option<&str>) -> EnvFilter {
    directives
        .filter(|d| !d.trim().is_empty())
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_DIRECTIVES))
}

/// Filter taken from `RUST_LOG`, `info` when unset or invalid.
pub fn env_filter() -> EnvFilter {
    filter_from(std::env::var(EnvFilter::DEFAULT_ENV).ok().as_deref())
}

/// Install the global subscriber. Human-readable output unless
/// `RUST_LOG_FORMAT=json`.
pub fn init_tracing() {
    let filter = env_filter();
    let json = std::env::var("RUST_LOG_FORMAT").is_ok_and(|v| v == "json");

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(fmt::layer().json().flatten_event(true)).init();
    } else {
        registry.with(fmt::layer().with_target(true)).init();
    }
}
