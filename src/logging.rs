//! Tracing subscriber setup for the CLI.
//!
//! Library code only emits `tracing` events; the binary decides where they go.
//! Logs are written to stderr so command output on stdout stays parseable.

use tracing_subscriber::EnvFilter;

/// Environment variable holding a filter directive, e.g. `shoplist=debug`.
pub const LOG_ENV: &str = "SHOPLIST_LOG";

/// Install the global subscriber.
///
/// Filter precedence: CLI flag > `SHOPLIST_LOG` > `warn`.
pub fn init_logging(log_level: Option<&str>) {
    let filter = build_env_filter(log_level);

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .finish();

    // A subscriber may already be installed (tests); keep that one
    let _ = tracing::subscriber::set_global_default(subscriber);
}

/// Build an EnvFilter with precedence: CLI flag > SHOPLIST_LOG env var > "warn" default
fn build_env_filter(log_level: Option<&str>) -> EnvFilter {
    if let Some(level) = log_level
        && let Ok(filter) = EnvFilter::try_new(level)
    {
        return filter;
    }

    if let Ok(env_level) = std::env::var(LOG_ENV)
        && let Ok(filter) = EnvFilter::try_new(&env_level)
    {
        return filter;
    }

    EnvFilter::new("warn")
}
