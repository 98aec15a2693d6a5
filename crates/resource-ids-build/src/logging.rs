//! Logging setup for the `resource-ids` binary.
//!
//! Library code only emits `tracing` events; installing a subscriber is left
//! to the binary (or to a build script that wants the output).

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable holding a filter directive, e.g. `debug` or
/// `resource_ids_build=trace`.
pub const LOG_ENV: &str = "RESOURCE_IDS_LOG";

/// Default filter when neither the CLI nor the environment sets one.
pub const DEFAULT_LEVEL: &str = "warn";

/// Pick the filter directive: CLI first, then [`LOG_ENV`], then
/// [`DEFAULT_LEVEL`].
pub fn resolve_filter(cli_level: Option<&str>) -> String {
    if let Some(level) = cli_level
        && !level.is_empty()
    {
        return level.to_string();
    }
    match std::env::var(LOG_ENV) {
        Ok(env) if !env.is_empty() => env,
        _ => DEFAULT_LEVEL.to_string(),
    }
}

/// Install a stderr subscriber. Logs go to stderr so stdout stays free for
/// build script directives.
pub fn init_logging(cli_level: Option<&str>) -> Result<(), String> {
    let directive = resolve_filter(cli_level);
    let filter = EnvFilter::try_new(&directive)
        .map_err(|e| format!("Invalid log filter '{}': {}", directive, e))?;

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .try_init()
        .map_err(|e| format!("Failed to initialize logging: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_level_wins() {
        assert_eq!(resolve_filter(Some("debug")), "debug");
    }

    #[test]
    fn invalid_filter_is_rejected() {
        assert!(init_logging(Some("resource_ids=notalevel")).is_err());
    }
}
