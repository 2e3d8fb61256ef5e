//! Logging initialization for the CLI.
//!
//! Logging lives here so `stowage-core` stays silent; inventory results are
//! data, and anything diagnostic goes to stderr through tracing.

use stowage_core::Config;
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Map the `-v` count onto a tracing level.
fn level_for(verbosity: u8) -> Level {
    match verbosity {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Initialize the tracing subscriber from the runtime config.
///
/// `RUST_LOG` is respected as the base filter; the `-v`/`-vv` flags raise
/// the level for stowage's own targets. With JSON output enabled, log lines
/// are emitted as JSON to stderr so stdout stays parseable.
///
/// # Panics
/// Panics if a subscriber is already installed.
pub fn init(config: &Config) {
    let level = level_for(config.verbosity);

    let mut filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    filter = filter.add_directive(level.into());
    if let Ok(directive) = format!("stowage={level}").parse() {
        filter = filter.add_directive(directive);
    }

    let registry = tracing_subscriber::registry().with(filter);

    if config.json_logs {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_span_list(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_mapping() {
        assert_eq!(level_for(0), Level::INFO);
        assert_eq!(level_for(1), Level::DEBUG);
        assert_eq!(level_for(2), Level::TRACE);
        assert_eq!(level_for(9), Level::TRACE);
    }
}
