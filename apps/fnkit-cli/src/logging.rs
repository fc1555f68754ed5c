//! Logging setup for the `fnkit` binary.
//!
//! Filter precedence: `RUST_LOG`, then `-v` flags, then `logging.level`.
//! Output always goes to stderr so command results on stdout stay clean.

use anyhow::Result;
use fnkit::{LogFormat, LoggingConfig};
use tracing_subscriber::EnvFilter;

/// Level selected by `-v` flags, or `None` to keep the configured one.
fn verbosity_level(verbose: u8) -> Option<&'static str> {
    match verbose {
        0 => None,
        1 => Some("info"),
        2 => Some("debug"),
        _ => Some("trace"),
    }
}

fn build_filter(cfg: &LoggingConfig, verbose: u8) -> EnvFilter {
    let level = verbosity_level(verbose).unwrap_or(cfg.level.as_str());
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

/// Installs the global subscriber.
///
/// # Errors
/// Returns an error if a global subscriber is already installed.
pub fn init(cfg: &LoggingConfig, verbose: u8) -> Result<()> {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(build_filter(cfg, verbose))
        .with_writer(std::io::stderr)
        .with_target(false);

    let installed = match cfg.format {
        LogFormat::Text => builder.compact().try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    installed.map_err(|e| anyhow::anyhow!("failed to initialize logging: {e}"))
}
