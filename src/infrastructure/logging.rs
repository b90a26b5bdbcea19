//! Diagnostic logging setup
//!
//! `tracing` output goes to stderr so stdout stays clean for `--json`.
//! `RUST_LOG` overrides the level derived from `-v` / `output.verbosity`.

use is_terminal::IsTerminal;

use tracing_subscriber::EnvFilter;

use crate::config::Verbosity;

/// Default filter directive for a verbosity level
pub fn default_directive(verbosity: Verbosity) -> &'static str {
    match verbosity {
        Verbosity::Quiet => "bridgewright=error",
        Verbosity::Normal => "bridgewright=warn",
        Verbosity::Verbose => "bridgewright=info",
        Verbosity::Debug => "bridgewright=debug",
    }
}

/// Install the global subscriber; a second call is a no-op
pub fn init(verbosity: Verbosity) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .try_init();
}
