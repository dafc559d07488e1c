//! Tracing setup shared by all binaries.
//!
//! `RUST_LOG` overrides the per-binary default directive.
//! `SOCIALFEED_LOG_JSON=1` switches to JSON lines. Logs go to stderr so
//! console output on stdout stays readable.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

pub fn init(default_directive: &str) -> Result<()> {
    let json_logs = std::env::var("SOCIALFEED_LOG_JSON").unwrap_or_default() == "1";
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directive))?;

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
    Ok(())
}
