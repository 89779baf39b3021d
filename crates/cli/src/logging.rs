//! Logging setup using `tracing-subscriber`.
//!
//! The engine and io crates log through the `log` facade; the subscriber's
//! `tracing-log` bridge picks those records up. Output goes to stderr so
//! stdout stays clean for reports and `--json`.
//!
//! - 0 (no `-v`): warn (status column advisories)
//! - 1 (`-v`): info (run summary)
//! - 2 (`-vv`): debug (resolved columns, row counts)
//! - 3+: trace
//!
//! `RUST_LOG` overrides the verbosity flags.

use std::io::{self, IsTerminal};

use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Clone)]
pub struct LogConfig {
    pub level: Level,
    pub with_ansi: bool,
}

impl LogConfig {
    pub fn from_verbosity(verbosity: u8) -> Self {
        let level = match verbosity {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        };
        Self {
            level,
            with_ansi: io::stderr().is_terminal(),
        }
    }
}

/// Install the global subscriber. Call once at startup.
pub fn init_logging(config: &LogConfig) {
    let layer = fmt::layer()
        .with_writer(io::stderr)
        .with_ansi(config.with_ansi)
        .with_target(false)
        .without_time();

    // try_init: a subscriber may already be installed.
    let _ = tracing_subscriber::registry()
        .with(build_env_filter(config.level))
        .with(layer)
        .try_init();
}

/// Our crates log at the requested level; everything else stays at warn.
fn build_env_filter(level: Level) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = level.as_str().to_lowercase();
        EnvFilter::new(format!(
            "warn,ordermatch={level},ordermatch_recon={level},ordermatch_io={level}"
        ))
    })
}
