//! Diagnostics for `l2sign`.
//!
//! stdout is reserved for the record a command produces (signed JSON, a
//! digest, an L1 body), so every event goes to stderr. Colors are only used
//! when stderr is a terminal.

use std::io::IsTerminal;

use anyhow::{anyhow, Result};
use clap::ValueEnum;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when `RUST_LOG` is unset: signer and core at `info`, every
/// dependency silent.
pub const DEFAULT_FILTER: &str = "l2sign=info,l2sign_protocol=info";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Pretty,
    /// One JSON object per event, for wrapping `l2sign` in a signing service.
    Json,
}

/// Installs the global subscriber. `RUST_LOG` replaces [`DEFAULT_FILTER`]
/// wholesale, e.g. `RUST_LOG=l2sign_protocol=debug` to see each pipeline
/// stage with its digest.
pub fn init_logging(format: LogFormat) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let registry = tracing_subscriber::registry().with(filter);

    let installed = match format {
        LogFormat::Pretty => registry
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_ansi(std::io::stderr().is_terminal())
                    .with_target(false)
                    .compact(),
            )
            .try_init(),
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_current_span(false),
            )
            .try_init(),
    };
    installed.map_err(|e| anyhow!("tracing subscriber already installed: {e}"))
}
