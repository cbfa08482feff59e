//! Tracing setup.
//!
//! The interactive UI owns the terminal, so it logs to a file. The
//! one-shot commands log to stderr, keeping stdout for their result.

use std::path::Path;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info,noughts=debug,noughts_engine=info";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Logs to stderr. Filter comes from `RUST_LOG` when set.
pub fn init_stderr() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .try_init(); // Don't panic if already initialized
}

/// Logs to `path`, truncating it, without ANSI colors.
pub fn init_file(path: &Path) -> anyhow::Result<()> {
    let log_file = std::fs::File::create(path)?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(Arc::new(log_file))
        .with_ansi(false)
        .try_init();

    info!(path = %path.display(), "File logging initialized");
    Ok(())
}
