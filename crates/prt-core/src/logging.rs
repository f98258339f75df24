//! Tracing setup for the `prt` binary.
//!
//! Events go to `$XDG_STATE_HOME/prt/prt.log`. When that file can't be opened
//! the CLI falls back to [`init_logging_stderr`]. `RUST_LOG` overrides the
//! default filter in both cases.

use anyhow::{anyhow, Context, Result};
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info,prt=debug,prt_core=debug";
const LOG_FILE: &str = "prt.log";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Where [`init_logging`] writes.
pub fn log_path() -> Result<PathBuf> {
    let dirs = xdg::BaseDirectories::with_prefix("prt").context("resolve XDG directories")?;
    Ok(dirs.get_state_home().join(LOG_FILE))
}

fn open_log(path: &Path) -> Result<File> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open {}", path.display()))
}

/// Log to the state-dir file. Errors if the file can't be opened or a
/// global subscriber is already set.
pub fn init_logging() -> Result<()> {
    let path = log_path()?;
    let file = open_log(&path)?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow!("install file logger: {}", e))?;
    tracing::info!("logging to {}", path.display());
    Ok(())
}

/// Log to stderr. Errors only if a global subscriber is already set.
pub fn init_logging_stderr() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow!("install stderr logger: {}", e))
}
