use crate::retry::{fixed_delay, no_delay, RetryConfig};
use crate::transport::CurlTransport;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Retry parameters (optional `[retry]` section in config.toml).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetrySettings {
    /// Number of retries after the first attempt.
    pub retries: u32,
    /// Fixed delay between attempts in milliseconds (0 = retry immediately).
    #[serde(default)]
    pub delay_ms: u64,
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            retries: 3,
            delay_ms: 0,
        }
    }
}

impl RetrySettings {
    pub fn to_retry_config(&self) -> RetryConfig {
        let delay = if self.delay_ms == 0 {
            no_delay()
        } else {
            fixed_delay(Duration::from_millis(self.delay_ms))
        };
        RetryConfig {
            retries: self.retries,
            retry_delay: delay,
            ..RetryConfig::default()
        }
    }
}

/// Global configuration loaded from `~/.config/prt/config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrtConfig {
    /// Overall request timeout in seconds.
    pub timeout_secs: u64,
    /// Connect timeout in seconds.
    pub connect_timeout_secs: u64,
    /// Optional retry policy; if missing, built-in defaults are used.
    #[serde(default)]
    pub retry: Option<RetrySettings>,
}

impl Default for PrtConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            connect_timeout_secs: 15,
            retry: None,
        }
    }
}

impl PrtConfig {
    pub fn retry_settings(&self) -> RetrySettings {
        self.retry.clone().unwrap_or_default()
    }

    pub fn transport(&self) -> CurlTransport {
        CurlTransport {
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            default_timeout: Duration::from_secs(self.timeout_secs),
            ..CurlTransport::default()
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("prt")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<PrtConfig> {
    load_or_init_at(&config_path()?)
}

/// Like [`load_or_init`] for an explicit path.
pub fn load_or_init_at(path: &Path) -> Result<PrtConfig> {
    if !path.exists() {
        let default_cfg = PrtConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path)?;
    let cfg: PrtConfig = toml::from_str(&data)?;
    Ok(cfg)
}
