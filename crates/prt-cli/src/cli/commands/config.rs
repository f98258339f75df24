//! `prt config` – show where the config lives and what it resolves to.

use anyhow::Result;
use prt_core::config;

pub fn run_config() -> Result<()> {
    let path = config::config_path()?;
    let cfg = config::load_or_init()?;
    let retry = cfg.retry_settings();
    println!("config: {}", path.display());
    println!("  timeout_secs          {}", cfg.timeout_secs);
    println!("  connect_timeout_secs  {}", cfg.connect_timeout_secs);
    println!("  retry.retries         {}", retry.retries);
    println!("  retry.delay_ms        {}", retry.delay_ms);
    Ok(())
}
