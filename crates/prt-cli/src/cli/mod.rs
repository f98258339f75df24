//! CLI for PRT.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use prt_core::config;

use commands::{run_completions, run_config, run_get, GetArgs};

/// Top-level CLI for PRT.
#[derive(Debug, Parser)]
#[command(name = "prt")]
#[command(about = "PRT: retry HTTP requests whose payload reports a failure", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// GET a URL, retrying while the payload's status code is not the OK code.
    Get {
        /// HTTP/HTTPS URL to fetch.
        url: String,
        /// JSON pointer to the application status code in the payload.
        #[arg(long, default_value = "/code", value_name = "POINTER")]
        code_pointer: String,
        /// Status code value that means success (parsed as JSON, else taken as a string).
        #[arg(long, default_value = "0", value_name = "CODE")]
        ok_code: String,
        /// Retries after the first attempt (overrides config).
        #[arg(long, value_name = "N")]
        retries: Option<u32>,
        /// Fixed delay between attempts in milliseconds (overrides config).
        #[arg(long, value_name = "MS")]
        delay_ms: Option<u64>,
        /// Overall request timeout in seconds (overrides config).
        #[arg(long, value_name = "SECS")]
        timeout_secs: Option<u64>,
        /// Extra request header, e.g. -H "Authorization: Bearer x". Repeatable.
        #[arg(short = 'H', long = "header", value_name = "HEADER")]
        headers: Vec<String>,
    },

    /// Show the config file path and effective settings.
    Config,

    /// Print shell completions to stdout.
    Completions {
        /// Target shell.
        shell: Shell,
    },
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        match cli.command {
            CliCommand::Get {
                url,
                code_pointer,
                ok_code,
                retries,
                delay_ms,
                timeout_secs,
                headers,
            } => {
                let cfg = config::load_or_init()?;
                tracing::debug!("loaded config: {:?}", cfg);
                let args = GetArgs {
                    url,
                    code_pointer,
                    ok_code,
                    retries,
                    delay_ms,
                    timeout_secs,
                    headers,
                };
                run_get(&cfg, args).await?;
            }
            CliCommand::Config => run_config()?,
            CliCommand::Completions { shell } => run_completions(shell),
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
