//! `prt get <url>` – fetch a URL through an enhanced client.

use anyhow::{bail, Context, Result};
use prt_core::config::PrtConfig;
use prt_core::context::{RequestConfig, RetryOptions};
use prt_core::enhancer::enhance;
use prt_core::{Client, Error};
use serde_json::Value;
use std::time::Duration;

/// Options of `prt get`, after clap parsing.
#[derive(Debug, Clone)]
pub struct GetArgs {
    pub url: String,
    pub code_pointer: String,
    pub ok_code: String,
    pub retries: Option<u32>,
    pub delay_ms: Option<u64>,
    pub timeout_secs: Option<u64>,
    pub headers: Vec<String>,
}

/// Interpret `--ok-code`: JSON if it parses (`0`, `"ok"`, `true`), else a plain string.
pub(crate) fn parse_ok_code(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

/// Payload predicate: a logical failure unless the value at `pointer` equals `ok`.
/// A payload without the field counts as a failure.
pub(crate) fn code_predicate(pointer: String, ok: Value) -> impl Fn(&Value) -> bool + Send + Sync {
    move |payload: &Value| payload.pointer(&pointer) != Some(&ok)
}

/// Split a `Name: value` header argument.
pub(crate) fn parse_header(raw: &str) -> Result<(String, String)> {
    match raw.split_once(':') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), value.trim().to_string()))
        }
        _ => bail!("invalid header {:?}, expected \"Name: value\"", raw),
    }
}

fn print_payload(data: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(data).context("render payload")?);
    Ok(())
}

pub async fn run_get(cfg: &PrtConfig, args: GetArgs) -> Result<()> {
    if !args.code_pointer.is_empty() && !args.code_pointer.starts_with('/') {
        bail!("--code-pointer must be a JSON pointer starting with '/'");
    }

    let mut settings = cfg.retry_settings();
    if let Some(n) = args.retries {
        settings.retries = n;
    }
    if let Some(ms) = args.delay_ms {
        settings.delay_ms = ms;
    }
    let mut transport = cfg.transport();
    if let Some(secs) = args.timeout_secs {
        transport.default_timeout = Duration::from_secs(secs);
    }

    let mut client = Client::new(transport);
    enhance(&mut client, settings.to_retry_config());

    let ok = parse_ok_code(&args.ok_code);
    let mut request = RequestConfig::get(&args.url).retry(
        RetryOptions::new().should_retry(code_predicate(args.code_pointer.clone(), ok)),
    );
    for raw in &args.headers {
        let (name, value) = parse_header(raw)?;
        request = request.header(name, value);
    }

    tracing::info!(url = %args.url, retries = settings.retries, "get");
    match client.request(request).await {
        Ok(res) => {
            println!("HTTP {} (attempt {})", res.status, res.request.attempt);
            print_payload(&res.data)
        }
        Err(err) => {
            if let Some(res) = err.response() {
                println!("HTTP {} (attempt {})", res.status, res.request.attempt);
                print_payload(&res.data)?;
            }
            match err {
                Error::Logical(_) => bail!(
                    "payload still reports a failure after {} retries",
                    settings.retries
                ),
                other => Err(other).with_context(|| format!("GET {}", args.url)),
            }
        }
    }
}
