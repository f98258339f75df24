//! Tests for the get subcommand and its helpers.

use super::parse;
use crate::cli::commands::{code_predicate, parse_header, parse_ok_code};
use crate::cli::CliCommand;
use serde_json::json;

#[test]
fn cli_parse_get_defaults() {
    match parse(&["prt", "get", "https://example.com/api"]) {
        CliCommand::Get {
            url,
            code_pointer,
            ok_code,
            retries,
            delay_ms,
            timeout_secs,
            headers,
        } => {
            assert_eq!(url, "https://example.com/api");
            assert_eq!(code_pointer, "/code");
            assert_eq!(ok_code, "0");
            assert!(retries.is_none());
            assert!(delay_ms.is_none());
            assert!(timeout_secs.is_none());
            assert!(headers.is_empty());
        }
        _ => panic!("expected Get"),
    }
}

#[test]
fn cli_parse_get_overrides() {
    match parse(&[
        "prt",
        "get",
        "https://example.com/api",
        "--code-pointer",
        "/status/code",
        "--ok-code",
        "\"OK\"",
        "--retries",
        "5",
        "--delay-ms",
        "200",
        "-H",
        "Accept: application/json",
        "-H",
        "X-Trace: 1",
    ]) {
        CliCommand::Get {
            code_pointer,
            ok_code,
            retries,
            delay_ms,
            headers,
            ..
        } => {
            assert_eq!(code_pointer, "/status/code");
            assert_eq!(ok_code, "\"OK\"");
            assert_eq!(retries, Some(5));
            assert_eq!(delay_ms, Some(200));
            assert_eq!(headers.len(), 2);
        }
        _ => panic!("expected Get with overrides"),
    }
}

#[test]
fn ok_code_parsing() {
    assert_eq!(parse_ok_code("0"), json!(0));
    assert_eq!(parse_ok_code("\"OK\""), json!("OK"));
    assert_eq!(parse_ok_code("success"), json!("success"));
}

#[test]
fn predicate_compares_pointer_value() {
    let p = code_predicate("/code".to_string(), json!(0));
    assert!(!p(&json!({"code": 0, "data": "good"})));
    assert!(p(&json!({"code": 1, "data": null})));
    assert!(p(&json!({"data": "no code"})));

    let nested = code_predicate("/status/code".to_string(), json!("OK"));
    assert!(!nested(&json!({"status": {"code": "OK"}})));
    assert!(nested(&json!({"status": {"code": "ERR"}})));
}

#[test]
fn header_parsing() {
    assert_eq!(
        parse_header("Authorization: Bearer abc").unwrap(),
        ("Authorization".to_string(), "Bearer abc".to_string())
    );
    assert!(parse_header("no-colon").is_err());
    assert!(parse_header(": value").is_err());
}
