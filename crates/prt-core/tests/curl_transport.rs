//! Integration test: enhanced client over libcurl against a local scripted server.

mod common;

use common::json_server::{self, Reply};
use prt_core::context::{RequestConfig, RetryOptions};
use prt_core::enhancer::enhance;
use prt_core::error::ErrorCode;
use prt_core::retry::RetryConfig;
use prt_core::transport::CurlTransport;
use prt_core::Client;
use serde_json::json;
use std::time::Duration;

fn code_not_zero() -> RetryOptions {
    RetryOptions::new().should_retry(|d| d["code"] != 0)
}

fn enhanced(config: RetryConfig) -> Client {
    let mut client = Client::new(CurlTransport::new().with_default_timeout(Duration::from_secs(5)));
    enhance(&mut client, config);
    client
}

#[tokio::test]
async fn logical_failure_then_success_over_http() {
    let server = json_server::start(vec![
        Reply::json(200, json!({"code": 1, "data": null})),
        Reply::json(200, json!({"code": 0, "data": "good"})),
    ]);
    let client = enhanced(RetryConfig::default());

    let res = client
        .request(RequestConfig::get(&server.url).retry(code_not_zero()))
        .await
        .expect("second attempt succeeds");
    assert_eq!(res.status, 200);
    assert_eq!(res.data, json!({"code": 0, "data": "good"}));
    assert_eq!(res.header("content-type"), Some("application/json"));
    assert_eq!(server.hits(), 2);
}

#[tokio::test]
async fn exhausted_retries_surface_last_payload() {
    let server = json_server::start(vec![Reply::json(200, json!({"code": 1, "data": null}))]);
    let client = enhanced(RetryConfig::default().with_retries(2));

    let err = client
        .request(RequestConfig::get(&server.url).retry(code_not_zero()))
        .await
        .unwrap_err();
    assert!(err.is_logical_failure());
    assert_eq!(err.response().unwrap().data["code"], 1);
    assert_eq!(server.hits(), 3);
}

#[tokio::test]
async fn server_error_retried_for_get() {
    let server = json_server::start(vec![
        Reply::json(500, json!({"message": "oops"})),
        Reply::json(200, json!({"code": 0})),
    ]);
    let client = enhanced(RetryConfig::default());

    let res = client
        .request(RequestConfig::get(&server.url).retry(code_not_zero()))
        .await
        .unwrap();
    assert_eq!(res.data["code"], 0);
    assert_eq!(server.hits(), 2);
}

#[tokio::test]
async fn server_error_kept_for_post() {
    let server = json_server::start(vec![Reply::json(503, json!({"message": "busy"}))]);
    let client = enhanced(RetryConfig::default());

    let err = client
        .request(
            RequestConfig::post(&server.url)
                .json(&json!({"q": 1}))
                .unwrap()
                .retry(code_not_zero()),
        )
        .await
        .unwrap_err();
    assert_eq!(err.code(), Some(ErrorCode::BadStatus));
    let res = err.response().unwrap();
    assert_eq!(res.status, 503);
    assert_eq!(res.data["message"], "busy");
    assert_eq!(server.hits(), 1);
    assert_eq!(server.methods(), vec!["POST".to_string()]);
}

#[tokio::test]
async fn refused_connection_is_retried_then_reported() {
    // Bind then drop to get a port nothing listens on.
    let port = {
        let l = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        l.local_addr().unwrap().port()
    };
    let url = format!("http://127.0.0.1:{}/test", port);
    let attempts = std::sync::Arc::new(std::sync::atomic::AtomicU32::new(0));
    let counter = std::sync::Arc::clone(&attempts);
    let client = enhanced(RetryConfig::default().with_retries(1).on_retry(move |_, _, _| {
        counter.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
    }));

    let err = client.get(url).await.unwrap_err();
    assert_eq!(err.code(), Some(ErrorCode::Connection));
    assert!(err.response().is_none());
    assert_eq!(attempts.load(std::sync::atomic::Ordering::SeqCst), 1);
}
