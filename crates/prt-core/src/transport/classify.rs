//! Classify curl errors into transport error codes.

use crate::error::ErrorCode;

/// Map a curl error to an [`ErrorCode`].
pub fn classify_curl_error(e: &curl::Error) -> ErrorCode {
    if e.is_operation_timedout() {
        return ErrorCode::Timeout;
    }
    if e.is_couldnt_resolve_host() || e.is_couldnt_resolve_proxy() {
        return ErrorCode::DnsFailure;
    }
    if e.is_ssl_connect_error()
        || e.is_peer_failed_verification()
        || e.is_ssl_certproblem()
        || e.is_ssl_cipher()
    {
        return ErrorCode::Tls;
    }
    if e.is_couldnt_connect()
        || e.is_read_error()
        || e.is_recv_error()
        || e.is_send_error()
        || e.is_got_nothing()
        || e.is_partial_file()
    {
        return ErrorCode::Connection;
    }
    ErrorCode::Other
}
