//! Minimal HTTP/1.1 server that answers each connection with the next scripted reply.
//!
//! Replies are consumed in order; once the script runs out the last reply is
//! repeated. Every connection is closed after one response.

use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;

#[derive(Debug, Clone)]
pub struct Reply {
    pub status: u16,
    pub body: String,
}

impl Reply {
    pub fn json(status: u16, body: serde_json::Value) -> Self {
        Self {
            status,
            body: body.to_string(),
        }
    }
}

/// Handle to a running server.
#[derive(Debug, Clone)]
pub struct JsonServer {
    pub url: String,
    hits: Arc<AtomicUsize>,
    methods: Arc<Mutex<Vec<String>>>,
}

impl JsonServer {
    /// Number of requests served so far.
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    /// Request methods in arrival order.
    pub fn methods(&self) -> Vec<String> {
        self.methods.lock().unwrap().clone()
    }
}

/// Starts a server in a background thread. The server runs until the process exits.
pub fn start(replies: Vec<Reply>) -> JsonServer {
    assert!(!replies.is_empty(), "script needs at least one reply");
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let hits = Arc::new(AtomicUsize::new(0));
    let methods = Arc::new(Mutex::new(Vec::new()));
    let server = JsonServer {
        url: format!("http://127.0.0.1:{}/test", port),
        hits: Arc::clone(&hits),
        methods: Arc::clone(&methods),
    };
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let n = hits.fetch_add(1, Ordering::SeqCst);
            let reply = replies
                .get(n)
                .or_else(|| replies.last())
                .cloned()
                .expect("non-empty script");
            handle(stream, &reply, &methods);
        }
    });
    server
}

fn handle(mut stream: std::net::TcpStream, reply: &Reply, methods: &Mutex<Vec<String>>) {
    let _ = stream.set_read_timeout(Some(std::time::Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(std::time::Duration::from_secs(2)));
    let request = match read_request(&mut stream) {
        Some(r) => r,
        None => return,
    };
    let method = request.split_whitespace().next().unwrap_or("").to_string();
    methods.lock().unwrap().push(method);
    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        reply.status,
        reason(reply.status),
        reply.body.len(),
        reply.body
    );
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.flush();
}

/// Reads the request head and, if announced, the whole body so the socket is
/// drained before the response is written.
fn read_request(stream: &mut std::net::TcpStream) -> Option<String> {
    let mut data = Vec::new();
    let mut buf = [0u8; 8192];
    loop {
        let n = stream.read(&mut buf).ok()?;
        if n == 0 {
            break;
        }
        data.extend_from_slice(&buf[..n]);
        let text = String::from_utf8_lossy(&data);
        if let Some(head_end) = text.find("\r\n\r\n") {
            let body_len = text[..head_end]
                .lines()
                .filter_map(|l| l.split_once(':'))
                .find(|(k, _)| k.trim().eq_ignore_ascii_case("content-length"))
                .and_then(|(_, v)| v.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if data.len() >= head_end + 4 + body_len {
                break;
            }
        }
    }
    if data.is_empty() {
        return None;
    }
    Some(String::from_utf8_lossy(&data).into_owned())
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        400 => "Bad Request",
        404 => "Not Found",
        500 => "Internal Server Error",
        503 => "Service Unavailable",
        _ => "Unknown",
    }
}
