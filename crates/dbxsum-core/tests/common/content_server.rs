//! Minimal HTTP/1.1 server imitating a content download endpoint for integration tests.
//!
//! Answers every request with a fixed status, an optional
//! `Dropbox-API-Result` header and a fixed body, and records the raw
//! request head so tests can assert on what the client sent.

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct ContentResponse {
    pub status: &'static str,
    /// Value of the `Dropbox-API-Result` header, if any.
    pub api_result: Option<String>,
    pub body: Vec<u8>,
}

impl ContentResponse {
    pub fn ok(api_result: String, body: Vec<u8>) -> Self {
        Self {
            status: "200 OK",
            api_result: Some(api_result),
            body,
        }
    }
}

pub struct ContentServer {
    /// Base URL, e.g. "http://127.0.0.1:12345/".
    pub url: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl ContentServer {
    /// Request heads received so far, oldest first.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

/// Starts a server in a background thread. It runs until the process exits.
pub fn start(response: ContentResponse) -> ContentServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let requests = Arc::new(Mutex::new(Vec::new()));
    let recorded = Arc::clone(&requests);
    let response = Arc::new(response);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let response = Arc::clone(&response);
            let recorded = Arc::clone(&recorded);
            thread::spawn(move || handle(stream, &response, &recorded));
        }
    });
    ContentServer {
        url: format!("http://127.0.0.1:{}/", port),
        requests,
    }
}

fn read_head(stream: &mut TcpStream) -> Option<String> {
    let mut head = Vec::new();
    let mut buf = [0u8; 4096];
    while !head.windows(4).any(|w| w == b"\r\n\r\n") {
        match stream.read(&mut buf) {
            Ok(0) | Err(_) => return None,
            Ok(n) => head.extend_from_slice(&buf[..n]),
        }
    }
    String::from_utf8(head).ok()
}

fn handle(mut stream: TcpStream, response: &ContentResponse, recorded: &Mutex<Vec<String>>) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(5)));
    let head = match read_head(&mut stream) {
        Some(h) => h,
        None => return,
    };
    recorded.lock().unwrap().push(head);

    let api_result = response
        .api_result
        .as_ref()
        .map(|r| format!("Dropbox-API-Result: {}\r\n", r))
        .unwrap_or_default();
    let head = format!(
        "HTTP/1.1 {}\r\nContent-Length: {}\r\n{}Connection: close\r\n\r\n",
        response.status,
        response.body.len(),
        api_result
    );
    let _ = stream.write_all(head.as_bytes());
    let _ = stream.write_all(&response.body);
}
