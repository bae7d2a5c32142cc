//! Mock user directory server for testing
//!
//! A tiny HTTP server on a background thread that answers
//! `GET /users?username=...` the way the real directory does: a JSON array
//! of matching accounts, `[]` when nobody holds the name.

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use serde::Serialize;

/// Mock user directory for testing
pub struct MockUsersServer {
    port: u16,
    running: Arc<AtomicBool>,
    thread_handle: Option<thread::JoinHandle<()>>,
}

/// Configuration for the mock directory
#[derive(Debug, Clone, Default)]
pub struct MockConfig {
    /// Registered usernames; IDs are assigned 1, 2, 3... in order
    pub usernames: Vec<String>,
    /// Answer every request with this status and an error body
    pub fail_status: Option<u16>,
    /// Answer 200 with a body that is not a JSON array
    pub malformed_body: bool,
    /// Delay in milliseconds before responding
    pub delay_ms: u64,
}

impl MockConfig {
    pub fn with_usernames(usernames: &[&str]) -> Self {
        Self {
            usernames: usernames.iter().map(|u| u.to_string()).collect(),
            ..Default::default()
        }
    }
}

#[derive(Serialize)]
struct MockUser {
    id: i64,
    username: String,
    email: String,
}

impl MockUsersServer {
    /// Start a new mock server on a random available port
    pub fn start(config: MockConfig) -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0")?;
        let port = listener.local_addr()?.port();
        let running = Arc::new(AtomicBool::new(true));
        let running_clone = running.clone();

        // Non-blocking so the accept loop can observe shutdown
        listener.set_nonblocking(true)?;

        let thread_handle = thread::spawn(move || {
            while running_clone.load(Ordering::SeqCst) {
                match listener.accept() {
                    Ok((stream, _)) => {
                        let cfg = config.clone();
                        thread::spawn(move || {
                            handle_connection(stream, &cfg);
                        });
                    }
                    Err(ref e) if e.kind() == std::io::ErrorKind::WouldBlock => {
                        thread::sleep(std::time::Duration::from_millis(10));
                    }
                    Err(_) => break,
                }
            }
        });

        Ok(Self {
            port,
            running,
            thread_handle: Some(thread_handle),
        })
    }

    /// Base URL for this mock server
    pub fn base_url(&self) -> String {
        format!("http://127.0.0.1:{}", self.port)
    }

    /// Stop the mock server
    pub fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(handle) = self.thread_handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for MockUsersServer {
    fn drop(&mut self) {
        self.stop();
    }
}

fn handle_connection(mut stream: TcpStream, config: &MockConfig) {
    // Accepted sockets inherit non-blocking mode on some platforms
    let _ = stream.set_nonblocking(false);

    let mut buffer = [0; 4096];
    let Ok(n) = stream.read(&mut buffer) else {
        return;
    };
    let request = String::from_utf8_lossy(&buffer[..n]);

    if config.delay_ms > 0 {
        thread::sleep(std::time::Duration::from_millis(config.delay_ms));
    }

    let first_line = request.lines().next().unwrap_or("");
    let parts: Vec<&str> = first_line.split_whitespace().collect();
    if parts.len() < 2 {
        send_response(&mut stream, 400, "Bad Request", r#"{"error": "Invalid request"}"#);
        return;
    }

    if let Some(status) = config.fail_status {
        send_response(&mut stream, status, "Error", r#"{"error": "Simulated failure"}"#);
        return;
    }

    let (method, target) = (parts[0], parts[1]);
    let (path, query) = target.split_once('?').unwrap_or((target, ""));

    if method != "GET" {
        send_response(&mut stream, 405, "Method Not Allowed", r#"{"error": "Method not allowed"}"#);
        return;
    }
    if path != "/users" {
        send_response(&mut stream, 404, "Not Found", r#"{"error": "Endpoint not found"}"#);
        return;
    }

    if config.malformed_body {
        send_response(&mut stream, 200, "OK", r#"{"users": "not-a-list"}"#);
        return;
    }

    let wanted: Option<String> = url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == "username")
        .map(|(_, value)| value.into_owned());

    let matches: Vec<MockUser> = config
        .usernames
        .iter()
        .enumerate()
        .filter(|(_, name)| wanted.as_deref().map_or(true, |w| w == name.as_str()))
        .map(|(i, name)| MockUser {
            id: (i + 1) as i64,
            username: name.clone(),
            email: format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
        })
        .collect();

    let body = serde_json::to_string(&matches).unwrap_or_else(|_| "[]".to_string());
    send_response(&mut stream, 200, "OK", &body);
}

fn send_response(stream: &mut TcpStream, status: u16, status_text: &str, body: &str) {
    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        status_text,
        body.len(),
        body
    );
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.flush();
}
