//! Minimal HTTP/1.1 server for integration tests.
//!
//! Routes by request path (query string ignored). Each route either answers
//! with a fixed status and body or hangs up without responding. Hits per path
//! and the request lines are recorded so tests can assert what was asked.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::thread;

#[derive(Debug, Clone)]
pub enum Route {
    Respond { status: u16, body: Vec<u8> },
    /// Close the connection without sending anything.
    HangUp,
}

impl Route {
    pub fn json(status: u16, body: &str) -> Self {
        Route::Respond {
            status,
            body: body.as_bytes().to_vec(),
        }
    }
}

#[derive(Default)]
struct Log {
    hits: HashMap<String, usize>,
    targets: Vec<String>,
    authorization: Vec<Option<String>>,
}

pub struct StubServer {
    pub base_url: String,
    log: Arc<Mutex<Log>>,
}

impl StubServer {
    /// Start serving `routes` on a loopback port. Runs until the process exits.
    pub fn start(routes: Vec<(&str, Route)>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        let port = listener.local_addr().unwrap().port();
        let routes: Arc<HashMap<String, Route>> = Arc::new(
            routes
                .into_iter()
                .map(|(p, r)| (p.to_string(), r))
                .collect(),
        );
        let log = Arc::new(Mutex::new(Log::default()));
        let log_srv = Arc::clone(&log);
        thread::spawn(move || {
            for stream in listener.incoming().flatten() {
                let routes = Arc::clone(&routes);
                let log = Arc::clone(&log_srv);
                thread::spawn(move || handle(stream, &routes, &log));
            }
        });
        Self {
            base_url: format!("http://127.0.0.1:{}", port),
            log,
        }
    }

    pub fn hits(&self, path: &str) -> usize {
        self.log.lock().unwrap().hits.get(path).copied().unwrap_or(0)
    }

    /// Request targets (path + query) in arrival order.
    pub fn targets(&self) -> Vec<String> {
        self.log.lock().unwrap().targets.clone()
    }

    pub fn authorization(&self) -> Vec<Option<String>> {
        self.log.lock().unwrap().authorization.clone()
    }
}

fn handle(mut stream: std::net::TcpStream, routes: &HashMap<String, Route>, log: &Mutex<Log>) {
    let _ = stream.set_read_timeout(Some(std::time::Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(std::time::Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) => return,
        Ok(n) => n,
        Err(_) => return,
    };
    let request = match std::str::from_utf8(&buf[..n]) {
        Ok(s) => s,
        Err(_) => return,
    };
    let (target, authorization) = parse_request(request);
    let path = target.split('?').next().unwrap_or("").to_string();
    {
        let mut log = log.lock().unwrap();
        *log.hits.entry(path.clone()).or_insert(0) += 1;
        log.targets.push(target.to_string());
        log.authorization.push(authorization);
    }

    match routes.get(&path) {
        Some(Route::HangUp) => {}
        Some(Route::Respond { status, body }) => {
            let header = format!(
                "HTTP/1.1 {} Stub\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                status,
                body.len()
            );
            let _ = stream.write_all(header.as_bytes());
            let _ = stream.write_all(body);
        }
        None => {
            let _ = stream.write_all(
                b"HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
            );
        }
    }
}

/// Returns (request target, Authorization header value).
fn parse_request(request: &str) -> (&str, Option<String>) {
    let mut target = "";
    let mut authorization = None;
    for (i, line) in request.lines().enumerate() {
        let line = line.trim();
        if i == 0 {
            target = line.split_whitespace().nth(1).unwrap_or("");
            continue;
        }
        if line.is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            if name.trim().eq_ignore_ascii_case("authorization") {
                authorization = Some(value.trim().to_string());
            }
        }
    }
    (target, authorization)
}
