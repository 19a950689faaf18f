use std::{
    collections::HashMap,
    io::{Read, Write},
    net::{TcpListener, TcpStream},
    sync::{Arc, Mutex},
    thread,
};

/// Canned response keyed by `"METHOD /path"` (query string excluded).
#[derive(Clone)]
pub struct Route {
    pub status: &'static str,
    pub body: String,
}

/// Minimal HTTP server answering from a route table on a background thread.
pub struct StubServer {
    pub base_url: String,
    routes: Arc<Mutex<HashMap<String, Route>>>,
    requests: Arc<Mutex<Vec<String>>>,
}

impl StubServer {
    pub fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind stub server");
        let addr = listener.local_addr().expect("stub server address");
        let routes: Arc<Mutex<HashMap<String, Route>>> = Arc::default();
        let requests: Arc<Mutex<Vec<String>>> = Arc::default();
        let thread_routes = Arc::clone(&routes);
        let thread_requests = Arc::clone(&requests);
        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(mut stream) = stream else {
                    continue;
                };
                let request = read_request(&mut stream);
                let key = route_key(&request);
                thread_requests.lock().unwrap().push(request);
                let route = thread_routes.lock().unwrap().get(&key).cloned();
                let route = route.unwrap_or(Route {
                    status: "404 Not Found",
                    body: r#"{"detail":"Not found"}"#.to_string(),
                });
                let response = format!(
                    "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    route.status,
                    route.body.len(),
                    route.body
                );
                let _ = stream.write_all(response.as_bytes());
            }
        });
        Self {
            base_url: format!("http://{addr}/"),
            routes,
            requests,
        }
    }

    pub fn route(&self, key: &str, status: &'static str, body: impl Into<String>) {
        self.routes.lock().unwrap().insert(
            key.to_string(),
            Route {
                status,
                body: body.into(),
            },
        );
    }

    /// Raw requests received so far, oldest first.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

fn route_key(request: &str) -> String {
    let line = request.lines().next().unwrap_or_default();
    let mut parts = line.split_whitespace();
    let method = parts.next().unwrap_or_default();
    let target = parts.next().unwrap_or_default();
    let path = target.split('?').next().unwrap_or_default();
    format!("{method} {path}")
}

fn read_request(stream: &mut TcpStream) -> String {
    let mut raw = Vec::new();
    let mut buf = [0u8; 4096];
    loop {
        let Ok(read) = stream.read(&mut buf) else {
            break;
        };
        if read == 0 {
            break;
        }
        raw.extend_from_slice(&buf[..read]);
        if let Some(end) = raw.windows(4).position(|window| window == b"\r\n\r\n") {
            let headers = String::from_utf8_lossy(&raw[..end]).to_ascii_lowercase();
            let body_len = headers
                .lines()
                .find_map(|line| line.strip_prefix("content-length:"))
                .and_then(|value| value.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if raw.len() >= end + 4 + body_len {
                break;
            }
        }
    }
    String::from_utf8_lossy(&raw).into_owned()
}
