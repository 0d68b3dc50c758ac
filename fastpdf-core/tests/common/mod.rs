//! In-process stand-in for the FastPDF service
//!
//! Runs an axum router on its own tokio runtime thread so that the blocking
//! client can be driven from ordinary `#[test]` functions. Every request is
//! recorded, and every request is answered with the configured status and body.

#![allow(dead_code)]

use std::io::{Read, Write};
use std::net::{Shutdown, SocketAddr};
use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::Duration;

use axum::{
    extract::{Multipart, State},
    http::{HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};

/// One multipart part as received by the service
#[derive(Debug, Clone)]
pub struct ReceivedPart {
    pub name: String,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub data: Vec<u8>,
}

impl ReceivedPart {
    pub fn text(&self) -> String {
        String::from_utf8(self.data.clone()).expect("part is not UTF-8")
    }
}

/// One request as received by the service
#[derive(Debug, Clone)]
pub struct ReceivedRequest {
    pub method: Method,
    pub path: String,
    pub headers: HeaderMap,
    pub parts: Vec<ReceivedPart>,
}

impl ReceivedRequest {
    pub fn header_values(&self, name: &str) -> Vec<String> {
        self.headers
            .get_all(name)
            .iter()
            .map(|v| v.to_str().unwrap().to_string())
            .collect()
    }

    pub fn part(&self, name: &str) -> &ReceivedPart {
        self.parts
            .iter()
            .find(|p| p.name == name)
            .unwrap_or_else(|| panic!("no part named {name}"))
    }

    pub fn json_field(&self, name: &str) -> serde_json::Value {
        serde_json::from_slice(&self.part(name).data).expect("field is not JSON")
    }
}

#[derive(Clone)]
struct MockState {
    status: StatusCode,
    body: Arc<Vec<u8>>,
    received: Arc<Mutex<Vec<ReceivedRequest>>>,
}

pub struct MockService {
    addr: SocketAddr,
    received: Arc<Mutex<Vec<ReceivedRequest>>>,
}

impl MockService {
    /// Starts a service answering every request with `status` and `body`.
    pub fn start(status: StatusCode, body: impl Into<Vec<u8>>) -> Self {
        let received = Arc::new(Mutex::new(Vec::new()));
        let state = MockState {
            status,
            body: Arc::new(body.into()),
            received: received.clone(),
        };
        let app = Router::new()
            .route("/{version}/token", get(token))
            .route("/{version}/pdf/{*operation}", post(upload))
            .with_state(state);

        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .expect("Failed to build runtime");
            runtime.block_on(async move {
                let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
                    .await
                    .expect("Failed to bind mock service");
                tx.send(listener.local_addr().unwrap()).unwrap();
                axum::serve(listener, app).await.unwrap();
            });
        });

        let addr = rx.recv().expect("Mock service did not start");
        Self { addr, received }
    }

    /// Service root, without version segment
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn requests(&self) -> Vec<ReceivedRequest> {
        self.received.lock().unwrap().clone()
    }

    pub fn single_request(&self) -> ReceivedRequest {
        let requests = self.requests();
        assert_eq!(requests.len(), 1, "expected exactly one request");
        requests.into_iter().next().unwrap()
    }
}

/// Address with nothing listening on it
pub fn closed_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

/// Service that answers every request with a `500` whose body is cut short
///
/// The response announces more bytes than it sends and then closes, so the
/// client sees the status but cannot read the body.
pub fn truncated_error_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    thread::spawn(move || {
        for stream in listener.incoming() {
            let Ok(mut stream) = stream else { break };
            let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));

            let mut request = Vec::new();
            let mut buf = [0u8; 4096];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                match stream.read(&mut buf) {
                    Ok(0) | Err(_) => break,
                    Ok(n) => request.extend_from_slice(&buf[..n]),
                }
            }

            let _ = stream.write_all(
                b"HTTP/1.1 500 Internal Server Error\r\nContent-Length: 100\r\n\r\nabc",
            );
            let _ = stream.shutdown(Shutdown::Write);
            // Drain the rest of the request until the client hangs up.
            while let Ok(n) = stream.read(&mut buf) {
                if n == 0 {
                    break;
                }
            }
        }
    });

    format!("http://{addr}")
}

async fn token(
    State(state): State<MockState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    state.received.lock().unwrap().push(ReceivedRequest {
        method,
        path: uri.path().to_string(),
        headers,
        parts: Vec::new(),
    });
    respond(&state)
}

async fn upload(
    State(state): State<MockState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Response {
    let mut parts = Vec::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .expect("Failed to read multipart field")
    {
        let name = field.name().unwrap_or("").to_string();
        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let data = field
            .bytes()
            .await
            .expect("Failed to read field data")
            .to_vec();
        parts.push(ReceivedPart {
            name,
            file_name,
            content_type,
            data,
        });
    }

    state.received.lock().unwrap().push(ReceivedRequest {
        method,
        path: uri.path().to_string(),
        headers,
        parts,
    });
    respond(&state)
}

fn respond(state: &MockState) -> Response {
    (state.status, state.body.as_ref().clone()).into_response()
}
