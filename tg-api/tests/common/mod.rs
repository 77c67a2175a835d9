//! Shared test utilities for integration tests.
//!
//! `MockBotApi` is a tiny local HTTP server standing in for the Bot API. It
//! records every request it receives, answers Bot API methods with a fixed
//! body and serves media fixtures under `/files/<name>`.

#![allow(dead_code)]

use std::collections::HashMap;
use std::convert::Infallible;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::{Arc, Mutex};

use http_body_util::{BodyExt, Full};
use hyper::body::{Bytes, Incoming};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Request, Response, StatusCode};
use tempfile::TempDir;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use tg_api::ApiClient;
use tg_core::config::ApiConfig;

pub const TEST_KEY: &str = "123:TEST";

pub const OK_REPLY: &str = r#"{"ok":true,"result":{"message_id":1}}"#;

/// Minimal PNG signature followed by padding.
pub fn png_bytes() -> Vec<u8> {
    let mut bytes = b"\x89PNG\r\n\x1a\n".to_vec();
    bytes.extend_from_slice(&[0u8; 64]);
    bytes
}

/// Bytes without any recognizable signature.
pub fn unknown_bytes() -> Vec<u8> {
    (1u8..=64).collect()
}

/// A request as seen by the mock server.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl Recorded {
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

#[derive(Default)]
struct MockState {
    reply: String,
    files: HashMap<String, Vec<u8>>,
    requests: Vec<Recorded>,
}

pub struct MockBotApi {
    addr: SocketAddr,
    state: Arc<Mutex<MockState>>,
    task: JoinHandle<()>,
}

impl MockBotApi {
    /// Start a server answering every Bot API method with `reply`.
    pub async fn start(reply: &str) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("failed to bind mock server");
        let addr = listener.local_addr().expect("no local addr");
        let state = Arc::new(Mutex::new(MockState {
            reply: reply.to_string(),
            ..MockState::default()
        }));

        let shared = state.clone();
        let task = tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                let state = shared.clone();
                tokio::spawn(async move {
                    let svc = service_fn(move |req| {
                        let state = state.clone();
                        async move { handle(req, state).await }
                    });
                    let _ = http1::Builder::new()
                        .serve_connection(hyper_util::rt::TokioIo::new(stream), svc)
                        .await;
                });
            }
        });

        Self { addr, state, task }
    }

    /// Serve `bytes` at `/files/<name>`.
    pub fn add_file(&self, name: &str, bytes: Vec<u8>) {
        self.state.lock().unwrap().files.insert(name.to_string(), bytes);
    }

    pub fn file_url(&self, name: &str) -> String {
        format!("http://{}/files/{}", self.addr, name)
    }

    pub fn base_url(&self) -> String {
        format!("http://{}/bot", self.addr)
    }

    /// Recorded Bot API calls, excluding fixture downloads.
    pub fn api_calls(&self) -> Vec<Recorded> {
        self.state
            .lock()
            .unwrap()
            .requests
            .iter()
            .filter(|r| !r.path.starts_with("/files/"))
            .cloned()
            .collect()
    }

    /// Build a client for `TEST_KEY` pointed at this server, staging into `upload_dir`.
    pub fn client(&self, upload_dir: &Path) -> ApiClient {
        ApiClient::new(TEST_KEY, &self.api_config(upload_dir)).expect("failed to build client")
    }

    pub fn api_config(&self, upload_dir: &Path) -> ApiConfig {
        ApiConfig {
            base_url: self.base_url(),
            timeout_ms: 5_000,
            upload_dir: upload_dir.to_string_lossy().into_owned(),
        }
    }
}

impl Drop for MockBotApi {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn handle(
    req: Request<Incoming>,
    state: Arc<Mutex<MockState>>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let method = req.method().to_string();
    let path = req.uri().path().to_string();
    let query = req.uri().query().map(str::to_string);
    let content_type = req
        .headers()
        .get(hyper::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let body = req
        .into_body()
        .collect()
        .await
        .map(|c| c.to_bytes().to_vec())
        .unwrap_or_default();

    let mut state = state.lock().unwrap();
    state.requests.push(Recorded {
        method,
        path: path.clone(),
        query,
        content_type,
        body,
    });

    let response = match path.strip_prefix("/files/") {
        Some(name) => match state.files.get(name) {
            Some(bytes) => Response::new(Full::new(Bytes::from(bytes.clone()))),
            None => {
                let mut not_found = Response::new(Full::new(Bytes::from_static(b"not found")));
                *not_found.status_mut() = StatusCode::NOT_FOUND;
                not_found
            }
        },
        None => Response::new(Full::new(Bytes::from(state.reply.clone()))),
    };
    Ok(response)
}

/// Create a temporary upload directory.
/// Returns the TempDir (must be held alive for the duration of the test).
pub fn create_upload_dir() -> TempDir {
    TempDir::new().expect("failed to create temp dir")
}

/// Number of entries left in a directory.
pub fn entries(dir: &Path) -> usize {
    std::fs::read_dir(dir).map(|it| it.count()).unwrap_or(0)
}
