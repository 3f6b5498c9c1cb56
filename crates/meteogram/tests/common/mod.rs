//! Common test helpers for meteogram integration tests
//!
//! Provides:
//! - An in-memory meteogram source that records requests
//! - A one-shot local HTTP server for exercising the real client

#![allow(dead_code)]

use std::sync::Mutex;

use async_trait::async_trait;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use meteogram::{AtmoError, AtmoResult, MeteogramResponse, MeteogramSource, ModelName};
use atmo_common::Location;
use test_utils::MeteogramFixture;

/// What the fake source answers with.
pub enum FakeReply {
    Body(String),
    Fail(String),
}

/// In-memory source returning a canned body and recording every request.
pub struct FakeMeteogramSource {
    reply: FakeReply,
    requests: Mutex<Vec<(String, Location)>>,
}

impl FakeMeteogramSource {
    pub fn with_fixture(fixture: &MeteogramFixture) -> Self {
        Self::with_body(fixture.to_json())
    }

    pub fn with_body(body: impl Into<String>) -> Self {
        Self {
            reply: FakeReply::Body(body.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            reply: FakeReply::Fail(message.to_string()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Models and locations requested so far, in order.
    pub fn requests(&self) -> Vec<(String, Location)> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl MeteogramSource for FakeMeteogramSource {
    async fn fetch(&self, model: &ModelName, location: Location) -> AtmoResult<MeteogramResponse> {
        self.requests
            .lock()
            .unwrap()
            .push((model.to_string(), location));

        match &self.reply {
            FakeReply::Body(body) => MeteogramResponse::parse(body),
            FakeReply::Fail(message) => Err(AtmoError::fetch(message.clone())),
        }
    }
}

/// Serve exactly one HTTP response on an ephemeral localhost port.
///
/// Returns the base URL and a handle yielding the raw request line.
pub async fn serve_once(status: &str, body: String) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let status = status.to_string();

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();

        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
        }

        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();

        let text = String::from_utf8_lossy(&request).to_string();
        text.lines().next().unwrap_or_default().to_string()
    });

    (format!("http://{}", addr), handle)
}
