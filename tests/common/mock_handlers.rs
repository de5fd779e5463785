/*!
 * Test-only domain handlers
 *
 * The library ships `MockHandler` for scripted confidence and failure modes.
 * The handlers here cover what tests need beyond that: capturing the call
 * arguments and answering over a real local HTTP socket.
 */

use async_trait::async_trait;
use std::sync::Mutex;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

use kisanroute::classification::IntentCategory;
use kisanroute::errors::HandlerError;
use kisanroute::handlers::{DomainHandler, HandlerResponse};

/// Arguments of one recorded call
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub category: IntentCategory,
    pub pivot_text: String,
    pub location_hint: Option<String>,
}

/// Handler that records every call and answers with a fixed text
#[derive(Debug)]
pub struct RecordingHandler {
    answer: String,
    confidence: f64,
    calls: Mutex<Vec<RecordedCall>>,
}

impl RecordingHandler {
    pub fn new(answer: &str, confidence: f64) -> Self {
        Self {
            answer: answer.to_string(),
            confidence,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Calls received so far
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl DomainHandler for RecordingHandler {
    fn name(&self) -> &str {
        "recording"
    }

    async fn invoke(
        &self,
        category: IntentCategory,
        pivot_text: &str,
        location_hint: Option<&str>,
    ) -> Result<HandlerResponse, HandlerError> {
        self.calls.lock().unwrap().push(RecordedCall {
            category,
            pivot_text: pivot_text.to_string(),
            location_hint: location_hint.map(str::to_string),
        });
        Ok(HandlerResponse::new(category, self.answer.clone(), self.name(), self.confidence))
    }
}

/// Handler that answers for a different category than it was asked for
#[derive(Debug)]
pub struct MisroutingHandler;

#[async_trait]
impl DomainHandler for MisroutingHandler {
    fn name(&self) -> &str {
        "misrouting"
    }

    async fn invoke(
        &self,
        _category: IntentCategory,
        _pivot_text: &str,
        _location_hint: Option<&str>,
    ) -> Result<HandlerResponse, HandlerError> {
        Ok(HandlerResponse::new(IntentCategory::Finance, "Apply for KCC", self.name(), 0.9))
    }
}

/// Handler that holds its thread with a synchronous sleep before answering
#[derive(Debug)]
pub struct BlockingHandler {
    block_for: Duration,
}

impl BlockingHandler {
    pub fn new(block_ms: u64) -> Self {
        Self {
            block_for: Duration::from_millis(block_ms),
        }
    }
}

#[async_trait]
impl DomainHandler for BlockingHandler {
    fn name(&self) -> &str {
        "blocking"
    }

    async fn invoke(
        &self,
        category: IntentCategory,
        _pivot_text: &str,
        _location_hint: Option<&str>,
    ) -> Result<HandlerResponse, HandlerError> {
        std::thread::sleep(self.block_for);
        Ok(HandlerResponse::new(category, "Late answer", self.name(), 0.9))
    }
}

/// Handler that panics on every call
#[derive(Debug)]
pub struct PanickingHandler;

#[async_trait]
impl DomainHandler for PanickingHandler {
    fn name(&self) -> &str {
        "panicking"
    }

    async fn invoke(
        &self,
        _category: IntentCategory,
        _pivot_text: &str,
        _location_hint: Option<&str>,
    ) -> Result<HandlerResponse, HandlerError> {
        panic!("handler bug");
    }
}

/// Serve exactly one HTTP request on a local port with a canned JSON reply.
///
/// Returns the endpoint URL and a handle resolving to the raw request text.
pub async fn serve_once(status: u16, body: &'static str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let request = read_request(&mut socket).await;
        let response = format!(
            "HTTP/1.1 {} X\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        let _ = socket.shutdown().await;
        request
    });

    (format!("http://{}/advice", addr), handle)
}

async fn read_request(socket: &mut TcpStream) -> String {
    let mut buffer = Vec::new();
    let mut chunk = [0u8; 1024];

    loop {
        let n = socket.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        buffer.extend_from_slice(&chunk[..n]);

        if let Some(header_end) = buffer.windows(4).position(|w| w == b"\r\n\r\n") {
            let headers = String::from_utf8_lossy(&buffer[..header_end]).to_lowercase();
            let content_length = headers
                .lines()
                .find_map(|line| line.strip_prefix("content-length:"))
                .and_then(|value| value.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if buffer.len() >= header_end + 4 + content_length {
                break;
            }
        }
    }

    String::from_utf8_lossy(&buffer).to_string()
}
