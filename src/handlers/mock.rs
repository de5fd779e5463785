/*!
 * Mock handler implementations for testing.
 *
 * This module provides scripted handlers that simulate different behaviors:
 * - `MockHandler::working()` - Always answers with a fixed confidence
 * - `MockHandler::with_confidence(c)` - Answers with the given confidence
 * - `MockHandler::failing()` - Always fails with an error
 * - `MockHandler::slow(ms)` - Answers after a delay (for timeout testing)
 */

use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use crate::classification::IntentCategory;
use crate::errors::HandlerError;

use super::{DomainHandler, HandlerResponse};

/// Behavior mode for the mock handler
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockBehavior {
    /// Always answers with the given confidence
    Working { confidence: f64 },
    /// Fails intermittently (every Nth request)
    Intermittent { fail_every: usize },
    /// Always fails with an error
    Failing,
    /// Answers with empty text
    Empty,
    /// Answers after a delay
    Slow { delay_ms: u64 },
}

/// Scripted handler for testing the dispatch path
#[derive(Debug)]
pub struct MockHandler {
    /// Name reported as the response source
    name: String,
    /// Behavior mode
    behavior: MockBehavior,
    /// Request counter for intermittent failures
    request_count: Arc<AtomicUsize>,
    /// Custom response generator (optional)
    custom_response: Option<fn(IntentCategory, &str) -> String>,
}

impl MockHandler {
    /// Create a new mock handler with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            name: "mock".to_string(),
            behavior,
            request_count: Arc::new(AtomicUsize::new(0)),
            custom_response: None,
        }
    }

    /// Create a working mock handler with confidence 0.9
    pub fn working() -> Self {
        Self::with_confidence(0.9)
    }

    /// Create a working mock handler with the given confidence
    pub fn with_confidence(confidence: f64) -> Self {
        Self::new(MockBehavior::Working { confidence })
    }

    /// Create an intermittently failing mock handler
    pub fn intermittent(fail_every: usize) -> Self {
        Self::new(MockBehavior::Intermittent { fail_every })
    }

    /// Create a failing mock handler that always errors
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Create a mock that answers with empty text
    pub fn empty() -> Self {
        Self::new(MockBehavior::Empty)
    }

    /// Create a mock that answers after `delay_ms`
    pub fn slow(delay_ms: u64) -> Self {
        Self::new(MockBehavior::Slow { delay_ms })
    }

    /// Set the name reported as the response source
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set a custom response generator
    pub fn with_custom_response(mut self, generator: fn(IntentCategory, &str) -> String) -> Self {
        self.custom_response = Some(generator);
        self
    }

    /// Number of requests received so far
    pub fn request_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }

    fn answer(&self, category: IntentCategory, pivot_text: &str, confidence: f64) -> HandlerResponse {
        let text = match self.custom_response {
            Some(generator) => generator(category, pivot_text),
            None => format!("[{}] advice for: {}", category, pivot_text),
        };
        HandlerResponse::new(category, text, self.name.clone(), confidence)
    }
}

#[async_trait]
impl DomainHandler for MockHandler {
    fn name(&self) -> &str {
        &self.name
    }

    async fn invoke(
        &self,
        category: IntentCategory,
        pivot_text: &str,
        _location_hint: Option<&str>,
    ) -> Result<HandlerResponse, HandlerError> {
        let count = self.request_count.fetch_add(1, Ordering::SeqCst) + 1;

        match self.behavior {
            MockBehavior::Working { confidence } => Ok(self.answer(category, pivot_text, confidence)),
            MockBehavior::Intermittent { fail_every } => {
                if fail_every > 0 && count % fail_every == 0 {
                    Err(HandlerError::RequestFailed(format!("Simulated failure on request {}", count)))
                } else {
                    Ok(self.answer(category, pivot_text, 0.9))
                }
            }
            MockBehavior::Failing => Err(HandlerError::RequestFailed("Simulated handler failure".to_string())),
            MockBehavior::Empty => Ok(HandlerResponse::new(category, "", self.name.clone(), 0.9)),
            MockBehavior::Slow { delay_ms } => {
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                Ok(self.answer(category, pivot_text, 0.9))
            }
        }
    }
}
