use std::time::Duration;

use async_trait::async_trait;
use log::error;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::classification::IntentCategory;
use crate::errors::HandlerError;

use super::{DomainHandler, HandlerResponse};

/// Handler that forwards queries to an HTTP endpoint
///
/// The endpoint receives a [`RemoteRequest`] as JSON and must answer with a
/// [`RemoteReply`]. The API key is sent as a bearer token and never inspected.
#[derive(Debug)]
pub struct RemoteHandler {
    /// HTTP client for handler requests
    client: Client,
    /// Name used as the default source
    name: String,
    /// Endpoint URL
    endpoint: String,
    /// Opaque credential passed through to the endpoint
    api_key: String,
}

/// Body sent to a remote handler
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct RemoteRequest {
    /// Category the query was routed to
    pub category: IntentCategory,
    /// The query in the pivot language
    pub query: String,
    /// Optional location hint from the caller
    pub location: Option<String>,
}

/// Body expected back from a remote handler
#[derive(Debug, Deserialize, Serialize, PartialEq)]
pub struct RemoteReply {
    /// Answer in the pivot language
    pub text: String,
    /// Where the answer came from
    #[serde(default)]
    pub source: Option<String>,
    /// Reliability of the answer (0.0 - 1.0)
    pub confidence: f64,
}

impl RemoteRequest {
    /// Create a new request body
    pub fn new(category: IntentCategory, query: &str, location: Option<&str>) -> Self {
        Self {
            category,
            query: query.to_string(),
            location: location.map(str::to_string),
        }
    }
}

impl RemoteReply {
    /// Convert into a handler response, defaulting the source to `fallback_source`
    pub fn into_response(self, category: IntentCategory, fallback_source: &str) -> HandlerResponse {
        let source = self
            .source
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| fallback_source.to_string());
        HandlerResponse::new(category, self.text, source, self.confidence)
    }
}

impl RemoteHandler {
    /// Create a new remote handler
    ///
    /// The client-level timeout is a backstop; the registry enforces the
    /// configured per-call budget.
    pub fn new(
        name: impl Into<String>,
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            client: Client::builder()
                .timeout(timeout + Duration::from_secs(1))
                .build()
                .unwrap_or_default(),
            name: name.into(),
            endpoint: endpoint.into(),
            api_key: api_key.into(),
        }
    }

    /// Endpoint this handler posts to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl DomainHandler for RemoteHandler {
    fn name(&self) -> &str {
        &self.name
    }

    async fn invoke(
        &self,
        category: IntentCategory,
        pivot_text: &str,
        location_hint: Option<&str>,
    ) -> Result<HandlerResponse, HandlerError> {
        let body = RemoteRequest::new(category, pivot_text, location_hint);

        let mut request = self
            .client
            .post(&self.endpoint)
            .header("Content-Type", "application/json")
            .json(&body);
        if !self.api_key.is_empty() {
            request = request.bearer_auth(&self.api_key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| HandlerError::RequestFailed(format!("Failed to reach {}: {}", self.endpoint, e)))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("Handler '{}' error ({}): {}", self.name, status, message);
            return Err(HandlerError::ApiError {
                status_code: status.as_u16(),
                message,
            });
        }

        let reply = response
            .json::<RemoteReply>()
            .await
            .map_err(|e| HandlerError::ParseError(e.to_string()))?;

        Ok(reply.into_response(category, &self.name))
    }
}
