/*!
 * Domain handlers and the registry that dispatches to them.
 *
 * A domain handler answers pivot-language queries for one or more intent
 * categories. This module contains:
 * - `remote`: forwards queries as JSON over HTTP
 * - `offline`: built-in general guidance, no network
 * - `mock`: scripted handlers for tests and demos
 *
 * The registry is the trust boundary: whatever a handler does (error, hang,
 * out-of-range confidence, wrong category), callers always get back a
 * well-formed `HandlerResponse`.
 */

use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::classification::IntentCategory;
use crate::errors::{Degradation, HandlerError};

pub mod mock;
pub mod offline;
pub mod remote;

pub use self::mock::{MockBehavior, MockHandler};
pub use self::offline::OfflineAdvisoryHandler;
pub use self::remote::RemoteHandler;

/// Default time budget for a single handler call
pub const DEFAULT_HANDLER_TIMEOUT: Duration = Duration::from_secs(5);

/// A handler's answer to one query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HandlerResponse {
    /// Category the handler answered for
    pub category: IntentCategory,
    /// Answer in the pivot language
    pub text: String,
    /// Where the answer came from
    pub source: String,
    /// Handler-reported reliability (0.0 - 1.0)
    pub confidence: f64,
}

impl HandlerResponse {
    /// Create a new response
    pub fn new(
        category: IntentCategory,
        text: impl Into<String>,
        source: impl Into<String>,
        confidence: f64,
    ) -> Self {
        Self {
            category,
            text: text.into(),
            source: source.into(),
            confidence,
        }
    }

    /// The zero-confidence response used for every failed call
    pub fn no_data(category: IntentCategory, source: impl Into<String>) -> Self {
        Self::new(category, String::new(), source, 0.0)
    }

    /// Normalize a response for the category it was requested for
    fn validated(mut self, requested: IntentCategory) -> Result<Self, HandlerError> {
        if self.category != requested {
            return Err(HandlerError::ParseError(format!(
                "response for '{}' returned for a '{}' request",
                self.category, requested
            )));
        }
        if self.confidence.is_nan() {
            self.confidence = 0.0;
        }
        self.confidence = self.confidence.clamp(0.0, 1.0);
        if self.text.trim().is_empty() {
            self.confidence = 0.0;
        }
        Ok(self)
    }
}

/// Common trait for all domain handlers
///
/// Implementations should be side-effect-free lookups: the registry may call
/// several handlers concurrently and abandons a call once its timeout expires.
#[async_trait]
pub trait DomainHandler: Send + Sync + Debug {
    /// Short name used as the default source and in logs
    fn name(&self) -> &str;

    /// Answer a pivot-language query for `category`
    ///
    /// # Arguments
    /// * `category` - The category the query was routed to
    /// * `pivot_text` - The query in the pivot language
    /// * `location_hint` - Optional free-text location from the caller
    async fn invoke(
        &self,
        category: IntentCategory,
        pivot_text: &str,
        location_hint: Option<&str>,
    ) -> Result<HandlerResponse, HandlerError>;
}

/// Result of dispatching to one category
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchOutcome {
    /// The validated response (zero confidence on any failure)
    pub response: HandlerResponse,
    /// Why the call failed, if it did
    pub failure: Option<Degradation>,
}

/// Read-only mapping from category to handler
#[derive(Debug, Clone)]
pub struct HandlerRegistry {
    handlers: HashMap<IntentCategory, Arc<dyn DomainHandler>>,
    timeouts: HashMap<IntentCategory, Duration>,
    default_timeout: Duration,
}

impl HandlerRegistry {
    /// Start building a registry
    pub fn builder() -> HandlerRegistryBuilder {
        HandlerRegistryBuilder::default()
    }

    /// Handler registered for a category
    pub fn get(&self, category: IntentCategory) -> Option<&Arc<dyn DomainHandler>> {
        self.handlers.get(&category)
    }

    /// Categories with a handler
    pub fn categories(&self) -> Vec<IntentCategory> {
        let mut categories = self.handlers.keys().copied().collect::<Vec<_>>();
        categories.sort_by_key(|c| c.priority());
        categories
    }

    /// Time budget for calls to a category's handler
    pub fn timeout_for(&self, category: IntentCategory) -> Duration {
        self.timeouts.get(&category).copied().unwrap_or(self.default_timeout)
    }

    /// Call the handler for `category` under its timeout.
    ///
    /// Never fails: missing handlers, errors and timeouts all come back as a
    /// zero-confidence response with the reason in `failure`.
    pub async fn dispatch(
        &self,
        category: IntentCategory,
        pivot_text: &str,
        location_hint: Option<&str>,
    ) -> DispatchOutcome {
        let Some(handler) = self.handlers.get(&category) else {
            let err = HandlerError::NotRegistered(category);
            warn!("{}", err);
            return Self::failed(category, "unregistered", Degradation::HandlerError {
                category,
                message: err.to_string(),
            });
        };

        let timeout = self.timeout_for(category);
        debug!("Dispatching '{}' to handler '{}' ({:?} budget)", category, handler.name(), timeout);

        let result = match tokio::time::timeout(timeout, handler.invoke(category, pivot_text, location_hint)).await {
            Ok(result) => result.and_then(|response| response.validated(category)),
            Err(_) => Err(HandlerError::Timeout(timeout)),
        };

        match result {
            Ok(response) => {
                debug!(
                    "Handler '{}' answered '{}' with confidence {:.2}",
                    handler.name(),
                    category,
                    response.confidence
                );
                DispatchOutcome {
                    response,
                    failure: None,
                }
            }
            Err(HandlerError::Timeout(elapsed)) => {
                warn!("Handler '{}' timed out after {:?}", handler.name(), elapsed);
                Self::failed(category, handler.name(), Degradation::HandlerTimeout { category })
            }
            Err(err) => {
                warn!("Handler '{}' failed: {}", handler.name(), err);
                Self::failed(category, handler.name(), Degradation::HandlerError {
                    category,
                    message: err.to_string(),
                })
            }
        }
    }

    /// Like [`dispatch`](Self::dispatch), but on a task of its own.
    ///
    /// The budget is enforced on the task handle, so a handler that blocks its
    /// thread still times out and cannot hold up calls running beside it.
    pub async fn dispatch_spawned(
        self: &Arc<Self>,
        category: IntentCategory,
        pivot_text: String,
        location_hint: Option<String>,
    ) -> DispatchOutcome {
        let registry = Arc::clone(self);
        let timeout = self.timeout_for(category);
        let source = self.get(category).map(|h| h.name()).unwrap_or("unregistered");

        let mut task = tokio::spawn(async move {
            registry
                .dispatch(category, &pivot_text, location_hint.as_deref())
                .await
        });

        match tokio::time::timeout(timeout, &mut task).await {
            Ok(Ok(outcome)) => outcome,
            Ok(Err(err)) => {
                warn!("Handler task for '{}' did not complete: {}", category, err);
                Self::failed(category, source, Degradation::HandlerError {
                    category,
                    message: err.to_string(),
                })
            }
            Err(_) => {
                task.abort();
                warn!("Handler '{}' timed out after {:?}", source, timeout);
                Self::failed(category, source, Degradation::HandlerTimeout { category })
            }
        }
    }

    fn failed(category: IntentCategory, source: &str, failure: Degradation) -> DispatchOutcome {
        DispatchOutcome {
            response: HandlerResponse::no_data(category, source),
            failure: Some(failure),
        }
    }
}

/// Builder for a [`HandlerRegistry`]
#[derive(Debug, Default)]
pub struct HandlerRegistryBuilder {
    entries: Vec<(IntentCategory, Arc<dyn DomainHandler>, Option<Duration>)>,
    default_timeout: Option<Duration>,
}

impl HandlerRegistryBuilder {
    /// Timeout for handlers registered without their own
    pub fn default_timeout(mut self, timeout: Duration) -> Self {
        self.default_timeout = Some(timeout);
        self
    }

    /// Register a handler for a category
    pub fn register(mut self, category: IntentCategory, handler: Arc<dyn DomainHandler>) -> Self {
        self.entries.push((category, handler, None));
        self
    }

    /// Register a handler with its own timeout
    pub fn register_with_timeout(
        mut self,
        category: IntentCategory,
        handler: Arc<dyn DomainHandler>,
        timeout: Duration,
    ) -> Self {
        self.entries.push((category, handler, Some(timeout)));
        self
    }

    /// Register one handler for several categories
    pub fn register_all(mut self, categories: &[IntentCategory], handler: Arc<dyn DomainHandler>) -> Self {
        for category in categories {
            self.entries.push((*category, Arc::clone(&handler), None));
        }
        self
    }

    /// Validate and freeze the registry
    pub fn build(self) -> Result<HandlerRegistry> {
        let default_timeout = self.default_timeout.unwrap_or(DEFAULT_HANDLER_TIMEOUT);
        if default_timeout.is_zero() {
            return Err(anyhow!("Handler timeout must be greater than zero"));
        }

        let mut handlers = HashMap::new();
        let mut timeouts = HashMap::new();
        for (category, handler, timeout) in self.entries {
            if category == IntentCategory::Unclassified {
                return Err(anyhow!("Cannot register a handler for 'unclassified' queries"));
            }
            if handlers.insert(category, handler).is_some() {
                return Err(anyhow!("Duplicate handler for category '{}'", category));
            }
            if let Some(timeout) = timeout {
                if timeout.is_zero() {
                    return Err(anyhow!("Timeout for '{}' must be greater than zero", category));
                }
                timeouts.insert(category, timeout);
            }
        }

        Ok(HandlerRegistry {
            handlers,
            timeouts,
            default_timeout,
        })
    }
}
