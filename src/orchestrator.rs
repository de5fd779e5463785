/*!
 * Query orchestration.
 *
 * The orchestrator runs one query through a fixed sequence of states:
 *
 * Received -> Translated -> Classified -> Dispatched -> Composed -> Done
 *
 * Each state owns everything produced so far, so a transition consumes the
 * previous state and nothing can be skipped. Every path ends in `Done` with a
 * well-formed `OrchestrationResult`; problems along the way are recorded as
 * `Degradation`s rather than returned as errors.
 */

use std::fmt;
use std::sync::Arc;

use anyhow::Result;
use futures::future::join_all;
use log::{debug, info, warn};
use serde::Serialize;
use uuid::Uuid;

use crate::classification::{Classifier, ClassificationResult, IntentCategory};
use crate::errors::Degradation;
use crate::handlers::{HandlerRegistry, HandlerResponse};
use crate::language_utils::{self, LanguageTag};
use crate::translation::{TranslationContext, Translator};

/// Answer given whenever no handler produced a reliable one
pub const FALLBACK_MESSAGE: &str =
    "No reliable data found — please consult your local agriculture extension officer";

/// Source reported with the fallback answer
pub const FALLBACK_SOURCE: &str = "fallback";

/// Below this confidence `render` adds an advisory line
pub const ADVISORY_CONFIDENCE: f64 = 0.7;

const ADVISORY_NOTE: &str = "For more accurate information, please consult your local agriculture officer.";

/// Routing thresholds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrchestratorConfig {
    /// Minimum classification score for a category to be dispatched
    pub min_dispatch_confidence: f64,
    /// Minimum final confidence for a handler answer to be reported
    pub min_report_confidence: f64,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            min_dispatch_confidence: 0.35,
            min_report_confidence: 0.4,
        }
    }
}

/// A query as it moves through the router
#[derive(Debug, Clone, Serialize)]
pub struct Query {
    /// Per-query identifier, for log correlation only
    pub id: Uuid,
    /// The text exactly as received
    pub raw_text: String,
    /// Language detected from the script
    pub detected_language: LanguageTag,
    /// The text in the pivot language
    pub pivot_text: String,
}

// `id` is random per call and deliberately not part of equality
impl PartialEq for Query {
    fn eq(&self, other: &Self) -> bool {
        self.raw_text == other.raw_text
            && self.detected_language == other.detected_language
            && self.pivot_text == other.pivot_text
    }
}

/// The routed answer to one query
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrchestrationResult {
    pub query: Query,
    /// Category the answer is for (`Unclassified` when nothing matched)
    pub category: IntentCategory,
    /// The answer, rendered in `response_language`
    pub response_text: String,
    /// Always the detected language of the query
    pub response_language: LanguageTag,
    /// min(classification score, handler confidence), 0.0 without dispatch
    pub confidence: f64,
    /// Where the answer came from, `"fallback"` for the fallback answer
    pub source: String,
    /// What the inbound translation produced
    pub translation: TranslationContext,
    /// Whether the fallback answer was used
    pub fallback: bool,
    /// Non-fatal problems met along the way
    pub degradations: Vec<Degradation>,
}

impl OrchestrationResult {
    /// Format the result for a terminal
    pub fn render(&self) -> String {
        let mut out = self.response_text.clone();
        if !self.fallback {
            out.push_str(&format!("\n\nSource: {}", self.source));
        }
        if self.confidence < ADVISORY_CONFIDENCE {
            out.push_str(&format!("\n\n{}", ADVISORY_NOTE));
        }
        out
    }
}

/// The states a query passes through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Stage {
    Received,
    Translated,
    Classified,
    Dispatched,
    Composed,
    Done,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Received => "received",
            Stage::Translated => "translated",
            Stage::Classified => "classified",
            Stage::Dispatched => "dispatched",
            Stage::Composed => "composed",
            Stage::Done => "done",
        };
        write!(f, "{}", name)
    }
}

/// The handler answer chosen for composition
#[derive(Debug)]
struct Selection {
    score: f64,
    response: HandlerResponse,
}

#[derive(Debug)]
enum State {
    Received {
        raw_text: String,
    },
    Translated {
        query: Query,
        context: TranslationContext,
        degradations: Vec<Degradation>,
    },
    Classified {
        query: Query,
        context: TranslationContext,
        classification: ClassificationResult,
        degradations: Vec<Degradation>,
    },
    Dispatched {
        query: Query,
        context: TranslationContext,
        classification: ClassificationResult,
        selection: Option<Selection>,
        degradations: Vec<Degradation>,
    },
    Composed(OrchestrationResult),
    Done(OrchestrationResult),
}

impl State {
    fn stage(&self) -> Stage {
        match self {
            State::Received { .. } => Stage::Received,
            State::Translated { .. } => Stage::Translated,
            State::Classified { .. } => Stage::Classified,
            State::Dispatched { .. } => Stage::Dispatched,
            State::Composed(_) => Stage::Composed,
            State::Done(_) => Stage::Done,
        }
    }
}

/// Routes queries from any supported language to a domain handler and back
#[derive(Debug, Clone)]
pub struct Orchestrator {
    config: OrchestratorConfig,
    translator: Arc<Translator>,
    classifier: Arc<Classifier>,
    registry: Arc<HandlerRegistry>,
}

impl Orchestrator {
    /// Create an orchestrator from its parts
    pub fn new(
        config: OrchestratorConfig,
        translator: Arc<Translator>,
        classifier: Arc<Classifier>,
        registry: Arc<HandlerRegistry>,
    ) -> Self {
        Self {
            config,
            translator,
            classifier,
            registry,
        }
    }

    /// Orchestrator with the built-in translator and classifier and default thresholds
    pub fn with_registry(registry: HandlerRegistry) -> Result<Self> {
        Ok(Self::new(
            OrchestratorConfig::default(),
            Arc::new(Translator::builtin()?),
            Arc::new(Classifier::new()),
            Arc::new(registry),
        ))
    }

    /// Replace the thresholds
    pub fn with_config(mut self, config: OrchestratorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &OrchestratorConfig {
        &self.config
    }

    pub fn translator(&self) -> &Translator {
        &self.translator
    }

    /// Route one query. Never fails.
    pub async fn handle(&self, raw_text: &str, location_hint: Option<&str>) -> OrchestrationResult {
        self.handle_traced(raw_text, location_hint).await.0
    }

    /// Route one query and report the stages it went through
    pub async fn handle_traced(
        &self,
        raw_text: &str,
        location_hint: Option<&str>,
    ) -> (OrchestrationResult, Vec<Stage>) {
        let mut trace = Vec::with_capacity(6);
        let mut state = State::Received {
            raw_text: raw_text.to_string(),
        };

        loop {
            trace.push(state.stage());
            state = match state {
                State::Done(result) => return (result, trace),
                other => self.advance(other, location_hint).await,
            };
        }
    }

    async fn advance(&self, state: State, location_hint: Option<&str>) -> State {
        match state {
            State::Received { raw_text } => self.translate(raw_text),

            State::Translated {
                query,
                context,
                mut degradations,
            } => {
                let classification = self.classifier.classify(&query.pivot_text);
                if classification.is_unclassified() {
                    debug!("[{}] {}", query.id, Degradation::ClassificationEmpty);
                    degradations.push(Degradation::ClassificationEmpty);
                }
                State::Classified {
                    query,
                    context,
                    classification,
                    degradations,
                }
            }

            State::Classified {
                query,
                context,
                classification,
                mut degradations,
            } => {
                let selection = self
                    .dispatch(&query, &classification, location_hint, &mut degradations)
                    .await;
                State::Dispatched {
                    query,
                    context,
                    classification,
                    selection,
                    degradations,
                }
            }

            State::Dispatched {
                query,
                context,
                classification,
                selection,
                degradations,
            } => State::Composed(self.compose(query, context, &classification, selection, degradations)),

            State::Composed(result) => {
                info!(
                    "[{}] {} query -> {} ({:.2}) via {}",
                    result.query.id, result.response_language, result.category, result.confidence, result.source
                );
                State::Done(result)
            }

            done @ State::Done(_) => done,
        }
    }

    /// Received -> Translated
    fn translate(&self, raw_text: String) -> State {
        let id = Uuid::new_v4();
        let language = language_utils::detect(&raw_text);
        let mut degradations = Vec::new();

        if language == LanguageTag::Unknown {
            warn!("[{}] {}", id, Degradation::UnsupportedLanguage);
            degradations.push(Degradation::UnsupportedLanguage);
        } else {
            let letters = language_utils::letter_profile(&raw_text);
            if letters.script_count() > 1 {
                let note = Degradation::DetectionAmbiguous {
                    language,
                    share: letters.share(language),
                };
                debug!("[{}] {}", id, note);
                degradations.push(note);
            }
        }

        let (pivot_text, context) = self.translator.translate_query(&raw_text, language);
        if !language.is_pivot() && language != LanguageTag::Unknown && pivot_text == raw_text {
            let note = Degradation::TranslationMiss { language };
            warn!("[{}] {}", id, note);
            degradations.push(note);
        }
        debug!(
            "[{}] Translated {} '{}' -> '{}' ({:.2})",
            id, language, raw_text, pivot_text, context.confidence
        );

        State::Translated {
            query: Query {
                id,
                raw_text,
                detected_language: language,
                pivot_text,
            },
            context,
            degradations,
        }
    }

    /// Classified -> Dispatched: call every qualifying category's handler and
    /// keep the most confident answer
    async fn dispatch(
        &self,
        query: &Query,
        classification: &ClassificationResult,
        location_hint: Option<&str>,
        degradations: &mut Vec<Degradation>,
    ) -> Option<Selection> {
        let qualifying = classification.qualifying(self.config.min_dispatch_confidence);
        if qualifying.is_empty() {
            debug!("[{}] No category reached {:.2}, skipping dispatch", query.id, self.config.min_dispatch_confidence);
            return None;
        }

        let outcomes = join_all(qualifying.iter().map(|entry| {
            self.registry.dispatch_spawned(
                entry.category,
                query.pivot_text.clone(),
                location_hint.map(str::to_string),
            )
        }))
        .await;

        let mut best: Option<Selection> = None;
        // in classification rank order, so an exact tie keeps the earlier one
        for (entry, outcome) in qualifying.iter().zip(outcomes) {
            degradations.extend(outcome.failure);
            let candidate = Selection {
                score: entry.score,
                response: outcome.response,
            };
            match &best {
                Some(current) if current.response.confidence >= candidate.response.confidence => {}
                _ => best = Some(candidate),
            }
        }

        if let Some(selected) = &best {
            debug!(
                "[{}] Selected '{}' from {} handler(s)",
                query.id,
                selected.response.category,
                qualifying.len()
            );
        }
        best
    }

    /// Dispatched -> Composed
    fn compose(
        &self,
        query: Query,
        context: TranslationContext,
        classification: &ClassificationResult,
        selection: Option<Selection>,
        degradations: Vec<Degradation>,
    ) -> OrchestrationResult {
        let (category, confidence, text, source) = match selection {
            Some(Selection { score, response }) => (
                response.category,
                score.min(response.confidence).clamp(0.0, 1.0),
                response.text,
                response.source,
            ),
            None => (classification.top().category, 0.0, String::new(), String::new()),
        };

        let fallback = confidence < self.config.min_report_confidence || text.trim().is_empty();
        let (pivot_answer, source) = if fallback {
            (FALLBACK_MESSAGE.to_string(), FALLBACK_SOURCE.to_string())
        } else {
            (text, source)
        };

        let language = context.original_language;
        OrchestrationResult {
            response_text: self.translator.from_pivot(&pivot_answer, language),
            response_language: language,
            query,
            category,
            confidence,
            source,
            translation: context,
            fallback,
            degradations,
        }
    }
}
