/*!
 * Per-query translation context.
 */

use serde::{Deserialize, Serialize};

use crate::language_utils::LanguageTag;

/// What the inbound leg learned about a query.
///
/// Built once by the translator and carried unchanged to the outbound leg,
/// which renders the final answer in `original_language`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslationContext {
    /// Language the query was written in
    pub original_language: LanguageTag,
    /// The query exactly as received
    pub source_text: String,
    /// Reliability of the inbound translation (0.0 - 1.0)
    pub confidence: f64,
}

impl TranslationContext {
    /// Create a new context; confidence is clamped into [0, 1]
    pub fn new(original_language: LanguageTag, source_text: impl Into<String>, confidence: f64) -> Self {
        Self {
            original_language,
            source_text: source_text.into(),
            confidence: if confidence.is_nan() { 0.0 } else { confidence.clamp(0.0, 1.0) },
        }
    }
}
