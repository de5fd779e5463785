/*!
 * Error types for the kisanroute application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 *
 * Nothing in here ever escapes `Orchestrator::handle`: handler failures are folded
 * into zero-confidence responses and the remaining issues are reported as
 * [`Degradation`] notes on the final result.
 */

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::classification::IntentCategory;
use crate::language_utils::LanguageTag;

/// Errors that can occur when invoking a domain handler
#[derive(Error, Debug)]
pub enum HandlerError {
    /// Error when sending the request fails
    #[error("Handler request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing a handler reply fails
    #[error("Failed to parse handler response: {0}")]
    ParseError(String),

    /// Error returned by the remote handler itself
    #[error("Handler responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the handler
        message: String,
    },

    /// The handler did not answer within its time budget
    #[error("Handler timed out after {0:?}")]
    Timeout(Duration),

    /// No handler is registered for the category
    #[error("No handler registered for category '{0}'")]
    NotRegistered(IntentCategory),

    /// The handler reported it has nothing to say
    #[error("Handler has no data: {0}")]
    NoData(String),
}

/// Errors that can occur while loading a lexicon overlay
#[derive(Error, Debug)]
pub enum LexiconError {
    /// The overlay file could not be read
    #[error("Failed to read lexicon file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The overlay file is not valid JSON for a lexicon
    #[error("Failed to parse lexicon file '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// The overlay names a language the detector does not know
    #[error("Unsupported language in lexicon: {0}")]
    UnsupportedLanguage(String),
}

/// Non-fatal issues met while answering a query.
///
/// These never abort processing; each one lowers confidence or routes the
/// query to the fallback answer.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Degradation {
    /// More than one script was present; the majority rule decided
    #[error("Mixed scripts, resolved to {language} ({share:.2} of characters)")]
    DetectionAmbiguous { language: LanguageTag, share: f64 },

    /// No dictionary entry matched; the text went through untranslated
    #[error("No dictionary match for {language}, passing text through")]
    TranslationMiss { language: LanguageTag },

    /// No category scored above zero
    #[error("Query did not match any category")]
    ClassificationEmpty,

    /// A handler did not answer in time
    #[error("Handler for '{category}' timed out")]
    HandlerTimeout { category: IntentCategory },

    /// A handler failed or was missing
    #[error("Handler for '{category}' failed: {message}")]
    HandlerError {
        category: IntentCategory,
        message: String,
    },

    /// The script was not recognized; the text is treated as pivot language
    #[error("Unrecognized script, treating text as pivot language")]
    UnsupportedLanguage,
}
