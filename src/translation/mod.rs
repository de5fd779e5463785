/*!
 * Dictionary translation between query languages and the pivot language.
 *
 * - `core`: the `Translator` and its compiled per-language tables
 * - `lexicon`: term dictionaries, phrase templates and question rules
 * - `context`: the per-query `TranslationContext`
 */

// Re-export main types for easier usage
pub use self::context::TranslationContext;
pub use self::core::{MIN_TRANSLATION_CONFIDENCE, Translator};
pub use self::lexicon::{InterrogativeRule, LanguageLexicon, Lexicon, PhraseEntry, TermEntry};

// Submodules
pub mod context;
pub mod core;
pub mod lexicon;
mod tables;
