/*!
 * Translation lexicon.
 *
 * A lexicon holds, per language, the term dictionary, phrase templates and
 * interrogative rules the translator works from. The built-in tables can be
 * extended or overridden by a JSON overlay file, merged once at startup:
 *
 * ```json
 * {
 *   "hi": {
 *     "terms": [{ "native": "अरहर", "pivot": "pigeon pea" }],
 *     "outbound_phrases": [{ "source": "apply before sowing", "target": "बुवाई से पहले डालें" }]
 *   }
 * }
 * ```
 */

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use log::{debug, info};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::errors::LexiconError;
use crate::language_utils::{LanguageTag, parse_language_tag};

use super::tables;

/// A single native/pivot term pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermEntry {
    /// Term in the native language
    pub native: String,
    /// Term in the pivot language
    pub pivot: String,
}

/// A multi-word template, matched as a whole before single terms
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhraseEntry {
    /// Phrase to look for
    pub source: String,
    /// Replacement text
    pub target: String,
}

/// A question-opener rule applied before word substitution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterrogativeRule {
    /// Question particles that trigger the rule
    pub particles: Vec<String>,
    /// At least one of these must also be present (empty means no requirement)
    #[serde(default)]
    pub qualifiers: Vec<String>,
    /// Pivot-language opener prefixed to the translation
    pub opener: String,
}

/// Everything the translator knows about one language
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LanguageLexicon {
    /// Content words, used in both directions
    #[serde(default)]
    pub terms: Vec<TermEntry>,
    /// Function words, used on the inbound leg only
    #[serde(default)]
    pub particles: Vec<TermEntry>,
    /// Native phrase -> pivot phrase
    #[serde(default)]
    pub inbound_phrases: Vec<PhraseEntry>,
    /// Pivot phrase -> native phrase
    #[serde(default)]
    pub outbound_phrases: Vec<PhraseEntry>,
    /// Question-opener rules, first match wins
    #[serde(default)]
    pub interrogatives: Vec<InterrogativeRule>,
}

impl LanguageLexicon {
    fn from_tables(
        terms: &[(&str, &str)],
        particles: &[(&str, &str)],
        inbound_phrases: &[(&str, &str)],
        outbound_phrases: &[(&str, &str)],
        interrogatives: &[(&[&str], &[&str], &str)],
    ) -> Self {
        let pairs = |rows: &[(&str, &str)]| {
            rows.iter()
                .map(|(native, pivot)| TermEntry {
                    native: native.to_string(),
                    pivot: pivot.to_string(),
                })
                .collect::<Vec<_>>()
        };
        let phrases = |rows: &[(&str, &str)]| {
            rows.iter()
                .map(|(source, target)| PhraseEntry {
                    source: source.to_string(),
                    target: target.to_string(),
                })
                .collect::<Vec<_>>()
        };

        Self {
            terms: pairs(terms),
            particles: pairs(particles),
            inbound_phrases: phrases(inbound_phrases),
            outbound_phrases: phrases(outbound_phrases),
            interrogatives: interrogatives
                .iter()
                .map(|(particles, qualifiers, opener)| InterrogativeRule {
                    particles: particles.iter().map(|s| s.to_string()).collect(),
                    qualifiers: qualifiers.iter().map(|s| s.to_string()).collect(),
                    opener: opener.to_string(),
                })
                .collect(),
        }
    }

    /// Merge an overlay into this lexicon. Overlay entries replace entries with
    /// the same key; overlay interrogative rules are tried first.
    pub fn merge(&mut self, overlay: LanguageLexicon) {
        merge_terms(&mut self.terms, overlay.terms);
        merge_terms(&mut self.particles, overlay.particles);
        merge_phrases(&mut self.inbound_phrases, overlay.inbound_phrases);
        merge_phrases(&mut self.outbound_phrases, overlay.outbound_phrases);

        let mut rules = overlay.interrogatives;
        rules.append(&mut self.interrogatives);
        self.interrogatives = rules;
    }

    /// Whether the lexicon has anything to translate with
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty() && self.particles.is_empty() && self.inbound_phrases.is_empty()
    }
}

fn merge_terms(base: &mut Vec<TermEntry>, overlay: Vec<TermEntry>) {
    for entry in overlay {
        match base.iter_mut().find(|e| e.native == entry.native) {
            Some(existing) => existing.pivot = entry.pivot,
            None => base.push(entry),
        }
    }
}

fn merge_phrases(base: &mut Vec<PhraseEntry>, overlay: Vec<PhraseEntry>) {
    for entry in overlay {
        match base.iter_mut().find(|e| e.source == entry.source) {
            Some(existing) => existing.target = entry.target,
            None => base.push(entry),
        }
    }
}

static BUILTIN: Lazy<Lexicon> = Lazy::new(|| {
    let mut languages = HashMap::new();
    languages.insert(
        LanguageTag::Hindi,
        LanguageLexicon::from_tables(
            tables::HINDI_TERMS,
            tables::HINDI_PARTICLES,
            tables::HINDI_INBOUND_PHRASES,
            tables::HINDI_OUTBOUND_PHRASES,
            tables::HINDI_INTERROGATIVES,
        ),
    );
    languages.insert(
        LanguageTag::Bengali,
        LanguageLexicon::from_tables(tables::BENGALI_TERMS, &[], &[], &[], &[]),
    );
    languages.insert(
        LanguageTag::Tamil,
        LanguageLexicon::from_tables(tables::TAMIL_TERMS, &[], &[], &[], &[]),
    );
    languages.insert(
        LanguageTag::Telugu,
        LanguageLexicon::from_tables(tables::TELUGU_TERMS, &[], &[], &[], &[]),
    );
    Lexicon { languages }
});

/// Per-language tables for the translator
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Lexicon {
    languages: HashMap<LanguageTag, LanguageLexicon>,
}

impl Lexicon {
    /// The tables compiled into the binary
    pub fn builtin() -> Self {
        BUILTIN.clone()
    }

    /// An empty lexicon; every non-pivot translation soft-fails
    pub fn empty() -> Self {
        Self::default()
    }

    /// Tables for one language, if any
    pub fn language(&self, tag: LanguageTag) -> Option<&LanguageLexicon> {
        self.languages.get(&tag)
    }

    /// Languages that have tables
    pub fn languages(&self) -> impl Iterator<Item = LanguageTag> + '_ {
        self.languages.keys().copied()
    }

    /// Add or replace entries for a language
    pub fn extend(&mut self, tag: LanguageTag, overlay: LanguageLexicon) {
        self.languages.entry(tag).or_default().merge(overlay);
    }

    /// Parse an overlay document keyed by language code or name
    pub fn overlay_from_json(&mut self, json: &str, origin: &str) -> Result<(), LexiconError> {
        let raw: HashMap<String, LanguageLexicon> =
            serde_json::from_str(json).map_err(|source| LexiconError::Parse {
                path: origin.to_string(),
                source,
            })?;

        for (key, overlay) in raw {
            let tag = parse_language_tag(&key)
                .ok()
                .filter(|tag| !tag.is_pivot() && *tag != LanguageTag::Unknown)
                .ok_or_else(|| LexiconError::UnsupportedLanguage(key.clone()))?;
            debug!(
                "Lexicon overlay for {}: {} terms, {} phrases",
                tag,
                overlay.terms.len(),
                overlay.inbound_phrases.len() + overlay.outbound_phrases.len()
            );
            self.extend(tag, overlay);
        }

        Ok(())
    }

    /// Built-in tables merged with the overlay file at `path`
    pub fn with_overlay_file<P: AsRef<Path>>(path: P) -> Result<Self, LexiconError> {
        let path = path.as_ref();
        let origin = path.display().to_string();
        let json = fs::read_to_string(path).map_err(|source| LexiconError::Io {
            path: origin.clone(),
            source,
        })?;

        let mut lexicon = Self::builtin();
        lexicon.overlay_from_json(&json, &origin)?;
        info!("Loaded lexicon overlay from {}", origin);
        Ok(lexicon)
    }
}
