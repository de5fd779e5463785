/*!
 * Core dictionary translator.
 *
 * This module contains the `Translator`, which moves query text between a
 * detected language and the pivot language, and renders answers back:
 *
 * - inbound: interrogative rules, then phrase templates, then whole-token
 *   dictionary lookup, with a hit-ratio confidence
 * - outbound: phrase templates, then whole-word term replacement, each as a
 *   single precompiled regex per language
 *
 * All tables are compiled once in `Translator::new` and never change afterwards,
 * so one translator can be shared by any number of concurrent queries.
 */

use std::collections::HashMap;

use anyhow::{Context, Result};
use log::{debug, trace};
use regex::Regex;

use crate::language_utils::LanguageTag;

use super::context::TranslationContext;
use super::lexicon::{InterrogativeRule, LanguageLexicon, Lexicon};

/// Confidence reported when nothing could be translated
pub const MIN_TRANSLATION_CONFIDENCE: f64 = 0.3;

/// A compiled, case-insensitive whole-word replacement table
#[derive(Debug)]
struct Replacer {
    pattern: Regex,
    replacements: HashMap<String, String>,
}

impl Replacer {
    /// Build from (from, to) pairs; earlier pairs win on duplicate keys.
    /// Returns `None` when there is nothing to replace.
    fn build<'a, I>(pairs: I) -> Result<Option<Self>>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut replacements: HashMap<String, String> = HashMap::new();
        for (from, to) in pairs {
            let key = from.trim().to_lowercase();
            if key.is_empty() || to.trim().is_empty() {
                continue;
            }
            replacements.entry(key).or_insert_with(|| to.to_string());
        }

        if replacements.is_empty() {
            return Ok(None);
        }

        // Longest alternatives first so a phrase beats any word inside it
        let mut keys = replacements.keys().cloned().collect::<Vec<_>>();
        keys.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()).then_with(|| a.cmp(b)));

        let alternation = keys.iter().map(|k| regex::escape(k)).collect::<Vec<_>>().join("|");
        let pattern = Regex::new(&format!(r"(?i)\b(?:{})\b", alternation))
            .context("Failed to compile replacement pattern")?;

        Ok(Some(Self {
            pattern,
            replacements,
        }))
    }

    fn apply(&self, text: &str) -> String {
        self.pattern
            .replace_all(text, |caps: &regex::Captures| {
                let matched = &caps[0];
                self.replacements
                    .get(&matched.to_lowercase())
                    .cloned()
                    .unwrap_or_else(|| matched.to_string())
            })
            .into_owned()
    }
}

/// One language's tables in lookup form
#[derive(Debug)]
struct CompiledLanguage {
    /// Native token -> pivot text (terms and particles)
    terms: HashMap<String, String>,
    /// Native token sequence -> pivot text, longest first
    inbound_phrases: Vec<(Vec<String>, String)>,
    interrogatives: Vec<InterrogativeRule>,
    outbound_phrases: Option<Replacer>,
    outbound_terms: Option<Replacer>,
}

impl CompiledLanguage {
    fn compile(lexicon: &LanguageLexicon) -> Result<Self> {
        let mut terms = HashMap::new();
        for entry in lexicon.terms.iter().chain(lexicon.particles.iter()) {
            terms
                .entry(normalize_token(&entry.native))
                .or_insert_with(|| entry.pivot.clone());
        }

        let mut inbound_phrases = lexicon
            .inbound_phrases
            .iter()
            .map(|p| {
                let tokens = p.source.split_whitespace().map(normalize_token).collect::<Vec<_>>();
                (tokens, p.target.clone())
            })
            .filter(|(tokens, _)| !tokens.is_empty())
            .collect::<Vec<_>>();
        inbound_phrases.sort_by(|a, b| b.0.len().cmp(&a.0.len()));

        let outbound_phrases = Replacer::build(
            lexicon
                .outbound_phrases
                .iter()
                .map(|p| (p.source.as_str(), p.target.as_str())),
        )?;
        // Particles stay out of the reverse table
        let outbound_terms = Replacer::build(
            lexicon
                .terms
                .iter()
                .map(|t| (t.pivot.as_str(), t.native.as_str())),
        )?;

        Ok(Self {
            terms,
            inbound_phrases,
            interrogatives: lexicon.interrogatives.clone(),
            outbound_phrases,
            outbound_terms,
        })
    }

    fn can_render(&self) -> bool {
        self.outbound_phrases.is_some() || self.outbound_terms.is_some()
    }
}

/// Strip surrounding punctuation (including the danda) and lowercase a token
fn normalize_token(token: &str) -> String {
    token
        .trim_matches(|c: char| {
            c.is_ascii_punctuation() || matches!(c, '।' | '॥' | '“' | '”' | '‘' | '’' | '…')
        })
        .to_lowercase()
}

/// Dictionary-based translator between the pivot language and the others
#[derive(Debug)]
pub struct Translator {
    languages: HashMap<LanguageTag, CompiledLanguage>,
}

impl Translator {
    /// Compile a translator from the given lexicon
    pub fn new(lexicon: &Lexicon) -> Result<Self> {
        let mut languages = HashMap::new();
        for tag in lexicon.languages() {
            if let Some(tables) = lexicon.language(tag) {
                let compiled = CompiledLanguage::compile(tables)
                    .with_context(|| format!("Failed to compile lexicon for {}", tag.name()))?;
                debug!("Compiled {} lexicon with {} terms", tag.name(), compiled.terms.len());
                languages.insert(tag, compiled);
            }
        }
        Ok(Self { languages })
    }

    /// Translator over the built-in tables
    pub fn builtin() -> Result<Self> {
        Self::new(&Lexicon::builtin())
    }

    /// Translate `text` written in `lang` to the pivot language.
    ///
    /// Never fails: pivot or unknown input, or input where no token is in the
    /// dictionary, comes back unchanged with the minimum confidence.
    pub fn to_pivot(&self, text: &str, lang: LanguageTag) -> (String, f64) {
        let passthrough = || (text.to_string(), MIN_TRANSLATION_CONFIDENCE);

        if lang.is_pivot() || lang == LanguageTag::Unknown {
            return passthrough();
        }
        let Some(table) = self.languages.get(&lang) else {
            debug!("No lexicon for {}, passing text through", lang.name());
            return passthrough();
        };

        let tokens = text.split_whitespace().collect::<Vec<_>>();
        if tokens.is_empty() {
            return passthrough();
        }
        let normalized = tokens.iter().map(|t| normalize_token(t)).collect::<Vec<_>>();
        let mut consumed = vec![false; tokens.len()];

        let opener = Self::apply_interrogatives(&table.interrogatives, &normalized, &mut consumed);

        let mut output: Vec<String> = Vec::with_capacity(tokens.len() + 1);
        // tokens taken by a question rule were understood too
        let mut hits = consumed.iter().filter(|c| **c).count();
        let mut i = 0;
        'tokens: while i < tokens.len() {
            if consumed[i] {
                i += 1;
                continue;
            }

            for (phrase, target) in &table.inbound_phrases {
                let end = i + phrase.len();
                if end <= tokens.len()
                    && !consumed[i..end].iter().any(|c| *c)
                    && normalized[i..end] == phrase[..]
                {
                    trace!("Phrase '{}' -> '{}'", phrase.join(" "), target);
                    output.push(target.clone());
                    hits += phrase.len();
                    i = end;
                    continue 'tokens;
                }
            }

            match table.terms.get(&normalized[i]) {
                Some(pivot) => {
                    hits += 1;
                    output.push(pivot.clone());
                }
                None if normalized[i].is_empty() => {}
                None => output.push(normalized[i].clone()),
            }
            i += 1;
        }

        if hits == 0 {
            debug!("No dictionary match for {} text, passing through", lang.name());
            return passthrough();
        }

        let pivot_text = match opener {
            Some(opener) => format!("{} {}", opener, output.join(" ")).trim().to_string(),
            None => output.join(" "),
        };

        let confidence = (hits as f64 / tokens.len() as f64).clamp(MIN_TRANSLATION_CONFIDENCE, 1.0);
        (pivot_text, confidence)
    }

    /// Find the first matching question rule, mark its tokens as consumed and
    /// return its opener
    fn apply_interrogatives(
        rules: &[InterrogativeRule],
        normalized: &[String],
        consumed: &mut [bool],
    ) -> Option<String> {
        for rule in rules {
            let Some(particle_at) = normalized.iter().position(|t| rule.particles.iter().any(|p| p == t)) else {
                continue;
            };

            let qualifier_at = if rule.qualifiers.is_empty() {
                None
            } else {
                match normalized.iter().position(|t| rule.qualifiers.iter().any(|q| q == t)) {
                    Some(at) => Some(at),
                    None => continue,
                }
            };

            consumed[particle_at] = true;
            if let Some(at) = qualifier_at {
                consumed[at] = true;
            }
            return Some(rule.opener.clone());
        }
        None
    }

    /// Render pivot-language `text` in `lang`. Identity for the pivot language.
    pub fn from_pivot(&self, text: &str, lang: LanguageTag) -> String {
        if lang.is_pivot() || lang == LanguageTag::Unknown {
            return text.to_string();
        }

        match self.languages.get(&lang).filter(|t| t.can_render()) {
            Some(table) => {
                let mut rendered = text.to_string();
                if let Some(phrases) = &table.outbound_phrases {
                    rendered = phrases.apply(&rendered);
                }
                if let Some(terms) = &table.outbound_terms {
                    rendered = terms.apply(&rendered);
                }
                rendered
            }
            None => format!("{} (full translation to {} not available)", text, lang.name()),
        }
    }

    /// Run the inbound leg and capture its context
    pub fn translate_query(&self, text: &str, lang: LanguageTag) -> (String, TranslationContext) {
        let (pivot_text, confidence) = self.to_pivot(text, lang);
        (pivot_text, TranslationContext::new(lang, text, confidence))
    }

    /// Whether the translator has tables for `lang`
    pub fn supports(&self, lang: LanguageTag) -> bool {
        self.languages.contains_key(&lang)
    }
}
