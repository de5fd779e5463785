/*!
 * Keyword classifier.
 *
 * Every category is scored independently as matched weight over total weight,
 * so one query can legitimately rank several categories (e.g. "irrigation
 * cost for cotton" touches irrigation and crop).
 */

use std::collections::BTreeSet;

use log::debug;

use super::keywords::{CategoryRules, default_rules};
use super::{CategoryScore, ClassificationResult};

/// Split pivot text into lowercase alphanumeric tokens
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(|t| t.to_lowercase())
        .collect()
}

/// Scores pivot-language text against each category's keyword groups
#[derive(Debug, Clone)]
pub struct Classifier {
    rules: Vec<CategoryRules>,
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Classifier {
    /// Classifier over the built-in keyword tables
    pub fn new() -> Self {
        Self::with_rules(default_rules())
    }

    /// Classifier over custom keyword tables
    pub fn with_rules(rules: Vec<CategoryRules>) -> Self {
        Self { rules }
    }

    /// Classify a pivot-language query. Never returns an empty result.
    pub fn classify(&self, pivot_text: &str) -> ClassificationResult {
        let tokens = tokenize(pivot_text);
        let normalized = tokens.join(" ");

        let scores = self
            .rules
            .iter()
            .map(|rules| Self::score(rules, &tokens, &normalized))
            .collect::<Vec<_>>();

        let result = ClassificationResult::from_scores(scores);
        debug!(
            "Classified '{}' as {}",
            pivot_text,
            result
                .entries()
                .iter()
                .map(|e| format!("{}={:.2}", e.category, e.score))
                .collect::<Vec<_>>()
                .join(", ")
        );
        result
    }

    fn score(rules: &CategoryRules, tokens: &[String], normalized: &str) -> CategoryScore {
        let total = rules.total_weight();
        let mut matched_weight = 0u32;
        let mut matched_terms = BTreeSet::new();

        for group in &rules.groups {
            let hits = group.matches(tokens, normalized);
            if !hits.is_empty() {
                matched_weight += group.weight;
                matched_terms.extend(hits);
            }
        }

        let score = if total == 0 {
            0.0
        } else {
            (matched_weight as f64 / total as f64).clamp(0.0, 1.0)
        };

        CategoryScore {
            category: rules.category,
            score,
            matched_terms,
        }
    }
}
