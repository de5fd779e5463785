/*!
 * Intent classification of pivot-language queries.
 *
 * - `keywords`: the weighted keyword groups each category owns
 * - `classifier`: scoring and ranking
 */

use std::collections::BTreeSet;
use std::fmt;

use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};

pub use self::classifier::Classifier;
pub use self::keywords::{CategoryRules, KeywordGroup, Matcher};

pub mod classifier;
pub mod keywords;

/// Domain a query can be routed to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentCategory {
    Weather,
    Crop,
    Market,
    Irrigation,
    Pest,
    Finance,
    Unclassified,
}

impl IntentCategory {
    /// Routable categories in tie-break priority order
    pub const BY_PRIORITY: [IntentCategory; 6] = [
        IntentCategory::Pest,
        IntentCategory::Weather,
        IntentCategory::Market,
        IntentCategory::Irrigation,
        IntentCategory::Crop,
        IntentCategory::Finance,
    ];

    /// Tie-break rank, lower wins. Urgent and safety-relevant domains come first.
    pub fn priority(&self) -> usize {
        Self::BY_PRIORITY
            .iter()
            .position(|c| c == self)
            .unwrap_or(Self::BY_PRIORITY.len())
    }

    // @returns: Lowercase identifier used in config and logs
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Weather => "weather",
            Self::Crop => "crop",
            Self::Market => "market",
            Self::Irrigation => "irrigation",
            Self::Pest => "pest",
            Self::Finance => "finance",
            Self::Unclassified => "unclassified",
        }
    }

    /// Human-readable description of the domain
    pub fn description(&self) -> &'static str {
        match self {
            Self::Weather => "Weather information and forecasts",
            Self::Crop => "Crop and seed recommendations",
            Self::Market => "Market prices and commodity rates",
            Self::Irrigation => "Irrigation guidance and water management",
            Self::Pest => "Pest identification and disease management",
            Self::Finance => "Government schemes and financial assistance",
            Self::Unclassified => "Query category could not be determined",
        }
    }
}

impl fmt::Display for IntentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for IntentCategory {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "weather" => Ok(Self::Weather),
            "crop" | "crop_recommendation" => Ok(Self::Crop),
            "market" | "market_price" => Ok(Self::Market),
            "irrigation" => Ok(Self::Irrigation),
            "pest" | "pest_disease" => Ok(Self::Pest),
            "finance" | "finance_policy" => Ok(Self::Finance),
            "unclassified" | "unknown" => Ok(Self::Unclassified),
            _ => Err(anyhow!("Invalid intent category: {}", s)),
        }
    }
}

/// One category's score for a query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryScore {
    pub category: IntentCategory,
    /// Matched weight over total weight, in [0, 1]
    pub score: f64,
    /// Keywords and pattern matches that contributed
    pub matched_terms: BTreeSet<String>,
}

impl CategoryScore {
    /// The entry reported when nothing matched
    pub fn unclassified() -> Self {
        Self {
            category: IntentCategory::Unclassified,
            score: 0.0,
            matched_terms: BTreeSet::new(),
        }
    }
}

/// Categories ranked by descending score, ties broken by priority. Never empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RankedScores")]
pub struct ClassificationResult {
    entries: Vec<CategoryScore>,
}

/// Wire shape of a ranking; re-ranked on the way in
#[derive(Deserialize)]
struct RankedScores {
    #[serde(default)]
    entries: Vec<CategoryScore>,
}

impl From<RankedScores> for ClassificationResult {
    fn from(ranked: RankedScores) -> Self {
        Self::from_scores(ranked.entries)
    }
}

impl ClassificationResult {
    /// Rank the given scores. Zero scores are dropped; an empty ranking becomes
    /// the single `unclassified` entry.
    pub fn from_scores(scores: Vec<CategoryScore>) -> Self {
        let mut entries = scores
            .into_iter()
            .filter(|s| s.score > 0.0 && s.category != IntentCategory::Unclassified)
            .collect::<Vec<_>>();

        entries.sort_by(|a, b| {
            b.score
                .total_cmp(&a.score)
                .then_with(|| a.category.priority().cmp(&b.category.priority()))
        });

        if entries.is_empty() {
            entries.push(CategoryScore::unclassified());
        }
        Self { entries }
    }

    /// All entries in rank order
    pub fn entries(&self) -> &[CategoryScore] {
        &self.entries
    }

    /// The best-ranked entry
    pub fn top(&self) -> &CategoryScore {
        // from_scores guarantees at least one entry
        &self.entries[0]
    }

    /// Whether nothing matched
    pub fn is_unclassified(&self) -> bool {
        self.top().category == IntentCategory::Unclassified
    }

    /// Score for a category, 0.0 if it did not match
    pub fn score_of(&self, category: IntentCategory) -> f64 {
        self.entries
            .iter()
            .find(|e| e.category == category)
            .map(|e| e.score)
            .unwrap_or(0.0)
    }

    /// Entries at or above `threshold`, in rank order, never `unclassified`
    pub fn qualifying(&self, threshold: f64) -> Vec<&CategoryScore> {
        self.entries
            .iter()
            .filter(|e| e.category != IntentCategory::Unclassified && e.score >= threshold)
            .collect()
    }
}
