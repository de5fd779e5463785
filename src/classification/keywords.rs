/*!
 * Weighted keyword groups per intent category.
 *
 * A group is a set of synonyms (single words or multi-word phrases) or a
 * question pattern. It contributes its weight once when any member matches.
 * Weights are integers and each category's weights sum to 10, so equal matches
 * always produce identical scores.
 */

use once_cell::sync::Lazy;
use regex::Regex;

use super::IntentCategory;

/// How a keyword group recognizes a query
#[derive(Debug, Clone)]
pub enum Matcher {
    /// Whole-token words or token sequences
    Terms(Vec<String>),
    /// A regex over the normalized (lowercase, single-spaced) query
    Pattern(Regex),
}

/// A weighted group of keywords
#[derive(Debug, Clone)]
pub struct KeywordGroup {
    pub weight: u32,
    pub matcher: Matcher,
}

impl KeywordGroup {
    /// Group of synonymous terms
    pub fn terms(weight: u32, terms: &[&str]) -> Self {
        Self {
            weight,
            matcher: Matcher::Terms(terms.iter().map(|t| t.to_lowercase()).collect()),
        }
    }

    /// Group matched by a question pattern
    pub fn pattern(weight: u32, pattern: Regex) -> Self {
        Self {
            weight,
            matcher: Matcher::Pattern(pattern),
        }
    }

    /// Return the members present in the query, empty if none
    pub fn matches(&self, tokens: &[String], normalized: &str) -> Vec<String> {
        match &self.matcher {
            Matcher::Terms(terms) => terms
                .iter()
                .filter(|term| contains_sequence(tokens, term))
                .cloned()
                .collect(),
            Matcher::Pattern(pattern) => pattern
                .find(normalized)
                .map(|m| vec![m.as_str().to_string()])
                .unwrap_or_default(),
        }
    }
}

/// Whether `term` (one or more space-separated words) occurs as whole tokens
fn contains_sequence(tokens: &[String], term: &str) -> bool {
    let words = term.split_whitespace().collect::<Vec<_>>();
    if words.is_empty() || words.len() > tokens.len() {
        return false;
    }
    tokens
        .windows(words.len())
        .any(|window| window.iter().zip(&words).all(|(t, w)| t == w))
}

/// All keyword groups for one category
#[derive(Debug, Clone)]
pub struct CategoryRules {
    pub category: IntentCategory,
    pub groups: Vec<KeywordGroup>,
}

impl CategoryRules {
    /// Sum of every group's weight
    pub fn total_weight(&self) -> u32 {
        self.groups.iter().map(|g| g.weight).sum()
    }
}

static DEFAULT_RULES: Lazy<Vec<CategoryRules>> = Lazy::new(|| {
    vec![
        CategoryRules {
            category: IntentCategory::Weather,
            groups: vec![
                KeywordGroup::terms(4, &["weather", "forecast", "climate"]),
                KeywordGroup::terms(
                    4,
                    &["rain", "rainfall", "raining", "rains", "monsoon", "drizzle", "shower", "showers"],
                ),
                KeywordGroup::terms(
                    1,
                    &[
                        "temperature", "humidity", "wind", "storm", "cloudy", "sunny", "heat", "cold",
                        "frost", "hail",
                    ],
                ),
                KeywordGroup::pattern(
                    1,
                    Regex::new(r"\bwill\b.*\brain|\brain\w*\b.*\b(today|tomorrow)\b|\bmonsoon\b.*\barriv").unwrap(),
                ),
            ],
        },
        CategoryRules {
            category: IntentCategory::Crop,
            groups: vec![
                KeywordGroup::terms(
                    4,
                    &[
                        "crop", "crops", "sow", "sowing", "seed", "seeds", "variety", "varieties",
                        "cultivation", "cultivate", "grow", "growing", "plant", "planting",
                    ],
                ),
                KeywordGroup::terms(
                    3,
                    &[
                        "wheat", "rice", "paddy", "cotton", "maize", "sugarcane", "tomato", "potato",
                        "onion", "soybean", "mustard", "pulses", "gram", "millet", "bajra", "jowar",
                        "jute", "groundnut",
                    ],
                ),
                KeywordGroup::terms(2, &["kharif", "rabi", "zaid", "season"]),
                KeywordGroup::pattern(
                    1,
                    Regex::new(r"\b(which|what|best)\b.*\b(crop|seed|variety)|\brecommend\w*\b.*\bcrop|\bsuitable\b")
                        .unwrap(),
                ),
            ],
        },
        CategoryRules {
            category: IntentCategory::Market,
            groups: vec![
                KeywordGroup::terms(5, &["price", "prices", "rate", "rates", "mandi", "market", "markets", "msp"]),
                KeywordGroup::terms(
                    2,
                    &["cost", "sell", "selling", "buy", "buying", "wholesale", "retail", "trading", "commodity"],
                ),
                KeywordGroup::terms(1, &["quintal", "tonne", "rupees", "rs", "inr"]),
                KeywordGroup::pattern(
                    2,
                    Regex::new(r"\bhow much\b.*\bsell|\bcurrent\b.*\b(price|rate)|\b(price|rate)s?\b.*\bof\b").unwrap(),
                ),
            ],
        },
        CategoryRules {
            category: IntentCategory::Irrigation,
            groups: vec![
                KeywordGroup::terms(5, &["irrigation", "irrigate", "irrigating", "watering"]),
                KeywordGroup::terms(
                    3,
                    &["water", "drip", "sprinkler", "canal", "borewell", "bore", "pump", "moisture", "tubewell"],
                ),
                KeywordGroup::pattern(
                    2,
                    Regex::new(
                        r"\bwhen\b.*\b(water|irrigat\w*)\b|\birrigation\b.*\bschedule|\bwater\b.*\brequirement|\bhow\b.*\birrigat",
                    )
                    .unwrap(),
                ),
            ],
        },
        CategoryRules {
            category: IntentCategory::Pest,
            groups: vec![
                KeywordGroup::terms(
                    5,
                    &[
                        "pest", "pests", "insect", "insects", "bug", "bugs", "aphid", "aphids",
                        "caterpillar", "caterpillars", "worm", "worms", "locust", "whitefly",
                        "infestation", "disease", "diseases", "fungus", "fungal", "virus", "bacteria",
                        "blight", "rot", "wilt", "mildew",
                    ],
                ),
                KeywordGroup::terms(
                    2,
                    &[
                        "leaf", "leaves", "spot", "spots", "yellow", "yellowing", "brown", "curl",
                        "curling", "damage", "sick",
                    ],
                ),
                KeywordGroup::terms(1, &["spray", "pesticide", "pesticides", "neem", "control", "treatment"]),
                KeywordGroup::pattern(
                    2,
                    Regex::new(
                        r"\b(yellow|brown)\w*\b.*\blea(f|ves)\b|\blea(f|ves)\b.*\b(yellow|brown)|\bspots?\b.*\bon\b|\binsects?\b.*\battack|\bplants?\b.*\bsick",
                    )
                    .unwrap(),
                ),
            ],
        },
        CategoryRules {
            category: IntentCategory::Finance,
            groups: vec![
                KeywordGroup::terms(
                    5,
                    &[
                        "loan", "loans", "credit", "subsidy", "subsidies", "scheme", "schemes",
                        "insurance", "pension", "kcc",
                    ],
                ),
                KeywordGroup::terms(
                    3,
                    &["government", "bank", "kisan", "pmkisan", "fasal", "bima", "nabard", "pmfby"],
                ),
                KeywordGroup::terms(
                    1,
                    &["benefit", "benefits", "compensation", "eligibility", "eligible", "apply", "finance", "policy"],
                ),
                KeywordGroup::pattern(
                    1,
                    Regex::new(r"\bkisan\b.*\bscheme|\bcrop\b.*\binsurance|\bloan\b.*\bagricultur|\bgovernment\b.*\bbenefit")
                        .unwrap(),
                ),
            ],
        },
    ]
});

/// The built-in rules for every routable category
pub fn default_rules() -> Vec<CategoryRules> {
    DEFAULT_RULES.clone()
}
