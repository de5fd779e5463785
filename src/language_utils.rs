//! Language utilities for script-based language detection
//!
//! This module classifies raw query text by the Unicode blocks its characters
//! fall into, and maps between [`LanguageTag`] values and ISO 639 codes.

use std::fmt;

use anyhow::{Result, anyhow};
use isolang::Language;
use serde::{Deserialize, Serialize};

/// A language the router can detect.
///
/// `English` is the pivot language every classifier and handler works in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageTag {
    English,
    Hindi,
    Bengali,
    Telugu,
    Tamil,
    Malayalam,
    Kannada,
    Gujarati,
    Punjabi,
    Unknown,
}

/// The pivot language all classification and dispatch happens in.
pub const PIVOT_LANGUAGE: LanguageTag = LanguageTag::English;

impl LanguageTag {
    /// All tags with a known script, pivot first.
    pub const KNOWN: [LanguageTag; 9] = [
        LanguageTag::English,
        LanguageTag::Hindi,
        LanguageTag::Bengali,
        LanguageTag::Telugu,
        LanguageTag::Tamil,
        LanguageTag::Malayalam,
        LanguageTag::Kannada,
        LanguageTag::Gujarati,
        LanguageTag::Punjabi,
    ];

    // @returns: ISO 639-1 code, "und" for unknown
    pub fn code(&self) -> &'static str {
        match self {
            Self::English => "en",
            Self::Hindi => "hi",
            Self::Bengali => "bn",
            Self::Telugu => "te",
            Self::Tamil => "ta",
            Self::Malayalam => "ml",
            Self::Kannada => "kn",
            Self::Gujarati => "gu",
            Self::Punjabi => "pa",
            Self::Unknown => "und",
        }
    }

    /// English display name of the language
    pub fn name(&self) -> String {
        // ISO 639 spells it "Panjabi"; farmers and the CLI say "Punjabi"
        if *self == Self::Punjabi {
            return "Punjabi".to_string();
        }
        Language::from_639_1(self.code())
            .map(|lang| lang.to_name().to_string())
            .unwrap_or_else(|| "Unknown".to_string())
    }

    /// Whether this is the pivot language
    pub fn is_pivot(&self) -> bool {
        *self == PIVOT_LANGUAGE
    }

    /// Unicode block covering this language's script, if it has one of its own
    fn script_range(&self) -> Option<(u32, u32)> {
        match self {
            Self::Hindi => Some((0x0900, 0x097F)),
            Self::Bengali => Some((0x0980, 0x09FF)),
            Self::Punjabi => Some((0x0A00, 0x0A7F)),
            Self::Gujarati => Some((0x0A80, 0x0AFF)),
            Self::Tamil => Some((0x0B80, 0x0BFF)),
            Self::Telugu => Some((0x0C00, 0x0C7F)),
            Self::Kannada => Some((0x0C80, 0x0CFF)),
            Self::Malayalam => Some((0x0D00, 0x0D7F)),
            Self::English | Self::Unknown => None,
        }
    }

    fn from_part3(code: &str) -> Option<Self> {
        match code {
            "eng" => Some(Self::English),
            "hin" => Some(Self::Hindi),
            "ben" => Some(Self::Bengali),
            "tel" => Some(Self::Telugu),
            "tam" => Some(Self::Tamil),
            "mal" => Some(Self::Malayalam),
            "kan" => Some(Self::Kannada),
            "guj" => Some(Self::Gujarati),
            "pan" => Some(Self::Punjabi),
            _ => None,
        }
    }
}

impl fmt::Display for LanguageTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl std::str::FromStr for LanguageTag {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        parse_language_tag(s)
    }
}

/// Parse an ISO 639-1 / 639-3 code or an English language name into a tag
pub fn parse_language_tag(code: &str) -> Result<LanguageTag> {
    let normalized = code.trim().to_lowercase();

    if normalized == "und" || normalized == "unknown" {
        return Ok(LanguageTag::Unknown);
    }

    let iso = match normalized.len() {
        2 => Language::from_639_1(&normalized),
        3 => Language::from_639_3(&normalized),
        _ => None,
    };
    if let Some(tag) = iso.and_then(|lang| LanguageTag::from_part3(lang.to_639_3())) {
        return Ok(tag);
    }

    LanguageTag::KNOWN
        .iter()
        .copied()
        .find(|tag| tag.name().eq_ignore_ascii_case(&normalized) || format!("{:?}", tag).eq_ignore_ascii_case(&normalized))
        .ok_or_else(|| anyhow!("Unsupported language: {}", code))
}

/// Which bucket a single character falls into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Script {
    Known(LanguageTag),
    Other,
}

fn classify_char(c: char) -> Script {
    let cp = c as u32;

    // ASCII, Latin-1 supplement, Latin Extended-A/B and general punctuation
    if cp < 0x0250 || (0x2000..=0x206F).contains(&cp) {
        return Script::Known(LanguageTag::English);
    }

    LanguageTag::KNOWN
        .iter()
        .find(|tag| tag.script_range().is_some_and(|(lo, hi)| (lo..=hi).contains(&cp)))
        .map(|tag| Script::Known(*tag))
        .unwrap_or(Script::Other)
}

/// Per-script character counts over the non-whitespace characters of a text
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScriptProfile {
    /// Non-whitespace characters seen
    pub total: usize,
    /// Characters per known language, in `LanguageTag::KNOWN` order
    pub counts: Vec<(LanguageTag, usize)>,
    /// Characters outside every known script
    pub other: usize,
}

impl ScriptProfile {
    /// Fraction of characters belonging to `tag`'s script
    pub fn share(&self, tag: LanguageTag) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        let count = if tag == LanguageTag::Unknown {
            self.other
        } else {
            self.counts
                .iter()
                .find(|(t, _)| *t == tag)
                .map(|(_, n)| *n)
                .unwrap_or(0)
        };
        count as f64 / self.total as f64
    }

    /// Number of distinct scripts present
    pub fn script_count(&self) -> usize {
        self.counts.iter().filter(|(_, n)| *n > 0).count() + usize::from(self.other > 0)
    }

    /// The majority language, with ties resolving to the pivot language
    pub fn dominant(&self) -> LanguageTag {
        let best = self
            .counts
            .iter()
            .map(|(_, n)| *n)
            .chain(std::iter::once(self.other))
            .max()
            .unwrap_or(0);

        if best == 0 {
            return PIVOT_LANGUAGE;
        }

        let mut leaders = self
            .counts
            .iter()
            .filter(|(_, n)| *n == best)
            .map(|(t, _)| *t)
            .collect::<Vec<_>>();
        if self.other == best {
            leaders.push(LanguageTag::Unknown);
        }

        match leaders.as_slice() {
            [single] => *single,
            _ => PIVOT_LANGUAGE,
        }
    }
}

/// Count the characters of `text` per script
pub fn script_profile(text: &str) -> ScriptProfile {
    let mut profile = ScriptProfile {
        counts: LanguageTag::KNOWN.iter().map(|tag| (*tag, 0)).collect(),
        ..Default::default()
    };

    for c in text.chars().filter(|c| !c.is_whitespace()) {
        profile.total += 1;
        match classify_char(c) {
            Script::Known(tag) => {
                if let Some(slot) = profile.counts.iter_mut().find(|(t, _)| *t == tag) {
                    slot.1 += 1;
                }
            }
            Script::Other => profile.other += 1,
        }
    }

    profile
}

/// Like [`script_profile`] but over letters only, so punctuation and digits
/// in native-script text do not make it look code-mixed
pub fn letter_profile(text: &str) -> ScriptProfile {
    let letters = text.chars().filter(|c| c.is_alphabetic()).collect::<String>();
    script_profile(&letters)
}

/// Detect the language of a query from its script.
///
/// Never fails: the script covering most non-whitespace characters wins, a tie
/// (including plain ASCII and empty text) goes to the pivot language, and a
/// majority of unrecognized characters yields `LanguageTag::Unknown`.
pub fn detect(text: &str) -> LanguageTag {
    script_profile(text).dominant()
}
