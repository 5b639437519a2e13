//! Sentiment classification for chat turns.
//!
//! [`classify`] scores text with the VADER analyzer and buckets the
//! compound score:
//!
//! ```text
//!   -1.0        -0.25        -0.05   0.05        0.25         1.0
//!    |very_neg ]( slightly_neg ]( neutral )[ slightly_pos )[ very_pos |
//! ```
//!
//! Display attributes (label, color) for each bucket come from one lookup
//! table so rendering never re-derives them from the score.

pub mod analyzer;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use analyzer::{PolarityScores, SentimentIntensityAnalyzer};

/// Compound magnitude at which sentiment becomes "very".
pub const STRONG_THRESHOLD: f64 = 0.25;

/// Compound magnitude at which sentiment stops being neutral.
pub const NEUTRAL_THRESHOLD: f64 = 0.05;

/// Five-way sentiment category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SentimentBucket {
    VeryNegative,
    SlightlyNegative,
    Neutral,
    SlightlyPositive,
    VeryPositive,
}

/// How a bucket is presented to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayAttributes {
    pub label: &'static str,
    pub color: &'static str,
}

// Indexed by `SentimentBucket as usize`.
const BUCKET_ATTRIBUTES: [DisplayAttributes; 5] = [
    DisplayAttributes {
        label: "Very Negative",
        color: "darkred",
    },
    DisplayAttributes {
        label: "Slightly Negative",
        color: "red",
    },
    DisplayAttributes {
        label: "Neutral",
        color: "grey",
    },
    DisplayAttributes {
        label: "Slightly Positive",
        color: "green",
    },
    DisplayAttributes {
        label: "Very Positive",
        color: "darkgreen",
    },
];

// Indexed by `CoarseSentiment as usize`.
const COARSE_ATTRIBUTES: [DisplayAttributes; 3] = [
    DisplayAttributes {
        label: "Negative",
        color: "red",
    },
    DisplayAttributes {
        label: "Neutral",
        color: "grey",
    },
    DisplayAttributes {
        label: "Positive",
        color: "green",
    },
];

impl SentimentBucket {
    /// Every bucket, most negative first.
    pub const ALL: [SentimentBucket; 5] = [
        Self::VeryNegative,
        Self::SlightlyNegative,
        Self::Neutral,
        Self::SlightlyPositive,
        Self::VeryPositive,
    ];

    /// Bucket a compound score. Non-finite scores are treated as neutral.
    pub fn from_compound(compound: f64) -> Self {
        if !compound.is_finite() {
            return Self::Neutral;
        }
        if compound <= -STRONG_THRESHOLD {
            Self::VeryNegative
        } else if compound >= STRONG_THRESHOLD {
            Self::VeryPositive
        } else if compound >= NEUTRAL_THRESHOLD {
            Self::SlightlyPositive
        } else if compound > -NEUTRAL_THRESHOLD {
            Self::Neutral
        } else {
            Self::SlightlyNegative
        }
    }

    pub fn attributes(self) -> &'static DisplayAttributes {
        &BUCKET_ATTRIBUTES[self as usize]
    }

    pub fn label(self) -> &'static str {
        self.attributes().label
    }

    pub fn color(self) -> &'static str {
        self.attributes().color
    }

    /// Stable snake_case identifier, matching the serde form.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::VeryNegative => "very_negative",
            Self::SlightlyNegative => "slightly_negative",
            Self::Neutral => "neutral",
            Self::SlightlyPositive => "slightly_positive",
            Self::VeryPositive => "very_positive",
        }
    }

    /// Collapse into the three-way view.
    pub fn coarse(self) -> CoarseSentiment {
        match self {
            Self::VeryNegative | Self::SlightlyNegative => CoarseSentiment::Negative,
            Self::Neutral => CoarseSentiment::Neutral,
            Self::SlightlyPositive | Self::VeryPositive => CoarseSentiment::Positive,
        }
    }
}

impl fmt::Display for SentimentBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Three-way sentiment category (negative / neutral / positive).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoarseSentiment {
    Negative,
    Neutral,
    Positive,
}

impl CoarseSentiment {
    pub fn from_compound(compound: f64) -> Self {
        SentimentBucket::from_compound(compound).coarse()
    }

    pub fn attributes(self) -> &'static DisplayAttributes {
        &COARSE_ATTRIBUTES[self as usize]
    }

    pub fn label(self) -> &'static str {
        self.attributes().label
    }

    pub fn color(self) -> &'static str {
        self.attributes().color
    }
}

/// Classification of one piece of text.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentResult {
    /// Compound polarity in `[-1, 1]`.
    pub compound: f64,
    pub bucket: SentimentBucket,
    /// Full analyzer output the compound came from.
    pub scores: PolarityScores,
}

impl SentimentResult {
    pub fn from_scores(scores: PolarityScores) -> Self {
        Self {
            compound: scores.compound,
            bucket: SentimentBucket::from_compound(scores.compound),
            scores,
        }
    }

    pub fn coarse(&self) -> CoarseSentiment {
        self.bucket.coarse()
    }
}

/// Classify `text` with the VADER lexicon.
///
/// Pure and deterministic; empty text is neutral with a compound of 0.
pub fn classify(text: &str) -> SentimentResult {
    classify_with(&SentimentIntensityAnalyzer::default(), text)
}

/// Classify `text` with a specific analyzer.
pub fn classify_with(analyzer: &SentimentIntensityAnalyzer, text: &str) -> SentimentResult {
    SentimentResult::from_scores(analyzer.polarity_scores(text))
}
