//! VADER polarity scoring.
//!
//! Scoring runs on the `vader_sentiment` port, which bundles the complete
//! VADER lexicon and emoji table along with its rule set: boosters and
//! dampeners, ALL-CAPS emphasis, negation, contrastive "but" and `!`/`?`
//! amplification. This module adapts its string-keyed output into
//! [`PolarityScores`].

use std::fmt;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

static VADER: Lazy<vader_sentiment::SentimentIntensityAnalyzer<'static>> =
    Lazy::new(vader_sentiment::SentimentIntensityAnalyzer::new);

/// Raw analyzer output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PolarityScores {
    /// Proportion of negative signal.
    pub neg: f64,
    /// Proportion of neutral tokens.
    pub neu: f64,
    /// Proportion of positive signal.
    pub pos: f64,
    /// Normalized aggregate polarity in `[-1, 1]`.
    pub compound: f64,
}

/// Lexicon-driven sentiment analyzer.
#[derive(Clone, Copy)]
pub struct SentimentIntensityAnalyzer {
    inner: &'static vader_sentiment::SentimentIntensityAnalyzer<'static>,
}

impl fmt::Debug for SentimentIntensityAnalyzer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SentimentIntensityAnalyzer")
            .field("lexicon", &"vader")
            .finish()
    }
}

impl Default for SentimentIntensityAnalyzer {
    fn default() -> Self {
        Self { inner: &VADER }
    }
}

impl SentimentIntensityAnalyzer {
    /// Score `text`. Blank text yields all-zero scores.
    pub fn polarity_scores(&self, text: &str) -> PolarityScores {
        if text.trim().is_empty() {
            return PolarityScores::default();
        }
        let scores = self.inner.polarity_scores(text);
        let get = |key: &str| {
            scores
                .get(key)
                .copied()
                .filter(|v| v.is_finite())
                .unwrap_or(0.0)
        };
        PolarityScores {
            neg: get("neg"),
            neu: get("neu"),
            pos: get("pos"),
            compound: get("compound").clamp(-1.0, 1.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compound(text: &str) -> f64 {
        SentimentIntensityAnalyzer::default().polarity_scores(text).compound
    }

    #[test]
    fn test_empty_text_is_all_zero() {
        let scores = SentimentIntensityAnalyzer::default().polarity_scores("");
        assert_eq!(scores, PolarityScores::default());
        assert_eq!(compound("   \n\t "), 0.0);
    }

    #[test]
    fn test_single_positive_word() {
        // love = 3.2, normalized 3.2 / sqrt(3.2^2 + 15)
        assert!((compound("I love this") - 0.6369).abs() < 1e-3);
    }

    #[test]
    fn test_inflected_forms_carry_sentiment() {
        assert!(compound("She loves this") > 0.05);
        assert!(compound("I won the game") > 0.05);
        assert!(compound("He hates it") < -0.05);
        assert!(compound("That hurts") < -0.05);
    }

    #[test]
    fn test_exclamation_amplifies() {
        assert!(compound("I love this!") > compound("I love this"));
        assert!((compound("I love this!!!!!!") - compound("I love this!!!!")).abs() < 1e-9);
    }

    #[test]
    fn test_short_tokens_keep_their_punctuation() {
        // Stripping "no." or "ok!" would leave two characters, so the token
        // stays as written and misses the lexicon.
        assert_eq!(compound("no."), 0.0);
        assert_eq!(compound("ok!"), 0.0);
        assert!(compound("Great!") > 0.0);
    }

    #[test]
    fn test_negation_flips_polarity() {
        assert!(compound("This is good") > 0.0);
        assert!(compound("This is not good") < 0.0);
        assert!(compound("This isn't good") < 0.0);
    }

    #[test]
    fn test_booster_and_dampener() {
        let plain = compound("The food is good");
        assert!(compound("The food is very good") > plain);
        assert!(compound("The food is slightly good") < plain);
    }

    #[test]
    fn test_caps_emphasis_in_mixed_case() {
        assert!(compound("The movie was GREAT today") > compound("The movie was great today"));
    }

    #[test]
    fn test_but_shifts_weight_to_second_clause() {
        assert!(compound("The food was good but the service was terrible") < 0.0);
        assert!(compound("The service was terrible but the food was great") > 0.0);
    }

    #[test]
    fn test_emoticon_is_scored() {
        assert!(compound("see you tomorrow :)") > 0.0);
    }

    #[test]
    fn test_proportions_sum_to_one() {
        let scores = SentimentIntensityAnalyzer::default()
            .polarity_scores("I love sunny days but hate the rain");
        let sum = scores.pos + scores.neu + scores.neg;
        assert!((sum - 1.0).abs() < 0.01, "sum was {}", sum);
    }
}
