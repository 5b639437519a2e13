//! Canned tone prefixes, drawn round-robin per sentiment bucket.
//!
//! A [`ToneSelector`] belongs to one chat session. Each bucket keeps its own
//! cursor; a draw returns the phrase under the cursor and advances it modulo
//! the list length, so a bucket never repeats a phrase until its whole list
//! has been used once.

use std::collections::HashMap;

use crate::sentiment::SentimentBucket;

const VERY_POSITIVE_PHRASES: [&str; 8] = [
    "That's wonderful to hear!",
    "I love your enthusiasm!",
    "Fantastic!",
    "Your excitement is contagious!",
    "That's absolutely great!",
    "How exciting!",
    "Brilliant!",
    "I'm thrilled for you!",
];

const SLIGHTLY_POSITIVE_PHRASES: [&str; 8] = [
    "Glad to hear that.",
    "That sounds nice.",
    "Good to know!",
    "Sounds like things are going okay.",
    "Nice!",
    "That's pleasant to hear.",
    "Happy to help with that.",
    "Sounds good.",
];

const NEUTRAL_PHRASES: [&str; 8] = [
    "Got it.",
    "Understood.",
    "Okay.",
    "Sure thing.",
    "Alright.",
    "Let me see.",
    "Noted.",
    "Here's what I have.",
];

const SLIGHTLY_NEGATIVE_PHRASES: [&str; 8] = [
    "I see, that's a bit frustrating.",
    "Sorry to hear that.",
    "Hmm, that's not ideal.",
    "That sounds a little tough.",
    "I understand your concern.",
    "Let's see if we can sort that out.",
    "That's unfortunate.",
    "I hear you.",
];

const VERY_NEGATIVE_PHRASES: [&str; 8] = [
    "I'm really sorry you're going through this.",
    "That sounds very difficult.",
    "I'm sorry, that must be upsetting.",
    "I understand this is hard.",
    "That's awful, I'm sorry.",
    "I'm here to help.",
    "I'm sorry things are so rough right now.",
    "Let's work through this together.",
];

/// Built-in phrase list for a bucket.
pub fn default_phrases(bucket: SentimentBucket) -> &'static [&'static str] {
    match bucket {
        SentimentBucket::VeryPositive => &VERY_POSITIVE_PHRASES,
        SentimentBucket::SlightlyPositive => &SLIGHTLY_POSITIVE_PHRASES,
        SentimentBucket::Neutral => &NEUTRAL_PHRASES,
        SentimentBucket::SlightlyNegative => &SLIGHTLY_NEGATIVE_PHRASES,
        SentimentBucket::VeryNegative => &VERY_NEGATIVE_PHRASES,
    }
}

/// Per-session round-robin state over the phrase lists.
#[derive(Debug, Clone)]
pub struct ToneSelector {
    phrases: HashMap<SentimentBucket, Vec<String>>,
    cursors: HashMap<SentimentBucket, usize>,
}

impl Default for ToneSelector {
    fn default() -> Self {
        let phrases = SentimentBucket::ALL
            .iter()
            .map(|&bucket| {
                let list = default_phrases(bucket).iter().map(|p| p.to_string()).collect();
                (bucket, list)
            })
            .collect();
        Self::with_phrases(phrases)
    }
}

impl ToneSelector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use custom phrase lists. Buckets missing from the map (or mapped to an
    /// empty list) never produce a tone.
    pub fn with_phrases(phrases: HashMap<SentimentBucket, Vec<String>>) -> Self {
        Self {
            phrases,
            cursors: HashMap::new(),
        }
    }

    /// Draw the next phrase for `bucket` and advance its cursor.
    ///
    /// Returns `None` when the bucket has no phrases.
    pub fn next_tone(&mut self, bucket: SentimentBucket) -> Option<&str> {
        let len = self.phrases.get(&bucket).map_or(0, Vec::len);
        if len == 0 {
            return None;
        }
        let cursor = self.cursors.entry(bucket).or_insert(0);
        let index = *cursor % len;
        *cursor = (index + 1) % len;
        self.phrases.get(&bucket).map(|list| list[index].as_str())
    }

    /// Index the next draw for `bucket` will use.
    pub fn cursor(&self, bucket: SentimentBucket) -> usize {
        self.cursors.get(&bucket).copied().unwrap_or(0)
    }

    /// Phrases configured for `bucket` (empty if unmapped).
    pub fn phrases(&self, bucket: SentimentBucket) -> &[String] {
        self.phrases.get(&bucket).map(Vec::as_slice).unwrap_or(&[])
    }
}
