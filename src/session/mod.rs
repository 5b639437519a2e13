//! Chat sessions and the conversation-turn pipeline.
//!
//! ```text
//! submit(text)
//!   → reject blank input (history untouched, endpoint not called)
//!   → classify user text
//!   → append Pending turn
//!   → ask endpoint once; on error substitute the placeholder
//!   → classify bot text
//!   → optional tone prefix keyed by the *user's* bucket
//!   → mark Complete / Failed
//! ```

pub mod store;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::client::ChatEndpoint;
use crate::sentiment::{classify, SentimentResult};
use crate::tone::ToneSelector;
use crate::utilities::errors::{ChatError, NO_RESPONSE_PLACEHOLDER};
use crate::utilities::string_utils::normalize_text;

pub use store::SessionStore;

/// Lifecycle of a single turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnStatus {
    /// User text recorded, waiting on the endpoint.
    Pending,
    /// Endpoint answered; both sentiments resolved.
    Complete,
    /// Endpoint failed; bot text is a placeholder.
    Failed,
}

impl TurnStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::Pending)
    }
}

/// One user message and the reply to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    pub id: Uuid,
    pub user_text: String,
    /// Reply as displayed, including any tone prefix. `None` while pending.
    pub bot_text: Option<String>,
    pub user_sentiment: Option<SentimentResult>,
    /// Sentiment of the reply itself, computed before any tone prefix.
    pub bot_sentiment: Option<SentimentResult>,
    /// Tone prefix drawn for this turn, if any.
    pub tone: Option<String>,
    pub status: TurnStatus,
    pub created_at: DateTime<Utc>,
}

impl Turn {
    fn pending(user_text: String, user_sentiment: SentimentResult) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_text,
            bot_text: None,
            user_sentiment: Some(user_sentiment),
            bot_sentiment: None,
            tone: None,
            status: TurnStatus::Pending,
            created_at: Utc::now(),
        }
    }
}

/// Per-session pipeline switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionOptions {
    /// Prepend a canned tone phrase to each reply.
    pub tone_prefix: bool,
    /// Strip punctuation and collapse whitespace before scoring sentiment.
    pub normalize_input: bool,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            tone_prefix: true,
            normalize_input: false,
        }
    }
}

/// Ordered turn history plus the tone cursor state for one UI session.
#[derive(Debug, Clone)]
pub struct ChatSession {
    id: String,
    turns: Vec<Turn>,
    tone: ToneSelector,
    options: SessionOptions,
}

impl ChatSession {
    pub fn new(id: impl Into<String>, options: SessionOptions) -> Self {
        Self::with_tone_selector(id, options, ToneSelector::new())
    }

    pub fn with_tone_selector(
        id: impl Into<String>,
        options: SessionOptions,
        tone: ToneSelector,
    ) -> Self {
        Self {
            id: id.into(),
            turns: Vec::new(),
            tone,
            options,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// History in submission order.
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn options(&self) -> SessionOptions {
        self.options
    }

    pub fn tone_selector(&self) -> &ToneSelector {
        &self.tone
    }

    fn score(&self, text: &str) -> SentimentResult {
        if self.options.normalize_input {
            classify(&normalize_text(text))
        } else {
            classify(text)
        }
    }

    /// Run one turn through the pipeline and return the finished turn.
    ///
    /// Blank input is rejected with [`ChatError::Validation`] before anything
    /// else happens. Every other outcome appends exactly one turn: endpoint
    /// failures are recorded as [`TurnStatus::Failed`] with placeholder text.
    pub async fn submit(
        &mut self,
        input: &str,
        endpoint: &dyn ChatEndpoint,
    ) -> Result<&Turn, ChatError> {
        if input.trim().is_empty() {
            return Err(ChatError::empty_question());
        }

        let user_sentiment = self.score(input);
        self.turns.push(Turn::pending(input.to_string(), user_sentiment));
        let index = self.turns.len() - 1;

        let (reply, status) = match endpoint.ask(input).await {
            Ok(reply) => (reply, TurnStatus::Complete),
            Err(e) => {
                log::warn!("session {}: chat endpoint failed: {}", self.id, e);
                let placeholder = e
                    .placeholder()
                    .unwrap_or_else(|| NO_RESPONSE_PLACEHOLDER.to_string());
                (placeholder, TurnStatus::Failed)
            }
        };

        let bot_sentiment = self.score(&reply);
        let tone = if self.options.tone_prefix {
            self.tone.next_tone(user_sentiment.bucket).map(str::to_string)
        } else {
            None
        };
        let bot_text = match &tone {
            Some(prefix) => format!("{} {}", prefix, reply),
            None => reply,
        };

        log::debug!(
            "session {}: turn {} {:?} (user={}, bot={})",
            self.id,
            index,
            status,
            user_sentiment.bucket,
            bot_sentiment.bucket,
        );

        let turn = &mut self.turns[index];
        turn.bot_text = Some(bot_text);
        turn.bot_sentiment = Some(bot_sentiment);
        turn.tone = tone;
        turn.status = status;
        Ok(&*turn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sentiment::SentimentBucket;
    use crate::tone::default_phrases;
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use std::collections::VecDeque;

    /// Endpoint that replays scripted outcomes and counts calls.
    struct ScriptedEndpoint {
        outcomes: Mutex<VecDeque<Result<String, ChatError>>>,
        questions: Mutex<Vec<String>>,
    }

    impl ScriptedEndpoint {
        fn new(outcomes: Vec<Result<String, ChatError>>) -> Self {
            Self {
                outcomes: Mutex::new(outcomes.into()),
                questions: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> usize {
            self.questions.lock().len()
        }
    }

    #[async_trait]
    impl ChatEndpoint for ScriptedEndpoint {
        async fn ask(&self, question: &str) -> Result<String, ChatError> {
            self.questions.lock().push(question.to_string());
            self.outcomes
                .lock()
                .pop_front()
                .unwrap_or_else(|| Ok("default reply".to_string()))
        }
    }

    fn plain_options() -> SessionOptions {
        SessionOptions {
            tone_prefix: false,
            normalize_input: false,
        }
    }

    #[tokio::test]
    async fn test_successful_turn_is_complete() {
        let endpoint = ScriptedEndpoint::new(vec![Ok("Great to hear!".into())]);
        let mut session = ChatSession::new("s1", plain_options());

        let turn = session.submit("I love this!", &endpoint).await.unwrap().clone();

        assert_eq!(turn.status, TurnStatus::Complete);
        assert_eq!(turn.user_text, "I love this!");
        assert_eq!(turn.bot_text.as_deref(), Some("Great to hear!"));
        assert_eq!(
            turn.user_sentiment.unwrap().bucket,
            SentimentBucket::VeryPositive
        );
        assert_eq!(turn.bot_sentiment, Some(classify("Great to hear!")));
        assert!(turn.tone.is_none());
        assert_eq!(endpoint.calls(), 1);
    }

    #[tokio::test]
    async fn test_blank_input_rejected_without_call() {
        let endpoint = ScriptedEndpoint::new(vec![]);
        let mut session = ChatSession::new("s1", SessionOptions::default());

        for input in ["", "   ", "\n\t"] {
            let err = session.submit(input, &endpoint).await.unwrap_err();
            assert!(matches!(err, ChatError::Validation(_)));
        }
        assert!(session.turns().is_empty());
        assert_eq!(endpoint.calls(), 0);
    }

    #[tokio::test]
    async fn test_upstream_500_records_failed_turn() {
        let endpoint = ScriptedEndpoint::new(vec![Err(ChatError::UpstreamStatus { status: 500 })]);
        let mut session = ChatSession::new("s1", plain_options());

        let turn = session.submit("hello there", &endpoint).await.unwrap().clone();

        assert_eq!(turn.status, TurnStatus::Failed);
        assert_eq!(turn.bot_text.as_deref(), Some("Error: Received status code 500"));
        assert_eq!(
            turn.bot_sentiment,
            Some(classify("Error: Received status code 500"))
        );
        assert_eq!(session.turns().len(), 1);
    }

    #[tokio::test]
    async fn test_malformed_and_transport_failures_use_placeholders() {
        let endpoint = ScriptedEndpoint::new(vec![
            Err(ChatError::MalformedResponse("not json".into())),
            Err(ChatError::UpstreamTransport("connection refused".into())),
        ]);
        let mut session = ChatSession::new("s1", plain_options());

        session.submit("first", &endpoint).await.unwrap();
        session.submit("second", &endpoint).await.unwrap();

        let turns = session.turns();
        assert_eq!(turns[0].bot_text.as_deref(), Some(NO_RESPONSE_PLACEHOLDER));
        assert_eq!(
            turns[1].bot_text.as_deref(),
            Some("An error occurred while connecting to the server: connection refused")
        );
        assert!(turns.iter().all(|t| t.status == TurnStatus::Failed));
    }

    #[tokio::test]
    async fn test_history_grows_by_one_per_submission() {
        let endpoint = ScriptedEndpoint::new(vec![
            Ok("one".into()),
            Err(ChatError::UpstreamStatus { status: 503 }),
            Ok("three".into()),
            Err(ChatError::MalformedResponse("x".into())),
        ]);
        let mut session = ChatSession::new("s1", SessionOptions::default());

        for (i, input) in ["a b", "c d", "e f", "g h"].iter().enumerate() {
            session.submit(input, &endpoint).await.unwrap();
            assert_eq!(session.turns().len(), i + 1);
        }
        let users: Vec<&str> = session.turns().iter().map(|t| t.user_text.as_str()).collect();
        assert_eq!(users, vec!["a b", "c d", "e f", "g h"]);
        assert!(session.turns().iter().all(|t| t.status.is_terminal()));
    }

    #[tokio::test]
    async fn test_tone_prefix_follows_user_bucket() {
        let endpoint = ScriptedEndpoint::new(vec![
            Ok("Sure.".into()),
            Ok("Sure.".into()),
            Ok("Sure.".into()),
        ]);
        let mut session = ChatSession::new("s1", SessionOptions::default());
        let expected = default_phrases(SentimentBucket::VeryPositive);

        for (i, input) in ["I love this!", "This is amazing!", "What a wonderful day!"]
            .iter()
            .enumerate()
        {
            let turn = session.submit(input, &endpoint).await.unwrap();
            assert_eq!(turn.user_sentiment.unwrap().bucket, SentimentBucket::VeryPositive);
            assert_eq!(turn.tone.as_deref(), Some(expected[i]));
            assert_eq!(
                turn.bot_text.as_deref(),
                Some(format!("{} Sure.", expected[i]).as_str())
            );
            // Bot sentiment ignores the prefix.
            assert_eq!(turn.bot_sentiment, Some(classify("Sure.")));
        }
        assert_eq!(
            session.tone_selector().cursor(SentimentBucket::VeryPositive),
            3
        );
    }

    #[tokio::test]
    async fn test_tone_applies_to_failed_turns_too() {
        let endpoint = ScriptedEndpoint::new(vec![Err(ChatError::UpstreamStatus { status: 500 })]);
        let mut session = ChatSession::new("s1", SessionOptions::default());

        let turn = session.submit("The table is made of wood", &endpoint).await.unwrap();
        let neutral = default_phrases(SentimentBucket::Neutral);
        assert_eq!(turn.tone.as_deref(), Some(neutral[0]));
        assert_eq!(turn.status, TurnStatus::Failed);
    }

    #[tokio::test]
    async fn test_normalized_scoring_ignores_punctuation() {
        let endpoint = ScriptedEndpoint::new(vec![Ok("ok".into())]);
        let options = SessionOptions {
            tone_prefix: false,
            normalize_input: true,
        };
        let mut session = ChatSession::new("s1", options);

        let turn = session.submit("I love this!!!", &endpoint).await.unwrap();
        assert_eq!(turn.user_sentiment, Some(classify("I love this")));
        // The raw text is still what gets recorded and sent.
        assert_eq!(turn.user_text, "I love this!!!");
        assert_eq!(endpoint.questions.lock()[0], "I love this!!!");
    }
}
