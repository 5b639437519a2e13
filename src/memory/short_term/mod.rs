//! Short-term conversation memory for the chat endpoint.
//!
//! Keeps the last `capacity` question/answer exchanges and replays them as
//! model context ahead of each new question. Oldest exchanges are evicted
//! first.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::llms::base_llm::ChatMessage;

/// Number of exchanges kept by default.
pub const DEFAULT_WINDOW: usize = 5;

/// One question and the model's answer to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exchange {
    pub question: String,
    pub answer: String,
}

/// Fixed-size rolling window of exchanges.
#[derive(Debug, Clone)]
pub struct ConversationWindow {
    capacity: usize,
    exchanges: VecDeque<Exchange>,
}

impl Default for ConversationWindow {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW)
    }
}

impl ConversationWindow {
    /// A window holding at most `capacity` exchanges. Zero disables memory.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            exchanges: VecDeque::with_capacity(capacity),
        }
    }

    /// Record an exchange, evicting the oldest when full.
    pub fn push(&mut self, question: impl Into<String>, answer: impl Into<String>) {
        if self.capacity == 0 {
            return;
        }
        while self.exchanges.len() >= self.capacity {
            self.exchanges.pop_front();
        }
        self.exchanges.push_back(Exchange {
            question: question.into(),
            answer: answer.into(),
        });
    }

    /// Exchanges oldest first.
    pub fn exchanges(&self) -> impl Iterator<Item = &Exchange> {
        self.exchanges.iter()
    }

    /// The window as alternating user/assistant messages, oldest first.
    pub fn to_messages(&self) -> Vec<ChatMessage> {
        self.exchanges
            .iter()
            .flat_map(|e| {
                [
                    ChatMessage::user(e.question.clone()),
                    ChatMessage::assistant(e.answer.clone()),
                ]
            })
            .collect()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.exchanges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exchanges.is_empty()
    }

    pub fn clear(&mut self) {
        self.exchanges.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llms::base_llm::Role;

    #[test]
    fn test_window_keeps_last_five() {
        let mut window = ConversationWindow::default();
        for i in 0..8 {
            window.push(format!("q{}", i), format!("a{}", i));
        }
        assert_eq!(window.len(), 5);
        let questions: Vec<&str> = window.exchanges().map(|e| e.question.as_str()).collect();
        assert_eq!(questions, vec!["q3", "q4", "q5", "q6", "q7"]);
    }

    #[test]
    fn test_to_messages_alternates_roles() {
        let mut window = ConversationWindow::new(2);
        window.push("hi", "hello");
        window.push("how are you", "fine");
        let messages = window.to_messages();
        assert_eq!(messages.len(), 4);
        assert_eq!(messages[0], ChatMessage::user("hi"));
        assert_eq!(messages[1].role, Role::Assistant);
        assert_eq!(messages[3].content, "fine");
    }

    #[test]
    fn test_zero_capacity_remembers_nothing() {
        let mut window = ConversationWindow::new(0);
        window.push("q", "a");
        assert!(window.is_empty());
        assert!(window.to_messages().is_empty());
    }

    #[test]
    fn test_clear() {
        let mut window = ConversationWindow::default();
        window.push("q", "a");
        window.clear();
        assert!(window.is_empty());
        assert_eq!(window.capacity(), DEFAULT_WINDOW);
    }
}
