//! Conversation state for one interactive session.
//!
//! The transcript is append-only for the lifetime of the session: entries
//! are never reordered or deleted. Submission is single-flight — the
//! `waiting_for_reply` flag gates every submit path, so at most one request
//! is outstanding at any time. A submit attempted while a reply is pending
//! is silently dropped.

use std::collections::VecDeque;

use unicode_segmentation::UnicodeSegmentation;

use crate::core::constants::{ERROR_REPLY, FALLBACK_REPLY};
use crate::core::message::Message;

pub struct ConversationState {
    pub messages: VecDeque<Message>,
    pub input: String,
    pub waiting_for_reply: bool,
    pub scroll_offset: u16,
    pub auto_scroll: bool,
}

impl Default for ConversationState {
    fn default() -> Self {
        Self::new()
    }
}

impl ConversationState {
    pub fn new() -> Self {
        Self {
            messages: VecDeque::new(),
            input: String::new(),
            waiting_for_reply: false,
            scroll_offset: 0,
            auto_scroll: true,
        }
    }

    /// Replace the input buffer verbatim.
    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    pub fn insert_input_char(&mut self, c: char) {
        self.input.push(c);
    }

    /// Delete the last grapheme cluster, not just the last code point, so
    /// combining sequences and emoji disappear in one keystroke.
    pub fn backspace_input(&mut self) {
        if let Some((idx, _)) = self.input.grapheme_indices(true).next_back() {
            self.input.truncate(idx);
        }
    }

    /// Take the current input as a submission.
    ///
    /// Returns the query to send when a request must be issued. Appends the
    /// user message, clears the input buffer, and raises `waiting_for_reply`
    /// before returning, so the transcript update is visible ahead of any
    /// network completion. Returns `None` (leaving all state untouched)
    /// when the trimmed input is empty or a reply is already pending.
    pub fn submit(&mut self) -> Option<String> {
        if self.waiting_for_reply || self.input.trim().is_empty() {
            return None;
        }

        let text = std::mem::take(&mut self.input);
        self.messages.push_back(Message::user(text.clone()));
        self.waiting_for_reply = true;
        Some(text)
    }

    /// Apply a successful completion. A missing `response` field is still a
    /// valid reply and renders as the fallback text.
    pub fn resolve_reply(&mut self, reply: Option<String>) {
        let text = reply.unwrap_or_else(|| FALLBACK_REPLY.to_string());
        self.push_agent(text);
    }

    /// Apply a failed completion. Every failure cause collapses to the same
    /// fixed agent text; nothing propagates past this point.
    pub fn resolve_error(&mut self) {
        self.push_agent(ERROR_REPLY);
    }

    fn push_agent(&mut self, text: impl Into<String>) {
        self.messages.push_back(Message::agent(text));
        self.waiting_for_reply = false;
    }

    pub fn last_message(&self) -> Option<&Message> {
        self.messages.back()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::message::Sender;

    fn submitted(input: &str) -> (ConversationState, Option<String>) {
        let mut state = ConversationState::new();
        state.set_input(input);
        let query = state.submit();
        (state, query)
    }

    #[test]
    fn submit_appends_user_message_synchronously() {
        let (state, query) = submitted("What is the weather in Berlin?");
        assert_eq!(query.as_deref(), Some("What is the weather in Berlin?"));
        assert_eq!(state.messages.len(), 1);
        assert_eq!(
            state.last_message().unwrap(),
            &Message::user("What is the weather in Berlin?")
        );
        assert!(state.waiting_for_reply);
        assert!(state.input.is_empty());
    }

    #[test]
    fn whitespace_only_submit_is_a_no_op() {
        for input in ["", "   ", "\t", " \n "] {
            let (state, query) = submitted(input);
            assert_eq!(query, None, "input {input:?} should not submit");
            assert!(state.messages.is_empty());
            assert!(!state.waiting_for_reply);
        }
    }

    #[test]
    fn submit_while_pending_is_silently_dropped() {
        let (mut state, _) = submitted("first");
        state.set_input("second");
        assert_eq!(state.submit(), None);
        assert_eq!(state.messages.len(), 1);
        // The dropped submission keeps its input so nothing is lost.
        assert_eq!(state.input, "second");
    }

    #[test]
    fn reply_with_text_lands_as_agent_message() {
        let (mut state, _) = submitted("forecast?");
        state.resolve_reply(Some("Sunny, 25C".to_string()));
        assert!(!state.waiting_for_reply);
        assert_eq!(state.last_message().unwrap(), &Message::agent("Sunny, 25C"));
    }

    #[test]
    fn reply_without_field_falls_back() {
        let (mut state, _) = submitted("forecast?");
        state.resolve_reply(None);
        assert_eq!(
            state.last_message().unwrap(),
            &Message::agent("Sorry, no response.")
        );
    }

    #[test]
    fn failure_lands_as_fixed_agent_text() {
        let (mut state, _) = submitted("forecast?");
        state.resolve_error();
        assert!(!state.waiting_for_reply);
        assert_eq!(
            state.last_message().unwrap(),
            &Message::agent("Error: Could not get response from server.")
        );
    }

    #[test]
    fn exactly_one_agent_message_per_completion() {
        let mut state = ConversationState::new();
        for (i, fail) in [(0usize, false), (1, true), (2, false)] {
            state.set_input(format!("query {i}"));
            assert!(state.submit().is_some());
            if fail {
                state.resolve_error();
            } else {
                state.resolve_reply(Some(format!("reply {i}")));
            }
            assert_eq!(state.messages.len(), (i + 1) * 2);
        }
    }

    #[test]
    fn transcript_preserves_insertion_order() {
        let mut state = ConversationState::new();
        state.set_input("one");
        state.submit();
        state.resolve_reply(Some("1".to_string()));
        state.set_input("one");
        state.submit();
        state.resolve_reply(Some("2".to_string()));

        let senders: Vec<Sender> = state.messages.iter().map(|m| m.sender).collect();
        assert_eq!(
            senders,
            vec![Sender::User, Sender::Agent, Sender::User, Sender::Agent]
        );
        // Duplicate user text is kept; nothing is deduplicated.
        let texts: Vec<&str> = state.messages.iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, vec!["one", "1", "one", "2"]);
    }

    #[test]
    fn submitted_text_is_sent_verbatim() {
        // Trimming is only an emptiness check; the padded original is what
        // lands in the transcript and on the wire.
        let (state, query) = submitted("  windy?  ");
        assert_eq!(query.as_deref(), Some("  windy?  "));
        assert_eq!(state.last_message().unwrap().text, "  windy?  ");
    }

    #[test]
    fn backspace_removes_whole_graphemes() {
        let mut state = ConversationState::new();
        state.set_input("weather 🌦️");
        state.backspace_input();
        assert_eq!(state.input, "weather ");
        state.backspace_input();
        assert_eq!(state.input, "weather");
    }
}
