//! Per-user support conversation log: append-only, with an advisory flag
//! against overlapping submissions.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SupportSpeaker {
    User,
    Assistant,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupportTurn {
    pub speaker: SupportSpeaker,
    pub text: String,
}

impl SupportTurn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            speaker: SupportSpeaker::User,
            text: text.into(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            speaker: SupportSpeaker::Assistant,
            text: text.into(),
        }
    }
}

#[derive(Default)]
struct Conversation {
    turns: Vec<SupportTurn>,
    processing: bool,
}

/// All support conversations, keyed by user id.
#[derive(Default)]
pub struct SupportLog {
    users: HashMap<Uuid, Conversation>,
}

impl SupportLog {
    /// Marks the user's conversation as processing. Returns false when a
    /// submission is already in flight. Advisory only, not a true lock.
    pub fn try_begin(&mut self, user_id: Uuid) -> bool {
        let conversation = self.users.entry(user_id).or_default();
        if conversation.processing {
            return false;
        }
        conversation.processing = true;
        true
    }

    /// Clears the processing flag. Must run on both success and error paths.
    pub fn finish(&mut self, user_id: Uuid) {
        if let Some(conversation) = self.users.get_mut(&user_id) {
            conversation.processing = false;
        }
    }

    pub fn push(&mut self, user_id: Uuid, turn: SupportTurn) {
        self.users.entry(user_id).or_default().turns.push(turn);
    }

    pub fn turns(&self, user_id: Uuid) -> Vec<SupportTurn> {
        match self.users.get(&user_id) {
            Some(conversation) => conversation.turns.clone(),
            None => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turns_append_in_order() {
        let mut log = SupportLog::default();
        let user = Uuid::new_v4();

        log.push(user, SupportTurn::user("hello"));
        log.push(user, SupportTurn::assistant("hi, how can I help?"));

        let turns = log.turns(user);
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0].speaker, SupportSpeaker::User);
        assert_eq!(turns[1].speaker, SupportSpeaker::Assistant);
    }

    #[test]
    fn test_processing_flag_blocks_overlap() {
        let mut log = SupportLog::default();
        let user = Uuid::new_v4();

        assert!(log.try_begin(user));
        assert!(!log.try_begin(user));
        log.finish(user);
        assert!(log.try_begin(user));
    }

    #[test]
    fn test_conversations_are_per_user() {
        let mut log = SupportLog::default();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();

        log.push(alice, SupportTurn::user("alice speaking"));
        assert!(log.try_begin(alice));

        assert!(log.turns(bob).is_empty());
        assert!(log.try_begin(bob));
    }
}
