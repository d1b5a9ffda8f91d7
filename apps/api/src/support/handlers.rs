//! Axum route handlers for the support assistant.
//!
//! The assistant is stateless per turn: each submission replays the persona
//! prompt plus the full conversation as one plain-text exchange. It can
//! side-effect by creating a new interview session, but only when the user
//! explicitly asks.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::auth::middleware::AuthUser;
use crate::errors::AppError;
use crate::interview::session::SessionSetup;
use crate::llm_client::ChatMessage;
use crate::state::AppState;
use crate::support::log::{SupportSpeaker, SupportTurn};
use crate::support::prompts::{
    INTERVIEW_ALREADY_ACTIVE_REPLY, INTERVIEW_STARTED_REPLY, SUPPORT_SYSTEM,
};

/// Explicit requests that make the assistant create an interview session.
pub const INTERVIEW_TRIGGERS: &[&str] = &["start interview", "begin interview", "initiate interview"];

const SUPPORT_TEMPERATURE: f32 = 0.4;

#[derive(Debug, Deserialize)]
pub struct SupportChatRequest {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct SupportChatResponse {
    pub messages: Vec<SupportTurn>,
}

/// POST /support/chats
pub async fn post_chat(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Json(req): Json<SupportChatRequest>,
) -> Result<Json<SupportChatResponse>, AppError> {
    if req.message.trim().is_empty() {
        return Err(AppError::Validation("message cannot be empty".to_string()));
    }
    let user_id = claims.sub;

    let conversation = {
        let mut log = state.support.write().await;
        if !log.try_begin(user_id) {
            return Err(AppError::Busy(
                "A support reply is already being generated".to_string(),
            ));
        }
        log.push(user_id, SupportTurn::user(req.message.clone()));
        log.turns(user_id)
    };

    let prompt = build_conversation(&conversation);
    let reply = match state
        .llm
        .chat(&[ChatMessage::user(prompt)], Some(SUPPORT_TEMPERATURE))
        .await
    {
        Ok(text) => text.trim().to_string(),
        Err(e) => {
            state.support.write().await.finish(user_id);
            return Err(e.into());
        }
    };

    let mut appended = vec![SupportTurn::assistant(reply)];

    // Agent action: start an interview when, and only when, explicitly asked.
    if contains_trigger(&req.message) {
        let mut registry = state.interviews.write().await;
        let note = if registry.get_active(user_id).is_some() {
            INTERVIEW_ALREADY_ACTIVE_REPLY
        } else {
            registry.create(user_id, SessionSetup::default());
            INTERVIEW_STARTED_REPLY
        };
        appended.push(SupportTurn::assistant(note));
    }

    let mut log = state.support.write().await;
    for turn in &appended {
        log.push(user_id, turn.clone());
    }
    log.finish(user_id);

    Ok(Json(SupportChatResponse { messages: appended }))
}

/// GET /support/chats
pub async fn get_chats(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
) -> Result<Json<Vec<SupportTurn>>, AppError> {
    Ok(Json(state.support.read().await.turns(claims.sub)))
}

/// The persona prompt plus the whole conversation as one plain-text block,
/// `USER:` / `ASSISTANT:` lines in order.
fn build_conversation(turns: &[SupportTurn]) -> String {
    let mut text = String::from(SUPPORT_SYSTEM);
    text.push_str("\n\n");
    for turn in turns {
        let role = match turn.speaker {
            SupportSpeaker::User => "USER",
            SupportSpeaker::Assistant => "ASSISTANT",
        };
        text.push_str(role);
        text.push_str(": ");
        text.push_str(&turn.text);
        text.push('\n');
    }
    text
}

fn contains_trigger(message: &str) -> bool {
    let lowered = message.to_lowercase();
    INTERVIEW_TRIGGERS
        .iter()
        .any(|trigger| lowered.contains(trigger))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_conversation_threads_turns_in_order() {
        let turns = vec![
            SupportTurn::user("How long is an interview?"),
            SupportTurn::assistant("Interviews last exactly 15 minutes."),
            SupportTurn::user("Thanks!"),
        ];
        let text = build_conversation(&turns);

        assert!(text.starts_with(SUPPORT_SYSTEM));
        let user_pos = text.find("USER: How long is an interview?").unwrap();
        let assistant_pos = text
            .find("ASSISTANT: Interviews last exactly 15 minutes.")
            .unwrap();
        let thanks_pos = text.find("USER: Thanks!").unwrap();
        assert!(user_pos < assistant_pos);
        assert!(assistant_pos < thanks_pos);
    }

    #[test]
    fn test_trigger_phrases() {
        assert!(contains_trigger("Please start interview for me"));
        assert!(contains_trigger("Can you BEGIN INTERVIEW now?"));
        assert!(contains_trigger("initiate interview"));
        assert!(!contains_trigger("tell me about interviews"));
    }
}
