//! Question generation: the one-time style priming and the per-turn ask.

use tracing::warn;

use crate::interview::prompts::{
    INTERVIEWER_SYSTEM_TEMPLATE, STYLE_EMPTY_FALLBACK, STYLE_PROMPT_TEMPLATE,
};
use crate::interview::session::InterviewSession;
use crate::llm_client::{ChatMessage, LlmClient, LlmError};
use crate::models::interview::Speaker;
use crate::search_client::SearchClient;

/// Raw search output is cut to this prefix to bound prompt size.
pub const STYLE_SNIPPET_MAX_CHARS: usize = 2000;

const STYLE_TEMPERATURE: f32 = 0.3;
const QUESTION_TEMPERATURE: f32 = 0.7;

/// Runs ONCE per session, at interview start: searches for real interview
/// material and distills it into a style summary (patterns, difficulty
/// progression, focus areas; never literal questions).
///
/// A failed or empty search degrades to the generic-pattern fallback with a
/// warning; a failed completion call is the caller's to degrade.
pub async fn prime(
    search: &SearchClient,
    llm: &LlmClient,
    session: &InterviewSession,
) -> Result<String, LlmError> {
    let query = format!(
        "{} interview questions {} {} interview",
        session.role,
        session.skills,
        session.interview_type.label()
    );

    let snippet = match search.search(&query).await {
        Ok(raw) => truncate_chars(&raw, STYLE_SNIPPET_MAX_CHARS),
        Err(e) => {
            warn!("Web search failed, using default question style: {e}");
            String::new()
        }
    };

    let prompt = STYLE_PROMPT_TEMPLATE.replace(
        "{search_results}",
        if snippet.is_empty() {
            STYLE_EMPTY_FALLBACK
        } else {
            snippet.as_str()
        },
    );

    llm.chat(&[ChatMessage::user(prompt)], Some(STYLE_TEMPERATURE))
        .await
}

/// One question turn: system instruction with the session context, the full
/// prior history in chronological order, then the latest candidate answer.
/// The completion streams; the accumulated text gets a human-sounding prefix
/// and becomes the interviewer utterance (the caller commits it to history).
pub async fn ask(
    llm: &LlmClient,
    session: &InterviewSession,
    candidate_answer: &str,
) -> Result<String, LlmError> {
    let system = INTERVIEWER_SYSTEM_TEMPLATE
        .replace("{company}", &session.company)
        .replace("{role}", &session.role)
        .replace("{interview_type}", session.interview_type.label())
        .replace("{skills}", &session.skills)
        .replace("{question_style}", &session.question_style);

    let mut messages = Vec::with_capacity(session.history.len() + 2);
    messages.push(ChatMessage::system(system));
    for turn in &session.history {
        messages.push(match turn.speaker {
            Speaker::Candidate => ChatMessage::user(turn.text.clone()),
            Speaker::Interviewer => ChatMessage::assistant(turn.text.clone()),
        });
    }
    messages.push(ChatMessage::user(candidate_answer.to_string()));

    let question = llm
        .chat_stream(&messages, Some(QUESTION_TEMPERATURE))
        .await?;

    Ok(with_prefix(
        &session.candidate_name,
        candidate_answer,
        &question,
    ))
}

/// Small human-like filler: an opener for the first question, an
/// acknowledgement for follow-ups.
fn with_prefix(candidate_name: &str, candidate_answer: &str, question: &str) -> String {
    if candidate_answer.is_empty() {
        let name = if candidate_name.is_empty() {
            "Candidate"
        } else {
            candidate_name
        };
        format!("Hi {name}, nice to meet you! Let's get started. {question}")
    } else {
        format!("Interesting, thanks for sharing! {question}")
    }
}

fn truncate_chars(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}
