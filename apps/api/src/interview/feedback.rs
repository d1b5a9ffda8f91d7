//! Closing evaluation: one best-effort completion call over the full
//! conversation, plus the panel slicing used by the feedback view.

use serde::Serialize;

use crate::interview::prompts::FEEDBACK_PROMPT_TEMPLATE;
use crate::interview::session::InterviewSession;
use crate::llm_client::{ChatMessage, LlmClient, LlmError};
use crate::models::interview::Speaker;

const STRENGTHS_HEADER: &str = "Strengths:";
const IMPROVEMENT_HEADER: &str = "Areas for Improvement:";
const OVERALL_HEADER: &str = "Overall Performance:";

const STRENGTHS_FALLBACK: &str = "Good overall performance";
const IMPROVEMENT_FALLBACK: &str = "Keep practicing!";

/// Generates the evaluation text: full history, then the feedback
/// instruction as the final user turn. Single call, no retry.
pub async fn generate(llm: &LlmClient, session: &InterviewSession) -> Result<String, LlmError> {
    let instruction = FEEDBACK_PROMPT_TEMPLATE
        .replace("{candidate_name}", &session.candidate_name)
        .replace("{role}", &session.role)
        .replace("{company}", &session.company)
        .replace("{interview_type}", session.interview_type.label())
        .replace("{skills}", &session.skills);

    let mut messages = Vec::with_capacity(session.history.len() + 1);
    for turn in &session.history {
        messages.push(match turn.speaker {
            Speaker::Candidate => ChatMessage::user(turn.text.clone()),
            Speaker::Interviewer => ChatMessage::assistant(turn.text.clone()),
        });
    }
    messages.push(ChatMessage::user(instruction));

    llm.chat(&messages, None).await
}

/// Per-panel slices of the evaluation text.
#[derive(Debug, Clone, Serialize)]
pub struct FeedbackPanels {
    pub strengths: String,
    pub areas_for_improvement: String,
}

/// Best-effort slicing on literal section headers. The headers are whatever
/// the model emitted; absent headers fall back to fixed panel text.
pub fn split_panels(evaluation: &str) -> FeedbackPanels {
    FeedbackPanels {
        strengths: section_between(evaluation, STRENGTHS_HEADER, IMPROVEMENT_HEADER)
            .unwrap_or_else(|| STRENGTHS_FALLBACK.to_string()),
        areas_for_improvement: section_between(evaluation, IMPROVEMENT_HEADER, OVERALL_HEADER)
            .unwrap_or_else(|| IMPROVEMENT_FALLBACK.to_string()),
    }
}

/// Text after `header`, cut at `until` when present. `None` when `header`
/// itself is absent.
fn section_between(text: &str, header: &str, until: &str) -> Option<String> {
    let (_, rest) = text.split_once(header)?;
    let body = match rest.split_once(until) {
        Some((before, _)) => before,
        None => rest,
    };
    Some(body.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const EVALUATION: &str = "Thank you for the interview.\n\
        Strengths:\n- Clear communication\n- Solid Rust fundamentals\n\
        Areas for Improvement:\n- Practice system design\n\
        Overall Performance:\nStrong candidate overall.";

    #[test]
    fn test_split_panels_with_all_headers() {
        let panels = split_panels(EVALUATION);
        assert!(panels.strengths.contains("Clear communication"));
        assert!(panels.strengths.contains("Solid Rust fundamentals"));
        assert!(!panels.strengths.contains("system design"));
        assert_eq!(panels.areas_for_improvement, "- Practice system design");
    }

    #[test]
    fn test_split_panels_without_headers_uses_fallbacks() {
        let panels = split_panels("The candidate did fine, nothing structured here.");
        assert_eq!(panels.strengths, "Good overall performance");
        assert_eq!(panels.areas_for_improvement, "Keep practicing!");
    }

    #[test]
    fn test_split_panels_missing_trailing_header() {
        let text = "Strengths:\ngood instincts\nAreas for Improvement:\nslow to elaborate";
        let panels = split_panels(text);
        assert_eq!(panels.strengths, "good instincts");
        // No "Overall Performance:" header, so the slice runs to the end.
        assert_eq!(panels.areas_for_improvement, "slow to elaborate");
    }

    #[test]
    fn test_split_panels_strengths_only() {
        let text = "Strengths: confident delivery";
        let panels = split_panels(text);
        assert_eq!(panels.strengths, "confident delivery");
        assert_eq!(panels.areas_for_improvement, "Keep practicing!");
    }
}
