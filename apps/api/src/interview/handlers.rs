//! Axum route handlers for the interview API.
//!
//! Handlers never hold the registry lock across a backend call: they
//! snapshot the session, call the LLM, then re-acquire and commit. Commits
//! re-check the stage so a concurrent terminal transition is not overwritten.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use crate::auth::middleware::AuthUser;
use crate::errors::AppError;
use crate::interview::feedback::{self, split_panels};
use crate::interview::question;
use crate::interview::session::{contains_termination_keyword, InterviewSession, SessionSetup};
use crate::models::interview::{ChatTurn, InterviewType, Stage};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

/// Sidebar-style listing entry: metadata without the conversation body.
#[derive(Debug, Serialize)]
pub struct SessionSummary {
    pub interview_id: Uuid,
    pub candidate_name: String,
    pub company: String,
    pub role: String,
    pub interview_type: InterviewType,
    pub skills: String,
    pub stage: Stage,
}

impl From<&InterviewSession> for SessionSummary {
    fn from(session: &InterviewSession) -> Self {
        SessionSummary {
            interview_id: session.id,
            candidate_name: session.candidate_name.clone(),
            company: session.company.clone(),
            role: session.role.clone(),
            interview_type: session.interview_type,
            skills: session.skills.clone(),
            stage: session.stage,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub role: String,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub stage: Stage,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct FeedbackResponse {
    pub evaluation: String,
    pub strengths: String,
    pub areas_for_improvement: String,
}

/// What a chat turn resolved to while the lock was held.
enum Turn {
    Ask(InterviewSession, String),
    Feedback(InterviewSession),
}

fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Interview {id} not found"))
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /interviews
pub async fn create_interview(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Json(setup): Json<SessionSetup>,
) -> Result<Json<InterviewSession>, AppError> {
    let session = state.interviews.write().await.create(claims.sub, setup);
    Ok(Json(session))
}

/// GET /interviews
pub async fn list_interviews(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
) -> Result<Json<Vec<SessionSummary>>, AppError> {
    let sessions = state.interviews.read().await.list(claims.sub);
    Ok(Json(sessions.iter().map(SessionSummary::from).collect()))
}

/// POST /interviews/:id/start
///
/// The setup → interview transition: validates the required fields, primes
/// the question style, stamps the start time, and appends the greeting.
pub async fn start_interview(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<InterviewSession>, AppError> {
    let user_id = claims.sub;

    let snapshot = {
        let registry = state.interviews.read().await;
        let session = registry.get(user_id, id).ok_or_else(|| not_found(id))?;
        if session.stage != Stage::Setup {
            return Err(AppError::Validation("Interview already started".to_string()));
        }
        if !session.setup_complete() {
            return Err(AppError::Validation(
                "Please fill in all required fields: Name, Company, and Role".to_string(),
            ));
        }
        session.clone()
    };

    // Priming runs outside the lock; any failure degrades to an empty style
    // and never blocks the transition.
    let style = match question::prime(&state.search, &state.llm, &snapshot).await {
        Ok(style) => style,
        Err(e) => {
            warn!("Question-style priming failed, using default style: {e}");
            String::new()
        }
    };

    let mut registry = state.interviews.write().await;
    let session = registry.get_mut(user_id, id).ok_or_else(|| not_found(id))?;
    session.begin(Utc::now(), style);
    Ok(Json(session.clone()))
}

/// POST /interviews/:id/chat
///
/// One candidate turn. The utterance is appended before any termination
/// check; a stop keyword or an expired timer moves the session to feedback
/// and the response carries the evaluation instead of a next question.
pub async fn post_chat(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    if req.role != "user" {
        return Err(AppError::Validation("role must be \"user\"".to_string()));
    }
    if req.message.trim().is_empty() {
        return Err(AppError::Validation("message cannot be empty".to_string()));
    }
    let user_id = claims.sub;

    let turn = {
        let mut registry = state.interviews.write().await;
        let session = registry.get_mut(user_id, id).ok_or_else(|| not_found(id))?;
        match session.stage {
            Stage::Setup => {
                return Err(AppError::Validation(
                    "Interview has not started yet".to_string(),
                ))
            }
            Stage::Feedback => {
                return Err(AppError::Validation("The interview has ended".to_string()))
            }
            Stage::Interview => {
                if session.time_expired(Utc::now()) {
                    // The timer pre-empts the turn entirely; the message is
                    // not part of the interview.
                    session.enter_feedback();
                    Turn::Feedback(session.clone())
                } else {
                    session.push_candidate(req.message.clone());
                    if contains_termination_keyword(&req.message) {
                        session.enter_feedback();
                        Turn::Feedback(session.clone())
                    } else {
                        Turn::Ask(session.clone(), req.message.clone())
                    }
                }
            }
        }
    };

    match turn {
        Turn::Ask(snapshot, answer) => {
            let utterance = question::ask(&state.llm, &snapshot, &answer).await?;

            let mut registry = state.interviews.write().await;
            let session = registry.get_mut(user_id, id).ok_or_else(|| not_found(id))?;
            if session.stage == Stage::Interview {
                session.push_interviewer(utterance.clone());
            }
            Ok(Json(ChatResponse {
                stage: session.stage,
                message: utterance,
            }))
        }
        Turn::Feedback(snapshot) => {
            let evaluation = feedback::generate(&state.llm, &snapshot).await?;

            let mut registry = state.interviews.write().await;
            let session = registry.get_mut(user_id, id).ok_or_else(|| not_found(id))?;
            let text = session.feedback.get_or_insert(evaluation).clone();
            Ok(Json(ChatResponse {
                stage: Stage::Feedback,
                message: text,
            }))
        }
    }
}

/// GET /interviews/:id/chat
///
/// The timer is checked on every read: an expired interview moves to
/// feedback before the history is returned.
pub async fn get_chat(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<ChatTurn>>, AppError> {
    let mut registry = state.interviews.write().await;
    let session = registry
        .get_mut(claims.sub, id)
        .ok_or_else(|| not_found(id))?;
    if session.stage == Stage::Interview && session.time_expired(Utc::now()) {
        session.enter_feedback();
    }
    Ok(Json(session.history.clone()))
}

/// GET /interviews/:id/feedback
///
/// The evaluation is generated once and cached on the session; the panel
/// slices are recomputed from the cached text.
pub async fn get_feedback(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<FeedbackResponse>, AppError> {
    let user_id = claims.sub;

    let snapshot = {
        let mut registry = state.interviews.write().await;
        let session = registry.get_mut(user_id, id).ok_or_else(|| not_found(id))?;
        if session.stage == Stage::Interview && session.time_expired(Utc::now()) {
            session.enter_feedback();
        }
        if session.stage != Stage::Feedback {
            return Err(AppError::Validation(
                "The interview has not finished yet".to_string(),
            ));
        }
        if let Some(text) = &session.feedback {
            return Ok(Json(feedback_response(text)));
        }
        session.clone()
    };

    let evaluation = feedback::generate(&state.llm, &snapshot).await?;

    let mut registry = state.interviews.write().await;
    let session = registry.get_mut(user_id, id).ok_or_else(|| not_found(id))?;
    let text = session.feedback.get_or_insert(evaluation).clone();
    Ok(Json(feedback_response(&text)))
}

/// DELETE /interviews/:id
pub async fn delete_interview(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.interviews.write().await.delete(claims.sub, id);
    Ok(StatusCode::NO_CONTENT)
}

fn feedback_response(evaluation: &str) -> FeedbackResponse {
    let panels = split_panels(evaluation);
    FeedbackResponse {
        evaluation: evaluation.to_string(),
        strengths: panels.strengths,
        areas_for_improvement: panels.areas_for_improvement,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_summary_carries_metadata_only() {
        let mut session = InterviewSession::new(SessionSetup {
            candidate_name: "Aisha".to_string(),
            company: "Acme".to_string(),
            role: "Backend Engineer".to_string(),
            interview_type: InterviewType::Behavioral,
            skills: "Rust".to_string(),
        });
        session.push_interviewer("should not appear in the summary");

        let summary = SessionSummary::from(&session);
        assert_eq!(summary.interview_id, session.id);
        assert_eq!(summary.stage, Stage::Setup);

        let json = serde_json::to_string(&summary).unwrap();
        assert!(!json.contains("should not appear"));
    }
}
