//! Per-session interview state machine: setup → interview → feedback.
//!
//! Pure state + transitions, no I/O. Handlers own the locking and the
//! backend calls; everything here is synchronous and unit-testable.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::interview::{ChatTurn, InterviewType, Speaker, Stage};

/// Wall-clock budget of the interview stage.
pub const SESSION_DURATION_MINUTES: i64 = 15;

/// A candidate utterance containing any of these ends the interview.
/// Matching is a case-insensitive substring check, so "finish" inside
/// "I will finish this project" also terminates. Shipped behavior.
pub const TERMINATION_KEYWORDS: &[&str] =
    &["stop", "exit", "finish", "enough", "quit", "end interview"];

const DEFAULT_SKILLS: &str = "Python, AI, and ML";

/// Candidate metadata collected during the setup stage.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SessionSetup {
    pub candidate_name: String,
    pub company: String,
    pub role: String,
    pub interview_type: InterviewType,
    pub skills: String,
}

/// One interview session, exclusively owned by the registry entry that
/// created it. Handlers work on clones and commit mutations under the
/// registry lock.
#[derive(Debug, Clone, Serialize)]
pub struct InterviewSession {
    #[serde(rename = "interview_id")]
    pub id: Uuid,
    pub candidate_name: String,
    pub company: String,
    pub role: String,
    pub interview_type: InterviewType,
    pub skills: String,
    pub stage: Stage,
    pub started_at: Option<DateTime<Utc>>,
    /// One-time question-style summary; empty when priming was skipped
    /// or degraded.
    pub question_style: String,
    pub history: Vec<ChatTurn>,
    /// Evaluation text, generated once after entering the feedback stage.
    pub feedback: Option<String>,
}

impl InterviewSession {
    pub fn new(setup: SessionSetup) -> Self {
        InterviewSession {
            id: Uuid::new_v4(),
            candidate_name: setup.candidate_name,
            company: setup.company,
            role: setup.role,
            interview_type: setup.interview_type,
            skills: setup.skills,
            stage: Stage::Setup,
            started_at: None,
            question_style: String::new(),
            history: Vec::new(),
            feedback: None,
        }
    }

    /// True when every required setup field is filled.
    pub fn setup_complete(&self) -> bool {
        !self.candidate_name.trim().is_empty()
            && !self.company.trim().is_empty()
            && !self.role.trim().is_empty()
    }

    /// The setup → interview transition. Sets the start timestamp (exactly
    /// once), stores the question style, and appends the one synthesized
    /// interviewer greeting. No-op outside the setup stage.
    pub fn begin(&mut self, now: DateTime<Utc>, question_style: String) {
        if self.stage != Stage::Setup {
            return;
        }
        self.stage = Stage::Interview;
        self.started_at = Some(now);
        self.question_style = question_style;
        let greeting = self.greeting();
        self.push_interviewer(greeting);
    }

    fn greeting(&self) -> String {
        let type_label = self.interview_type.label();
        let description = match self.interview_type {
            InterviewType::Mixed => {
                "This interview will include technical, behavioral, and situational questions."
                    .to_string()
            }
            _ => format!("This is a {type_label} interview."),
        };
        let skills = if self.skills.trim().is_empty() {
            DEFAULT_SKILLS
        } else {
            self.skills.as_str()
        };

        format!(
            "Hello {name}, welcome to the {type_label} interview for the {role} position \
             at {company}. I'm your AI interviewer today. {description} We will focus on \
             your skills in {skills}. The interview will last {minutes} minutes. \
             Are you ready to begin?",
            name = self.candidate_name,
            role = self.role,
            company = self.company,
            minutes = SESSION_DURATION_MINUTES,
        )
    }

    pub fn push_candidate(&mut self, text: impl Into<String>) {
        self.history.push(ChatTurn {
            speaker: Speaker::Candidate,
            text: text.into(),
        });
    }

    pub fn push_interviewer(&mut self, text: impl Into<String>) {
        self.history.push(ChatTurn {
            speaker: Speaker::Interviewer,
            text: text.into(),
        });
    }

    /// Data-level timer check: has the interview-stage budget elapsed?
    pub fn time_expired(&self, now: DateTime<Utc>) -> bool {
        match self.started_at {
            Some(started) => now - started > Duration::minutes(SESSION_DURATION_MINUTES),
            None => false,
        }
    }

    /// The interview → feedback transition. Only moves forward; calling it
    /// from any other stage changes nothing.
    pub fn enter_feedback(&mut self) {
        if self.stage == Stage::Interview {
            self.stage = Stage::Feedback;
        }
    }
}

/// Checks a candidate utterance against the termination keyword set.
pub fn contains_termination_keyword(text: &str) -> bool {
    let lowered = text.to_lowercase();
    TERMINATION_KEYWORDS
        .iter()
        .any(|keyword| lowered.contains(keyword))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn started_session() -> InterviewSession {
        let mut session = InterviewSession::new(SessionSetup {
            candidate_name: "Aisha".to_string(),
            company: "Acme".to_string(),
            role: "Backend Engineer".to_string(),
            interview_type: InterviewType::Technical,
            skills: "Rust, SQL".to_string(),
        });
        session.begin(Utc::now(), String::new());
        session
    }

    #[test]
    fn test_fresh_session_defaults() {
        let session = InterviewSession::new(SessionSetup::default());
        assert_eq!(session.stage, Stage::Setup);
        assert!(session.history.is_empty());
        assert!(session.started_at.is_none());
        assert!(session.question_style.is_empty());
        assert!(session.feedback.is_none());
    }

    #[test]
    fn test_setup_complete_requires_name_company_role() {
        let mut session = InterviewSession::new(SessionSetup::default());
        assert!(!session.setup_complete());
        session.candidate_name = "Aisha".to_string();
        session.company = "Acme".to_string();
        assert!(!session.setup_complete());
        session.role = "Backend Engineer".to_string();
        assert!(session.setup_complete());
    }

    #[test]
    fn test_begin_sets_start_time_and_one_greeting() {
        let session = started_session();
        assert_eq!(session.stage, Stage::Interview);
        assert!(session.started_at.is_some());
        assert_eq!(session.history.len(), 1);
        assert_eq!(session.history[0].speaker, Speaker::Interviewer);
    }

    #[test]
    fn test_begin_is_idempotent_after_start() {
        let mut session = started_session();
        let first_start = session.started_at;
        session.begin(Utc::now() + Duration::minutes(5), "late".to_string());
        assert_eq!(session.started_at, first_start);
        assert_eq!(session.history.len(), 1);
    }

    #[test]
    fn test_greeting_mentions_session_metadata() {
        let session = started_session();
        let greeting = &session.history[0].text;
        assert!(greeting.contains("Aisha"));
        assert!(greeting.contains("Acme"));
        assert!(greeting.contains("Backend Engineer"));
        assert!(greeting.contains("technical interview"));
        assert!(greeting.contains("Rust, SQL"));
        assert!(greeting.contains("15 minutes"));
    }

    #[test]
    fn test_greeting_mixed_type_and_skills_fallback() {
        let mut session = InterviewSession::new(SessionSetup {
            candidate_name: "Omar".to_string(),
            company: "Globex".to_string(),
            role: "Data Scientist".to_string(),
            interview_type: InterviewType::Mixed,
            skills: "  ".to_string(),
        });
        session.begin(Utc::now(), String::new());
        let greeting = &session.history[0].text;
        assert!(greeting.contains("technical, behavioral, and situational questions"));
        assert!(greeting.contains("Python, AI, and ML"));
    }

    #[test]
    fn test_history_preserves_chronological_order() {
        let mut session = started_session();
        session.push_candidate("first answer");
        session.push_interviewer("second question");
        session.push_candidate("second answer");

        assert_eq!(session.history.len(), 4);
        assert_eq!(session.history[1].text, "first answer");
        assert_eq!(session.history[2].text, "second question");
        assert_eq!(session.history[3].text, "second answer");
    }

    #[test]
    fn test_time_expired_after_budget() {
        let mut session = started_session();
        let now = Utc::now();
        session.started_at = Some(now - Duration::minutes(16));
        assert!(session.time_expired(now));
    }

    #[test]
    fn test_time_not_expired_within_budget() {
        let mut session = started_session();
        let now = Utc::now();
        session.started_at = Some(now - Duration::minutes(14));
        assert!(!session.time_expired(now));
    }

    #[test]
    fn test_time_expired_false_before_start() {
        let session = InterviewSession::new(SessionSetup::default());
        assert!(!session.time_expired(Utc::now()));
    }

    #[test]
    fn test_enter_feedback_only_from_interview() {
        let mut session = InterviewSession::new(SessionSetup::default());
        session.enter_feedback();
        assert_eq!(session.stage, Stage::Setup);

        let mut session = started_session();
        session.enter_feedback();
        assert_eq!(session.stage, Stage::Feedback);
        session.enter_feedback();
        assert_eq!(session.stage, Stage::Feedback);
    }

    #[test]
    fn test_termination_keywords_match_any_case() {
        assert!(contains_termination_keyword("STOP"));
        assert!(contains_termination_keyword("I'd like to Quit now"));
        assert!(contains_termination_keyword("please end interview here"));
        assert!(contains_termination_keyword("that's enough"));
    }

    #[test]
    fn test_termination_keyword_substring_false_positive() {
        // Known quirk of the substring check: "finish" embedded in a normal
        // answer still terminates the interview.
        assert!(contains_termination_keyword("I will finish this project"));
    }

    #[test]
    fn test_non_terminating_answer() {
        assert!(!contains_termination_keyword(
            "I led the migration to Rust last year"
        ));
    }
}
