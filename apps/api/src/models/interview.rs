use serde::{Deserialize, Serialize};

/// Phase of an interview session. Transitions are monotonic:
/// setup → interview → feedback, never backwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Setup,
    Interview,
    Feedback,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InterviewType {
    #[default]
    Technical,
    Behavioral,
    Situational,
    Mixed,
}

impl InterviewType {
    /// Lowercase label used inside prompt and greeting text.
    pub fn label(&self) -> &'static str {
        match self {
            InterviewType::Technical => "technical",
            InterviewType::Behavioral => "behavioral",
            InterviewType::Situational => "situational",
            InterviewType::Mixed => "mixed",
        }
    }
}

/// Who produced a conversation-history entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    Candidate,
    Interviewer,
}

/// One entry of an interview conversation history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatTurn {
    pub speaker: Speaker,
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Stage::Setup).unwrap(), "\"setup\"");
        assert_eq!(
            serde_json::to_string(&Stage::Interview).unwrap(),
            "\"interview\""
        );
        assert_eq!(
            serde_json::to_string(&Stage::Feedback).unwrap(),
            "\"feedback\""
        );
    }

    #[test]
    fn test_interview_type_wire_names() {
        let t: InterviewType = serde_json::from_str("\"Situational\"").unwrap();
        assert_eq!(t, InterviewType::Situational);
        assert_eq!(t.label(), "situational");
        assert_eq!(InterviewType::default(), InterviewType::Technical);
    }

    #[test]
    fn test_chat_turn_speaker_wire_names() {
        let turn = ChatTurn {
            speaker: Speaker::Interviewer,
            text: "Tell me about yourself.".to_string(),
        };
        let json = serde_json::to_string(&turn).unwrap();
        assert!(json.contains("\"interviewer\""));
    }
}
