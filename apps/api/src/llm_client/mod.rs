/// LLM Client — the single point of entry for all completion-backend calls.
///
/// ARCHITECTURAL RULE: No other module may call the Ollama API directly.
/// All LLM interactions MUST go through this module.
///
/// Model: mistral:latest (hardcoded — do not make configurable to prevent drift)
use futures::StreamExt;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// The model used for all LLM calls.
/// This is intentionally hardcoded to prevent accidental drift.
pub const MODEL: &str = "mistral:latest";
const CHAT_PATH: &str = "/api/chat";

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("stream parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("LLM returned empty content")]
    EmptyContent,
}

/// One turn of a chat exchange sent to the backend.
#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub role: &'static str,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system",
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user",
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: "assistant",
            content: content.into(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    options: Option<ChatOptions>,
}

#[derive(Debug, Serialize)]
struct ChatOptions {
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatResponseBody {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: String,
}

/// One NDJSON line of a streamed chat response.
#[derive(Debug, Deserialize)]
struct StreamChunk {
    #[serde(default)]
    message: Option<ResponseMessage>,
    #[serde(default)]
    done: bool,
    #[serde(default)]
    error: Option<String>,
}

/// A parsed fragment of a streamed response.
#[derive(Debug, PartialEq)]
struct StreamEvent {
    content: String,
    done: bool,
}

/// The single LLM client used by all services.
/// Wraps the Ollama chat API; one call per turn, no retries. A failed call
/// is a failed turn.
#[derive(Clone)]
pub struct LlmClient {
    client: reqwest::Client,
    base_url: String,
}

impl LlmClient {
    pub fn new(base_url: String) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(120))
                .build()
                .expect("Failed to build HTTP client"),
            base_url,
        }
    }

    /// Single-shot chat call. Returns the full completion text.
    pub async fn chat(
        &self,
        messages: &[ChatMessage],
        temperature: Option<f32>,
    ) -> Result<String, LlmError> {
        let response = self
            .client
            .post(format!("{}{}", self.base_url, CHAT_PATH))
            .json(&ChatRequest {
                model: MODEL,
                messages,
                stream: false,
                options: temperature.map(|t| ChatOptions { temperature: t }),
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: ChatResponseBody = response.json().await?;
        if body.message.content.is_empty() {
            return Err(LlmError::EmptyContent);
        }

        debug!("LLM call succeeded: {} chars", body.message.content.len());
        Ok(body.message.content)
    }

    /// Streaming chat call. The backend delivers the completion as a finite
    /// sequence of NDJSON fragments; they are concatenated in arrival order
    /// and only the final concatenation is returned. The fragments are not
    /// restartable; the stream is consumed exactly once.
    pub async fn chat_stream(
        &self,
        messages: &[ChatMessage],
        temperature: Option<f32>,
    ) -> Result<String, LlmError> {
        let response = self
            .client
            .post(format!("{}{}", self.base_url, CHAT_PATH))
            .json(&ChatRequest {
                model: MODEL,
                messages,
                stream: true,
                options: temperature.map(|t| ChatOptions { temperature: t }),
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let mut stream = response.bytes_stream();
        let mut buffer = String::new();
        let mut text = String::new();
        let mut done = false;

        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            buffer.push_str(&String::from_utf8_lossy(&chunk));

            while let Some(newline) = buffer.find('\n') {
                let line: String = buffer.drain(..=newline).collect();
                if let Some(event) = parse_stream_line(&line)? {
                    text.push_str(&event.content);
                    done = done || event.done;
                }
            }

            if done {
                break;
            }
        }

        // A final fragment may arrive without a trailing newline.
        if !done {
            if let Some(event) = parse_stream_line(&buffer)? {
                text.push_str(&event.content);
            }
        }

        if text.is_empty() {
            return Err(LlmError::EmptyContent);
        }

        debug!("LLM stream accumulated: {} chars", text.len());
        Ok(text)
    }
}

/// Parses one NDJSON line of a streamed response. Blank lines yield `None`;
/// an in-band `error` field becomes an `Api` error.
fn parse_stream_line(line: &str) -> Result<Option<StreamEvent>, LlmError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let chunk: StreamChunk = serde_json::from_str(line)?;
    if let Some(message) = chunk.error {
        return Err(LlmError::Api {
            status: 200,
            message,
        });
    }

    Ok(Some(StreamEvent {
        content: chunk.message.map(|m| m.content).unwrap_or_default(),
        done: chunk.done,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_stream_line_content_fragment() {
        let line = r#"{"message":{"role":"assistant","content":"Hel"},"done":false}"#;
        let event = parse_stream_line(line).unwrap().unwrap();
        assert_eq!(event.content, "Hel");
        assert!(!event.done);
    }

    #[test]
    fn test_parse_stream_line_final_fragment() {
        let line = r#"{"message":{"role":"assistant","content":""},"done":true}"#;
        let event = parse_stream_line(line).unwrap().unwrap();
        assert_eq!(event.content, "");
        assert!(event.done);
    }

    #[test]
    fn test_parse_stream_line_blank_is_skipped() {
        assert!(parse_stream_line("  \n").unwrap().is_none());
        assert!(parse_stream_line("").unwrap().is_none());
    }

    #[test]
    fn test_parse_stream_line_in_band_error() {
        let line = r#"{"error":"model not found"}"#;
        match parse_stream_line(line) {
            Err(LlmError::Api { message, .. }) => assert_eq!(message, "model not found"),
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_stream_line_garbage_is_parse_error() {
        assert!(matches!(
            parse_stream_line("not json"),
            Err(LlmError::Parse(_))
        ));
    }

    #[test]
    fn test_fragments_concatenate_in_arrival_order() {
        let lines = [
            r#"{"message":{"role":"assistant","content":"Tell me "},"done":false}"#,
            r#"{"message":{"role":"assistant","content":"about "},"done":false}"#,
            r#"{"message":{"role":"assistant","content":"yourself."},"done":true}"#,
        ];

        let mut text = String::new();
        for line in lines {
            if let Some(event) = parse_stream_line(line).unwrap() {
                text.push_str(&event.content);
            }
        }
        assert_eq!(text, "Tell me about yourself.");
    }

    #[test]
    fn test_chat_response_body_deserializes() {
        let json = r#"{"model":"mistral:latest","message":{"role":"assistant","content":"Hi"},"done":true}"#;
        let body: ChatResponseBody = serde_json::from_str(json).unwrap();
        assert_eq!(body.message.content, "Hi");
    }
}
