//! Text-generation service interface and its OpenRouter implementation.
//!
//! The pipeline only ever sees [`TextGenerator`]; the concrete client is
//! constructed by the caller and passed in, so tests can substitute
//! [`CannedGenerator`] for the network.

mod openrouter;

use pagegen_shared::Result;
use serde::{Deserialize, Serialize};

pub use openrouter::{OpenRouterClient, OpenRouterOptions};

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// One message in a chat-style prompt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    /// A `user` role message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".into(),
            content: content.into(),
        }
    }
}

/// A single completion request.
#[derive(Debug, Clone, Serialize)]
pub struct CompletionRequest {
    /// Model identifier understood by the service.
    pub model: String,
    pub messages: Vec<ChatMessage>,
    /// Sampling temperature; `0.0` asks for deterministic output.
    pub temperature: f32,
}

/// The full text of a finished completion plus usage accounting.
#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    pub text: String,
    /// Model that actually served the request.
    pub model: String,
    pub tokens_in: u64,
    pub tokens_out: u64,
    pub latency_ms: u64,
}

// ---------------------------------------------------------------------------
// TextGenerator
// ---------------------------------------------------------------------------

/// A request/response text-generation service.
///
/// Implementations return only once the whole completion is available.
pub trait TextGenerator {
    /// Run one completion.
    fn complete(
        &self,
        request: &CompletionRequest,
    ) -> impl Future<Output = Result<Completion>> + Send;
}

/// Generator that answers every request with the same text.
///
/// Used for offline runs (`--canned-response`) and in tests.
#[derive(Debug, Clone)]
pub struct CannedGenerator {
    text: String,
}

impl CannedGenerator {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl TextGenerator for CannedGenerator {
    async fn complete(&self, request: &CompletionRequest) -> Result<Completion> {
        tracing::debug!(model = %request.model, "serving canned completion");
        Ok(Completion {
            text: self.text.clone(),
            model: request.model.clone(),
            tokens_in: 0,
            tokens_out: 0,
            latency_ms: 0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_openai_shape() {
        let request = CompletionRequest {
            model: "test/model".into(),
            messages: vec![ChatMessage::user("hello")],
            temperature: 0.0,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "model": "test/model",
                "messages": [{"role": "user", "content": "hello"}],
                "temperature": 0.0
            })
        );
    }

    #[tokio::test]
    async fn canned_generator_echoes_text() {
        let generator = CannedGenerator::new("{\"Usage\":[]}");
        let request = CompletionRequest {
            model: "m".into(),
            messages: vec![],
            temperature: 0.0,
        };
        let completion = generator.complete(&request).await.unwrap();
        assert_eq!(completion.text, "{\"Usage\":[]}");
        assert_eq!(completion.model, "m");
    }
}
