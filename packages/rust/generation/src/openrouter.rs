//! OpenRouter (OpenAI-compatible) chat completions client.

use std::time::{Duration, Instant};

use pagegen_shared::{PageGenError, Result, truncate_chars};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info, instrument};
use url::Url;

use crate::{Completion, CompletionRequest, TextGenerator};

/// User-Agent string for API requests.
const USER_AGENT: &str = concat!("pagegen/", env!("CARGO_PKG_VERSION"));

/// How much of an error body is echoed back in error messages.
const ERROR_BODY_PREFIX: usize = 300;

/// Settings for [`OpenRouterClient`].
#[derive(Debug, Clone)]
pub struct OpenRouterOptions {
    /// API root, e.g. `https://openrouter.ai/api/v1`.
    pub base_url: Url,
    pub api_key: String,
    /// No timeout when `None`.
    pub timeout_secs: Option<u64>,
}

/// Client for `POST {base_url}/chat/completions`.
#[derive(Debug, Clone)]
pub struct OpenRouterClient {
    client: Client,
    endpoint: Url,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    #[serde(default)]
    prompt_tokens: u64,
    #[serde(default)]
    completion_tokens: u64,
}

impl OpenRouterClient {
    /// Build a client for the given API root.
    pub fn new(opts: &OpenRouterOptions) -> Result<Self> {
        let endpoint = chat_completions_url(&opts.base_url)?;

        let mut builder = Client::builder().user_agent(USER_AGENT);
        if let Some(secs) = opts.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| PageGenError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint,
            api_key: opts.api_key.clone(),
        })
    }

    /// The resolved completions endpoint.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl TextGenerator for OpenRouterClient {
    #[instrument(skip_all, fields(model = %request.model))]
    async fn complete(&self, request: &CompletionRequest) -> Result<Completion> {
        let start = Instant::now();
        debug!(endpoint = %self.endpoint, messages = request.messages.len(), "sending completion request");

        let response = self
            .client
            .post(self.endpoint.clone())
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| PageGenError::Network(format!("{}: {e}", self.endpoint)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PageGenError::Network(format!(
                "{}: HTTP {status}: {}",
                self.endpoint,
                truncate_chars(&body, ERROR_BODY_PREFIX)
            )));
        }

        let parsed: ChatCompletionResponse = response.json().await.map_err(|e| {
            PageGenError::Generation(format!("invalid completion response: {e}"))
        })?;

        let text = parsed
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| PageGenError::Generation("completion has no choices".into()))?
            .message
            .content
            .ok_or_else(|| PageGenError::Generation("completion has no content".into()))?;

        let (tokens_in, tokens_out) = parsed
            .usage
            .map(|u| (u.prompt_tokens, u.completion_tokens))
            .unwrap_or_default();

        let completion = Completion {
            text,
            model: parsed.model.unwrap_or_else(|| request.model.clone()),
            tokens_in,
            tokens_out,
            latency_ms: start.elapsed().as_millis() as u64,
        };

        info!(
            tokens_in = completion.tokens_in,
            tokens_out = completion.tokens_out,
            latency_ms = completion.latency_ms,
            "completion received"
        );

        Ok(completion)
    }
}

/// Append `chat/completions` to the API root, tolerating a trailing slash.
fn chat_completions_url(base: &Url) -> Result<Url> {
    let joined = format!("{}/chat/completions", base.as_str().trim_end_matches('/'));
    Url::parse(&joined)
        .map_err(|e| PageGenError::config(format!("invalid completions URL '{joined}': {e}")))
}
