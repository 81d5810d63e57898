//! OpenAI-compatible completion client
//!
//! Speaks the chat-completions wire format over HTTPS with bearer
//! authentication. Transient failures are retried with exponential
//! backoff up to the configured bound; anything that still fails
//! surfaces as `ServiceUnavailable`.

use std::env;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::StatusCode;
use reqwest_middleware::ClientWithMiddleware;
use reqwest_retry::RetryTransientMiddleware;
use reqwest_retry::policies::ExponentialBackoff;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use super::{CompletionRequest, CompletionService, ModelTier};
use crate::config::CompletionConfig;
use crate::{Result, TripCraftError};

/// Environment variable consulted when the config carries no API key
const API_KEY_ENV: &str = "OPENAI_API_KEY";

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: AssistantMessage,
}

#[derive(Debug, Deserialize)]
struct AssistantMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    total_tokens: u32,
}

/// Completion client for OpenAI-compatible chat-completions endpoints
pub struct OpenAiClient {
    client: ClientWithMiddleware,
    config: CompletionConfig,
    api_key: String,
}

impl OpenAiClient {
    /// Create a new completion client.
    ///
    /// The credential comes from the configuration or, failing that, the
    /// `OPENAI_API_KEY` environment variable. Construction fails without
    /// one, so a missing credential is caught before any dispatch.
    pub fn new(config: CompletionConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .or_else(|| env::var(API_KEY_ENV).ok())
            .filter(|key| !key.is_empty())
            .ok_or_else(|| {
                TripCraftError::config(format!(
                    "No completion API key configured. Set completion.api_key or the {API_KEY_ENV} environment variable."
                ))
            })?;

        let timeout = Duration::from_secs(config.timeout_seconds.into());
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("tripcraft/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| TripCraftError::general(format!("Failed to create HTTP client: {e}")))?;

        let retry_policy = ExponentialBackoff::builder().build_with_max_retries(config.max_retries);
        let client = reqwest_middleware::ClientBuilder::new(client)
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build();

        Ok(Self {
            client,
            config,
            api_key,
        })
    }

    fn model_for(&self, tier: ModelTier) -> &str {
        match tier {
            ModelTier::Standard => &self.config.model,
            ModelTier::Fast => &self.config.fast_model,
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        )
    }
}

#[async_trait]
impl CompletionService for OpenAiClient {
    #[instrument(skip(self, request), fields(tier = ?request.tier))]
    async fn complete(&self, request: CompletionRequest) -> Result<String> {
        let model = self.model_for(request.tier);
        let url = self.endpoint();

        let mut messages = Vec::with_capacity(2);
        if let Some(system) = &request.system {
            messages.push(ChatMessage {
                role: "system",
                content: system,
            });
        }
        messages.push(ChatMessage {
            role: "user",
            content: &request.prompt,
        });

        let body = ChatCompletionRequest {
            model,
            messages,
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        };

        debug!(model, "Dispatching completion request");
        let start = Instant::now();

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                warn!("Completion request failed: {e}");
                TripCraftError::service_unavailable(format!(
                    "Request to completion service failed: {e}"
                ))
            })?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            warn!(%status, "Completion service returned an error");
            return Err(status_error(status, &detail));
        }

        let payload: ChatCompletionResponse = response.json().await.map_err(|e| {
            warn!("Failed to parse completion response: {e}");
            TripCraftError::service_unavailable(format!(
                "Invalid response from completion service: {e}"
            ))
        })?;

        if let Some(usage) = &payload.usage {
            debug!(total_tokens = usage.total_tokens, "Completion token usage");
        }

        let text = payload
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.is_empty())
            .ok_or_else(|| {
                TripCraftError::service_unavailable(
                    "Completion service returned an empty response",
                )
            })?;

        info!(
            model,
            "Completion finished in {:.3}s",
            start.elapsed().as_secs_f64()
        );

        Ok(text)
    }
}

/// Map a non-success HTTP status to a `ServiceUnavailable` error
fn status_error(status: StatusCode, detail: &str) -> TripCraftError {
    let detail = detail.chars().take(200).collect::<String>();
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => TripCraftError::service_unavailable(
            format!("Authentication with the completion service failed (HTTP {status})"),
        ),
        StatusCode::TOO_MANY_REQUESTS => TripCraftError::service_unavailable(format!(
            "Completion service rate limit exceeded (HTTP {status})"
        )),
        _ => TripCraftError::service_unavailable(format!(
            "Completion service returned HTTP {status}: {detail}"
        )),
    }
}
