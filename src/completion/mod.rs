//! Completion service integration
//!
//! The completion service is an opaque remote text generator: it receives
//! a prompt and returns text. The trait seam keeps the planner decoupled
//! from any particular provider so tests can substitute a local fake.

pub mod openai;

use crate::Result;
use async_trait::async_trait;

pub use openai::OpenAiClient;

/// Which configured model a request should run on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelTier {
    /// The full-strength model, used for itinerary generation
    Standard,
    /// The cheaper model, used for auxiliary sections
    Fast,
}

/// A single prompt dispatch to the completion service
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    /// Optional system message framing the task
    pub system: Option<String>,
    /// The user prompt
    pub prompt: String,
    /// Model tier to run on
    pub tier: ModelTier,
    /// Sampling temperature
    pub temperature: f32,
    /// Response token budget
    pub max_tokens: u32,
}

impl CompletionRequest {
    /// Create a request with default sampling settings
    #[must_use]
    pub fn new(prompt: impl Into<String>, tier: ModelTier) -> Self {
        Self {
            system: None,
            prompt: prompt.into(),
            tier,
            temperature: 0.7,
            max_tokens: 1500,
        }
    }

    /// Attach a system message
    #[must_use]
    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    /// Override the sampling temperature
    #[must_use]
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Override the response token budget
    #[must_use]
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }
}

/// An interface for sending prompts to a text-completion service.
///
/// Implementors encapsulate transport, serialization, and vendor-specific
/// API details. The returned text is passed through unchanged.
#[async_trait]
pub trait CompletionService: Send + Sync {
    /// Dispatch one prompt and return the service's text response
    async fn complete(&self, request: CompletionRequest) -> Result<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_builder_defaults() {
        let request = CompletionRequest::new("hello", ModelTier::Fast);
        assert!(request.system.is_none());
        assert_eq!(request.tier, ModelTier::Fast);
        assert_eq!(request.max_tokens, 1500);
    }

    #[test]
    fn test_request_builder_overrides() {
        let request = CompletionRequest::new("hello", ModelTier::Standard)
            .with_system("be brief")
            .with_temperature(0.2)
            .with_max_tokens(400);
        assert_eq!(request.system.as_deref(), Some("be brief"));
        assert_eq!(request.temperature, 0.2);
        assert_eq!(request.max_tokens, 400);
    }
}
