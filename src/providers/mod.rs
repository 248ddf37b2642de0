mod factory;
mod google;
mod open_ai;
mod prompt;
mod retry;

pub use factory::ProviderFactory;
pub use google::GoogleProvider;
pub use open_ai::OpenAIProvider;
pub use prompt::{
    build_prompt_request, build_system_instruction, build_user_prompt, GUIDE_PERSONA_PROMPT,
};
pub use retry::RetryingProvider;

use crate::error::ProviderError;
use crate::model::RawModelResponse;
use crate::request::LatLng;
use async_trait::async_trait;
use reqwest::Response;

/// One generation call: instructions, user prompt and optional location bias.
#[derive(Debug, Clone, PartialEq)]
pub struct PromptRequest {
    pub system_instruction: String,
    pub prompt: String,
    pub location: Option<LatLng>,
}

/// Unified trait for all itinerary providers
#[async_trait]
pub trait ItineraryProvider: Send + Sync {
    /// Get the provider name (e.g., "google", "openai")
    fn provider_name(&self) -> &str;

    /// Generate itinerary text and grounding links for a prompt
    async fn generate(&self, request: &PromptRequest) -> Result<RawModelResponse, ProviderError>;
}

/// Map a non-success HTTP status to a provider error.
///
/// 429 and 503 mean the service is over capacity and are worth retrying;
/// everything else is surfaced as is.
pub(crate) async fn check_status(response: Response) -> Result<Response, ProviderError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let code = status.as_u16();
    if code == 429 || code == 503 {
        return Err(ProviderError::Overloaded { status: code });
    }

    let message = response.text().await.unwrap_or_default();
    Err(ProviderError::Api {
        status: code,
        message,
    })
}
