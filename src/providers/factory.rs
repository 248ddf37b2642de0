use crate::config::{AppConfig, ProviderConfig};
use crate::error::PlannerError;
use crate::providers::{GoogleProvider, ItineraryProvider, OpenAIProvider, RetryingProvider};
use std::time::Duration;

pub struct ProviderFactory;

impl ProviderFactory {
    /// Create a provider instance from configuration
    pub fn create(
        provider_name: &str,
        config: &ProviderConfig,
        timeout: Option<Duration>,
    ) -> Result<Box<dyn ItineraryProvider>, PlannerError> {
        // Validate that provider is enabled
        if !config.enabled {
            return Err(PlannerError::BuilderError(format!(
                "Provider '{}' is not enabled in configuration",
                provider_name
            )));
        }

        match provider_name {
            "google" => Ok(Box::new(GoogleProvider::new(config, timeout)?)),
            "openai" => Ok(Box::new(OpenAIProvider::new(config, timeout)?)),
            _ => Err(PlannerError::BuilderError(format!(
                "Unknown provider: {}",
                provider_name
            ))),
        }
    }

    /// Build the default provider from configuration, wrapped with retries
    pub fn from_config(config: &AppConfig) -> Result<Box<dyn ItineraryProvider>, PlannerError> {
        let provider_name = &config.default_provider;
        let provider_config = config.provider_config(provider_name);
        let timeout = Some(Duration::from_secs(config.timeout));

        let provider = Self::create(provider_name, &provider_config, timeout)?;
        Ok(Box::new(RetryingProvider::new(
            provider,
            config.retry.attempts,
            config.retry.delay_ms,
        )))
    }

    /// List all available provider names
    pub fn available_providers() -> Vec<&'static str> {
        vec!["google", "openai"]
    }
}
