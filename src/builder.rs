use std::time::Duration;

use crate::config::AppConfig;
use crate::grammar::GrammarVersion;
use crate::planner::TravelPlanner;
use crate::providers::{ItineraryProvider, ProviderFactory, RetryingProvider};
use crate::PlannerError;

/// LLM provider selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    Google,
    OpenAI,
}

impl ProviderKind {
    /// Convert to provider name string used by the factory
    fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Google => "google",
            ProviderKind::OpenAI => "openai",
        }
    }
}

/// Builder for configuring a [`TravelPlanner`]
#[derive(Default)]
pub struct TravelPlannerBuilder {
    config: Option<AppConfig>,
    kind: Option<ProviderKind>,
    custom: Option<Box<dyn ItineraryProvider>>,
    api_key: Option<String>,
    model: Option<String>,
    grammar: Option<GrammarVersion>,
    timeout: Option<Duration>,
    retry: Option<(u32, u64)>,
}

impl TravelPlannerBuilder {
    /// Base configuration; values set on the builder take precedence
    pub fn config(mut self, config: AppConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Choose the LLM provider
    ///
    /// # Example
    /// ```
    /// use lazy_wander::{ProviderKind, TravelPlanner};
    ///
    /// let builder = TravelPlanner::builder().provider(ProviderKind::OpenAI);
    /// ```
    pub fn provider(mut self, kind: ProviderKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Use an already constructed provider instead of one from configuration
    pub fn with_provider(mut self, provider: Box<dyn ItineraryProvider>) -> Self {
        self.custom = Some(provider);
        self
    }

    /// Set the API key for the LLM provider
    ///
    /// This allows passing the API key directly instead of relying on
    /// environment variables or config files.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the model name for the LLM provider
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set the tag grammar the model is asked to answer in
    pub fn grammar(mut self, grammar: GrammarVersion) -> Self {
        self.grammar = Some(grammar);
        self
    }

    /// Set a timeout for HTTP requests
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    /// Retry transient failures: total attempts and base delay in milliseconds
    pub fn retry(mut self, attempts: u32, delay_ms: u64) -> Self {
        self.retry = Some((attempts, delay_ms));
        self
    }

    /// Build the planner
    ///
    /// # Errors
    /// Returns `PlannerError` if the selected provider is unknown, disabled,
    /// or has no API key.
    pub fn build(self) -> Result<TravelPlanner, PlannerError> {
        let config = self.config.unwrap_or_default();
        let grammar = self.grammar.unwrap_or(config.grammar);
        let (attempts, delay_ms) = self
            .retry
            .unwrap_or((config.retry.attempts, config.retry.delay_ms));

        let provider: Box<dyn ItineraryProvider> = match self.custom {
            Some(custom) if self.retry.is_some() => {
                Box::new(RetryingProvider::new(custom, attempts, delay_ms))
            }
            Some(custom) => custom,
            None => {
                let name = self
                    .kind
                    .map(|k| k.as_str())
                    .unwrap_or(config.default_provider.as_str());

                let mut provider_config = config.provider_config(name);
                if let Some(key) = self.api_key {
                    provider_config.api_key = Some(key);
                }
                if let Some(model) = self.model {
                    provider_config.model = model;
                }

                let timeout = self
                    .timeout
                    .unwrap_or(Duration::from_secs(config.timeout));
                let provider = ProviderFactory::create(name, &provider_config, Some(timeout))?;
                Box::new(RetryingProvider::new(provider, attempts, delay_ms))
            }
        };

        Ok(TravelPlanner::new(provider, grammar))
    }
}
