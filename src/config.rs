use crate::grammar::GrammarVersion;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::collections::HashMap;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// Provider to use when not specified
    #[serde(default = "default_provider")]
    pub default_provider: String,
    /// Map of provider name to provider configuration
    #[serde(default)]
    pub providers: HashMap<String, ProviderConfig>,
    /// Retry behaviour for transient provider failures
    #[serde(default)]
    pub retry: RetryConfig,
    /// Tag grammar the model is asked to answer in
    #[serde(default)]
    pub grammar: GrammarVersion,
    /// Where saved travels are kept
    #[serde(default = "default_storage_path")]
    pub storage_path: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

/// Configuration for a specific AI provider
#[derive(Debug, Deserialize, Clone)]
pub struct ProviderConfig {
    /// Whether this provider is enabled
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Model identifier (e.g., "gemini-2.5-flash")
    pub model: String,
    /// Temperature for generation (0.0-1.0)
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Maximum tokens to generate
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// API key for authentication (can also be set via environment variable)
    pub api_key: Option<String>,
    /// Base URL for API endpoint (for custom or proxy endpoints)
    pub base_url: Option<String>,
}

impl ProviderConfig {
    pub fn new(model: impl Into<String>) -> Self {
        ProviderConfig {
            enabled: true,
            model: model.into(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            api_key: None,
            base_url: None,
        }
    }
}

/// Retry behaviour for transient (overload) failures
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct RetryConfig {
    /// Total attempts, including the first one
    #[serde(default = "default_retry_attempts")]
    pub attempts: u32,
    /// Base delay between attempts in milliseconds (multiplied by the attempt number)
    #[serde(default = "default_retry_delay_ms")]
    pub delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            attempts: default_retry_attempts(),
            delay_ms: default_retry_delay_ms(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            default_provider: default_provider(),
            providers: HashMap::new(),
            retry: RetryConfig::default(),
            grammar: GrammarVersion::default(),
            storage_path: default_storage_path(),
            timeout: default_timeout(),
        }
    }
}

// Default value functions
fn default_provider() -> String {
    "google".to_string()
}

fn default_enabled() -> bool {
    true
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_tokens() -> u32 {
    4000
}

fn default_retry_attempts() -> u32 {
    3
}

fn default_retry_delay_ms() -> u64 {
    1000
}

fn default_storage_path() -> String {
    "lazy_wander_v1.json".to_string()
}

fn default_timeout() -> u64 {
    60
}

/// Default model for a known provider name
pub fn default_model(provider_name: &str) -> &'static str {
    match provider_name {
        "openai" => "gpt-4.1-mini",
        _ => "gemini-2.5-flash",
    }
}

impl AppConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with LAZY_WANDER__ prefix
    /// 2. lazy-wander.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: LAZY_WANDER__PROVIDERS__GOOGLE__API_KEY
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }

    /// Configuration of the named provider, or a default one for it
    pub fn provider_config(&self, provider_name: &str) -> ProviderConfig {
        self.providers
            .get(provider_name)
            .cloned()
            .unwrap_or_else(|| ProviderConfig::new(default_model(provider_name)))
    }
}

/// Load configuration from file and environment variables
pub fn load_config() -> Result<AppConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("lazy-wander").required(false))
        // Use double underscore for nested: LAZY_WANDER__RETRY__ATTEMPTS
        .add_source(
            Environment::with_prefix("LAZY_WANDER")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    #[test]
    fn test_default_values() {
        assert_eq!(default_provider(), "google");
        assert_eq!(default_temperature(), 0.7);
        assert_eq!(default_max_tokens(), 4000);
        assert_eq!(default_retry_attempts(), 3);
        assert_eq!(default_retry_delay_ms(), 1000);
        assert_eq!(default_storage_path(), "lazy_wander_v1.json");
    }

    #[test]
    fn test_app_config_default() {
        let config = AppConfig::default();
        assert_eq!(config.default_provider, "google");
        assert!(config.providers.is_empty());
        assert_eq!(config.retry, RetryConfig::default());
        assert_eq!(config.grammar, GrammarVersion::Extended);
        assert_eq!(config.timeout, 60);
    }

    #[test]
    fn test_provider_config_fallback() {
        let config = AppConfig::default();
        let google = config.provider_config("google");
        assert!(google.enabled);
        assert_eq!(google.model, "gemini-2.5-flash");
        assert!(google.api_key.is_none());
        assert_eq!(config.provider_config("openai").model, "gpt-4.1-mini");
    }

    #[test]
    fn test_deserialize_from_toml() {
        let toml = r#"
            default_provider = "openai"
            grammar = "lazy"

            [providers.openai]
            model = "gpt-4.1"
            api_key = "test-key"

            [retry]
            attempts = 5
        "#;

        let config: AppConfig = Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.default_provider, "openai");
        assert_eq!(config.grammar, GrammarVersion::Lazy);
        assert_eq!(config.retry.attempts, 5);
        assert_eq!(config.retry.delay_ms, 1000);
        assert_eq!(config.storage_path, "lazy_wander_v1.json");

        let openai = config.provider_config("openai");
        assert!(openai.enabled);
        assert_eq!(openai.model, "gpt-4.1");
        assert_eq!(openai.api_key.as_deref(), Some("test-key"));
        assert_eq!(openai.max_tokens, 4000);
    }

    #[test]
    fn test_load_config_without_file() {
        // Only asserts that loading does not panic; the environment may be set.
        let result = load_config();
        assert!(result.is_ok() || result.is_err());
    }
}
