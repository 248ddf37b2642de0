use thiserror::Error;

/// Errors returned by an itinerary provider
#[derive(Error, Debug)]
pub enum ProviderError {
    /// The service is over capacity; worth retrying after a delay
    #[error("Service overloaded (HTTP {status}), try again shortly")]
    Overloaded { status: u16 },

    /// The service rejected the request
    #[error("API request failed with status {status}: {message}")]
    Api { status: u16, message: String },

    /// No API key in config or environment
    #[error("{0} not found in config or environment")]
    MissingApiKey(&'static str),

    /// The response carried no generated text
    #[error("Response did not contain any generated text")]
    EmptyResponse,

    /// Transport-level failure
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
}

impl ProviderError {
    /// Whether a retry has a chance of succeeding
    pub fn is_transient(&self) -> bool {
        matches!(self, ProviderError::Overloaded { .. })
    }
}

/// Errors from the saved travel store
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Failed to access {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to encode saved travels: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Errors raised when editing an itinerary
#[derive(Error, Debug, PartialEq, Eq)]
pub enum EditError {
    #[error("Day index {0} is out of range")]
    DayOutOfRange(usize),

    #[error("Activity index {index} is out of range for day {day}")]
    ActivityOutOfRange { day: usize, index: usize },
}

/// Errors that can occur while planning a trip
#[derive(Error, Debug)]
pub enum PlannerError {
    /// The provider call failed
    #[error("Itinerary generation failed: {0}")]
    Provider(#[from] ProviderError),

    /// A newer request was issued before this one finished
    #[error("Request #{sequence} was superseded by a newer request")]
    Superseded { sequence: u64 },

    /// Builder configuration error
    #[error("Builder error: {0}")]
    BuilderError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),

    /// Saved travel store error
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Itinerary edit error
    #[error("Edit error: {0}")]
    Edit(#[from] EditError),
}
