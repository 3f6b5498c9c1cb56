//! Error types for atmosphere profile construction.

use thiserror::Error;

/// Result type alias using AtmoError.
pub type AtmoResult<T> = Result<T, AtmoError>;

/// Primary error type for building atmosphere profiles.
#[derive(Debug, Error)]
pub enum AtmoError {
    // === Configuration Errors ===
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    // === Provider Errors ===
    #[error("Failed to fetch meteogram: {0}")]
    Fetch(String),

    #[error(
        "Could not get a valid response for {model} from the provider. \
         Check if the latitude and longitude coordinates set are inside Europe."
    )]
    OutsideCoverage {
        model: String,
        #[source]
        source: Box<AtmoError>,
    },

    // === Data Errors ===
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Missing series '{0}' in meteogram response")]
    MissingSeries(String),

    #[error("Series '{key}' has no numeric value at index {index}")]
    MissingValue { key: String, index: usize },

    #[error("Meteogram response contains no forecast hours")]
    EmptyTimeAxis,
}

impl AtmoError {
    /// Create a Configuration error.
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Create a Fetch error.
    pub fn fetch(msg: impl Into<String>) -> Self {
        Self::Fetch(msg.into())
    }

    /// Create an InvalidInput error.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Whether repeating the same request could plausibly succeed.
    ///
    /// Nothing in this workspace retries; this only informs callers.
    pub fn is_retryable(&self) -> bool {
        match self {
            AtmoError::Fetch(_) => true,
            AtmoError::OutsideCoverage { .. } => false,
            AtmoError::Configuration(_)
            | AtmoError::InvalidInput(_)
            | AtmoError::MissingSeries(_)
            | AtmoError::MissingValue { .. }
            | AtmoError::EmptyTimeAxis => false,
        }
    }
}

impl From<serde_json::Error> for AtmoError {
    fn from(err: serde_json::Error) -> Self {
        AtmoError::Fetch(format!("JSON error: {}", err))
    }
}
