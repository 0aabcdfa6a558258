//! Error types for the conversion engine.
//!
//! Resolution itself never fails; these errors only arise at the edges,
//! when building a matching context or rendering a report.

/// Result type alias for classwind operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while configuring the engine or rendering reports.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Configuration text could not be parsed.
    #[error("Invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    /// A matching threshold is negative or not a finite number.
    #[error("Invalid {category} threshold: {value}")]
    InvalidThreshold { category: &'static str, value: f64 },

    /// Report serialization failed.
    #[error("Failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl Error {
    /// Create a threshold error.
    pub fn invalid_threshold(category: &'static str, value: f64) -> Self {
        Self::InvalidThreshold { category, value }
    }
}
