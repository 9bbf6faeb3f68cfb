use thiserror::Error;

/// profile-stats error types
#[derive(Error, Debug)]
pub enum StatsError {
    /// File I/O error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP client could not be built
    #[error("http client error: {0}")]
    Http(#[from] reqwest::Error),

    /// Failed to serialize the stats document
    #[error("serialize error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Result type alias for profile-stats
pub type Result<T> = std::result::Result<T, StatsError>;

/// Why a source produced no record this run.
///
/// Every variant renders as `null` in the output document; the variant only
/// matters for diagnostics.
#[derive(Error, Debug)]
pub enum FetchError {
    /// A required credential or identifier is unset
    #[error("{0} is not configured")]
    NotConfigured(&'static str),

    /// Request failed or returned a non-success status
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Response did not decode into the expected shape
    #[error("unexpected response: {0}")]
    Parse(String),

    /// Browser launch, navigation or element lookup failed
    #[error("browser error: {0}")]
    Browser(String),
}

impl FetchError {
    pub fn is_not_configured(&self) -> bool {
        matches!(self, FetchError::NotConfigured(_))
    }
}

/// Result type for a single source fetch
pub type FetchResult<T> = std::result::Result<T, FetchError>;
