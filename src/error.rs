/// Error types for chained translation
///
/// A failed remote call shows up as one of two variants. `NetworkError`
/// covers requests that never got a response (connection failures and
/// timeouts); `ServiceError` covers responses that came back unusable
/// (non-success status, unreadable body). Callers that only care whether the
/// translation service failed should use `is_service_failure()` rather than
/// matching on `ServiceError` alone.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MtError {
    /// A start or end language that is not in the catalog
    #[error("Invalid language code: {0}")]
    InvalidLanguageCode(String),
    /// Transport failure or timeout while talking to the translation service
    #[error("Network error: {0}")]
    NetworkError(String),
    /// The translation service answered, but not with a usable success response
    #[error("Service error: {0}")]
    ServiceError(String),
    /// Requested hop count is above the configured ceiling
    #[error("Hop count {requested} exceeds the maximum of {max}")]
    HopLimitExceeded { requested: usize, max: usize },
    /// Invalid client or catalog configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl MtError {
    /// True for failures of the remote call itself (network or service side)
    pub fn is_service_failure(&self) -> bool {
        matches!(self, MtError::NetworkError(_) | MtError::ServiceError(_))
    }
}

impl From<reqwest::Error> for MtError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            MtError::NetworkError(format!("Request timed out: {}", err))
        } else if err.is_connect() {
            MtError::NetworkError(format!("Connection failed: {}", err))
        } else if err.is_decode() {
            MtError::ServiceError(format!("Failed to decode response: {}", err))
        } else {
            MtError::NetworkError(err.to_string())
        }
    }
}

/// Result type for MT operations
pub type MtResult<T> = Result<T, MtError>;
