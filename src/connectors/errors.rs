/// Failures talking to an external service
#[derive(Debug, thiserror::Error)]
pub enum ConnectorError {
    #[error("HTTP error: {0}")]
    HttpError(String),
    /// Unreachable, overloaded or rate limited
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
    #[error("Not found: {0}")]
    NotFound(String),
    /// The request outlived the client timeout
    #[error("Request timed out: {0}")]
    Timeout(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<reqwest::Error> for ConnectorError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err.to_string())
        } else if err.is_connect() {
            Self::ServiceUnavailable(format!("Connection failed: {}", err))
        } else {
            Self::HttpError(err.to_string())
        }
    }
}
