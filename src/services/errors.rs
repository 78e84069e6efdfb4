use crate::connectors::ConnectorError;
use crate::db::InsertError;
use crate::helpers::JsonResponse;
use actix_web::{http::StatusCode, HttpResponse, ResponseError};

/// Failures surfaced to API callers.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("{0}")]
    Validation(String),
    #[error("Authentication required")]
    Unauthenticated,
    #[error("{0}")]
    Forbidden(String),
    #[error("{0}")]
    NotFound(String),
    /// Content store or video host failure. Details are logged, never returned.
    #[error("Upstream failure: {0}")]
    Upstream(String),
    #[error("{0}")]
    Timeout(String),
}

impl ServiceError {
    fn public_message(&self) -> String {
        match self {
            Self::Upstream(_) => "Upstream service error".to_string(),
            other => other.to_string(),
        }
    }
}

impl ResponseError for ServiceError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Unauthenticated => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Upstream(_) => StatusCode::BAD_GATEWAY,
            Self::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let Self::Upstream(details) = self {
            tracing::error!(details = %details, "upstream failure");
        }

        JsonResponse::<()>::build().response(self.status_code(), self.public_message())
    }
}

impl From<ConnectorError> for ServiceError {
    fn from(err: ConnectorError) -> Self {
        match err {
            ConnectorError::NotFound(msg) => Self::NotFound(msg),
            other => Self::Upstream(other.to_string()),
        }
    }
}

impl From<InsertError> for ServiceError {
    fn from(err: InsertError) -> Self {
        match err {
            InsertError::SlugTaken(slug) => {
                Self::Validation(format!("The slug '{}' is already in use", slug))
            }
            InsertError::Failed(msg) => Self::Upstream(msg),
        }
    }
}
