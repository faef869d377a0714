use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use sanctions_core::SanctionsError;
use thiserror::Error;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("External service error: {0}")]
    ExternalServiceError(String),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl ApiError {
    fn code(&self) -> &'static str {
        match self {
            ApiError::ValidationError(_) => "VALIDATION_ERROR",
            ApiError::InvalidQuery(_) => "INVALID_QUERY",
            ApiError::ParseError(_) => "PARSE_ERROR",
            ApiError::ExternalServiceError(_) => "EXTERNAL_SERVICE_ERROR",
            ApiError::ConfigurationError(_) => "CONFIGURATION_ERROR",
            ApiError::InternalError(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<SanctionsError> for ApiError {
    fn from(err: SanctionsError) -> Self {
        match err {
            SanctionsError::Parse(msg) => ApiError::ParseError(msg),
            SanctionsError::InvalidQuery(msg) => ApiError::InvalidQuery(msg),
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::ValidationError(_) | ApiError::InvalidQuery(_) => StatusCode::BAD_REQUEST,
            ApiError::ParseError(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::ExternalServiceError(_) => StatusCode::BAD_GATEWAY,
            ApiError::ConfigurationError(_) | ApiError::InternalError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "error": self.code(),
            "message": self.to_string()
        }))
    }
}
