use actix_web::{
    error::{JsonPayloadError, ResponseError},
    http::{header::ContentType, StatusCode},
    HttpResponse,
};
use derive_more::Display;

/// Every failure a request can end in. None of them are retried.
///
/// Bodies are rendered as plain text, not JSON.
#[derive(Debug, Display)]
pub enum AppError {
    #[display("Bad JSON: {_0}")]
    BadRequest(String),

    #[display("Missing or invalid X-MALT-KEY")]
    Unauthorized,

    #[display("{_0}")]
    NotFound(String),

    #[display("Database error: {_0}")]
    StorageFailure(String),

    #[display("Internal server error: {_0}")]
    Internal(String),
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::StorageFailure(_) | AppError::Internal(_) => tracing::error!("{}", self),
            _ => tracing::debug!("{}", self),
        }

        HttpResponse::build(self.status_code())
            .insert_header(ContentType::plaintext())
            .body(self.to_string())
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::StorageFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::StorageFailure(err.to_string())
    }
}

impl From<JsonPayloadError> for AppError {
    fn from(err: JsonPayloadError) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}
