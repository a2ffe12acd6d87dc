use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use thiserror::Error;

/// Failures talking to the activity backend.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("backend returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("invalid backend url: {0}")]
    Url(#[from] url::ParseError),
    #[error("invalid activity data: {0}")]
    InvalidData(String),
}

#[derive(Debug, Error)]
pub enum BookingError {
    #[error("package {0} not found")]
    PackageNotFound(String),
    #[error("duplicate package id {0}")]
    DuplicatePackage(String),
    #[error("booking form {0} not found")]
    FormNotFound(String),
    #[error(transparent)]
    Backend(#[from] BackendError),
    #[error("preference storage error: {0}")]
    Storage(String),
    #[error("configuration error: {0}")]
    Config(String),
}

impl ResponseError for BookingError {
    fn status_code(&self) -> StatusCode {
        match self {
            BookingError::PackageNotFound(_) | BookingError::FormNotFound(_) => {
                StatusCode::NOT_FOUND
            }
            BookingError::DuplicatePackage(_) => StatusCode::BAD_REQUEST,
            BookingError::Backend(BackendError::Status { status: 404, .. }) => {
                StatusCode::NOT_FOUND
            }
            BookingError::Backend(_) => StatusCode::BAD_GATEWAY,
            BookingError::Storage(_) | BookingError::Config(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).body(self.to_string())
    }
}
