use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum TryOnError {
    #[error("Invalid base64 in '{field}': {message}")]
    Decode { field: &'static str, message: String },

    #[error("Unsupported or corrupt image in '{field}': {message}")]
    ImageFormat { field: &'static str, message: String },

    #[error("Image generation service error: {0}")]
    ExternalService(String),

    #[error("API unavailable and fallback image not found. Original error: {0}")]
    GenerationUnavailable(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for TryOnError {
    fn from(err: reqwest::Error) -> Self {
        TryOnError::ExternalService(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, TryOnError>;

/// Body returned for every failed request.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub detail: String,
}

impl ResponseError for TryOnError {
    fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorBody {
            detail: self.to_string(),
        })
    }
}
