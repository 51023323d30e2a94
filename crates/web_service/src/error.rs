use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;

pub type Result<T, E = AppError> = std::result::Result<T, E>;

/// Infrastructure failures. Domain outcomes (validation, not-found) never
/// reach this type; handlers turn those into flash messages and
/// redirects/re-renders instead.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Session storage error: {0}")]
    SessionError(#[from] session_store::SessionError),

    #[error("Template rendering failed: {0}")]
    TemplateError(#[from] minijinja::Error),

    #[error("Internal server error: {0}")]
    InternalError(#[from] anyhow::Error),
}

#[derive(Serialize)]
struct JsonError {
    message: String,
    r#type: String,
}

#[derive(Serialize)]
struct JsonErrorWrapper {
    error: JsonError,
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::SessionError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::TemplateError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status_code = self.status_code();
        let error_response = JsonErrorWrapper {
            error: JsonError {
                message: self.to_string(),
                r#type: "server_error".to_string(),
            },
        };
        HttpResponse::build(status_code).json(error_response)
    }
}
