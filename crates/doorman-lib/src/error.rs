// crates/doorman-lib/src/error.rs

//! Central error type + Axum integration.
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;

use crate::render;
use crate::store::StoreError;
use crate::validation::ValidationError;

/// Application error types with error codes and context
#[derive(Error, Debug)]
pub enum AppError {
    #[error("All the fields are mandatory. Please input a username and a password.")]
    MissingField,

    #[error("Invalid password: {0}")]
    WeakPassword(String),

    #[error("Username already exists.")]
    DuplicateUsername,

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Username not found.")]
    UserNotFound,

    #[error("Wrong password.")]
    WrongPassword,

    #[error("Failed to destroy session: {0}")]
    SessionDestroy(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),
}

impl AppError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::MissingField | AppError::WeakPassword(_) | AppError::Validation(_) => {
                StatusCode::BAD_REQUEST
            },
            AppError::DuplicateUsername => StatusCode::CONFLICT,
            AppError::UserNotFound => StatusCode::NOT_FOUND,
            AppError::WrongPassword => StatusCode::UNAUTHORIZED,
            AppError::SessionDestroy(_)
            | AppError::Internal(_)
            | AppError::Io(_)
            | AppError::Template(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::MissingField => "FORM_001",
            AppError::WeakPassword(_) => "FORM_002",
            AppError::Validation(_) => "FORM_003",
            AppError::DuplicateUsername => "USER_001",
            AppError::UserNotFound => "USER_002",
            AppError::WrongPassword => "AUTH_001",
            AppError::SessionDestroy(_) => "SESSION_001",
            AppError::Internal(_) => "INT_001",
            AppError::Io(_) => "IO_001",
            AppError::Template(_) => "TPL_001",
        }
    }

    /// Whether the condition is handled locally by re-rendering a form
    /// rather than surfacing a server error.
    pub fn is_recoverable(&self) -> bool {
        !matches!(
            self,
            AppError::SessionDestroy(_)
                | AppError::Internal(_)
                | AppError::Io(_)
                | AppError::Template(_)
        )
    }

    /// Get a sanitized message suitable for production use
    pub fn sanitized_message(&self) -> String {
        if self.is_recoverable() {
            self.to_string()
        } else {
            "An internal server error occurred".to_string()
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Use detailed messages in development, sanitized in production
        let message = if cfg!(debug_assertions) {
            self.to_string()
        } else {
            self.sanitized_message()
        };

        let body = render::error_page(status.as_u16(), &message);
        (status, Html(body)).into_response()
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateUsername => AppError::DuplicateUsername,
            StoreError::Validation(msg) => AppError::Validation(msg),
        }
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::WeakPassword(msg) => AppError::WeakPassword(msg),
            ValidationError::InvalidUsername(msg) => AppError::Validation(msg),
        }
    }
}
