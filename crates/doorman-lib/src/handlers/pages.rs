// ============================
// doorman-lib/src/handlers/pages.rs
// ============================
//! Page handlers. The guarded ones receive the session as explicit
//! context via request extensions.
use axum::{response::{IntoResponse, Response}, Extension};

use crate::auth::Session;
use crate::error::AppError;
use crate::render;

/// GET /
pub async fn home() -> Result<Response, AppError> {
    Ok(render::home_page()?.into_response())
}

/// GET /profile (authenticated only)
pub async fn profile(Extension(session): Extension<Session>) -> Result<Response, AppError> {
    Ok(render::profile_page(&session.username)?.into_response())
}

/// GET /main (authenticated only)
pub async fn main_page() -> Result<Response, AppError> {
    Ok(render::main_page()?.into_response())
}

/// GET /private (authenticated only)
pub async fn private_page() -> Result<Response, AppError> {
    Ok(render::private_page()?.into_response())
}
