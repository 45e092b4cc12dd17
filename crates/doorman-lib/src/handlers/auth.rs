// ============================
// doorman-lib/src/handlers/auth.rs
// ============================
//! Signup, login and logout flows.
use std::sync::Arc;
use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
    Form,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use metrics::counter;
use serde::Deserialize;
use tracing::{info, warn};
use zeroize::Zeroize;

use crate::auth::password::{hash_password_secure, verify_password};
use crate::error::AppError;
use crate::render;
use crate::store::UserStore;
use crate::validation::{validate_password, validate_username};
use crate::AppState;

/// Credentials submitted by the signup and login forms.
///
/// Absent fields deserialize to empty strings so the missing-field check
/// sees one shape for "not sent" and "sent empty".
#[derive(Debug, Deserialize)]
pub struct CredentialsForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// GET /signup
pub async fn signup_form() -> Result<Response, AppError> {
    Ok(render::signup_page(None)?.into_response())
}

/// POST /signup
pub async fn signup<S>(
    State(state): State<Arc<AppState<S>>>,
    Form(mut form): Form<CredentialsForm>,
) -> Result<Response, AppError>
where
    S: UserStore + Send + Sync + 'static,
{
    if form.username.is_empty() || form.password.is_empty() {
        return reject_signup(AppError::MissingField);
    }

    if let Err(err) = validate_username(&form.username) {
        return reject_signup(err.into());
    }

    // A weak password stops the flow right here: nothing gets hashed
    // or stored.
    if let Err(err) = validate_password(&form.password, &state.settings.password_requirements) {
        return reject_signup(err.into());
    }

    let password_hash =
        hash_password_secure(&mut form.password).map_err(|e| AppError::Internal(e.to_string()))?;

    match state.users.create(&form.username, &password_hash).await {
        Ok(user) => {
            counter!("auth.signup.success").increment(1);
            info!(username = %user.username, "user registered");
            Ok(Redirect::to("/login").into_response())
        },
        Err(err) => {
            warn!(username = %form.username, error = %err, "signup rejected by store");
            reject_signup(err.into())
        },
    }
}

fn reject_signup(err: AppError) -> Result<Response, AppError> {
    counter!("auth.signup.rejected").increment(1);
    Ok(render::signup_page(Some(&err.to_string()))?.into_response())
}

/// GET /login
pub async fn login_form() -> Result<Response, AppError> {
    Ok(render::login_page(None)?.into_response())
}

/// POST /login
pub async fn login<S>(
    State(state): State<Arc<AppState<S>>>,
    jar: CookieJar,
    Form(mut form): Form<CredentialsForm>,
) -> Result<Response, AppError>
where
    S: UserStore + Send + Sync + 'static,
{
    if form.username.is_empty() || form.password.is_empty() {
        return reject_login(AppError::MissingField);
    }

    let Some(user) = state.users.find_by_username(&form.username).await else {
        return reject_login(AppError::UserNotFound);
    };

    let password_ok = verify_password(&user.password_hash, &form.password);
    form.password.zeroize();
    if !password_ok {
        warn!(username = %form.username, "login failed: wrong password");
        return reject_login(AppError::WrongPassword);
    }

    let token = state.sessions.create(user.username.clone()).await;
    counter!("auth.login.success").increment(1);
    info!(username = %user.username, "session established");

    let cookie = Cookie::build((state.settings.session_cookie.clone(), token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build();

    Ok((jar.add(cookie), Redirect::to("/profile")).into_response())
}

fn reject_login(err: AppError) -> Result<Response, AppError> {
    counter!("auth.login.failed").increment(1);
    Ok(render::login_page(Some(&err.to_string()))?.into_response())
}

/// POST /logout
///
/// A request without a live session is already anonymous and just goes
/// home; a destroy failure on a live session propagates as a fatal
/// request error.
pub async fn logout<S>(
    State(state): State<Arc<AppState<S>>>,
    jar: CookieJar,
) -> Result<Response, AppError>
where
    S: Send + Sync + 'static,
{
    let cookie_name = state.settings.session_cookie.clone();

    let Some(token) = jar.get(&cookie_name).map(|cookie| cookie.value().to_owned()) else {
        return Ok(Redirect::to("/").into_response());
    };

    if state.sessions.get(&token).await.is_some() {
        state.sessions.destroy(&token).await?;
        info!("session destroyed");
    }

    let jar = jar.remove(Cookie::build(cookie_name).path("/"));
    Ok((jar, Redirect::to("/")).into_response())
}
