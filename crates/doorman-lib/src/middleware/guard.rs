// crates/doorman-lib/src/middleware/guard.rs

//! Route guards: pure predicates over the request's session state.
//! No side effects beyond the redirect decision.
use std::sync::Arc;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::CookieJar;
use crate::AppState;

/// Allow only authenticated requests; anyone without a live session is
/// redirected to the login form.
///
/// On success the session is inserted into the request extensions so the
/// handler receives it as explicit context.
pub async fn require_authenticated<S>(
    State(state): State<Arc<AppState<S>>>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response
where
    S: Send + Sync + 'static,
{
    let Some(token) = jar
        .get(&state.settings.session_cookie)
        .map(|cookie| cookie.value().to_owned())
    else {
        return Redirect::to("/login").into_response();
    };

    match state.sessions.get(&token).await {
        Some(session) => {
            request.extensions_mut().insert(session);
            next.run(request).await
        },
        None => Redirect::to("/login").into_response(),
    }
}

/// Allow only anonymous requests; anyone with a live session is sent to
/// their profile instead.
pub async fn require_anonymous<S>(
    State(state): State<Arc<AppState<S>>>,
    jar: CookieJar,
    request: Request,
    next: Next,
) -> Response
where
    S: Send + Sync + 'static,
{
    if let Some(cookie) = jar.get(&state.settings.session_cookie) {
        if state.sessions.get(cookie.value()).await.is_some() {
            return Redirect::to("/profile").into_response();
        }
    }

    next.run(request).await
}
