// ============================
// doorman-lib/src/router.rs
// ============================
//! Router assembly: routes, guards and the trace layer.
use std::sync::Arc;
use axum::{
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::handlers::{auth, pages};
use crate::middleware::{require_anonymous, require_authenticated};
use crate::store::UserStore;
use crate::AppState;

/// Create the application router.
///
/// The signup and login forms are anonymous-only; the form submissions
/// themselves are unguarded. Profile, main and private require a session.
pub fn create_router<S>(state: Arc<AppState<S>>) -> Router
where
    S: UserStore + Clone + Send + Sync + 'static,
{
    let anon_guard = from_fn_with_state(state.clone(), require_anonymous::<S>);
    let auth_guard = from_fn_with_state(state.clone(), require_authenticated::<S>);

    let gated_pages = Router::new()
        .route("/profile", get(pages::profile))
        .route("/main", get(pages::main_page))
        .route("/private", get(pages::private_page))
        .route_layer(auth_guard);

    Router::new()
        .route("/", get(pages::home))
        // the guard layers only wrap the GETs registered before them
        .route(
            "/signup",
            get(auth::signup_form)
                .layer(anon_guard.clone())
                .post(auth::signup::<S>),
        )
        .route(
            "/login",
            get(auth::login_form)
                .layer(anon_guard)
                .post(auth::login::<S>),
        )
        .route("/logout", post(auth::logout::<S>))
        .merge(gated_pages)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
