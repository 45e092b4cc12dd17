// ============================
// doorman-lib/src/lib.rs
// ============================
//! Core library for the doorman session-authentication server.

pub mod config;
pub mod error;
pub mod validation;
pub mod auth;
pub mod store;
pub mod render;
pub mod middleware;
pub mod handlers;
pub mod router;

use std::sync::Arc;
use std::time::Duration;
use crate::auth::SessionManager;
use crate::config::Settings;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState<S> {
    /// Credential store backend
    pub users: S,
    /// Session manager
    pub sessions: Arc<SessionManager>,
    /// Settings
    pub settings: Arc<Settings>,
}

impl<S> AppState<S> {
    /// Create a new application state
    pub fn new(users: S, settings: &Settings) -> Self {
        let sessions = Arc::new(SessionManager::new(Duration::from_secs(
            settings.session_ttl_secs,
        )));

        Self {
            users,
            sessions,
            settings: Arc::new(settings.clone()),
        }
    }
}
