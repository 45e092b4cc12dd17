// ============================
// doorman-lib/src/handlers/mod.rs
// ============================
//! HTTP handlers for the auth flows and the session-gated pages.

pub mod auth;
pub mod pages;
