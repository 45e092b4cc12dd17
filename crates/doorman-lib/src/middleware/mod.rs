// crates/doorman-lib/src/middleware/mod.rs

//! Middleware for the doorman server.

pub mod guard;

pub use guard::{require_anonymous, require_authenticated};
