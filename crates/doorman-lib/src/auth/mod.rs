// ============================
// doorman-lib/src/auth/mod.rs
// ============================
//! Authentication module.

pub mod password;
pub mod session;

pub use password::{hash_password, hash_password_secure, verify_password};
pub use session::{Session, SessionManager};
