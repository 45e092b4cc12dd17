// ============================
// doorman-lib/src/store.rs
// ============================
//! Credential store abstraction with an in-memory implementation.
use async_trait::async_trait;
use dashmap::{mapref::entry::Entry, DashMap};
use std::sync::Arc;
use std::time::SystemTime;
use thiserror::Error;

/// A stored user record. The hash is a PHC-format scrypt string,
/// never the plaintext password.
#[derive(Clone, Debug)]
pub struct User {
    pub username: String,
    pub password_hash: String,
    pub created_at: SystemTime,
}

/// Errors a credential store can report
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Username already exists.")]
    DuplicateUsername,

    #[error("Invalid user record: {0}")]
    Validation(String),
}

/// Trait for credential store backends
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Create a user. Uniqueness of the username is enforced here,
    /// at the store level.
    async fn create(&self, username: &str, password_hash: &str) -> Result<User, StoreError>;

    /// Look up a user by username.
    async fn find_by_username(&self, username: &str) -> Option<User>;
}

/// In-memory implementation of the `UserStore` trait
#[derive(Clone, Default)]
pub struct MemoryUserStore {
    users: Arc<DashMap<String, User>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn create(&self, username: &str, password_hash: &str) -> Result<User, StoreError> {
        if username.is_empty() {
            return Err(StoreError::Validation("username is required".to_string()));
        }
        if password_hash.is_empty() {
            return Err(StoreError::Validation(
                "password hash is required".to_string(),
            ));
        }

        // check-then-create is atomic under the map entry; a concurrent
        // duplicate loses with DuplicateUsername
        match self.users.entry(username.to_string()) {
            Entry::Occupied(_) => Err(StoreError::DuplicateUsername),
            Entry::Vacant(vacant) => {
                let user = User {
                    username: username.to_string(),
                    password_hash: password_hash.to_string(),
                    created_at: SystemTime::now(),
                };
                vacant.insert(user.clone());
                Ok(user)
            },
        }
    }

    async fn find_by_username(&self, username: &str) -> Option<User> {
        self.users.get(username).map(|user| user.value().clone())
    }
}
