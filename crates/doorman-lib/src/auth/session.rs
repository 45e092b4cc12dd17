// ============================
// doorman-lib/src/auth/session.rs
// ============================
//! Session token handling and management.
use crate::error::AppError;
use metrics::{counter, gauge};
use std::{collections::HashMap, sync::Arc, time::{Duration, SystemTime}};
use tokio::sync::RwLock;
use uuid::Uuid;

/// Default session TTL (time to live)
pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(60 * 60 * 24 * 7); // 7 days

/// How often expired sessions are swept out
const CLEANUP_INTERVAL: Duration = Duration::from_secs(60 * 60); // 1 hour

/// Server-side record linking an opaque client-held token to a user
#[derive(Clone, Debug)]
pub struct Session {
    pub username: String,
    pub created_at: SystemTime,
    pub expires_at: SystemTime,
}

/// Session manager for handling authentication tokens
#[derive(Clone)]
pub struct SessionManager {
    sessions: Arc<RwLock<HashMap<String, Session>>>,
    ttl: Duration,
}

impl SessionManager {
    /// Create a new session manager
    ///
    /// Must be called from within a tokio runtime: the manager spawns its
    /// own cleanup task.
    pub fn new(ttl: Duration) -> Self {
        let manager = SessionManager {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        };

        // Spawn the session cleanup task
        let manager_clone = manager.clone();
        tokio::spawn(async move {
            manager_clone.cleanup_task().await;
        });

        manager
    }

    /// Create a new session for a user, returning the opaque token
    /// the client holds.
    pub async fn create(&self, username: String) -> String {
        let token = Uuid::new_v4().to_string();
        let now = SystemTime::now();
        let session = Session {
            username,
            created_at: now,
            expires_at: now + self.ttl,
        };

        let mut sessions = self.sessions.write().await;
        sessions.insert(token.clone(), session);

        counter!("session.created").increment(1);
        gauge!("session.active").set(sessions.len() as f64);

        token
    }

    /// Get a live session by token; expired sessions are not returned.
    pub async fn get(&self, token: &str) -> Option<Session> {
        let sessions = self.sessions.read().await;
        sessions
            .get(token)
            .filter(|session| SystemTime::now() < session.expires_at)
            .cloned()
    }

    /// Destroy a session.
    ///
    /// Fails when the store holds no record to remove; the caller treats
    /// that as a fatal request error.
    pub async fn destroy(&self, token: &str) -> Result<(), AppError> {
        let mut sessions = self.sessions.write().await;

        if sessions.remove(token).is_none() {
            return Err(AppError::SessionDestroy(
                "session record was not removed".to_string(),
            ));
        }

        counter!("session.destroyed").increment(1);
        gauge!("session.active").set(sessions.len() as f64);

        Ok(())
    }

    /// Cleanup task that runs periodically to remove expired sessions
    async fn cleanup_task(&self) {
        loop {
            tokio::time::sleep(CLEANUP_INTERVAL).await;

            let mut sessions = self.sessions.write().await;
            let now = SystemTime::now();
            let before_count = sessions.len();

            sessions.retain(|_, session| now < session.expires_at);

            let removed = before_count - sessions.len();
            if removed > 0 {
                counter!("session.expired").increment(removed as u64);
                gauge!("session.active").set(sessions.len() as f64);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_session_lifecycle() {
        let manager = SessionManager::new(DEFAULT_SESSION_TTL);

        let token = manager.create("alice".to_string()).await;

        let session = manager.get(&token).await.unwrap();
        assert_eq!(session.username, "alice");
        assert!(session.created_at < session.expires_at);

        manager.destroy(&token).await.unwrap();
        assert!(manager.get(&token).await.is_none());
    }

    #[tokio::test]
    async fn test_unknown_token_is_not_a_session() {
        let manager = SessionManager::new(DEFAULT_SESSION_TTL);
        assert!(manager.get("not-a-token").await.is_none());
    }

    #[tokio::test]
    async fn test_destroy_missing_record_fails() {
        let manager = SessionManager::new(DEFAULT_SESSION_TTL);

        let err = manager.destroy("never-issued").await.unwrap_err();
        assert!(matches!(err, AppError::SessionDestroy(_)));
    }

    #[tokio::test]
    async fn test_expired_session_is_gone() {
        let manager = SessionManager::new(Duration::ZERO);

        let token = manager.create("alice".to_string()).await;
        assert!(manager.get(&token).await.is_none());
    }

    #[tokio::test]
    async fn test_tokens_are_unique() {
        let manager = SessionManager::new(DEFAULT_SESSION_TTL);

        let first = manager.create("alice".to_string()).await;
        let second = manager.create("alice".to_string()).await;
        assert_ne!(first, second);
    }
}
