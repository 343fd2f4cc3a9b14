use std::collections::HashMap;

use tokio::sync::RwLock;

/// One live dashboard session: the backend-issued access token plus its
/// local expiry timestamp.
#[derive(Debug, Clone)]
struct SessionEntry {
    access_token: String,
    expires_at: i64,
}

/// In-memory session store. Sessions are not persisted; a restart logs
/// everyone out.
pub struct SessionManager {
    sessions: RwLock<HashMap<String, SessionEntry>>,
    /// Session validity period (seconds)
    session_ttl: i64,
}

impl SessionManager {
    pub fn new(session_ttl_hours: i64) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            session_ttl: session_ttl_hours * 3600,
        }
    }

    /// Create a new session holding the caller's backend access token.
    /// Returns the opaque session token used as the cookie value.
    pub async fn create_session(&self, access_token: String) -> String {
        let token = uuid::Uuid::new_v4().to_string();
        let expires_at = chrono::Utc::now().timestamp() + self.session_ttl;

        let mut sessions = self.sessions.write().await;
        sessions.insert(
            token.clone(),
            SessionEntry {
                access_token,
                expires_at,
            },
        );

        token
    }

    /// Resolve a session token to the stored backend access token,
    /// if the session exists and has not expired.
    pub async fn access_token(&self, token: &str) -> Option<String> {
        let sessions = self.sessions.read().await;
        let entry = sessions.get(token)?;
        if entry.expires_at > chrono::Utc::now().timestamp() {
            Some(entry.access_token.clone())
        } else {
            None
        }
    }

    /// Check whether a session token is live
    pub async fn validate_session(&self, token: &str) -> bool {
        self.access_token(token).await.is_some()
    }

    /// Extend a live session's expiry
    pub async fn refresh_session(&self, token: &str) -> bool {
        let mut sessions = self.sessions.write().await;
        if let Some(entry) = sessions.get_mut(token) {
            entry.expires_at = chrono::Utc::now().timestamp() + self.session_ttl;
            true
        } else {
            false
        }
    }

    /// Delete a session (logout)
    pub async fn delete_session(&self, token: &str) {
        let mut sessions = self.sessions.write().await;
        sessions.remove(token);
    }

    /// Drop expired sessions
    pub async fn cleanup_expired(&self) {
        let now = chrono::Utc::now().timestamp();
        let mut sessions = self.sessions.write().await;
        sessions.retain(|_, entry| entry.expires_at > now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn create_and_resolve_session() {
        let manager = SessionManager::new(1);
        let token = manager.create_session("backend-token".to_string()).await;

        assert!(manager.validate_session(&token).await);
        assert_eq!(
            manager.access_token(&token).await.as_deref(),
            Some("backend-token")
        );
    }

    #[tokio::test]
    async fn unknown_token_is_rejected() {
        let manager = SessionManager::new(1);
        assert!(!manager.validate_session("nope").await);
        assert_eq!(manager.access_token("nope").await, None);
    }

    #[tokio::test]
    async fn deleted_session_is_gone() {
        let manager = SessionManager::new(1);
        let token = manager.create_session("t".to_string()).await;
        manager.delete_session(&token).await;
        assert!(!manager.validate_session(&token).await);
    }

    #[tokio::test]
    async fn expired_session_is_rejected() {
        // Zero-hour TTL expires immediately
        let manager = SessionManager::new(0);
        let token = manager.create_session("t".to_string()).await;
        assert!(!manager.validate_session(&token).await);

        manager.cleanup_expired().await;
        assert!(!manager.refresh_session(&token).await);
    }
}
