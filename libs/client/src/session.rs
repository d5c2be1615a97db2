//! Client session state machine
//!
//! Two states: Anonymous (no token) and Authenticated (token held). Login
//! moves to Authenticated; explicit logout or any 401 moves back. The
//! manager is injected into the HTTP client rather than living in a
//! global, and `logout` reports whether a transition actually happened so
//! racing 401s from in-flight requests fire the logout exactly once.

use std::sync::{Arc, Mutex};
use tracing::info;

use crate::storage::{LocalStore, TOKEN_KEY};

/// The two client session states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Anonymous,
    Authenticated,
}

/// Holds the bearer token for the lifetime of a session
pub struct SessionManager {
    token: Mutex<Option<String>>,
    store: Option<Arc<LocalStore>>,
}

impl SessionManager {
    /// In-memory session, starting Anonymous
    pub fn new() -> Self {
        SessionManager {
            token: Mutex::new(None),
            store: None,
        }
    }

    /// Session persisted through `store`; a token saved by a previous run
    /// resumes the Authenticated state.
    pub fn with_store(store: Arc<LocalStore>) -> Self {
        let token = store.get(TOKEN_KEY);
        SessionManager {
            token: Mutex::new(token),
            store: Some(store),
        }
    }

    pub fn state(&self) -> SessionState {
        let token = self.token.lock().expect("session lock poisoned");
        if token.is_some() {
            SessionState::Authenticated
        } else {
            SessionState::Anonymous
        }
    }

    /// Current token, if Authenticated
    pub fn token(&self) -> Option<String> {
        self.token.lock().expect("session lock poisoned").clone()
    }

    /// Transition to Authenticated with a fresh token
    pub fn authenticate(&self, token: String) {
        if let Some(store) = &self.store {
            if let Err(e) = store.set(TOKEN_KEY, &token) {
                tracing::warn!("Failed to persist token: {}", e);
            }
        }
        let mut slot = self.token.lock().expect("session lock poisoned");
        *slot = Some(token);
        info!("Session authenticated");
    }

    /// Transition to Anonymous.
    ///
    /// Returns whether a transition happened; a session that is already
    /// Anonymous stays put, which makes redundant 401s no-ops.
    pub fn logout(&self) -> bool {
        let mut slot = self.token.lock().expect("session lock poisoned");
        let was_authenticated = slot.take().is_some();
        drop(slot);

        if was_authenticated {
            if let Some(store) = &self.store {
                if let Err(e) = store.remove(TOKEN_KEY) {
                    tracing::warn!("Failed to clear persisted token: {}", e);
                }
            }
            info!("Session ended");
        }
        was_authenticated
    }
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_and_logout_transitions() {
        let session = SessionManager::new();
        assert_eq!(session.state(), SessionState::Anonymous);
        assert_eq!(session.token(), None);

        session.authenticate("tok".to_string());
        assert_eq!(session.state(), SessionState::Authenticated);
        assert_eq!(session.token().as_deref(), Some("tok"));

        assert!(session.logout());
        assert_eq!(session.state(), SessionState::Anonymous);
    }

    #[test]
    fn test_redundant_logout_fires_once() {
        let session = SessionManager::new();
        session.authenticate("tok".to_string());

        // First 401 logs out; later ones from racing requests are no-ops.
        assert!(session.logout());
        assert!(!session.logout());
        assert!(!session.logout());
    }

    #[test]
    fn test_token_resumes_from_store() {
        let path =
            std::env::temp_dir().join(format!("tasklist-session-{}.json", uuid::Uuid::new_v4()));
        let store = Arc::new(LocalStore::open(&path));

        let session = SessionManager::with_store(store.clone());
        session.authenticate("persisted".to_string());
        drop(session);

        let session = SessionManager::with_store(store);
        assert_eq!(session.state(), SessionState::Authenticated);
        assert_eq!(session.token().as_deref(), Some("persisted"));

        session.logout();
        assert_eq!(LocalStore::open(&path).get(TOKEN_KEY), None);

        std::fs::remove_file(&path).ok();
    }
}
