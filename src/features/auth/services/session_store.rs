use std::sync::Arc;
use tokio::sync::RwLock;

use crate::core::error::{AppError, Result};
use crate::features::auth::model::Session;

/// Holds the signed-in user for the lifetime of the app.
///
/// Cloning yields another handle to the same session, so every component
/// that needs authenticated calls gets one injected. Once cleared, no
/// token is handed out until a new sign in stores a session.
#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<Option<Session>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current bearer token, `None` when signed out or expired
    pub async fn token(&self) -> Option<String> {
        self.inner
            .read()
            .await
            .as_ref()
            .map(|session| session.token().to_string())
    }

    /// Token for a protected call; an absent session means the user must sign in
    pub async fn require_token(&self) -> Result<String> {
        self.token().await.ok_or_else(|| {
            tracing::debug!("No session token held, sign in required");
            AppError::SessionExpired
        })
    }

    pub async fn current(&self) -> Option<Session> {
        self.inner.read().await.clone()
    }

    pub async fn set_session(&self, session: Session) {
        tracing::info!(
            "Session started for user {} (id={}, roles={:?})",
            session.username,
            session.user_id,
            session.roles
        );
        *self.inner.write().await = Some(session);
    }

    pub async fn clear(&self) {
        if let Some(session) = self.inner.write().await.take() {
            tracing::info!("Session cleared for user {}", session.username);
        }
    }

    /// Pass a protected call's result through, dropping the session on 401.
    ///
    /// Only the session that issued `token` is dropped; a 401 arriving after
    /// a new sign in leaves the newer session alone.
    pub async fn observe<T>(&self, token: &str, result: Result<T>) -> Result<T> {
        if let Err(AppError::SessionExpired) = &result {
            let mut guard = self.inner.write().await;
            let issued_by_current = guard.as_ref().is_some_and(|s| s.token() == token);
            if issued_by_current {
                if let Some(session) = guard.take() {
                    tracing::info!("Session cleared for user {}", session.username);
                }
            } else if guard.is_some() {
                tracing::debug!("Ignoring 401 for a token that is no longer current");
            }
        }
        result
    }
}
