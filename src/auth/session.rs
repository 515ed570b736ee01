//! Process-wide session state
//!
//! Constructed explicitly in `main` and injected into the pages. `init` runs
//! once at startup (restoring a persisted session when a store is attached);
//! `sign_out` tears everything down again.

use std::sync::{Arc, RwLock};

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::api::{AuthApi, AuthSession, AuthUser, BearerToken, SignUpOutcome, SignUpRequest, TokenInfo};

#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    /// `init` has not finished yet
    Loading,
    SignedOut,
    SignedIn(AuthSession),
}

impl SessionState {
    pub fn user(&self) -> Option<&AuthUser> {
        match self {
            SessionState::SignedIn(session) => Some(&session.user),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, SessionState::Loading)
    }
}

/// A session as persisted between runs
#[derive(Debug, Clone, PartialEq)]
pub struct StoredSession {
    pub user_id: String,
    pub email: Option<String>,
    pub token: TokenInfo,
}

impl From<&AuthSession> for StoredSession {
    fn from(session: &AuthSession) -> Self {
        Self {
            user_id: session.user.id.clone(),
            email: session.user.email.clone(),
            token: session.token.clone(),
        }
    }
}

/// Persistence for the signed-in session
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn load_session(&self) -> Result<Option<StoredSession>>;

    async fn save_session(&self, session: &StoredSession) -> Result<()>;

    async fn clear_session(&self) -> Result<()>;
}

pub struct SessionContext {
    auth: Arc<dyn AuthApi>,
    store: Option<Arc<dyn SessionStore>>,
    bearer: BearerToken,
    state: RwLock<SessionState>,
    refresh_lock: Mutex<()>,
}

impl SessionContext {
    /// `bearer` is the handle shared with the table client
    pub fn new(auth: Arc<dyn AuthApi>, bearer: BearerToken) -> Self {
        Self {
            auth,
            store: None,
            bearer,
            state: RwLock::new(SessionState::Loading),
            refresh_lock: Mutex::new(()),
        }
    }

    pub fn with_store(mut self, store: Arc<dyn SessionStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn state(&self) -> SessionState {
        self.state.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn current_user(&self) -> Option<AuthUser> {
        self.state().user().cloned()
    }

    pub fn access_token(&self) -> Option<String> {
        match self.state() {
            SessionState::SignedIn(session) => Some(session.token.access_token),
            _ => None,
        }
    }

    fn set_state(&self, state: SessionState) {
        match &state {
            SessionState::SignedIn(session) => self.bearer.set(session.token.access_token.clone()),
            _ => self.bearer.clear(),
        }
        *self.state.write().unwrap_or_else(|e| e.into_inner()) = state;
    }

    async fn persist(&self, session: &AuthSession) {
        if let Some(store) = &self.store {
            if let Err(e) = store.save_session(&StoredSession::from(session)).await {
                log::error!("Failed to persist session: {:#}", e);
            }
        }
    }

    async fn forget(&self) {
        if let Some(store) = &self.store {
            if let Err(e) = store.clear_session().await {
                log::error!("Failed to clear persisted session: {:#}", e);
            }
        }
    }

    /// Resolve the initial state, restoring a stored session if it is still usable
    pub async fn init(&self) -> SessionState {
        let state = match self.restore().await {
            Ok(Some(session)) => {
                log::info!("Restored session for {}", session.user.display_name());
                SessionState::SignedIn(session)
            }
            Ok(None) => SessionState::SignedOut,
            Err(e) => {
                log::warn!("Discarding stored session: {:#}", e);
                self.forget().await;
                SessionState::SignedOut
            }
        };
        self.set_state(state.clone());
        state
    }

    async fn restore(&self) -> Result<Option<AuthSession>> {
        let Some(store) = &self.store else {
            return Ok(None);
        };
        let Some(stored) = store.load_session().await? else {
            return Ok(None);
        };

        if !stored.token.is_expired() {
            let user = self.auth.get_user(&stored.token.access_token).await?;
            return Ok(Some(AuthSession {
                user,
                token: stored.token,
            }));
        }

        let Some(refresh_token) = stored.token.refresh_token.as_deref() else {
            anyhow::bail!("Stored token expired and no refresh token is available");
        };
        log::debug!("Refreshing expired session for {}", stored.user_id);
        let session = self.auth.refresh(refresh_token).await?;
        self.persist(&session).await;
        Ok(Some(session))
    }

    /// Access token of the signed-in session, refreshed first when it is
    /// about to expire. `None` when signed out.
    pub async fn fresh_token(&self) -> Result<Option<String>> {
        // concurrent callers wait for a single refresh
        let _guard = self.refresh_lock.lock().await;

        let SessionState::SignedIn(session) = self.state() else {
            return Ok(None);
        };
        if !session.token.is_expired() {
            return Ok(Some(session.token.access_token));
        }

        let refresh_token = session
            .token
            .refresh_token
            .as_deref()
            .context("Session expired and no refresh token is available")?;
        log::debug!("Refreshing session for {}", session.user.display_name());
        let refreshed = self
            .auth
            .refresh(refresh_token)
            .await
            .context("Failed to refresh the session")?;

        // signed out (or switched user) while the refresh was in flight
        if self.current_user().map(|user| user.id) != Some(session.user.id) {
            return Ok(None);
        }

        self.persist(&refreshed).await;
        let token = refreshed.token.access_token.clone();
        self.set_state(SessionState::SignedIn(refreshed));
        Ok(Some(token))
    }

    #[cfg(test)]
    pub(crate) fn expire_token(&self) {
        let mut state = self.state.write().unwrap_or_else(|e| e.into_inner());
        if let SessionState::SignedIn(session) = &mut *state {
            session.token.expires_at = chrono::Utc::now() - chrono::Duration::minutes(5);
        }
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> Result<AuthUser> {
        let session = self.auth.sign_in_with_password(email.trim(), password).await?;
        log::info!("Signed in as {}", session.user.display_name());
        self.persist(&session).await;
        let user = session.user.clone();
        self.set_state(SessionState::SignedIn(session));
        Ok(user)
    }

    pub async fn sign_up(&self, request: &SignUpRequest) -> Result<SignUpOutcome> {
        let outcome = self.auth.sign_up(request).await?;
        if let SignUpOutcome::SignedIn(session) = &outcome {
            log::info!("Account created and signed in: {}", request.email);
            self.persist(session).await;
            self.set_state(SessionState::SignedIn(session.clone()));
        } else {
            log::info!("Account created for {}, awaiting e-mail confirmation", request.email);
        }
        Ok(outcome)
    }

    /// Revoke the remote session and drop local state; the local teardown
    /// happens even if revocation fails
    pub async fn sign_out(&self) -> Result<()> {
        if let Some(token) = self.access_token() {
            if let Err(e) = self.auth.sign_out(&token).await {
                log::warn!("Remote sign out failed: {:#}", e);
            }
        }
        self.forget().await;
        self.set_state(SessionState::SignedOut);
        log::info!("Signed out");
        Ok(())
    }
}
