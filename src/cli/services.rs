//! Wiring of the backend clients and the session context

use std::sync::Arc;

use anyhow::{Context, Result};

use crate::api::{BearerToken, GoTrueAuth, MemoryBackend, RestClient, TableClient};
use crate::auth::{SessionClient, SessionContext};
use crate::config::Config;
use crate::config::models::env;
use crate::survey::demo;

/// Everything a page or command needs to talk to the backend
#[derive(Clone)]
pub struct Services {
    pub session: Arc<SessionContext>,
    pub client: Arc<dyn TableClient>,
}

impl Services {
    /// Real backend from the stored settings (or their environment overrides),
    /// with the session persisted in the local config database
    pub async fn connect(config: &Config) -> Result<Self> {
        let backend = config.backend().await?.with_context(|| {
            format!(
                "No backend configured. Run 'hseit-risk backend set' or set {} and {}",
                env::BACKEND_URL,
                env::ANON_KEY
            )
        })?;
        log::info!("Using backend {}", backend.url);

        let bearer = BearerToken::new();
        let client = RestClient::new(backend.clone(), bearer.clone()).context("Failed to build REST client")?;
        let auth = GoTrueAuth::new(backend).context("Failed to build auth client")?;
        let session = Arc::new(SessionContext::new(Arc::new(auth), bearer).with_store(Arc::new(config.clone())));
        let client = SessionClient::new(session.clone(), Arc::new(client));

        Ok(Self {
            session,
            client: Arc::new(client),
        })
    }

    /// Offline backend seeded with demo accounts, questions and areas
    pub fn demo() -> Self {
        let backend = MemoryBackend::new();
        demo::seed(&backend);
        log::info!("Using in-memory demo backend");

        let session = Arc::new(SessionContext::new(Arc::new(backend.clone()), BearerToken::new()));
        let client = SessionClient::new(session.clone(), Arc::new(backend));
        Self {
            session,
            client: Arc::new(client),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::SessionState;

    #[tokio::test]
    async fn test_demo_accounts_can_sign_in() {
        let services = Services::demo();
        assert_eq!(services.session.init().await, SessionState::SignedOut);

        let user = services
            .session
            .sign_in(demo::ADMIN_EMAIL, demo::DEMO_PASSWORD)
            .await
            .unwrap();
        let role = crate::auth::lookup_role(services.client.as_ref(), &user.id).await;
        assert!(role.is_admin);
    }

    #[tokio::test]
    async fn test_connect_requires_backend() {
        let config = Config::new_test().await.unwrap();
        // Only meaningful when the override variables are not set in the environment
        if std::env::var(env::BACKEND_URL).is_err() || std::env::var(env::ANON_KEY).is_err() {
            assert!(Services::connect(&config).await.is_err());
        }
    }
}
