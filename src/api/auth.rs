use super::client::{build_http_client, error_message};
use super::constants::{self, headers};
use super::models::{AuthSession, AuthUser, BackendConfig, SignUpOutcome, SignUpRequest, TokenInfo};
use anyhow::Context;
use async_trait::async_trait;
use chrono::{Duration, Utc};
use serde_json::{Value, json};

/// Password-based account operations against the auth backend
#[async_trait]
pub trait AuthApi: Send + Sync {
    async fn sign_in_with_password(&self, email: &str, password: &str) -> anyhow::Result<AuthSession>;

    async fn sign_up(&self, request: &SignUpRequest) -> anyhow::Result<SignUpOutcome>;

    /// Revoke the session behind this access token
    async fn sign_out(&self, access_token: &str) -> anyhow::Result<()>;

    async fn get_user(&self, access_token: &str) -> anyhow::Result<AuthUser>;

    async fn refresh(&self, refresh_token: &str) -> anyhow::Result<AuthSession>;
}

/// Parse a token grant response into a session
pub fn parse_session(token_data: &Value) -> anyhow::Result<AuthSession> {
    let access_token = token_data
        .get("access_token")
        .and_then(|t| t.as_str())
        .context("No access_token in auth response")?;

    // Default to 1 hour if the backend does not say otherwise
    let expires_in = token_data
        .get("expires_in")
        .and_then(|e| e.as_i64())
        .unwrap_or(3600);

    let refresh_token = token_data
        .get("refresh_token")
        .and_then(|t| t.as_str())
        .map(|s| s.to_string());

    let user: AuthUser = serde_json::from_value(
        token_data.get("user").cloned().context("No user in auth response")?,
    )
    .context("Failed to decode auth user")?;

    Ok(AuthSession {
        user,
        token: TokenInfo {
            access_token: access_token.to_string(),
            refresh_token,
            expires_at: Utc::now() + Duration::seconds(expires_in),
        },
    })
}

/// GoTrue auth client over reqwest
#[derive(Clone)]
pub struct GoTrueAuth {
    config: BackendConfig,
    http_client: reqwest::Client,
}

impl GoTrueAuth {
    pub fn new(config: BackendConfig) -> anyhow::Result<Self> {
        Ok(Self {
            config,
            http_client: build_http_client()?,
        })
    }

    fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.http_client
            .post(constants::auth_endpoint(&self.config.url, path))
            .header(headers::APIKEY, &self.config.anon_key)
            .header("Content-Type", headers::CONTENT_TYPE_JSON)
    }

    async fn read_json(response: reqwest::Response, action: &str) -> anyhow::Result<Value> {
        let status = response.status();
        log::debug!("{} status: {}", action, status);

        let text = response.text().await.unwrap_or_default();
        if !status.is_success() {
            anyhow::bail!("{} failed: {}", action, error_message(status.as_u16(), &text));
        }

        serde_json::from_str(&text).with_context(|| format!("Invalid JSON in {} response", action))
    }

    async fn token_grant(&self, grant_type: &str, body: Value) -> anyhow::Result<AuthSession> {
        let response = self
            .post(&format!("token?grant_type={}", grant_type))
            .json(&body)
            .send()
            .await
            .context("Failed to reach auth service")?;

        let token_data = Self::read_json(response, "Authentication").await?;
        parse_session(&token_data)
    }
}

#[async_trait]
impl AuthApi for GoTrueAuth {
    async fn sign_in_with_password(&self, email: &str, password: &str) -> anyhow::Result<AuthSession> {
        log::info!("Signing in {} at {}", email, self.config.url);
        self.token_grant("password", json!({ "email": email, "password": password }))
            .await
    }

    async fn sign_up(&self, request: &SignUpRequest) -> anyhow::Result<SignUpOutcome> {
        log::info!("Creating account for {}", request.email);

        let response = self
            .post("signup")
            .json(&json!({
                "email": request.email,
                "password": request.password,
                "data": {
                    "full_name": request.full_name,
                    "organization": request.organization,
                },
            }))
            .send()
            .await
            .context("Failed to reach auth service")?;

        let data = Self::read_json(response, "Sign up").await?;

        // Auto-confirmed projects answer with a full session; others with the bare user
        if data.get("access_token").is_some() {
            Ok(SignUpOutcome::SignedIn(parse_session(&data)?))
        } else {
            Ok(SignUpOutcome::ConfirmationRequired {
                email: request.email.clone(),
            })
        }
    }

    async fn sign_out(&self, access_token: &str) -> anyhow::Result<()> {
        let response = self
            .post("logout")
            .bearer_auth(access_token)
            .send()
            .await
            .context("Failed to reach auth service")?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            anyhow::bail!("Sign out failed: {}", error_message(status.as_u16(), &text));
        }
        Ok(())
    }

    async fn get_user(&self, access_token: &str) -> anyhow::Result<AuthUser> {
        let response = self
            .http_client
            .get(constants::auth_endpoint(&self.config.url, "user"))
            .header(headers::APIKEY, &self.config.anon_key)
            .bearer_auth(access_token)
            .send()
            .await
            .context("Failed to reach auth service")?;

        let data = Self::read_json(response, "Fetch user").await?;
        serde_json::from_value(data).context("Failed to decode auth user")
    }

    async fn refresh(&self, refresh_token: &str) -> anyhow::Result<AuthSession> {
        self.token_grant("refresh_token", json!({ "refresh_token": refresh_token }))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_session() {
        let data = json!({
            "access_token": "jwt",
            "token_type": "bearer",
            "expires_in": 3600,
            "refresh_token": "r1",
            "user": {
                "id": "u-1",
                "email": "ana@empresa.com",
                "user_metadata": {"full_name": "Ana Souza", "organization": "ACME"}
            }
        });

        let session = parse_session(&data).unwrap();
        assert_eq!(session.token.access_token, "jwt");
        assert_eq!(session.token.refresh_token.as_deref(), Some("r1"));
        assert!(!session.token.is_expired());
        assert_eq!(session.user.id, "u-1");
        assert_eq!(session.user.full_name(), Some("Ana Souza"));
    }

    #[test]
    fn test_parse_session_requires_token() {
        let data = json!({"user": {"id": "u-1"}});
        assert!(parse_session(&data).is_err());
    }
}
