//! Backend connection and auth models

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Connection parameters for the managed backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendConfig {
    pub url: String,
    pub anon_key: String,
}

impl BackendConfig {
    pub fn new(url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            anon_key: anon_key.into(),
        }
    }
}

/// Access/refresh token pair issued by the auth API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenInfo {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_at: DateTime<Utc>,
}

impl TokenInfo {
    /// Tokens within a minute of expiry are treated as expired
    pub fn is_expired(&self) -> bool {
        self.expires_at - Duration::seconds(60) <= Utc::now()
    }
}

/// Authenticated user as reported by the auth API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: String,
    pub email: Option<String>,
    #[serde(default, rename = "user_metadata")]
    pub metadata: Value,
}

impl AuthUser {
    /// `full_name` from the sign-up metadata
    pub fn full_name(&self) -> Option<&str> {
        self.metadata
            .get("full_name")
            .and_then(|v| v.as_str())
            .filter(|s| !s.trim().is_empty())
    }

    /// Best human-readable name: metadata name, then e-mail
    pub fn display_name(&self) -> &str {
        self.full_name()
            .or(self.email.as_deref())
            .unwrap_or("Usuário")
    }
}

/// A signed-in session: user plus tokens
#[derive(Debug, Clone, PartialEq)]
pub struct AuthSession {
    pub user: AuthUser,
    pub token: TokenInfo,
}

/// Payload for account creation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignUpRequest {
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub organization: String,
}

/// Result of a sign-up call
#[derive(Debug, Clone, PartialEq)]
pub enum SignUpOutcome {
    /// The backend signed the user in right away
    SignedIn(AuthSession),
    /// The account exists but the e-mail must be confirmed first
    ConfirmationRequired { email: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn user(metadata: Value, email: Option<&str>) -> AuthUser {
        AuthUser {
            id: "u1".to_string(),
            email: email.map(str::to_string),
            metadata,
        }
    }

    #[test]
    fn test_display_name_fallbacks() {
        assert_eq!(user(json!({"full_name": "Ana Souza"}), Some("a@b.c")).display_name(), "Ana Souza");
        assert_eq!(user(json!({"full_name": "  "}), Some("a@b.c")).display_name(), "a@b.c");
        assert_eq!(user(Value::Null, None).display_name(), "Usuário");
    }

    #[test]
    fn test_token_expiry() {
        let fresh = TokenInfo {
            access_token: "t".into(),
            refresh_token: None,
            expires_at: Utc::now() + Duration::hours(1),
        };
        let stale = TokenInfo {
            expires_at: Utc::now() + Duration::seconds(10),
            ..fresh.clone()
        };
        assert!(!fresh.is_expired());
        assert!(stale.is_expired());
    }
}
