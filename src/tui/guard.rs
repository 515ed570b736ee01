//! Page access policies
//!
//! Every page declares one [`PagePolicy`]; the page runtime evaluates it
//! against the current session and role before a page is created.

use crate::auth::{RoleStatus, SessionState};

use super::route::Route;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PagePolicy {
    Public,
    /// Signed-out users only; signed-in users go to the dashboard
    GuestOnly,
    Authenticated,
    /// Signed in with the admin role, otherwise sent to `fallback`
    Admin { fallback: Route },
}

impl PagePolicy {
    pub fn needs_role(&self) -> bool {
        matches!(self, PagePolicy::Admin { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    /// Session or role still resolving
    Wait,
    Redirect(Route),
}

pub fn evaluate(policy: &PagePolicy, session: &SessionState, role: &RoleStatus) -> GuardDecision {
    if *policy == PagePolicy::Public {
        return GuardDecision::Allow;
    }

    let signed_in = match session {
        SessionState::Loading => return GuardDecision::Wait,
        SessionState::SignedOut => false,
        SessionState::SignedIn(_) => true,
    };

    match policy {
        PagePolicy::Public => GuardDecision::Allow,
        PagePolicy::GuestOnly if signed_in => GuardDecision::Redirect(Route::Dashboard),
        PagePolicy::GuestOnly => GuardDecision::Allow,
        _ if !signed_in => GuardDecision::Redirect(Route::Auth),
        PagePolicy::Authenticated => GuardDecision::Allow,
        PagePolicy::Admin { fallback } => match role.is_admin() {
            None => GuardDecision::Wait,
            Some(true) => GuardDecision::Allow,
            Some(false) => GuardDecision::Redirect(fallback.clone()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{AuthSession, AuthUser, TokenInfo};
    use crate::auth::RoleInfo;
    use chrono::{Duration, Utc};
    use serde_json::json;

    fn signed_in() -> SessionState {
        SessionState::SignedIn(AuthSession {
            user: AuthUser {
                id: "u1".into(),
                email: Some("ana@acme.com".into()),
                metadata: json!({}),
            },
            token: TokenInfo {
                access_token: "t".into(),
                refresh_token: None,
                expires_at: Utc::now() + Duration::hours(1),
            },
        })
    }

    fn resolved(role: Option<&str>) -> RoleStatus {
        RoleStatus::Resolved(RoleInfo::from_role(role.map(str::to_string)))
    }

    #[test]
    fn test_loading_session_waits() {
        let decision = evaluate(&PagePolicy::Authenticated, &SessionState::Loading, &RoleStatus::Loading);
        assert_eq!(decision, GuardDecision::Wait);
        assert_eq!(
            evaluate(&PagePolicy::Public, &SessionState::Loading, &RoleStatus::Loading),
            GuardDecision::Allow
        );
    }

    #[test]
    fn test_signed_out_goes_to_auth() {
        let admin = PagePolicy::Admin {
            fallback: Route::Welcome,
        };
        for policy in [PagePolicy::Authenticated, admin] {
            assert_eq!(
                evaluate(&policy, &SessionState::SignedOut, &RoleStatus::Loading),
                GuardDecision::Redirect(Route::Auth)
            );
        }
    }

    #[test]
    fn test_admin_policy() {
        let policy = Route::Results.policy();
        assert_eq!(evaluate(&policy, &signed_in(), &RoleStatus::Loading), GuardDecision::Wait);
        assert_eq!(
            evaluate(&policy, &signed_in(), &resolved(None)),
            GuardDecision::Redirect(Route::Welcome)
        );
        assert_eq!(
            evaluate(&Route::AreaRegistry.policy(), &signed_in(), &resolved(Some("viewer"))),
            GuardDecision::Redirect(Route::Dashboard)
        );
        assert_eq!(evaluate(&policy, &signed_in(), &resolved(Some("admin"))), GuardDecision::Allow);
    }

    #[test]
    fn test_guest_only() {
        let policy = Route::Auth.policy();
        assert_eq!(
            evaluate(&policy, &signed_in(), &RoleStatus::Loading),
            GuardDecision::Redirect(Route::Dashboard)
        );
        assert_eq!(
            evaluate(&policy, &SessionState::SignedOut, &RoleStatus::Loading),
            GuardDecision::Allow
        );
    }
}
