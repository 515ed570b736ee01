//! The survey's pages, one module per route

pub mod area_registry;
pub mod auth;
pub mod dashboard;
pub mod landing;
pub mod not_found;
pub mod question_registry;
pub mod questionnaire;
pub mod results;
pub mod welcome;

use ratatui::text::{Line, Span};

use crate::api::AuthUser;
use crate::tui::{AppContext, AppRuntime, Element, Route, Runtime, Theme};

pub use area_registry::AreaRegistryApp;
pub use auth::AuthApp;
pub use dashboard::DashboardApp;
pub use landing::LandingApp;
pub use not_found::NotFoundApp;
pub use question_registry::QuestionRegistryApp;
pub use questionnaire::QuestionnaireApp;
pub use results::ResultsApp;
pub use welcome::WelcomeApp;

/// Build the page runtime for a route the guard has already allowed
pub fn create(route: &Route, ctx: &AppContext) -> Box<dyn AppRuntime> {
    match route {
        Route::Landing => Box::new(Runtime::<LandingApp>::new(ctx)),
        Route::Auth => Box::new(Runtime::<AuthApp>::new(ctx)),
        Route::Dashboard => Box::new(Runtime::<DashboardApp>::new(ctx)),
        Route::Welcome => Box::new(Runtime::<WelcomeApp>::new(ctx)),
        Route::QuestionRegistry => Box::new(Runtime::<QuestionRegistryApp>::new(ctx)),
        Route::AreaRegistry => Box::new(Runtime::<AreaRegistryApp>::new(ctx)),
        Route::Questionnaire => Box::new(Runtime::<QuestionnaireApp>::new(ctx)),
        Route::Results => Box::new(Runtime::<ResultsApp>::new(ctx)),
        Route::NotFound(_) => Box::new(Runtime::<NotFoundApp>::new(ctx)),
    }
}

/// Title line plus a muted subtitle
pub(crate) fn page_header<Msg>(title: &str, subtitle: &str, theme: &Theme) -> Element<Msg> {
    Element::paragraph(vec![
        Line::from(Span::styled(title.to_string(), theme.heading())),
        Line::from(Span::styled(subtitle.to_string(), theme.muted())),
    ])
}

/// First word of the user's name, falling back to the e-mail
pub(crate) fn first_name(user: &AuthUser) -> String {
    match user.full_name() {
        Some(name) => name.split_whitespace().next().unwrap_or(name).to_string(),
        None => user.display_name().to_string(),
    }
}

/// Backend error text for notices
pub(crate) fn error_text(error: &anyhow::Error) -> String {
    format!("{:#}", error)
}

#[cfg(test)]
pub(crate) mod testing {
    //! Shared fixtures for page tests

    use std::sync::Arc;

    use crate::api::{BearerToken, MemoryBackend};
    use crate::auth::{RoleInfo, RoleStatus, SessionContext};
    use crate::tui::{AppContext, Route};

    pub const PASSWORD: &str = "segredo1";

    /// Context over a fresh memory backend with a session already initialized
    pub async fn context(backend: &MemoryBackend) -> AppContext {
        let session = SessionContext::new(Arc::new(backend.clone()), BearerToken::new());
        session.init().await;
        AppContext {
            session: Arc::new(session),
            client: Arc::new(backend.clone()),
            role: RoleStatus::Resolved(RoleInfo::none()),
            route: Route::Landing,
        }
    }

    /// Context signed in as a new user, optionally with the admin role
    pub async fn signed_in(backend: &MemoryBackend, email: &str, admin: bool) -> AppContext {
        let user = backend.add_user(email, PASSWORD, "Ana Souza", "ACME");
        if admin {
            backend.grant_role(&user.id, "admin");
        }
        let mut ctx = context(backend).await;
        ctx.session
            .sign_in(email, PASSWORD)
            .await
            .expect("sign in against memory backend");
        ctx.role = RoleStatus::Resolved(if admin {
            RoleInfo::from_role(Some("admin".into()))
        } else {
            RoleInfo::none()
        });
        ctx
    }
}
