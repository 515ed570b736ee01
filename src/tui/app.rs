use std::sync::Arc;

use ratatui::text::Line;

use crate::api::{AuthUser, TableClient};
use crate::auth::{RoleStatus, SessionContext};

use super::route::Route;
use super::{Command, Element, Subscription, Theme};

/// Collaborators handed to every page
#[derive(Clone)]
pub struct AppContext {
    pub session: Arc<SessionContext>,
    pub client: Arc<dyn TableClient>,
    pub role: RoleStatus,
    /// Route the page was opened at
    pub route: Route,
}

impl AppContext {
    pub fn new(session: Arc<SessionContext>, client: Arc<dyn TableClient>) -> Self {
        Self {
            session,
            client,
            role: RoleStatus::Loading,
            route: Route::Landing,
        }
    }

    pub fn user(&self) -> Option<AuthUser> {
        self.session.current_user()
    }

    pub fn is_admin(&self) -> bool {
        self.role.is_admin() == Some(true)
    }
}

/// A page, in the Elm style:
/// - `init` builds the first state and may start fetches
/// - `update` handles one message and returns the side effects to run
/// - `view` renders the state
/// - `subscriptions` declares the keys the page listens to
pub trait App: Sized + Send + 'static {
    type State: Send;

    type Msg: Clone + Send + 'static;

    fn init(ctx: &AppContext) -> (Self::State, Command<Self::Msg>);

    fn update(state: &mut Self::State, msg: Self::Msg, ctx: &AppContext) -> Command<Self::Msg>;

    fn view(state: &Self::State, ctx: &AppContext, theme: &Theme) -> Element<Self::Msg>;

    fn subscriptions(_state: &Self::State) -> Vec<Subscription<Self::Msg>> {
        Vec::new()
    }

    fn title() -> &'static str;

    /// Optional status text for the header
    fn status(_state: &Self::State, _theme: &Theme) -> Option<Line<'static>> {
        None
    }
}
