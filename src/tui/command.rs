use std::future::Future;

use futures::future::{BoxFuture, FutureExt};

use super::element::FocusId;
use super::notice::Notice;
use super::route::Route;

/// Where a key handled by a focused widget should go
pub enum DispatchTarget<Msg> {
    /// Message for the page's update()
    AppMsg(Msg),

    /// Not handled by the widget; fall through to subscriptions
    PassThrough,
}

/// Side effects requested by a page's update().
/// Executed by the runtime after update() returns.
pub enum Command<Msg> {
    None,

    Batch(Vec<Command<Msg>>),

    /// Leave this page for another route
    Navigate(Route),

    /// Run an async operation and feed its result back as a message
    Perform(BoxFuture<'static, Msg>),

    /// Show a transient notice
    Notify(Notice),

    /// End the session and return to the landing page
    SignOut,

    SetFocus(FocusId),

    ClearFocus,

    Quit,
}

impl<Msg> Command<Msg> {
    pub fn perform<F, T>(future: F, to_msg: impl Fn(T) -> Msg + Send + 'static) -> Self
    where
        F: Future<Output = T> + Send + 'static,
        Msg: Send + 'static,
    {
        Command::Perform(future.map(to_msg).boxed())
    }

    pub fn navigate(route: Route) -> Self {
        Command::Navigate(route)
    }

    pub fn notify(notice: Notice) -> Self {
        Command::Notify(notice)
    }

    pub fn batch(commands: Vec<Command<Msg>>) -> Self {
        Command::Batch(commands)
    }

    pub fn set_focus(id: impl Into<FocusId>) -> Self {
        Command::SetFocus(id.into())
    }

    /// Navigate and announce why in one step
    pub fn notify_and_navigate(notice: Notice, route: Route) -> Self {
        Command::Batch(vec![Command::Notify(notice), Command::Navigate(route)])
    }
}

impl<Msg> Default for Command<Msg> {
    fn default() -> Self {
        Command::None
    }
}
