//! Terminal UI: an Elm-style page framework plus the survey's pages
//!
//! Each page implements [`App`]; a [`Runtime`] drives one page and the
//! [`MultiAppRuntime`] routes between them, applying each route's access
//! policy before a page is created.

pub mod app;
pub mod apps;
pub mod command;
pub mod element;
pub mod guard;
pub mod multi_runtime;
pub mod notice;
pub mod renderer;
pub mod resource;
pub mod route;
pub mod runtime;
pub mod subscription;
pub mod theme;
pub mod widgets;

pub use app::{App, AppContext};
pub use command::{Command, DispatchTarget};
pub use element::{Element, FocusId, LayoutConstraint};
pub use guard::{GuardDecision, PagePolicy};
pub use multi_runtime::MultiAppRuntime;
pub use notice::{Notice, NoticeLevel};
pub use renderer::{InteractionRegistry, Renderer};
pub use resource::Resource;
pub use route::Route;
pub use runtime::{AppRuntime, Effect, Runtime};
pub use subscription::{KeyBinding, Subscription};
pub use theme::Theme;
pub use widgets::{ListItem, ListState, SelectState, TextInputState};
