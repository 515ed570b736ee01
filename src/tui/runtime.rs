use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::Line;
use tokio::sync::mpsc;

use crate::tui::command::DispatchTarget;
use crate::tui::element::FocusId;
use crate::tui::notice::Notice;
use crate::tui::renderer::{FocusRegistry, InteractionRegistry};
use crate::tui::route::Route;
use crate::tui::subscription::KeyBinding;
use crate::tui::{App, AppContext, Command, Renderer, Subscription, Theme};

/// Requests a page makes of whatever hosts it
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Navigate(Route),
    Notify(Notice),
    SignOut,
    Quit,
}

/// Type-erased page runtime, so the router can hold any `Runtime<A>`
pub trait AppRuntime: Send {
    fn handle_key(&mut self, key_event: KeyEvent, ctx: &AppContext) -> bool;
    fn handle_click(&mut self, column: u16, row: u16, ctx: &AppContext) -> bool;
    fn focus_next(&mut self);
    fn focus_previous(&mut self);
    fn poll_async(&mut self, ctx: &AppContext);
    fn in_flight(&self) -> usize;
    fn take_effects(&mut self) -> Vec<Effect>;
    fn render_to_area(&mut self, frame: &mut Frame, theme: &Theme, ctx: &AppContext, area: Rect);
    fn get_title(&self) -> &'static str;
    fn get_status(&self, theme: &Theme) -> Option<Line<'static>>;
    fn get_key_bindings(&self) -> Vec<(KeyBinding, String)>;
}

/// Runs one page: routes events to it, executes its commands and renders it
pub struct Runtime<A: App> {
    state: A::State,

    /// Click targets from the last render
    registry: InteractionRegistry<A::Msg>,

    /// Focusable widgets from the last render
    focus_registry: FocusRegistry<A::Msg>,

    focused_id: Option<FocusId>,

    /// Focus requested before the widget was rendered
    pending_focus: Option<FocusId>,

    key_subscriptions: HashMap<KeyBinding, A::Msg>,

    /// Results of spawned `Perform` futures
    sender: mpsc::UnboundedSender<A::Msg>,
    receiver: mpsc::UnboundedReceiver<A::Msg>,
    in_flight: usize,

    effects: Vec<Effect>,
}

impl<A: App> Runtime<A> {
    pub fn new(ctx: &AppContext) -> Self {
        let (state, init_command) = A::init(ctx);
        let (sender, receiver) = mpsc::unbounded_channel();

        let mut runtime = Self {
            state,
            registry: InteractionRegistry::new(),
            focus_registry: FocusRegistry::new(),
            focused_id: None,
            pending_focus: None,
            key_subscriptions: HashMap::new(),
            sender,
            receiver,
            in_flight: 0,
            effects: Vec::new(),
        };

        runtime.update_subscriptions();
        runtime.execute_command(init_command);
        runtime
    }

    pub fn state(&self) -> &A::State {
        &self.state
    }

    pub fn focused_id(&self) -> Option<&FocusId> {
        self.focused_id.as_ref()
    }

    /// Run one message through `update` and execute the result
    pub fn dispatch(&mut self, msg: A::Msg, ctx: &AppContext) {
        let command = A::update(&mut self.state, msg, ctx);
        self.execute_command(command);
        self.update_subscriptions();
    }

    fn update_subscriptions(&mut self) {
        self.key_subscriptions.clear();
        for subscription in A::subscriptions(&self.state) {
            match subscription {
                Subscription::Keyboard { key, msg, .. } => {
                    self.key_subscriptions.insert(key, msg);
                }
            }
        }
    }

    fn execute_command(&mut self, command: Command<A::Msg>) {
        match command {
            Command::None => {}
            Command::Batch(commands) => {
                for command in commands {
                    self.execute_command(command);
                }
            }
            Command::Navigate(route) => self.effects.push(Effect::Navigate(route)),
            Command::Notify(notice) => self.effects.push(Effect::Notify(notice)),
            Command::SignOut => self.effects.push(Effect::SignOut),
            Command::Quit => self.effects.push(Effect::Quit),
            Command::SetFocus(id) => {
                if self.focus_registry.contains(&id) {
                    self.focused_id = Some(id);
                } else {
                    self.pending_focus = Some(id);
                }
            }
            Command::ClearFocus => {
                self.focused_id = None;
                self.pending_focus = None;
            }
            Command::Perform(future) => {
                self.in_flight += 1;
                let sender = self.sender.clone();
                tokio::spawn(async move {
                    let msg = future.await;
                    // The page may be gone by now; its result goes with it
                    let _ = sender.send(msg);
                });
            }
        }
    }

    /// Feed every finished async result back into `update`
    pub fn poll_async(&mut self, ctx: &AppContext) {
        while let Ok(msg) = self.receiver.try_recv() {
            self.in_flight = self.in_flight.saturating_sub(1);
            self.dispatch(msg, ctx);
        }
    }

    /// Wait until no spawned work is left, including work started by results
    pub async fn settle(&mut self, ctx: &AppContext) {
        while self.in_flight > 0 {
            match self.receiver.recv().await {
                Some(msg) => {
                    self.in_flight -= 1;
                    self.dispatch(msg, ctx);
                }
                None => break,
            }
        }
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    pub fn take_effects(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.effects)
    }

    /// Keys go to the focused widget first, then to the page's subscriptions
    pub fn handle_key(&mut self, key_event: KeyEvent, ctx: &AppContext) -> bool {
        if let Some(focused) = self.focused_id.clone() {
            if let Some(info) = self.focus_registry.find(&focused) {
                if let DispatchTarget::AppMsg(msg) = (info.on_key)(key_event) {
                    self.dispatch(msg, ctx);
                    return true;
                }
            }
            if key_event.code == KeyCode::Esc {
                self.focused_id = None;
                return true;
            }
        }

        let binding = KeyBinding::from_event(&key_event);
        if let Some(msg) = self.key_subscriptions.get(&binding).cloned() {
            self.dispatch(msg, ctx);
            return true;
        }
        false
    }

    /// Clicking focuses the widget under the cursor and fires its handler
    pub fn handle_click(&mut self, column: u16, row: u16, ctx: &AppContext) -> bool {
        if let Some(id) = self.focus_registry.find_at_position(column, row) {
            self.focused_id = Some(id);
        }
        match self.registry.find_click(column, row) {
            Some(msg) => {
                self.dispatch(msg, ctx);
                true
            }
            None => false,
        }
    }

    pub fn focus_next(&mut self) {
        self.focused_id = self.focus_registry.next_focus(self.focused_id.as_ref());
    }

    pub fn focus_previous(&mut self) {
        self.focused_id = self.focus_registry.prev_focus(self.focused_id.as_ref());
    }

    /// Focus a widget by id, deferring until it has been rendered
    pub fn focus(&mut self, id: impl Into<FocusId>) {
        self.execute_command(Command::SetFocus(id.into()));
    }

    pub fn render(&mut self, frame: &mut Frame, theme: &Theme, ctx: &AppContext, area: Rect) {
        self.registry.clear();
        self.focus_registry.clear();

        let element = A::view(&self.state, ctx, theme);
        Renderer::render(
            frame,
            theme,
            &mut self.registry,
            &mut self.focus_registry,
            self.focused_id.as_ref(),
            &element,
            area,
        );

        if let Some(pending) = self.pending_focus.take() {
            if self.focus_registry.contains(&pending) {
                self.focused_id = Some(pending);
            } else {
                self.pending_focus = Some(pending);
            }
        }
        // Drop focus that points at a widget no longer on screen
        if let Some(focused) = &self.focused_id {
            if !self.focus_registry.contains(focused) {
                self.focused_id = None;
            }
        }
    }

    pub fn get_key_bindings(&self) -> Vec<(KeyBinding, String)> {
        A::subscriptions(&self.state)
            .into_iter()
            .map(|subscription| match subscription {
                Subscription::Keyboard { key, description, .. } => (key, description),
            })
            .collect()
    }
}

impl<A: App> AppRuntime for Runtime<A> {
    fn handle_key(&mut self, key_event: KeyEvent, ctx: &AppContext) -> bool {
        Runtime::handle_key(self, key_event, ctx)
    }

    fn handle_click(&mut self, column: u16, row: u16, ctx: &AppContext) -> bool {
        Runtime::handle_click(self, column, row, ctx)
    }

    fn focus_next(&mut self) {
        Runtime::focus_next(self)
    }

    fn focus_previous(&mut self) {
        Runtime::focus_previous(self)
    }

    fn poll_async(&mut self, ctx: &AppContext) {
        Runtime::poll_async(self, ctx)
    }

    fn in_flight(&self) -> usize {
        self.in_flight
    }

    fn take_effects(&mut self) -> Vec<Effect> {
        Runtime::take_effects(self)
    }

    fn render_to_area(&mut self, frame: &mut Frame, theme: &Theme, ctx: &AppContext, area: Rect) {
        self.render(frame, theme, ctx, area)
    }

    fn get_title(&self) -> &'static str {
        A::title()
    }

    fn get_status(&self, theme: &Theme) -> Option<Line<'static>> {
        A::status(&self.state, theme)
    }

    fn get_key_bindings(&self) -> Vec<(KeyBinding, String)> {
        Runtime::get_key_bindings(self)
    }
}
