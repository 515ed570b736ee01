use std::sync::Arc;
use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use tokio::sync::mpsc;

use crate::api::TableClient;
use crate::auth::{RoleInfo, RoleStatus, SessionContext, lookup_role};
use crate::tui::apps;
use crate::tui::guard::{GuardDecision, evaluate};
use crate::tui::notice::{Notice, NoticeLevel, Notices};
use crate::tui::route::Route;
use crate::tui::runtime::{AppRuntime, Effect};
use crate::tui::{AppContext, Theme};

/// Guard redirects allowed in one navigation before giving up
const MAX_REDIRECTS: usize = 4;

/// Results of background work owned by the router rather than a page
enum Signal {
    Role { user_id: String, info: RoleInfo },
    SignedOut,
}

/// Hosts the current page: applies the route's guard, resolves the user's
/// role, shows notices and handles the global keys
pub struct MultiAppRuntime {
    session: Arc<SessionContext>,
    client: Arc<dyn TableClient>,
    theme: Theme,

    route: Route,
    page: Option<Box<dyn AppRuntime>>,

    role: RoleStatus,
    /// User the current role belongs to (or is being fetched for)
    role_user: Option<String>,

    signal_tx: mpsc::UnboundedSender<Signal>,
    signal_rx: mpsc::UnboundedReceiver<Signal>,

    notices: Notices,
    quit: bool,
}

impl MultiAppRuntime {
    /// Starts at `initial`; a session still `Loading` is initialized in the background
    pub fn new(session: Arc<SessionContext>, client: Arc<dyn TableClient>, initial: Route) -> Self {
        if session.state().is_loading() {
            let session = session.clone();
            tokio::spawn(async move {
                session.init().await;
            });
        }

        let (signal_tx, signal_rx) = mpsc::unbounded_channel();
        let mut runtime = Self {
            session,
            client,
            theme: Theme::default(),
            route: initial.clone(),
            page: None,
            role: RoleStatus::Loading,
            role_user: None,
            signal_tx,
            signal_rx,
            notices: Notices::new(),
            quit: false,
        };
        runtime.navigate(initial);
        runtime
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn role(&self) -> &RoleStatus {
        &self.role
    }

    /// No page is open because the guard is still waiting
    pub fn is_waiting(&self) -> bool {
        self.page.is_none()
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn notices(&self) -> impl Iterator<Item = &Notice> {
        self.notices.visible()
    }

    pub fn page_title(&self) -> Option<&'static str> {
        self.page.as_ref().map(|page| page.get_title())
    }

    /// Spawned work still running in the current page
    pub fn page_in_flight(&self) -> usize {
        self.page.as_ref().map(|page| page.in_flight()).unwrap_or(0)
    }

    fn context(&self) -> AppContext {
        AppContext {
            session: self.session.clone(),
            client: self.client.clone(),
            role: self.role.clone(),
            route: self.route.clone(),
        }
    }

    pub fn navigate(&mut self, route: Route) {
        log::info!("Navigating to {}", route);
        self.route = route;
        self.page = None;
        self.open_page();
    }

    /// Create the page for the current route once its guard allows it
    fn open_page(&mut self) {
        self.sync_role();

        for _ in 0..MAX_REDIRECTS {
            let decision = evaluate(&self.route.policy(), &self.session.state(), &self.role);
            match decision {
                GuardDecision::Allow => {
                    let ctx = self.context();
                    self.page = Some(apps::create(&self.route, &ctx));
                    self.process_effects();
                    return;
                }
                GuardDecision::Wait => return,
                GuardDecision::Redirect(target) => {
                    log::info!("Access to {} redirected to {}", self.route, target);
                    self.route = target;
                }
            }
        }
        log::error!("Too many redirects, stopping at {}", self.route);
    }

    /// Start a role lookup whenever the signed-in user changes
    fn sync_role(&mut self) {
        let user_id = self.session.current_user().map(|user| user.id);
        if user_id == self.role_user {
            return;
        }
        self.role_user = user_id.clone();

        match user_id {
            Some(user_id) => {
                self.role = RoleStatus::Loading;
                let client = self.client.clone();
                let tx = self.signal_tx.clone();
                tokio::spawn(async move {
                    let info = lookup_role(client.as_ref(), &user_id).await;
                    let _ = tx.send(Signal::Role { user_id, info });
                });
            }
            None => self.role = RoleStatus::Resolved(RoleInfo::none()),
        }
    }

    /// Per-frame housekeeping: background results, guard re-checks, notice expiry
    pub fn tick(&mut self) {
        while let Ok(signal) = self.signal_rx.try_recv() {
            match signal {
                Signal::Role { user_id, info } => {
                    if self.role_user.as_deref() == Some(user_id.as_str()) {
                        self.role = RoleStatus::Resolved(info);
                    }
                }
                Signal::SignedOut => {
                    self.notices.push(Notice::info("Sessão encerrada"));
                    self.navigate(Route::Landing);
                }
            }
        }

        self.sync_role();
        if self.page.is_none() {
            self.open_page();
        }

        let ctx = self.context();
        if let Some(page) = self.page.as_mut() {
            page.poll_async(&ctx);
        }
        self.process_effects();
        self.notices.expire(Instant::now());
    }

    fn process_effects(&mut self) {
        // Effects can navigate, which replaces the page; drain in rounds
        loop {
            let effects = match self.page.as_mut() {
                Some(page) => page.take_effects(),
                None => return,
            };
            if effects.is_empty() {
                return;
            }
            for effect in effects {
                match effect {
                    Effect::Notify(notice) => self.notices.push(notice),
                    Effect::Navigate(route) => self.navigate(route),
                    Effect::SignOut => self.sign_out(),
                    Effect::Quit => self.quit = true,
                }
            }
        }
    }

    fn sign_out(&mut self) {
        if self.session.current_user().is_none() {
            return;
        }
        let session = self.session.clone();
        let tx = self.signal_tx.clone();
        tokio::spawn(async move {
            if let Err(e) = session.sign_out().await {
                log::error!("Sign out failed: {:#}", e);
            }
            let _ = tx.send(Signal::SignedOut);
        });
    }

    /// Returns false once the app should exit
    pub fn handle_key(&mut self, key_event: KeyEvent) -> bool {
        let ctrl = key_event.modifiers.contains(KeyModifiers::CONTROL);
        match key_event.code {
            KeyCode::Char('q') if ctrl => {
                self.quit = true;
            }
            KeyCode::Char('l') if ctrl => self.sign_out(),
            KeyCode::Char('h') if ctrl => {
                let home = if self.session.current_user().is_some() {
                    Route::Dashboard
                } else {
                    Route::Landing
                };
                self.navigate(home);
            }
            KeyCode::Tab => {
                if let Some(page) = self.page.as_mut() {
                    page.focus_next();
                }
            }
            KeyCode::BackTab => {
                if let Some(page) = self.page.as_mut() {
                    page.focus_previous();
                }
            }
            _ => {
                let ctx = self.context();
                if let Some(page) = self.page.as_mut() {
                    page.handle_key(key_event, &ctx);
                }
            }
        }
        self.process_effects();
        !self.quit
    }

    pub fn handle_click(&mut self, column: u16, row: u16) {
        let ctx = self.context();
        if let Some(page) = self.page.as_mut() {
            page.handle_click(column, row, &ctx);
        }
        self.process_effects();
    }

    pub fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();
        let notice_height = self.notices.len() as u16;
        let [header, body, notices, footer] = Layout::vertical([
            Constraint::Length(2),
            Constraint::Fill(1),
            Constraint::Length(notice_height),
            Constraint::Length(1),
        ])
        .areas(area);

        self.render_header(frame, header);

        let ctx = self.context();
        match self.page.as_mut() {
            Some(page) => page.render_to_area(frame, &self.theme, &ctx, body),
            None => self.render_waiting(frame, body),
        }

        self.render_notices(frame, notices);
        self.render_footer(frame, footer);
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let theme = &self.theme;
        let title = self.page_title().unwrap_or("Carregando");

        let mut left = vec![
            Span::styled(" HSE-IT ", Style::default().fg(theme.accent_primary).bold()),
            Span::styled("│ ", Style::default().fg(theme.border_primary)),
            Span::styled(title, Style::default().fg(theme.text_primary)),
        ];
        if let Some(status) = self.page.as_ref().and_then(|page| page.get_status(theme)) {
            left.push(Span::styled("  ", Style::default()));
            left.extend(status.spans);
        }

        let right = match self.session.current_user() {
            Some(user) => {
                let mut spans = vec![Span::styled(
                    user.display_name().to_string(),
                    Style::default().fg(theme.text_secondary),
                )];
                if self.role.is_admin() == Some(true) {
                    spans.push(Span::styled(" (admin)", Style::default().fg(theme.accent_tertiary)));
                }
                spans.push(Span::raw(" "));
                Line::from(spans)
            }
            None => Line::from(Span::styled("Não autenticado ", theme.muted())),
        };

        let block = Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(theme.border_secondary));
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Paragraph::new(Line::from(left)), inner);
        frame.render_widget(Paragraph::new(right).alignment(Alignment::Right), inner);
    }

    fn render_waiting(&self, frame: &mut Frame, area: Rect) {
        let message = if self.session.state().is_loading() {
            "Carregando sessão..."
        } else {
            "Verificando permissões..."
        };
        let [_, middle, _] = Layout::vertical([Constraint::Fill(1), Constraint::Length(1), Constraint::Fill(1)]).areas(area);
        frame.render_widget(
            Paragraph::new(message).style(self.theme.muted()).alignment(Alignment::Center),
            middle,
        );
    }

    fn render_notices(&self, frame: &mut Frame, area: Rect) {
        let theme = &self.theme;
        let lines: Vec<Line> = self
            .notices
            .visible()
            .map(|notice| {
                let (icon, color) = match notice.level {
                    NoticeLevel::Info => ("ℹ", theme.accent_info),
                    NoticeLevel::Success => ("✓", theme.accent_success),
                    NoticeLevel::Warning => ("!", theme.accent_warning),
                    NoticeLevel::Error => ("✗", theme.accent_error),
                };
                Line::from(vec![
                    Span::styled(format!(" {} ", icon), Style::default().fg(color).bold()),
                    Span::styled(notice.message.clone(), Style::default().fg(color)),
                ])
            })
            .collect();
        frame.render_widget(Paragraph::new(lines), area);
    }

    fn render_footer(&self, frame: &mut Frame, area: Rect) {
        let theme = &self.theme;
        let mut hints: Vec<(String, String)> = self
            .page
            .as_ref()
            .map(|page| {
                page.get_key_bindings()
                    .into_iter()
                    .map(|(key, description)| (key.label(), description))
                    .collect()
            })
            .unwrap_or_default();

        hints.push(("Tab".into(), "Navegar".into()));
        hints.push(("Ctrl+H".into(), "Início".into()));
        if self.session.current_user().is_some() {
            hints.push(("Ctrl+L".into(), "Sair".into()));
        }
        hints.push(("Ctrl+Q".into(), "Fechar".into()));

        let mut spans = vec![Span::raw(" ")];
        for (key, description) in hints {
            spans.push(Span::styled(key, theme.key_hint()));
            spans.push(Span::styled(format!(" {}  ", description), theme.muted()));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}
