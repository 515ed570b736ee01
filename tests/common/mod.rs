//! Shared helpers for the integration tests

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use hseit_risk::api::{BearerToken, MemoryBackend};
use hseit_risk::auth::SessionContext;
use hseit_risk::tui::{MultiAppRuntime, Route};
use ratatui::{Terminal, backend::TestBackend};

pub const PASSWORD: &str = "segredo1";

/// Session over `backend`, already initialized (signed out)
pub async fn session(backend: &MemoryBackend) -> Arc<SessionContext> {
    let session = SessionContext::new(Arc::new(backend.clone()), BearerToken::new());
    session.init().await;
    Arc::new(session)
}

/// Session signed in as a fresh user, optionally granted the admin role
pub async fn signed_in(backend: &MemoryBackend, email: &str, admin: bool) -> Arc<SessionContext> {
    let user = backend.add_user(email, PASSWORD, "Ana Souza", "ACME");
    if admin {
        backend.grant_role(&user.id, "admin");
    }
    let session = session(backend).await;
    session
        .sign_in(email, PASSWORD)
        .await
        .expect("sign in with seeded account");
    session
}

pub fn open(backend: &MemoryBackend, session: Arc<SessionContext>, path: &str) -> MultiAppRuntime {
    MultiAppRuntime::new(session, Arc::new(backend.clone()), Route::parse(path))
}

/// Tick until the guard has decided and the page has no work running
pub async fn settle(runtime: &mut MultiAppRuntime) {
    for _ in 0..400 {
        runtime.tick();
        if !runtime.is_waiting() && runtime.page_in_flight() == 0 {
            // One more round for effects produced by the last results
            tokio::time::sleep(Duration::from_millis(2)).await;
            runtime.tick();
            if !runtime.is_waiting() && runtime.page_in_flight() == 0 {
                return;
            }
        }
        tokio::time::sleep(Duration::from_millis(2)).await;
    }
    panic!("runtime did not settle at {}", runtime.route());
}

pub fn terminal() -> Terminal<TestBackend> {
    Terminal::new(TestBackend::new(120, 40)).expect("test terminal")
}

pub fn draw(runtime: &mut MultiAppRuntime, terminal: &mut Terminal<TestBackend>) {
    terminal.draw(|frame| runtime.render(frame)).expect("draw");
}

/// Press a key, let the resulting work finish and redraw
pub async fn press(runtime: &mut MultiAppRuntime, terminal: &mut Terminal<TestBackend>, code: KeyCode) {
    press_with(runtime, terminal, code, KeyModifiers::NONE).await;
}

pub async fn press_with(
    runtime: &mut MultiAppRuntime,
    terminal: &mut Terminal<TestBackend>,
    code: KeyCode,
    modifiers: KeyModifiers,
) {
    runtime.handle_key(KeyEvent::new(code, modifiers));
    settle(runtime).await;
    draw(runtime, terminal);
}

pub fn screen_text(terminal: &Terminal<TestBackend>) -> String {
    let buffer = terminal.backend().buffer();
    buffer.content().iter().map(|cell| cell.symbol()).collect()
}
