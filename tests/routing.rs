//! Page guards and global keys, driven through the multi-page runtime

mod common;

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use hseit_risk::api::{BearerToken, MemoryBackend};
use hseit_risk::auth::SessionContext;
use hseit_risk::tui::{MultiAppRuntime, Route};
use std::sync::Arc;

#[tokio::test]
async fn test_waits_while_session_is_loading() -> Result<()> {
    let backend = MemoryBackend::new();
    let session = Arc::new(SessionContext::new(Arc::new(backend.clone()), BearerToken::new()));
    let mut runtime = MultiAppRuntime::new(session, Arc::new(backend.clone()), Route::Dashboard);

    assert!(runtime.is_waiting());
    assert_eq!(runtime.route(), &Route::Dashboard);

    common::settle(&mut runtime).await;
    assert_eq!(runtime.route(), &Route::Auth);
    Ok(())
}

#[tokio::test]
async fn test_signed_out_user_is_sent_to_auth() -> Result<()> {
    let backend = MemoryBackend::new();
    let session = common::session(&backend).await;

    for path in ["/dashboard", "/welcome", "/iniciar-questionario", "/cadastrar-areas"] {
        let mut runtime = common::open(&backend, session.clone(), path);
        common::settle(&mut runtime).await;
        assert_eq!(runtime.route(), &Route::Auth, "from {}", path);
    }
    Ok(())
}

#[tokio::test]
async fn test_non_admin_fallbacks() -> Result<()> {
    let backend = MemoryBackend::new();
    let session = common::signed_in(&backend, "ana@acme.com", false).await;

    let mut areas = common::open(&backend, session.clone(), "/cadastrar-areas");
    assert!(areas.is_waiting());
    common::settle(&mut areas).await;
    assert_eq!(areas.route(), &Route::Dashboard);

    let mut results = common::open(&backend, session, "/resultados");
    common::settle(&mut results).await;
    assert_eq!(results.route(), &Route::Welcome);
    Ok(())
}

#[tokio::test]
async fn test_admin_reaches_gated_pages() -> Result<()> {
    let backend = MemoryBackend::new();
    let session = common::signed_in(&backend, "admin@acme.com", true).await;

    let mut runtime = common::open(&backend, session, "/cadastrar-areas");
    common::settle(&mut runtime).await;
    assert_eq!(runtime.route(), &Route::AreaRegistry);
    assert_eq!(runtime.page_title(), Some("Cadastrar Áreas"));
    assert_eq!(runtime.role().is_admin(), Some(true));
    Ok(())
}

#[tokio::test]
async fn test_signed_in_user_skips_auth_page() -> Result<()> {
    let backend = MemoryBackend::new();
    let session = common::signed_in(&backend, "ana@acme.com", false).await;

    let mut runtime = common::open(&backend, session, "/auth");
    common::settle(&mut runtime).await;
    assert_eq!(runtime.route(), &Route::Dashboard);
    Ok(())
}

#[tokio::test]
async fn test_unknown_path_opens_not_found() -> Result<()> {
    let backend = MemoryBackend::new();
    let session = common::session(&backend).await;

    let mut runtime = common::open(&backend, session, "/relatorios");
    common::settle(&mut runtime).await;
    assert_eq!(runtime.route(), &Route::NotFound("/relatorios".to_string()));
    assert_eq!(runtime.page_title(), Some("Não encontrado"));
    Ok(())
}

#[tokio::test]
async fn test_sign_out_key_returns_to_landing() -> Result<()> {
    let backend = MemoryBackend::new();
    let session = common::signed_in(&backend, "ana@acme.com", false).await;

    let mut runtime = common::open(&backend, session.clone(), "/welcome");
    common::settle(&mut runtime).await;
    assert_eq!(runtime.route(), &Route::Welcome);

    runtime.handle_key(KeyEvent::new(KeyCode::Char('l'), KeyModifiers::CONTROL));
    for _ in 0..100 {
        runtime.tick();
        if runtime.route() == &Route::Landing {
            break;
        }
        tokio::time::sleep(std::time::Duration::from_millis(2)).await;
    }

    assert_eq!(runtime.route(), &Route::Landing);
    assert!(session.current_user().is_none());
    assert!(runtime.notices().any(|notice| notice.message == "Sessão encerrada"));
    Ok(())
}

#[tokio::test]
async fn test_quit_key() -> Result<()> {
    let backend = MemoryBackend::new();
    let session = common::session(&backend).await;
    let mut runtime = common::open(&backend, session, "/");
    common::settle(&mut runtime).await;

    assert!(!runtime.handle_key(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL)));
    assert!(runtime.should_quit());
    Ok(())
}
