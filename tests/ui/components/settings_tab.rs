use crate::support::{raw_key, session};
use crossterm::event::KeyCode;
use graphdesk::backend::{BackendError, Credentials};
use graphdesk::ui::components::tabs::SettingsTab;
use graphdesk::ui::core::{Action, Effect, TabComponent};

#[test]
fn test_relogin_request_is_guarded() {
    let mut tab = SettingsTab::new(session());
    assert_eq!(tab.handle_key(raw_key(KeyCode::Char('x'))), None);

    assert_eq!(
        tab.handle_key(raw_key(KeyCode::Char('r'))),
        Some(Effect::Relogin {
            username: "ada".to_string()
        })
    );
    assert!(tab.is_relogin_pending());
    assert_eq!(tab.handle_key(raw_key(KeyCode::Char('r'))), None);
}

#[test]
fn test_relogin_needs_username() {
    let mut session = session();
    session.username = "  ".to_string();
    let mut tab = SettingsTab::new(session);

    assert_eq!(tab.handle_key(raw_key(KeyCode::Char('r'))), None);
    assert!(!tab.is_relogin_pending());
    assert!(tab.message().is_some_and(|m| m.contains("server.username")));
}

#[test]
fn test_relogin_result_updates_session() {
    let mut tab = SettingsTab::new(session());
    tab.handle_key(raw_key(KeyCode::Char('r')));

    tab.handle_result(&Action::ReloginCompleted(Ok(Credentials {
        username: "ada".to_string(),
        api_key: "rotated".to_string(),
    })));
    assert!(!tab.is_relogin_pending());
    assert_eq!(tab.session().api_key, "rotated");
    assert_eq!(tab.message(), Some("Signed in as ada"));
}

#[test]
fn test_relogin_failure_reported() {
    let mut tab = SettingsTab::new(session());
    tab.handle_key(raw_key(KeyCode::Char('r')));
    tab.handle_result(&Action::ReloginCompleted(Err(BackendError::new("UNAUTHORIZED", "bad password"))));

    assert!(!tab.is_relogin_pending());
    assert_eq!(tab.session().api_key, "test-key");
    assert_eq!(tab.message(), Some("Re-login failed: bad password"));
    assert!(tab.is_at_root());
}
