use crate::support::{app, ch, entity, key, task, type_text};
use crossterm::event::KeyCode;
use graphdesk::backend::{BackendError, ResourceKind};
use graphdesk::ui::components::TabId;
use graphdesk::ui::core::Action;
use graphdesk::ui::AppComponent;
use ratatui::{backend::TestBackend, Terminal};

fn screen(app: &mut AppComponent, width: u16, height: u16) -> String {
    let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    terminal.draw(|f| app.render(f)).unwrap();
    let buffer = terminal.backend().buffer().clone();
    let mut text = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            text.push_str(buffer[(x, y)].symbol());
        }
        text.push('\n');
    }
    text
}

#[test]
fn test_tab_bar_lists_every_tab() {
    let mut app = app();
    let text = screen(&mut app, 160, 30);
    for title in ["1 Inbox", "2 Entities", "4 Knowledge", "9 History", "0 Search", "- Settings"] {
        assert!(text.contains(title), "missing tab {title}");
    }
}

#[test]
fn test_tab_hotkeys_match_tab_order() {
    for id in TabId::ALL {
        assert_eq!(TabId::from_hotkey(id.hotkey()), Some(id));
    }
}

#[test]
fn test_records_render_in_list() {
    let mut app = app();
    app.update(ch('2'));
    app.update(task(Action::RecordsLoaded {
        kind: ResourceKind::Entity,
        result: Ok(vec![entity("e-1", "Ada Lovelace")]),
    }));
    assert!(screen(&mut app, 120, 30).contains("Ada Lovelace"));
}

#[test]
fn test_error_banner_preempts_hints() {
    let mut app = app();
    app.update(task(Action::RecordsLoaded {
        kind: ResourceKind::Approval,
        result: Err(BackendError::new("FORBIDDEN", "missing scope: admin")),
    }));
    let text = screen(&mut app, 160, 30);
    assert!(text.contains("missing scope: admin"));
    assert!(text.contains("re-login"));
}

#[test]
fn test_recovery_command_shown_on_request() {
    let mut app = app();
    app.update(task(Action::RecordsLoaded {
        kind: ResourceKind::Approval,
        result: Err(BackendError::new("FORBIDDEN", "missing scope: admin")),
    }));
    let command = "graphdesk login --username ada --server http://localhost:8765";
    assert!(!screen(&mut app, 160, 30).contains(command));

    app.update(ch('c'));
    let text = screen(&mut app, 160, 30);
    assert!(text.contains(command));
    assert!(!text.contains("missing scope: admin"));
}

#[test]
fn test_overlays_render_without_panicking() {
    let mut app = app();
    app.update(ch('/'));
    type_text(&mut app, "go");
    assert!(screen(&mut app, 100, 30).contains("Command palette"));
    app.update(key(KeyCode::Esc));

    app.update(ch('?'));
    screen(&mut app, 100, 30);
    app.update(key(KeyCode::Esc));

    app.update(ch('/'));
    type_text(&mut app, "export");
    app.update(key(KeyCode::Enter));
    screen(&mut app, 100, 30);
    app.update(key(KeyCode::Esc));

    app.update(ch('/'));
    type_text(&mut app, "quickstart");
    app.update(key(KeyCode::Enter));
    assert!(screen(&mut app, 100, 30).contains("Create an entity"));
}

#[test]
fn test_tiny_terminal_does_not_panic() {
    let mut app = app();
    app.start();
    screen(&mut app, 10, 4);
    app.update(ch('?'));
    screen(&mut app, 10, 4);
}
