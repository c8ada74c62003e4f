use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};
use graphdesk::ui::core::event_handler::translate;
use graphdesk::ui::core::AppEvent;

fn key_with_kind(kind: KeyEventKind) -> Event {
    Event::Key(KeyEvent {
        code: KeyCode::Char('a'),
        modifiers: KeyModifiers::NONE,
        kind,
        state: KeyEventState::NONE,
    })
}

#[test]
fn test_only_key_presses_are_forwarded() {
    assert!(matches!(
        translate(key_with_kind(KeyEventKind::Press)),
        Some(AppEvent::Key(key)) if key.code == KeyCode::Char('a')
    ));
    assert!(translate(key_with_kind(KeyEventKind::Release)).is_none());
    assert!(translate(key_with_kind(KeyEventKind::Repeat)).is_none());
}

#[test]
fn test_resize_and_other_events() {
    assert!(matches!(translate(Event::Resize(80, 24)), Some(AppEvent::Resize(80, 24))));
    assert!(translate(Event::FocusGained).is_none());
    assert!(translate(Event::Paste("text".to_string())).is_none());
}
