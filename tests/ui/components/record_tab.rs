use crate::support::{entity, raw_key};
use crossterm::event::KeyCode;
use graphdesk::backend::{ApprovalDecision, BackendError, Record, RecordDraft, ResourceKind};
use graphdesk::ui::components::tabs::{Capabilities, RecordMode, RecordTab};
use graphdesk::ui::components::TabId;
use graphdesk::ui::core::{Action, Effect, TabComponent, TabTarget};

fn loaded(kind: ResourceKind, records: Vec<Record>) -> Action {
    Action::RecordsLoaded {
        kind,
        result: Ok(records),
    }
}

fn entities_tab() -> RecordTab {
    let mut tab = RecordTab::new(TabId::Entities, ResourceKind::Entity, Capabilities::editable());
    tab.init();
    tab.handle_result(&loaded(
        ResourceKind::Entity,
        vec![entity("e-1", "Ada"), entity("e-2", "Babbage"), entity("e-3", "Curie")],
    ));
    tab
}

fn type_keys(tab: &mut RecordTab, text: &str) -> Vec<Effect> {
    text.chars()
        .filter_map(|c| tab.handle_key(raw_key(KeyCode::Char(c))))
        .collect()
}

#[test]
fn test_init_loads_own_kind() {
    let mut tab = RecordTab::new(TabId::Jobs, ResourceKind::Job, Capabilities::creatable());
    assert_eq!(tab.init(), Some(Effect::LoadRecords(ResourceKind::Job)));
    assert!(tab.is_loading());

    tab.handle_result(&loaded(ResourceKind::Entity, vec![entity("e-1", "Ada")]));
    assert!(tab.is_loading());
    assert!(tab.records().is_empty());

    tab.handle_result(&loaded(ResourceKind::Job, vec![entity("j-1", "Reindex")]));
    assert!(!tab.is_loading());
    assert_eq!(tab.records().len(), 1);
}

#[test]
fn test_root_tracks_selection() {
    let mut tab = entities_tab();
    assert!(tab.is_at_root());

    tab.handle_key(raw_key(KeyCode::Char('j')));
    assert_eq!(tab.selected(), 1);
    assert!(!tab.is_at_root());

    tab.handle_key(raw_key(KeyCode::Up));
    assert!(tab.is_at_root());
}

#[test]
fn test_selection_clamped_when_list_shrinks() {
    let mut tab = entities_tab();
    tab.handle_key(raw_key(KeyCode::Down));
    tab.handle_key(raw_key(KeyCode::Down));
    tab.handle_key(raw_key(KeyCode::Down));
    assert_eq!(tab.selected(), 2);

    tab.handle_result(&loaded(ResourceKind::Entity, vec![entity("e-1", "Ada")]));
    assert_eq!(tab.selected(), 0);
}

#[test]
fn test_filter_narrows_list_and_captures_text() {
    let mut tab = entities_tab();
    tab.handle_key(raw_key(KeyCode::Char('f')));
    assert!(tab.captures_text());
    type_keys(&mut tab, "bab");
    let visible: Vec<&str> = tab.visible_records().iter().map(|r| r.id.as_str()).collect();
    assert_eq!(visible, vec!["e-2"]);

    tab.handle_key(raw_key(KeyCode::Enter));
    assert_eq!(*tab.mode(), RecordMode::List);
    assert!(!tab.captures_text());
    assert_eq!(tab.visible_records().len(), 1);

    tab.handle_key(raw_key(KeyCode::Esc));
    assert_eq!(tab.visible_records().len(), 3);
}

#[test]
fn test_enter_opens_detail_and_back_returns() {
    let mut tab = entities_tab();
    tab.handle_key(raw_key(KeyCode::Down));
    tab.handle_key(raw_key(KeyCode::Enter));
    assert_eq!(*tab.mode(), RecordMode::Detail("e-2".to_string()));
    assert!(!tab.is_at_root());

    assert_eq!(
        tab.handle_key(raw_key(KeyCode::Char('r'))),
        Some(Effect::FetchRecord {
            kind: ResourceKind::Entity,
            id: "e-2".to_string()
        })
    );
    tab.handle_key(raw_key(KeyCode::Esc));
    assert_eq!(*tab.mode(), RecordMode::List);
}

#[test]
fn test_create_requires_title() {
    let mut tab = entities_tab();
    tab.handle_key(raw_key(KeyCode::Char('n')));
    assert!(tab.captures_text());
    assert!(!tab.has_unsaved_work());

    assert_eq!(tab.handle_key(raw_key(KeyCode::Enter)), None);
    match tab.mode() {
        RecordMode::Form(form) => assert_eq!(form.error.as_deref(), Some("Title is required")),
        other => panic!("expected form, got {other:?}"),
    }

    type_keys(&mut tab, "Dijkstra");
    tab.handle_key(raw_key(KeyCode::Tab));
    type_keys(&mut tab, "shortest paths");
    assert!(tab.has_unsaved_work());

    assert_eq!(
        tab.handle_key(raw_key(KeyCode::Enter)),
        Some(Effect::CreateRecord {
            kind: ResourceKind::Entity,
            draft: RecordDraft {
                title: "Dijkstra".to_string(),
                summary: "shortest paths".to_string(),
            },
        })
    );
    // Submitting form ignores further input
    assert_eq!(tab.handle_key(raw_key(KeyCode::Enter)), None);
}

#[test]
fn test_saved_record_opens_detail() {
    let mut tab = entities_tab();
    tab.handle_key(raw_key(KeyCode::Char('n')));
    type_keys(&mut tab, "Turing");
    tab.handle_key(raw_key(KeyCode::Enter));

    tab.handle_result(&Action::RecordCreated {
        kind: ResourceKind::Entity,
        result: Ok(entity("e-9", "Turing")),
    });
    assert_eq!(*tab.mode(), RecordMode::Detail("e-9".to_string()));
    assert_eq!(tab.records()[0].id, "e-9");
    assert!(!tab.has_unsaved_work());
}

#[test]
fn test_failed_save_keeps_form_open() {
    let mut tab = entities_tab();
    tab.handle_key(raw_key(KeyCode::Char('n')));
    type_keys(&mut tab, "Turing");
    tab.handle_key(raw_key(KeyCode::Enter));

    tab.handle_result(&Action::RecordCreated {
        kind: ResourceKind::Entity,
        result: Err(BackendError::new("INVALID_DATA", "title already taken")),
    });
    match tab.mode() {
        RecordMode::Form(form) => {
            assert!(!form.submitting);
            assert_eq!(form.error.as_deref(), Some("title already taken"));
            assert_eq!(form.title, "Turing");
        }
        other => panic!("expected form, got {other:?}"),
    }
}

#[test]
fn test_edit_prefills_and_updates() {
    let mut tab = entities_tab();
    tab.handle_key(raw_key(KeyCode::Enter));
    tab.handle_key(raw_key(KeyCode::Char('e')));
    assert!(!tab.has_unsaved_work());

    type_keys(&mut tab, " L.");
    assert!(tab.has_unsaved_work());
    assert_eq!(
        tab.handle_key(raw_key(KeyCode::Enter)),
        Some(Effect::UpdateRecord {
            kind: ResourceKind::Entity,
            id: "e-1".to_string(),
            draft: RecordDraft {
                title: "Ada L.".to_string(),
                summary: String::new(),
            },
        })
    );
}

#[test]
fn test_cancel_edit_returns_to_detail() {
    let mut tab = entities_tab();
    tab.handle_key(raw_key(KeyCode::Enter));
    tab.handle_key(raw_key(KeyCode::Char('e')));
    tab.handle_key(raw_key(KeyCode::Esc));
    assert_eq!(*tab.mode(), RecordMode::Detail("e-1".to_string()));
}

#[test]
fn test_read_only_tab_ignores_create_and_edit() {
    let mut tab = RecordTab::new(TabId::Logs, ResourceKind::Log, Capabilities::read_only());
    tab.handle_result(&loaded(ResourceKind::Log, vec![entity("l-1", "boot")]));

    tab.handle_key(raw_key(KeyCode::Char('n')));
    assert_eq!(*tab.mode(), RecordMode::List);
    assert_eq!(tab.navigate(TabTarget::Create), None);
    assert_eq!(*tab.mode(), RecordMode::List);

    tab.handle_key(raw_key(KeyCode::Enter));
    tab.handle_key(raw_key(KeyCode::Char('e')));
    assert_eq!(*tab.mode(), RecordMode::Detail("l-1".to_string()));

    tab.handle_key(raw_key(KeyCode::Char('a')));
    assert_eq!(*tab.mode(), RecordMode::Detail("l-1".to_string()));
}

#[test]
fn test_approval_confirm_flow() {
    let mut tab = RecordTab::new(TabId::Inbox, ResourceKind::Approval, Capabilities::approvals());
    tab.handle_result(&loaded(ResourceKind::Approval, vec![entity("ap-1", "Merge Ada")]));

    tab.handle_key(raw_key(KeyCode::Char('a')));
    assert_eq!(
        *tab.mode(),
        RecordMode::Confirm {
            id: "ap-1".to_string(),
            decision: ApprovalDecision::Approve,
        }
    );
    assert_eq!(tab.handle_key(raw_key(KeyCode::Char('n'))), None);
    assert_eq!(*tab.mode(), RecordMode::List);

    tab.handle_key(raw_key(KeyCode::Char('x')));
    assert_eq!(
        tab.handle_key(raw_key(KeyCode::Char('y'))),
        Some(Effect::DecideApproval {
            id: "ap-1".to_string(),
            decision: ApprovalDecision::Reject,
        })
    );

    let mut decided = entity("ap-1", "Merge Ada");
    decided.status = Some("rejected".to_string());
    tab.handle_result(&Action::ApprovalDecided {
        decision: ApprovalDecision::Reject,
        result: Ok(decided),
    });
    assert_eq!(tab.records()[0].status.as_deref(), Some("rejected"));
}

#[test]
fn test_navigate_detail_fetches_fresh_copy() {
    let mut tab = RecordTab::new(TabId::Entities, ResourceKind::Entity, Capabilities::editable());
    assert_eq!(
        tab.navigate(TabTarget::Detail(entity("e-5", "Hopper"))),
        Some(Effect::FetchRecord {
            kind: ResourceKind::Entity,
            id: "e-5".to_string()
        })
    );
    assert_eq!(*tab.mode(), RecordMode::Detail("e-5".to_string()));
    assert_eq!(tab.records()[0].title, "Hopper");

    tab.navigate(TabTarget::Root);
    assert!(tab.is_at_root());
}
