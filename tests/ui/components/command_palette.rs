use crate::support::{entity, raw_key};
use crossterm::event::KeyCode;
use graphdesk::backend::BackendError;
use graphdesk::ui::components::command_palette::filter_catalog;
use graphdesk::ui::components::{PaletteCommand, PaletteOutcome, PaletteState, TabId};
use graphdesk::ui::core::{Effect, TabTarget};

fn type_into(palette: &mut PaletteState, text: &str) -> Vec<Effect> {
    text.chars()
        .filter_map(|c| match palette.handle_key(raw_key(KeyCode::Char(c))) {
            PaletteOutcome::Stay(effect) => effect,
            other => panic!("unexpected outcome {other:?}"),
        })
        .collect()
}

#[test]
fn test_catalog_order_and_size() {
    let all = filter_catalog("");
    assert_eq!(all.len(), 22);
    let labels: Vec<&str> = all.iter().take(11).map(|entry| entry.label.as_str()).collect();
    assert_eq!(
        labels,
        vec![
            "Go to Inbox",
            "Go to Entities",
            "Go to Relationships",
            "Go to Knowledge",
            "Go to Jobs",
            "Go to Logs",
            "Go to Files",
            "Go to Protocols",
            "Go to History",
            "Go to Search",
            "Go to Settings",
        ]
    );
    assert_eq!(all.last().map(|entry| entry.id.as_str()), Some("app:quit"));
}

#[test]
fn test_filter_is_case_insensitive_over_descriptions() {
    let ids: Vec<String> = filter_catalog("CSV").into_iter().map(|entry| entry.id).collect();
    assert_eq!(ids, vec!["modal:import", "modal:export"]);
    assert!(filter_catalog("zzz-no-match").is_empty());
}

#[test]
fn test_open_lists_full_catalog() {
    let palette = PaletteState::open();
    assert_eq!(palette.results, filter_catalog(""));
    assert_eq!(palette.selected, 0);
    assert!(!palette.is_entity_mode());
}

#[test]
fn test_selection_moves_within_results() {
    let mut palette = PaletteState::open();
    type_into(&mut palette, "new");
    let count = palette.results.len();
    assert!(count >= 2);

    for _ in 0..count + 3 {
        palette.handle_key(raw_key(KeyCode::Down));
    }
    assert_eq!(palette.selected, count - 1);
    palette.handle_key(raw_key(KeyCode::Up));
    assert_eq!(palette.selected, count - 2);

    // Editing the query resets the highlight
    palette.handle_key(raw_key(KeyCode::Backspace));
    assert_eq!(palette.selected, 0);
}

#[test]
fn test_execute_create_shortcut() {
    let mut palette = PaletteState::open();
    type_into(&mut palette, "new entity");
    assert_eq!(
        palette.handle_key(raw_key(KeyCode::Enter)),
        PaletteOutcome::Execute(PaletteCommand::SwitchTab {
            tab: TabId::Entities,
            target: Some(TabTarget::Create),
        })
    );
}

#[test]
fn test_enter_with_no_match_stays_open() {
    let mut palette = PaletteState::open();
    type_into(&mut palette, "nothing matches this");
    assert!(palette.results.is_empty());
    assert_eq!(palette.handle_key(raw_key(KeyCode::Enter)), PaletteOutcome::Stay(None));
    assert_eq!(palette.handle_key(raw_key(KeyCode::Esc)), PaletteOutcome::Close);
}

#[test]
fn test_entity_mode_search_requests() {
    let mut palette = PaletteState::open();
    let effects = type_into(&mut palette, ": ");
    assert!(effects.is_empty());
    assert!(palette.is_entity_mode());
    assert!(palette.results.is_empty());

    let effects = type_into(&mut palette, "bob ");
    assert_eq!(
        effects,
        vec![
            Effect::SearchEntities {
                query: "b".to_string(),
                limit: 15
            },
            Effect::SearchEntities {
                query: "bo".to_string(),
                limit: 15
            },
            Effect::SearchEntities {
                query: "bob".to_string(),
                limit: 15
            },
        ]
    );
    assert_eq!(palette.entity_query(), "bob");
    assert!(palette.searching);
}

#[test]
fn test_stale_entity_results_rejected() {
    let mut palette = PaletteState::open();
    type_into(&mut palette, ":ab");

    assert!(!palette.apply_entity_results("a", Ok(vec![entity("e-1", "Alpha")])));
    assert!(palette.results.is_empty());
    assert!(palette.searching);

    assert!(palette.apply_entity_results("ab", Ok(vec![entity("e-2", "Abby")])));
    assert!(!palette.searching);
    assert_eq!(palette.results.len(), 1);
    assert_eq!(palette.results[0].id, "entity:e-2");
    assert_eq!(palette.results[0].label, "Abby");
}

#[test]
fn test_entity_search_error_shown_inline() {
    let mut palette = PaletteState::open();
    type_into(&mut palette, ":x");
    assert!(palette.apply_entity_results("x", Err(BackendError::new("UNAVAILABLE", "server restarting"))));
    assert_eq!(palette.error.as_deref(), Some("server restarting"));
    assert!(palette.results.is_empty());
}

#[test]
fn test_leaving_entity_mode_restores_catalog() {
    let mut palette = PaletteState::open();
    type_into(&mut palette, ":q");
    palette.apply_entity_results("q", Ok(vec![entity("e-q", "Quentin")]));

    palette.handle_key(raw_key(KeyCode::Backspace));
    assert!(palette.results.is_empty());
    palette.handle_key(raw_key(KeyCode::Backspace));
    assert_eq!(palette.results, filter_catalog(""));

    // Returning to the same remainder searches again
    let effects = type_into(&mut palette, ":q");
    assert_eq!(
        effects,
        vec![Effect::SearchEntities {
            query: "q".to_string(),
            limit: 15
        }]
    );
}

#[test]
fn test_execute_entity_jump() {
    let mut palette = PaletteState::open();
    type_into(&mut palette, ":ri");
    palette.apply_entity_results("ri", Ok(vec![entity("e-7", "Rita"), entity("e-8", "Rick")]));
    palette.handle_key(raw_key(KeyCode::Down));

    match palette.handle_key(raw_key(KeyCode::Enter)) {
        PaletteOutcome::Execute(PaletteCommand::OpenEntity(record)) => assert_eq!(record.id, "e-8"),
        other => panic!("expected entity jump, got {other:?}"),
    }
}
