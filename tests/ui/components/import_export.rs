use crate::support::raw_key;
use crossterm::event::KeyCode;
use graphdesk::backend::{ImportSummary, ResourceKind};
use graphdesk::transfer::TransferFormat;
use graphdesk::ui::components::{ImportExportState, WizardOutcome, WizardStep};
use graphdesk::ui::core::{Effect, TransferMode, TransferRequest, TransferSummary};
use std::path::PathBuf;

fn press(wizard: &mut ImportExportState, code: KeyCode) -> WizardOutcome {
    wizard.handle_key(raw_key(code))
}

fn type_path(wizard: &mut ImportExportState, text: &str) {
    for c in text.chars() {
        press(wizard, KeyCode::Char(c));
    }
}

#[test]
fn test_export_request_uses_selected_resource_and_format() {
    let mut wizard = ImportExportState::new(TransferMode::Export);
    press(&mut wizard, KeyCode::Down);
    press(&mut wizard, KeyCode::Down);
    press(&mut wizard, KeyCode::Enter);
    press(&mut wizard, KeyCode::Down);
    press(&mut wizard, KeyCode::Enter);
    assert_eq!(wizard.step, WizardStep::Path);
    type_path(&mut wizard, "  out/links.csv ");

    assert_eq!(
        press(&mut wizard, KeyCode::Enter),
        WizardOutcome::Stay(Some(Effect::Transfer(TransferRequest {
            mode: TransferMode::Export,
            kind: ResourceKind::Relationship,
            format: TransferFormat::Csv,
            path: PathBuf::from("out/links.csv"),
        })))
    );
    assert_eq!(wizard.step, WizardStep::Running);
}

#[test]
fn test_selection_clamps_at_ends() {
    let mut wizard = ImportExportState::new(TransferMode::Import);
    press(&mut wizard, KeyCode::Up);
    assert_eq!(wizard.resource(), ResourceKind::Entity);
    for _ in 0..10 {
        press(&mut wizard, KeyCode::Down);
    }
    assert_eq!(wizard.resource(), ResourceKind::Protocol);

    press(&mut wizard, KeyCode::Enter);
    for _ in 0..5 {
        press(&mut wizard, KeyCode::Down);
    }
    assert_eq!(wizard.format(), TransferFormat::Csv);
}

#[test]
fn test_blank_path_is_rejected() {
    let mut wizard = ImportExportState::new(TransferMode::Import);
    press(&mut wizard, KeyCode::Enter);
    press(&mut wizard, KeyCode::Enter);
    type_path(&mut wizard, "   ");

    assert_eq!(press(&mut wizard, KeyCode::Enter), WizardOutcome::Stay(None));
    assert_eq!(wizard.step, WizardStep::Path);
    assert_eq!(wizard.validation.as_deref(), Some("Enter a file path to continue"));

    press(&mut wizard, KeyCode::Char('a'));
    assert!(wizard.validation.is_none());
}

#[test]
fn test_escape_walks_back_then_closes() {
    let mut wizard = ImportExportState::new(TransferMode::Import);
    press(&mut wizard, KeyCode::Enter);
    press(&mut wizard, KeyCode::Enter);
    type_path(&mut wizard, "rows.json");

    press(&mut wizard, KeyCode::Esc);
    assert_eq!(wizard.step, WizardStep::Format);
    press(&mut wizard, KeyCode::Esc);
    assert_eq!(wizard.step, WizardStep::Resource);
    assert_eq!(press(&mut wizard, KeyCode::Esc), WizardOutcome::Close);
    assert_eq!(wizard.path, "rows.json");
}

#[test]
fn test_running_ignores_keys_and_accepts_matching_result() {
    let mut wizard = ImportExportState::new(TransferMode::Import);
    press(&mut wizard, KeyCode::Enter);
    press(&mut wizard, KeyCode::Enter);
    type_path(&mut wizard, "rows.json");
    press(&mut wizard, KeyCode::Enter);

    for code in [KeyCode::Esc, KeyCode::Enter, KeyCode::Char('q')] {
        assert_eq!(press(&mut wizard, code), WizardOutcome::Stay(None));
        assert_eq!(wizard.step, WizardStep::Running);
    }

    assert!(!wizard.apply_result(TransferMode::Export, Ok(TransferSummary::Exported {
        rows: 1,
        path: PathBuf::from("rows.json"),
    })));
    assert_eq!(wizard.step, WizardStep::Running);

    let summary = TransferSummary::Imported(ImportSummary { created: 4, failed: 1 });
    assert!(wizard.apply_result(TransferMode::Import, Ok(summary.clone())));
    assert_eq!(wizard.step, WizardStep::Result);
    assert_eq!(wizard.outcome, Some(Ok(summary)));

    assert!(!wizard.apply_result(TransferMode::Import, Err("again".to_string())));
    assert_eq!(press(&mut wizard, KeyCode::Char('x')), WizardOutcome::Close);
}

#[test]
fn test_result_before_running_is_ignored() {
    let mut wizard = ImportExportState::new(TransferMode::Import);
    assert!(!wizard.apply_result(TransferMode::Import, Err("early".to_string())));
    assert_eq!(wizard.step, WizardStep::Resource);
    assert!(wizard.outcome.is_none());
}
