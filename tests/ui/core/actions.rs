use graphdesk::backend::{BackendError, Credentials, ResourceKind};
use graphdesk::ui::core::{Action, TransferMode};

#[test]
fn test_backend_error_extracted_from_failures() {
    let failure = Action::RecordsLoaded {
        kind: ResourceKind::Job,
        result: Err(BackendError::new("TIMEOUT", "slow")),
    };
    assert_eq!(failure.backend_error().map(|e| e.code.as_str()), Some("TIMEOUT"));

    let relogin = Action::ReloginCompleted(Err(BackendError::new("UNAUTHORIZED", "bad password")));
    assert_eq!(relogin.backend_error().map(|e| e.message.as_str()), Some("bad password"));
}

#[test]
fn test_no_backend_error_for_successes_or_local_failures() {
    let ok = Action::ReloginCompleted(Ok(Credentials {
        username: "ada".to_string(),
        api_key: "k".to_string(),
    }));
    assert!(ok.backend_error().is_none());

    let transfer = Action::TransferCompleted {
        mode: TransferMode::Import,
        result: Err("file not found".to_string()),
    };
    assert!(transfer.backend_error().is_none());
    assert!(Action::QuickstartSaved(Err("read-only".to_string())).backend_error().is_none());
}

#[test]
fn test_action_names() {
    assert_eq!(Action::ClearToast.name(), "clear_toast");
    assert_eq!(
        Action::SearchCompleted {
            query: String::new(),
            result: Ok(Vec::new())
        }
        .name(),
        "search_completed"
    );
}

#[test]
fn test_transfer_mode_labels() {
    assert_eq!(TransferMode::Import.label(), "Import");
    assert_eq!(TransferMode::Export.label(), "Export");
}
