use std::path::PathBuf;
use std::time::Duration;

use uuid::Uuid;

use crate::backend::{ApprovalDecision, BackendError, Credentials, ImportSummary, Record, RecordDraft, ResourceKind};
use crate::transfer::TransferFormat;

/// Side effect requested by a transition.
///
/// Effects are plain data. The [`TaskManager`](super::TaskManager) executes
/// them off the main loop and posts the outcome back as an [`Action`].
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    LoadRecords(ResourceKind),
    FetchRecord {
        kind: ResourceKind,
        id: String,
    },
    CreateRecord {
        kind: ResourceKind,
        draft: RecordDraft,
    },
    UpdateRecord {
        kind: ResourceKind,
        id: String,
        draft: RecordDraft,
    },
    DecideApproval {
        id: String,
        decision: ApprovalDecision,
    },
    /// Search tab query
    Search {
        query: String,
        limit: usize,
    },
    /// Palette entity-jump lookup
    SearchEntities {
        query: String,
        limit: usize,
    },
    StartupCheck {
        run_id: Uuid,
        api_key_configured: bool,
        timeout: Duration,
    },
    Relogin {
        username: String,
    },
    ClearToastAfter(Duration),
    CompleteQuickstart,
    Transfer(TransferRequest),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferMode {
    Import,
    Export,
}

impl TransferMode {
    pub fn label(self) -> &'static str {
        match self {
            TransferMode::Import => "Import",
            TransferMode::Export => "Export",
        }
    }
}

/// Snapshot of the wizard choices handed to the import/export task
#[derive(Debug, Clone, PartialEq)]
pub struct TransferRequest {
    pub mode: TransferMode,
    pub kind: ResourceKind,
    pub format: TransferFormat,
    pub path: PathBuf,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TransferSummary {
    Imported(ImportSummary),
    Exported { rows: usize, path: PathBuf },
}

/// The three startup probes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Probe {
    Api,
    Auth,
    Taxonomy,
}

/// Raw probe result; `error` is `None` when the probe succeeded
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeOutcome {
    pub probe: Probe,
    pub error: Option<String>,
}

/// Completion of an asynchronous effect
#[derive(Debug, Clone)]
pub enum Action {
    RecordsLoaded {
        kind: ResourceKind,
        result: Result<Vec<Record>, BackendError>,
    },
    RecordLoaded {
        kind: ResourceKind,
        result: Result<Record, BackendError>,
    },
    RecordCreated {
        kind: ResourceKind,
        result: Result<Record, BackendError>,
    },
    RecordUpdated {
        kind: ResourceKind,
        result: Result<Record, BackendError>,
    },
    ApprovalDecided {
        decision: ApprovalDecision,
        result: Result<Record, BackendError>,
    },
    SearchCompleted {
        query: String,
        result: Result<Vec<Record>, BackendError>,
    },
    EntitySearchCompleted {
        query: String,
        result: Result<Vec<Record>, BackendError>,
    },
    StartupProbe {
        run_id: Uuid,
        outcome: ProbeOutcome,
    },
    ReloginCompleted(Result<Credentials, BackendError>),
    TransferCompleted {
        mode: TransferMode,
        result: Result<TransferSummary, String>,
    },
    QuickstartSaved(Result<(), String>),
    ClearToast,
}

impl Action {
    /// Backend error carried by this completion, if any
    pub fn backend_error(&self) -> Option<&BackendError> {
        match self {
            Action::RecordsLoaded { result: Err(e), .. }
            | Action::SearchCompleted { result: Err(e), .. }
            | Action::EntitySearchCompleted { result: Err(e), .. } => Some(e),
            Action::RecordLoaded { result: Err(e), .. }
            | Action::RecordCreated { result: Err(e), .. }
            | Action::RecordUpdated { result: Err(e), .. }
            | Action::ApprovalDecided { result: Err(e), .. } => Some(e),
            Action::ReloginCompleted(Err(e)) => Some(e),
            _ => None,
        }
    }

    /// Short name for log lines
    pub fn name(&self) -> &'static str {
        match self {
            Action::RecordsLoaded { .. } => "records_loaded",
            Action::RecordLoaded { .. } => "record_loaded",
            Action::RecordCreated { .. } => "record_created",
            Action::RecordUpdated { .. } => "record_updated",
            Action::ApprovalDecided { .. } => "approval_decided",
            Action::SearchCompleted { .. } => "search_completed",
            Action::EntitySearchCompleted { .. } => "entity_search_completed",
            Action::StartupProbe { .. } => "startup_probe",
            Action::ReloginCompleted(_) => "relogin_completed",
            Action::TransferCompleted { .. } => "transfer_completed",
            Action::QuickstartSaved(_) => "quickstart_saved",
            Action::ClearToast => "clear_toast",
        }
    }
}
