use super::actions::{Action, Effect, Probe, ProbeOutcome, TransferMode, TransferRequest, TransferSummary};
use super::event_handler::AppEvent;
use crate::backend::{Backend, BackendError};
use crate::config::Config;
use crate::transfer;
use std::collections::HashMap;
use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use uuid::Uuid;

pub type TaskId = u64;

#[derive(Debug)]
pub struct BackgroundTask {
    pub id: TaskId,
    pub handle: JoinHandle<()>,
    pub description: String,
    pub started_at: std::time::Instant,
}

/// Runs effects on the tokio runtime and posts each completion back to the main loop
pub struct TaskManager {
    tasks: HashMap<TaskId, BackgroundTask>,
    next_task_id: TaskId,
    sender: mpsc::UnboundedSender<AppEvent>,
    backend: Arc<dyn Backend>,
    config_path: Option<PathBuf>,
}

impl TaskManager {
    pub fn new(backend: Arc<dyn Backend>, config_path: Option<PathBuf>, sender: mpsc::UnboundedSender<AppEvent>) -> Self {
        Self {
            tasks: HashMap::new(),
            next_task_id: 1,
            sender,
            backend,
            config_path,
        }
    }

    pub fn spawn_all(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            self.spawn(effect);
        }
    }

    /// Spawn the task that carries out `effect`
    pub fn spawn(&mut self, effect: Effect) -> TaskId {
        self.cleanup_finished_tasks();

        let description = describe(&effect);
        log::debug!("spawning task: {}", description);

        let backend = Arc::clone(&self.backend);
        let sender = self.sender.clone();
        let config_path = self.config_path.clone();
        let handle = tokio::spawn(run_effect(effect, backend, config_path, sender));
        self.track(description, handle)
    }

    fn track(&mut self, description: String, handle: JoinHandle<()>) -> TaskId {
        let task_id = self.next_task_id;
        self.next_task_id += 1;

        let task = BackgroundTask {
            id: task_id,
            handle,
            description,
            started_at: std::time::Instant::now(),
        };
        self.tasks.insert(task_id, task);
        task_id
    }

    /// Forget finished tasks; their results were already sent
    pub fn cleanup_finished_tasks(&mut self) -> usize {
        let before = self.tasks.len();
        self.tasks.retain(|_, task| {
            let finished = task.handle.is_finished();
            if finished {
                log::debug!(
                    "task {} finished in {:?}: {}",
                    task.id,
                    task.started_at.elapsed(),
                    task.description
                );
            }
            !finished
        });
        before - self.tasks.len()
    }

    /// Cancel all running tasks
    pub fn cancel_all_tasks(&mut self) {
        for (_, task) in self.tasks.drain() {
            if !task.handle.is_finished() {
                log::debug!(
                    "cancelling task {} after {:?}: {}",
                    task.id,
                    task.started_at.elapsed(),
                    task.description
                );
            }
            task.handle.abort();
        }
    }

    /// Get the number of active tasks
    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    /// Descriptions of tracked tasks, oldest first
    pub fn task_descriptions(&self) -> Vec<String> {
        let mut tasks: Vec<&BackgroundTask> = self.tasks.values().collect();
        tasks.sort_by_key(|task| task.id);
        tasks.into_iter().map(|task| task.description.clone()).collect()
    }
}

impl Drop for TaskManager {
    fn drop(&mut self) {
        self.cancel_all_tasks();
    }
}

fn describe(effect: &Effect) -> String {
    match effect {
        Effect::LoadRecords(kind) => format!("Load {}", kind.path()),
        Effect::FetchRecord { kind, id } => format!("Fetch {} {}", kind.path(), id),
        Effect::CreateRecord { kind, .. } => format!("Create {}", kind.label()),
        Effect::UpdateRecord { kind, id, .. } => format!("Update {} {}", kind.label(), id),
        Effect::DecideApproval { id, decision } => format!("{} approval {}", decision.verb(), id),
        Effect::Search { query, .. } => format!("Search '{}'", query),
        Effect::SearchEntities { query, .. } => format!("Entity lookup '{}'", query),
        Effect::StartupCheck { run_id, .. } => format!("Startup check {}", run_id),
        Effect::Relogin { username } => format!("Re-login {}", username),
        Effect::ClearToastAfter(delay) => format!("Clear toast after {:?}", delay),
        Effect::CompleteQuickstart => "Persist quickstart completion".to_string(),
        Effect::Transfer(request) => format!("{} {} {}", request.mode.label(), request.kind.path(), request.path.display()),
    }
}

fn send(sender: &mpsc::UnboundedSender<AppEvent>, action: Action) {
    if sender.send(AppEvent::Task(action)).is_err() {
        log::debug!("event loop closed; dropping task result");
    }
}

async fn run_effect(
    effect: Effect,
    backend: Arc<dyn Backend>,
    config_path: Option<PathBuf>,
    sender: mpsc::UnboundedSender<AppEvent>,
) {
    match effect {
        Effect::LoadRecords(kind) => {
            let result = backend.list(kind).await;
            send(&sender, Action::RecordsLoaded { kind, result });
        }
        Effect::FetchRecord { kind, id } => {
            let result = backend.get(kind, &id).await;
            send(&sender, Action::RecordLoaded { kind, result });
        }
        Effect::CreateRecord { kind, draft } => {
            let result = backend.create(kind, &draft).await;
            send(&sender, Action::RecordCreated { kind, result });
        }
        Effect::UpdateRecord { kind, id, draft } => {
            let result = backend.update(kind, &id, &draft).await;
            send(&sender, Action::RecordUpdated { kind, result });
        }
        Effect::DecideApproval { id, decision } => {
            let result = backend.decide_approval(&id, decision).await;
            send(&sender, Action::ApprovalDecided { decision, result });
        }
        Effect::Search { query, limit } => {
            let result = backend.search(None, &query, limit).await;
            send(&sender, Action::SearchCompleted { query, result });
        }
        Effect::SearchEntities { query, limit } => {
            let result = backend
                .search(Some(crate::backend::ResourceKind::Entity), &query, limit)
                .await;
            send(&sender, Action::EntitySearchCompleted { query, result });
        }
        Effect::StartupCheck {
            run_id,
            api_key_configured,
            timeout,
        } => run_startup_check(backend.as_ref(), &sender, run_id, api_key_configured, timeout).await,
        Effect::Relogin { username } => {
            let result = backend.reauthenticate(&username).await;
            if let Ok(credentials) = &result {
                backend.set_api_key(&credentials.api_key);
                if let Some(path) = &config_path {
                    if let Err(e) = Config::store_api_key(path, &credentials.username, &credentials.api_key) {
                        log::warn!("failed to save new key to {}: {}", path.display(), e);
                    }
                }
            }
            send(&sender, Action::ReloginCompleted(result));
        }
        Effect::ClearToastAfter(delay) => {
            tokio::time::sleep(delay).await;
            send(&sender, Action::ClearToast);
        }
        Effect::CompleteQuickstart => {
            let result = match &config_path {
                Some(path) => Config::mark_quickstart_complete(path).map_err(|e| e.to_string()),
                None => Err("no configuration file to update".to_string()),
            };
            send(&sender, Action::QuickstartSaved(result));
        }
        Effect::Transfer(request) => {
            let mode = request.mode;
            let result = run_transfer(backend.as_ref(), request).await;
            send(&sender, Action::TransferCompleted { mode, result });
        }
    }
}

/// Run the three probes concurrently; each reports as soon as it resolves
async fn run_startup_check(
    backend: &dyn Backend,
    sender: &mpsc::UnboundedSender<AppEvent>,
    run_id: Uuid,
    api_key_configured: bool,
    timeout: Duration,
) {
    let report = |probe: Probe, error: Option<String>| {
        send(sender, Action::StartupProbe {
            run_id,
            outcome: ProbeOutcome { probe, error },
        });
    };

    let api = async {
        report(Probe::Api, probe_error(timeout, backend.health()).await);
    };
    let auth = async {
        if api_key_configured {
            report(Probe::Auth, probe_error(timeout, backend.whoami()).await);
        } else {
            report(Probe::Auth, None);
        }
    };
    let taxonomy = async {
        report(Probe::Taxonomy, probe_error(timeout, backend.taxonomy()).await);
    };

    tokio::join!(api, auth, taxonomy);
}

async fn probe_error<T>(timeout: Duration, call: impl Future<Output = Result<T, BackendError>>) -> Option<String> {
    match tokio::time::timeout(timeout, call).await {
        Ok(Ok(_)) => None,
        Ok(Err(e)) => Some(e.to_string()),
        Err(_) => Some(format!("deadline exceeded after {}s", timeout.as_secs())),
    }
}

async fn run_transfer(backend: &dyn Backend, request: TransferRequest) -> Result<TransferSummary, String> {
    match request.mode {
        TransferMode::Import => {
            let rows = transfer::read_rows(&request.path, request.format)
                .await
                .map_err(|e| e.to_string())?;
            let summary = backend
                .bulk_import(request.kind, &rows)
                .await
                .map_err(|e| e.to_string())?;
            log::info!(
                "imported {} {} rows from {} ({} failed)",
                summary.created,
                request.kind.path(),
                request.path.display(),
                summary.failed
            );
            Ok(TransferSummary::Imported(summary))
        }
        TransferMode::Export => {
            let rows = backend.export_rows(request.kind).await.map_err(|e| e.to_string())?;
            transfer::write_rows(&request.path, &rows, request.format)
                .await
                .map_err(|e| e.to_string())?;
            log::info!("exported {} {} rows to {}", rows.len(), request.kind.path(), request.path.display());
            Ok(TransferSummary::Exported {
                rows: rows.len(),
                path: request.path,
            })
        }
    }
}
