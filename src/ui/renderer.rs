//! Terminal setup and the main event loop

use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use crossterm::{
    cursor::Show,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend as TerminalBackend, CrosstermBackend},
    Terminal,
};
use tokio::sync::mpsc;

use super::app_component::{AppComponent, AppOptions};
use super::core::{AppEvent, EventHandler, Session, TaskManager};
use crate::backend::Backend;
use crate::config::Config;

/// Leaves raw mode and the alternate screen when dropped, including on early `?` returns
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> Result<Self> {
        enable_raw_mode()?;
        let guard = Self;
        execute!(io::stdout(), EnterAlternateScreen)?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Err(e) = disable_raw_mode() {
            log::warn!("failed to disable raw mode: {}", e);
        }
        if let Err(e) = execute!(io::stdout(), LeaveAlternateScreen, Show) {
            log::warn!("failed to leave alternate screen: {}", e);
        }
    }
}

/// Run the TUI until the user quits
pub async fn run_app(config: Config, config_path: Option<PathBuf>, backend: Arc<dyn Backend>) -> Result<()> {
    let _guard = TerminalGuard::enter()?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;

    let (sender, receiver) = mpsc::unbounded_channel();
    let mut tasks = TaskManager::new(backend, config_path, sender.clone());
    let input = EventHandler::new().spawn(sender);

    let mut app = AppComponent::new(Session::from_config(&config), AppOptions::from_config(&config));
    let result = match terminal.size() {
        Ok(size) => {
            app.update(AppEvent::Resize(size.width, size.height));
            tasks.spawn_all(app.start());
            run_app_loop(&mut terminal, &mut app, &mut tasks, receiver).await
        }
        Err(e) => Err(e.into()),
    };

    input.abort();
    tasks.cancel_all_tasks();

    result
}

/// One event per iteration, processed strictly in arrival order
async fn run_app_loop<B: TerminalBackend>(
    terminal: &mut Terminal<B>,
    app: &mut AppComponent,
    tasks: &mut TaskManager,
    mut receiver: mpsc::UnboundedReceiver<AppEvent>,
) -> Result<()> {
    loop {
        terminal.draw(|f| app.render(f))?;

        let Some(event) = receiver.recv().await else {
            log::warn!("event channel closed");
            break;
        };
        let effects = app.update(event);
        tasks.spawn_all(effects);

        if app.should_quit() {
            tasks.cleanup_finished_tasks();
            log::info!(
                "quit requested; {} tasks still running: [{}]",
                tasks.task_count(),
                tasks.task_descriptions().join(", ")
            );
            break;
        }
    }

    Ok(())
}
