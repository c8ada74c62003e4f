use crate::backend::BackendError;
use crate::config::Config;
use crate::constants::{TOAST_QUICKSTART_DONE, TOAST_QUICKSTART_SKIPPED};
use crate::diagnostics::should_show_recovery_hints;
use crate::ui::components::{
    default_tabs, toast, ErrorBanner, HelpPanel, ImportExportState, PaletteCommand, PaletteOutcome, PaletteState,
    QuickstartEnd, QuickstartState, StartupCheck, StatusBar, TabBar, TabId, Toast, ToastLevel, WizardOutcome,
};
use crate::ui::core::{
    Action, AppEvent, Effect, Session, TabComponent, TabTarget, TransferMode, TransferSummary,
};
use crate::ui::layout::LayoutManager;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{layout::Rect, Frame};
use std::time::Duration;
use tokio::time::Instant;

/// The single overlay that owns input ahead of the active tab
#[derive(Debug, Clone, PartialEq)]
pub enum Overlay {
    None,
    Help,
    QuitConfirm,
    Palette(PaletteState),
    Quickstart(QuickstartState),
    ImportExport(ImportExportState),
}

/// Settings the dispatcher needs from the configuration
#[derive(Debug, Clone, PartialEq)]
pub struct AppOptions {
    pub toast_delay: Duration,
    pub startup_timeout: Duration,
    pub quickstart_pending: bool,
}

impl AppOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            toast_delay: config.ui.toast_delay(),
            startup_timeout: config.ui.startup_timeout(),
            quickstart_pending: config.onboarding.quickstart_pending,
        }
    }
}

/// Root state owned by the dispatcher; tab sub-state lives in the tabs
#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    pub active_tab: usize,
    pub tab_nav: bool,
    pub overlay: Overlay,
    pub error: Option<ErrorBanner>,
    pub toast: Option<Toast>,
    pub startup: StartupCheck,
    pub session: Session,
    pub width: u16,
    pub height: u16,
    pub should_quit: bool,
}

/// Root dispatcher.
///
/// Every keyboard event, resize and task completion goes through [`update`](Self::update),
/// which mutates state and returns the effects the task manager should run.
/// It performs no I/O itself.
pub struct AppComponent {
    pub state: AppState,
    options: AppOptions,
    tabs: Vec<Box<dyn TabComponent>>,
}

impl AppComponent {
    pub fn new(session: Session, options: AppOptions) -> Self {
        let tabs = default_tabs(&session);
        Self::with_tabs(session, options, tabs)
    }

    pub fn with_tabs(session: Session, options: AppOptions, tabs: Vec<Box<dyn TabComponent>>) -> Self {
        Self {
            state: AppState {
                active_tab: 0,
                tab_nav: true,
                overlay: Overlay::None,
                error: None,
                toast: None,
                startup: StartupCheck::idle(),
                session,
                width: 0,
                height: 0,
                should_quit: false,
            },
            options,
            tabs,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.state.should_quit
    }

    pub fn overlay(&self) -> &Overlay {
        &self.state.overlay
    }

    pub fn active_tab(&self) -> usize {
        self.state.active_tab
    }

    pub fn tab_count(&self) -> usize {
        self.tabs.len()
    }

    pub fn tab(&self, index: usize) -> Option<&dyn TabComponent> {
        self.tabs.get(index).map(|tab| tab.as_ref())
    }

    /// Effects to run at boot: the startup check, the first tab's load and,
    /// when pending, the quickstart tour
    pub fn start(&mut self) -> Vec<Effect> {
        let mut effects = vec![self.begin_startup_check()];
        if let Some(tab) = self.tabs.get_mut(self.state.active_tab) {
            effects.extend(tab.init());
        }
        if self.options.quickstart_pending {
            self.state.overlay = Overlay::Quickstart(QuickstartState::default());
        }
        effects
    }

    pub fn update(&mut self, event: AppEvent) -> Vec<Effect> {
        let effects = match event {
            AppEvent::Key(key) => self.handle_key(key),
            AppEvent::Resize(width, height) => {
                self.state.width = width;
                self.state.height = height;
                for tab in &mut self.tabs {
                    tab.resize(width, height);
                }
                Vec::new()
            }
            AppEvent::Task(action) => self.handle_action(action),
        };

        if self.state.tab_nav && !self.active_is_at_root() {
            self.state.tab_nav = false;
        }
        effects
    }

    fn active_is_at_root(&self) -> bool {
        self.tabs
            .get(self.state.active_tab)
            .is_some_and(|tab| tab.is_at_root())
    }

    fn active_captures_text(&self) -> bool {
        self.tabs
            .get(self.state.active_tab)
            .is_some_and(|tab| tab.captures_text())
    }

    fn handle_key(&mut self, key: KeyEvent) -> Vec<Effect> {
        let mut effects = Vec::new();

        // Overlays own input in fixed order
        if self.handle_overlay_key(key, &mut effects) {
            return effects;
        }

        if self.handle_recovery_key(key, &mut effects) {
            return effects;
        }

        if let Some(banner) = self.state.error.take() {
            log::debug!("dismissing error banner: {}", banner.message);
        }

        if self.handle_global_key(key, &mut effects) {
            return effects;
        }

        if self.state.tab_nav {
            match key.code {
                KeyCode::Left => self.cycle_tab(-1, &mut effects),
                KeyCode::Right => self.cycle_tab(1, &mut effects),
                _ => self.state.tab_nav = false,
            }
            return effects;
        }

        if key.code == KeyCode::Up && self.active_is_at_root() {
            self.state.tab_nav = true;
            return effects;
        }

        if let Some(tab) = self.tabs.get_mut(self.state.active_tab) {
            effects.extend(tab.handle_key(key));
        }
        effects
    }

    /// Returns `true` when an open overlay consumed the key
    fn handle_overlay_key(&mut self, key: KeyEvent, effects: &mut Vec<Effect>) -> bool {
        match &mut self.state.overlay {
            Overlay::None => return false,
            Overlay::ImportExport(wizard) => match wizard.handle_key(key) {
                WizardOutcome::Stay(effect) => effects.extend(effect),
                WizardOutcome::Close => self.state.overlay = Overlay::None,
            },
            Overlay::QuitConfirm => match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') => {
                    self.state.overlay = Overlay::None;
                    self.state.should_quit = true;
                }
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => self.state.overlay = Overlay::None,
                _ => {}
            },
            Overlay::Help => {
                if matches!(key.code, KeyCode::Esc | KeyCode::Char('?')) {
                    self.state.overlay = Overlay::None;
                }
            }
            Overlay::Palette(palette) => match palette.handle_key(key) {
                PaletteOutcome::Stay(effect) => effects.extend(effect),
                PaletteOutcome::Close => self.state.overlay = Overlay::None,
                PaletteOutcome::Execute(command) => {
                    self.state.overlay = Overlay::None;
                    self.execute_palette_command(command, effects);
                }
            },
            Overlay::Quickstart(quickstart) => {
                let outcome = quickstart.handle_key(key);
                if let Some((tab, target)) = outcome.navigate {
                    self.switch_to(tab, Some(target), effects);
                }
                if let Some(end) = outcome.finished {
                    self.finish_quickstart(end, effects);
                }
            }
        }
        true
    }

    /// Shortcuts offered while a recovery-hint banner is showing
    fn handle_recovery_key(&mut self, key: KeyEvent, effects: &mut Vec<Effect>) -> bool {
        let Some(command) = self.state.error.as_ref().and_then(|banner| banner.recovery_command.clone()) else {
            return false;
        };
        if !is_plain(key) || self.active_captures_text() {
            return false;
        }
        match key.code {
            KeyCode::Char('r') => {
                self.state.error = None;
                let username = self.state.session.username.trim().to_string();
                if username.is_empty() {
                    self.show_toast(ToastLevel::Warning, "Set server.username in the config file to re-login", effects);
                } else {
                    self.show_toast(ToastLevel::Info, &format!("Signing in as {username}..."), effects);
                    effects.push(Effect::Relogin { username });
                }
                true
            }
            KeyCode::Char('s') => {
                self.state.error = None;
                self.switch_to(TabId::Settings, None, effects);
                true
            }
            KeyCode::Char('c') => {
                // The banner hides the toast line
                self.state.error = None;
                self.show_toast(ToastLevel::Info, &command, effects);
                true
            }
            _ => false,
        }
    }

    fn handle_global_key(&mut self, key: KeyEvent, effects: &mut Vec<Effect>) -> bool {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.request_quit();
            return true;
        }
        if !is_plain(key) || self.active_captures_text() {
            return false;
        }

        match key.code {
            KeyCode::Char('?') => self.state.overlay = Overlay::Help,
            KeyCode::Char('q') => self.request_quit(),
            KeyCode::Char('/') => self.state.overlay = Overlay::Palette(PaletteState::open()),
            KeyCode::Char(c) => match TabId::from_hotkey(c) {
                Some(tab) => {
                    self.switch_to(tab, None, effects);
                    self.state.tab_nav = true;
                }
                None => return false,
            },
            _ => return false,
        }
        true
    }

    fn request_quit(&mut self) {
        if self.tabs.iter().any(|tab| tab.has_unsaved_work()) {
            self.state.overlay = Overlay::QuitConfirm;
        } else {
            self.state.should_quit = true;
        }
    }

    /// Activate `index`, re-initializing it only when it differs from the current tab
    fn switch_tab(&mut self, index: usize, effects: &mut Vec<Effect>) {
        if index == self.state.active_tab || index >= self.tabs.len() {
            return;
        }
        self.state.active_tab = index;
        effects.extend(self.tabs[index].init());
    }

    fn switch_to(&mut self, tab: TabId, target: Option<TabTarget>, effects: &mut Vec<Effect>) {
        let index = tab.index();
        self.switch_tab(index, effects);
        if let (Some(target), Some(tab)) = (target, self.tabs.get_mut(index)) {
            effects.extend(tab.navigate(target));
        }
    }

    fn cycle_tab(&mut self, step: isize, effects: &mut Vec<Effect>) {
        let count = self.tabs.len() as isize;
        if count == 0 {
            return;
        }
        let next = (self.state.active_tab as isize + step).rem_euclid(count) as usize;
        self.switch_tab(next, effects);
    }

    fn execute_palette_command(&mut self, command: PaletteCommand, effects: &mut Vec<Effect>) {
        log::debug!("palette command: {:?}", command);
        match command {
            PaletteCommand::SwitchTab { tab, target } => self.switch_to(tab, target, effects),
            PaletteCommand::OpenHelp => self.state.overlay = Overlay::Help,
            PaletteCommand::OpenQuickstart => self.state.overlay = Overlay::Quickstart(QuickstartState::default()),
            PaletteCommand::OpenImport => {
                self.state.overlay = Overlay::ImportExport(ImportExportState::new(TransferMode::Import));
            }
            PaletteCommand::OpenExport => {
                self.state.overlay = Overlay::ImportExport(ImportExportState::new(TransferMode::Export));
            }
            PaletteCommand::RunStartupCheck => effects.push(self.begin_startup_check()),
            PaletteCommand::Quit => self.request_quit(),
            PaletteCommand::OpenEntity(record) => {
                self.switch_to(TabId::Entities, Some(TabTarget::Detail(record)), effects);
            }
        }
    }

    fn finish_quickstart(&mut self, end: QuickstartEnd, effects: &mut Vec<Effect>) {
        self.state.overlay = Overlay::None;
        self.options.quickstart_pending = false;
        effects.push(Effect::CompleteQuickstart);
        match end {
            QuickstartEnd::Completed => self.show_toast(ToastLevel::Success, TOAST_QUICKSTART_DONE, effects),
            QuickstartEnd::Skipped => self.show_toast(ToastLevel::Info, TOAST_QUICKSTART_SKIPPED, effects),
        }
    }

    fn begin_startup_check(&mut self) -> Effect {
        let run_id = self.state.startup.begin();
        log::info!("startup check {} started", run_id);
        Effect::StartupCheck {
            run_id,
            api_key_configured: self.state.session.has_api_key(),
            timeout: self.options.startup_timeout,
        }
    }

    fn show_toast(&mut self, level: ToastLevel, text: &str, effects: &mut Vec<Effect>) {
        self.state.toast = Some(Toast::new(level, text, self.options.toast_delay));
        effects.push(Effect::ClearToastAfter(self.options.toast_delay));
    }

    fn raise_error(&mut self, error: &BackendError) {
        log::warn!("backend error: {}", error);
        let recovery_command = should_show_recovery_hints(&error.code, &error.message)
            .then(|| self.state.session.recovery_command());
        self.state.error = Some(ErrorBanner {
            code: error.code.clone(),
            message: error.message.clone(),
            recovery_command,
        });
    }

    fn handle_action(&mut self, action: Action) -> Vec<Effect> {
        log::debug!("task result: {}", action.name());
        let mut effects = Vec::new();

        if let Some(message) = toast::notable_completion(&action) {
            self.show_toast(ToastLevel::Success, &message, &mut effects);
        }

        match action {
            Action::ClearToast => {
                let now = Instant::now();
                if self.state.toast.as_ref().is_some_and(|toast| toast.is_expired(now)) {
                    self.state.toast = None;
                }
            }
            Action::StartupProbe { run_id, outcome } => {
                let api_key = self.state.session.api_key.clone();
                if !self.state.startup.apply(run_id, &outcome, &api_key) {
                    log::debug!("dropping stale startup probe from run {}", run_id);
                } else if self.state.startup.is_complete() {
                    let (level, message) = self.state.startup.finish();
                    log::info!("startup check finished: {}", message);
                    self.show_toast(level, &message, &mut effects);
                }
            }
            Action::ReloginCompleted(result) => {
                match &result {
                    Ok(credentials) => {
                        self.state.session.username = credentials.username.clone();
                        self.state.session.api_key = credentials.api_key.clone();
                        self.show_toast(
                            ToastLevel::Success,
                            &format!("Signed in as {}", credentials.username),
                            &mut effects,
                        );
                    }
                    Err(e) => self.raise_error(e),
                }
                let action = Action::ReloginCompleted(result);
                for tab in &mut self.tabs {
                    effects.extend(tab.handle_result(&action));
                }
            }
            Action::EntitySearchCompleted { query, result } => match &mut self.state.overlay {
                Overlay::Palette(palette) => {
                    if !palette.apply_entity_results(&query, result) {
                        log::debug!("dropping stale entity results for '{}'", query);
                    }
                }
                _ => log::debug!("palette closed; dropping entity results for '{}'", query),
            },
            Action::TransferCompleted { mode, result } => {
                let logged = match &result {
                    Ok(TransferSummary::Imported(summary)) => format!("import done: {} created", summary.created),
                    Ok(TransferSummary::Exported { rows, .. }) => format!("export done: {} rows", rows),
                    Err(e) => format!("transfer failed: {}", e),
                };
                log::info!("{}", logged);
                match &mut self.state.overlay {
                    Overlay::ImportExport(wizard) => {
                        if !wizard.apply_result(mode, result) {
                            log::debug!("wizard not running; dropping transfer result");
                        }
                    }
                    _ => log::debug!("wizard closed; dropping transfer result"),
                }
            }
            Action::QuickstartSaved(result) => {
                if let Err(e) = result {
                    log::warn!("failed to persist quickstart completion: {}", e);
                }
            }
            other => {
                if let Some(error) = other.backend_error() {
                    self.raise_error(error);
                }
                if let Some(tab) = self.tabs.get_mut(self.state.active_tab) {
                    effects.extend(tab.handle_result(&other));
                }
            }
        }
        effects
    }

    pub fn render(&mut self, f: &mut Frame) {
        let full = f.area();
        let areas = LayoutManager::main_layout(full);

        let titles: Vec<String> = self
            .tabs
            .iter()
            .enumerate()
            .map(|(i, tab)| match TabId::from_index(i) {
                Some(id) => format!("{} {}", id.hotkey(), tab.title()),
                None => tab.title().to_string(),
            })
            .collect();
        TabBar::render(f, areas.tabs, &titles, self.state.active_tab, self.state.tab_nav);

        if let Some(tab) = self.tabs.get_mut(self.state.active_tab) {
            tab.render(f, areas.body);
        }

        StatusBar::render(
            f,
            areas.status,
            self.state.error.as_ref(),
            self.state.toast.as_ref(),
            self.state.tab_nav,
        );

        if self.state.startup.checking {
            self.state.startup.render(f, areas.body);
        }

        match &self.state.overlay {
            Overlay::None => {}
            Overlay::Help => HelpPanel::render(f, full),
            Overlay::QuitConfirm => render_quit_confirm(f, full),
            Overlay::Palette(palette) => palette.render(f, full),
            Overlay::Quickstart(quickstart) => quickstart.render(f, full),
            Overlay::ImportExport(wizard) => wizard.render(f, full),
        }
    }
}

/// Unmodified or shift-only key
fn is_plain(key: KeyEvent) -> bool {
    key.modifiers.difference(KeyModifiers::SHIFT).is_empty()
}

fn render_quit_confirm(f: &mut Frame, area: Rect) {
    use ratatui::{
        layout::Alignment,
        style::{Color, Style},
        widgets::{Block, Borders, Clear, Paragraph},
    };

    let area = LayoutManager::centered_rect_lines(40, 5, area);
    f.render_widget(Clear, area);
    let dialog = Paragraph::new("You have unsaved changes.\nQuit anyway? (y/n)")
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Quit")
                .style(Style::default().fg(Color::Red)),
        );
    f.render_widget(dialog, area);
}
