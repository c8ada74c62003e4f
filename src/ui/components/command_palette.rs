//! Command palette with a static catalog and a `:`-prefixed entity jump

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use once_cell::sync::Lazy;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};

use super::tabs::TabId;
use crate::backend::{BackendError, Record};
use crate::constants::PALETTE_ENTITY_LIMIT;
use crate::ui::core::{Effect, TabTarget};
use crate::ui::layout::LayoutManager;

const ENTITY_PREFIX: &str = "entity:";

/// What executing a palette entry asks the dispatcher to do
#[derive(Debug, Clone, PartialEq)]
pub enum PaletteCommand {
    SwitchTab { tab: TabId, target: Option<TabTarget> },
    OpenHelp,
    OpenQuickstart,
    OpenImport,
    OpenExport,
    RunStartupCheck,
    Quit,
    OpenEntity(Record),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaletteEntry {
    pub id: String,
    pub label: String,
    pub description: String,
}

struct CatalogEntry {
    entry: PaletteEntry,
    command: PaletteCommand,
}

fn catalog_entry(id: &str, label: &str, description: &str, command: PaletteCommand) -> CatalogEntry {
    CatalogEntry {
        entry: PaletteEntry {
            id: id.to_string(),
            label: label.to_string(),
            description: description.to_string(),
        },
        command,
    }
}

/// Tabs first, in tab order, then creation shortcuts, then app commands
static CATALOG: Lazy<Vec<CatalogEntry>> = Lazy::new(|| {
    let tab_descriptions = [
        (TabId::Inbox, "Review pending approvals"),
        (TabId::Entities, "Browse and edit entities"),
        (TabId::Relationships, "Browse links between entities"),
        (TabId::Knowledge, "Browse knowledge items"),
        (TabId::Jobs, "Track background jobs"),
        (TabId::Logs, "Read server log entries"),
        (TabId::Files, "Browse uploaded files"),
        (TabId::Protocols, "Browse protocols"),
        (TabId::History, "Audit trail of changes"),
        (TabId::Search, "Full-text search across resources"),
        (TabId::Settings, "Connection and account"),
    ];
    let mut entries: Vec<CatalogEntry> = tab_descriptions
        .iter()
        .map(|&(tab, description)| {
            catalog_entry(
                &format!("tab:{}", tab.title().to_lowercase()),
                &format!("Go to {}", tab.title()),
                description,
                PaletteCommand::SwitchTab { tab, target: None },
            )
        })
        .collect();

    let create = |tab: TabId| PaletteCommand::SwitchTab {
        tab,
        target: Some(TabTarget::Create),
    };
    entries.extend([
        catalog_entry("create:entity", "New entity", "Create an entity", create(TabId::Entities)),
        catalog_entry("create:knowledge", "Add knowledge", "Add a knowledge item", create(TabId::Knowledge)),
        catalog_entry("create:relationship", "Link entities", "Create a relationship", create(TabId::Relationships)),
        catalog_entry("create:job", "New job", "Queue a background job", create(TabId::Jobs)),
        catalog_entry("create:protocol", "New protocol", "Write a protocol", create(TabId::Protocols)),
        catalog_entry("modal:help", "Show help", "Keyboard shortcuts", PaletteCommand::OpenHelp),
        catalog_entry("modal:quickstart", "Quickstart tour", "Guided first steps", PaletteCommand::OpenQuickstart),
        catalog_entry("modal:import", "Import data", "Load rows from a JSON or CSV file", PaletteCommand::OpenImport),
        catalog_entry("modal:export", "Export data", "Save rows to a JSON or CSV file", PaletteCommand::OpenExport),
        catalog_entry(
            "app:startup-check",
            "Run startup check",
            "Probe API, auth and taxonomy",
            PaletteCommand::RunStartupCheck,
        ),
        catalog_entry("app:quit", "Quit", "Exit graphdesk", PaletteCommand::Quit),
    ]);
    entries
});

/// Result of a key press inside the palette
#[derive(Debug, Clone, PartialEq)]
pub enum PaletteOutcome {
    Stay(Option<Effect>),
    Close,
    Execute(PaletteCommand),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PaletteState {
    pub query: String,
    pub selected: usize,
    pub results: Vec<PaletteEntry>,
    /// Records behind the current entity results, for executing a jump
    entity_cache: Vec<Record>,
    /// Remainder most recently sent to the backend
    last_searched: String,
    pub searching: bool,
    pub error: Option<String>,
}

impl PaletteState {
    pub fn open() -> Self {
        Self {
            results: filter_catalog(""),
            ..Self::default()
        }
    }

    pub fn is_entity_mode(&self) -> bool {
        self.query.starts_with(':')
    }

    /// Text after the `:` prefix
    pub fn entity_query(&self) -> &str {
        self.query.strip_prefix(':').map_or("", str::trim)
    }

    pub fn selected_entry(&self) -> Option<&PaletteEntry> {
        self.results.get(self.selected)
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> PaletteOutcome {
        match key.code {
            KeyCode::Esc => PaletteOutcome::Close,
            KeyCode::Enter => match self.selected_command() {
                Some(command) => PaletteOutcome::Execute(command),
                None => PaletteOutcome::Stay(None),
            },
            KeyCode::Up => {
                self.selected = self.selected.saturating_sub(1);
                PaletteOutcome::Stay(None)
            }
            KeyCode::Down => {
                if self.selected + 1 < self.results.len() {
                    self.selected += 1;
                }
                PaletteOutcome::Stay(None)
            }
            KeyCode::Backspace => {
                self.query.pop();
                PaletteOutcome::Stay(self.refresh())
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.query.push(c);
                PaletteOutcome::Stay(self.refresh())
            }
            _ => PaletteOutcome::Stay(None),
        }
    }

    /// Recompute results after the query changed
    fn refresh(&mut self) -> Option<Effect> {
        if !self.is_entity_mode() {
            self.entity_cache.clear();
            self.last_searched.clear();
            self.searching = false;
            self.error = None;
            self.results = filter_catalog(&self.query);
            self.selected = 0;
            return None;
        }

        let remainder = self.entity_query().to_string();
        if remainder.is_empty() {
            self.last_searched.clear();
            self.results.clear();
            self.entity_cache.clear();
            self.searching = false;
            self.error = None;
            self.selected = 0;
            return None;
        }
        if remainder == self.last_searched {
            return None;
        }
        self.last_searched = remainder.clone();
        self.selected = 0;
        self.error = None;
        self.searching = true;
        Some(Effect::SearchEntities {
            query: remainder,
            limit: PALETTE_ENTITY_LIMIT,
        })
    }

    /// Apply entity results. Returns `false` when they no longer match the live query.
    pub fn apply_entity_results(&mut self, query: &str, result: Result<Vec<Record>, BackendError>) -> bool {
        if !self.is_entity_mode() || query != self.entity_query() {
            return false;
        }
        self.searching = false;
        match result {
            Ok(records) => {
                self.results = records
                    .iter()
                    .map(|record| PaletteEntry {
                        id: format!("{ENTITY_PREFIX}{}", record.id),
                        label: record.title.clone(),
                        description: record.summary.clone(),
                    })
                    .collect();
                self.entity_cache = records;
                self.error = None;
            }
            Err(e) => {
                self.results.clear();
                self.entity_cache.clear();
                self.error = Some(e.message);
            }
        }
        if self.selected >= self.results.len() {
            self.selected = self.results.len().saturating_sub(1);
        }
        true
    }

    fn selected_command(&self) -> Option<PaletteCommand> {
        let entry = self.selected_entry()?;
        if let Some(id) = entry.id.strip_prefix(ENTITY_PREFIX) {
            return self
                .entity_cache
                .iter()
                .find(|record| record.id == id)
                .cloned()
                .map(PaletteCommand::OpenEntity);
        }
        CATALOG
            .iter()
            .find(|candidate| candidate.entry.id == entry.id)
            .map(|candidate| candidate.command.clone())
    }

    pub fn render(&self, f: &mut Frame, area: Rect) {
        let rect = LayoutManager::centered_rect(60, 60, area);
        f.render_widget(Clear, rect);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0)])
            .split(rect);

        let input = Paragraph::new(format!("> {}", self.query)).block(
            Block::default()
                .borders(Borders::ALL)
                .title("Command palette (:name jumps to an entity)")
                .style(Style::default().fg(Color::Yellow)),
        );
        f.render_widget(input, chunks[0]);

        let block = Block::default().borders(Borders::ALL);
        let placeholder = if let Some(error) = &self.error {
            Some(Line::from(Span::styled(error.clone(), Style::default().fg(Color::Red))))
        } else if self.searching && self.results.is_empty() {
            Some(Line::from("Searching entities..."))
        } else if self.results.is_empty() && self.is_entity_mode() && self.entity_query().is_empty() {
            Some(Line::from("Type a name to find an entity"))
        } else if self.results.is_empty() {
            Some(Line::from("No matches"))
        } else {
            None
        };
        if let Some(line) = placeholder {
            f.render_widget(Paragraph::new(line).block(block), chunks[1]);
            return;
        }

        let items: Vec<ListItem> = self
            .results
            .iter()
            .map(|entry| {
                ListItem::new(Line::from(vec![
                    Span::styled(entry.label.as_str(), Style::default().add_modifier(Modifier::BOLD)),
                    Span::styled(format!("  {}", entry.description), Style::default().fg(Color::Gray)),
                ]))
            })
            .collect();
        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().bg(Color::DarkGray));
        let mut state = ListState::default();
        state.select(Some(self.selected));
        f.render_stateful_widget(list, chunks[1], &mut state);
    }
}

/// Case-insensitive substring match over catalog labels and descriptions
pub fn filter_catalog(query: &str) -> Vec<PaletteEntry> {
    let needle = query.trim().to_lowercase();
    CATALOG
        .iter()
        .filter(|candidate| {
            needle.is_empty()
                || candidate.entry.label.to_lowercase().contains(&needle)
                || candidate.entry.description.to_lowercase().contains(&needle)
        })
        .map(|candidate| candidate.entry.clone())
        .collect()
}
