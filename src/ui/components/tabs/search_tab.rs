use super::record_tab::detail_lines;
use crate::backend::Record;
use crate::constants::SEARCH_RESULT_LIMIT;
use crate::ui::core::{Action, Effect, TabComponent};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMode {
    Browse,
    Input,
    Detail(usize),
}

/// Full-text search across every resource type
pub struct SearchTab {
    mode: SearchMode,
    query: String,
    /// Last query sent; results for anything else are stale
    submitted: Option<String>,
    results: Vec<Record>,
    selected: usize,
    loading: bool,
    error: Option<String>,
    list_state: ListState,
    width: u16,
    height: u16,
}

impl Default for SearchTab {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchTab {
    pub fn new() -> Self {
        Self {
            mode: SearchMode::Browse,
            query: String::new(),
            submitted: None,
            results: Vec::new(),
            selected: 0,
            loading: false,
            error: None,
            list_state: ListState::default(),
            width: 0,
            height: 0,
        }
    }

    pub fn mode(&self) -> SearchMode {
        self.mode
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn results(&self) -> &[Record] {
        &self.results
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    fn submit(&mut self) -> Option<Effect> {
        let query = self.query.trim().to_string();
        if query.is_empty() {
            return None;
        }
        self.mode = SearchMode::Browse;
        self.loading = true;
        self.error = None;
        self.submitted = Some(query.clone());
        Some(Effect::Search {
            query,
            limit: SEARCH_RESULT_LIMIT,
        })
    }
}

impl TabComponent for SearchTab {
    fn title(&self) -> &str {
        "Search"
    }

    fn init(&mut self) -> Option<Effect> {
        None
    }

    fn handle_key(&mut self, key: KeyEvent) -> Option<Effect> {
        match self.mode {
            SearchMode::Input => match key.code {
                KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => self.query.push(c),
                KeyCode::Backspace => {
                    self.query.pop();
                }
                KeyCode::Enter => return self.submit(),
                KeyCode::Esc => self.mode = SearchMode::Browse,
                _ => {}
            },
            SearchMode::Browse => match key.code {
                KeyCode::Char('i') => self.mode = SearchMode::Input,
                KeyCode::Char('j') | KeyCode::Down => {
                    if self.selected + 1 < self.results.len() {
                        self.selected += 1;
                    }
                }
                KeyCode::Char('k') | KeyCode::Up => self.selected = self.selected.saturating_sub(1),
                KeyCode::Enter => {
                    self.mode = if self.results.is_empty() {
                        SearchMode::Input
                    } else {
                        SearchMode::Detail(self.selected)
                    };
                }
                _ => {}
            },
            SearchMode::Detail(_) => {
                if matches!(key.code, KeyCode::Esc | KeyCode::Backspace | KeyCode::Left) {
                    self.mode = SearchMode::Browse;
                }
            }
        }
        None
    }

    fn handle_result(&mut self, action: &Action) -> Option<Effect> {
        if let Action::SearchCompleted { query, result } = action {
            if self.submitted.as_deref() != Some(query.as_str()) {
                log::debug!("dropping stale search results for '{}'", query);
                return None;
            }
            self.loading = false;
            match result {
                Ok(records) => {
                    self.results = records.clone();
                    self.selected = 0;
                    self.error = None;
                }
                Err(e) => self.error = Some(e.message.clone()),
            }
        }
        None
    }

    fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
    }

    fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    fn render(&mut self, f: &mut Frame, area: Rect) {
        if let SearchMode::Detail(index) = self.mode {
            if let Some(record) = self.results.get(index) {
                let paragraph = Paragraph::new(detail_lines(record))
                    .block(Block::default().borders(Borders::ALL).title("Result - Esc: back"))
                    .wrap(Wrap { trim: false });
                f.render_widget(paragraph, area);
                return;
            }
        }

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0)])
            .split(area);

        let input_style = if self.mode == SearchMode::Input {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };
        let input = Paragraph::new(self.query.as_str())
            .style(input_style)
            .block(Block::default().borders(Borders::ALL).title("Query (i: edit, Enter: search)"));
        f.render_widget(input, chunks[0]);

        let title = if self.loading {
            "Results - searching...".to_string()
        } else {
            format!("Results ({})", self.results.len())
        };
        let block = Block::default().borders(Borders::ALL).title(title);

        if let Some(error) = &self.error {
            let paragraph = Paragraph::new(Line::from(Span::styled(error.as_str(), Style::default().fg(Color::Red))))
                .block(block);
            f.render_widget(paragraph, chunks[1]);
            return;
        }

        let items: Vec<ListItem> = self
            .results
            .iter()
            .map(|record| ListItem::new(record.title.as_str()))
            .collect();
        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD));

        let mut list_state = self.list_state.clone();
        list_state.select((!self.results.is_empty()).then_some(self.selected));
        f.render_stateful_widget(list, chunks[1], &mut list_state);
        self.list_state = list_state;
    }

    fn is_at_root(&self) -> bool {
        self.mode == SearchMode::Browse && self.selected == 0
    }

    fn captures_text(&self) -> bool {
        self.mode == SearchMode::Input
    }
}
