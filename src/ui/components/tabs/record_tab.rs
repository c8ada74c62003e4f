use crate::backend::{ApprovalDecision, Record, RecordDraft, ResourceKind};
use crate::ui::components::tabs::TabId;
use crate::ui::core::{Action, Effect, TabComponent, TabTarget};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

/// What a resource tab lets the user do besides browsing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    pub create: bool,
    pub edit: bool,
    pub approve: bool,
}

impl Capabilities {
    pub fn read_only() -> Self {
        Self {
            create: false,
            edit: false,
            approve: false,
        }
    }

    pub fn creatable() -> Self {
        Self {
            create: true,
            ..Self::read_only()
        }
    }

    pub fn editable() -> Self {
        Self {
            create: true,
            edit: true,
            approve: false,
        }
    }

    pub fn approvals() -> Self {
        Self {
            approve: true,
            ..Self::read_only()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    #[default]
    Title,
    Summary,
}

/// Create or edit form
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RecordForm {
    /// Id of the record being edited; `None` when creating
    pub editing: Option<String>,
    pub title: String,
    pub summary: String,
    pub focus: FormField,
    pub error: Option<String>,
    pub submitting: bool,
    original: RecordDraft,
}

impl RecordForm {
    pub fn create() -> Self {
        Self::default()
    }

    pub fn edit(record: &Record) -> Self {
        Self {
            editing: Some(record.id.clone()),
            title: record.title.clone(),
            summary: record.summary.clone(),
            original: RecordDraft {
                title: record.title.clone(),
                summary: record.summary.clone(),
            },
            ..Self::default()
        }
    }

    pub fn draft(&self) -> RecordDraft {
        RecordDraft {
            title: self.title.trim().to_string(),
            summary: self.summary.trim().to_string(),
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.title != self.original.title || self.summary != self.original.summary
    }

    fn focused_mut(&mut self) -> &mut String {
        match self.focus {
            FormField::Title => &mut self.title,
            FormField::Summary => &mut self.summary,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RecordMode {
    List,
    /// Typing into the list filter
    Filter,
    Detail(String),
    Form(RecordForm),
    Confirm { id: String, decision: ApprovalDecision },
}

/// List/detail/form tab over one resource type
pub struct RecordTab {
    id: TabId,
    kind: ResourceKind,
    caps: Capabilities,
    mode: RecordMode,
    records: Vec<Record>,
    filter: String,
    selected: usize,
    loading: bool,
    list_state: ListState,
    width: u16,
    height: u16,
}

impl RecordTab {
    pub fn new(id: TabId, kind: ResourceKind, caps: Capabilities) -> Self {
        Self {
            id,
            kind,
            caps,
            mode: RecordMode::List,
            records: Vec::new(),
            filter: String::new(),
            selected: 0,
            loading: false,
            list_state: ListState::default(),
            width: 0,
            height: 0,
        }
    }

    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    pub fn mode(&self) -> &RecordMode {
        &self.mode
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Records passing the current filter, in list order
    pub fn visible_records(&self) -> Vec<&Record> {
        let needle = self.filter.to_lowercase();
        self.records.iter().filter(|r| r.matches(&needle)).collect()
    }

    fn selected_record(&self) -> Option<&Record> {
        self.visible_records().get(self.selected).copied()
    }

    fn find(&self, id: &str) -> Option<&Record> {
        self.records.iter().find(|r| r.id == id)
    }

    fn clamp_selection(&mut self) {
        let len = self.visible_records().len();
        if self.selected >= len {
            self.selected = len.saturating_sub(1);
        }
    }

    fn upsert(&mut self, record: Record) {
        match self.records.iter_mut().find(|r| r.id == record.id) {
            Some(existing) => *existing = record,
            None => self.records.insert(0, record),
        }
    }

    fn reload(&mut self) -> Option<Effect> {
        self.loading = true;
        Some(Effect::LoadRecords(self.kind))
    }

    fn confirm(&mut self, id: String, decision: ApprovalDecision) {
        if self.caps.approve {
            self.mode = RecordMode::Confirm { id, decision };
        }
    }

    fn handle_list_key(&mut self, key: KeyEvent) -> Option<Effect> {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                let len = self.visible_records().len();
                if self.selected + 1 < len {
                    self.selected += 1;
                }
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.selected = self.selected.saturating_sub(1);
            }
            KeyCode::Enter => {
                if let Some(id) = self.selected_record().map(|r| r.id.clone()) {
                    self.mode = RecordMode::Detail(id);
                }
            }
            KeyCode::Char('n') if self.caps.create => {
                self.mode = RecordMode::Form(RecordForm::create());
            }
            KeyCode::Char('f') => {
                self.mode = RecordMode::Filter;
            }
            KeyCode::Char('r') => return self.reload(),
            KeyCode::Char('a') => {
                if let Some(id) = self.selected_record().map(|r| r.id.clone()) {
                    self.confirm(id, ApprovalDecision::Approve);
                }
            }
            KeyCode::Char('x') => {
                if let Some(id) = self.selected_record().map(|r| r.id.clone()) {
                    self.confirm(id, ApprovalDecision::Reject);
                }
            }
            KeyCode::Esc => {
                self.filter.clear();
                self.clamp_selection();
            }
            _ => {}
        }
        None
    }

    fn handle_filter_key(&mut self, key: KeyEvent) -> Option<Effect> {
        match key.code {
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.filter.push(c);
                self.selected = 0;
            }
            KeyCode::Backspace => {
                self.filter.pop();
                self.selected = 0;
            }
            KeyCode::Enter => self.mode = RecordMode::List,
            KeyCode::Esc => {
                self.filter.clear();
                self.selected = 0;
                self.mode = RecordMode::List;
            }
            _ => {}
        }
        None
    }

    fn handle_detail_key(&mut self, id: String, key: KeyEvent) -> Option<Effect> {
        match key.code {
            KeyCode::Esc | KeyCode::Backspace | KeyCode::Left => self.mode = RecordMode::List,
            KeyCode::Char('e') if self.caps.edit => {
                if let Some(form) = self.find(&id).map(RecordForm::edit) {
                    self.mode = RecordMode::Form(form);
                }
            }
            KeyCode::Char('a') => self.confirm(id, ApprovalDecision::Approve),
            KeyCode::Char('x') => self.confirm(id, ApprovalDecision::Reject),
            KeyCode::Char('r') => {
                return Some(Effect::FetchRecord { kind: self.kind, id });
            }
            _ => {}
        }
        None
    }

    fn handle_form_key(&mut self, key: KeyEvent) -> Option<Effect> {
        let kind = self.kind;
        let RecordMode::Form(form) = &mut self.mode else {
            return None;
        };
        if form.submitting {
            return None;
        }

        match key.code {
            KeyCode::Tab | KeyCode::BackTab => {
                form.focus = match form.focus {
                    FormField::Title => FormField::Summary,
                    FormField::Summary => FormField::Title,
                };
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                form.focused_mut().push(c);
                form.error = None;
            }
            KeyCode::Backspace => {
                form.focused_mut().pop();
            }
            KeyCode::Enter => {
                let draft = form.draft();
                if draft.title.is_empty() {
                    form.error = Some("Title is required".to_string());
                    return None;
                }
                form.error = None;
                form.submitting = true;
                return Some(match &form.editing {
                    Some(id) => Effect::UpdateRecord {
                        kind,
                        id: id.clone(),
                        draft,
                    },
                    None => Effect::CreateRecord { kind, draft },
                });
            }
            KeyCode::Esc => {
                self.mode = match form.editing.take() {
                    Some(id) => RecordMode::Detail(id),
                    None => RecordMode::List,
                };
            }
            _ => {}
        }
        None
    }

    fn handle_confirm_key(&mut self, id: String, decision: ApprovalDecision, key: KeyEvent) -> Option<Effect> {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => {
                self.mode = RecordMode::List;
                Some(Effect::DecideApproval { id, decision })
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                self.mode = RecordMode::List;
                None
            }
            _ => None,
        }
    }

    fn apply_saved(&mut self, result: &Result<Record, crate::backend::BackendError>) {
        match result {
            Ok(record) => {
                let id = record.id.clone();
                self.upsert(record.clone());
                if matches!(self.mode, RecordMode::Form(_)) {
                    self.mode = RecordMode::Detail(id);
                }
            }
            Err(e) => {
                if let RecordMode::Form(form) = &mut self.mode {
                    form.submitting = false;
                    form.error = Some(e.message.clone());
                }
            }
        }
    }

    fn render_list(&mut self, f: &mut Frame, area: Rect) {
        let title = if self.filter.is_empty() {
            format!("{} ({})", self.id.title(), self.records.len())
        } else {
            format!("{} - filter: {}", self.id.title(), self.filter)
        };
        let block = Block::default().borders(Borders::ALL).title(title);

        let mut list_state = self.list_state.clone();
        let visible = self.visible_records();
        if visible.is_empty() {
            let message = if self.loading {
                "Loading...".to_string()
            } else if self.caps.create {
                format!("No {} yet. Press 'n' to create one or 'r' to reload.", self.kind.path())
            } else {
                format!("No {} to show. Press 'r' to reload.", self.kind.path())
            };
            let empty = List::new(vec![ListItem::new(message)]).block(block);
            list_state.select(None);
            f.render_stateful_widget(empty, area, &mut list_state);
        } else {
            let items: Vec<ListItem> = visible.iter().map(|record| record_item(record)).collect();
            let list = List::new(items)
                .block(block)
                .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD));

            list_state.select(Some(self.selected));
            f.render_stateful_widget(list, area, &mut list_state);
        }
        self.list_state = list_state;
    }

    fn render_form(f: &mut Frame, area: Rect, kind: ResourceKind, form: &RecordForm) {
        let heading = if form.editing.is_some() {
            format!("Edit {}", kind.label())
        } else {
            format!("New {}", kind.label())
        };
        let focus_style = |field: FormField| {
            if form.focus == field {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            }
        };

        let mut lines = vec![
            Line::from(vec![
                Span::styled("Title:   ", focus_style(FormField::Title)),
                Span::raw(form.title.as_str()),
            ]),
            Line::from(vec![
                Span::styled("Summary: ", focus_style(FormField::Summary)),
                Span::raw(form.summary.as_str()),
            ]),
            Line::from(""),
        ];
        if let Some(error) = &form.error {
            lines.push(Line::from(Span::styled(error.as_str(), Style::default().fg(Color::Red))));
        }
        let hint = if form.submitting {
            "Saving..."
        } else {
            "Tab: next field • Enter: save • Esc: cancel"
        };
        lines.push(Line::from(Span::styled(hint, Style::default().fg(Color::Gray))));

        let paragraph = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title(heading))
            .wrap(Wrap { trim: false });
        f.render_widget(paragraph, area);
    }
}

fn record_item(record: &Record) -> ListItem<'_> {
    let mut spans = vec![Span::raw(record.title.as_str())];
    if let Some(status) = &record.status {
        spans.push(Span::styled(format!("  [{status}]"), Style::default().fg(Color::Cyan)));
    }
    ListItem::new(Line::from(spans))
}

/// Lines describing one record in a detail pane
pub(crate) fn detail_lines(record: &Record) -> Vec<Line<'_>> {
    let label = Style::default().fg(Color::Yellow);
    let mut lines = vec![
        Line::from(Span::styled(record.title.as_str(), Style::default().add_modifier(Modifier::BOLD))),
        Line::from(vec![Span::styled("id: ", label), Span::raw(record.id.as_str())]),
    ];
    if let Some(status) = &record.status {
        lines.push(Line::from(vec![Span::styled("status: ", label), Span::raw(status.as_str())]));
    }
    if !record.summary.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(record.summary.as_str()));
    }
    if !record.fields.is_empty() {
        lines.push(Line::from(""));
        for (name, value) in &record.fields {
            lines.push(Line::from(vec![
                Span::styled(format!("{name}: "), label),
                Span::raw(value.as_str()),
            ]));
        }
    }
    lines
}

impl TabComponent for RecordTab {
    fn title(&self) -> &str {
        self.id.title()
    }

    fn init(&mut self) -> Option<Effect> {
        self.reload()
    }

    fn handle_key(&mut self, key: KeyEvent) -> Option<Effect> {
        match self.mode.clone() {
            RecordMode::List => self.handle_list_key(key),
            RecordMode::Filter => self.handle_filter_key(key),
            RecordMode::Detail(id) => self.handle_detail_key(id, key),
            RecordMode::Form(_) => self.handle_form_key(key),
            RecordMode::Confirm { id, decision } => self.handle_confirm_key(id, decision, key),
        }
    }

    fn handle_result(&mut self, action: &Action) -> Option<Effect> {
        match action {
            Action::RecordsLoaded { kind, result } if *kind == self.kind => {
                self.loading = false;
                if let Ok(records) = result {
                    self.records = records.clone();
                    self.clamp_selection();
                }
            }
            Action::RecordLoaded { kind, result: Ok(record) } if *kind == self.kind => {
                self.upsert(record.clone());
            }
            Action::RecordCreated { kind, result } | Action::RecordUpdated { kind, result } if *kind == self.kind => {
                self.apply_saved(result);
            }
            Action::ApprovalDecided { result: Ok(record), .. } if self.kind == ResourceKind::Approval => {
                self.upsert(record.clone());
            }
            _ => {}
        }
        None
    }

    fn navigate(&mut self, target: TabTarget) -> Option<Effect> {
        match target {
            TabTarget::Root => {
                self.mode = RecordMode::List;
                self.filter.clear();
                self.selected = 0;
                None
            }
            TabTarget::Create => {
                if self.caps.create {
                    self.mode = RecordMode::Form(RecordForm::create());
                }
                None
            }
            TabTarget::Detail(record) => {
                let id = record.id.clone();
                self.upsert(record);
                self.mode = RecordMode::Detail(id.clone());
                Some(Effect::FetchRecord { kind: self.kind, id })
            }
        }
    }

    fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
    }

    fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    fn render(&mut self, f: &mut Frame, area: Rect) {
        if matches!(self.mode, RecordMode::List | RecordMode::Filter) {
            self.render_list(f, area);
            return;
        }

        match &self.mode {
            RecordMode::List | RecordMode::Filter => {}
            RecordMode::Detail(id) => {
                let lines = match self.find(id) {
                    Some(record) => detail_lines(record),
                    None => vec![Line::from("Loading...")],
                };
                let mut hint = String::from("Esc: back");
                if self.caps.edit {
                    hint.push_str(" • e: edit");
                }
                if self.caps.approve {
                    hint.push_str(" • a: approve • x: reject");
                }
                let paragraph = Paragraph::new(lines)
                    .block(
                        Block::default()
                            .borders(Borders::ALL)
                            .title(format!("{} - {}", self.kind.label(), hint)),
                    )
                    .wrap(Wrap { trim: false });
                f.render_widget(paragraph, area);
            }
            RecordMode::Form(form) => Self::render_form(f, area, self.kind, form),
            RecordMode::Confirm { id, decision } => {
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Min(0), Constraint::Length(3)])
                    .split(area);
                let title = self.find(id).map_or(id.as_str(), |r| r.title.as_str());
                let prompt = Paragraph::new(format!("{} '{}'? (y/n)", capitalize(decision.verb()), title))
                    .block(Block::default().borders(Borders::ALL).title("Confirm"))
                    .style(Style::default().fg(Color::Yellow));
                let visible = self.visible_records();
                let items: Vec<ListItem> = visible.iter().map(|record| record_item(record)).collect();
                f.render_widget(
                    List::new(items).block(Block::default().borders(Borders::ALL).title(self.id.title())),
                    chunks[0],
                );
                f.render_widget(prompt, chunks[1]);
            }
        }
    }

    fn has_unsaved_work(&self) -> bool {
        matches!(&self.mode, RecordMode::Form(form) if form.is_dirty())
    }

    fn is_at_root(&self) -> bool {
        self.mode == RecordMode::List && self.selected == 0
    }

    fn captures_text(&self) -> bool {
        matches!(self.mode, RecordMode::Filter | RecordMode::Form(_))
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
