//! Resource → format → path → running → result wizard for bulk transfers

use std::path::PathBuf;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::backend::ResourceKind;
use crate::transfer::TransferFormat;
use crate::ui::core::{Effect, TransferMode, TransferRequest, TransferSummary};
use crate::ui::layout::LayoutManager;

/// Resource types that support bulk transfer
pub const RESOURCES: [ResourceKind; 5] = [
    ResourceKind::Entity,
    ResourceKind::Knowledge,
    ResourceKind::Relationship,
    ResourceKind::Job,
    ResourceKind::Protocol,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStep {
    Resource,
    Format,
    Path,
    Running,
    Result,
}

#[derive(Debug, Clone, PartialEq)]
pub enum WizardOutcome {
    Stay(Option<Effect>),
    Close,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImportExportState {
    pub mode: TransferMode,
    pub step: WizardStep,
    pub resource_index: usize,
    pub format_index: usize,
    pub path: String,
    /// Local validation message for the path step
    pub validation: Option<String>,
    pub outcome: Option<Result<TransferSummary, String>>,
}

impl ImportExportState {
    pub fn new(mode: TransferMode) -> Self {
        Self {
            mode,
            step: WizardStep::Resource,
            resource_index: 0,
            format_index: 0,
            path: String::new(),
            validation: None,
            outcome: None,
        }
    }

    pub fn resource(&self) -> ResourceKind {
        RESOURCES[self.resource_index]
    }

    pub fn format(&self) -> TransferFormat {
        TransferFormat::ALL[self.format_index]
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> WizardOutcome {
        match self.step {
            WizardStep::Resource => match key.code {
                KeyCode::Up => self.resource_index = self.resource_index.saturating_sub(1),
                KeyCode::Down => self.resource_index = (self.resource_index + 1).min(RESOURCES.len() - 1),
                KeyCode::Enter => self.step = WizardStep::Format,
                KeyCode::Esc => return WizardOutcome::Close,
                _ => {}
            },
            WizardStep::Format => match key.code {
                KeyCode::Up => self.format_index = self.format_index.saturating_sub(1),
                KeyCode::Down => self.format_index = (self.format_index + 1).min(TransferFormat::ALL.len() - 1),
                KeyCode::Enter => self.step = WizardStep::Path,
                KeyCode::Esc => self.step = WizardStep::Resource,
                _ => {}
            },
            WizardStep::Path => match key.code {
                KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                    self.path.push(c);
                    self.validation = None;
                }
                KeyCode::Backspace => {
                    self.path.pop();
                }
                KeyCode::Enter => return WizardOutcome::Stay(self.start()),
                KeyCode::Esc => {
                    self.validation = None;
                    self.step = WizardStep::Format;
                }
                _ => {}
            },
            WizardStep::Running => {}
            WizardStep::Result => return WizardOutcome::Close,
        }
        WizardOutcome::Stay(None)
    }

    fn start(&mut self) -> Option<Effect> {
        let path = self.path.trim();
        if path.is_empty() {
            self.validation = Some("Enter a file path to continue".to_string());
            return None;
        }
        let request = TransferRequest {
            mode: self.mode,
            kind: self.resource(),
            format: self.format(),
            path: PathBuf::from(path),
        };
        self.validation = None;
        self.step = WizardStep::Running;
        Some(Effect::Transfer(request))
    }

    /// Apply the task outcome. Returns `false` if the wizard was not waiting for it.
    pub fn apply_result(&mut self, mode: TransferMode, result: Result<TransferSummary, String>) -> bool {
        if self.step != WizardStep::Running || mode != self.mode {
            return false;
        }
        self.outcome = Some(result);
        self.step = WizardStep::Result;
        true
    }

    fn body(&self) -> Vec<Line<'_>> {
        let selected = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);
        let choice = |label: String, active: bool| {
            if active {
                Line::from(Span::styled(format!("> {label}"), selected))
            } else {
                Line::from(format!("  {label}"))
            }
        };
        let hint = |text: &'static str| Line::from(Span::styled(text, Style::default().fg(Color::Gray)));

        match self.step {
            WizardStep::Resource => {
                let mut lines = vec![Line::from("Which resource?"), Line::from("")];
                lines.extend(
                    RESOURCES
                        .iter()
                        .enumerate()
                        .map(|(i, kind)| choice(kind.label().to_string(), i == self.resource_index)),
                );
                lines.push(Line::from(""));
                lines.push(hint("↑/↓ choose • Enter next • Esc close"));
                lines
            }
            WizardStep::Format => {
                let mut lines = vec![Line::from("Which format?"), Line::from("")];
                lines.extend(
                    TransferFormat::ALL
                        .iter()
                        .enumerate()
                        .map(|(i, format)| choice(format.label().to_string(), i == self.format_index)),
                );
                lines.push(Line::from(""));
                lines.push(hint("↑/↓ choose • Enter next • Esc back"));
                lines
            }
            WizardStep::Path => {
                let prompt = match self.mode {
                    TransferMode::Import => "Read rows from:",
                    TransferMode::Export => "Write rows to:",
                };
                let mut lines = vec![
                    Line::from(prompt),
                    Line::from(Span::styled(format!("{}_", self.path), selected)),
                    Line::from(""),
                ];
                if let Some(message) = &self.validation {
                    lines.push(Line::from(Span::styled(message.as_str(), Style::default().fg(Color::Red))));
                }
                lines.push(hint("Enter start • Esc back"));
                lines
            }
            WizardStep::Running => vec![Line::from(format!(
                "{} {} rows ({})...",
                match self.mode {
                    TransferMode::Import => "Importing",
                    TransferMode::Export => "Exporting",
                },
                self.resource().path(),
                self.format()
            ))],
            WizardStep::Result => {
                let summary = match &self.outcome {
                    Some(Ok(TransferSummary::Imported(summary))) => Line::from(Span::styled(
                        format!("Imported {} rows, {} failed", summary.created, summary.failed),
                        Style::default().fg(Color::Green),
                    )),
                    Some(Ok(TransferSummary::Exported { rows, path })) => Line::from(Span::styled(
                        format!("Exported {} rows to {}", rows, path.display()),
                        Style::default().fg(Color::Green),
                    )),
                    Some(Err(message)) => Line::from(Span::styled(
                        format!("Failed: {message}"),
                        Style::default().fg(Color::Red),
                    )),
                    None => Line::from(""),
                };
                vec![summary, Line::from(""), hint("Press any key to close")]
            }
        }
    }

    pub fn render(&self, f: &mut Frame, area: Rect) {
        let rect = LayoutManager::centered_rect_lines(60, 12, area);
        f.render_widget(Clear, rect);

        let panel = Paragraph::new(self.body())
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!("{} data", self.mode.label()))
                    .title_alignment(Alignment::Center),
            )
            .wrap(Wrap { trim: false });
        f.render_widget(panel, rect);
    }
}
