//! Three-step guided tour that drops the user into the matching creation views

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use super::tabs::TabId;
use crate::ui::core::TabTarget;
use crate::ui::layout::LayoutManager;

pub struct QuickstartStep {
    pub title: &'static str,
    pub body: &'static str,
    pub tab: TabId,
}

pub const STEPS: [QuickstartStep; 3] = [
    QuickstartStep {
        title: "Create an entity",
        body: "Entities are the nodes of your graph: people, systems, documents. Press Enter to open the new entity form.",
        tab: TabId::Entities,
    },
    QuickstartStep {
        title: "Add knowledge",
        body: "Knowledge items hold facts and notes the graph can search. Press Enter to open the knowledge form.",
        tab: TabId::Knowledge,
    },
    QuickstartStep {
        title: "Link a relationship",
        body: "Relationships connect two entities. Press Enter to open the relationship form and finish the tour.",
        tab: TabId::Relationships,
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuickstartEnd {
    Completed,
    Skipped,
}

/// What the dispatcher should do after a key press in the tour
#[derive(Debug, Clone, PartialEq, Default)]
pub struct QuickstartOutcome {
    pub navigate: Option<(TabId, TabTarget)>,
    pub finished: Option<QuickstartEnd>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct QuickstartState {
    pub step: usize,
}

impl QuickstartState {
    pub fn current(&self) -> &'static QuickstartStep {
        &STEPS[self.step.min(STEPS.len() - 1)]
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> QuickstartOutcome {
        match key.code {
            KeyCode::Enter => {
                let navigate = Some((self.current().tab, TabTarget::Create));
                if self.step + 1 >= STEPS.len() {
                    self.step = 0;
                    QuickstartOutcome {
                        navigate,
                        finished: Some(QuickstartEnd::Completed),
                    }
                } else {
                    self.step += 1;
                    QuickstartOutcome {
                        navigate,
                        finished: None,
                    }
                }
            }
            KeyCode::Left | KeyCode::Backspace if self.step > 0 => {
                self.step -= 1;
                QuickstartOutcome::default()
            }
            KeyCode::Left | KeyCode::Backspace | KeyCode::Esc | KeyCode::Char('s') => {
                self.step = 0;
                QuickstartOutcome {
                    navigate: None,
                    finished: Some(QuickstartEnd::Skipped),
                }
            }
            _ => QuickstartOutcome::default(),
        }
    }

    pub fn render(&self, f: &mut Frame, area: Rect) {
        let rect = LayoutManager::centered_rect_lines(60, 10, area);
        f.render_widget(Clear, rect);

        let step = self.current();
        let lines = vec![
            Line::from(Span::styled(
                format!("Step {} of {}: {}", self.step + 1, STEPS.len(), step.title),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(step.body),
            Line::from(""),
            Line::from(Span::styled(
                "Enter: go • ←: back • Esc/s: skip tour",
                Style::default().fg(Color::Gray),
            )),
        ];
        let panel = Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Quickstart")
                    .title_alignment(Alignment::Center)
                    .style(Style::default().fg(Color::Cyan)),
            )
            .wrap(Wrap { trim: true });
        f.render_widget(panel, rect);
    }
}
