//! Tab bar and bottom status line

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Tabs},
    Frame,
};

use super::toast::Toast;
use crate::constants::{RECOVERY_HINT, STATUS_CONTENT, STATUS_TAB_NAV};

/// Persistent error shown until the next key press
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorBanner {
    pub code: String,
    pub message: String,
    /// Recovery shortcuts apply; holds the command remembered for `c`
    pub recovery_command: Option<String>,
}

impl ErrorBanner {
    pub fn shows_recovery_hints(&self) -> bool {
        self.recovery_command.is_some()
    }
}

/// Tab bar component
pub struct TabBar;

impl TabBar {
    pub fn render(f: &mut Frame, area: Rect, titles: &[String], active: usize, focused: bool) {
        let highlight = if focused {
            Style::default().fg(Color::Black).bg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        };
        let tabs = Tabs::new(titles.iter().map(|title| Line::from(title.as_str())))
            .select(active)
            .style(Style::default().fg(Color::Gray))
            .highlight_style(highlight)
            .divider("│");
        f.render_widget(tabs, area);
    }
}

/// Status bar component
pub struct StatusBar;

impl StatusBar {
    /// Error banner first, then the toast, then key hints
    pub fn render(f: &mut Frame, area: Rect, error: Option<&ErrorBanner>, toast: Option<&Toast>, tab_nav: bool) {
        if let Some(banner) = error {
            let mut spans = vec![Span::styled(
                format!("✖ {}", banner.message),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )];
            if banner.shows_recovery_hints() {
                spans.push(Span::styled(format!("  {RECOVERY_HINT}"), Style::default().fg(Color::Yellow)));
            }
            f.render_widget(Paragraph::new(Line::from(spans)).alignment(Alignment::Center), area);
            return;
        }

        if let Some(toast) = toast {
            toast.render(f, area);
            return;
        }

        let hints = if tab_nav { STATUS_TAB_NAV } else { STATUS_CONTENT };
        let status_bar = Paragraph::new(hints)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Gray));
        f.render_widget(status_bar, area);
    }
}
