//! Transient single-line notifications

use std::collections::HashMap;
use std::time::Duration;

use once_cell::sync::Lazy;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    widgets::Paragraph,
    Frame,
};
use tokio::time::Instant;

use crate::backend::{ApprovalDecision, ResourceKind};
use crate::constants::TOAST_MAX_CHARS;
use crate::ui::core::Action;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl ToastLevel {
    fn color(self) -> Color {
        match self {
            ToastLevel::Info => Color::Cyan,
            ToastLevel::Success => Color::Green,
            ToastLevel::Warning => Color::Yellow,
            ToastLevel::Error => Color::Red,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub level: ToastLevel,
    pub text: String,
    pub expires_at: Instant,
}

impl Toast {
    /// Build a toast that stays visible for `ttl`; the text is sanitized
    pub fn new(level: ToastLevel, text: &str, ttl: Duration) -> Self {
        Self {
            level,
            text: sanitize(text),
            expires_at: Instant::now() + ttl,
        }
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }

    pub fn render(&self, f: &mut Frame, area: Rect) {
        let paragraph = Paragraph::new(self.text.as_str())
            .alignment(Alignment::Center)
            .style(Style::default().fg(self.level.color()).add_modifier(Modifier::BOLD));
        f.render_widget(paragraph, area);
    }
}

/// Single line of at most [`TOAST_MAX_CHARS`] characters: control characters
/// become spaces, whitespace runs collapse, overflow ends in an ellipsis
pub fn sanitize(text: &str) -> String {
    let replaced: String = text
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect();
    let collapsed = replaced.split_whitespace().collect::<Vec<_>>().join(" ");

    if collapsed.chars().count() <= TOAST_MAX_CHARS {
        return collapsed;
    }
    let mut truncated: String = collapsed.chars().take(TOAST_MAX_CHARS - 1).collect();
    truncated.push('…');
    truncated
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Completion {
    Created(ResourceKind),
    Updated(ResourceKind),
    Decided(ApprovalDecision),
}

/// Completion kinds that earn a success toast
static NOTABLE_COMPLETIONS: Lazy<HashMap<Completion, String>> = Lazy::new(|| {
    let mut table = HashMap::new();
    for kind in ResourceKind::ALL {
        table.insert(Completion::Created(kind), format!("{} created", kind.label()));
        table.insert(Completion::Updated(kind), format!("{} updated", kind.label()));
    }
    for decision in [ApprovalDecision::Approve, ApprovalDecision::Reject] {
        table.insert(Completion::Decided(decision), format!("Approval {}", decision.past_tense()));
    }
    table
});

/// Success message for a notable completion, `None` for everything else
pub fn notable_completion(action: &Action) -> Option<String> {
    let (completion, record) = match action {
        Action::RecordCreated { kind, result: Ok(record) } => (Completion::Created(*kind), record),
        Action::RecordUpdated { kind, result: Ok(record) } => (Completion::Updated(*kind), record),
        Action::ApprovalDecided {
            decision,
            result: Ok(record),
        } => (Completion::Decided(*decision), record),
        _ => return None,
    };
    NOTABLE_COMPLETIONS
        .get(&completion)
        .map(|message| format!("{}: {}", message, record.title))
}
