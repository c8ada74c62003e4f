//! Boot-time health panel fed by three independent probes

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use uuid::Uuid;

use super::toast::ToastLevel;
use crate::constants::TOAST_STARTUP_OK;
use crate::diagnostics::{
    classify_startup_api, classify_startup_auth, classify_startup_taxonomy, ApiStatus, AuthStatus, TaxonomyStatus,
};
use crate::ui::core::{Probe, ProbeOutcome};
use crate::ui::layout::LayoutManager;

#[derive(Debug, Clone, PartialEq)]
pub struct StartupCheck {
    pub run_id: Uuid,
    pub checking: bool,
    pub api: Option<ApiStatus>,
    pub auth: Option<AuthStatus>,
    pub taxonomy: Option<TaxonomyStatus>,
}

impl Default for StartupCheck {
    fn default() -> Self {
        Self::idle()
    }
}

impl StartupCheck {
    pub fn idle() -> Self {
        Self {
            run_id: Uuid::nil(),
            checking: false,
            api: None,
            auth: None,
            taxonomy: None,
        }
    }

    /// Start a new run; results of every earlier run become stale
    pub fn begin(&mut self) -> Uuid {
        *self = Self {
            run_id: Uuid::new_v4(),
            checking: true,
            ..Self::idle()
        };
        self.run_id
    }

    /// Record one probe result. Returns `false` when it belongs to another run.
    pub fn apply(&mut self, run_id: Uuid, outcome: &ProbeOutcome, api_key: &str) -> bool {
        if !self.checking || run_id != self.run_id {
            return false;
        }
        let error = outcome.error.as_deref().unwrap_or("");
        match outcome.probe {
            Probe::Api => self.api = Some(classify_startup_api(error)),
            Probe::Auth => self.auth = Some(classify_startup_auth(error, api_key)),
            Probe::Taxonomy => self.taxonomy = Some(classify_startup_taxonomy(error)),
        }
        true
    }

    pub fn is_complete(&self) -> bool {
        self.api.is_some() && self.auth.is_some() && self.taxonomy.is_some()
    }

    pub fn all_ok(&self) -> bool {
        self.api == Some(ApiStatus::Ok) && self.auth == Some(AuthStatus::Ok) && self.taxonomy == Some(TaxonomyStatus::Ok)
    }

    /// Close the run and produce its summary toast
    pub fn finish(&mut self) -> (ToastLevel, String) {
        self.checking = false;
        if self.all_ok() {
            (ToastLevel::Success, TOAST_STARTUP_OK.to_string())
        } else {
            (
                ToastLevel::Warning,
                format!(
                    "Startup check: api {} • auth {} • taxonomy {}",
                    status_text(self.api.map(ApiStatus::as_str)),
                    status_text(self.auth.map(AuthStatus::as_str)),
                    status_text(self.taxonomy.map(TaxonomyStatus::as_str)),
                ),
            )
        }
    }

    pub fn render(&self, f: &mut Frame, area: Rect) {
        let rect = LayoutManager::corner_rect(34, 5, area);
        f.render_widget(Clear, rect);

        let line = |name: &'static str, status: Option<&'static str>| {
            let color = match status {
                None => Color::Gray,
                Some("ok") => Color::Green,
                Some(_) => Color::Red,
            };
            Line::from(vec![
                Span::raw(format!("{name:<10}")),
                Span::styled(status_text(status), Style::default().fg(color)),
            ])
        };
        let lines = vec![
            line("API", self.api.map(ApiStatus::as_str)),
            line("Auth", self.auth.map(AuthStatus::as_str)),
            line("Taxonomy", self.taxonomy.map(TaxonomyStatus::as_str)),
        ];

        let panel = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Startup check"));
        f.render_widget(panel, rect);
    }
}

fn status_text(status: Option<&'static str>) -> &'static str {
    status.unwrap_or("checking...")
}
