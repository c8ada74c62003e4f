use crate::ui::core::{Action, Effect, Session, TabComponent};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Connection status and re-login
pub struct SettingsTab {
    session: Session,
    relogin_pending: bool,
    message: Option<String>,
    width: u16,
    height: u16,
}

impl SettingsTab {
    pub fn new(session: Session) -> Self {
        Self {
            session,
            relogin_pending: false,
            message: None,
            width: 0,
            height: 0,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn is_relogin_pending(&self) -> bool {
        self.relogin_pending
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

impl TabComponent for SettingsTab {
    fn title(&self) -> &str {
        "Settings"
    }

    fn init(&mut self) -> Option<Effect> {
        None
    }

    fn handle_key(&mut self, key: KeyEvent) -> Option<Effect> {
        if key.code != KeyCode::Char('r') || self.relogin_pending {
            return None;
        }
        if self.session.username.trim().is_empty() {
            self.message = Some("Set server.username in the config file to re-login".to_string());
            return None;
        }
        self.relogin_pending = true;
        self.message = Some(format!("Signing in as {}...", self.session.username));
        Some(Effect::Relogin {
            username: self.session.username.clone(),
        })
    }

    fn handle_result(&mut self, action: &Action) -> Option<Effect> {
        if let Action::ReloginCompleted(result) = action {
            self.relogin_pending = false;
            match result {
                Ok(credentials) => {
                    self.session.username = credentials.username.clone();
                    self.session.api_key = credentials.api_key.clone();
                    self.message = Some(format!("Signed in as {}", credentials.username));
                }
                Err(e) => self.message = Some(format!("Re-login failed: {}", e.message)),
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
        let label = Style::default().fg(Color::Yellow);
        let username = if self.session.username.is_empty() {
            "(not set)"
        } else {
            self.session.username.as_str()
        };
        let mut lines = vec![
            Line::from(vec![Span::styled("Server:   ", label), Span::raw(self.session.server_url.as_str())]),
            Line::from(vec![Span::styled("Username: ", label), Span::raw(username)]),
            Line::from(vec![Span::styled("API key:  ", label), Span::raw(self.session.masked_key())]),
            Line::from(""),
            Line::from(Span::styled("r: re-login", Style::default().fg(Color::Gray))),
        ];
        if let Some(message) = &self.message {
            lines.push(Line::from(""));
            lines.push(Line::from(message.as_str()));
        }

        let paragraph = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title("Settings"))
            .wrap(Wrap { trim: false });
        f.render_widget(paragraph, area);
    }

    fn is_at_root(&self) -> bool {
        true
    }
}
