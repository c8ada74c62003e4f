//! Help panel component

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::ui::layout::LayoutManager;

const HELP_CONTENT: &str = r"
GRAPHDESK - Knowledge Graph Console
===================================

TABS
----
←/→         Switch tab (while the tab bar is focused)
↓           Move focus into the tab
↑           Return to the tab bar from the top of a list
1-9, 0, -   Jump straight to a tab

LISTS
-----
j/k ↑/↓     Move the cursor
Enter       Open the selected item
n           New item
e           Edit the open item
f           Filter the list
r           Reload
a / x       Approve / reject (Inbox)

GLOBAL
------
/           Command palette (type :name to jump to an entity)
?           Toggle this help
q, Ctrl+C   Quit (asks first when a form has unsaved changes)

ERRORS
------
Permission errors offer r (re-login), s (settings) and c (show recovery command).

Press 'Esc' or '?' to close this help panel
";

/// Help panel component
pub struct HelpPanel;

impl HelpPanel {
    /// Render the help panel
    pub fn render(f: &mut Frame, area: Rect) {
        let (help_width, help_height) = LayoutManager::help_panel_dimensions(area.width, area.height);
        let help_area = LayoutManager::centered_rect(help_width, help_height, area);
        f.render_widget(Clear, help_area);

        let help_paragraph = Paragraph::new(HELP_CONTENT.trim_start_matches('\n'))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("❓ Help")
                    .title_alignment(Alignment::Center)
                    .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
            )
            .style(Style::default().fg(Color::Cyan))
            .alignment(Alignment::Left)
            .wrap(Wrap { trim: false });
        f.render_widget(help_paragraph, help_area);
    }
}
