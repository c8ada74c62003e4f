//! Content tabs shown under the tab bar

pub mod record_tab;
pub mod search_tab;
pub mod settings_tab;

pub use record_tab::{Capabilities, RecordForm, RecordMode, RecordTab};
pub use search_tab::{SearchMode, SearchTab};
pub use settings_tab::SettingsTab;

use crate::backend::ResourceKind;
use crate::ui::core::{Session, TabComponent};

/// Fixed tab order; the position doubles as the index into the dispatcher's tab list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TabId {
    Inbox,
    Entities,
    Relationships,
    Knowledge,
    Jobs,
    Logs,
    Files,
    Protocols,
    History,
    Search,
    Settings,
}

impl TabId {
    pub const ALL: [TabId; 11] = [
        TabId::Inbox,
        TabId::Entities,
        TabId::Relationships,
        TabId::Knowledge,
        TabId::Jobs,
        TabId::Logs,
        TabId::Files,
        TabId::Protocols,
        TabId::History,
        TabId::Search,
        TabId::Settings,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn title(self) -> &'static str {
        match self {
            TabId::Inbox => "Inbox",
            TabId::Entities => "Entities",
            TabId::Relationships => "Relationships",
            TabId::Knowledge => "Knowledge",
            TabId::Jobs => "Jobs",
            TabId::Logs => "Logs",
            TabId::Files => "Files",
            TabId::Protocols => "Protocols",
            TabId::History => "History",
            TabId::Search => "Search",
            TabId::Settings => "Settings",
        }
    }

    /// Tab selected by a digit or `-` hotkey: `1`..`9`, then `0`, then `-`
    pub fn from_hotkey(c: char) -> Option<Self> {
        let index = match c {
            '1'..='9' => c as usize - '1' as usize,
            '0' => 9,
            '-' => 10,
            _ => return None,
        };
        Self::from_index(index)
    }

    pub fn hotkey(self) -> char {
        match self.index() {
            i @ 0..=8 => char::from(b'1' + i as u8),
            9 => '0',
            _ => '-',
        }
    }
}

/// The standard tab set in [`TabId::ALL`] order
pub fn default_tabs(session: &Session) -> Vec<Box<dyn TabComponent>> {
    TabId::ALL
        .iter()
        .map(|&id| -> Box<dyn TabComponent> {
            match id {
                TabId::Inbox => Box::new(RecordTab::new(id, ResourceKind::Approval, Capabilities::approvals())),
                TabId::Entities => Box::new(RecordTab::new(id, ResourceKind::Entity, Capabilities::editable())),
                TabId::Relationships => {
                    Box::new(RecordTab::new(id, ResourceKind::Relationship, Capabilities::editable()))
                }
                TabId::Knowledge => Box::new(RecordTab::new(id, ResourceKind::Knowledge, Capabilities::editable())),
                TabId::Jobs => Box::new(RecordTab::new(id, ResourceKind::Job, Capabilities::creatable())),
                TabId::Logs => Box::new(RecordTab::new(id, ResourceKind::Log, Capabilities::read_only())),
                TabId::Files => Box::new(RecordTab::new(id, ResourceKind::File, Capabilities::read_only())),
                TabId::Protocols => Box::new(RecordTab::new(id, ResourceKind::Protocol, Capabilities::editable())),
                TabId::History => Box::new(RecordTab::new(id, ResourceKind::Audit, Capabilities::read_only())),
                TabId::Search => Box::new(SearchTab::new()),
                TabId::Settings => Box::new(SettingsTab::new(session.clone())),
            }
        })
        .collect()
}
