use super::actions::{Action, Effect};
use crate::backend::Record;
use crossterm::event::KeyEvent;
use ratatui::{layout::Rect, Frame};

/// Sub-view a tab can be asked to show
#[derive(Debug, Clone, PartialEq)]
pub enum TabTarget {
    /// The navigable root (list view, cursor on the first row)
    Root,
    /// The creation form
    Create,
    /// A specific record, shown from a cached copy until it reloads
    Detail(Record),
}

/// Contract every content tab implements.
///
/// The dispatcher owns the tabs for the whole process lifetime and is their only
/// caller. Each call returns at most one effect for the task manager.
pub trait TabComponent: Send {
    fn title(&self) -> &str;

    /// Called when the tab becomes active after a switch
    fn init(&mut self) -> Option<Effect>;

    fn handle_key(&mut self, key: KeyEvent) -> Option<Effect>;

    /// Async completion forwarded while this tab is active
    fn handle_result(&mut self, _action: &Action) -> Option<Effect> {
        None
    }

    fn navigate(&mut self, _target: TabTarget) -> Option<Effect> {
        None
    }

    fn resize(&mut self, width: u16, height: u16);

    fn size(&self) -> (u16, u16);

    fn render(&mut self, f: &mut Frame, area: Rect);

    fn has_unsaved_work(&self) -> bool {
        false
    }

    /// Whether `Up` should hand focus back to the tab bar
    fn is_at_root(&self) -> bool;

    /// Whether a text field currently has focus
    fn captures_text(&self) -> bool {
        false
    }
}
