//! Reusable UI components

pub mod command_palette;
pub mod help_panel;
pub mod import_export;
pub mod quickstart;
pub mod startup_check;
pub mod status_bar;
pub mod tabs;
pub mod toast;

// Component exports
pub use command_palette::{PaletteCommand, PaletteOutcome, PaletteState};
pub use help_panel::HelpPanel;
pub use import_export::{ImportExportState, WizardOutcome, WizardStep};
pub use quickstart::{QuickstartEnd, QuickstartOutcome, QuickstartState};
pub use startup_check::StartupCheck;
pub use status_bar::{ErrorBanner, StatusBar, TabBar};
pub use tabs::{default_tabs, TabId};
pub use toast::{Toast, ToastLevel};
