//! UI module for graphdesk
//!
//! This module handles the root dispatcher, the tabs and overlays it routes
//! input to, and the terminal loop that drives them.

pub mod app_component;
pub mod components;
pub mod core;
pub mod layout;
pub mod renderer;

pub use app_component::{AppComponent, AppOptions, AppState, Overlay};
pub use layout::LayoutManager;
pub use renderer::run_app;
