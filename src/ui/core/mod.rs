//! Core UI functionality for graphdesk.
//!
//! This module contains the building blocks the dispatcher and every tab share:
//! the effect and completion types, the tab contract, the terminal event source
//! and the background task runner.
//!
//! # Module Components
//!
//! - [`actions`] - Effects requested by transitions and the completions they produce
//! - [`component`] - The [`TabComponent`] contract
//! - [`context`] - Connection details shared by the dispatcher and the Settings tab
//! - [`event_handler`] - Terminal input translated into [`AppEvent`]s
//! - [`task_manager`] - Async execution of effects via the [`TaskManager`]
//!
//! # Architecture
//!
//! 1. Terminal input and task completions arrive on one channel as [`AppEvent`]s
//! 2. The dispatcher turns each event into a state change plus a list of [`Effect`]s
//! 3. The [`TaskManager`] runs the effects and posts an [`Action`] for each result

pub mod actions;
pub mod component;
pub mod context;
pub mod event_handler;
pub mod task_manager;

pub use actions::{Action, Effect, Probe, ProbeOutcome, TransferMode, TransferRequest, TransferSummary};
pub use component::{TabComponent, TabTarget};
pub use context::Session;
pub use event_handler::{AppEvent, EventHandler};
pub use task_manager::{TaskId, TaskManager};
