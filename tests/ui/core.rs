#[path = "core/actions.rs"]
mod actions;

#[path = "core/context.rs"]
mod context;

#[path = "core/event_handler.rs"]
mod event_handler;
