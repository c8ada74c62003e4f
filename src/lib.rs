//! graphdesk - a terminal console for knowledge-graph servers
//!
//! This library provides the interactive controller of the console: a tabbed
//! view over the server's resources, a command palette, guided onboarding,
//! bulk import/export and a startup health check, all driven by one
//! serialized event loop.
//!
//! # Modules
//!
//! * [`backend`] - Server client interface, HTTP implementation and shared types
//! * [`config`] - Application configuration management
//! * [`diagnostics`] - Heuristic classification of backend errors
//! * [`transfer`] - JSON and CSV files for bulk import/export
//! * [`ui`] - Terminal user interface components

/// Backend abstraction layer and the HTTP client
pub mod backend;

/// Configuration module for managing application settings
pub mod config;

/// Application constants and default values
pub mod constants;

/// Error classification used by the startup panel and recovery banner
pub mod diagnostics;

/// Logging setup
pub mod logger;

/// Local file formats for bulk import and export
pub mod transfer;

/// Terminal user interface components and rendering
pub mod ui;
