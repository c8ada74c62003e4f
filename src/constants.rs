//! Constants used throughout the application
//!
//! This module centralizes magic strings, UI text, and other constant values
//! to improve maintainability and consistency.

use std::time::Duration;

/// Binary name used in recovery hints and log file names
pub const APP_NAME: &str = "graphdesk";

// Config
pub const CONFIG_FILE_NAME: &str = "graphdesk.toml";
pub const ENV_API_KEY: &str = "GRAPHDESK_API_KEY";
pub const ENV_SERVER_URL: &str = "GRAPHDESK_SERVER_URL";
pub const DEFAULT_SERVER_URL: &str = "http://localhost:8765";

// Timing defaults
/// How long a toast stays visible after it was set
pub const DEFAULT_TOAST_SECONDS: u64 = 3;
/// Per-probe timeout for the startup health check
pub const DEFAULT_STARTUP_TIMEOUT_SECONDS: u64 = 3;
/// Transport-level timeout for ordinary backend calls
pub const DEFAULT_REQUEST_TIMEOUT_SECONDS: u64 = 15;
/// Poll interval of the terminal event thread
pub const EVENT_POLL_INTERVAL: Duration = Duration::from_millis(100);

// Limits
/// Result bound for the palette entity-jump lookup
pub const PALETTE_ENTITY_LIMIT: usize = 15;
/// Result bound for the Search tab
pub const SEARCH_RESULT_LIMIT: usize = 50;
/// Maximum characters shown in a toast
pub const TOAST_MAX_CHARS: usize = 120;

// Error codes
pub const CODE_FORBIDDEN: &str = "FORBIDDEN";
pub const CODE_UNAUTHORIZED: &str = "UNAUTHORIZED";
pub const CODE_NOT_FOUND: &str = "NOT_FOUND";
pub const CODE_TIMEOUT: &str = "TIMEOUT";
pub const CODE_UNAVAILABLE: &str = "UNAVAILABLE";
pub const CODE_INVALID_DATA: &str = "INVALID_DATA";

// Toast messages
pub const TOAST_STARTUP_OK: &str = "Startup check passed";
pub const TOAST_QUICKSTART_DONE: &str = "Quickstart complete - you're all set";
pub const TOAST_QUICKSTART_SKIPPED: &str = "Quickstart skipped - reopen it from the palette";

// UI text
pub const CONFIG_GENERATED: &str = "Generated default configuration file";
pub const ERROR_NO_SERVER: &str = "Error: no server configured";
pub const RECOVERY_HINT: &str = "r: re-login  s: settings  c: show recovery command";
pub const STATUS_TAB_NAV: &str = "←/→ switch tab • ↓ enter tab • / palette • ? help • q quit";
pub const STATUS_CONTENT: &str = "↑ at top returns to tabs • / palette • ? help • q quit";
