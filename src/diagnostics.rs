//! Heuristic classification of backend error text.
//!
//! The server does not return structured reasons for every failure, so the
//! startup panel and the recovery banner inspect message text.

use std::fmt;

use crate::constants::CODE_FORBIDDEN;

/// Status of the API liveness probe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiStatus {
    Ok,
    Timeout,
    Down,
}

/// Status of the auth introspection probe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthStatus {
    Ok,
    Missing,
    Invalid,
}

/// Status of the taxonomy read probe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaxonomyStatus {
    Ok,
    Forbidden,
    SchemaError,
    Failed,
}

impl ApiStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ApiStatus::Ok => "ok",
            ApiStatus::Timeout => "timeout",
            ApiStatus::Down => "down",
        }
    }
}

impl AuthStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            AuthStatus::Ok => "ok",
            AuthStatus::Missing => "missing",
            AuthStatus::Invalid => "invalid",
        }
    }
}

impl TaxonomyStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            TaxonomyStatus::Ok => "ok",
            TaxonomyStatus::Forbidden => "forbidden",
            TaxonomyStatus::SchemaError => "schema_error",
            TaxonomyStatus::Failed => "failed",
        }
    }
}

impl fmt::Display for ApiStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for AuthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for TaxonomyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify the liveness probe. An empty error means the probe succeeded.
pub fn classify_startup_api(error: &str) -> ApiStatus {
    if error.is_empty() {
        return ApiStatus::Ok;
    }
    let lower = error.to_lowercase();
    if lower.contains("timeout") || lower.contains("deadline exceeded") {
        ApiStatus::Timeout
    } else {
        ApiStatus::Down
    }
}

/// Classify the auth probe given the configured key
pub fn classify_startup_auth(error: &str, api_key: &str) -> AuthStatus {
    if api_key.trim().is_empty() {
        AuthStatus::Missing
    } else if error.is_empty() {
        AuthStatus::Ok
    } else {
        AuthStatus::Invalid
    }
}

/// Classify the taxonomy probe
pub fn classify_startup_taxonomy(error: &str) -> TaxonomyStatus {
    if error.is_empty() {
        return TaxonomyStatus::Ok;
    }
    let lower = error.to_lowercase();
    if lower.contains("forbidden") || lower.contains("scope") {
        TaxonomyStatus::Forbidden
    } else if lower.contains("column ") || lower.contains("relation ") || lower.contains("schema") {
        TaxonomyStatus::SchemaError
    } else {
        TaxonomyStatus::Failed
    }
}

/// Whether an error can be fixed in place by re-login or settings changes
pub fn should_show_recovery_hints(code: &str, message: &str) -> bool {
    if code != CODE_FORBIDDEN {
        return false;
    }
    let lower = message.to_lowercase();
    lower.contains("scope") || lower.contains("admin")
}
