//! Backend abstraction layer.
//!
//! This module defines the interface the UI uses to talk to the
//! knowledge-graph server, along with the shared data types and the error
//! type every call returns.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::constants::{CODE_TIMEOUT, CODE_UNAVAILABLE};

pub mod factory;
pub mod http;

pub use factory::create_backend;
pub use http::HttpBackend;

/// One row of an import or export, keyed by column name
pub type Row = serde_json::Map<String, serde_json::Value>;

/// Error returned by every backend call.
///
/// `code` is a machine-readable class such as `FORBIDDEN`; `message` is the
/// raw server or transport text that the UI classifies heuristically.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{code}: {message}")]
pub struct BackendError {
    pub code: String,
    pub message: String,
}

impl BackendError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(CODE_TIMEOUT, message)
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(CODE_UNAVAILABLE, message)
    }
}

/// Resource types exposed by the server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Entity,
    Knowledge,
    Relationship,
    Job,
    Log,
    File,
    Protocol,
    Approval,
    Audit,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 9] = [
        ResourceKind::Entity,
        ResourceKind::Knowledge,
        ResourceKind::Relationship,
        ResourceKind::Job,
        ResourceKind::Log,
        ResourceKind::File,
        ResourceKind::Protocol,
        ResourceKind::Approval,
        ResourceKind::Audit,
    ];

    /// Singular display name
    pub fn label(self) -> &'static str {
        match self {
            ResourceKind::Entity => "Entity",
            ResourceKind::Knowledge => "Knowledge",
            ResourceKind::Relationship => "Relationship",
            ResourceKind::Job => "Job",
            ResourceKind::Log => "Log",
            ResourceKind::File => "File",
            ResourceKind::Protocol => "Protocol",
            ResourceKind::Approval => "Approval",
            ResourceKind::Audit => "Audit entry",
        }
    }

    /// URL path segment
    pub fn path(self) -> &'static str {
        match self {
            ResourceKind::Entity => "entities",
            ResourceKind::Knowledge => "knowledge",
            ResourceKind::Relationship => "relationships",
            ResourceKind::Job => "jobs",
            ResourceKind::Log => "logs",
            ResourceKind::File => "files",
            ResourceKind::Protocol => "protocols",
            ResourceKind::Approval => "approvals",
            ResourceKind::Audit => "audit",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A server-side item as the UI displays it
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Record {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub fields: BTreeMap<String, String>,
}

impl Record {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            ..Default::default()
        }
    }

    /// Case-insensitive match against title and summary
    pub fn matches(&self, needle_lower: &str) -> bool {
        needle_lower.is_empty()
            || self.title.to_lowercase().contains(needle_lower)
            || self.summary.to_lowercase().contains(needle_lower)
    }
}

/// Fields sent when creating or updating a record
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RecordDraft {
    pub title: String,
    pub summary: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalDecision {
    Approve,
    Reject,
}

impl ApprovalDecision {
    pub fn verb(self) -> &'static str {
        match self {
            ApprovalDecision::Approve => "approve",
            ApprovalDecision::Reject => "reject",
        }
    }

    pub fn past_tense(self) -> &'static str {
        match self {
            ApprovalDecision::Approve => "approved",
            ApprovalDecision::Reject => "rejected",
        }
    }
}

/// Result of session introspection
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SessionInfo {
    pub username: String,
    #[serde(default)]
    pub scopes: Vec<String>,
}

/// Fresh credentials issued by a re-login
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub api_key: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ImportSummary {
    pub created: usize,
    pub failed: usize,
}

/// Interface to the knowledge-graph server.
///
/// Implementations must be shareable across tasks; every call is issued from
/// a spawned task with its own `Arc` handle.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Liveness probe
    async fn health(&self) -> Result<(), BackendError>;

    /// Who the configured key belongs to
    async fn whoami(&self) -> Result<SessionInfo, BackendError>;

    /// Issue a fresh key for `username`
    async fn reauthenticate(&self, username: &str) -> Result<Credentials, BackendError>;

    /// Replace the key used by subsequent calls
    fn set_api_key(&self, api_key: &str);

    /// Read the entity taxonomy
    async fn taxonomy(&self) -> Result<Vec<String>, BackendError>;

    async fn list(&self, kind: ResourceKind) -> Result<Vec<Record>, BackendError>;
    async fn get(&self, kind: ResourceKind, id: &str) -> Result<Record, BackendError>;
    async fn create(&self, kind: ResourceKind, draft: &RecordDraft) -> Result<Record, BackendError>;
    async fn update(&self, kind: ResourceKind, id: &str, draft: &RecordDraft) -> Result<Record, BackendError>;

    /// Approve or reject a pending approval
    async fn decide_approval(&self, id: &str, decision: ApprovalDecision) -> Result<Record, BackendError>;

    async fn bulk_import(&self, kind: ResourceKind, rows: &[Row]) -> Result<ImportSummary, BackendError>;

    /// Server-rendered rows for an export
    async fn export_rows(&self, kind: ResourceKind) -> Result<Vec<Row>, BackendError>;

    /// Text search, optionally restricted to one resource type
    async fn search(&self, kind: Option<ResourceKind>, query: &str, limit: usize) -> Result<Vec<Record>, BackendError>;
}
