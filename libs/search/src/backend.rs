//! Collaborator seams: the document index and the permission store.

use crate::params::SearchRequest;
use async_trait::async_trait;
use serde_json::{Map, Value as JsonValue};

/// Classified failure reported by the document index.
///
/// Statuses below 500 are client faults (malformed request bodies,
/// unmappable field types); 500 and above are backend faults.
#[derive(Debug, Clone)]
pub struct BackendError {
    pub status: u16,
    pub message: String,
}

impl BackendError {
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn is_client_fault(&self) -> bool {
        self.status < 500
    }
}

/// One raw hit as returned by the index.
#[derive(Debug, Clone)]
pub struct RawHit {
    pub id: String,
    pub source: Map<String, JsonValue>,
}

/// Raw search response from the index.
#[derive(Debug, Clone)]
pub struct RawSearchResponse {
    pub timed_out: bool,
    pub total: u64,
    pub hits: Vec<RawHit>,
}

/// A searchable entity index with a declared field-path set.
///
/// Implemented by the persistence layer; the engine only sees the
/// schema's field paths and a search operation. The index client is
/// expected to enforce its own deadline.
#[async_trait]
pub trait SearchIndex: Send + Sync {
    /// Ordered, deduplicated dotted field paths known to the schema.
    fn known_paths(&self) -> &[String];

    /// Execute a compiled request body against the index.
    async fn search(
        &self,
        body: JsonValue,
        request: &SearchRequest,
    ) -> std::result::Result<RawSearchResponse, BackendError>;
}

/// The acting principal, authenticated or anonymous.
#[async_trait]
pub trait Principal: Send + Sync {
    /// Whether the principal holds `action` on `subject`
    /// (e.g. `list user`). Backed by the permission-rule store.
    async fn has_permission(&self, subject: &str, action: &str) -> bool;
}
