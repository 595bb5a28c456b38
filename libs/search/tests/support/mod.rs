//! In-memory fakes for the index and permission collaborators.

use async_trait::async_trait;
use serde_json::Value as JsonValue;
use std::collections::HashSet;
use std::sync::Mutex;
use warden_search::{
    BackendError, Principal, RawHit, RawSearchResponse, SearchIndex, SearchRequest,
};

/// Principal backed by an explicit set of `(subject, action)` grants.
pub struct FakePrincipal {
    grants: HashSet<(String, String)>,
}

impl FakePrincipal {
    pub fn new(grants: &[(&str, &str)]) -> Self {
        Self {
            grants: grants
                .iter()
                .map(|(subject, action)| (subject.to_string(), action.to_string()))
                .collect(),
        }
    }
}

#[async_trait]
impl Principal for FakePrincipal {
    async fn has_permission(&self, subject: &str, action: &str) -> bool {
        self.grants
            .contains(&(subject.to_string(), action.to_string()))
    }
}

/// Index fake returning a canned response and recording every call.
pub struct FakeIndex {
    paths: Vec<String>,
    outcome: std::result::Result<RawSearchResponse, BackendError>,
    pub calls: Mutex<Vec<(JsonValue, SearchRequest)>>,
}

impl FakeIndex {
    pub fn with_hits(paths: &[&str], hits: Vec<RawHit>) -> Self {
        let total = hits.len() as u64;
        Self {
            paths: paths.iter().map(|s| s.to_string()).collect(),
            outcome: Ok(RawSearchResponse {
                timed_out: false,
                total,
                hits,
            }),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn empty(paths: &[&str]) -> Self {
        Self::with_hits(paths, Vec::new())
    }

    pub fn failing(paths: &[&str], error: BackendError) -> Self {
        Self {
            paths: paths.iter().map(|s| s.to_string()).collect(),
            outcome: Err(error),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().expect("calls lock").len()
    }

    pub fn last_call(&self) -> (JsonValue, SearchRequest) {
        self.calls
            .lock()
            .expect("calls lock")
            .last()
            .expect("index was called")
            .clone()
    }
}

#[async_trait]
impl SearchIndex for FakeIndex {
    fn known_paths(&self) -> &[String] {
        &self.paths
    }

    async fn search(
        &self,
        body: JsonValue,
        request: &SearchRequest,
    ) -> std::result::Result<RawSearchResponse, BackendError> {
        self.calls
            .lock()
            .expect("calls lock")
            .push((body, request.clone()));
        self.outcome.clone()
    }
}

pub fn hit(id: &str, source: JsonValue) -> RawHit {
    RawHit {
        id: id.to_string(),
        source: source
            .as_object()
            .cloned()
            .unwrap_or_default(),
    }
}
