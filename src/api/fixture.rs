//! In-process LearningObjectApi serving canned documents
//!
//! Used by the integration tests and by the CLI's offline mode. Fixture files
//! map an object id (`course:42`) to either a JSON:API document or a bare
//! `{ "status": 404 }` failure.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::debug;

use super::LearningObjectApi;
use crate::error::{ApiError, ApiResult};
use crate::model::{LearningObjectRef, LoDocument};

/// Canned response for one object id
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum FixtureResponse {
    Status { status: u16 },
    Document(LoDocument),
}

/// Which endpoint a recorded request hit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    Root,
    Child,
}

/// One request seen by the fixture
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub kind: RequestKind,
    pub id: String,
    pub token: String,
}

#[derive(Debug, Default)]
pub struct FixtureApi {
    responses: HashMap<String, FixtureResponse>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl FixtureApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a fixture file body: `{ "<id>": <document> | { "status": n } }`
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        let responses: HashMap<String, FixtureResponse> = serde_json::from_str(json)?;
        Ok(Self {
            responses,
            requests: Mutex::new(Vec::new()),
        })
    }

    /// Serve `doc` for `id`
    pub fn with_document(mut self, id: &str, doc: LoDocument) -> Self {
        self.responses.insert(id.to_string(), FixtureResponse::Document(doc));
        self
    }

    /// Serve a JSON document value for `id`
    pub fn with_json(self, id: &str, doc: serde_json::Value) -> Result<Self, serde_json::Error> {
        let doc: LoDocument = serde_json::from_value(doc)?;
        Ok(self.with_document(id, doc))
    }

    /// Fail requests for `id` with an HTTP status
    pub fn with_status(mut self, id: &str, status: u16) -> Self {
        self.responses.insert(id.to_string(), FixtureResponse::Status { status });
        self
    }

    /// Every request received so far, in order
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().map(|r| r.len()).unwrap_or_default()
    }

    fn respond(&self, kind: RequestKind, id: &str, token: &str) -> ApiResult<LoDocument> {
        debug!(?kind, id, "fixture request");
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(RecordedRequest {
                kind,
                id: id.to_string(),
                token: token.to_string(),
            });
        }

        match self.responses.get(id) {
            Some(FixtureResponse::Document(doc)) => Ok(doc.clone()),
            Some(FixtureResponse::Status { status }) => Err(status_error(*status)),
            None => Err(status_error(404)),
        }
    }
}

fn status_error(status: u16) -> ApiError {
    let reason = StatusCode::from_u16(status)
        .ok()
        .and_then(|s| s.canonical_reason())
        .unwrap_or_default();
    ApiError::Status {
        status,
        reason: reason.to_string(),
    }
}

#[async_trait]
impl LearningObjectApi for FixtureApi {
    async fn fetch_root(&self, lo_ref: &LearningObjectRef, token: &str) -> ApiResult<LoDocument> {
        self.respond(RequestKind::Root, &lo_ref.to_string(), token)
    }

    async fn fetch_child(&self, child_id: &str, token: &str) -> ApiResult<LoDocument> {
        self.respond(RequestKind::Child, child_id, token)
    }
}
