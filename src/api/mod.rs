//! LearningObjectApi trait: the only boundary between the pipeline and the
//! learning-management service.
//!
//! Two implementations:
//!
//! - [`HttpLearningObjectApi`] talks to the live JSON:API endpoint over reqwest.
//! - [`FixtureApi`] serves canned documents in-process and records every
//!   request it receives.

pub mod fixture;
pub mod http;

use async_trait::async_trait;

use crate::error::ApiResult;
use crate::model::{LearningObjectRef, LoDocument};

pub use fixture::FixtureApi;
pub use http::HttpLearningObjectApi;

#[async_trait]
pub trait LearningObjectApi: Send + Sync {
    /// Fetch the root object with the full include list
    async fn fetch_root(&self, lo_ref: &LearningObjectRef, token: &str) -> ApiResult<LoDocument>;

    /// Fetch one child object by its opaque id (no includes)
    async fn fetch_child(&self, child_id: &str, token: &str) -> ApiResult<LoDocument>;
}
