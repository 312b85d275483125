//! HTTP implementation of LearningObjectApi

use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;
use tracing::debug;
use url::Url;

use super::LearningObjectApi;
use crate::config::{PipelineConfig, JSON_API_MEDIA_TYPE};
use crate::error::{ApiError, ApiResult};
use crate::model::{LearningObjectRef, LoDocument};

/// Live client for the `learningObjects` endpoint
pub struct HttpLearningObjectApi {
    client: Client,
    api_base: String,
    includes: String,
    root_params: Vec<(String, String)>,
}

impl HttpLearningObjectApi {
    pub fn new(config: &PipelineConfig) -> ApiResult<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.fetch_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;
        Ok(Self::with_client(client, config))
    }

    pub fn with_client(client: Client, config: &PipelineConfig) -> Self {
        Self {
            client,
            api_base: config.api_base.clone(),
            includes: config.include_param(),
            root_params: config.root_params.clone(),
        }
    }

    fn object_url(&self, object_id: &str) -> ApiResult<Url> {
        let mut url = Url::parse(&self.api_base).map_err(|e| ApiError::Network(format!("invalid API base: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| ApiError::Network(format!("invalid API base: {}", self.api_base)))?
            .pop_if_empty()
            .push("learningObjects")
            .push(object_id);
        Ok(url)
    }

    /// `{base}/learningObjects/{type}:{id}?include=...&useCache=true&...`
    pub fn root_url(&self, lo_ref: &LearningObjectRef) -> ApiResult<Url> {
        let mut url = self.object_url(&lo_ref.to_string())?;
        {
            let mut query = url.query_pairs_mut();
            if !self.includes.is_empty() {
                query.append_pair("include", &self.includes);
            }
            for (key, value) in &self.root_params {
                query.append_pair(key, value);
            }
        }
        Ok(url)
    }

    /// `{base}/learningObjects/{childId}`
    pub fn child_url(&self, child_id: &str) -> ApiResult<Url> {
        self.object_url(child_id)
    }

    async fn get_document(&self, url: Url, token: &str) -> ApiResult<LoDocument> {
        debug!(%url, "GET learning object");

        let response = self
            .client
            .get(url)
            .header(AUTHORIZATION, format!("Bearer {}", token))
            .header(ACCEPT, JSON_API_MEDIA_TYPE)
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or_default().to_string(),
            });
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl LearningObjectApi for HttpLearningObjectApi {
    async fn fetch_root(&self, lo_ref: &LearningObjectRef, token: &str) -> ApiResult<LoDocument> {
        let url = self.root_url(lo_ref)?;
        self.get_document(url, token).await
    }

    async fn fetch_child(&self, child_id: &str, token: &str) -> ApiResult<LoDocument> {
        let url = self.child_url(child_id)?;
        self.get_document(url, token).await
    }
}
