//! Pipeline configuration
//!
//! Defaults carry the production learning-manager endpoint and include list.
//! Every value can be overridden from the environment via [`PipelineConfig::from_env`].

use std::time::Duration;

/// Default API base for the learning manager
pub const DEFAULT_API_BASE: &str = "https://learningmanager.adobe.com/primeapi/v2";

/// Session-store key the OAuth block writes the access token under
pub const DEFAULT_TOKEN_KEY: &str = "alm_access_token";

/// JSON:API media type used for content negotiation
pub const JSON_API_MEDIA_TYPE: &str = "application/vnd.api+json";

/// Relationship paths requested on the root fetch
const DEFAULT_INCLUDES: &[&str] = &[
    "instances.enrollment.loResourceGrades",
    "enrollment.loInstance.loResources.resources",
    "prerequisiteLOs",
    "subLOs.prerequisiteLOs.enrollment",
    "subLOs.subLOs.prerequisiteLOs.enrollment",
    "authors",
    "subLOs.enrollment.loResourceGrades",
    "subLOs.subLOs.enrollment.loResourceGrades",
    "subLOs.subLOs.instances.loResources.resources.room",
    "subLOs.instances.loResources.resources.room",
    "instances.loResources.resources",
    "supplementaryLOs.instances.loResources.resources",
    "supplementaryResources",
    "subLOs.supplementaryResources",
    "subLOs.enrollment",
    "instances.badge",
    "skills.skillLevel.badge",
    "skills.skillLevel.skill",
    "instances.loResources.resources.room",
    "subLOs.enrollment.loInstance.loResources.resources",
    "prerequisiteLOs.enrollment",
    "subLOs.supplementaryLOs.instances.loResources.resources",
    "enrollment.loResourceGrades",
];

/// Extra query parameters sent with the root fetch
const DEFAULT_ROOT_PARAMS: &[(&str, &str)] = &[
    ("useCache", "true"),
    ("filter.ignoreEnhancedLP", "false"),
    (
        "enforcedFields[learningObject]",
        "products,roles,extensionOverrides,effectivenessData",
    ),
    ("enforcedFields[sessionRecordingInfo]", "transcriptUrl"),
    ("enforcedFields[resource]", "isExternalUrl"),
];

/// Configuration for one render pipeline
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Base URL, without trailing slash
    pub api_base: String,
    /// Session-store key holding the bearer token
    pub token_key: String,
    /// Relationship include list for the root fetch
    pub includes: Vec<String>,
    /// Additional root-fetch query parameters
    pub root_params: Vec<(String, String)>,
    /// Gap between slider cards, in pixels
    pub slide_gap_px: f64,
    /// Rounding tolerance when testing the right-hand scroll extreme
    pub scroll_tolerance_px: f64,
    /// Delay before slider buttons are initialised after render
    pub slider_init_delay: Duration,
    /// Optional per-request timeout. `None` leaves it to the client defaults.
    pub fetch_timeout: Option<Duration>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            token_key: DEFAULT_TOKEN_KEY.to_string(),
            includes: DEFAULT_INCLUDES.iter().map(|s| s.to_string()).collect(),
            root_params: DEFAULT_ROOT_PARAMS
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            slide_gap_px: 16.0,
            scroll_tolerance_px: 1.0,
            slider_init_delay: Duration::from_millis(100),
            fetch_timeout: None,
        }
    }
}

impl PipelineConfig {
    /// Create from environment variables, falling back to defaults
    ///
    /// - `LO_API_BASE`
    /// - `LO_TOKEN_KEY`
    /// - `LO_SLIDER_INIT_DELAY_MS`
    /// - `LO_FETCH_TIMEOUT_SECS`
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(base) = std::env::var("LO_API_BASE") {
            config = config.with_api_base(&base);
        }
        if let Ok(key) = std::env::var("LO_TOKEN_KEY") {
            config.token_key = key;
        }
        if let Some(ms) = std::env::var("LO_SLIDER_INIT_DELAY_MS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
        {
            config.slider_init_delay = Duration::from_millis(ms);
        }
        config.fetch_timeout = std::env::var("LO_FETCH_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .map(Duration::from_secs);

        config
    }

    /// Override the API base
    pub fn with_api_base(mut self, base: &str) -> Self {
        self.api_base = base.trim_end_matches('/').to_string();
        self
    }

    /// Skip the post-render slider delay (tests, offline rendering)
    pub fn without_delays(mut self) -> Self {
        self.slider_init_delay = Duration::ZERO;
        self
    }

    /// Comma-joined include list
    pub fn include_param(&self) -> String {
        self.includes.join(",")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PipelineConfig::default();
        assert_eq!(config.token_key, "alm_access_token");
        assert_eq!(config.slide_gap_px, 16.0);
        assert!(config.fetch_timeout.is_none());
        assert!(config.include_param().contains("subLOs.enrollment"));
        assert!(!config.include_param().contains(' '));
    }

    #[test]
    fn test_api_base_trailing_slash_trimmed() {
        let config = PipelineConfig::default().with_api_base("http://localhost:9000/api/");
        assert_eq!(config.api_base, "http://localhost:9000/api");
    }
}
