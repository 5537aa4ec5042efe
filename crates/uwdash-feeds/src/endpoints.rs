//! Base URLs and credentials for the three upstream API families.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use uwdash_core::{AppConfig, ConfigError};

pub const API_KEY_HEADER: &str = "X-API-KEY";

/// Where each source lives and which headers authenticate against it.
///
/// Keys are explicit inputs so tests can point the pipeline at a mock server
/// with fake credentials.
#[derive(Debug, Clone)]
pub struct Endpoints {
    open_data_base: String,
    news_api_base: String,
    stories_base: String,
    open_data_headers: HeaderMap,
    news_api_headers: HeaderMap,
    anonymous: HeaderMap,
}

impl Endpoints {
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEnvVar`] if an API key cannot be sent as
    /// a header value.
    pub fn new(
        open_data_base: &str,
        news_api_base: &str,
        stories_base: &str,
        open_data_api_key: Option<&str>,
        news_api_key: Option<&str>,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            open_data_base: open_data_base.trim_end_matches('/').to_string(),
            news_api_base: news_api_base.trim_end_matches('/').to_string(),
            stories_base: stories_base.trim_end_matches('/').to_string(),
            open_data_headers: key_headers("UWDASH_OPEN_DATA_API_KEY", open_data_api_key)?,
            news_api_headers: key_headers("UWDASH_NEWS_API_KEY", news_api_key)?,
            anonymous: HeaderMap::new(),
        })
    }

    /// # Errors
    ///
    /// See [`Endpoints::new`].
    pub fn from_app_config(config: &AppConfig) -> Result<Self, ConfigError> {
        if config.open_data_api_key.is_none() {
            tracing::warn!("UWDASH_OPEN_DATA_API_KEY not set; campus API requests are unauthenticated");
        }
        if config.news_api_key.is_none() {
            tracing::warn!("UWDASH_NEWS_API_KEY not set; global news requests are unauthenticated");
        }
        Self::new(
            &config.open_data_base_url,
            &config.news_api_base_url,
            &config.stories_base_url,
            config.open_data_api_key.as_deref(),
            config.news_api_key.as_deref(),
        )
    }

    #[must_use]
    pub fn open_data(&self, path: &str) -> String {
        join(&self.open_data_base, path)
    }

    #[must_use]
    pub fn news_api(&self, path: &str) -> String {
        join(&self.news_api_base, path)
    }

    #[must_use]
    pub fn stories(&self, path: &str) -> String {
        join(&self.stories_base, path)
    }

    #[must_use]
    pub fn open_data_headers(&self) -> &HeaderMap {
        &self.open_data_headers
    }

    #[must_use]
    pub fn news_api_headers(&self) -> &HeaderMap {
        &self.news_api_headers
    }

    /// The stories API takes no credentials.
    #[must_use]
    pub fn stories_headers(&self) -> &HeaderMap {
        &self.anonymous
    }
}

fn join(base: &str, path: &str) -> String {
    format!("{base}/{}", path.trim_start_matches('/'))
}

fn key_headers(var: &str, key: Option<&str>) -> Result<HeaderMap, ConfigError> {
    let mut headers = HeaderMap::new();
    if let Some(key) = key {
        let mut value = HeaderValue::from_str(key).map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })?;
        value.set_sensitive(true);
        headers.insert(HeaderName::from_static("x-api-key"), value);
    }
    Ok(headers)
}
