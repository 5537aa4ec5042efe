//! Option lists that only the remote APIs know: story filter vocabularies and
//! the news API's source directory.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uwdash_core::ConfigError;

use crate::client::RemoteClient;
use crate::endpoints::Endpoints;
use crate::error::FeedError;
use crate::labels::LabelCategory;

/// One selectable value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionEntry {
    pub id: String,
    pub label: String,
}

#[derive(Debug, Deserialize)]
struct StoryOptionsResponse {
    data: Vec<StoryOption>,
}

#[derive(Debug, Deserialize)]
struct StoryOption {
    id: Value,
    label: String,
}

#[derive(Debug, Deserialize)]
struct SourcesResponse {
    sources: Vec<NewsSource>,
}

#[derive(Debug, Deserialize)]
struct NewsSource {
    id: String,
    name: String,
}

fn id_to_string(id: Value) -> String {
    match id {
        Value::String(s) => s,
        other => other.to_string(),
    }
}

/// Lists the values editors can pick for a story filter dimension.
///
/// # Errors
///
/// Returns [`FeedError::Config`] for [`LabelCategory::Site`], which has no
/// listing endpoint, plus any fetch or decode failure.
pub async fn fetch_story_options(
    client: &RemoteClient,
    endpoints: &Endpoints,
    category: LabelCategory,
) -> Result<Vec<OptionEntry>, FeedError> {
    if category == LabelCategory::Site {
        return Err(ConfigError::Validation(
            "news sites have no remote listing; use the news_site catalog".to_string(),
        )
        .into());
    }

    let url = endpoints.stories(category.path());
    let response: StoryOptionsResponse = client
        .fetch_json(&url, endpoints.stories_headers())
        .await?;
    Ok(response
        .data
        .into_iter()
        .map(|o| OptionEntry {
            id: id_to_string(o.id),
            label: o.label,
        })
        .collect())
}

/// Lists the publishers the news API can filter on.
///
/// # Errors
///
/// Any fetch or decode failure.
pub async fn fetch_news_sources(
    client: &RemoteClient,
    endpoints: &Endpoints,
) -> Result<Vec<OptionEntry>, FeedError> {
    let url = endpoints.news_api("sources");
    let response: SourcesResponse = client
        .fetch_json(&url, endpoints.news_api_headers())
        .await?;
    tracing::debug!(count = response.sources.len(), "fetched news sources");
    Ok(response
        .sources
        .into_iter()
        .map(|s| OptionEntry {
            id: s.id,
            label: s.name,
        })
        .collect())
}
