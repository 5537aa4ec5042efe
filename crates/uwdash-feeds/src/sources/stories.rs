//! Campus stories from the news pilot API.

use serde::Deserialize;
use serde_json::Value;
use uwdash_core::{StoriesBlock, StoriesSettings};

use super::{BlockSource, RenderContext};
use crate::client::decode;
use crate::endpoints::Endpoints;
use crate::error::FeedError;
use crate::labels::LabelCategory;

#[derive(Debug, Deserialize)]
struct StoriesResponse {
    data: Vec<Value>,
}

/// Multi-select dimensions, in the order they appear in the query and the
/// filter description.
fn dimensions(settings: &StoriesSettings) -> [(&'static str, LabelCategory, &[String]); 3] {
    [
        ("topics", LabelCategory::Topics, settings.topics.as_slice()),
        ("audience", LabelCategory::Audience, settings.audience.as_slice()),
        ("faculties", LabelCategory::Faculties, settings.faculties.as_slice()),
    ]
}

#[must_use]
pub fn stories_url(endpoints: &Endpoints, settings: &StoriesSettings) -> String {
    let mut path = format!("news?sort=-date&range={}", settings.max_stories);
    for (name, _, ids) in dimensions(settings) {
        if !ids.is_empty() {
            path.push_str(&format!("&filter[{name}]={}", ids.join(",")));
        }
    }
    if let Some(story_type) = &settings.story_type {
        path.push_str(&format!("&filter[type]={story_type}"));
    }
    endpoints.stories(&path)
}

impl BlockSource for StoriesSettings {
    type Output = StoriesBlock;

    async fn build(&self, ctx: &mut RenderContext<'_>) -> Result<StoriesBlock, FeedError> {
        let url = stories_url(ctx.endpoints, self);
        let body = ctx
            .client
            .fetch(&url, ctx.endpoints.stories_headers())
            .await?;
        let response: StoriesResponse = decode("stories feed", &body)?;
        tracing::debug!(count = response.data.len(), "decoded stories");

        let mut labels = Vec::new();
        for (_, category, ids) in dimensions(self) {
            if !ids.is_empty() {
                labels.push(ctx.labels.resolve(category, ids).await?);
            }
        }
        if let Some(story_type) = &self.story_type {
            labels.push(
                ctx.labels
                    .resolve(LabelCategory::StoryType, std::slice::from_ref(story_type))
                    .await?,
            );
        }
        labels.retain(|l| !l.is_empty());

        Ok(StoriesBlock {
            filter_list: labels.join(", "),
            stories: response.data,
        })
    }
}
