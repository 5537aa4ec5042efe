//! Campus news, either across all sites or for one faculty site.

use serde_json::{Map, Value};
use uwdash_core::{NewsBlock, NewsItem, NewsSettings};

use super::{BlockSource, RenderContext};
use crate::client::decode;
use crate::dates::display_date;
use crate::endpoints::Endpoints;
use crate::error::FeedError;
use crate::labels::LabelCategory;
use crate::sanitize::sanitize;

const ALL_SITES_LABEL: &str = "All";

#[must_use]
pub fn news_url(endpoints: &Endpoints, settings: &NewsSettings) -> String {
    if settings.is_all() {
        endpoints.open_data(&format!("Wcms/latestnews/{}", settings.max_items))
    } else {
        endpoints.open_data(&format!(
            "Wcms/{}/news?newestFirst=true&maxItems={}",
            settings.filter, settings.max_items
        ))
    }
}

fn take_string(entry: &mut Map<String, Value>, field: &str) -> Result<String, FeedError> {
    match entry.remove(field) {
        Some(Value::String(s)) => Ok(s),
        _ => Err(FeedError::MissingField {
            context: "news feed".to_string(),
            field: field.to_string(),
        }),
    }
}

fn map_entry(mut entry: Map<String, Value>, max_chars: usize) -> Result<NewsItem, FeedError> {
    let title = take_string(&mut entry, "title")?;
    let posted = take_string(&mut entry, "postedDate")?;
    let content = match entry.remove("content") {
        Some(Value::String(html)) => sanitize(&html, max_chars),
        _ => String::new(),
    };

    Ok(NewsItem {
        title,
        posted_date: display_date("postedDate", &posted)?,
        content,
        extra: entry,
    })
}

impl BlockSource for NewsSettings {
    type Output = NewsBlock;

    async fn build(&self, ctx: &mut RenderContext<'_>) -> Result<NewsBlock, FeedError> {
        let url = news_url(ctx.endpoints, self);
        let body = ctx
            .client
            .fetch(&url, ctx.endpoints.open_data_headers())
            .await?;
        let entries: Vec<Map<String, Value>> = decode("news feed", &body)?;
        tracing::debug!(site = %self.filter, count = entries.len(), "decoded news");

        let max_chars = self.max_chars.get();
        let news = entries
            .into_iter()
            .map(|entry| map_entry(entry, max_chars))
            .collect::<Result<Vec<_>, FeedError>>()?;

        let filter = if self.is_all() {
            ALL_SITES_LABEL.to_string()
        } else {
            ctx.labels
                .resolve(LabelCategory::Site, std::slice::from_ref(&self.filter))
                .await?
        };

        Ok(NewsBlock { news, filter })
    }
}
