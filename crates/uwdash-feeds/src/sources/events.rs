//! Campus events from the open data API.

use serde::Deserialize;
use uwdash_core::{Event, EventsSettings};

use super::{BlockSource, RenderContext};
use crate::client::decode;
use crate::dates::{display_date, display_optional_date};
use crate::endpoints::Endpoints;
use crate::error::FeedError;
use crate::sanitize::sanitize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EventEntry {
    title: String,
    event_start_date: String,
    #[serde(default)]
    event_end_date: Option<String>,
    item_uri: String,
    #[serde(default)]
    event_type: Option<String>,
    #[serde(default)]
    content: Option<String>,
}

#[must_use]
pub fn events_url(endpoints: &Endpoints, settings: &EventsSettings) -> String {
    endpoints.open_data(&format!("Wcms/latestevents/{}", settings.max_items))
}

impl BlockSource for EventsSettings {
    type Output = Vec<Event>;

    async fn build(&self, ctx: &mut RenderContext<'_>) -> Result<Vec<Event>, FeedError> {
        let url = events_url(ctx.endpoints, self);
        let body = ctx
            .client
            .fetch(&url, ctx.endpoints.open_data_headers())
            .await?;
        let entries: Vec<EventEntry> = decode("events feed", &body)?;
        tracing::debug!(count = entries.len(), "decoded events");

        let max_chars = self.max_chars.get();
        entries
            .into_iter()
            .map(|entry| {
                Ok(Event {
                    start_date: display_date("eventStartDate", &entry.event_start_date)?,
                    end_date: display_optional_date(
                        "eventEndDate",
                        entry.event_end_date.as_deref(),
                    )?,
                    content: sanitize(entry.content.as_deref().unwrap_or_default(), max_chars),
                    title: entry.title,
                    url: entry.item_uri,
                    event_type: entry.event_type.unwrap_or_default(),
                })
            })
            .collect()
    }
}
