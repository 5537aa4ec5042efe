//! Academic important dates from the open data API.
//!
//! The endpoint has no size parameter and lists dates oldest first, so the
//! block keeps the trailing `max_items` entries and shows them newest first.

use serde::Deserialize;
use uwdash_core::{ImportantDate, ImportantDatesSettings, TermDate};

use super::{join_list, BlockSource, RenderContext};
use crate::client::decode;
use crate::dates::{display_date, display_optional_date};
use crate::endpoints::Endpoints;
use crate::error::FeedError;
use crate::sanitize::sanitize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ImportantDateEntry {
    name: String,
    #[serde(default)]
    important_date_type: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    details: Vec<TermDetail>,
    #[serde(default)]
    keywords: Vec<String>,
    #[serde(default)]
    audiences: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TermDetail {
    term_name: String,
    start_date: String,
    #[serde(default)]
    end_date: Option<String>,
}

#[must_use]
pub fn important_dates_url(endpoints: &Endpoints) -> String {
    endpoints.open_data("ImportantDates")
}

/// The last `n` items of `items` (all of them when fewer), last item first.
#[must_use]
pub fn trailing_window<T>(items: Vec<T>, n: usize) -> Vec<T> {
    let skip = items.len().saturating_sub(n);
    items.into_iter().skip(skip).rev().collect()
}

fn map_entry(entry: ImportantDateEntry, max_chars: usize) -> Result<ImportantDate, FeedError> {
    let term_dates = entry
        .details
        .into_iter()
        .map(|detail| {
            Ok(TermDate {
                start_date: display_date("details.startDate", &detail.start_date)?,
                end_date: display_optional_date("details.endDate", detail.end_date.as_deref())?,
                term: detail.term_name,
            })
        })
        .collect::<Result<Vec<_>, FeedError>>()?;

    Ok(ImportantDate {
        title: entry.name,
        date_type: entry.important_date_type.unwrap_or_default(),
        content: sanitize(entry.description.as_deref().unwrap_or_default(), max_chars),
        term_dates,
        keywords: join_list(&entry.keywords),
        audiences: join_list(&entry.audiences),
    })
}

impl BlockSource for ImportantDatesSettings {
    type Output = Vec<ImportantDate>;

    async fn build(&self, ctx: &mut RenderContext<'_>) -> Result<Vec<ImportantDate>, FeedError> {
        let url = important_dates_url(ctx.endpoints);
        let body = ctx
            .client
            .fetch(&url, ctx.endpoints.open_data_headers())
            .await?;
        let entries: Vec<ImportantDateEntry> = decode("important dates feed", &body)?;
        tracing::debug!(
            available = entries.len(),
            max_items = self.max_items,
            "decoded important dates"
        );

        let max_chars = self.max_chars.get();
        trailing_window(entries, self.max_items as usize)
            .into_iter()
            .map(|entry| map_entry(entry, max_chars))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::test_support::mocked;
    use serde_json::{json, Value};
    use uwdash_core::MaxChars;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn item(n: usize) -> Value {
        json!({
            "name": format!("item{n}"),
            "importantDateType": "Deadline",
            "description": format!("<p>Description {n}</p>"),
            "details": [
                {"termName": "Fall 2025", "startDate": "2025-09-03", "endDate": null},
                {"termName": "Winter 2026", "startDate": "2026-01-05T00:00:00", "endDate": "2026-01-09T00:00:00"}
            ],
            "keywords": ["fees", "tuition"],
            "audiences": ["Undergraduate students"]
        })
    }

    #[test]
    fn window_takes_trailing_items_newest_first() {
        assert_eq!(trailing_window(vec![0, 1, 2, 3, 4], 3), vec![4, 3, 2]);
        assert_eq!(trailing_window(vec![0, 1], 5), vec![1, 0]);
        assert!(trailing_window(Vec::<u8>::new(), 3).is_empty());
    }

    #[tokio::test]
    async fn renders_trailing_window_in_reverse() {
        let server = MockServer::start().await;
        let body: Vec<Value> = (0..5).map(item).collect();
        Mock::given(method("GET"))
            .and(path("/ImportantDates"))
            .and(header("X-API-KEY", "open-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .expect(1)
            .mount(&server)
            .await;

        let (client, endpoints) = mocked(&server);
        let mut ctx = RenderContext::new(&client, &endpoints);
        let settings = ImportantDatesSettings {
            max_items: 3,
            max_chars: MaxChars::default(),
        };
        let dates = settings.build(&mut ctx).await.unwrap();

        let titles: Vec<&str> = dates.iter().map(|d| d.title.as_str()).collect();
        assert_eq!(titles, vec!["item4", "item3", "item2"]);

        let first = &dates[0];
        assert_eq!(first.date_type, "Deadline");
        assert_eq!(first.content, "<p>Description 4</p>");
        assert_eq!(first.keywords, "fees, tuition");
        assert_eq!(first.audiences, "Undergraduate students");
        assert_eq!(first.term_dates.len(), 2);
        assert_eq!(first.term_dates[0].term, "Fall 2025");
        assert_eq!(first.term_dates[0].start_date, "Sep 3, 2025");
        assert_eq!(first.term_dates[0].end_date, None);
        assert_eq!(first.term_dates[1].end_date.as_deref(), Some("Jan 9, 2026"));
    }

    #[tokio::test]
    async fn fewer_items_than_requested_renders_all() {
        let server = MockServer::start().await;
        let body: Vec<Value> = (0..2).map(item).collect();
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&server)
            .await;

        let (client, endpoints) = mocked(&server);
        let mut ctx = RenderContext::new(&client, &endpoints);
        let settings = ImportantDatesSettings {
            max_items: 15,
            max_chars: MaxChars::default(),
        };
        let dates = settings.build(&mut ctx).await.unwrap();
        let titles: Vec<&str> = dates.iter().map(|d| d.title.as_str()).collect();
        assert_eq!(titles, vec!["item1", "item0"]);
    }

    #[test]
    fn empty_lists_join_to_empty_strings() {
        let entry: ImportantDateEntry =
            serde_json::from_value(json!({"name": "Reading week"})).unwrap();
        let date = map_entry(entry, 400).unwrap();
        assert_eq!(date.keywords, "");
        assert_eq!(date.audiences, "");
        assert!(date.term_dates.is_empty());
        assert_eq!(date.content, "");
    }

    #[tokio::test]
    async fn error_envelope_is_a_decode_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "error"})))
            .mount(&server)
            .await;

        let (client, endpoints) = mocked(&server);
        let mut ctx = RenderContext::new(&client, &endpoints);
        let settings = ImportantDatesSettings {
            max_items: 3,
            max_chars: MaxChars::default(),
        };
        let err = settings.build(&mut ctx).await.unwrap_err();
        assert!(matches!(err, FeedError::Deserialize { .. }), "got: {err:?}");
    }
}
