//! Canonical, display-ready shapes produced by the block pipeline.
//!
//! Every source API has its own field names, date formats and nesting; the
//! adapters map them into these records so the templating layer only ever sees
//! one shape per block kind.

use serde::Serialize;
use serde_json::{Map, Value};

/// One campus event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Event {
    pub title: String,
    /// Formatted as `Mon D, YYYY`.
    pub start_date: String,
    /// `None` when the source reports no end date.
    pub end_date: Option<String>,
    pub url: String,
    #[serde(rename = "type")]
    pub event_type: String,
    pub content: String,
}

/// A date range attached to an important date, one per academic term.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TermDate {
    pub term: String,
    pub start_date: String,
    pub end_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportantDate {
    pub title: String,
    #[serde(rename = "type")]
    pub date_type: String,
    pub content: String,
    pub term_dates: Vec<TermDate>,
    /// Comma-joined keyword list.
    pub keywords: String,
    /// Comma-joined audience list.
    pub audiences: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewsItem {
    pub title: String,
    #[serde(rename = "postedDate")]
    pub posted_date: String,
    pub content: String,
    /// Remaining source fields, passed through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewsBlock {
    pub news: Vec<NewsItem>,
    /// `"All"` or the display name of the selected site.
    pub filter: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GlobalNewsItem {
    pub title: String,
    pub source: String,
    pub date: String,
    pub time: String,
    pub url: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Describes which global news dimension is active and its human label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterDescriptor {
    #[serde(rename = "type")]
    pub filter_type: String,
    pub filter: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GlobalNewsBlock {
    pub filter: FilterDescriptor,
    pub language: String,
    pub news: Vec<GlobalNewsItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoriesBlock {
    /// Human-readable description of every active filter, comma-joined.
    pub filter_list: String,
    /// Stories exactly as the source returned them.
    pub stories: Vec<Value>,
}

/// Output of one block render, ready for the templating boundary.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum RenderedBlock {
    Events(Vec<Event>),
    ImportantDates(Vec<ImportantDate>),
    News(NewsBlock),
    GlobalNews(GlobalNewsBlock),
    Stories(StoriesBlock),
}

impl RenderedBlock {
    /// Number of entries the block will display.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            RenderedBlock::Events(events) => events.len(),
            RenderedBlock::ImportantDates(dates) => dates.len(),
            RenderedBlock::News(block) => block.news.len(),
            RenderedBlock::GlobalNews(block) => block.news.len(),
            RenderedBlock::Stories(block) => block.stories.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
