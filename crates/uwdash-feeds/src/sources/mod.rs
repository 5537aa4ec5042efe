//! Source adapters, one per block kind.
//!
//! Each adapter is the block's settings type implementing [`BlockSource`]:
//! it builds the request URL from its settings, fetches through the shared
//! [`RemoteClient`], and maps the decoded response into canonical entities.

mod events;
mod global_news;
mod important_dates;
mod news;
mod stories;

pub use events::events_url;
pub use global_news::global_news_url;
pub use important_dates::{important_dates_url, trailing_window};
pub use news::news_url;
pub use stories::stories_url;

use crate::client::RemoteClient;
use crate::endpoints::Endpoints;
use crate::error::FeedError;
use crate::labels::LabelResolver;

/// Everything an adapter may use during one render.
#[derive(Debug)]
pub struct RenderContext<'a> {
    pub client: &'a RemoteClient,
    pub endpoints: &'a Endpoints,
    /// Fresh for every render.
    pub labels: LabelResolver<'a>,
}

impl<'a> RenderContext<'a> {
    #[must_use]
    pub fn new(client: &'a RemoteClient, endpoints: &'a Endpoints) -> Self {
        Self {
            client,
            endpoints,
            labels: LabelResolver::new(client, endpoints),
        }
    }
}

/// A block kind that can produce its display structure from remote data.
#[allow(async_fn_in_trait)]
pub trait BlockSource {
    type Output;

    /// Runs the block's fetch chain and maps the result.
    ///
    /// # Errors
    ///
    /// Any fetch, decode, date or label failure; adapters never return
    /// partial content.
    async fn build(&self, ctx: &mut RenderContext<'_>) -> Result<Self::Output, FeedError>;
}

/// Joins string values with `", "`, as used for keyword and audience lists.
pub(crate) fn join_list<S: AsRef<str>>(values: &[S]) -> String {
    values
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(", ")
}
