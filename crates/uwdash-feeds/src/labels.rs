//! Label Resolver: turns opaque filter ids into display names.

use std::collections::{HashMap, HashSet};

use futures::future::try_join_all;
use serde_json::Value;

use crate::client::RemoteClient;
use crate::endpoints::Endpoints;
use crate::error::FeedError;

/// A filter dimension whose ids can be looked up for a display name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LabelCategory {
    Topics,
    Audience,
    Faculties,
    StoryType,
    /// Campus news site, looked up on the open data API.
    Site,
}

impl LabelCategory {
    /// Path segment of the category's detail endpoint.
    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            LabelCategory::Topics => "topics",
            LabelCategory::Audience => "audience",
            LabelCategory::Faculties => "faculties",
            LabelCategory::StoryType => "news_type",
            LabelCategory::Site => "Wcms",
        }
    }

    /// JSON pointer to the label in a detail response.
    fn label_pointer(self) -> &'static str {
        match self {
            LabelCategory::Site => "/name",
            _ => "/data/0/label",
        }
    }

    fn field_name(self) -> &'static str {
        match self {
            LabelCategory::Site => "name",
            _ => "data[0].label",
        }
    }
}

/// Resolves ids to labels, remembering every answer for its own lifetime.
///
/// One resolver is created per render so repeated ids inside a render cost a
/// single lookup, while nothing is carried across renders.
#[derive(Debug)]
pub struct LabelResolver<'a> {
    client: &'a RemoteClient,
    endpoints: &'a Endpoints,
    cache: HashMap<(LabelCategory, String), String>,
}

impl<'a> LabelResolver<'a> {
    #[must_use]
    pub fn new(client: &'a RemoteClient, endpoints: &'a Endpoints) -> Self {
        Self {
            client,
            endpoints,
            cache: HashMap::new(),
        }
    }

    /// Returns the labels of `ids`, in input order, joined with `", "`.
    /// An empty list resolves to an empty string without any request.
    ///
    /// # Errors
    ///
    /// Any lookup failure fails the whole call: transport and status errors
    /// from the client, or [`FeedError::MissingField`] when a response has
    /// no label.
    pub async fn resolve<S: AsRef<str>>(
        &mut self,
        category: LabelCategory,
        ids: &[S],
    ) -> Result<String, FeedError> {
        let mut seen = HashSet::new();
        let pending: Vec<&str> = ids
            .iter()
            .map(AsRef::as_ref)
            .filter(|id| !self.cache.contains_key(&(category, (*id).to_string())))
            .filter(|id| seen.insert(*id))
            .collect();

        if !pending.is_empty() {
            tracing::debug!(category = ?category, count = pending.len(), "resolving labels");
            let client = self.client;
            let endpoints = self.endpoints;
            let labels = try_join_all(
                pending
                    .iter()
                    .map(|id| fetch_label(client, endpoints, category, id)),
            )
            .await?;
            for (id, label) in pending.into_iter().zip(labels) {
                self.cache.insert((category, id.to_string()), label);
            }
        }

        let labels: Vec<&str> = ids
            .iter()
            .filter_map(|id| self.cache.get(&(category, id.as_ref().to_string())))
            .map(String::as_str)
            .collect();
        Ok(labels.join(", "))
    }
}

async fn fetch_label(
    client: &RemoteClient,
    endpoints: &Endpoints,
    category: LabelCategory,
    id: &str,
) -> Result<String, FeedError> {
    let (url, headers) = match category {
        LabelCategory::Site => (
            endpoints.open_data(&format!("Wcms/{id}")),
            endpoints.open_data_headers(),
        ),
        _ => (
            endpoints.stories(&format!("{}/{id}", category.path())),
            endpoints.stories_headers(),
        ),
    };

    let body: Value = client.fetch_json(&url, headers).await?;
    body.pointer(category.label_pointer())
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| FeedError::MissingField {
            context: url,
            field: category.field_name().to_string(),
        })
}
