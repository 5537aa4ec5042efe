//! Content aggregation pipeline for dashboard blocks.
//!
//! Fetches from the campus open data, news aggregation, and stories APIs,
//! then maps each response into the canonical entities in `uwdash-core`.

pub mod client;
pub mod dates;
pub mod endpoints;
pub mod error;
pub mod labels;
pub mod options;
pub mod render;
pub mod sanitize;
pub mod sources;

pub use client::RemoteClient;
pub use endpoints::Endpoints;
pub use error::FeedError;
pub use labels::{LabelCategory, LabelResolver};
pub use options::{fetch_news_sources, fetch_story_options, OptionEntry};
pub use render::Renderer;
pub use sanitize::sanitize;
pub use sources::{BlockSource, RenderContext};
