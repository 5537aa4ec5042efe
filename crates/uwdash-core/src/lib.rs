//! Shared configuration, option catalogs, and canonical entity types for the
//! dashboard block pipeline.

pub mod app_config;
pub mod blocks;
pub mod config;
pub mod entities;
pub mod error;
pub mod options;

pub use app_config::{AppConfig, Environment};
pub use blocks::{
    load_blocks, parse_blocks, selected_ids, BlockConfig, BlockKind, BlockSettings, BlocksFile,
    EventsSettings, GlobalNewsFilter, GlobalNewsSettings, ImportantDatesSettings, MaxChars,
    NewsSettings, SortBy, StoriesSettings,
};
pub use config::{load_app_config, load_app_config_from_env};
pub use entities::{
    Event, FilterDescriptor, GlobalNewsBlock, GlobalNewsItem, ImportantDate, NewsBlock, NewsItem,
    RenderedBlock, StoriesBlock, TermDate,
};
pub use error::ConfigError;
