//! Block instance configuration.
//!
//! A blocks file lists every configured dashboard widget. Each entry carries an
//! `id`, a `kind` tag, and the settings that kind understands. Settings are
//! validated when the file is loaded so a bad `max_chars` or a missing filter
//! value is rejected before any network call is made.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};

use crate::options::Catalog;
use crate::ConfigError;

pub const MIN_MAX_CHARS: u32 = 100;
pub const MAX_MAX_CHARS: u32 = 600;
const DEFAULT_MAX_CHARS: u32 = 400;

/// Upper bound the campus APIs accept for item counts.
pub const MAX_CAMPUS_ITEMS: u32 = 25;
/// Upper bound offered for the global news page size.
pub const MAX_GLOBAL_NEWS_ITEMS: u32 = 100;

/// Character budget for sanitized content, always within `[100, 600]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "NumberOrText", into = "u32")]
pub struct MaxChars(u32);

impl MaxChars {
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] when `value` is outside `[100, 600]`.
    pub fn new(value: u32) -> Result<Self, ConfigError> {
        if (MIN_MAX_CHARS..=MAX_MAX_CHARS).contains(&value) {
            Ok(Self(value))
        } else {
            Err(ConfigError::Validation(format!(
                "max_chars must be between {MIN_MAX_CHARS} and {MAX_MAX_CHARS}, got {value}"
            )))
        }
    }

    /// Parses an editor-supplied value such as `"400"`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] when the text is not a number or is
    /// out of range.
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        let value = raw.trim().parse::<u32>().map_err(|_| {
            ConfigError::Validation(format!("max_chars must be a number, got '{raw}'"))
        })?;
        Self::new(value)
    }

    #[must_use]
    pub fn get(self) -> usize {
        self.0 as usize
    }
}

impl Default for MaxChars {
    fn default() -> Self {
        Self(DEFAULT_MAX_CHARS)
    }
}

impl From<MaxChars> for u32 {
    fn from(value: MaxChars) -> Self {
        value.0
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(i64),
    Text(String),
}

impl TryFrom<NumberOrText> for MaxChars {
    type Error = ConfigError;

    fn try_from(raw: NumberOrText) -> Result<Self, Self::Error> {
        match raw {
            NumberOrText::Number(n) => {
                let value = u32::try_from(n).map_err(|_| {
                    ConfigError::Validation(format!(
                        "max_chars must be between {MIN_MAX_CHARS} and {MAX_MAX_CHARS}, got {n}"
                    ))
                })?;
                MaxChars::new(value)
            }
            NumberOrText::Text(text) => MaxChars::parse(&text),
        }
    }
}

/// Drops unchecked checkbox values (`0` or blank) from a list of option ids.
#[must_use]
pub fn selected_ids<I, S>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    values
        .into_iter()
        .map(|v| v.as_ref().trim().to_string())
        .filter(|v| !v.is_empty() && v != "0")
        .collect()
}

fn deserialize_ids<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Vec<NumberOrText> = Vec::deserialize(deserializer)?;
    Ok(selected_ids(raw.into_iter().map(|v| match v {
        NumberOrText::Number(n) => n.to_string(),
        NumberOrText::Text(t) => t,
    })))
}

fn deserialize_optional_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<NumberOrText> = Option::deserialize(deserializer)?;
    let value = match raw {
        Some(NumberOrText::Number(n)) => n.to_string(),
        Some(NumberOrText::Text(t)) => t,
        None => return Ok(None),
    };
    Ok(selected_ids([value]).into_iter().next())
}

fn default_max_items() -> u32 {
    15
}

fn default_global_max_items() -> u32 {
    10
}

fn default_news_filter() -> String {
    "all".to_string()
}

fn default_language() -> String {
    "all".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventsSettings {
    #[serde(default = "default_max_items")]
    pub max_items: u32,
    #[serde(default)]
    pub max_chars: MaxChars,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportantDatesSettings {
    #[serde(default = "default_max_items")]
    pub max_items: u32,
    #[serde(default)]
    pub max_chars: MaxChars,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsSettings {
    /// `"all"` or a site id such as `"39"`.
    #[serde(default = "default_news_filter")]
    pub filter: String,
    #[serde(default = "default_max_items")]
    pub max_items: u32,
    #[serde(default)]
    pub max_chars: MaxChars,
}

impl NewsSettings {
    #[must_use]
    pub fn is_all(&self) -> bool {
        self.filter == "all"
    }
}

/// Which dimension narrows a global news query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GlobalNewsFilter {
    Category,
    Country,
    /// Keywords matched in title and body.
    Keywords,
    /// Keywords matched in the title only.
    KeywordsTitle,
    Source,
}

impl GlobalNewsFilter {
    /// Display label used in the rendered filter descriptor.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            GlobalNewsFilter::Category => "Category",
            GlobalNewsFilter::Country => "Country",
            GlobalNewsFilter::Keywords => "Keywords (title and body)",
            GlobalNewsFilter::KeywordsTitle => "Keywords (title only)",
            GlobalNewsFilter::Source => "Source",
        }
    }

    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            GlobalNewsFilter::Category => "category",
            GlobalNewsFilter::Country => "country",
            GlobalNewsFilter::Keywords => "keywords",
            GlobalNewsFilter::KeywordsTitle => "keywords_title",
            GlobalNewsFilter::Source => "source",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortBy {
    #[serde(rename = "relevancy")]
    Relevancy,
    #[serde(rename = "popularity")]
    Popularity,
    #[default]
    #[serde(rename = "publishedAt")]
    PublishedAt,
}

impl SortBy {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SortBy::Relevancy => "relevancy",
            SortBy::Popularity => "popularity",
            SortBy::PublishedAt => "publishedAt",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalNewsSettings {
    pub global_news_filter: GlobalNewsFilter,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub category_name: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub country_name: Option<String>,
    #[serde(default)]
    pub keywords: Option<String>,
    #[serde(default)]
    pub keywords_title: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub source_name: Option<String>,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default)]
    pub language_name: Option<String>,
    #[serde(default)]
    pub sort_by: SortBy,
    #[serde(default = "default_global_max_items")]
    pub max_items: u32,
}

impl GlobalNewsSettings {
    /// Value selected for the active filter dimension.
    #[must_use]
    pub fn active_value(&self) -> Option<&str> {
        let value = match self.global_news_filter {
            GlobalNewsFilter::Category => self.category.as_deref(),
            GlobalNewsFilter::Country => self.country.as_deref(),
            GlobalNewsFilter::Keywords => self.keywords.as_deref(),
            GlobalNewsFilter::KeywordsTitle => self.keywords_title.as_deref(),
            GlobalNewsFilter::Source => self.source.as_deref(),
        };
        value.map(str::trim).filter(|v| !v.is_empty())
    }

    /// Human label of the active filter value, as captured when the block was
    /// configured. Keyword filters display the keywords themselves; a source
    /// without a captured name displays its id.
    #[must_use]
    pub fn active_label(&self) -> Option<&str> {
        match self.global_news_filter {
            GlobalNewsFilter::Category => self.category_name.as_deref(),
            GlobalNewsFilter::Country => self.country_name.as_deref(),
            GlobalNewsFilter::Keywords | GlobalNewsFilter::KeywordsTitle => self.active_value(),
            GlobalNewsFilter::Source => self.source_name.as_deref().or(self.source.as_deref()),
        }
    }

    /// Fills `category_name`, `country_name` and `language_name` from the
    /// static catalogs when the editor did not supply them.
    pub fn capture_names(&mut self) {
        if self.category_name.is_none() {
            self.category_name = self
                .category
                .as_deref()
                .and_then(|id| Catalog::Category.label(id))
                .map(str::to_string);
        }
        if self.country_name.is_none() {
            self.country_name = self
                .country
                .as_deref()
                .and_then(|id| Catalog::Country.label(id))
                .map(str::to_string);
        }
        if self.language_name.is_none() {
            self.language_name = Catalog::Language.label(&self.language).map(str::to_string);
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoriesSettings {
    #[serde(default, deserialize_with = "deserialize_ids")]
    pub topics: Vec<String>,
    #[serde(default, deserialize_with = "deserialize_ids")]
    pub audience: Vec<String>,
    #[serde(default, deserialize_with = "deserialize_ids")]
    pub faculties: Vec<String>,
    #[serde(default, deserialize_with = "deserialize_optional_id")]
    pub story_type: Option<String>,
    #[serde(default = "default_max_items")]
    pub max_stories: u32,
}

/// Settings for one block, tagged by `kind`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BlockSettings {
    Events(EventsSettings),
    ImportantDates(ImportantDatesSettings),
    News(NewsSettings),
    GlobalNews(GlobalNewsSettings),
    Stories(StoriesSettings),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockKind {
    Events,
    ImportantDates,
    News,
    GlobalNews,
    Stories,
}

impl std::fmt::Display for BlockKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BlockKind::Events => write!(f, "events"),
            BlockKind::ImportantDates => write!(f, "important_dates"),
            BlockKind::News => write!(f, "news"),
            BlockKind::GlobalNews => write!(f, "global_news"),
            BlockKind::Stories => write!(f, "stories"),
        }
    }
}

impl BlockSettings {
    #[must_use]
    pub fn kind(&self) -> BlockKind {
        match self {
            BlockSettings::Events(_) => BlockKind::Events,
            BlockSettings::ImportantDates(_) => BlockKind::ImportantDates,
            BlockSettings::News(_) => BlockKind::News,
            BlockSettings::GlobalNews(_) => BlockKind::GlobalNews,
            BlockSettings::Stories(_) => BlockKind::Stories,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockConfig {
    pub id: String,
    #[serde(flatten)]
    pub settings: BlockSettings,
}

impl BlockConfig {
    #[must_use]
    pub fn kind(&self) -> BlockKind {
        self.settings.kind()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct BlocksFile {
    pub blocks: Vec<BlockConfig>,
}

impl BlocksFile {
    #[must_use]
    pub fn find(&self, id: &str) -> Option<&BlockConfig> {
        self.blocks.iter().find(|b| b.id == id)
    }
}

/// Load and validate the block configuration from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_blocks(path: &Path) -> Result<BlocksFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::BlocksFileIo {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_blocks(&content)
}

/// Parse, validate, and fill catalog names for a YAML blocks document.
///
/// # Errors
///
/// Returns `ConfigError` if the document cannot be parsed or fails validation.
pub fn parse_blocks(content: &str) -> Result<BlocksFile, ConfigError> {
    let mut blocks_file: BlocksFile = serde_yaml::from_str(content)?;

    validate_blocks(&blocks_file)?;

    for block in &mut blocks_file.blocks {
        if let BlockSettings::GlobalNews(settings) = &mut block.settings {
            settings.capture_names();
        }
    }

    Ok(blocks_file)
}

fn validate_blocks(blocks_file: &BlocksFile) -> Result<(), ConfigError> {
    let mut seen_ids = HashSet::new();

    for block in &blocks_file.blocks {
        if block.id.trim().is_empty() {
            return Err(ConfigError::Validation(
                "block id must be non-empty".to_string(),
            ));
        }
        if !seen_ids.insert(block.id.as_str()) {
            return Err(ConfigError::Validation(format!(
                "duplicate block id: '{}'",
                block.id
            )));
        }
        validate_settings(&block.id, &block.settings)?;
    }

    Ok(())
}

fn validate_settings(id: &str, settings: &BlockSettings) -> Result<(), ConfigError> {
    match settings {
        BlockSettings::Events(s) => check_range(id, "max_items", s.max_items, 1, MAX_CAMPUS_ITEMS),
        BlockSettings::ImportantDates(s) => {
            check_range(id, "max_items", s.max_items, 1, MAX_CAMPUS_ITEMS)
        }
        BlockSettings::News(s) => {
            check_range(id, "max_items", s.max_items, 1, MAX_CAMPUS_ITEMS)?;
            if !s.is_all() && (s.filter.is_empty() || !s.filter.chars().all(|c| c.is_ascii_digit()))
            {
                return Err(ConfigError::Validation(format!(
                    "block '{id}': news filter must be \"all\" or a numeric site id, got '{}'",
                    s.filter
                )));
            }
            Ok(())
        }
        BlockSettings::GlobalNews(s) => validate_global_news(id, s),
        BlockSettings::Stories(s) => {
            check_range(id, "max_stories", s.max_stories, 1, MAX_CAMPUS_ITEMS)?;
            for (field, values) in [
                ("topics", s.topics.as_slice()),
                ("audience", s.audience.as_slice()),
                ("faculties", s.faculties.as_slice()),
                ("story_type", s.story_type.as_slice()),
            ] {
                for value in values {
                    check_option_id(id, field, value)?;
                }
            }
            Ok(())
        }
    }
}

/// Option ids end up in request paths and query strings, so only plain
/// identifiers are accepted: ASCII letters, digits, `-` and `_`.
fn is_option_id(value: &str) -> bool {
    !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

fn check_option_id(id: &str, field: &str, value: &str) -> Result<(), ConfigError> {
    if is_option_id(value) {
        Ok(())
    } else {
        Err(ConfigError::Validation(format!(
            "block '{id}': {field} value '{value}' is not a valid option id"
        )))
    }
}

fn validate_global_news(id: &str, s: &GlobalNewsSettings) -> Result<(), ConfigError> {
    check_range(id, "max_items", s.max_items, 0, MAX_GLOBAL_NEWS_ITEMS)?;

    let Some(value) = s.active_value() else {
        return Err(ConfigError::Validation(format!(
            "block '{id}': global_news_filter is '{}' but no {} value is set",
            s.global_news_filter.key(),
            s.global_news_filter.key()
        )));
    };

    let catalog = match s.global_news_filter {
        GlobalNewsFilter::Category => Some(Catalog::Category),
        GlobalNewsFilter::Country => Some(Catalog::Country),
        _ => None,
    };
    if let Some(catalog) = catalog {
        if !catalog.contains(value) {
            return Err(ConfigError::Validation(format!(
                "block '{id}': unknown {} '{value}'",
                catalog.name()
            )));
        }
    }

    if s.global_news_filter == GlobalNewsFilter::Source {
        check_option_id(id, "source", value)?;
    }

    if !Catalog::Language.contains(&s.language) {
        return Err(ConfigError::Validation(format!(
            "block '{id}': unknown language '{}'",
            s.language
        )));
    }

    Ok(())
}

fn check_range(id: &str, field: &str, value: u32, min: u32, max: u32) -> Result<(), ConfigError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::Validation(format!(
            "block '{id}': {field} must be between {min} and {max}, got {value}"
        )))
    }
}

#[cfg(test)]
#[path = "blocks_test.rs"]
mod tests;
