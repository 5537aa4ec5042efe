//! `options` command: prints the values an editor can choose for a setting.

use uwdash_core::options::Catalog;
use uwdash_core::AppConfig;
use uwdash_feeds::{fetch_news_sources, fetch_story_options, LabelCategory, Renderer};

/// Which option list to print.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionList {
    /// Built-in catalog, no network access.
    Static(Catalog),
    /// Story filter vocabulary from the stories API.
    Story(LabelCategory),
    /// Publisher directory from the news API.
    Sources,
}

/// Parses the `options` argument.
///
/// # Errors
///
/// Returns a message listing the accepted names when `s` is unknown.
pub fn parse_option_list(s: &str) -> Result<OptionList, String> {
    match s {
        "topics" => Ok(OptionList::Story(LabelCategory::Topics)),
        "audience" => Ok(OptionList::Story(LabelCategory::Audience)),
        "faculties" => Ok(OptionList::Story(LabelCategory::Faculties)),
        "news_type" => Ok(OptionList::Story(LabelCategory::StoryType)),
        "sources" => Ok(OptionList::Sources),
        other => other.parse::<Catalog>().map(OptionList::Static).map_err(|_| {
            format!(
                "unknown option list '{other}'; expected one of news_site, category, country, \
                 language, sort_by, topics, audience, faculties, news_type, sources"
            )
        }),
    }
}

/// Prints `id<TAB>label` lines for the chosen list.
///
/// # Errors
///
/// Returns an error if a remote listing cannot be fetched.
pub(crate) async fn run_options(config: &AppConfig, list: OptionList) -> anyhow::Result<()> {
    let entries: Vec<(String, String)> = match list {
        OptionList::Static(catalog) => catalog
            .entries()
            .iter()
            .map(|(id, label)| ((*id).to_string(), (*label).to_string()))
            .collect(),
        OptionList::Story(category) => {
            let renderer = Renderer::from_app_config(config)?;
            fetch_story_options(renderer.client(), renderer.endpoints(), category)
                .await?
                .into_iter()
                .map(|o| (o.id, o.label))
                .collect()
        }
        OptionList::Sources => {
            let renderer = Renderer::from_app_config(config)?;
            fetch_news_sources(renderer.client(), renderer.endpoints())
                .await?
                .into_iter()
                .map(|o| (o.id, o.label))
                .collect()
        }
    };

    tracing::debug!(list = ?list, count = entries.len(), "listing options");
    for (id, label) in entries {
        println!("{id}\t{label}");
    }
    Ok(())
}
