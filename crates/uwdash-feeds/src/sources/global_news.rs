//! World headlines from the news aggregation API.

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use serde::Deserialize;
use serde_json::{Map, Value};
use uwdash_core::{
    ConfigError, FilterDescriptor, GlobalNewsBlock, GlobalNewsFilter, GlobalNewsItem,
    GlobalNewsSettings,
};

use super::{BlockSource, RenderContext};
use crate::client::decode;
use crate::dates::{parse_timestamp, DISPLAY_DATE, DISPLAY_TIME};
use crate::endpoints::Endpoints;
use crate::error::FeedError;

#[derive(Debug, Deserialize)]
struct ArticlesResponse {
    articles: Vec<Map<String, Value>>,
}

/// Builds the query URL for the active filter dimension.
///
/// # Errors
///
/// Returns [`FeedError::Config`] when the active dimension has no value.
pub fn global_news_url(
    endpoints: &Endpoints,
    settings: &GlobalNewsSettings,
) -> Result<String, FeedError> {
    let value = settings.active_value().ok_or_else(|| {
        ConfigError::Validation(format!(
            "global_news_filter is '{}' but no value is set",
            settings.global_news_filter.key()
        ))
    })?;

    let mut path = match settings.global_news_filter {
        GlobalNewsFilter::Category => format!("top-headlines?category={value}"),
        GlobalNewsFilter::Country => format!("top-headlines?country={value}"),
        GlobalNewsFilter::Keywords => {
            format!("everything?q={}", utf8_percent_encode(value, NON_ALPHANUMERIC))
        }
        GlobalNewsFilter::KeywordsTitle => format!(
            "everything?qInTitle={}",
            utf8_percent_encode(value, NON_ALPHANUMERIC)
        ),
        GlobalNewsFilter::Source => format!("top-headlines?sources={value}"),
    };

    if settings.language != "all" {
        path.push_str("&language=");
        path.push_str(&settings.language);
    }
    path.push_str(&format!(
        "&pageSize={}&sortBy={}",
        settings.max_items,
        settings.sort_by.as_str()
    ));

    Ok(endpoints.news_api(&path))
}

#[must_use]
pub(crate) fn filter_descriptor(settings: &GlobalNewsSettings) -> FilterDescriptor {
    FilterDescriptor {
        filter_type: settings.global_news_filter.label().to_string(),
        filter: settings.active_label().unwrap_or_default().to_string(),
    }
}

fn take_string(article: &mut Map<String, Value>, field: &str) -> Result<String, FeedError> {
    match article.remove(field) {
        Some(Value::String(s)) => Ok(s),
        _ => Err(FeedError::MissingField {
            context: "global news articles".to_string(),
            field: field.to_string(),
        }),
    }
}

fn map_article(mut article: Map<String, Value>) -> Result<GlobalNewsItem, FeedError> {
    let title = take_string(&mut article, "title")?;
    let url = take_string(&mut article, "url")?;
    let source = article
        .remove("source")
        .as_ref()
        .and_then(|s| s.get("name"))
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| FeedError::MissingField {
            context: "global news articles".to_string(),
            field: "source.name".to_string(),
        })?;
    let published = article
        .get("publishedAt")
        .and_then(Value::as_str)
        .ok_or_else(|| FeedError::MissingField {
            context: "global news articles".to_string(),
            field: "publishedAt".to_string(),
        })?;

    let published = parse_timestamp("publishedAt", published)?;
    let date = published.format(DISPLAY_DATE).to_string();
    let time = published.format(DISPLAY_TIME).to_string();

    Ok(GlobalNewsItem {
        title,
        source,
        date,
        time,
        url,
        extra: article,
    })
}

impl BlockSource for GlobalNewsSettings {
    type Output = GlobalNewsBlock;

    async fn build(&self, ctx: &mut RenderContext<'_>) -> Result<GlobalNewsBlock, FeedError> {
        let url = global_news_url(ctx.endpoints, self)?;
        let body = ctx
            .client
            .fetch(&url, ctx.endpoints.news_api_headers())
            .await?;
        let response: ArticlesResponse = decode("global news feed", &body)?;
        tracing::debug!(
            filter = self.global_news_filter.key(),
            count = response.articles.len(),
            "decoded global news"
        );

        let news = response
            .articles
            .into_iter()
            .map(map_article)
            .collect::<Result<Vec<_>, FeedError>>()?;

        Ok(GlobalNewsBlock {
            filter: filter_descriptor(self),
            language: self
                .language_name
                .clone()
                .unwrap_or_else(|| self.language.clone()),
            news,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::test_support::mocked;
    use serde_json::json;
    use uwdash_core::SortBy;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn settings(filter: GlobalNewsFilter) -> GlobalNewsSettings {
        GlobalNewsSettings {
            global_news_filter: filter,
            category: None,
            category_name: None,
            country: None,
            country_name: None,
            keywords: None,
            keywords_title: None,
            source: None,
            source_name: None,
            language: "all".to_string(),
            language_name: Some("All".to_string()),
            sort_by: SortBy::PublishedAt,
            max_items: 10,
        }
    }

    fn endpoints() -> Endpoints {
        Endpoints::new("http://o", "https://news.example/v2", "http://s", None, None).unwrap()
    }

    #[test]
    fn category_url_and_descriptor() {
        let mut s = settings(GlobalNewsFilter::Category);
        s.category = Some("science".to_string());
        s.category_name = Some("Science".to_string());
        assert_eq!(
            global_news_url(&endpoints(), &s).unwrap(),
            "https://news.example/v2/top-headlines?category=science&pageSize=10&sortBy=publishedAt"
        );
        let d = filter_descriptor(&s);
        assert_eq!(d.filter_type, "Category");
        assert_eq!(d.filter, "Science");
    }

    #[test]
    fn country_url_adds_language_when_not_all() {
        let mut s = settings(GlobalNewsFilter::Country);
        s.country = Some("ca".to_string());
        s.language = "fr".to_string();
        s.sort_by = SortBy::Popularity;
        s.max_items = 5;
        assert_eq!(
            global_news_url(&endpoints(), &s).unwrap(),
            "https://news.example/v2/top-headlines?country=ca&language=fr&pageSize=5&sortBy=popularity"
        );
    }

    #[test]
    fn keyword_urls_are_percent_encoded() {
        let mut s = settings(GlobalNewsFilter::Keywords);
        s.keywords = Some("bitcoin".to_string());
        assert_eq!(
            global_news_url(&endpoints(), &s).unwrap(),
            "https://news.example/v2/everything?q=bitcoin&pageSize=10&sortBy=publishedAt"
        );
        let d = filter_descriptor(&s);
        assert_eq!(d.filter_type, "Keywords (title and body)");
        assert_eq!(d.filter, "bitcoin");

        let mut s = settings(GlobalNewsFilter::KeywordsTitle);
        s.keywords_title = Some("climate & energy".to_string());
        assert_eq!(
            global_news_url(&endpoints(), &s).unwrap(),
            "https://news.example/v2/everything?qInTitle=climate%20%26%20energy&pageSize=10&sortBy=publishedAt"
        );
        assert_eq!(filter_descriptor(&s).filter_type, "Keywords (title only)");
    }

    #[test]
    fn source_url_and_descriptor_fall_back_to_id() {
        let mut s = settings(GlobalNewsFilter::Source);
        s.source = Some("bbc-news".to_string());
        assert_eq!(
            global_news_url(&endpoints(), &s).unwrap(),
            "https://news.example/v2/top-headlines?sources=bbc-news&pageSize=10&sortBy=publishedAt"
        );
        assert_eq!(filter_descriptor(&s).filter, "bbc-news");
    }

    #[test]
    fn missing_active_value_is_a_config_error() {
        let s = settings(GlobalNewsFilter::Country);
        let err = global_news_url(&endpoints(), &s).unwrap_err();
        assert!(matches!(err, FeedError::Config(ConfigError::Validation(_))));
    }

    #[tokio::test]
    async fn maps_articles_with_date_and_time() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/everything"))
            .and(query_param("q", "bitcoin"))
            .and(query_param("pageSize", "10"))
            .and(header("X-API-KEY", "news-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "ok",
                "totalResults": 1,
                "articles": [{
                    "source": {"id": null, "name": "Example Times"},
                    "author": "A. Writer",
                    "title": "Markets move",
                    "url": "https://example.com/markets",
                    "publishedAt": "2025-05-20T14:45:00Z"
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let (client, endpoints) = mocked(&server);
        let mut ctx = RenderContext::new(&client, &endpoints);
        let mut s = settings(GlobalNewsFilter::Keywords);
        s.keywords = Some("bitcoin".to_string());
        let block = s.build(&mut ctx).await.unwrap();

        assert_eq!(block.language, "All");
        assert_eq!(block.filter.filter, "bitcoin");
        assert_eq!(block.news.len(), 1);
        let article = &block.news[0];
        assert_eq!(article.title, "Markets move");
        assert_eq!(article.source, "Example Times");
        assert_eq!(article.date, "May 20, 2025");
        assert_eq!(article.time, "2:45 pm UTC");
        assert_eq!(article.url, "https://example.com/markets");
        assert_eq!(article.extra["author"], "A. Writer");
    }

    #[tokio::test]
    async fn error_envelope_without_articles_fails_the_render() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/everything"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "error",
                "code": "apiKeyInvalid"
            })))
            .mount(&server)
            .await;

        let (client, endpoints) = mocked(&server);
        let mut ctx = RenderContext::new(&client, &endpoints);
        let mut s = settings(GlobalNewsFilter::Keywords);
        s.keywords = Some("bitcoin".to_string());
        let err = s.build(&mut ctx).await.unwrap_err();
        assert!(matches!(err, FeedError::Deserialize { .. }), "got: {err:?}");
    }
}
