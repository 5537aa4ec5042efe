use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

#[test]
fn parse_environment_known_values() {
    assert_eq!(
        parse_environment("development").unwrap(),
        Environment::Development
    );
    assert_eq!(parse_environment("test").unwrap(), Environment::Test);
    assert_eq!(
        parse_environment("production").unwrap(),
        Environment::Production
    );
}

#[test]
fn parse_environment_unknown_fails() {
    let err = parse_environment("staging").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "UWDASH_ENV"));
}

#[test]
fn build_app_config_uses_defaults_with_empty_env() {
    let map: HashMap<&str, &str> = HashMap::new();
    let cfg = build_app_config(lookup_from_map(&map)).expect("defaults should be valid");
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.bind_addr.to_string(), "0.0.0.0:3000");
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.blocks_path.to_str(), Some("./config/blocks.yaml"));
    assert!(cfg.open_data_api_key.is_none());
    assert!(cfg.news_api_key.is_none());
    assert_eq!(cfg.open_data_base_url, "https://openapi.data.uwaterloo.ca/v3");
    assert_eq!(cfg.news_api_base_url, "https://newsapi.org/v2");
    assert_eq!(
        cfg.stories_base_url,
        "https://pilots.uwaterloo.ca/news/api/v1.0"
    );
    assert_eq!(cfg.request_timeout_secs, 30);
    assert_eq!(cfg.connect_timeout_secs, 10);
    assert_eq!(cfg.render_timeout_secs, 60);
    assert_eq!(cfg.user_agent, "uwdash/0.1 (dashboard-blocks)");
}

#[test]
fn build_app_config_reads_api_keys() {
    let mut map = HashMap::new();
    map.insert("UWDASH_OPEN_DATA_API_KEY", "open-key");
    map.insert("UWDASH_NEWS_API_KEY", "news-key");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.open_data_api_key.as_deref(), Some("open-key"));
    assert_eq!(cfg.news_api_key.as_deref(), Some("news-key"));
}

#[test]
fn build_app_config_treats_blank_api_key_as_absent() {
    let mut map = HashMap::new();
    map.insert("UWDASH_NEWS_API_KEY", "   ");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!(cfg.news_api_key.is_none());
}

#[test]
fn build_app_config_strips_trailing_slash_from_base_urls() {
    let mut map = HashMap::new();
    map.insert("UWDASH_OPEN_DATA_BASE_URL", "http://127.0.0.1:9000/v3/");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.open_data_base_url, "http://127.0.0.1:9000/v3");
}

#[test]
fn build_app_config_rejects_non_http_base_url() {
    let mut map = HashMap::new();
    map.insert("UWDASH_STORIES_BASE_URL", "ftp://example.com");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "UWDASH_STORIES_BASE_URL"),
        "expected InvalidEnvVar(UWDASH_STORIES_BASE_URL), got: {result:?}"
    );
}

#[test]
fn build_app_config_fails_with_invalid_bind_addr() {
    let mut map = HashMap::new();
    map.insert("UWDASH_BIND_ADDR", "not-a-socket-addr");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "UWDASH_BIND_ADDR"),
        "expected InvalidEnvVar(UWDASH_BIND_ADDR), got: {result:?}"
    );
}

#[test]
fn build_app_config_request_timeout_override() {
    let mut map = HashMap::new();
    map.insert("UWDASH_REQUEST_TIMEOUT_SECS", "5");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.request_timeout_secs, 5);
}

#[test]
fn build_app_config_connect_timeout_override() {
    let mut map = HashMap::new();
    map.insert("UWDASH_CONNECT_TIMEOUT_SECS", "3");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.connect_timeout_secs, 3);
}

#[test]
fn build_app_config_request_timeout_invalid() {
    let mut map = HashMap::new();
    map.insert("UWDASH_REQUEST_TIMEOUT_SECS", "soon");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "UWDASH_REQUEST_TIMEOUT_SECS"),
        "expected InvalidEnvVar(UWDASH_REQUEST_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_zero_render_timeout() {
    let mut map = HashMap::new();
    map.insert("UWDASH_RENDER_TIMEOUT_SECS", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "UWDASH_RENDER_TIMEOUT_SECS"),
        "expected InvalidEnvVar(UWDASH_RENDER_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn debug_output_redacts_api_keys() {
    let mut map = HashMap::new();
    map.insert("UWDASH_OPEN_DATA_API_KEY", "super-secret-open");
    map.insert("UWDASH_NEWS_API_KEY", "super-secret-news");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    let rendered = format!("{cfg:?}");
    assert!(!rendered.contains("super-secret"));
    assert!(rendered.contains("[redacted]"));
}
