use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

const DEFAULT_OPEN_DATA_BASE_URL: &str = "https://openapi.data.uwaterloo.ca/v3";
const DEFAULT_NEWS_API_BASE_URL: &str = "https://newsapi.org/v2";
const DEFAULT_STORIES_BASE_URL: &str = "https://pilots.uwaterloo.ca/news/api/v1.0";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so tests can pass a `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let base_url = |var: &str, default: &str| -> Result<String, ConfigError> {
        let raw = or_default(var, default);
        let trimmed = raw.trim().trim_end_matches('/');
        if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
            return Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: format!("expected an http(s) URL, got '{raw}'"),
            });
        }
        Ok(trimmed.to_string())
    };

    let env = parse_environment(&or_default("UWDASH_ENV", "development"))?;

    let raw_bind = or_default("UWDASH_BIND_ADDR", "0.0.0.0:3000");
    let bind_addr = raw_bind
        .parse::<SocketAddr>()
        .map_err(|e| ConfigError::InvalidEnvVar {
            var: "UWDASH_BIND_ADDR".to_string(),
            reason: e.to_string(),
        })?;

    let log_level = or_default("UWDASH_LOG_LEVEL", "info");
    let blocks_path = PathBuf::from(or_default("UWDASH_BLOCKS_PATH", "./config/blocks.yaml"));
    let open_data_api_key = optional("UWDASH_OPEN_DATA_API_KEY");
    let news_api_key = optional("UWDASH_NEWS_API_KEY");

    let open_data_base_url = base_url("UWDASH_OPEN_DATA_BASE_URL", DEFAULT_OPEN_DATA_BASE_URL)?;
    let news_api_base_url = base_url("UWDASH_NEWS_API_BASE_URL", DEFAULT_NEWS_API_BASE_URL)?;
    let stories_base_url = base_url("UWDASH_STORIES_BASE_URL", DEFAULT_STORIES_BASE_URL)?;

    let request_timeout_secs = parse_u64("UWDASH_REQUEST_TIMEOUT_SECS", "30")?;
    let connect_timeout_secs = parse_u64("UWDASH_CONNECT_TIMEOUT_SECS", "10")?;
    let render_timeout_secs = parse_u64("UWDASH_RENDER_TIMEOUT_SECS", "60")?;
    if render_timeout_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "UWDASH_RENDER_TIMEOUT_SECS".to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }
    let user_agent = or_default("UWDASH_USER_AGENT", "uwdash/0.1 (dashboard-blocks)");

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        blocks_path,
        open_data_api_key,
        news_api_key,
        open_data_base_url,
        news_api_base_url,
        stories_base_url,
        request_timeout_secs,
        connect_timeout_secs,
        render_timeout_secs,
        user_agent,
    })
}

/// Parse a string into an `Environment` variant.
///
/// # Errors
///
/// Returns `ConfigError::InvalidEnvVar` for anything other than
/// `development`, `test`, or `production`.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "UWDASH_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
