use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub blocks_path: PathBuf,
    /// Key for the campus Open Data API (events, important dates, news).
    pub open_data_api_key: Option<String>,
    /// Key for newsapi.org (global news).
    pub news_api_key: Option<String>,
    pub open_data_base_url: String,
    pub news_api_base_url: String,
    pub stories_base_url: String,
    pub request_timeout_secs: u64,
    pub connect_timeout_secs: u64,
    /// Upper bound on one block render, covering every fetch in the chain.
    pub render_timeout_secs: u64,
    pub user_agent: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("blocks_path", &self.blocks_path)
            .field(
                "open_data_api_key",
                &self.open_data_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field(
                "news_api_key",
                &self.news_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("open_data_base_url", &self.open_data_base_url)
            .field("news_api_base_url", &self.news_api_base_url)
            .field("stories_base_url", &self.stories_base_url)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .field("render_timeout_secs", &self.render_timeout_secs)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}
