use thiserror::Error;
use uwdash_core::ConfigError;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("response from {context} is missing field '{field}'")]
    MissingField { context: String, field: String },

    #[error("unparseable date '{value}' in {context}")]
    InvalidDate { context: String, value: String },

    #[error("rendering block '{block}' exceeded {secs}s")]
    Timeout { block: String, secs: u64 },
}
