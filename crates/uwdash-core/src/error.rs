use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read blocks file {path}: {source}")]
    BlocksFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse blocks file: {0}")]
    BlocksFileParse(#[from] serde_yaml::Error),

    #[error("configuration validation failed: {0}")]
    Validation(String),
}
