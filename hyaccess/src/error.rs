use thiserror::Error;

#[derive(Debug, Error)]
pub enum AccessError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse emitter configuration '{file}': {source}")]
    ConfigParseError {
        source: toml::de::Error,
        file: String,
    },

    #[error("Failed to serialize emitter configuration for '{path}': {source}")]
    ConfigSerializeError {
        source: toml::ser::Error,
        path: String,
    },
}

pub type AccessResult<T> = Result<T, AccessError>;
