use thiserror::Error;

/// Failures at the edges of the assistant: loading config files and catalog
/// documents. Query processing itself has no error path.
#[derive(Debug, Error)]
pub enum AssistantError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid configuration: {}", .0.join("; "))]
    InvalidConfig(Vec<String>),

    #[error("catalog document must be a JSON object, got {0}")]
    CatalogShape(&'static str),
}

pub type Result<T> = std::result::Result<T, AssistantError>;
