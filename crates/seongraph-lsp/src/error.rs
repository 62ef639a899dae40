//! Error type for language-server communication

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to start language server: {0}")]
    Spawn(&'static str),

    #[error("language server protocol error: {0}")]
    Protocol(&'static str),

    #[error("language server returned an error: {0}")]
    Server(String),

    #[error("invalid path for uri: {0}")]
    InvalidPath(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
