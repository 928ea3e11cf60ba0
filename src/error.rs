use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Engine-level failure; the message text is the engine's, verbatim.
    #[error(transparent)]
    Database(#[from] duckdb::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// A value with no JSON representation was read back from the engine.
    #[error("{0}")]
    Encoding(String),

    #[error("bootstrap failed: {0}")]
    Bootstrap(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
