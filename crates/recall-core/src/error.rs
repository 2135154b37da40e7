use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Capture sink error: {0}")]
    CaptureSink(String),

    #[error("Profile source error: {0}")]
    ProfileSource(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
