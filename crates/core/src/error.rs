use thiserror::Error;

#[derive(Error, Debug)]
pub enum HitlensError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Fixture error: {0}")]
    Fixture(String),
}

pub type Result<T> = std::result::Result<T, HitlensError>;
